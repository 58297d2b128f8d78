//! Background persistence of tracked visits.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{Semaphore, mpsc};
use tokio_retry::Retry;
use tokio_retry::strategy::{ExponentialBackoff, jitter};
use tracing::{debug, error};

use crate::domain::entities::Visit;
use crate::domain::repositories::VisitRepository;

const MAX_RETRIES: usize = 3;

/// Drains the visit channel and persists each visit.
///
/// Up to `concurrency` visits are written at once. Each write is retried with
/// jittered exponential backoff; visits that still fail are logged and dropped.
/// Returns once every sender has been dropped and in-flight writes have finished.
pub async fn run_visit_worker(
    mut rx: mpsc::Receiver<Visit>,
    repository: Arc<dyn VisitRepository>,
    concurrency: usize,
) {
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));

    while let Some(visit) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };
        let repository = repository.clone();

        tokio::spawn(async move {
            persist_visit(repository.as_ref(), visit).await;
            drop(permit);
        });
    }

    // Wait for in-flight writes before returning.
    let _ = permits.acquire_many(concurrency.max(1) as u32).await;
    debug!("Visit worker stopped");
}

async fn persist_visit(repository: &dyn VisitRepository, visit: Visit) {
    let strategy = ExponentialBackoff::from_millis(10)
        .max_delay(Duration::from_secs(1))
        .map(jitter)
        .take(MAX_RETRIES);

    let short_url_id = visit.short_url_id;
    let result = Retry::spawn(strategy, || repository.record(visit.clone())).await;

    match result {
        Ok(()) => debug!("Visit recorded for short URL {}", short_url_id),
        Err(e) => error!(
            "Dropping visit for short URL {} after {} retries: {}",
            short_url_id, MAX_RETRIES, e
        ),
    }
}
