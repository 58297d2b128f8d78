//! PostgreSQL implementation of the visit repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::Visit;
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// PostgreSQL repository persisting tracked visits.
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn record(&self, visit: Visit) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let location = visit.location.unwrap_or_default();

        sqlx::query(
            r#"
            INSERT INTO visits (
                short_url_id, visited_at, remote_addr, user_agent, referer,
                visited_url, potential_bot, country_code, country_name, city
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            "#,
        )
        .bind(visit.short_url_id)
        .bind(visit.visited_at)
        .bind(visit.remote_addr)
        .bind(visit.user_agent)
        .bind(visit.referer)
        .bind(visit.visited_url)
        .bind(visit.potential_bot)
        .bind(location.country_code)
        .bind(location.country_name)
        .bind(location.city)
        .execute(&mut *tx)
        .await?;

        sqlx::query("UPDATE short_urls SET visits_count = visits_count + 1 WHERE id = $1")
            .bind(visit.short_url_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
