//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{ShortUrl, ShortUrlIdentifier};
use crate::domain::redirect::{RedirectCondition, RedirectRule};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

const SHORT_URL_COLUMNS: &str = r#"
    s.id, s.short_code, d.domain, s.long_url, s.created_at,
    s.valid_since, s.valid_until, s.max_visits, s.visits_count, s.forward_query
"#;

#[derive(sqlx::FromRow)]
struct ShortUrlRow {
    id: i64,
    short_code: String,
    domain: Option<String>,
    long_url: String,
    created_at: DateTime<Utc>,
    valid_since: Option<DateTime<Utc>>,
    valid_until: Option<DateTime<Utc>>,
    max_visits: Option<i64>,
    visits_count: i64,
    forward_query: bool,
}

impl ShortUrlRow {
    fn into_short_url(self, rules: Vec<RedirectRule>) -> ShortUrl {
        ShortUrl::new(self.id, self.short_code, self.domain.as_deref(), self.long_url)
            .with_created_at(self.created_at)
            .with_validity(self.valid_since, self.valid_until)
            .with_max_visits(self.max_visits, self.visits_count)
            .with_forward_query(self.forward_query)
            .with_rules(rules)
    }
}

/// One rule joined with one of its conditions (or none).
#[derive(sqlx::FromRow)]
struct RuleConditionRow {
    rule_id: i64,
    priority: i32,
    long_url: String,
    kind: Option<String>,
    match_key: Option<String>,
    match_value: Option<String>,
}

/// PostgreSQL repository for short URLs and their redirect rules.
///
/// Expects the `short_urls`, `domains`, `redirect_rules` and
/// `redirect_conditions` tables to exist; the schema is managed outside this
/// service.
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    async fn load_rules(&self, short_url_id: i64) -> Result<Vec<RedirectRule>, AppError> {
        let rows = sqlx::query_as::<_, RuleConditionRow>(
            r#"
            SELECT r.id AS rule_id, r.priority, r.long_url,
                   c.kind, c.match_key, c.match_value
            FROM redirect_rules r
            LEFT JOIN redirect_conditions c ON c.rule_id = r.id
            WHERE r.short_url_id = $1
            ORDER BY r.priority, r.id, c.position
            "#,
        )
        .bind(short_url_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(group_rules(rows))
    }

    async fn with_rules(&self, row: Option<ShortUrlRow>) -> Result<Option<ShortUrl>, AppError> {
        match row {
            Some(row) => {
                let rules = self.load_rules(row.id).await?;
                Ok(Some(row.into_short_url(rules)))
            }
            None => Ok(None),
        }
    }
}

/// Folds joined rows into rules, keeping row order.
///
/// Unknown condition kinds and rules that no longer validate are skipped with a
/// warning so one bad row cannot break the whole short URL.
fn group_rules(rows: Vec<RuleConditionRow>) -> Vec<RedirectRule> {
    let mut grouped: Vec<(i64, i32, String, Vec<RedirectCondition>)> = Vec::new();

    for row in rows {
        let condition = match row.kind.as_deref() {
            Some(kind) => {
                let parsed = RedirectCondition::from_parts(
                    kind,
                    row.match_key.as_deref(),
                    row.match_value.as_deref(),
                );
                if parsed.is_none() {
                    tracing::warn!("Skipping unknown condition '{}' of rule {}", kind, row.rule_id);
                }
                parsed
            }
            None => None,
        };

        let same_rule = grouped
            .last()
            .is_some_and(|(rule_id, ..)| *rule_id == row.rule_id);

        if same_rule {
            if let Some((.., conditions)) = grouped.last_mut() {
                conditions.extend(condition);
            }
        } else {
            grouped.push((
                row.rule_id,
                row.priority,
                row.long_url,
                condition.into_iter().collect(),
            ));
        }
    }

    grouped
        .into_iter()
        .filter_map(|(rule_id, priority, long_url, conditions)| {
            let priority = u32::try_from(priority).unwrap_or(0);
            match RedirectRule::new(priority, &long_url, conditions) {
                Ok(rule) => Some(rule),
                Err(e) => {
                    tracing::warn!("Skipping invalid redirect rule {}: {}", rule_id, e);
                    None
                }
            }
        })
        .collect()
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_identifier(
        &self,
        identifier: &ShortUrlIdentifier,
    ) -> Result<Option<ShortUrl>, AppError> {
        let query = format!(
            r#"
            SELECT {SHORT_URL_COLUMNS}
            FROM short_urls s
            LEFT JOIN domains d ON d.id = s.domain_id
            WHERE s.short_code = $1
              AND (($2::text IS NULL AND s.domain_id IS NULL) OR LOWER(d.domain) = LOWER($2))
            "#
        );

        let row = sqlx::query_as::<_, ShortUrlRow>(&query)
            .bind(identifier.short_code())
            .bind(identifier.domain())
            .fetch_optional(self.pool.as_ref())
            .await?;

        self.with_rules(row).await
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<ShortUrl>, AppError> {
        let query = format!(
            r#"
            SELECT {SHORT_URL_COLUMNS}
            FROM short_urls s
            LEFT JOIN domains d ON d.id = s.domain_id
            WHERE s.id = $1
            "#
        );

        let row = sqlx::query_as::<_, ShortUrlRow>(&query)
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        self.with_rules(row).await
    }

    async fn save_rules(&self, short_url_id: i64, rules: Vec<RedirectRule>) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let exists = sqlx::query_scalar::<_, i64>("SELECT id FROM short_urls WHERE id = $1 FOR UPDATE")
            .bind(short_url_id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(AppError::not_found(
                "Short URL not found",
                json!({ "short_url_id": short_url_id }),
            ));
        }

        sqlx::query(
            r#"
            DELETE FROM redirect_conditions
            WHERE rule_id IN (SELECT id FROM redirect_rules WHERE short_url_id = $1)
            "#,
        )
        .bind(short_url_id)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM redirect_rules WHERE short_url_id = $1")
            .bind(short_url_id)
            .execute(&mut *tx)
            .await?;

        for rule in &rules {
            let rule_id = sqlx::query_scalar::<_, i64>(
                r#"
                INSERT INTO redirect_rules (short_url_id, priority, long_url)
                VALUES ($1, $2, $3)
                RETURNING id
                "#,
            )
            .bind(short_url_id)
            .bind(rule.priority() as i32)
            .bind(rule.long_url())
            .fetch_one(&mut *tx)
            .await?;

            for (position, condition) in rule.conditions().iter().enumerate() {
                let (match_key, match_value) = condition.to_parts();
                sqlx::query(
                    r#"
                    INSERT INTO redirect_conditions (rule_id, position, kind, match_key, match_value)
                    VALUES ($1, $2, $3, $4, $5)
                    "#,
                )
                .bind(rule_id)
                .bind(position as i32)
                .bind(condition.kind())
                .bind(match_key)
                .bind(match_value)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;
        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
