//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Default upper bound on a single store call.
pub const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_secs(5);

/// Row shape shared by every query that returns a whole link.
#[derive(Debug, sqlx::FromRow)]
struct LinkRow {
    code: String,
    target: String,
    clicks: i64,
    last_clicked: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Self {
            code: row.code,
            target: row.target,
            clicks: row.clicks,
            last_clicked: row.last_clicked,
            created_at: row.created_at,
        }
    }
}

/// PostgreSQL repository for link storage and click accounting.
///
/// Uses parameterized statements only. Every call is bounded by
/// `query_timeout`; exceeding it yields [`AppError::StoreTimeout`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    query_timeout: Duration,
}

impl PgLinkRepository {
    /// Creates a new repository with the default query timeout.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self::with_timeout(pool, DEFAULT_QUERY_TIMEOUT)
    }

    /// Creates a new repository with an explicit query timeout.
    pub fn with_timeout(pool: Arc<PgPool>, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    async fn bounded<T, F>(&self, query: F) -> Result<T, AppError>
    where
        F: Future<Output = Result<T, sqlx::Error>> + Send,
    {
        match tokio::time::timeout(self.query_timeout, query).await {
            Ok(result) => result.map_err(AppError::from),
            Err(_) => Err(AppError::StoreTimeout),
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        self.bounded(
            sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM links WHERE code = $1)")
                .bind(code)
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, LinkRow>(
                    r#"
                INSERT INTO links (code, target_url)
                VALUES ($1, $2)
                RETURNING code, target_url AS target, clicks, last_clicked, created_at
                "#,
                )
                .bind(&new_link.code)
                .bind(&new_link.target)
                .fetch_one(self.pool.as_ref()),
            )
            .await?;

        Ok(row.into())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        let row = self
            .bounded(
                sqlx::query_as::<_, LinkRow>(
                    r#"
                SELECT code, target_url AS target, clicks, last_clicked, created_at
                FROM links
                WHERE code = $1
                "#,
                )
                .bind(code)
                .fetch_optional(self.pool.as_ref()),
            )
            .await?;

        Ok(row.map(Link::from))
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let rows = self
            .bounded(
                sqlx::query_as::<_, LinkRow>(
                    r#"
                SELECT code, target_url AS target, clicks, last_clicked, created_at
                FROM links
                ORDER BY created_at DESC
                "#,
                )
                .fetch_all(self.pool.as_ref()),
            )
            .await?;

        Ok(rows.into_iter().map(Link::from).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = self
            .bounded(
                sqlx::query("DELETE FROM links WHERE code = $1")
                    .bind(code)
                    .execute(self.pool.as_ref()),
            )
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn record_click(&self, code: &str) -> Result<Option<String>, AppError> {
        // Single statement: the row lock serializes concurrent increments.
        self.bounded(
            sqlx::query_scalar::<_, String>(
                r#"
            UPDATE links
            SET clicks = clicks + 1, last_clicked = NOW()
            WHERE code = $1
            RETURNING target_url
            "#,
            )
            .bind(code)
            .fetch_optional(self.pool.as_ref()),
        )
        .await
    }

    async fn count_links(&self) -> Result<i64, AppError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM links")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        self.bounded(
            sqlx::query_scalar::<_, i64>("SELECT COALESCE(SUM(clicks), 0)::BIGINT FROM links")
                .fetch_one(self.pool.as_ref()),
        )
        .await
    }
}
