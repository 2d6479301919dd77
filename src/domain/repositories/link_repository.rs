//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for short links.
///
/// Every method is a single round trip to the store. Implementations hold
/// no per-code state: uniqueness and click counting are guaranteed by the
/// store itself.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Returns true if a link with this code exists.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::StoreTimeout`] or [`AppError::Store`] on store failures.
    async fn exists(&self, code: &str) -> Result<bool, AppError>;

    /// Inserts a new link with `clicks = 0` and `created_at = now()`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::CodeConflict`] if the code is already taken. This is
    /// reported by the store's unique key, so it holds even when a prior
    /// [`Self::exists`] check said the code was free.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its code.
    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError>;

    /// Lists every link, newest first.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Hard-deletes a link.
    ///
    /// Returns `Ok(true)` if a row was removed, `Ok(false)` if none matched.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Increments `clicks`, sets `last_clicked = now()` and returns the target,
    /// as one atomic store operation.
    ///
    /// Returns `Ok(None)` if no link has this code.
    async fn record_click(&self, code: &str) -> Result<Option<String>, AppError>;

    /// Counts stored links.
    async fn count_links(&self) -> Result<i64, AppError>;

    /// Sums clicks over all links.
    async fn total_clicks(&self) -> Result<i64, AppError>;
}
