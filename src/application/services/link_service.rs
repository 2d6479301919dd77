//! Link creation, lookup, deletion and redirect resolution.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::{
    ATTEMPTS_PER_LENGTH, MAX_CODE_LEN, MIN_CODE_LEN, generate_code, is_reserved, is_valid_code,
};
use crate::utils::target_url::validate_target;

/// Result of a successful link creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLink {
    pub code: String,
    pub short_url: String,
    pub target: String,
}

/// Service mediating every store access for short links.
///
/// All input rules are enforced here before the store is touched. The
/// service keeps no mutable state: uniqueness comes from the store's unique
/// key and click counts from its atomic increment, so concurrent requests
/// never need to coordinate in-process.
pub struct LinkService<L: LinkRepository + ?Sized> {
    link_repository: Arc<L>,
    base_url: String,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    /// Creates a new link service.
    ///
    /// `base_url` is the short URL prefix; a trailing `/` is ignored.
    pub fn new(link_repository: Arc<L>, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();

        Self {
            link_repository,
            base_url,
        }
    }

    /// Creates a short link.
    ///
    /// # Code selection
    ///
    /// - With a custom code: the code must match `[A-Za-z0-9]{6,8}`. A
    ///   pre-check returns a conflict early in the common case; the insert
    ///   itself is the real guarantee, and a uniqueness violation there is
    ///   reported as the same conflict.
    /// - Without one: a random code is allocated via [`Self::allocate_unique_code`].
    ///   If another request inserts the same code first, the request fails
    ///   with [`AppError::AllocationExhausted`].
    ///
    /// An empty custom code counts as absent.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidTarget`] if the target is not an absolute `http`/`https` URL
    /// - [`AppError::InvalidCodeFormat`] if the custom code is malformed
    /// - [`AppError::CodeConflict`] if the custom code is taken or reserved
    /// - [`AppError::AllocationExhausted`] if no random code could be found
    /// - [`AppError::StoreTimeout`] / [`AppError::Store`] on store failures
    pub async fn create_link(
        &self,
        target: &str,
        custom_code: Option<String>,
    ) -> Result<CreatedLink, AppError> {
        let target = validate_target(target).map_err(|e| {
            tracing::debug!(reason = %e, "Rejected target URL");
            AppError::InvalidTarget
        })?;

        let link = match custom_code.filter(|c| !c.is_empty()) {
            Some(custom) => {
                if !is_valid_code(&custom) {
                    return Err(AppError::invalid_custom_code());
                }

                if is_reserved(&custom) {
                    return Err(AppError::code_reserved());
                }

                if self.link_repository.exists(&custom).await? {
                    return Err(AppError::code_taken());
                }

                self.link_repository
                    .create(NewLink {
                        code: custom,
                        target,
                    })
                    .await?
            }
            None => {
                let code = self.allocate_unique_code().await?;

                match self.link_repository.create(NewLink { code, target }).await {
                    Err(AppError::CodeConflict { .. }) => {
                        tracing::warn!("Allocated code was taken before insert");
                        return Err(AppError::AllocationExhausted);
                    }
                    result => result?,
                }
            }
        };

        tracing::info!(code = %link.code, "Link created");

        Ok(CreatedLink {
            short_url: self.short_url(&link.code),
            code: link.code,
            target: link.target,
        })
    }

    /// Lists every link, newest first.
    ///
    /// Not paginated.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.link_repository.list().await
    }

    /// Returns every attribute of a link.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidCodeFormat`] if the code is malformed (no store access)
    /// - [`AppError::NotFound`] if no link has this code
    pub async fn get_link_stats(&self, code: &str) -> Result<Link, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::invalid_code());
        }

        self.link_repository
            .find_by_code(code)
            .await?
            .ok_or(AppError::NotFound)
    }

    /// Hard-deletes a link.
    ///
    /// Deleting the same code twice reports [`AppError::NotFound`] the second time.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidCodeFormat`] if the code is malformed (no store access)
    /// - [`AppError::NotFound`] if no row was removed
    pub async fn delete_link(&self, code: &str) -> Result<(), AppError> {
        if !is_valid_code(code) {
            return Err(AppError::invalid_code());
        }

        if !self.link_repository.delete(code).await? {
            return Err(AppError::NotFound);
        }

        tracing::info!(code, "Link deleted");

        Ok(())
    }

    /// Counts a click and returns the target to redirect to.
    ///
    /// The increment, the `last_clicked` update and the target read happen in
    /// one store operation, so concurrent redirects never lose a count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown codes **and** for malformed
    /// ones; callers cannot tell the two apart.
    pub async fn resolve_and_count(&self, code: &str) -> Result<String, AppError> {
        if !is_valid_code(code) {
            return Err(AppError::NotFound);
        }

        let target = self
            .link_repository
            .record_click(code)
            .await?
            .ok_or(AppError::NotFound)?;

        tracing::debug!(code, "Redirect resolved");

        Ok(target)
    }

    /// Builds the public short URL for a code: `BASE_URL/code`.
    pub fn short_url(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Finds an unused random code.
    ///
    /// Tries lengths [`MIN_CODE_LEN`] through [`MAX_CODE_LEN`], with
    /// [`ATTEMPTS_PER_LENGTH`] draws each, and stops at the first free code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] when every draw collided.
    async fn allocate_unique_code(&self) -> Result<String, AppError> {
        for length in MIN_CODE_LEN..=MAX_CODE_LEN {
            for _ in 0..ATTEMPTS_PER_LENGTH {
                let code = generate_code(length);

                if is_reserved(&code) {
                    continue;
                }

                if !self.link_repository.exists(&code).await? {
                    return Ok(code);
                }
            }

            tracing::warn!(length, "All random codes of this length collided");
        }

        Err(AppError::AllocationExhausted)
    }
}
