//! Shared application state injected into every handler.

use std::sync::Arc;

use crate::application::services::LinkService;
use crate::domain::repositories::LinkRepository;

/// Link service over any repository implementation.
pub type SharedLinkService = LinkService<dyn LinkRepository>;

/// Handler state.
///
/// Only holds handles to stateless services; all link data lives in the store.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<SharedLinkService>,
}

impl AppState {
    /// Builds state around a repository and the short URL prefix.
    pub fn new(link_repository: Arc<dyn LinkRepository>, base_url: impl Into<String>) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(link_repository, base_url)),
        }
    }
}
