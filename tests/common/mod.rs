#![allow(dead_code)]

use async_trait::async_trait;
use axum_test::TestServer;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tinylink::domain::entities::{Link, NewLink};
use tinylink::domain::repositories::LinkRepository;
use tinylink::error::AppError;
use tinylink::routes;
use tinylink::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";

/// Link store kept in process memory.
///
/// Every method takes the lock once, so `create` and `record_click` are
/// atomic the same way the single SQL statements are.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    inner: Mutex<Store>,
}

#[derive(Default)]
struct Store {
    links: HashMap<String, (u64, Link)>,
    next_seq: u64,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link directly, bypassing validation.
    pub fn insert(&self, code: &str, target: &str) {
        let mut store = self.inner.lock().unwrap();
        store.next_seq += 1;
        let seq = store.next_seq;
        store.links.insert(
            code.to_string(),
            (
                seq,
                Link::new(code.to_string(), target.to_string(), Utc::now()),
            ),
        );
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        let store = self.inner.lock().unwrap();
        store.links.get(code).map(|(_, link)| link.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().links.len()
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn exists(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().links.contains_key(code))
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut store = self.inner.lock().unwrap();
        if store.links.contains_key(&new_link.code) {
            return Err(AppError::code_taken());
        }

        store.next_seq += 1;
        let seq = store.next_seq;
        let link = Link::new(new_link.code.clone(), new_link.target, Utc::now());
        store.links.insert(new_link.code, (seq, link.clone()));

        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.get(code))
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let store = self.inner.lock().unwrap();
        let mut entries: Vec<_> = store.links.values().cloned().collect();
        entries.sort_by(|(a, _), (b, _)| b.cmp(a));

        Ok(entries.into_iter().map(|(_, link)| link).collect())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.inner.lock().unwrap().links.remove(code).is_some())
    }

    async fn record_click(&self, code: &str) -> Result<Option<String>, AppError> {
        let mut store = self.inner.lock().unwrap();

        Ok(store.links.get_mut(code).map(|(_, link)| {
            link.clicks += 1;
            link.last_clicked = Some(Utc::now());
            link.target.clone()
        }))
    }

    async fn count_links(&self) -> Result<i64, AppError> {
        Ok(self.inner.lock().unwrap().links.len() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        let store = self.inner.lock().unwrap();
        Ok(store.links.values().map(|(_, link)| link.clicks).sum())
    }
}

pub fn create_test_state(repo: Arc<InMemoryLinkRepository>) -> AppState {
    AppState::new(repo, BASE_URL)
}

/// Full application router over a fresh in-memory store.
pub fn make_server() -> (TestServer, Arc<InMemoryLinkRepository>) {
    let repo = Arc::new(InMemoryLinkRepository::new());
    let server = make_server_with(repo.clone());

    (server, repo)
}

pub fn make_server_with(repo: Arc<InMemoryLinkRepository>) -> TestServer {
    let app = routes::router(create_test_state(repo), "public");
    TestServer::new(app).unwrap()
}
