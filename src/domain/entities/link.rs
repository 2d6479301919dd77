//! Link entity representing a short code mapped to its target.

use chrono::{DateTime, Utc};

/// A short link with its click accounting.
///
/// `code` and `target` never change after creation. `clicks` and
/// `last_clicked` are only modified by the store's atomic increment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub target: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a link that has never been clicked.
    pub fn new(code: String, target: String, created_at: DateTime<Utc>) -> Self {
        Self {
            code,
            target,
            clicks: 0,
            last_clicked: None,
            created_at,
        }
    }

    /// Returns true once the link has been followed at least once.
    pub fn was_clicked(&self) -> bool {
        self.last_clicked.is_some()
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub code: String,
    pub target: String,
}
