//! DTOs for link endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::application::services::CreatedLink;
use crate::domain::entities::Link;

/// Request body of `POST /api/links`.
///
/// Both fields are optional at the JSON level so a missing target is
/// reported as an invalid target rather than a parse failure.
#[derive(Debug, Default, Deserialize)]
pub struct CreateLinkRequest {
    #[serde(default)]
    pub target: Option<String>,

    /// Optional custom code; an empty string means "generate one".
    #[serde(default)]
    pub code: Option<String>,
}

/// Response body of a successful creation.
#[derive(Debug, Serialize)]
pub struct CreateLinkResponse {
    pub code: String,
    #[serde(rename = "shortUrl")]
    pub short_url: String,
    pub target: String,
}

impl From<CreatedLink> for CreateLinkResponse {
    fn from(created: CreatedLink) -> Self {
        Self {
            code: created.code,
            short_url: created.short_url,
            target: created.target,
        }
    }
}

/// Full link record as returned by the list and stats endpoints.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub code: String,
    pub target: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        Self {
            code: link.code,
            target: link.target,
            clicks: link.clicks,
            last_clicked: link.last_clicked,
            created_at: link.created_at,
        }
    }
}
