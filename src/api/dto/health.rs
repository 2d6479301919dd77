//! DTOs for the liveness endpoint.

use serde::Serialize;

/// Liveness response: `{"ok": true, "version": "..."}`.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub ok: bool,
    pub version: String,
}
