//! HTTP wire types shared by the daemon and the CLI client.

use serde::{Deserialize, Serialize};

/// Body of `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRequest {
    pub text: String,
    #[serde(default)]
    pub author: String,
    #[serde(default)]
    pub url: String,
}

/// Success body of `POST /process`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub status: String,
    pub category: String,
    pub summary: String,
    pub tab: String,
}

/// Error body for all non-200 responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

/// Body of `GET /v1/health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub sheets_connected: bool,
}
