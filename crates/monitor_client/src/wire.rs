//! Server wire types. Field names are case-sensitive and must match the
//! crawl server's JSON exactly; do not rename without a server change.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Raw push payload from the `/messages/{token}` channel.
///
/// Every field is optional on the wire; validation happens in
/// [`crate::decode_event`], not here.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PushMessage {
    #[serde(rename = "ID", default)]
    pub id: i64,
    #[serde(rename = "URL", default)]
    pub url: String,
    /// 1 means the link fetch succeeded; error payloads omit it.
    #[serde(rename = "State", default)]
    pub state: i64,
    #[serde(rename = "HTTPStatus", default)]
    pub http_status: u16,
    #[serde(rename = "Error", default)]
    pub error: String,
    #[serde(rename = "ParentURL", default)]
    pub parent_url: String,
    #[serde(rename = "ProgressState", default)]
    pub progress_state: i64,
    #[serde(rename = "TotalLinks", default)]
    pub total_links: u64,
    #[serde(rename = "TotalErrors", default)]
    pub total_errors: u64,
    #[serde(rename = "URLs", default)]
    pub urls: Vec<String>,
}

/// Control payload for the `/cmd/{token}` channel.
#[derive(Debug, Clone, Serialize)]
pub struct CommandPayload {
    #[serde(rename = "Cmd")]
    pub cmd: String,
    #[serde(rename = "URLs")]
    pub urls: Vec<String>,
    #[serde(rename = "Depth")]
    pub depth: i32,
    #[serde(rename = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
}

/// Detail of one failed fetch, as listed in reports and per-job error
/// listings. The failing URL is the map key, not part of the value.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ErrorDetail {
    #[serde(rename = "HTTPStatus", default)]
    pub http_status: u16,
    #[serde(rename = "Error", default)]
    pub error: String,
    #[serde(rename = "ParentURL", default)]
    pub parent_url: String,
}

/// Immutable historical snapshot of a completed crawl.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Report {
    #[serde(rename = "TotalLinks", default)]
    pub total_links: u64,
    #[serde(rename = "Errors", default)]
    pub errors: BTreeMap<String, ErrorDetail>,
    #[serde(rename = "URLs", default)]
    pub urls: Vec<String>,
    /// Crawl duration in nanoseconds, when the server recorded it.
    #[serde(rename = "TimeElapsed", default)]
    pub time_elapsed: Option<i64>,
    #[serde(rename = "TimeFinished", default)]
    pub time_finished: Option<String>,
}
