use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionStatus {
    Active,
    Closed,
    Error,
}

impl SessionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionStatus::Active => "active",
            SessionStatus::Closed => "closed",
            SessionStatus::Error => "error",
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenConfig {
    pub width: u32,
    pub height: u32,
}

/// Profile to load into a new session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionProfile {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_changes: Option<bool>,
}

/// Browser session options.
///
/// Common options are typed; anything else the API accepts can be passed
/// through `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_stealth: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub use_proxy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub solve_captchas: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adblock: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accept_cookies: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen: Option<ScreenConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<SessionProfile>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension_ids: Option<Vec<String>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    #[serde(default)]
    pub team_id: Option<String>,
    pub status: SessionStatus,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub end_time: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub session_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDetail {
    #[serde(flatten)]
    pub session: Session,
    #[serde(default)]
    pub ws_endpoint: Option<String>,
    #[serde(default)]
    pub live_url: Option<String>,
    /// Absolute URL accepting computer actions for this session.
    #[serde(default)]
    pub computer_action_endpoint: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionListParams {
    pub status: Option<SessionStatus>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionListResponse {
    #[serde(default)]
    pub sessions: Vec<Session>,
    #[serde(default)]
    pub total_count: u64,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub per_page: u32,
}

/// One rrweb event of a session recording.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionRecording {
    #[serde(rename = "type")]
    pub event_type: u32,
    pub data: Value,
    pub timestamp: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecordingUrl {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub recording_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionDownloadsUrl {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub downloads_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Profile update for a running session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionProfileParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist_changes: Option<bool>,
}

/// Wire body of `PUT /session/{id}/update`.
#[derive(Debug, Serialize)]
#[serde(tag = "type", content = "params", rename_all = "lowercase")]
pub(crate) enum SessionUpdate<'a> {
    Profile(&'a UpdateSessionProfileParams),
}
