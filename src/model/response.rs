use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Envelope returned by every Scrappey command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApiResponse {
    /// `"success"` or `"error"`.
    pub data: Option<String>,
    pub solution: Option<Solution>,
    pub time_elapsed: Option<f64>,
    pub session: Option<String>,
    pub error: Option<String>,
    pub info: Option<String>,
}

impl ApiResponse {
    pub fn is_error(&self) -> bool {
        self.data.as_deref() == Some("error")
    }
}

/// Result payload of a request or browser command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Solution {
    pub verified: Option<bool>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub response: Option<Value>,
    pub status_code: Option<u16>,
    pub current_url: Option<String>,
    pub user_agent: Option<String>,
    pub cookies: Option<Vec<CookieObject>>,
    pub cookie_string: Option<String>,
    pub response_headers: Option<Map<String, Value>>,
    pub request_headers: Option<Map<String, Value>>,
    pub inner_text: Option<String>,
    pub screenshot: Option<String>,
    pub screenshot_url: Option<String>,
    pub video_url: Option<String>,
    /// Keys this crate does not model.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CookieObject {
    pub name: String,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub http_only: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secure: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub same_site: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionListResponse {
    pub sessions: Vec<SessionEntry>,
    pub open: Option<u64>,
    pub limit: Option<u64>,
    pub time_elapsed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionEntry {
    pub session: String,
    pub last_accessed: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionActiveResponse {
    pub active: bool,
}
