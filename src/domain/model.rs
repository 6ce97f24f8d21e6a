use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const PHONE_NOT_PROVIDED: &str = "Not provided";
pub const DESTINATION_NOT_SPECIFIED: &str = "Not specified";
pub const STATUS_PROCESSED: &str = "processed";

/// Untrusted form payload. Fields that are absent or not JSON strings are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub message: Option<String>,
    pub phone: Option<String>,
    pub destination: Option<String>,
}

impl SubmissionRequest {
    pub fn from_object(object: &serde_json::Map<String, serde_json::Value>) -> Self {
        let field = |key: &str| {
            object
                .get(key)
                .and_then(|v| v.as_str())
                .map(str::to_string)
        };

        Self {
            name: field("name"),
            email: field("email"),
            message: field("message"),
            phone: field("phone"),
            destination: field("destination"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionRecord {
    pub submission_id: String,
    pub timestamp: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub destination: String,
    pub message: String,
    pub status: String,
}

impl SubmissionRecord {
    pub fn has_phone(&self) -> bool {
        self.phone != PHONE_NOT_PROVIDED
    }

    pub fn has_destination(&self) -> bool {
        self.destination != DESTINATION_NOT_SPECIFIED
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub html_body: String,
    pub text_body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: String,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn post(body: impl Into<String>) -> Self {
        Self {
            method: "POST".to_string(),
            body: Some(body.into()),
        }
    }

    pub fn options() -> Self {
        Self {
            method: "OPTIONS".to_string(),
            body: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl HttpResponse {
    pub fn json_body(&self) -> Option<serde_json::Value> {
        serde_json::from_str(&self.body).ok()
    }
}
