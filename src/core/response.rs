use crate::domain::model::HttpResponse;
use crate::utils::error::IntakeError;
use serde_json::json;
use std::collections::BTreeMap;

pub const SUCCESS_MESSAGE: &str = "Form submitted successfully! Check your email for confirmation.";

pub fn cors_headers() -> BTreeMap<String, String> {
    [
        ("Access-Control-Allow-Origin", "*"),
        ("Access-Control-Allow-Methods", "POST, OPTIONS"),
        ("Access-Control-Allow-Headers", "Content-Type"),
        ("Content-Type", "application/json"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

pub fn preflight() -> HttpResponse {
    HttpResponse {
        status_code: 200,
        headers: cors_headers(),
        body: String::new(),
    }
}

pub fn success(submission_id: &str) -> HttpResponse {
    json_response(
        200,
        json!({
            "message": SUCCESS_MESSAGE,
            "submissionId": submission_id,
        }),
    )
}

pub fn error(err: &IntakeError) -> HttpResponse {
    json_response(
        err.status_code(),
        json!({
            "error": err.code(),
            "message": err.user_friendly_message(),
        }),
    )
}

fn json_response(status_code: u16, body: serde_json::Value) -> HttpResponse {
    HttpResponse {
        status_code,
        headers: cors_headers(),
        body: body.to_string(),
    }
}
