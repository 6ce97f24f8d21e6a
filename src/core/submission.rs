use crate::domain::model::{
    SubmissionRecord, SubmissionRequest, DESTINATION_NOT_SPECIFIED, PHONE_NOT_PROVIDED,
    STATUS_PROCESSED,
};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{non_blank, validate_required_fields, validate_submission_email};
use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;

const ID_SUFFIX_LEN: usize = 9;
const BASE36: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Parse the raw body into a request. Anything that is not a JSON object is rejected.
pub fn parse_request(body: Option<&str>) -> Result<SubmissionRequest> {
    let body = body.ok_or_else(|| IntakeError::InvalidJson {
        reason: "request body is empty".to_string(),
    })?;

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| IntakeError::InvalidJson {
            reason: e.to_string(),
        })?;

    match value {
        serde_json::Value::Object(object) => Ok(SubmissionRequest::from_object(&object)),
        other => Err(IntakeError::InvalidJson {
            reason: format!("expected a JSON object, got {}", json_kind(&other)),
        }),
    }
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Milliseconds since the epoch followed by a random base-36 suffix.
pub fn generate_submission_id(now: DateTime<Utc>) -> String {
    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| BASE36[rng.gen_range(0..BASE36.len())] as char)
        .collect();
    format!("{}{}", now.timestamp_millis(), suffix)
}

/// Validate the request and derive the record stamped at `now`.
pub fn build_record(request: &SubmissionRequest, now: DateTime<Utc>) -> Result<SubmissionRecord> {
    let (name, email, message) = validate_required_fields(request)?;

    // Shape check runs on the raw value, so surrounding whitespace is rejected too
    validate_submission_email(request.email.as_deref().unwrap_or_default())?;

    Ok(SubmissionRecord {
        submission_id: generate_submission_id(now),
        timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        name: name.to_string(),
        email: email.to_string(),
        phone: non_blank(request.phone.as_deref())
            .unwrap_or(PHONE_NOT_PROVIDED)
            .to_string(),
        destination: non_blank(request.destination.as_deref())
            .unwrap_or(DESTINATION_NOT_SPECIFIED)
            .to_string(),
        message: message.to_string(),
        status: STATUS_PROCESSED.to_string(),
    })
}
