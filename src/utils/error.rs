use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntakeError {
    #[error("Invalid JSON in request body: {reason}")]
    InvalidJson { reason: String },

    #[error("Missing required fields: {}", fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("Invalid email format: {email}")]
    InvalidEmail { email: String },

    #[error("Method not allowed: {method}")]
    MethodNotAllowed { method: String },

    #[error("Store write failed: {message}")]
    StoreError { message: String },

    #[error("Notification failed: {message}")]
    NotificationError { message: String },

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid configuration value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

impl IntakeError {
    /// Machine-readable code placed in the `error` field of the response body.
    pub fn code(&self) -> &'static str {
        match self {
            IntakeError::InvalidJson { .. } => "invalid_json",
            IntakeError::MissingFields { .. } => "missing_fields",
            IntakeError::InvalidEmail { .. } => "invalid_email",
            IntakeError::MethodNotAllowed { .. } => "method_not_allowed",
            _ => "internal_error",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            IntakeError::InvalidJson { .. }
            | IntakeError::MissingFields { .. }
            | IntakeError::InvalidEmail { .. } => 400,
            IntakeError::MethodNotAllowed { .. } => 405,
            _ => 500,
        }
    }

    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Caller-facing text. Internal failures never leak downstream detail.
    pub fn user_friendly_message(&self) -> String {
        match self {
            IntakeError::InvalidJson { .. } => {
                "Please check your form data and try again.".to_string()
            }
            IntakeError::MissingFields { .. } => {
                "Name, email, and message are required.".to_string()
            }
            IntakeError::InvalidEmail { .. } => {
                "Please provide a valid email address.".to_string()
            }
            IntakeError::MethodNotAllowed { .. } => {
                "Only POST and OPTIONS requests are supported.".to_string()
            }
            _ => "Sorry, there was an error processing your submission. Please try again later."
                .to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IntakeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_codes() {
        let err = IntakeError::MissingFields {
            fields: vec!["name", "email"],
        };
        assert_eq!(err.code(), "missing_fields");
        assert_eq!(err.status_code(), 400);
        assert!(err.is_client_error());
        assert_eq!(err.to_string(), "Missing required fields: name, email");
    }

    #[test]
    fn test_internal_errors_hide_detail() {
        let err = IntakeError::StoreError {
            message: "ResourceNotFoundException: table contact-submissions".to_string(),
        };
        assert_eq!(err.code(), "internal_error");
        assert_eq!(err.status_code(), 500);
        assert!(!err.is_client_error());
        assert!(!err.user_friendly_message().contains("ResourceNotFound"));
    }
}
