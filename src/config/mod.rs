#[cfg(feature = "cli")]
pub mod cli;
#[cfg(feature = "lambda")]
pub mod lambda;

use crate::core::email::EmailSettings;
use crate::core::handler::NotificationPolicy;
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use std::env;

pub const DEFAULT_BRAND_NAME: &str = "HanadeTravelEase";

/// Deployment configuration, read once at cold start.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub table_name: Option<String>,
    pub sender_address: Option<String>,
    pub business_address: Option<String>,
    pub notifications_enabled: bool,
    pub notification_policy: NotificationPolicy,
    pub brand_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let notifications_enabled = match get("NOTIFICATIONS_ENABLED") {
            Some(v) => parse_bool("notifications_enabled", &v)?,
            None => true,
        };

        Ok(Self {
            table_name: get("TABLE_NAME"),
            sender_address: get("SENDER_EMAIL"),
            business_address: get("BUSINESS_EMAIL"),
            notifications_enabled,
            notification_policy: get("NOTIFY_FAILURE_POLICY")
                .map(|v| v.parse())
                .transpose()?
                .unwrap_or_default(),
            brand_name: get("BRAND_NAME").unwrap_or_else(|| DEFAULT_BRAND_NAME.to_string()),
        })
    }

    /// Read and validate, failing fast on anything missing.
    pub fn load() -> Result<Self> {
        let config = Self::from_env()?;
        config.validate()?;
        Ok(config)
    }

    pub fn email_settings(&self) -> Option<EmailSettings> {
        if !self.notifications_enabled {
            return None;
        }
        Some(EmailSettings {
            sender_address: self.sender_address.clone()?,
            business_address: self.business_address.clone()?,
            brand_name: self.brand_name.clone(),
        })
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        // The table is required even for a store-only deployment
        let table = validation::validate_required_field("table_name", &self.table_name)?;
        validation::validate_table_name("table_name", table)?;

        // Sender and business addresses only matter once email is attached
        if self.notifications_enabled {
            let sender =
                validation::validate_required_field("sender_address", &self.sender_address)?;
            validation::validate_email_address("sender_address", sender)?;

            let business =
                validation::validate_required_field("business_address", &self.business_address)?;
            validation::validate_email_address("business_address", business)?;

            validation::validate_non_empty_string("brand_name", &self.brand_name)?;
        }

        tracing::info!("✅ Configuration validation passed");
        Ok(())
    }
}

fn parse_bool(field: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(IntakeError::InvalidConfigValueError {
            field: field.to_string(),
            value: other.to_string(),
            reason: "Expected a boolean".to_string(),
        }),
    }
}
