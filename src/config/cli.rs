use crate::config::DEFAULT_BRAND_NAME;
use crate::core::email::EmailSettings;
use crate::core::handler::NotificationPolicy;
use crate::core::{EmailMessage, Mailer, SubmissionRecord, SubmissionStore};
use crate::utils::error::{IntakeError, Result};
use crate::utils::validation::{self, Validate};
use async_trait::async_trait;
use clap::Parser;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Parser)]
#[command(name = "contact-intake")]
#[command(about = "Run a contact form submission through the intake pipeline locally")]
pub struct CliConfig {
    /// JSON payload file, or `-` for stdin
    #[arg(long, default_value = "-")]
    pub input: String,

    #[arg(long, default_value = "./submissions")]
    pub store_dir: String,

    #[arg(long, default_value = "./outbox")]
    pub outbox_dir: String,

    #[arg(long, default_value = "noreply@travelease.local")]
    pub sender: String,

    #[arg(long, default_value = "bookings@travelease.local")]
    pub business: String,

    #[arg(long, default_value = DEFAULT_BRAND_NAME)]
    pub brand: String,

    #[arg(long, help = "Store the submission without sending email")]
    pub no_notify: bool,

    #[arg(long, help = "Report success even if email fails")]
    pub best_effort: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn email_settings(&self) -> Option<EmailSettings> {
        if self.no_notify {
            return None;
        }
        Some(EmailSettings {
            sender_address: self.sender.clone(),
            business_address: self.business.clone(),
            brand_name: self.brand.clone(),
        })
    }

    pub fn notification_policy(&self) -> NotificationPolicy {
        if self.best_effort {
            NotificationPolicy::BestEffort
        } else {
            NotificationPolicy::Required
        }
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("input", &self.input)?;
        validation::validate_non_empty_string("store_dir", &self.store_dir)?;
        if !self.no_notify {
            validation::validate_non_empty_string("outbox_dir", &self.outbox_dir)?;
            validation::validate_email_address("sender", &self.sender)?;
            validation::validate_email_address("business", &self.business)?;
            validation::validate_non_empty_string("brand", &self.brand)?;
        }
        Ok(())
    }
}

/// One pretty-printed JSON file per submission, named after its id.
#[derive(Debug, Clone)]
pub struct FileStore {
    base_path: PathBuf,
}

impl FileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn path_for(&self, submission_id: &str) -> PathBuf {
        self.base_path.join(format!("{}.json", submission_id))
    }

    pub fn read(&self, submission_id: &str) -> Result<SubmissionRecord> {
        let data = fs::read(self.path_for(submission_id))?;
        Ok(serde_json::from_slice(&data)?)
    }
}

impl SubmissionStore for FileStore {
    async fn put(&self, record: &SubmissionRecord) -> Result<()> {
        let full_path = self.path_for(&record.submission_id);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).map_err(store_error)?;
        }

        let data = serde_json::to_vec_pretty(record)?;
        fs::write(&full_path, data).map_err(store_error)?;
        tracing::debug!("Wrote submission to {}", full_path.display());
        Ok(())
    }
}

fn store_error(e: std::io::Error) -> IntakeError {
    IntakeError::StoreError {
        message: e.to_string(),
    }
}

/// Writes outgoing email to a directory instead of delivering it.
#[derive(Debug)]
pub struct OutboxMailer {
    outbox_dir: PathBuf,
    sequence: AtomicUsize,
}

impl OutboxMailer {
    pub fn new(outbox_dir: impl Into<PathBuf>) -> Self {
        Self {
            outbox_dir: outbox_dir.into(),
            sequence: AtomicUsize::new(0),
        }
    }

    pub fn outbox_dir(&self) -> &Path {
        &self.outbox_dir
    }
}

#[async_trait]
impl Mailer for OutboxMailer {
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        let seq = self.sequence.fetch_add(1, Ordering::SeqCst);
        let message_id = format!(
            "{}-{}",
            chrono::Utc::now().format("%Y%m%dT%H%M%S%3f"),
            seq
        );

        fs::create_dir_all(&self.outbox_dir).map_err(notification_error)?;
        let data = serde_json::to_vec_pretty(message)?;
        fs::write(self.outbox_dir.join(format!("{}.json", message_id)), data)
            .map_err(notification_error)?;

        tracing::debug!(
            "Queued email '{}' for {}",
            message.subject,
            message.recipients.join(", ")
        );
        Ok(message_id)
    }
}

fn notification_error(e: std::io::Error) -> IntakeError {
    IntakeError::NotificationError {
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            submission_id: "1741944413000k3j9x0qzp".to_string(),
            timestamp: "2025-03-14T09:26:53.000Z".to_string(),
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            phone: "Not provided".to_string(),
            destination: "Not specified".to_string(),
            message: "Hi".to_string(),
            status: "processed".to_string(),
        }
    }

    #[test]
    fn test_file_store_put_then_read() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path().join("nested"));

        tokio_test::block_on(store.put(&record())).unwrap();

        let stored = store.read("1741944413000k3j9x0qzp").unwrap();
        assert_eq!(stored, record());
    }

    #[tokio::test]
    async fn test_outbox_mailer_writes_each_message() {
        let temp_dir = TempDir::new().unwrap();
        let mailer = OutboxMailer::new(temp_dir.path());
        let message = EmailMessage {
            sender: "noreply@travelease.local".to_string(),
            recipients: vec!["ana@example.com".to_string()],
            subject: "Hello".to_string(),
            html_body: "<p>Hi</p>".to_string(),
            text_body: "Hi".to_string(),
        };

        let first = mailer.send(&message).await.unwrap();
        let second = mailer.send(&message).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(fs::read_dir(mailer.outbox_dir()).unwrap().count(), 2);
    }

    #[test]
    fn test_cli_config_parsing() {
        let config = CliConfig::parse_from([
            "contact-intake",
            "--input",
            "payload.json",
            "--no-notify",
        ]);
        assert_eq!(config.input, "payload.json");
        assert!(config.email_settings().is_none());
        assert_eq!(config.notification_policy(), NotificationPolicy::Required);
        assert!(config.validate().is_ok());

        let config = CliConfig::parse_from(["contact-intake", "--sender", "nobody"]);
        assert!(config.validate().is_err());
    }
}
