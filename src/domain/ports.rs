use crate::domain::model::{EmailMessage, SubmissionRecord};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Durable key-value persistence for submissions, keyed by `submission_id`.
pub trait SubmissionStore: Send + Sync {
    fn put(&self, record: &SubmissionRecord)
        -> impl std::future::Future<Output = Result<()>> + Send;
}

/// Send-and-acknowledge email transport. Returns the provider message id.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<String>;
}

/// Post-persistence stage. Runs only after the record is stored.
#[async_trait]
pub trait Notifier: Send + Sync {
    fn name(&self) -> &str;

    async fn notify(&self, record: &SubmissionRecord) -> Result<()>;
}
