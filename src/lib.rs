pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{CliConfig, FileStore, OutboxMailer};

#[cfg(feature = "lambda")]
pub use config::lambda::{ApiGatewayProxyRequest, DynamoStore, SesMailer};

pub use config::AppConfig;
pub use core::email::{EmailNotifier, EmailSettings};
pub use core::handler::{NotificationPolicy, SubmissionHandler};
pub use domain::model::{EmailMessage, HttpRequest, HttpResponse, SubmissionRecord, SubmissionRequest};
pub use domain::ports::{Mailer, Notifier, SubmissionStore};
pub use utils::error::{IntakeError, Result};
