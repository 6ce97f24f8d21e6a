pub mod email;
pub mod handler;
pub mod response;
pub mod submission;

pub use crate::domain::model::{EmailMessage, HttpRequest, HttpResponse, SubmissionRecord};
pub use crate::domain::ports::{Mailer, Notifier, SubmissionStore};
pub use crate::utils::error::Result;
