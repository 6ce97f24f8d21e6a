use crate::core::response;
use crate::core::submission::{build_record, parse_request};
use crate::domain::model::{HttpRequest, HttpResponse, SubmissionRecord};
use crate::domain::ports::{Notifier, SubmissionStore};
use crate::utils::error::{IntakeError, Result};
use chrono::Utc;
use std::str::FromStr;
use std::sync::Arc;

/// What a notifier failure means once the record is already stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NotificationPolicy {
    /// Any failed notification turns the response into a 500.
    #[default]
    Required,
    /// Failures are logged and the submission still succeeds.
    BestEffort,
}

impl FromStr for NotificationPolicy {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "required" => Ok(NotificationPolicy::Required),
            "best_effort" | "best-effort" => Ok(NotificationPolicy::BestEffort),
            other => Err(IntakeError::InvalidConfigValueError {
                field: "notification_policy".to_string(),
                value: other.to_string(),
                reason: "Expected 'required' or 'best_effort'".to_string(),
            }),
        }
    }
}

pub struct SubmissionHandler<S: SubmissionStore> {
    store: S,
    notifiers: Vec<Arc<dyn Notifier>>,
    policy: NotificationPolicy,
}

impl<S: SubmissionStore> SubmissionHandler<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            notifiers: Vec::new(),
            policy: NotificationPolicy::default(),
        }
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifiers.push(notifier);
        self
    }

    pub fn with_policy(mut self, policy: NotificationPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }

    /// Handle one request. Every failure is mapped into a response.
    pub async fn handle(&self, request: HttpRequest) -> HttpResponse {
        tracing::info!(
            method = %request.method,
            body_bytes = request.body.as_ref().map_or(0, |b| b.len()),
            "Received contact form request"
        );

        if request.method.eq_ignore_ascii_case("OPTIONS") {
            return response::preflight();
        }

        match self.process(request).await {
            Ok(record) => {
                tracing::info!(
                    submission_id = %record.submission_id,
                    "Form submission processed successfully"
                );
                response::success(&record.submission_id)
            }
            Err(e) if e.is_client_error() => {
                tracing::debug!(code = e.code(), "Rejected submission: {}", e);
                response::error(&e)
            }
            Err(e) => {
                tracing::error!(error = %e, "Error processing form submission");
                response::error(&e)
            }
        }
    }

    /// Parse, validate, persist, notify. Stops at the first failing stage.
    pub async fn process(&self, request: HttpRequest) -> Result<SubmissionRecord> {
        if !request.method.eq_ignore_ascii_case("POST") {
            return Err(IntakeError::MethodNotAllowed {
                method: request.method,
            });
        }

        // Parse
        let submission = parse_request(request.body.as_deref())?;

        // Validate and stamp
        let record = build_record(&submission, Utc::now())?;

        // Persist before anyone is told about it
        self.store.put(&record).await?;
        tracing::debug!(submission_id = %record.submission_id, "Submission stored");

        // Notify
        self.notify(&record).await?;
        Ok(record)
    }

    async fn notify(&self, record: &SubmissionRecord) -> Result<()> {
        if self.notifiers.is_empty() {
            return Ok(());
        }

        // All notifiers run at once; wait for every one, even after a failure
        let results =
            futures::future::join_all(self.notifiers.iter().map(|n| n.notify(record))).await;

        let mut failures = Vec::new();
        for (notifier, result) in self.notifiers.iter().zip(results) {
            if let Err(e) = result {
                failures.push(format!("{}: {}", notifier.name(), e));
            }
        }

        if failures.is_empty() {
            return Ok(());
        }

        let message = failures.join("; ");
        match self.policy {
            NotificationPolicy::Required => Err(IntakeError::NotificationError { message }),
            NotificationPolicy::BestEffort => {
                tracing::warn!(
                    submission_id = %record.submission_id,
                    "Submission stored but notification failed: {}",
                    message
                );
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    #[derive(Clone, Default)]
    struct MockStore {
        items: Arc<Mutex<Vec<SubmissionRecord>>>,
    }

    impl SubmissionStore for MockStore {
        async fn put(&self, record: &SubmissionRecord) -> Result<()> {
            self.items.lock().await.push(record.clone());
            Ok(())
        }
    }

    struct CountingNotifier {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl Notifier for CountingNotifier {
        fn name(&self) -> &str {
            "counting"
        }

        async fn notify(&self, _record: &SubmissionRecord) -> Result<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(IntakeError::NotificationError {
                    message: "down".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    const VALID: &str = r#"{"name":"Ana","email":"ana@example.com","message":"Hi"}"#;

    #[test]
    fn test_notification_policy_from_str() {
        assert_eq!("required".parse::<NotificationPolicy>().unwrap(), NotificationPolicy::Required);
        assert_eq!(
            "Best_Effort".parse::<NotificationPolicy>().unwrap(),
            NotificationPolicy::BestEffort
        );
        assert!("sometimes".parse::<NotificationPolicy>().is_err());
    }

    #[tokio::test]
    async fn test_unknown_method_rejected() {
        let store = MockStore::default();
        let handler = SubmissionHandler::new(store.clone());

        let response = handler
            .handle(HttpRequest {
                method: "GET".to_string(),
                body: None,
            })
            .await;

        assert_eq!(response.status_code, 405);
        assert_eq!(response.json_body().unwrap()["error"], "method_not_allowed");
        assert!(store.items.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_lowercase_methods_accepted() {
        let handler = SubmissionHandler::new(MockStore::default());

        let preflight = handler
            .handle(HttpRequest {
                method: "options".to_string(),
                body: None,
            })
            .await;
        assert_eq!(preflight.status_code, 200);
        assert!(preflight.body.is_empty());

        let post = handler
            .handle(HttpRequest {
                method: "post".to_string(),
                body: Some(VALID.to_string()),
            })
            .await;
        assert_eq!(post.status_code, 200);
    }

    #[tokio::test]
    async fn test_all_notifiers_awaited_on_failure() {
        let ok = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let failing = Arc::new(CountingNotifier {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let handler = SubmissionHandler::new(MockStore::default())
            .with_notifier(failing.clone())
            .with_notifier(ok.clone());

        let err = handler.process(HttpRequest::post(VALID)).await.unwrap_err();

        assert!(matches!(err, IntakeError::NotificationError { .. }));
        assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
        assert_eq!(ok.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_best_effort_policy_succeeds() {
        let store = MockStore::default();
        let handler = SubmissionHandler::new(store.clone())
            .with_notifier(Arc::new(CountingNotifier {
                calls: AtomicUsize::new(0),
                fail: true,
            }))
            .with_policy(NotificationPolicy::BestEffort);

        let response = handler.handle(HttpRequest::post(VALID)).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(store.items.lock().await.len(), 1);
    }
}
