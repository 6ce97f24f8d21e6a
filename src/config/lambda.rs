use crate::core::{EmailMessage, HttpRequest, Mailer, SubmissionRecord, SubmissionStore};
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use aws_sdk_dynamodb::error::ProvideErrorMetadata;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client as DynamoClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use aws_sdk_sesv2::Client as SesClient;
use base64::Engine;
use serde::Deserialize;
use std::collections::HashMap;

/// API Gateway proxy event. REST (v1) events carry `httpMethod`,
/// HTTP API (v2) events carry `requestContext.http.method`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiGatewayProxyRequest {
    #[serde(default)]
    pub http_method: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
    #[serde(default)]
    pub request_context: Option<RequestContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: Option<String>,
}

impl From<ApiGatewayProxyRequest> for HttpRequest {
    fn from(event: ApiGatewayProxyRequest) -> Self {
        let method = event
            .http_method
            .or_else(|| event.request_context.and_then(|c| c.http).and_then(|h| h.method))
            .unwrap_or_default();

        let body = match event.body {
            Some(raw) if event.is_base64_encoded => base64::engine::general_purpose::STANDARD
                .decode(raw.as_bytes())
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .or_else(|| {
                    tracing::warn!("Discarding body that is not valid base64 UTF-8");
                    None
                }),
            other => other,
        };

        HttpRequest { method, body }
    }
}

pub fn record_to_item(record: &SubmissionRecord) -> HashMap<String, AttributeValue> {
    [
        ("submissionId", &record.submission_id),
        ("timestamp", &record.timestamp),
        ("name", &record.name),
        ("email", &record.email),
        ("phone", &record.phone),
        ("destination", &record.destination),
        ("message", &record.message),
        ("status", &record.status),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), AttributeValue::S(v.clone())))
    .collect()
}

#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: DynamoClient,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: DynamoClient, table_name: String) -> Self {
        Self { client, table_name }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

impl SubmissionStore for DynamoStore {
    async fn put(&self, record: &SubmissionRecord) -> Result<()> {
        // Plain put: ids are unique, so no condition expression
        self.client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(record_to_item(record)))
            .send()
            .await
            .map_err(|err| {
                // Keep the service code for the log; callers only ever see a generic 500
                let err = err.into_service_error();
                let detail = match &err {
                    PutItemError::ResourceNotFoundException(_) => {
                        format!("table {} does not exist", self.table_name)
                    }
                    PutItemError::ProvisionedThroughputExceededException(_)
                    | PutItemError::RequestLimitExceeded(_) => "throughput exceeded".to_string(),
                    other => other.message().unwrap_or("unhandled error").to_string(),
                };
                IntakeError::StoreError {
                    message: format!(
                        "DynamoDB put_item failed: {} ({})",
                        detail,
                        err.code().unwrap_or("Unknown")
                    ),
                }
            })?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct SesMailer {
    client: SesClient,
}

impl SesMailer {
    pub fn new(client: SesClient) -> Self {
        Self { client }
    }
}

fn utf8_content(data: &str) -> Result<Content> {
    Content::builder()
        .data(data)
        .charset("UTF-8")
        .build()
        .map_err(|e| IntakeError::NotificationError {
            message: format!("Failed to build email content: {}", e),
        })
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, message: &EmailMessage) -> Result<String> {
        // Recipients
        let destination = Destination::builder()
            .set_to_addresses(Some(message.recipients.clone()))
            .build();

        // HTML and text bodies travel together
        let body = Body::builder()
            .html(utf8_content(&message.html_body)?)
            .text(utf8_content(&message.text_body)?)
            .build();

        let simple = Message::builder()
            .subject(utf8_content(&message.subject)?)
            .body(body)
            .build();

        // Send
        let output = self
            .client
            .send_email()
            .from_email_address(&message.sender)
            .destination(destination)
            .content(EmailContent::builder().simple(simple).build())
            .send()
            .await
            .map_err(|err| {
                let err = err.into_service_error();
                IntakeError::NotificationError {
                    message: format!(
                        "SES send_email failed: {} ({})",
                        err.message().unwrap_or("unhandled error"),
                        err.code().unwrap_or("Unknown")
                    ),
                }
            })?;

        Ok(output.message_id().unwrap_or_default().to_string())
    }
}
