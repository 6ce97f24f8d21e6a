#[cfg(feature = "lambda")]
use aws_config::BehaviorVersion;
#[cfg(feature = "lambda")]
use aws_sdk_dynamodb::Client as DynamoClient;
#[cfg(feature = "lambda")]
use aws_sdk_sesv2::Client as SesClient;
#[cfg(feature = "lambda")]
use contact_intake::utils::logger;
#[cfg(feature = "lambda")]
use contact_intake::{
    ApiGatewayProxyRequest, AppConfig, DynamoStore, EmailNotifier, HttpRequest, HttpResponse,
    IntakeError, SesMailer, SubmissionHandler,
};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
#[cfg(feature = "lambda")]
use std::sync::Arc;

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &SubmissionHandler<DynamoStore>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<HttpResponse, Error> {
    // API Gateway event -> transport-neutral request
    let request = HttpRequest::from(event.payload);
    Ok(handler.handle(request).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // Fail the cold start rather than every invocation
    let config = AppConfig::load().map_err(|e| {
        tracing::error!("❌ Configuration validation failed: {}", e);
        Box::new(e) as Box<dyn std::error::Error + Send + Sync>
    })?;
    let table_name = config
        .table_name
        .clone()
        .ok_or_else(|| IntakeError::MissingConfigError {
            field: "table_name".to_string(),
        })?;

    // AWS clients are built once and shared by every invocation
    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let store = DynamoStore::new(DynamoClient::new(&sdk_config), table_name);

    // Email is optional; without it the handler only stores submissions
    let mut handler = SubmissionHandler::new(store).with_policy(config.notification_policy);
    if let Some(settings) = config.email_settings() {
        let mailer = SesMailer::new(SesClient::new(&sdk_config));
        handler = handler.with_notifier(Arc::new(EmailNotifier::new(mailer, settings)));
    }

    tracing::info!(
        notifiers = handler.notifier_count(),
        "Contact intake Lambda ready"
    );

    let handler = &handler;
    run(service_fn(move |event: LambdaEvent<ApiGatewayProxyRequest>| async move {
        function_handler(handler, event).await
    }))
    .await
}
