use anyhow::Context;
use clap::Parser;
use contact_intake::utils::{logger, validation::Validate};
use contact_intake::{
    CliConfig, EmailNotifier, FileStore, HttpRequest, OutboxMailer, SubmissionHandler,
};
use std::io::Read;
use std::sync::Arc;

fn read_payload(input: &str) -> anyhow::Result<String> {
    if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read payload from stdin")?;
        Ok(buf)
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read payload from {}", input))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting contact-intake CLI");
    if config.verbose {
        tracing::debug!("CLI config: {:?}", config);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let payload = read_payload(&config.input)?;

    let mut handler = SubmissionHandler::new(FileStore::new(&config.store_dir))
        .with_policy(config.notification_policy());
    if let Some(settings) = config.email_settings() {
        let mailer = OutboxMailer::new(&config.outbox_dir);
        handler = handler.with_notifier(Arc::new(EmailNotifier::new(mailer, settings)));
    } else {
        tracing::info!("Email notification disabled, storing only");
    }

    let response = handler.handle(HttpRequest::post(payload)).await;

    println!("{}", response.status_code);
    println!("{}", response.body);

    if response.status_code != 200 {
        std::process::exit(match response.status_code {
            400..=499 => 2,
            _ => 1,
        });
    }

    Ok(())
}
