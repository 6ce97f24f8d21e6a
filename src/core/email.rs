use crate::domain::model::{EmailMessage, SubmissionRecord};
use crate::domain::ports::{Mailer, Notifier};
use crate::utils::error::{IntakeError, Result};
use async_trait::async_trait;
use chrono::DateTime;

#[derive(Debug, Clone)]
pub struct EmailSettings {
    pub sender_address: String,
    pub business_address: String,
    pub brand_name: String,
}

/// Sends the customer confirmation and the business alert for each submission.
pub struct EmailNotifier<M: Mailer> {
    mailer: M,
    settings: EmailSettings,
}

impl<M: Mailer> EmailNotifier<M> {
    pub fn new(mailer: M, settings: EmailSettings) -> Self {
        Self { mailer, settings }
    }

    pub fn customer_email(&self, record: &SubmissionRecord) -> EmailMessage {
        let brand = &self.settings.brand_name;
        let name = escape_html(&record.name);
        let message = escape_html(&record.message);
        let destination_html = if record.has_destination() {
            format!(
                "<p><strong>Dream Destination:</strong> {}</p>",
                escape_html(&record.destination)
            )
        } else {
            String::new()
        };
        let destination_text = if record.has_destination() {
            format!("\n\nDream destination: {}", record.destination)
        } else {
            String::new()
        };

        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<style>
  body {{ font-family: Arial, sans-serif; color: #333; }}
  .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
  .header {{ background: linear-gradient(135deg, #3498db, #2980b9); color: white; padding: 20px; text-align: center; }}
  .content {{ padding: 20px; background: #f9f9f9; }}
  .footer {{ padding: 20px; text-align: center; color: #666; font-size: 12px; }}
</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>✈️ {brand}</h1>
      <p>Thank You for Contacting Us!</p>
    </div>
    <div class="content">
      <h2>Hello {name}!</h2>
      <p>We've received your inquiry and our travel experts will get back to you within 24 hours.</p>
      <p><strong>Your Message:</strong></p>
      <p>{message}</p>
      {destination_html}
      <br>
      <p>Best regards,<br>The {brand} Team</p>
    </div>
    <div class="footer">
      <p>This is an automated message. Please do not reply to this email.</p>
    </div>
  </div>
</body>
</html>"#,
            brand = escape_html(brand),
        );

        let text_body = format!(
            "Hello {}!\n\nThank you for contacting {}! We've received your message and will get back to you within 24 hours.\n\nYour message: {}{}\n\nBest regards,\nThe {} Team",
            record.name, brand, record.message, destination_text, brand
        );

        EmailMessage {
            sender: self.settings.sender_address.clone(),
            recipients: vec![record.email.clone()],
            subject: format!("✈️ Thank You for Contacting {}!", brand),
            html_body,
            text_body,
        }
    }

    pub fn business_email(&self, record: &SubmissionRecord) -> EmailMessage {
        let received = human_readable_time(&record.timestamp);

        let html_body = format!(
            r#"<!DOCTYPE html>
<html>
<head>
<style>
  body {{ font-family: Arial, sans-serif; color: #333; }}
  .container {{ max-width: 600px; margin: 0 auto; padding: 20px; }}
  .header {{ background: #e74c3c; color: white; padding: 20px; text-align: center; }}
  .content {{ padding: 20px; background: #f9f9f9; }}
  .info-item {{ margin: 10px 0; }}
</style>
</head>
<body>
  <div class="container">
    <div class="header">
      <h1>📧 New Contact Form Submission</h1>
    </div>
    <div class="content">
      <div class="info-item"><strong>Name:</strong> {name}</div>
      <div class="info-item"><strong>Email:</strong> {email}</div>
      <div class="info-item"><strong>Phone:</strong> {phone}</div>
      <div class="info-item"><strong>Destination:</strong> {destination}</div>
      <div class="info-item"><strong>Message:</strong><br>{message}</div>
      <div class="info-item"><strong>Submission ID:</strong> {submission_id}</div>
      <div class="info-item"><strong>Received:</strong> {received}</div>
    </div>
  </div>
</body>
</html>"#,
            name = escape_html(&record.name),
            email = escape_html(&record.email),
            phone = escape_html(&record.phone),
            destination = escape_html(&record.destination),
            message = escape_html(&record.message),
            submission_id = escape_html(&record.submission_id),
            received = escape_html(&received),
        );

        let text_body = format!(
            "New Contact Form Submission:\n\nName: {}\nEmail: {}\nPhone: {}\nDestination: {}\nMessage: {}\nSubmission ID: {}\nReceived: {}",
            record.name,
            record.email,
            record.phone,
            record.destination,
            record.message,
            record.submission_id,
            received
        );

        EmailMessage {
            sender: self.settings.sender_address.clone(),
            recipients: vec![self.settings.business_address.clone()],
            subject: format!("📧 New Contact: {} - {}", record.name, self.settings.brand_name),
            html_body,
            text_body,
        }
    }
}

#[async_trait]
impl<M: Mailer> Notifier for EmailNotifier<M> {
    fn name(&self) -> &str {
        "email"
    }

    async fn notify(&self, record: &SubmissionRecord) -> Result<()> {
        let customer = self.customer_email(record);
        let business = self.business_email(record);

        let (customer_result, business_result) =
            futures::join!(self.mailer.send(&customer), self.mailer.send(&business));

        let mut failures = Vec::new();
        for (kind, result) in [("customer", customer_result), ("business", business_result)] {
            match result {
                Ok(message_id) => {
                    tracing::debug!(
                        submission_id = %record.submission_id,
                        message_id = %message_id,
                        "Sent {} email",
                        kind
                    );
                }
                Err(e) => failures.push(format!("{} email: {}", kind, e)),
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(IntakeError::NotificationError {
                message: failures.join("; "),
            })
        }
    }
}

/// Render an RFC 3339 timestamp for people. Unparseable input is returned as-is.
pub fn human_readable_time(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.format("%B %-d, %Y at %H:%M:%S UTC").to_string(),
        Err(_) => timestamp.to_string(),
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            '\n' => out.push_str("<br>"),
            _ => out.push(c),
        }
    }
    out
}
