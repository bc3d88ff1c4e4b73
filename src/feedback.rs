//! Outbound feedback relay: fire-and-forget POST to a chat webhook.
//!
//! The webhook URL comes from FEEDBACK_WEBHOOK_URL; without it the relay is
//! disabled and the endpoint reports that. Success is "the webhook said
//! 2xx" and nothing more; there is no retry, the user can resubmit.
//!
//! NOTE: We never log message contents, only lengths.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, USER_AGENT};
use serde::Serialize;
use tracing::{error, info, instrument};

use crate::util::trunc_for_log;

#[derive(Clone)]
pub struct FeedbackNotifier {
  pub client: reqwest::Client,
  pub webhook_url: String,
}

#[derive(Serialize)]
struct WebhookPayload {
  content: String,
  username: String,
}

/// Markdown body the webhook receives: optional name/contact lines, then the
/// free-text message.
pub fn format_feedback(message: &str, name: Option<&str>, email: Option<&str>) -> String {
  let mut content = String::from("**New Feedback from Story40**\n\n");
  if let Some(name) = name.filter(|n| !n.trim().is_empty()) {
    content.push_str(&format!("**Name:** {}\n", name.trim()));
  }
  if let Some(email) = email.filter(|e| !e.trim().is_empty()) {
    content.push_str(&format!("**Email:** {}\n", email.trim()));
  }
  if content.len() > "**New Feedback from Story40**\n\n".len() {
    content.push('\n');
  }
  content.push_str(&format!("**Message:**\n{}", message));
  content
}

impl FeedbackNotifier {
  /// Construct the notifier if FEEDBACK_WEBHOOK_URL is set; otherwise None.
  pub fn from_env() -> Option<Self> {
    let webhook_url = std::env::var("FEEDBACK_WEBHOOK_URL").ok()?;
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(10))
      .build()
      .ok()?;
    Some(Self { client, webhook_url })
  }

  #[instrument(level = "info", skip_all, fields(message_len = message.len(), has_name = name.is_some(), has_email = email.is_some()))]
  pub async fn send(
    &self,
    message: &str,
    name: Option<&str>,
    email: Option<&str>,
  ) -> Result<(), String> {
    let payload = WebhookPayload {
      content: format_feedback(message, name, email),
      username: "Story40 Feedback".into(),
    };

    let res = self
      .client
      .post(&self.webhook_url)
      .header(USER_AGENT, "story40-backend/0.1")
      .header(CONTENT_TYPE, "application/json")
      .json(&payload)
      .send()
      .await
      .map_err(|e| e.to_string())?;

    if !res.status().is_success() {
      let status = res.status();
      let body = res.text().await.unwrap_or_default();
      error!(target: "story40_backend", %status, "Feedback webhook rejected the message");
      return Err(format!("Webhook HTTP {}: {}", status, trunc_for_log(&body, 200)));
    }

    info!(target: "story40_backend", "Feedback relayed");
    Ok(())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn full_feedback_carries_name_and_email() {
    let body = format_feedback("Love the app!", Some("Sam"), Some("sam@example.com"));
    assert!(body.starts_with("**New Feedback from Story40**\n\n"));
    assert!(body.contains("**Name:** Sam\n"));
    assert!(body.contains("**Email:** sam@example.com\n"));
    assert!(body.ends_with("**Message:**\nLove the app!"));
  }

  #[test]
  fn anonymous_feedback_skips_the_contact_block() {
    let body = format_feedback("hi", None, None);
    assert_eq!(body, "**New Feedback from Story40**\n\n**Message:**\nhi");
    // Blank strings are treated the same as absent.
    let blank = format_feedback("hi", Some("  "), None);
    assert_eq!(blank, body);
  }
}
