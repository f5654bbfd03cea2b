pub mod resend;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;
use serde_json::Value;

use crate::config::ProviderConfig;
use crate::error::ProviderError;
use crate::models::ValidSubmission;

pub use resend::ResendMailer;

/// Transactional email provider seam.
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Hand one email to the provider and return its response payload.
    async fn send_email(
        &self,
        api_key: &SecretString,
        email: &OutboundEmail,
    ) -> Result<Value, ProviderError>;
}

/// One email ready for the provider. Field names match the Resend API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OutboundEmail {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub text: String,
    pub html: String,
}

impl OutboundEmail {
    pub fn for_submission(config: &ProviderConfig<'_>, submission: &ValidSubmission) -> Self {
        Self {
            from: config.from_address.to_string(),
            to: vec![config.to_address.to_string()],
            subject: subject_line(&submission.name),
            text: render_text(submission),
            html: render_html(submission),
        }
    }
}

fn subject_line(name: &str) -> String {
    // Keep the subject on one line.
    let name: String = name
        .chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect();
    format!("New Contact Form Submission from {}", name)
}

fn render_text(submission: &ValidSubmission) -> String {
    format!(
        "Name: {}\nEmail: {}\nPhone: {}\n\nMessage:\n{}\n",
        submission.name,
        submission.email,
        submission.phone_or_placeholder(),
        submission.message,
    )
}

fn render_html(submission: &ValidSubmission) -> String {
    let name = escape_html(&submission.name);
    let email = escape_html(&submission.email);
    let phone = escape_html(submission.phone_or_placeholder());
    let message = escape_html(&submission.message);

    format!(
        r#"<div style="font-family: sans-serif; max-width: 600px; margin: 0 auto;">
  <h2 style="color: #333; border-bottom: 2px solid #f97316; padding-bottom: 10px;">New Contact Form Submission</h2>
  <p><strong>Name:</strong> {name}</p>
  <p><strong>Email:</strong> <a href="mailto:{email}">{email}</a></p>
  <p><strong>Phone:</strong> {phone}</p>
  <br />
  <p><strong>Message:</strong></p>
  <div style="background-color: #f5f5f5; padding: 15px; border-radius: 5px;">
    <p style="margin: 0; white-space: pre-wrap;">{message}</p>
  </div>
</div>
"#
    )
}

/// Escape text for use in HTML element content and quoted attributes.
pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn provider_config(key: &SecretString) -> ProviderConfig<'_> {
        ProviderConfig {
            api_key: key,
            to_address: "info@example.com",
            from_address: "noreply@example.com",
        }
    }

    fn submission(phone: Option<&str>) -> ValidSubmission {
        ValidSubmission {
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
            phone: phone.map(str::to_string),
            message: "Need a quote".to_string(),
        }
    }

    #[test]
    fn test_envelope_addresses_and_subject() {
        let key = SecretString::from("re_test".to_string());
        let email = OutboundEmail::for_submission(&provider_config(&key), &submission(None));

        assert_eq!(email.from, "noreply@example.com");
        assert_eq!(email.to, vec!["info@example.com".to_string()]);
        assert_eq!(email.subject, "New Contact Form Submission from John Doe");
    }

    #[test]
    fn test_text_body_layout() {
        let key = SecretString::from("re_test".to_string());
        let email =
            OutboundEmail::for_submission(&provider_config(&key), &submission(Some("555-1234")));

        assert_eq!(
            email.text,
            "Name: John Doe\nEmail: john@example.com\nPhone: 555-1234\n\nMessage:\nNeed a quote\n"
        );
    }

    #[test]
    fn test_missing_phone_renders_placeholder() {
        let key = SecretString::from("re_test".to_string());
        let email = OutboundEmail::for_submission(&provider_config(&key), &submission(None));

        assert!(email.text.contains("Phone: Not provided"));
        assert!(email.html.contains("<strong>Phone:</strong> Not provided</p>"));
    }

    #[test]
    fn test_html_body_escapes_user_content() {
        let key = SecretString::from("re_test".to_string());
        let hostile = ValidSubmission {
            name: "<script>alert(1)</script>".to_string(),
            email: "x\"><img src=x>@evil.io".to_string(),
            phone: Some("<b>1</b>".to_string()),
            message: "Tom & Jerry's <i>quote</i>".to_string(),
        };
        let email = OutboundEmail::for_submission(&provider_config(&key), &hostile);

        assert!(!email.html.contains("<script>"));
        assert!(!email.html.contains("<img"));
        assert!(!email.html.contains("<b>1</b>"));
        assert!(email.html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(email.html.contains("mailto:x&quot;&gt;&lt;img src=x&gt;@evil.io"));
        assert!(email.html.contains("Tom &amp; Jerry&#39;s &lt;i&gt;quote&lt;/i&gt;"));
    }

    #[test]
    fn test_subject_strips_line_breaks() {
        assert_eq!(
            subject_line("Eve\r\nBcc: victim@example.com"),
            "New Contact Form Submission from Eve  Bcc: victim@example.com"
        );
    }

    #[test]
    fn test_subject_keeps_name_as_given() {
        assert_eq!(subject_line("  John  "), "New Contact Form Submission from   John  ");
    }

    #[test]
    fn test_escape_html_passthrough() {
        assert_eq!(escape_html("plain text 123"), "plain text 123");
        assert_eq!(escape_html(""), "");
    }
}
