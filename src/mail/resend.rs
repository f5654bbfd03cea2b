use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;

use super::{EmailProvider, OutboundEmail};
use crate::config::MailSettings;
use crate::error::ProviderError;

/// Resend REST client.
#[derive(Clone)]
pub struct ResendMailer {
    client: Client,
    base_url: String,
}

impl ResendMailer {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &MailSettings) -> reqwest::Result<Self> {
        Self::new(settings.resend_api_url.clone(), settings.timeout)
    }

    fn emails_url(&self) -> String {
        format!("{}/emails", self.base_url)
    }
}

#[async_trait]
impl EmailProvider for ResendMailer {
    async fn send_email(
        &self,
        api_key: &SecretString,
        email: &OutboundEmail,
    ) -> Result<Value, ProviderError> {
        let res = self
            .client
            .post(self.emails_url())
            .bearer_auth(api_key.expose_secret())
            .json(email)
            .send()
            .await
            .map_err(|e| ProviderError::Transport(format!("Mail send failed: {}", e)))?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|e| ProviderError::Transport(format!("Reading Resend response failed: {}", e)))?;

        if !status.is_success() {
            return Err(ProviderError::Rejected(format!(
                "Resend API error ({}): {}",
                status, body
            )));
        }

        Ok(serde_json::from_str(&body).unwrap_or(Value::Null))
    }
}
