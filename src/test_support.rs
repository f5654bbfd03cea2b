//! Fakes shared by the unit tests.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::{json, Value};

use crate::config::{Config, MailSettings};
use crate::error::ProviderError;
use crate::mail::{EmailProvider, OutboundEmail};
use crate::state::AppState;

pub const TEST_API_KEY: &str = "re_test_key";

pub fn test_config() -> Config {
    Config {
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        log_json: false,
        mail: MailSettings {
            resend_api_key: Some(SecretString::from(TEST_API_KEY.to_string())),
            to_email: Some("info@example.com".to_string()),
            from_email: Some("noreply@example.com".to_string()),
            resend_api_url: MailSettings::DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(MailSettings::DEFAULT_TIMEOUT_SECONDS),
        },
    }
}

pub fn test_config_without_mail() -> Config {
    let mut config = test_config();
    config.mail.resend_api_key = None;
    config
}

#[derive(Clone)]
pub enum FakeOutcome {
    Succeed(Value),
    Reject(String),
    Fail(String),
    Hang,
}

/// Every email the fake was asked to send, with the API key it was given.
#[derive(Clone, Default)]
pub struct SentLog(Arc<Mutex<Vec<(String, OutboundEmail)>>>);

impl SentLog {
    pub fn count(&self) -> usize {
        self.0.lock().unwrap().len()
    }

    pub fn last(&self) -> Option<(String, OutboundEmail)> {
        self.0.lock().unwrap().last().cloned()
    }
}

pub struct FakeProvider {
    outcome: FakeOutcome,
    sent: SentLog,
}

impl FakeProvider {
    pub fn new(outcome: FakeOutcome) -> Self {
        Self {
            outcome,
            sent: SentLog::default(),
        }
    }

    pub fn succeeding() -> Self {
        Self::new(FakeOutcome::Succeed(json!({ "id": "re_msg_123" })))
    }

    pub fn into_state(self, config: Config) -> (AppState, SentLog) {
        let sent = self.sent.clone();
        (AppState::new(config, self), sent)
    }
}

#[async_trait]
impl EmailProvider for FakeProvider {
    async fn send_email(
        &self,
        api_key: &SecretString,
        email: &OutboundEmail,
    ) -> Result<Value, ProviderError> {
        self.sent
            .0
            .lock()
            .unwrap()
            .push((api_key.expose_secret().to_string(), email.clone()));

        match &self.outcome {
            FakeOutcome::Succeed(data) => Ok(data.clone()),
            FakeOutcome::Reject(detail) => Err(ProviderError::Rejected(detail.clone())),
            FakeOutcome::Fail(detail) => Err(ProviderError::Transport(detail.clone())),
            FakeOutcome::Hang => std::future::pending().await,
        }
    }
}
