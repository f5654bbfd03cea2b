use std::env;
use std::time::Duration;

use secrecy::SecretString;

#[derive(Debug)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub log_json: bool,
    pub mail: MailSettings,
}

/// Mail settings as found in the environment. Any of them may be absent;
/// that only becomes an error when a submission needs them.
#[derive(Debug)]
pub struct MailSettings {
    pub resend_api_key: Option<SecretString>,
    pub to_email: Option<String>,
    pub from_email: Option<String>,
    pub resend_api_url: String,
    pub timeout: Duration,
}

/// Everything required to hand one email to the provider.
#[derive(Debug, Clone, Copy)]
pub struct ProviderConfig<'a> {
    pub api_key: &'a SecretString,
    pub to_address: &'a str,
    pub from_address: &'a str,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidPort)?,
            log_json: env::var("LOG_FORMAT")
                .map(|v| v.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            mail: MailSettings::from_env(),
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

impl MailSettings {
    pub const DEFAULT_API_URL: &'static str = "https://api.resend.com";
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

    pub fn from_env() -> Self {
        MailSettings {
            resend_api_key: non_empty_var("RESEND_API_KEY").map(SecretString::from),
            to_email: non_empty_var("TO_EMAIL"),
            from_email: non_empty_var("FROM_EMAIL"),
            resend_api_url: env::var("RESEND_API_URL")
                .unwrap_or_else(|_| Self::DEFAULT_API_URL.to_string()),
            timeout: Duration::from_secs(
                env::var("MAIL_TIMEOUT_SECONDS")
                    .unwrap_or_else(|_| Self::DEFAULT_TIMEOUT_SECONDS.to_string())
                    .parse()
                    .unwrap_or(Self::DEFAULT_TIMEOUT_SECONDS),
            ),
        }
    }

    /// Resolve the three values a send needs. The error names the missing
    /// variables and is meant for the server log only.
    pub fn resolve(&self) -> Result<ProviderConfig<'_>, ConfigError> {
        match (&self.resend_api_key, &self.to_email, &self.from_email) {
            (Some(api_key), Some(to), Some(from)) if !to.is_empty() && !from.is_empty() => {
                Ok(ProviderConfig {
                    api_key,
                    to_address: to,
                    from_address: from,
                })
            }
            _ => Err(ConfigError::MissingMailSettings(self.missing().join(", "))),
        }
    }

    pub fn is_configured(&self) -> bool {
        self.missing().is_empty()
    }

    fn missing(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.resend_api_key.is_none() {
            missing.push("RESEND_API_KEY");
        }
        if self.to_email.as_deref().map_or(true, str::is_empty) {
            missing.push("TO_EMAIL");
        }
        if self.from_email.as_deref().map_or(true, str::is_empty) {
            missing.push("FROM_EMAIL");
        }
        missing
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid server port")]
    InvalidPort,
    #[error("Missing mail settings: {0}")]
    MissingMailSettings(String),
}
