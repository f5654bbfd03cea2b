//! Client side of the contact form: the form fields, its status and the
//! POST to `/api/send-email`.

use std::time::{Duration, Instant};

use reqwest::Client;
use serde::Deserialize;

use crate::models::{SubmissionRequest, SubmissionResponse};

/// How long the success state stays visible before the form is idle again.
pub const SUCCESS_DISPLAY: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
}

impl ContactForm {
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn to_request(&self) -> SubmissionRequest {
        SubmissionRequest {
            name: Some(self.name.clone()),
            email: Some(self.email.clone()),
            phone: Some(self.phone.clone()).filter(|p| !p.is_empty()),
            message: Some(self.message.clone()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormStatus {
    Idle,
    Submitting,
    Success,
    Error,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Server responded {status}: {message}")]
    Rejected { status: u16, message: String },
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// HTTP client for the submission endpoint.
#[derive(Clone)]
pub struct ContactClient {
    http: Client,
    endpoint: String,
}

impl ContactClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            endpoint: endpoint.into(),
        }
    }

    pub async fn submit(&self, form: &ContactForm) -> Result<SubmissionResponse, ClientError> {
        let res = self
            .http
            .post(&self.endpoint)
            .json(&form.to_request())
            .send()
            .await?;

        let status = res.status();
        if status.is_success() {
            return Ok(res.json().await?);
        }

        let message = match res.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("Unknown error").to_string(),
        };

        Err(ClientError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// One form on screen: its fields and what the user currently sees.
pub struct SubmissionSession {
    client: ContactClient,
    form: ContactForm,
    status: FormStatus,
    succeeded_at: Option<Instant>,
}

impl SubmissionSession {
    pub fn new(client: ContactClient) -> Self {
        Self {
            client,
            form: ContactForm::default(),
            status: FormStatus::Idle,
            succeeded_at: None,
        }
    }

    pub fn form(&self) -> &ContactForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut ContactForm {
        &mut self.form
    }

    pub fn status(&self) -> FormStatus {
        self.status_at(Instant::now())
    }

    /// Status as of `now`; success reverts to idle once it has been shown
    /// for `SUCCESS_DISPLAY`.
    pub fn status_at(&self, now: Instant) -> FormStatus {
        match (self.status, self.succeeded_at) {
            (FormStatus::Success, Some(at)) if now.saturating_duration_since(at) >= SUCCESS_DISPLAY => {
                FormStatus::Idle
            }
            (status, _) => status,
        }
    }

    /// Post the form once. On success the fields are cleared; on failure
    /// they are kept so the user can try again.
    pub async fn submit(&mut self) -> Result<SubmissionResponse, ClientError> {
        self.status = FormStatus::Submitting;
        self.succeeded_at = None;

        match self.client.submit(&self.form).await {
            Ok(response) => {
                self.form.clear();
                self.status = FormStatus::Success;
                self.succeeded_at = Some(Instant::now());
                Ok(response)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Contact form submission failed");
                self.status = FormStatus::Error;
                Err(e)
            }
        }
    }
}
