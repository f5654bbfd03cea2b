use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::AppError;

pub const PHONE_PLACEHOLDER: &str = "Not provided";

/// Contact form payload as posted by the client. Every field is optional on
/// the wire and read leniently, so one oddly typed field never hides the
/// others; `validate` decides what is acceptable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubmissionRequest {
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, deserialize_with = "lenient_text", skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Strings pass through, numbers and `true` render as text. `null`, `false`,
/// arrays and objects count as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    })
}

/// A submission that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidSubmission {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl SubmissionRequest {
    /// Parse a raw request body. Anything that is not a JSON object yields an
    /// empty request, which then fails validation.
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    pub fn validate(self) -> Result<ValidSubmission, AppError> {
        let name = non_empty(self.name).ok_or(AppError::Validation)?;
        let email = non_empty(self.email).ok_or(AppError::Validation)?;
        let message = non_empty(self.message).ok_or(AppError::Validation)?;

        Ok(ValidSubmission {
            name,
            email,
            // blank phones get the placeholder
            phone: self.phone.filter(|p| !p.trim().is_empty()),
            message,
        })
    }
}

fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|v| !v.is_empty())
}

impl ValidSubmission {
    pub fn phone_or_placeholder(&self) -> &str {
        self.phone.as_deref().unwrap_or(PHONE_PLACEHOLDER)
    }
}

/// Body of a successful send.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub success: bool,
    pub message: String,
    pub data: Value,
}

impl SubmissionResponse {
    pub fn sent(data: Value) -> Self {
        Self {
            success: true,
            message: "Email sent successfully".to_string(),
            data,
        }
    }
}

/// Outcome of handing a valid submission to the provider.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionResult {
    Success(Value),
    ProviderRejected(String),
    ServerMisconfigured,
    TransportFailure(String),
}

impl IntoResponse for SubmissionResult {
    fn into_response(self) -> Response {
        match self {
            SubmissionResult::Success(data) => {
                (StatusCode::OK, Json(SubmissionResponse::sent(data))).into_response()
            }
            SubmissionResult::ProviderRejected(detail) => {
                AppError::ProviderRejected(detail).into_response()
            }
            SubmissionResult::ServerMisconfigured => {
                AppError::Configuration.into_response()
            }
            SubmissionResult::TransportFailure(detail) => {
                AppError::Transport(detail).into_response()
            }
        }
    }
}
