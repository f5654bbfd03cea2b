use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Caller-facing failures. Details carried by the server-side variants are
/// for logs; the response body only ever contains the generic message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Name, email, and message are required")]
    Validation,

    #[error("Server configuration error")]
    Configuration,

    #[error("Provider rejected email: {0}")]
    ProviderRejected(String),

    #[error("Provider transport failure: {0}")]
    Transport(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Validation | AppError::ProviderRejected(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration | AppError::Transport(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn public_message(&self) -> &'static str {
        match self {
            AppError::MethodNotAllowed => "Method not allowed",
            AppError::Validation => "Name, email, and message are required",
            AppError::Configuration => "Server configuration error",
            AppError::ProviderRejected(_) | AppError::Transport(_) => "Failed to send email",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "error": self.public_message() }));
        (self.status(), body).into_response()
    }
}

/// Errors surfaced by an email provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    /// The provider answered and declined to send.
    #[error("rejected: {0}")]
    Rejected(String),

    /// The provider could not be reached or did not answer in time.
    #[error("transport: {0}")]
    Transport(String),
}
