use axum::body::Bytes;
use axum::extract::State;
use axum::http::{Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::any;
use axum::Router;
use uuid::Uuid;

use crate::error::{AppError, ProviderError};
use crate::mail::OutboundEmail;
use crate::models::{SubmissionRequest, SubmissionResult, ValidSubmission};
use crate::state::AppState;

pub const SEND_EMAIL_PATH: &str = "/api/send-email";

/// Contact routes. Every method lands in the same handler so that
/// unsupported ones get the JSON 405 body.
pub fn contact_routes() -> Router<AppState> {
    Router::new().route(SEND_EMAIL_PATH, any(send_email))
}

/// /api/send-email - Forward a contact form submission as an email
#[tracing::instrument(skip_all, fields(method = %method, submission_id = %Uuid::new_v4()))]
async fn send_email(State(state): State<AppState>, method: Method, body: Bytes) -> Response {
    if method == Method::OPTIONS {
        return StatusCode::OK.into_response();
    }

    if method != Method::POST {
        return AppError::MethodNotAllowed.into_response();
    }

    let submission = match SubmissionRequest::from_body(&body).validate() {
        Ok(submission) => submission,
        Err(err) => {
            tracing::debug!("Rejected incomplete submission");
            return err.into_response();
        }
    };

    deliver(&state, &submission).await.into_response()
}

/// Resolve mail settings, build the email and hand it to the provider.
async fn deliver(state: &AppState, submission: &ValidSubmission) -> SubmissionResult {
    let mail = &state.config.mail;

    let provider_config = match mail.resolve() {
        Ok(provider_config) => provider_config,
        Err(e) => {
            tracing::error!(error = %e, "Mail provider is not configured");
            return SubmissionResult::ServerMisconfigured;
        }
    };

    let email = OutboundEmail::for_submission(&provider_config, submission);
    let send = state.mailer.send_email(provider_config.api_key, &email);

    match tokio::time::timeout(mail.timeout, send).await {
        Ok(Ok(data)) => {
            tracing::info!("Contact email sent");
            SubmissionResult::Success(data)
        }
        Ok(Err(ProviderError::Rejected(detail))) => {
            tracing::error!(error = %detail, "Email provider rejected the message");
            SubmissionResult::ProviderRejected(detail)
        }
        Ok(Err(ProviderError::Transport(detail))) => {
            tracing::error!(error = %detail, "Email provider call failed");
            SubmissionResult::TransportFailure(detail)
        }
        Err(_) => {
            let detail = format!("no response within {:?}", mail.timeout);
            tracing::error!(error = %detail, "Email provider call timed out");
            SubmissionResult::TransportFailure(detail)
        }
    }
}
