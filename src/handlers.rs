//! Webhook gate: signature check, event filter, then the build

use axum::{
    body::Bytes,
    extract::State as AxumState,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, info};

use crate::SharedState;
use crate::error::Error;
use crate::pipeline::Pipeline;
use crate::runner::ProcessRunner;
use crate::signature;

pub async fn root() -> &'static str {
    "pushsite"
}

/// The fields of a push payload the gate cares about.
#[derive(Debug, Deserialize)]
struct PushPayload {
    repository: Repository,
}

#[derive(Debug, Deserialize)]
struct Repository {
    full_name: String,
}

/// Event filter verdict for one request.
#[derive(Debug)]
pub enum Decision {
    /// Push event addressed to the tracked repository.
    Proceed,
    /// Some other event type; drop it without error.
    Ignore,
    /// Malformed payload or wrong repository; report a client error.
    Reject(Error),
}

/// Accepts only push events whose payload decodes and names the tracked
/// repository.
pub fn screen(event: Option<&str>, body: &[u8], tracked_full_name: &str) -> Decision {
    if event != Some("push") {
        return Decision::Ignore;
    }

    let payload: PushPayload = match serde_json::from_slice(body) {
        Ok(payload) => payload,
        Err(e) => {
            return Decision::Reject(Error::Validation(format!("invalid push payload: {}", e)));
        }
    };

    if payload.repository.full_name != tracked_full_name {
        return Decision::Reject(Error::Validation(format!(
            "unexpected repository '{}'",
            payload.repository.full_name
        )));
    }

    Decision::Proceed
}

/// How one request left the gate.
pub enum GateOutcome {
    /// Build ran to completion.
    Completed,
    /// Non-push event, dropped without error.
    Ignored,
    /// Signature mismatch. Deliberately indistinguishable from success on
    /// the wire, so a probing sender learns nothing about the secret.
    SilentlyRejected,
    /// Malformed payload or wrong repository.
    Rejected(Error),
    /// The pipeline failed.
    Failed(Error),
}

impl IntoResponse for GateOutcome {
    fn into_response(self) -> Response {
        match self {
            GateOutcome::Completed | GateOutcome::Ignored | GateOutcome::SilentlyRejected => {
                StatusCode::OK.into_response()
            }
            GateOutcome::Rejected(e) => (StatusCode::BAD_REQUEST, e.to_string()).into_response(),
            GateOutcome::Failed(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
            }
        }
    }
}

/// Handles the webhook POST request.
///
/// Straight-line state machine per request: signature gate, event gate,
/// payload/repository gate, then the build, which runs synchronously under
/// the per-application lock before the response is written.
pub async fn handle_webhook<R: ProcessRunner + 'static>(
    AxumState(state): AxumState<SharedState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> GateOutcome {
    let signature_header = headers
        .get("X-Hub-Signature")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    let candidates: Vec<&str> = signature_header.split_whitespace().collect();
    if !signature::verify(&state.config.core.secret, &body, &candidates) {
        info!("Ignoring event with incorrect signature");
        return GateOutcome::SilentlyRejected;
    }

    let event = headers.get("X-Github-Event").and_then(|v| v.to_str().ok());
    match screen(event, &body, &state.app.full_name()) {
        Decision::Ignore => {
            info!("Ignoring {:?} event", event);
            GateOutcome::Ignored
        }
        Decision::Reject(e) => {
            info!("Rejecting 'push' event: {}", e);
            GateOutcome::Rejected(e)
        }
        Decision::Proceed => {
            info!("Handling 'push' event for {}", state.app.full_name());

            // Builds for one application never overlap; later deliveries
            // queue on the lock.
            let _guard = state.build_lock.lock().await;
            match Pipeline::new(&state.app, &state.config, &state.runner)
                .update()
                .await
            {
                Ok(()) => GateOutcome::Completed,
                Err(e) => {
                    error!("Build failed: {}", e);
                    GateOutcome::Failed(e)
                }
            }
        }
    }
}
