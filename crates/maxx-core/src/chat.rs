//! Prompt submission.
//!
//! Shared by the TUI and `maxx ask`: send the raw prompt to a backend, record
//! the exchange, hand back the text.

use tracing::{info, warn};

use crate::history::{Exchange, MessageLog};
use crate::providers::{ChatBackend, ProviderError, ProviderErrorKind, ProviderResult};

/// Sends `prompt` and returns the response text.
///
/// An empty prompt is rejected before any request is made. Whitespace is
/// sent as typed. A failure to record the exchange is logged and does not
/// fail the submission.
///
/// # Errors
/// Returns the backend's error, or an `ApiError` for an empty prompt.
pub async fn submit(
    backend: &dyn ChatBackend,
    log: Option<&MessageLog>,
    prompt: &str,
) -> ProviderResult<String> {
    if prompt.is_empty() {
        return Err(ProviderError::new(
            ProviderErrorKind::ApiError,
            "Prompt is empty",
        ));
    }

    info!(model = backend.model(), chars = prompt.chars().count(), "submitting prompt");

    let response = match backend.complete(prompt).await {
        Ok(response) => response,
        Err(e) => {
            warn!(kind = %e.kind, error = %e, "prompt failed");
            return Err(e);
        }
    };

    if let Some(log) = log
        && let Err(e) = log.append(&Exchange::new(prompt, response.clone()))
    {
        warn!(error = %format!("{e:#}"), "failed to record exchange");
    }

    Ok(response)
}
