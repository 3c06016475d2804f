//! Effect handlers for the TUI runtime.
//!
//! Handlers are pure async functions that return a `UiEvent`. The runtime
//! spawns them with `spawn_effect` and forwards the result to the inbox.

use std::sync::Arc;

use maxx_core::chat;
use maxx_core::history::MessageLog;
use maxx_core::providers::ChatBackend;

use crate::events::UiEvent;

/// Sends the prompt and reports the outcome.
pub async fn submit_prompt(
    backend: Arc<dyn ChatBackend>,
    log: Option<MessageLog>,
    prompt: String,
) -> UiEvent {
    let result = chat::submit(backend.as_ref(), log.as_ref(), &prompt).await;
    UiEvent::SubmitFinished(result)
}

#[cfg(test)]
mod tests {
    use futures_util::future::BoxFuture;
    use maxx_core::providers::ProviderResult;
    use tempfile::tempdir;

    use super::*;

    struct EchoBackend;

    impl ChatBackend for EchoBackend {
        fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, ProviderResult<String>> {
            Box::pin(async move { Ok(format!("echo: {prompt}")) })
        }

        fn model(&self) -> &str {
            "echo"
        }
    }

    #[tokio::test]
    async fn submit_prompt_reports_response_and_records_it() {
        let dir = tempdir().unwrap();
        let log = MessageLog::new(dir.path().join("history.jsonl"));

        let event = submit_prompt(Arc::new(EchoBackend), Some(log.clone()), ".a.b".to_string()).await;

        match event {
            UiEvent::SubmitFinished(Ok(text)) => assert_eq!(text, "echo: .a.b"),
            other => panic!("unexpected event: {other:?}"),
        }
        assert_eq!(log.load().unwrap().len(), 1);
    }
}
