//! Chat providers.

pub mod openai;
pub mod shared;

use futures_util::future::BoxFuture;
pub use shared::{ProviderError, ProviderErrorKind, ProviderResult};

/// Something that can answer a prompt.
///
/// The TUI and the `ask` command hold one of these and pass it into the
/// submission path explicitly.
pub trait ChatBackend: Send + Sync {
    /// Sends the raw prompt and resolves to the response text.
    fn complete<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, ProviderResult<String>>;

    /// Model identifier, for display.
    fn model(&self) -> &str;
}
