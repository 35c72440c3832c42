//! Model runtime backends
//!
//! A runtime takes a model name and a prompt and returns generated text.
//! Timeouts are not the runtime's concern; callers bound the future and
//! dropping it must cancel the in-flight work.

mod command;
mod ollama;

pub use command::CommandRuntime;
pub use ollama::{OllamaHttpRuntime, DEFAULT_OLLAMA_URL};

use async_trait::async_trait;
use hamcaller_core::Result;

/// Something that can run a named model against a prompt
#[async_trait]
pub trait ModelRuntime: Send + Sync {
    /// Run `model` on `prompt` and return the generated text
    async fn generate(&self, model: &str, prompt: &str) -> Result<String>;

    /// Check the runtime is installed and serving
    async fn probe(&self) -> Result<()>;

    /// Short backend name for logs and health output
    fn name(&self) -> &str;
}

/// Cut `text` to at most `max` characters, marking the cut
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
