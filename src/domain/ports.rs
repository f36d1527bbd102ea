use crate::core::prompt::ChatPrompt;
use crate::utils::error::Result;
use async_trait::async_trait;

/// Chat-completion port. Implementors encapsulate transport and
/// vendor-specific API details; the pipeline sees only the assistant's
/// reply text.
#[async_trait]
pub trait ChatCompleter: Send + Sync {
    async fn complete(&self, prompt: &ChatPrompt) -> Result<String>;
}
