pub mod provider;
pub mod providers;
pub mod report;
pub mod types;

pub use provider::{CompletionProvider, CompletionRequest, ProviderError};
pub use providers::ChatCompletionsProvider;
pub use report::{PromptRequest, submit_prompt};
pub use types::StreamChunk;
