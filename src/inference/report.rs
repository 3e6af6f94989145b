//! # Report Stream
//!
//! One call that takes the prompt and hands back the assistant's reply as a
//! stream of chunks. The provider runs on its own tokio task; the stream
//! yields its chunks in order and then, if the provider failed, one final
//! `Err`.
//!
//! ```text
//! submit_prompt(provider, request)
//!     ├── Ok(Content("..."))   (zero or more)
//!     ├── Ok(Completed)        (when the provider saw its end marker)
//!     └── Err(ProviderError)   (at most once, always last)
//! ```

use std::sync::Arc;

use futures::stream::{self, Stream, StreamExt};
use log::{debug, warn};
use tokio::sync::mpsc;

use crate::inference::{CompletionProvider, CompletionRequest, ProviderError, StreamChunk};

/// Chunks buffered between the provider task and the consumer.
const CHANNEL_CAPACITY: usize = 100;

/// Owned request data, so the provider task can outlive the caller's borrows.
#[derive(Debug, Clone)]
pub struct PromptRequest {
    pub prompt: String,
    pub model: String,
    pub max_output_tokens: Option<u32>,
}

/// Streams the completion for `request`. Must be called inside a tokio runtime.
pub fn submit_prompt(
    provider: Arc<dyn CompletionProvider>,
    request: PromptRequest,
) -> impl Stream<Item = Result<StreamChunk, ProviderError>> + Send + 'static {
    let (chunk_tx, chunk_rx) = mpsc::channel::<StreamChunk>(CHANNEL_CAPACITY);

    debug!(
        "Dispatching prompt to {} (model={}, len={})",
        provider.name(),
        request.model,
        request.prompt.len()
    );

    let task = tokio::spawn(async move {
        let completion = CompletionRequest {
            prompt: &request.prompt,
            model: &request.model,
            max_output_tokens: request.max_output_tokens,
        };
        provider.stream_completion(completion, chunk_tx).await
    });

    // The sender lives inside the task, so this ends exactly when the provider returns
    let chunks = stream::unfold(chunk_rx, |mut rx| async move {
        rx.recv()
            .await
            .map(|chunk| (Ok::<StreamChunk, ProviderError>(chunk), rx))
    });

    let outcome = stream::once(async move {
        let failure: Option<Result<StreamChunk, ProviderError>> = match task.await {
            Ok(Ok(())) => None,
            Ok(Err(e)) => Some(Err(e)),
            Err(join_error) => {
                warn!("Provider task did not finish: {}", join_error);
                Some(Err(ProviderError::Network(format!(
                    "provider task failed: {join_error}"
                ))))
            }
        };
        failure
    })
    .filter_map(futures::future::ready);

    chunks.chain(outcome)
}
