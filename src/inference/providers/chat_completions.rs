//! Chat Completions provider (OpenAI dialect).
//!
//! OpenAI, OpenRouter and LM Studio all accept the same request shape:
//! - one `user` message carrying the whole prompt
//! - `stream: true`, answered with SSE `data:` lines
//! - text in `choices[].delta.content`, `data: [DONE]` as the end marker
//!
//! OpenRouter may also push `data: {"error": {...}}` after a 200 status when
//! the upstream model fails mid-generation.

use async_trait::async_trait;
use futures::StreamExt;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::Sender;

use crate::Provider;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError, StreamChunk};

// ============================================================================
// Chat Completions API Types
// ============================================================================

#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "lowercase")]
enum Role {
    User,
}

#[derive(Serialize, Debug, Clone)]
struct RequestMessage {
    role: Role,
    content: String,
}

/// The request body for the Chat Completions API
#[derive(Serialize, Debug)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<RequestMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// One SSE `data:` payload.
#[derive(Deserialize, Debug)]
struct ChunkEvent {
    #[serde(default)]
    choices: Vec<ChunkChoice>,
    #[serde(default)]
    error: Option<ErrorBody>,
}

#[derive(Deserialize, Debug)]
struct ChunkChoice {
    #[serde(default)]
    delta: Delta,
}

#[derive(Deserialize, Debug, Default)]
struct Delta {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// What a single `data:` payload means for the stream.
#[derive(Debug, PartialEq)]
enum DataEvent {
    Text(String),
    Done,
    Failed(String),
    /// Role-only deltas, keep-alives, usage blocks.
    Ignored,
}

fn parse_data(data: &str) -> Result<DataEvent, ProviderError> {
    if data == "[DONE]" {
        return Ok(DataEvent::Done);
    }

    let event: ChunkEvent =
        serde_json::from_str(data).map_err(|e| ProviderError::Parse(format!("{e}: {data}")))?;

    if let Some(error) = event.error {
        return Ok(DataEvent::Failed(error.message));
    }

    let text: String = event
        .choices
        .into_iter()
        .filter_map(|choice| choice.delta.content)
        .collect();

    if text.is_empty() {
        Ok(DataEvent::Ignored)
    } else {
        Ok(DataEvent::Text(text))
    }
}

/// Pops the next complete line off the byte buffer, decoding it as UTF-8.
///
/// Works on bytes so a multi-byte character split across network chunks
/// is only decoded once both halves have arrived.
fn next_line(buffer: &mut Vec<u8>) -> Option<String> {
    let pos = buffer.iter().position(|&b| b == b'\n')?;
    let line: Vec<u8> = buffer.drain(..=pos).collect();
    Some(String::from_utf8_lossy(&line).trim().to_string())
}

// ============================================================================
// Provider Implementation
// ============================================================================

pub struct ChatCompletionsProvider {
    provider: Provider,
    api_key: Option<String>,
    base_url: String,
    client: reqwest::Client,
}

impl ChatCompletionsProvider {
    /// Creates a new provider.
    ///
    /// # Arguments
    /// * `provider` - Which backend this is (used for naming and the default URL)
    /// * `api_key` - Bearer token; `None` for local servers
    /// * `base_url` - Optional custom base URL
    pub fn new(provider: Provider, api_key: Option<String>, base_url: Option<String>) -> Self {
        Self {
            provider,
            api_key,
            base_url: base_url.unwrap_or_else(|| provider.default_base_url().to_string()),
            client: reqwest::Client::new(),
        }
    }

    /// Sends a request to the completions endpoint and returns the response.
    async fn send_request(
        &self,
        request: &ChatCompletionsRequest,
    ) -> Result<reqwest::Response, ProviderError> {
        if self.base_url.trim().is_empty() {
            return Err(ProviderError::Config(format!(
                "{} base URL is empty",
                self.provider.name()
            )));
        }

        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));

        let mut builder = self.client.post(&url).json(request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        debug!("{} response status: {}", self.provider.name(), response.status());

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("{} API error: {} - {}", self.provider.name(), status, err_body);
            return Err(ProviderError::Api {
                status,
                message: err_body,
            });
        }

        Ok(response)
    }
}

#[async_trait]
impl CompletionProvider for ChatCompletionsProvider {
    fn name(&self) -> &str {
        self.provider.name()
    }

    async fn stream_completion(
        &self,
        request: CompletionRequest<'_>,
        sender: Sender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        let body = ChatCompletionsRequest {
            model: request.model.to_string(),
            messages: vec![RequestMessage {
                role: Role::User,
                content: request.prompt.to_string(),
            }],
            stream: Some(true),
            max_tokens: request.max_output_tokens,
        };

        info!(
            "{} chat completion request: model={}, prompt_len={}",
            self.provider.name(),
            request.model,
            request.prompt.len()
        );

        let response = self.send_request(&body).await?;

        let mut bytes = response.bytes_stream();
        let mut buffer: Vec<u8> = Vec::new();
        let mut total_content_len = 0usize;
        let mut chunk_count = 0usize;

        while let Some(chunk) = bytes.next().await {
            let chunk = chunk.map_err(|e| ProviderError::Network(e.to_string()))?;
            debug!("Raw chunk received: {} bytes", chunk.len());
            buffer.extend_from_slice(&chunk);

            while let Some(line) = next_line(&mut buffer) {
                // Blank separators, `event:` lines and `: keep-alive` comments carry nothing for us
                let Some(data) = line.strip_prefix("data:").map(str::trim_start) else {
                    if !line.is_empty() {
                        debug!("Skipping SSE line: {}", line);
                    }
                    continue;
                };

                match parse_data(data) {
                    Ok(DataEvent::Text(text)) => {
                        chunk_count += 1;
                        total_content_len += text.len();
                        debug!(
                            "Sending Content chunk (len={}, total={})",
                            text.len(),
                            total_content_len
                        );
                        if sender.send(StreamChunk::Content(text)).await.is_err() {
                            warn!("Content chunk send failed: receiver dropped");
                            return Err(ProviderError::ChannelClosed);
                        }
                    }
                    Ok(DataEvent::Done) => {
                        info!(
                            "Stream complete: {} chunks, {} content bytes",
                            chunk_count, total_content_len
                        );
                        if sender.send(StreamChunk::Completed).await.is_err() {
                            warn!("Completed send failed: receiver dropped");
                            return Err(ProviderError::ChannelClosed);
                        }
                        return Ok(());
                    }
                    Ok(DataEvent::Failed(message)) => {
                        warn!("{} reported a mid-stream error: {}", self.provider.name(), message);
                        return Err(ProviderError::Stream(message));
                    }
                    Ok(DataEvent::Ignored) => {}
                    Err(e) => warn!("Skipping malformed SSE data: {}", e),
                }
            }
        }

        info!(
            "Stream ended without [DONE]: {} chunks, {} content bytes",
            chunk_count, total_content_len
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_data_extracts_delta_content() {
        let data = r#"{"id":"c1","choices":[{"index":0,"delta":{"content":"Avainsanat"}}]}"#;
        assert_eq!(parse_data(data).unwrap(), DataEvent::Text("Avainsanat".to_string()));
    }

    #[test]
    fn parse_data_done_marker() {
        assert_eq!(parse_data("[DONE]").unwrap(), DataEvent::Done);
    }

    #[test]
    fn parse_data_role_only_delta_is_ignored() {
        let data = r#"{"choices":[{"index":0,"delta":{"role":"assistant"}}]}"#;
        assert_eq!(parse_data(data).unwrap(), DataEvent::Ignored);
    }

    #[test]
    fn parse_data_error_payload() {
        let data = r#"{"error":{"message":"Provider returned error","code":502}}"#;
        assert_eq!(
            parse_data(data).unwrap(),
            DataEvent::Failed("Provider returned error".to_string())
        );
    }

    #[test]
    fn parse_data_rejects_garbage() {
        assert!(matches!(parse_data("{not json"), Err(ProviderError::Parse(_))));
    }

    #[test]
    fn next_line_waits_for_newline() {
        let mut buffer = b"data: {\"a\"".to_vec();
        assert_eq!(next_line(&mut buffer), None);
        buffer.extend_from_slice(b":1}\r\nrest");
        assert_eq!(next_line(&mut buffer).as_deref(), Some("data: {\"a\":1}"));
        assert_eq!(buffer, b"rest");
    }

    #[test]
    fn next_line_keeps_split_multibyte_chars_intact() {
        // "ä" is 0xC3 0xA4; deliver it split across two network chunks
        let mut buffer = vec![b'k', 0xC3];
        assert_eq!(next_line(&mut buffer), None);
        buffer.extend_from_slice(&[0xA4, b'\n']);
        assert_eq!(next_line(&mut buffer).as_deref(), Some("kä"));
    }

    #[test]
    fn request_serializes_single_user_message() {
        let request = ChatCompletionsRequest {
            model: "test".to_string(),
            messages: vec![RequestMessage {
                role: Role::User,
                content: "prompt".to_string(),
            }],
            stream: Some(true),
            max_tokens: None,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""role":"user""#));
        assert!(json.contains(r#""content":"prompt""#));
        assert!(json.contains(r#""stream":true"#));
        assert!(!json.contains("max_tokens"));
    }

    #[test]
    fn provider_uses_default_base_url() {
        let provider = ChatCompletionsProvider::new(Provider::LmStudio, None, None);
        assert_eq!(provider.base_url, "http://localhost:1234/v1");
        assert_eq!(provider.name(), "lmstudio");
    }

    #[tokio::test]
    async fn empty_base_url_is_config_error() {
        let provider = ChatCompletionsProvider::new(Provider::OpenAi, None, Some(" ".to_string()));
        let (tx, _rx) = tokio::sync::mpsc::channel(4);
        let request = CompletionRequest {
            prompt: "My company: Acme",
            model: "test-model",
            max_output_tokens: None,
        };

        let result = provider.stream_completion(request, tx).await;

        assert!(matches!(result, Err(ProviderError::Config(msg)) if msg.contains("base URL")));
    }
}
