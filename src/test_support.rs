//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc::Sender;

use crate::core::form::FormDraft;
use crate::core::state::App;
use crate::inference::{CompletionProvider, CompletionRequest, ProviderError, StreamChunk};
use crate::leads::{LeadCapture, LeadError, LeadOutcome};

/// A no-op provider for tests that don't need real API calls.
pub struct NoopProvider;

#[async_trait]
impl CompletionProvider for NoopProvider {
    fn name(&self) -> &str {
        "noop"
    }

    async fn stream_completion(
        &self,
        _request: CompletionRequest<'_>,
        _sender: Sender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// Replays fixed content chunks, then `Completed`. Remembers every prompt it saw.
pub struct ScriptedProvider {
    chunks: Vec<String>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedProvider {
    pub fn new(chunks: &[&str]) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn stream_completion(
        &self,
        request: CompletionRequest<'_>,
        sender: Sender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        self.prompts.lock().unwrap().push(request.prompt.to_string());
        for chunk in &self.chunks {
            sender
                .send(StreamChunk::Content(chunk.clone()))
                .await
                .map_err(|_| ProviderError::ChannelClosed)?;
        }
        sender
            .send(StreamChunk::Completed)
            .await
            .map_err(|_| ProviderError::ChannelClosed)
    }
}

/// Sends some content, then fails with an HTTP status.
pub struct FailingProvider {
    chunks: Vec<String>,
    status: u16,
}

impl FailingProvider {
    pub fn after(chunks: &[&str], status: u16) -> Self {
        Self {
            chunks: chunks.iter().map(|c| c.to_string()).collect(),
            status,
        }
    }
}

#[async_trait]
impl CompletionProvider for FailingProvider {
    fn name(&self) -> &str {
        "failing"
    }

    async fn stream_completion(
        &self,
        _request: CompletionRequest<'_>,
        sender: Sender<StreamChunk>,
    ) -> Result<(), ProviderError> {
        for chunk in &self.chunks {
            sender
                .send(StreamChunk::Content(chunk.clone()))
                .await
                .map_err(|_| ProviderError::ChannelClosed)?;
        }
        Err(ProviderError::Api {
            status: self.status,
            message: "scripted failure".to_string(),
        })
    }
}

/// Accepts every record and keeps a copy.
#[derive(Default)]
pub struct RecordingLeadCapture {
    records: Mutex<Vec<FormDraft>>,
}

impl RecordingLeadCapture {
    pub fn records(&self) -> Vec<FormDraft> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl LeadCapture for RecordingLeadCapture {
    fn name(&self) -> &str {
        "recording"
    }

    async fn submit(&self, record: &FormDraft) -> Result<LeadOutcome, LeadError> {
        self.records.lock().unwrap().push(record.clone());
        Ok(LeadOutcome::Accepted)
    }
}

/// Creates a test App with no-op services.
pub fn test_app() -> App {
    App::new(
        Arc::new(NoopProvider),
        Arc::new(RecordingLeadCapture::default()),
        "test-model".to_string(),
    )
}
