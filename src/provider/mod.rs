//! Completion endpoint boundary.
//!
//! The agent loop only knows the [`CompletionClient`] trait: hand over the
//! transcript, get back one assistant message. [`OpenAiClient`] is the real
//! implementation; tests drive the loop with a scripted client instead.

mod client;

pub use client::OpenAiClient;

use thiserror::Error;

use crate::transcript::Entry;

/// Failure of a single completion round-trip. No retries are attempted.
#[derive(Debug, Error)]
pub enum CompletionError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("invalid API response: {0}")]
    InvalidResponse(String),
}

/// Sends the full transcript and returns the assistant's raw reply.
///
/// Implementations must ask the endpoint for a single JSON object. An empty
/// string is a valid return value; deciding what it means is the caller's job.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    async fn complete(&self, transcript: &[Entry]) -> Result<String, CompletionError>;
}
