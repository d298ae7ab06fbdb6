//! Text generation backends.
//!
//! The engine only needs "system instruction + user context in, raw text
//! out". Every failure is a [`GenerationError`]; the engine does not branch
//! on the variant, it logs it and falls back.

mod gemini;

pub use gemini::{GeminiGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL};

use async_trait::async_trait;
use thiserror::Error;

/// Why a generation attempt produced no text.
#[derive(Error, Debug)]
pub enum GenerationError {
    /// Backend not configured (missing credentials)
    #[error("generator unavailable: {0}")]
    Unavailable(String),

    /// Request could not be sent or the body could not be read
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Backend answered with an error status
    #[error("backend error ({status}): {message}")]
    Backend { status: u16, message: String },

    /// Backend answered successfully but without any text
    #[error("backend returned no text")]
    EmptyResponse,

    /// No answer within the configured bound
    #[error("generation timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u64 },
}

/// A capability that turns a prompt into raw text.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Short identifier for logs and health output.
    fn name(&self) -> &str;

    async fn generate(
        &self,
        system_instruction: &str,
        user_context: &str,
    ) -> Result<String, GenerationError>;
}
