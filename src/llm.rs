//! Remote text generation
//!
//! Provides a common interface over the hosted conversational models used
//! as an optional source of casual replies.

mod error;
mod huggingface;
mod registry;
mod types;

pub use error::{LlmError, LlmErrorKind};
pub use huggingface::HuggingFaceService;
pub use registry::{LlmConfig, ModelRegistry};
pub use types::{LlmRequest, LlmResponse, SamplingParameters};

use async_trait::async_trait;
use std::sync::Arc;

/// Common interface for generation providers
#[async_trait]
pub trait LlmService: Send + Sync {
    /// Generate a reply for the prompt
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError>;

    /// Get the model ID
    fn model_id(&self) -> &str;
}

/// Logging wrapper for generation services
pub struct LoggingService {
    inner: Arc<dyn LlmService>,
    model_id: String,
}

impl LoggingService {
    pub fn new(inner: Arc<dyn LlmService>) -> Self {
        let model_id = inner.model_id().to_string();
        Self { inner, model_id }
    }
}

#[async_trait]
impl LlmService for LoggingService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let start = std::time::Instant::now();
        let result = self.inner.complete(request).await;
        let duration = start.elapsed();

        match &result {
            Ok(response) => {
                tracing::info!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    prompt_chars = request.prompt.len(),
                    reply_chars = response.text.len(),
                    "Generation request completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    model = %self.model_id,
                    duration_ms = %duration.as_millis(),
                    error = %e.message,
                    retryable = e.kind.is_retryable(),
                    retry_after = ?e.retry_after,
                    "Generation request failed"
                );
            }
        }

        result
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
