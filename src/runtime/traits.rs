//! Trait abstractions for runtime I/O
//!
//! The orchestrator only sees `Generator`, so tests can swap in mocks.

use crate::llm::{LlmError, LlmRequest, ModelRegistry};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Why a generation attempt produced nothing usable
#[derive(Debug, Error)]
pub enum GenerateError {
    #[error("generation is not configured")]
    Unavailable,
    #[error(transparent)]
    Llm(#[from] LlmError),
}

/// Source of free-form candidate replies
#[async_trait]
pub trait Generator: Send + Sync {
    /// Produce a candidate reply for the prompt
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError>;

    /// False when calling `generate` is pointless
    fn is_available(&self) -> bool {
        true
    }
}

#[async_trait]
impl<T: Generator + ?Sized> Generator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        (**self).generate(prompt).await
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

/// Adapter that tries each registered model in order
pub struct RegistryGenerator {
    registry: Arc<ModelRegistry>,
}

impl RegistryGenerator {
    pub fn new(registry: Arc<ModelRegistry>) -> Self {
        Self { registry }
    }
}

#[async_trait]
impl Generator for RegistryGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, GenerateError> {
        let request = LlmRequest::new(prompt);
        let mut last_error = None;

        for model in self.registry.models() {
            match model.complete(&request).await {
                Ok(response) => return Ok(response.text),
                Err(e) => {
                    tracing::debug!(
                        model = model.model_id(),
                        error = %e,
                        retry_after = ?e.retry_after,
                        "Trying next model"
                    );
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.map_or(GenerateError::Unavailable, GenerateError::Llm))
    }

    fn is_available(&self) -> bool {
        self.registry.has_models()
    }
}

/// Generator used when remote generation is switched off
pub struct DisabledGenerator;

#[async_trait]
impl Generator for DisabledGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        Err(GenerateError::Unavailable)
    }

    fn is_available(&self) -> bool {
        false
    }
}
