//! Registry of configured generation models

use super::{HuggingFaceService, LlmService, LoggingService, SamplingParameters};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/microsoft/DialoGPT-large";
pub const DEFAULT_ALT_MODEL_URL: &str =
    "https://api-inference.huggingface.co/models/microsoft/DialoGPT-medium";

/// Overall wait for one generation attempt chain
pub const DEFAULT_GENERATION_TIMEOUT: Duration = Duration::from_millis(8000);

/// Configuration for the generation models
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model_url: String,
    /// Tried when the primary model fails; `None` disables it
    pub alt_model_url: Option<String>,
    pub generation_timeout: Duration,
    /// Skip remote generation entirely
    pub disabled: bool,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model_url: DEFAULT_MODEL_URL.to_string(),
            alt_model_url: Some(DEFAULT_ALT_MODEL_URL.to_string()),
            generation_timeout: DEFAULT_GENERATION_TIMEOUT,
            disabled: false,
        }
    }
}

impl LlmConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let generation_timeout = lookup("PIPPY_GENERATION_TIMEOUT_MS")
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map_or(defaults.generation_timeout, Duration::from_millis);
        let alt_model_url = match lookup("PIPPY_ALT_MODEL_URL") {
            Some(url) if url.trim().is_empty() => None,
            Some(url) => Some(url),
            None => defaults.alt_model_url,
        };

        Self {
            api_key: lookup("HUGGING_FACE_API_KEY").filter(|k| !k.is_empty()),
            model_url: lookup("PIPPY_MODEL_URL")
                .filter(|u| !u.trim().is_empty())
                .unwrap_or(defaults.model_url),
            alt_model_url,
            generation_timeout,
            disabled: lookup("PIPPY_DISABLE_GENERATION").is_some(),
        }
    }
}

/// Generation models in the order they are tried
pub struct ModelRegistry {
    services: Vec<Arc<dyn LlmService>>,
}

impl ModelRegistry {
    /// Create an empty registry (generation disabled)
    pub fn new_empty() -> Self {
        Self {
            services: Vec::new(),
        }
    }

    pub fn new(config: &LlmConfig) -> Self {
        if config.disabled {
            return Self::new_empty();
        }

        let mut services = Vec::new();
        let candidates = std::iter::once((config.model_url.as_str(), SamplingParameters::conversational()))
            .chain(
                config
                    .alt_model_url
                    .as_deref()
                    .map(|url| (url, SamplingParameters::compact())),
            );

        for (url, parameters) in candidates {
            match HuggingFaceService::new(
                url,
                config.api_key.clone(),
                parameters,
                config.generation_timeout,
            ) {
                Ok(service) => {
                    let service: Arc<dyn LlmService> = Arc::new(service);
                    services.push(Arc::new(LoggingService::new(service)) as Arc<dyn LlmService>);
                }
                Err(e) => tracing::warn!(url, error = %e, "Skipping generation model"),
            }
        }

        Self { services }
    }

    /// Build a registry from already constructed services, in order
    pub fn from_services(services: Vec<Arc<dyn LlmService>>) -> Self {
        Self { services }
    }

    /// Models in the order they should be tried
    pub fn models(&self) -> &[Arc<dyn LlmService>] {
        &self.services
    }

    pub fn available_models(&self) -> Vec<String> {
        self.services
            .iter()
            .map(|s| s.model_id().to_string())
            .collect()
    }

    pub fn has_models(&self) -> bool {
        !self.services.is_empty()
    }
}
