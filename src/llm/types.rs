//! Request and response types for text generation

use serde::{Deserialize, Serialize};

/// Sampling parameters understood by the inference endpoint
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SamplingParameters {
    pub max_length: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub top_p: f32,
    pub repetition_penalty: f32,
    pub no_repeat_ngram_size: u32,
}

impl SamplingParameters {
    /// Settings for the primary conversational model
    pub fn conversational() -> Self {
        Self {
            max_length: 300,
            temperature: 0.9,
            do_sample: true,
            top_p: 0.95,
            repetition_penalty: 1.2,
            no_repeat_ngram_size: 4,
        }
    }

    /// Shorter, more conservative settings for the alternative model
    pub fn compact() -> Self {
        Self {
            max_length: 150,
            temperature: 0.8,
            do_sample: true,
            top_p: 0.9,
            repetition_penalty: 1.1,
            no_repeat_ngram_size: 3,
        }
    }
}

/// Generation request
#[derive(Debug, Clone)]
pub struct LlmRequest {
    pub prompt: String,
}

impl LlmRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Generated reply, already cut down to Pippy's turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmResponse {
    pub text: String,
}

/// Inference API request body
#[derive(Debug, Serialize)]
pub(crate) struct InferencePayload<'a> {
    pub inputs: &'a str,
    pub parameters: SamplingParameters,
}

/// One element of the inference API response array
#[derive(Debug, Deserialize)]
pub(crate) struct GeneratedText {
    pub generated_text: String,
}

/// Error body the inference API returns while a model is loading or failing
#[derive(Debug, Deserialize)]
pub(crate) struct InferenceError {
    pub error: String,
    #[serde(default)]
    pub estimated_time: Option<f64>,
}
