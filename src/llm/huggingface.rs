//! Hugging Face inference API client

use super::types::{GeneratedText, InferenceError, InferencePayload, SamplingParameters};
use super::{LlmError, LlmRequest, LlmResponse, LlmService};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Replies shorter than this are treated as malformed
const MIN_REPLY_CHARS: usize = 15;

const SPEAKER_TAG: &str = "Pippy:";
const NEXT_USER_TAG: &str = "\nUser:";

pub struct HuggingFaceService {
    client: Client,
    url: String,
    api_key: Option<String>,
    model_id: String,
    parameters: SamplingParameters,
}

impl HuggingFaceService {
    pub fn new(
        url: impl Into<String>,
        api_key: Option<String>,
        parameters: SamplingParameters,
        request_timeout: Duration,
    ) -> Result<Self, LlmError> {
        let url = url.into();
        let client = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LlmError::unknown(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            model_id: model_id_from_url(&url),
            client,
            url,
            api_key: api_key.filter(|k| !k.is_empty()),
            parameters,
        })
    }

    fn classify_error(status: reqwest::StatusCode, body: &str) -> LlmError {
        let message = serde_json::from_str::<InferenceError>(body)
            .map_or_else(|_| body.to_string(), |e| e.error);
        match status.as_u16() {
            401 | 403 => LlmError::auth(format!("Authentication failed: {message}")),
            429 => LlmError::rate_limit(format!("Rate limited: {message}")),
            400 | 422 => LlmError::invalid_request(format!("Invalid request: {message}")),
            503 => {
                // Model still loading; the API says how long to wait
                let err = LlmError::server_error(format!("Model unavailable: {message}"));
                match serde_json::from_str::<InferenceError>(body)
                    .ok()
                    .and_then(|e| e.estimated_time)
                {
                    Some(seconds) if seconds.is_finite() && seconds > 0.0 => {
                        err.with_retry_after(Duration::from_secs_f64(seconds))
                    }
                    _ => err,
                }
            }
            500..=599 => LlmError::server_error(format!("Server error: {message}")),
            _ => LlmError::unknown(format!("HTTP {status}: {message}")),
        }
    }
}

/// Last path segment, e.g. `microsoft/DialoGPT-large` -> `DialoGPT-large`
fn model_id_from_url(url: &str) -> String {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .unwrap_or("huggingface")
        .to_string()
}

/// Cut Pippy's reply out of the full generated text.
///
/// The model echoes the prompt, so the reply is whatever follows the final
/// `Pippy:` of the prompt, up to the next `User:` turn it invents.
pub(crate) fn extract_reply(prompt: &str, generated: &str) -> Result<String, LlmError> {
    let continuation = match generated.strip_prefix(prompt) {
        Some(rest) => rest,
        None => generated
            .rsplit_once(SPEAKER_TAG)
            .map_or(generated, |(_, rest)| rest),
    };
    let reply = continuation
        .split(NEXT_USER_TAG)
        .next()
        .unwrap_or_default()
        .trim();

    if reply.chars().count() < MIN_REPLY_CHARS {
        return Err(LlmError::malformed(format!(
            "Reply too short ({} chars)",
            reply.chars().count()
        )));
    }
    Ok(reply.to_string())
}

#[async_trait]
impl LlmService for HuggingFaceService {
    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        let payload = InferencePayload {
            inputs: &request.prompt,
            parameters: self.parameters,
        };

        let mut builder = self.client.post(&self.url).json(&payload);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                LlmError::timeout(format!("Request timeout: {e}"))
            } else if e.is_connect() {
                LlmError::network(format!("Connection failed: {e}"))
            } else {
                LlmError::unknown(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| LlmError::network(format!("Failed to read response: {e}")))?;

        if !status.is_success() {
            return Err(Self::classify_error(status, &body));
        }

        let generated: Vec<GeneratedText> = serde_json::from_str(&body)
            .map_err(|e| LlmError::malformed(format!("Failed to parse response: {e}")))?;
        let first = generated
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::malformed("Empty response array"))?;

        let text = extract_reply(&request.prompt, &first.generated_text)?;
        Ok(LlmResponse { text })
    }

    fn model_id(&self) -> &str {
        &self.model_id
    }
}
