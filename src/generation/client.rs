use crate::config::GenerationConfig;
use crate::error::{BookclubError, FailureReason, GenerationError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const PROBE_PROMPT: &str = "Hello";

/// Sampling options forwarded to the model runner
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub top_p: f32,
    pub num_predict: u32,
    pub num_ctx: u32,
}

impl From<&GenerationConfig> for GenerationOptions {
    fn from(config: &GenerationConfig) -> Self {
        GenerationOptions {
            temperature: config.temperature,
            top_p: config.top_p,
            num_predict: config.num_predict,
            num_ctx: config.num_ctx,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerationRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<GenerationOptions>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keep_alive: Option<String>,
}

impl GenerationRequest {
    /// Non-streaming request with server-side defaults
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        GenerationRequest {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
            options: None,
            keep_alive: None,
        }
    }

    /// Request carrying the configured model, sampling options and keep-alive
    pub fn from_config(config: &GenerationConfig, prompt: impl Into<String>) -> Self {
        GenerationRequest {
            options: Some(GenerationOptions::from(config)),
            keep_alive: Some(config.keep_alive.clone()).filter(|k| !k.is_empty()),
            ..GenerationRequest::new(config.model.clone(), prompt)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationResult {
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

/// HTTP client for an Ollama-style `/api/generate` endpoint
pub struct GenerationClient {
    http: Client,
    endpoint: String,
}

impl GenerationClient {
    pub fn new(endpoint: &str) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| BookclubError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(GenerationClient {
            http,
            endpoint: endpoint.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Send one prompt and return the generated text. Never retries.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
        timeout: Duration,
    ) -> std::result::Result<GenerationResult, GenerationError> {
        tracing::debug!(
            "POST {} model={} prompt_chars={} timeout={:?}",
            self.endpoint,
            request.model,
            request.prompt.chars().count(),
            timeout
        );

        let response = self
            .http
            .post(&self.endpoint)
            .json(request)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                let err = if e.is_timeout() {
                    GenerationError::new(
                        FailureReason::Timeout,
                        format!("no answer within {} seconds", timeout.as_secs_f32()),
                    )
                } else {
                    GenerationError::from_reqwest(&e)
                };
                tracing::warn!("Generation request failed ({}): {}", err.reason, e);
                err
            })?;

        let status = response.status();
        if status != StatusCode::OK {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!("Generation service returned status {}: {}", status, body.trim());
            return Err(GenerationError::new(
                FailureReason::BadResponse,
                format!("status code {}", status.as_u16()),
            ));
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!("Unreadable generation body: {}", e);
            GenerationError::new(FailureReason::BadResponse, "unreadable response body")
        })?;
        let parsed: GenerateResponse = serde_json::from_str(&body).map_err(|e| {
            GenerationError::new(FailureReason::BadResponse, format!("unexpected body: {}", e))
        })?;

        if parsed.response.trim().is_empty() {
            return Err(GenerationError::new(FailureReason::BadResponse, "empty response generated"));
        }

        Ok(GenerationResult { text: parsed.response })
    }

    /// Send a tiny prompt to confirm the service and model answer
    pub async fn check_availability(
        &self,
        model: &str,
        timeout: Duration,
    ) -> std::result::Result<(), GenerationError> {
        let request = GenerationRequest::new(model, PROBE_PROMPT);
        self.generate(&request, timeout).await.map(|_| ())
    }
}
