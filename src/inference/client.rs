//! HTTP client for the Ollama generation API.
//!
//! Owns the connection to the inference server and exposes three operations:
//! availability probing, model enumeration, and single-shot text generation.
//! One attempt per call — no retries. Safe for concurrent use: the only
//! shared state is reqwest's own connection pool.

use reqwest::Client as HttpClient;

use super::config::InferenceConfig;
use super::errors::InferenceError;
use super::types::{
    GenerateRequest, GenerateResponse, GenerationOutcome, ModelDescriptor, TagsResponse,
};

// ─── OllamaClient ────────────────────────────────────────────────────────────

/// Client for a locally hosted Ollama-style inference server.
///
/// Created once per process from [`InferenceConfig`] and shared by reference.
pub struct OllamaClient {
    /// HTTP client for probes and model listing (short timeout).
    http_probe: HttpClient,
    /// HTTP client for generation calls (long timeout).
    http_generate: HttpClient,
    config: InferenceConfig,
}

impl OllamaClient {
    /// Create a new client from the given configuration.
    ///
    /// Builds both HTTP clients up front. Does NOT check connectivity — that
    /// is what [`is_available`](Self::is_available) is for.
    pub fn from_config(config: InferenceConfig) -> Result<Self, InferenceError> {
        let http_probe = HttpClient::builder()
            .connect_timeout(config.probe_timeout())
            .timeout(config.probe_timeout())
            .build()
            .map_err(|e| InferenceError::ConfigError {
                reason: format!("failed to build probe HTTP client: {e}"),
            })?;

        let http_generate = HttpClient::builder()
            .connect_timeout(config.probe_timeout())
            .timeout(config.generate_timeout())
            .build()
            .map_err(|e| InferenceError::ConfigError {
                reason: format!("failed to build generation HTTP client: {e}"),
            })?;

        Ok(Self {
            http_probe,
            http_generate,
            config,
        })
    }

    /// The base URL of the inference server.
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// The configured default model name.
    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }

    // ─── Availability Probe ──────────────────────────────────────────────

    /// Check whether the inference server is running and reachable.
    ///
    /// Sends a lightweight `GET /api/tags` with the probe timeout. Returns
    /// `false` on any network error, timeout, or non-2xx status. Never errors.
    pub async fn is_available(&self) -> bool {
        let url = format!("{}/api/tags", self.config.base_url);

        match self.http_probe.get(&url).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    // ─── Model Listing ───────────────────────────────────────────────────

    /// List the models installed on the inference server.
    ///
    /// Returns an empty list on any failure — callers render "no models"
    /// rather than handling an error.
    pub async fn list_models(&self) -> Vec<ModelDescriptor> {
        match self.try_list_models().await {
            Ok(models) => models,
            Err(e) => {
                tracing::warn!(error = %e, "model listing failed, returning empty list");
                Vec::new()
            }
        }
    }

    async fn try_list_models(&self) -> Result<Vec<ModelDescriptor>, InferenceError> {
        let url = format!("{}/api/tags", self.config.base_url);

        let response = self.http_probe.get(&url).send().await.map_err(|e| {
            InferenceError::ConnectionFailed {
                endpoint: url.clone(),
                reason: e.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(InferenceError::HttpError {
                status: status.as_u16(),
                body,
            });
        }

        let tags: TagsResponse =
            response
                .json()
                .await
                .map_err(|e| InferenceError::MalformedResponse {
                    reason: format!("failed to decode tags response: {e}"),
                })?;

        Ok(tags
            .models
            .unwrap_or_default()
            .into_iter()
            .map(|m| ModelDescriptor {
                name: m.name,
                size_bytes: m.size,
            })
            .collect())
    }

    // ─── Generation ──────────────────────────────────────────────────────

    /// Issue a single non-streaming generation call.
    ///
    /// Every failure class maps to a [`GenerationOutcome`] variant; this
    /// method never errors and never retries.
    pub async fn generate(
        &self,
        prompt: &str,
        model: &str,
        system: Option<&str>,
    ) -> GenerationOutcome {
        match self.try_generate(prompt, model, system).await {
            Ok(text) => GenerationOutcome::Success(text),
            Err(InferenceError::Timeout { duration_secs }) => {
                tracing::warn!(model, duration_secs, "generation timed out");
                GenerationOutcome::Timeout
            }
            Err(InferenceError::HttpError { status, body }) => {
                tracing::warn!(model, status, "generation returned an error status");
                GenerationOutcome::ServerError { status, body }
            }
            Err(e) => {
                tracing::warn!(model, error = %e, "generation transport failure");
                GenerationOutcome::Unavailable
            }
        }
    }

    /// Attempt one generation request against the server.
    async fn try_generate(
        &self,
        prompt: &str,
        model: &str,
        system: Option<&str>,
    ) -> Result<String, InferenceError> {
        let url = format!("{}/api/generate", self.config.base_url);

        let body = GenerateRequest {
            model: model.to_string(),
            prompt: prompt.to_string(),
            system: system.map(str::to_string),
            stream: false,
        };

        // Log request metadata, not the prompt text — prompts can be huge
        tracing::info!(
            url = %url,
            model = %body.model,
            prompt_chars = body.prompt.len(),
            has_system = body.system.is_some(),
            "=== GENERATION REQUEST ==="
        );

        let response = self
            .http_generate
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    InferenceError::Timeout {
                        duration_secs: self.config.generate_timeout_secs,
                    }
                } else {
                    InferenceError::ConnectionFailed {
                        endpoint: url.clone(),
                        reason: e.to_string(),
                    }
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body_text = response.text().await.unwrap_or_default();
            return Err(InferenceError::HttpError {
                status: status.as_u16(),
                body: body_text,
            });
        }

        let parsed: GenerateResponse =
            response
                .json()
                .await
                .map_err(|e| InferenceError::MalformedResponse {
                    reason: format!("failed to decode generate response: {e}"),
                })?;

        Ok(parsed.response)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> InferenceConfig {
        InferenceConfig {
            base_url: "http://localhost:1".to_string(),
            default_model: "test-model".to_string(),
            probe_timeout_secs: 1,
            generate_timeout_secs: 1,
        }
    }

    #[test]
    fn test_from_config_exposes_settings() {
        let client = OllamaClient::from_config(test_config()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:1");
        assert_eq!(client.default_model(), "test-model");
    }

    // Port 1 is reserved and unbound — these exercise the never-raise
    // contracts against a guaranteed-unreachable endpoint.

    #[tokio::test]
    async fn test_is_available_false_when_unreachable() {
        let client = OllamaClient::from_config(test_config()).unwrap();
        assert!(!client.is_available().await);
    }

    #[tokio::test]
    async fn test_list_models_empty_when_unreachable() {
        let client = OllamaClient::from_config(test_config()).unwrap();
        assert!(client.list_models().await.is_empty());
    }

    #[tokio::test]
    async fn test_generate_unavailable_when_unreachable() {
        let client = OllamaClient::from_config(test_config()).unwrap();
        let outcome = client.generate("prompt", "test-model", None).await;
        assert!(
            matches!(outcome, GenerationOutcome::Unavailable | GenerationOutcome::Timeout),
            "unreachable server should map to Unavailable or Timeout, got {outcome:?}"
        );
    }
}
