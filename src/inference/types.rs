//! Wire types for the Ollama generation API.
//!
//! These mirror the `/api/generate` and `/api/tags` request/response shapes,
//! used for both request building and response parsing.

use serde::{Deserialize, Serialize};

// ─── Request Types ───────────────────────────────────────────────────────────

/// Request body for `POST /api/generate`.
///
/// `stream` is always `false` in this pipeline — every call wants one complete
/// response, not a token stream. `system` is skipped when `None` because some
/// server builds reject a `null` system prompt.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
    pub stream: bool,
}

// ─── Response Types ──────────────────────────────────────────────────────────

/// Response body from `POST /api/generate` on success.
///
/// The server sends more fields (timings, token counts); only `response` is
/// consumed. `default` tolerates bodies where the field is absent.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
}

/// Raw `/api/tags` response shape.
#[derive(Debug, Deserialize)]
pub(crate) struct TagsResponse {
    pub models: Option<Vec<TagModel>>,
}

/// Raw model entry from the tags API.
#[derive(Debug, Deserialize)]
pub(crate) struct TagModel {
    pub name: String,
    pub size: Option<u64>,
}

/// A model known to the inference server.
///
/// Read-only snapshot of server state; never cached beyond a single
/// `list_models` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDescriptor {
    pub name: String,
    pub size_bytes: Option<u64>,
}

/// Outcome of a single generation call.
///
/// The client performs exactly one attempt per call and maps every failure
/// class to a variant here instead of returning `Err` — the orchestrator
/// decides what text the user sees for each variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// 2xx response; carries the `response` field of the body.
    Success(String),
    /// The server could not be reached (connection refused, DNS failure, or
    /// an undecodable success body).
    Unavailable,
    /// The request exceeded its deadline.
    Timeout,
    /// Non-2xx response from the server.
    ServerError { status: u16, body: String },
}

impl GenerationOutcome {
    /// `true` when this outcome carries generated text.
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationOutcome::Success(_))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_omitted_when_none() {
        let req = GenerateRequest {
            model: "llama3.2".to_string(),
            prompt: "What is gravity?".to_string(),
            system: None,
            stream: false,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(!json.contains("system"), "system should be omitted when None");
        assert!(json.contains("\"stream\":false"));
    }

    #[test]
    fn test_system_included_when_some() {
        let req = GenerateRequest {
            model: "llama3.2".to_string(),
            prompt: "prompt".to_string(),
            system: Some("You are a tutor.".to_string()),
            stream: false,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"system\":\"You are a tutor.\""));
    }

    #[test]
    fn test_generate_response_missing_field_defaults_empty() {
        let parsed: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.response, "");
    }

    #[test]
    fn test_tags_response_parses_models() {
        let json = r#"{"models":[{"name":"llama3.2","size":2019393189,"digest":"abc"}]}"#;
        let tags: TagsResponse = serde_json::from_str(json).unwrap();
        let models = tags.models.unwrap();
        assert_eq!(models.len(), 1);
        assert_eq!(models[0].name, "llama3.2");
        assert_eq!(models[0].size, Some(2019393189));
    }

    #[test]
    fn test_outcome_is_success() {
        assert!(GenerationOutcome::Success("text".into()).is_success());
        assert!(!GenerationOutcome::Timeout.is_success());
        assert!(!GenerationOutcome::Unavailable.is_success());
        assert!(!GenerationOutcome::ServerError { status: 500, body: String::new() }.is_success());
    }
}
