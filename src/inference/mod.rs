//! Inference Client — HTTP client for a locally hosted Ollama-style server.
//!
//! This module handles all communication with the inference server:
//! - Availability probing (`GET /api/tags`, short timeout)
//! - Model enumeration
//! - Single-shot non-streaming text generation (`POST /api/generate`)
//! - Configuration loading from YAML with env-var interpolation
//!
//! Failures that the pipeline turns into substitute values travel as
//! [`GenerationOutcome`] variants rather than errors; see
//! [`generation::orchestrator`](crate::generation::orchestrator) for the
//! boundary where those become user-facing text.

pub mod client;
pub mod config;
pub mod errors;
pub mod types;

// Re-exports for convenience
pub use client::OllamaClient;
pub use config::{load_config, InferenceConfig};
pub use errors::InferenceError;
pub use types::{GenerateRequest, GenerateResponse, GenerationOutcome, ModelDescriptor};
