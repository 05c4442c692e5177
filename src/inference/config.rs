//! Inference server configuration.
//!
//! Config is the single source of truth for the server base URL, the default
//! model, and per-call timeouts. It can be built in code via [`Default`] or
//! loaded from a YAML file with environment-variable interpolation.

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use super::errors::InferenceError;

/// Default Ollama endpoint.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Default model used when the caller does not select one.
pub const DEFAULT_MODEL: &str = "llama3.2";

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}
fn default_probe_timeout() -> u64 {
    5
}
fn default_generate_timeout() -> u64 {
    60
}

/// Runtime configuration for the inference client.
#[derive(Debug, Clone, Deserialize)]
pub struct InferenceConfig {
    /// Base URL of the inference server, without a trailing slash.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Model name sent when the caller does not pick one explicitly.
    #[serde(default = "default_model")]
    pub default_model: String,
    /// Timeout for availability probes and model listing. Probes must fail
    /// fast so the orchestrator can short-circuit to fallback values.
    #[serde(default = "default_probe_timeout")]
    pub probe_timeout_secs: u64,
    /// Timeout for generation calls. Generation is slow on local hardware,
    /// so this is much longer than the probe timeout.
    #[serde(default = "default_generate_timeout")]
    pub generate_timeout_secs: u64,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            default_model: default_model(),
            probe_timeout_secs: default_probe_timeout(),
            generate_timeout_secs: default_generate_timeout(),
        }
    }
}

impl InferenceConfig {
    /// Probe timeout as a [`Duration`].
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    /// Generation timeout as a [`Duration`].
    pub fn generate_timeout(&self) -> Duration {
        Duration::from_secs(self.generate_timeout_secs)
    }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

/// Load and parse an inference configuration file.
///
/// Performs environment-variable interpolation on string values matching
/// `${VAR_NAME}` or `${VAR_NAME:-default}`, then strips any trailing slash
/// from `base_url` so URL building can always append `/api/...`.
pub fn load_config(path: &Path) -> Result<InferenceConfig, InferenceError> {
    let raw = std::fs::read_to_string(path).map_err(|e| InferenceError::ConfigError {
        reason: format!("failed to read {}: {e}", path.display()),
    })?;

    let interpolated = interpolate_env_vars(&raw);

    let mut config: InferenceConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| InferenceError::ConfigError {
            reason: format!("failed to parse config: {e}"),
        })?;

    while config.base_url.ends_with('/') {
        config.base_url.pop();
    }

    if config.base_url.is_empty() {
        return Err(InferenceError::ConfigError {
            reason: "base_url must not be empty".into(),
        });
    }

    Ok(config)
}

// ─── Env-var interpolation ───────────────────────────────────────────────────

/// Replace `${VAR}` and `${VAR:-default}` in a string.
fn interpolate_env_vars(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && chars.peek() == Some(&'{') {
            chars.next(); // consume '{'
            let mut var_expr = String::new();
            for c in chars.by_ref() {
                if c == '}' {
                    break;
                }
                var_expr.push(c);
            }
            let resolved = resolve_var_expr(&var_expr);
            result.push_str(&resolved);
        } else {
            result.push(ch);
        }
    }

    result
}

/// Resolve a variable expression like `VAR` or `VAR:-default`.
fn resolve_var_expr(expr: &str) -> String {
    if let Some(idx) = expr.find(":-") {
        let var_name = &expr[..idx];
        let default = &expr[idx + 2..];
        std::env::var(var_name).unwrap_or_else(|_| expand_tilde(default))
    } else {
        std::env::var(expr).unwrap_or_default()
    }
}

/// Expand a leading `~` to the user's home directory.
///
/// Uses `dirs::home_dir()` for cross-platform support (works on macOS,
/// Linux, and Windows where `$HOME` may not be set).
fn expand_tilde(path: &str) -> String {
    if let Some(rest) = path.strip_prefix('~') {
        if let Some(home) = dirs::home_dir() {
            return format!("{}{rest}", home.display());
        }
    }
    path.to_string()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
