use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ValueEnum;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ERROR_LOG: &str = "role-analysis-error.log";

/// Which wire protocol the analyzer speaks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BackendKind {
    /// Local Ollama inference server
    Ollama,
    /// Hosted Gemini API
    Gemini,
}

impl BackendKind {
    pub fn default_model(self) -> &'static str {
        match self {
            BackendKind::Ollama => "mistral:latest",
            BackendKind::Gemini => "gemini-2.0-flash",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Ollama => f.write_str("ollama"),
            BackendKind::Gemini => f.write_str("gemini"),
        }
    }
}

/// Runtime configuration resolved from CLI flags and environment variables.
/// Missing credentials for the selected backend are a startup error.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub model: String,
    pub ollama_url: String,
    pub gemini_api_key: Option<String>,
    pub gemini_api_base: String,
    pub request_timeout: Option<Duration>,
    pub error_log: PathBuf,
    pub rust_log: String,
}

impl Config {
    /// Reads the process environment. Callers load `.env` (via `dotenvy`) before
    /// parsing CLI args so both layers see it.
    pub fn from_env(
        backend: BackendKind,
        model: Option<String>,
        error_log: PathBuf,
    ) -> Result<Self> {
        Self::from_lookup(backend, model, error_log, |key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(
        backend: BackendKind,
        model: Option<String>,
        error_log: PathBuf,
        lookup: F,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = match backend {
            BackendKind::Gemini => Some(require_env(&lookup, "GENAI_API_KEY")?),
            BackendKind::Ollama => optional_env(&lookup, "GENAI_API_KEY"),
        };

        let ollama_url = optional_env(&lookup, "OLLAMA_API_URL")
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        require_url("OLLAMA_API_URL", &ollama_url)?;

        let gemini_api_base = optional_env(&lookup, "GENAI_API_BASE")
            .unwrap_or_else(|| DEFAULT_GEMINI_API_BASE.to_string());
        require_url("GENAI_API_BASE", &gemini_api_base)?;

        let request_timeout = optional_env(&lookup, "ROLE_ANALYZER_TIMEOUT_SECS")
            .map(|secs| {
                secs.parse::<u64>()
                    .context("ROLE_ANALYZER_TIMEOUT_SECS must be a whole number of seconds")
            })
            .transpose()?
            .map(Duration::from_secs);

        let model = model
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| backend.default_model().to_string());

        Ok(Config {
            backend,
            model,
            ollama_url,
            gemini_api_key,
            gemini_api_base,
            request_timeout,
            error_log,
            rust_log: optional_env(&lookup, "RUST_LOG").unwrap_or_else(|| "warn".to_string()),
        })
    }
}

fn optional_env<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn require_env<F>(lookup: &F, key: &str) -> Result<String>
where
    F: Fn(&str) -> Option<String>,
{
    optional_env(lookup, key).with_context(|| {
        format!("Please set the {key} environment variable (in the environment or a .env file).")
    })
}

fn require_url(key: &str, value: &str) -> Result<()> {
    reqwest::Url::parse(value)
        .map(|_| ())
        .with_context(|| format!("{key} is not a valid URL: '{value}'"))
}
