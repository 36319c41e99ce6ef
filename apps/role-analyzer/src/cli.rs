use std::path::PathBuf;

use clap::Parser;

use crate::app::Mode;
use crate::config::{BackendKind, DEFAULT_ERROR_LOG};

#[derive(Debug, Parser)]
#[command(name = "role-analyzer", version)]
#[command(about = "Analyze IT roles using a local Ollama server or the Gemini API")]
pub struct Cli {
    /// IT role(s) to analyze (e.g. "Data Analyst" "DevOps Engineer"). Prompts when omitted.
    #[arg(conflicts_with_all = ["skills", "suggest"])]
    pub roles: Vec<String>,

    /// Comma-separated list of your IT skills; suggests roles to analyze
    #[arg(short, long)]
    pub skills: Option<String>,

    /// Suggest roles from skills entered interactively
    #[arg(long)]
    pub suggest: bool,

    /// Output Markdown file to save the analysis
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Text-generation backend
    #[arg(short, long, value_enum, env = "ROLE_ANALYZER_BACKEND", default_value_t = BackendKind::Ollama)]
    pub backend: BackendKind,

    /// Model name (defaults to mistral:latest for Ollama, gemini-2.0-flash for Gemini)
    #[arg(short, long, env = "ROLE_ANALYZER_MODEL")]
    pub model: Option<String>,

    /// File that receives one line per failed analysis
    #[arg(long, env = "ROLE_ANALYZER_ERROR_LOG", default_value = DEFAULT_ERROR_LOG)]
    pub error_log: PathBuf,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.skills.is_some() || self.suggest {
            Mode::Suggest(self.skills.clone())
        } else {
            Mode::Analyze(self.roles.clone())
        }
    }
}
