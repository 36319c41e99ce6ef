//! Role analysis: validates role names, builds prompts, and runs them against a `TextBackend`.
//!
//! Backend failures never propagate: `analyze_role` logs and returns `None`,
//! `suggest_roles` returns an empty list. The caller simply skips the role.

use std::sync::Arc;

use colored::Colorize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::llm_client::{LlmError, TextBackend};

pub mod error_log;
pub mod prompts;

pub use error_log::ErrorLog;
use prompts::{build_prompt, build_suggestion_prompt};

pub const MIN_ROLE_NAME_LEN: usize = 2;
pub const MAX_ROLE_NAME_LEN: usize = 100;

const FORBIDDEN_CHARS: &[char] = &[
    '!', '@', '#', '$', '%', '^', '&', '*', '(', ')', '[', ']', '{', '}', ';', ':', '\'', '"',
    ',', '<', '>', '/', '?', '\\', '|', '`', '~',
];

/// Returns true when `name` is 2–100 characters long and free of forbidden punctuation.
pub fn validate_role_name(name: &str) -> bool {
    let len = name.chars().count();
    if !(MIN_ROLE_NAME_LEN..=MAX_ROLE_NAME_LEN).contains(&len) {
        return false;
    }
    !name.chars().any(|c| FORBIDDEN_CHARS.contains(&c))
}

/// A role name that has passed `validate_role_name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleQuery {
    name: String,
}

impl RoleQuery {
    pub fn parse(name: &str) -> Result<Self, AppError> {
        if validate_role_name(name) {
            Ok(Self {
                name: name.to_string(),
            })
        } else {
            Err(AppError::InvalidRoleName(name.to_string()))
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// One successful analysis, kept in order for the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResult {
    pub role: String,
    pub text: String,
}

/// Splits a comma-separated model answer into trimmed, non-empty role names.
pub fn parse_role_list(line: &str) -> Vec<String> {
    line.trim()
        .split(',')
        .map(str::trim)
        .filter(|role| !role.is_empty())
        .map(str::to_string)
        .collect()
}

pub struct RoleAnalyzer {
    backend: Arc<dyn TextBackend>,
    error_log: ErrorLog,
}

impl RoleAnalyzer {
    pub fn new(backend: Arc<dyn TextBackend>, error_log: ErrorLog) -> Self {
        Self { backend, error_log }
    }

    /// Returns the backend's text unchanged, or `None` after recording the failure.
    pub async fn analyze_role(&self, query: &RoleQuery) -> Option<String> {
        let prompt = build_prompt(query.name());
        info!(role = query.name(), model = self.backend.model(), "Analyzing role");

        match self.backend.generate(&prompt).await {
            Ok(text) => Some(text),
            Err(e) => {
                self.report_failure(query.name(), &e);
                None
            }
        }
    }

    /// Asks for five roles matching `skills`. Any failure yields an empty list.
    pub async fn suggest_roles(&self, skills: &str) -> Vec<String> {
        let prompt = build_suggestion_prompt(skills);
        info!(model = self.backend.model(), "Requesting role suggestions");

        match self.backend.generate(&prompt).await {
            Ok(text) => parse_role_list(&text),
            Err(e) => {
                warn!("Role suggestion failed: {e}");
                eprintln!(
                    "{} {e}",
                    "An error occurred while suggesting roles:".red().bold()
                );
                Vec::new()
            }
        }
    }

    fn report_failure(&self, role: &str, error: &LlmError) {
        warn!(role = role, "Role analysis failed: {error}");
        eprintln!(
            "{} {error}",
            format!("An error occurred while generating the role analysis for {role}:")
                .red()
                .bold()
        );
        self.error_log.append(role, error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::ScriptedBackend;

    #[test]
    fn test_validate_accepts_typical_roles() {
        assert!(validate_role_name("DevOps Engineer"));
        assert!(validate_role_name("QA"));
        assert!(validate_role_name("Site Reliability Engineer - Platform"));
        assert!(validate_role_name("Développeur Full-Stack"));
    }

    #[test]
    fn test_validate_length_bounds() {
        assert!(!validate_role_name(""));
        assert!(!validate_role_name("A"));
        assert!(validate_role_name(&"a".repeat(100)));
        assert!(!validate_role_name(&"a".repeat(101)));
    }

    #[test]
    fn test_validate_counts_characters_not_bytes() {
        // 100 two-byte characters is still 100 characters.
        assert!(validate_role_name(&"é".repeat(100)));
    }

    #[test]
    fn test_validate_rejects_every_forbidden_char() {
        for c in FORBIDDEN_CHARS {
            let name = format!("Data {c} Analyst");
            assert!(!validate_role_name(&name), "{name:?} should be rejected");
        }
    }

    #[test]
    fn test_validate_allows_hyphen_dot_and_plus() {
        assert!(validate_role_name("C++ Developer"));
        assert!(validate_role_name("Sr. .NET Engineer"));
    }

    #[test]
    fn test_role_query_parse() {
        assert_eq!(RoleQuery::parse("Data Analyst").unwrap().name(), "Data Analyst");
        assert!(matches!(
            RoleQuery::parse("DROP TABLE;"),
            Err(AppError::InvalidRoleName(_))
        ));
    }

    #[test]
    fn test_parse_role_list() {
        assert_eq!(parse_role_list("A, B, C"), vec!["A", "B", "C"]);
        assert_eq!(
            parse_role_list("  Data Engineer,,Cloud Architect , \n"),
            vec!["Data Engineer", "Cloud Architect"]
        );
        assert!(parse_role_list("   ").is_empty());
    }

    fn analyzer(backend: Arc<ScriptedBackend>, log: &std::path::Path) -> RoleAnalyzer {
        RoleAnalyzer::new(backend, ErrorLog::new(log))
    }

    #[tokio::test]
    async fn test_analyze_role_returns_response_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let text = "## DevOps Engineer\n\n- CI/CD pipelines\n- Kubernetes  \n";
        let backend = Arc::new(ScriptedBackend::new(vec![Ok(text)]));
        let analyzer = analyzer(backend.clone(), &dir.path().join("err.log"));

        let query = RoleQuery::parse("DevOps Engineer").unwrap();
        assert_eq!(analyzer.analyze_role(&query).await.as_deref(), Some(text));

        let prompts = backend.prompts();
        assert_eq!(prompts, vec![build_prompt("DevOps Engineer")]);
        assert!(!dir.path().join("err.log").exists());
    }

    #[tokio::test]
    async fn test_analyze_role_passes_empty_text_through() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("err.log");
        let backend = Arc::new(ScriptedBackend::new(vec![Ok("")]));
        let analyzer = analyzer(backend, &log_path);

        let query = RoleQuery::parse("Network Engineer").unwrap();
        assert_eq!(analyzer.analyze_role(&query).await.as_deref(), Some(""));
        assert!(!log_path.exists());
    }

    #[tokio::test]
    async fn test_analyze_role_failure_logs_one_line() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("err.log");
        let backend = Arc::new(ScriptedBackend::new(vec![Err("connection refused")]));
        let analyzer = analyzer(backend, &log_path);

        let query = RoleQuery::parse("Cloud Architect").unwrap();
        assert!(analyzer.analyze_role(&query).await.is_none());

        let contents = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(contents.lines().count(), 1);
        assert!(contents.contains("Cloud Architect"));
        assert!(contents.contains("connection refused"));
    }

    #[tokio::test]
    async fn test_suggest_roles_parses_comma_list() {
        let dir = tempfile::tempdir().unwrap();
        let backend = Arc::new(ScriptedBackend::new(vec![Ok("A, B, C")]));
        let analyzer = analyzer(backend.clone(), &dir.path().join("err.log"));

        assert_eq!(analyzer.suggest_roles("Python, SQL").await, vec!["A", "B", "C"]);
        assert_eq!(backend.prompts(), vec![build_suggestion_prompt("Python, SQL")]);
    }

    #[tokio::test]
    async fn test_suggest_roles_error_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let log_path = dir.path().join("err.log");
        let backend = Arc::new(ScriptedBackend::new(vec![Err("503 overloaded")]));
        let analyzer = analyzer(backend, &log_path);

        assert!(analyzer.suggest_roles("Python").await.is_empty());
        assert!(!log_path.exists());
    }
}
