//! Markdown report output and console display of analyses.

use std::path::Path;

use colored::Colorize;

use crate::analysis::AnalysisResult;
use crate::errors::AppError;

/// `# Role Analysis: <role>` followed by the analysis text.
pub fn format_section(result: &AnalysisResult) -> String {
    format!("# Role Analysis: {}\n\n{}\n\n", result.role, result.text)
}

pub fn render_report(results: &[AnalysisResult]) -> String {
    results.iter().map(format_section).collect()
}

/// Writes every section in order, replacing any previous file at `path`.
pub fn write_report(path: &Path, results: &[AnalysisResult]) -> Result<(), AppError> {
    std::fs::write(path, render_report(results)).map_err(|source| AppError::Report {
        path: path.to_path_buf(),
        source,
    })
}

pub fn print_analysis(result: &AnalysisResult) {
    println!(
        "\n{}",
        format!("--- Role Analysis: {} ---", result.role).green().bold()
    );
    println!("{}", result.text);
}

pub fn print_saved(path: &Path) {
    println!(
        "{}",
        format!("Analysis saved to {}", path.display()).blue().bold()
    );
}
