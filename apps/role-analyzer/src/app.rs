//! The run loop: gather roles, analyze them one after another, then save the report.

use std::path::Path;

use colored::Colorize;
use tracing::info;

use crate::analysis::{AnalysisResult, RoleAnalyzer, RoleQuery};
use crate::errors::AppError;
use crate::prompt::Prompter;
use crate::report::{print_analysis, print_saved, write_report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Analyze the given roles, or ask for them when the list is empty.
    Analyze(Vec<String>),
    /// Suggest roles from skills (asked for when `None`) and analyze the one the user picks.
    Suggest(Option<String>),
}

pub async fn run(
    analyzer: &RoleAnalyzer,
    prompter: &mut dyn Prompter,
    mode: Mode,
    output: Option<&Path>,
) -> Result<Vec<AnalysisResult>, AppError> {
    let roles = match mode {
        Mode::Analyze(roles) if roles.is_empty() => collect_roles(prompter)?,
        Mode::Analyze(roles) => roles,
        Mode::Suggest(skills) => vec![choose_suggested_role(analyzer, prompter, skills).await?],
    };

    let results = analyze_all(analyzer, &roles).await;

    if let Some(path) = output {
        if results.is_empty() {
            info!("No successful analyses; not writing {}", path.display());
        } else {
            write_report(path, &results)?;
            print_saved(path);
        }
    }

    Ok(results)
}

/// Analyzes roles in order. Invalid names, failed calls and empty answers are skipped;
/// whitespace-only answers are kept as text.
pub async fn analyze_all(analyzer: &RoleAnalyzer, roles: &[String]) -> Vec<AnalysisResult> {
    let mut results = Vec::new();

    for role in roles {
        let query = match RoleQuery::parse(role) {
            Ok(q) => q,
            Err(e) => {
                eprintln!("{}", e.to_string().red().bold());
                continue;
            }
        };

        if let Some(text) = analyzer.analyze_role(&query).await {
            if text.is_empty() {
                info!(role = query.name(), "Backend returned no text; skipping");
                continue;
            }
            let result = AnalysisResult {
                role: query.name().to_string(),
                text,
            };
            print_analysis(&result);
            results.push(result);
        }
    }

    info!("{} of {} role(s) analyzed", results.len(), roles.len());
    results
}

fn collect_roles(prompter: &mut dyn Prompter) -> Result<Vec<String>, AppError> {
    println!(
        "{}",
        "No roles provided as arguments. Enter roles one by one (empty input to finish):"
            .yellow()
            .bold()
    );

    let mut roles = Vec::new();
    loop {
        let role = prompter.read_line("Enter IT role")?;
        if role.is_empty() {
            break;
        }
        roles.push(role);
    }
    Ok(roles)
}

async fn choose_suggested_role(
    analyzer: &RoleAnalyzer,
    prompter: &mut dyn Prompter,
    skills: Option<String>,
) -> Result<String, AppError> {
    let skills = match skills {
        Some(s) => s,
        None => {
            println!(
                "{}",
                "Enter your IT skills, separated by commas (e.g., Python, SQL, Cloud):"
                    .yellow()
                    .bold()
            );
            prompter.read_line("Your skills")?
        }
    };

    let mut suggested = analyzer.suggest_roles(&skills).await;
    if suggested.is_empty() {
        return Err(AppError::NoSuggestions);
    }

    println!(
        "\n{}",
        "Suggested IT Roles based on your skills:".green().bold()
    );
    for (idx, role) in suggested.iter().enumerate() {
        println!("{}. {}", idx + 1, role);
    }

    let choice = prompter.select("Select a role to analyze", suggested.len())?;
    Ok(suggested.swap_remove(choice))
}
