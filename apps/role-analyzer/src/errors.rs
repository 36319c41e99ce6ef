use std::path::PathBuf;

use thiserror::Error;

/// Application-level error type.
/// Anything surfacing as `AppError` from the run loop ends the process with status 1;
/// per-role backend failures never reach this type.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid role name: {0}")]
    InvalidRoleName(String),

    #[error("No roles could be suggested based on the provided skills.")]
    NoSuggestions,

    #[error("Input error: {0}")]
    Input(String),

    #[error("Failed to write analysis to {path}: {source}")]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<dialoguer::Error> for AppError {
    fn from(e: dialoguer::Error) -> Self {
        AppError::Input(e.to_string())
    }
}
