//! Append-only plain-text log of failed analyses. One failure is one line.

use std::fmt::Display;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use tracing::warn;

#[derive(Debug, Clone)]
pub struct ErrorLog {
    path: PathBuf,
}

impl ErrorLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one line for `role`. A log that cannot be written is only warned about.
    pub fn append(&self, role: &str, error: &dyn Display) {
        let line = format_line(Utc::now(), role, &error.to_string());
        if let Err(e) = self.write_line(&line) {
            warn!(
                "Could not write to error log {}: {e}",
                self.path.display()
            );
        }
    }

    fn write_line(&self, line: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())
    }
}

pub fn format_line(at: DateTime<Utc>, role: &str, message: &str) -> String {
    format!(
        "[{}] Error for role '{}': {}\n",
        at.to_rfc3339_opts(SecondsFormat::Secs, true),
        single_line(role),
        single_line(message)
    )
}

fn single_line(text: &str) -> String {
    text.split(['\r', '\n'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}
