//! User input. `TerminalPrompter` drives a TTY through dialoguer; `LinePrompter` reads
//! plain lines when stdin is piped.

use std::io::{BufRead, Write};

use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Input};

use crate::errors::AppError;

pub trait Prompter {
    /// Reads one trimmed line; an empty answer is allowed.
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError>;

    /// Asks for a choice among `count` numbered items (1-based on screen) and
    /// returns the 0-based index.
    fn select(&mut self, prompt: &str, count: usize) -> Result<usize, AppError>;
}

#[derive(Default)]
pub struct TerminalPrompter {
    theme: ColorfulTheme,
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        let line: String = Input::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text()?;
        Ok(line.trim().to_string())
    }

    fn select(&mut self, prompt: &str, count: usize) -> Result<usize, AppError> {
        let choice: usize = Input::with_theme(&self.theme)
            .with_prompt(format!("{prompt} (1-{count})"))
            .validate_with(move |n: &usize| {
                if (1..=count).contains(n) {
                    Ok(())
                } else {
                    Err("Invalid selection. Try again.")
                }
            })
            .interact_text()?;
        Ok(choice - 1)
    }
}

/// Reads answers line by line from any `BufRead`. End of input reads as an empty line,
/// and a selection that never becomes valid fails once input runs out.
pub struct LinePrompter<R> {
    reader: R,
}

impl<R: BufRead> LinePrompter<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }

    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        print!("{prompt}: ");
        std::io::stdout()
            .flush()
            .map_err(|e| AppError::Input(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .reader
            .read_line(&mut line)
            .map_err(|e| AppError::Input(e.to_string()))?;
        if read == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead> Prompter for LinePrompter<R> {
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        Ok(self.next_line(prompt)?.unwrap_or_default())
    }

    fn select(&mut self, prompt: &str, count: usize) -> Result<usize, AppError> {
        let prompt = format!("{prompt} (1-{count})");
        loop {
            let Some(line) = self.next_line(&prompt)? else {
                return Err(AppError::Input("no selection before end of input".to_string()));
            };
            match line.parse::<usize>() {
                Ok(n) if (1..=count).contains(&n) => return Ok(n - 1),
                Ok(_) => eprintln!("{}", "Invalid selection. Try again.".red().bold()),
                Err(_) => eprintln!("{}", "Please enter a valid number.".red().bold()),
            }
        }
    }
}
