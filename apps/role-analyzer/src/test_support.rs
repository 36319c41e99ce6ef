//! Scripted stand-ins for the backend and the terminal, shared by unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::errors::AppError;
use crate::llm_client::{LlmError, TextBackend};
use crate::prompt::Prompter;

/// Replays canned responses in order and records every prompt it receives.
/// `Err(msg)` entries surface as a 500 `LlmError::Api`.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, String>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn new(script: Vec<Result<&str, &str>>) -> Self {
        Self {
            script: Mutex::new(
                script
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl TextBackend for ScriptedBackend {
    async fn generate(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match self.script.lock().unwrap().pop_front() {
            Some(Ok(text)) => Ok(text),
            Some(Err(message)) => Err(LlmError::Api {
                status: 500,
                message,
            }),
            None => Err(LlmError::Api {
                status: 500,
                message: "script exhausted".to_string(),
            }),
        }
    }

    fn model(&self) -> &str {
        "scripted"
    }
}

/// Answers prompts from fixed queues.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub lines: VecDeque<String>,
    pub selections: VecDeque<usize>,
    pub asked: Vec<String>,
}

impl ScriptedPrompter {
    pub fn with_lines(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| l.to_string()).collect(),
            ..Self::default()
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String, AppError> {
        self.asked.push(prompt.to_string());
        Ok(self.lines.pop_front().unwrap_or_default())
    }

    fn select(&mut self, prompt: &str, count: usize) -> Result<usize, AppError> {
        self.asked.push(prompt.to_string());
        let choice = self
            .selections
            .pop_front()
            .ok_or_else(|| AppError::Input("no scripted selection".to_string()))?;
        assert!(choice < count, "scripted selection out of range");
        Ok(choice)
    }
}
