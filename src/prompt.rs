use crate::error::{PdfSplitError, Result};
use std::collections::VecDeque;
use std::io::{self, Write};

/// Synchronous request/response channel for the interactive steps of a run
/// (per-section name overrides, merge selection, merged file name).
pub trait PromptSource {
    fn ask(&mut self, question: &str) -> Result<String>;
}

/// Prompts on stdout and reads answers from stdin.
pub struct StdinPrompt;

impl PromptSource for StdinPrompt {
    fn ask(&mut self, question: &str) -> Result<String> {
        print!("{}", question);
        io::stdout().flush().map_err(|e| PdfSplitError::Prompt {
            reason: format!("failed to flush prompt: {}", e),
        })?;

        let mut answer = String::new();
        io::stdin()
            .read_line(&mut answer)
            .map_err(|e| PdfSplitError::Prompt {
                reason: format!("failed to read input: {}", e),
            })?;

        Ok(answer.trim().to_string())
    }
}

/// Pre-built answer queue. Once the queue is exhausted every further
/// question gets an empty answer, which callers treat as "accept the
/// default".
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            answers: VecDeque::new(),
        }
    }
}

impl PromptSource for ScriptedPrompt {
    fn ask(&mut self, _question: &str) -> Result<String> {
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scripted_prompt_returns_answers_in_order() {
        let mut prompts = ScriptedPrompt::new(["first", "second"]);
        assert_eq!(prompts.ask("name? ").unwrap(), "first");
        assert_eq!(prompts.ask("name? ").unwrap(), "second");
    }

    #[test]
    fn scripted_prompt_defaults_to_empty_when_exhausted() {
        let mut prompts = ScriptedPrompt::empty();
        assert_eq!(prompts.ask("name? ").unwrap(), "");
    }
}
