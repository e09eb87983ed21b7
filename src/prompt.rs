//! Interactive yes/no confirmation used to gate steps in debug mode.
use log::*;
#[cfg(test)]
use mockall::automock;
use std::io::{self, BufRead, StdinLock, Stdout, Write};

use crate::{ReleaseError, Result};

/// Asks the operator whether to continue.
#[cfg_attr(test, automock)]
pub trait Confirm {
    /// `Ok(true)` for "yes", `Ok(false)` for "no".
    fn confirm(&mut self, question: &str) -> Result<bool>;
}

/// Terminal prompt that re-asks until the answer is exactly `yes` or `no`.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> Result<bool> {
        let prompt = format!("\n> {question} (yes/no): ");

        let answer = loop {
            write!(self.output, "{prompt}")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Err(ReleaseError::PromptClosed(question.to_string()));
            }

            match line.trim() {
                "yes" => break true,
                "no" => break false,
                _ => continue,
            }
        };

        info!("[USER-PROMPT] {}", prompt.trim());
        info!("[USER-ANSWER] {}", if answer { "yes" } else { "no" });

        Ok(answer)
    }
}
