//! Blocking yes/no confirmation, injected into the document.
//!
//! A prompt returns `true` only for an affirmative answer. Declining and
//! dismissing are both reported as `false`.

use std::collections::VecDeque;
use std::io::BufRead;

/// A synchronous confirmation capability.
pub trait ConfirmPrompt {
    fn confirm(&mut self, message: &str) -> bool;
}

impl<F> ConfirmPrompt for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, message: &str) -> bool {
        self(message)
    }
}

/// Answers from a fixed queue, then a fallback.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<bool>,
    fallback: bool,
    asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new(answers: impl IntoIterator<Item = bool>, fallback: bool) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            fallback,
            asked: Vec::new(),
        }
    }

    /// Always give the same answer.
    pub fn always(answer: bool) -> Self {
        Self::new([], answer)
    }

    /// Messages shown so far.
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl ConfirmPrompt for ScriptedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(self.fallback)
    }
}

/// Reads a y/n answer from a line-oriented reader (stdin in the CLI).
///
/// EOF or a read error counts as a dismissal.
pub struct LinePrompt<R> {
    reader: R,
}

impl<R: BufRead> LinePrompt<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl LinePrompt<std::io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(std::io::stdin().lock())
    }
}

impl<R: BufRead> ConfirmPrompt for LinePrompt<R> {
    fn confirm(&mut self, message: &str) -> bool {
        eprint!("{message} [y/N] ");
        let mut line = String::new();
        match self.reader.read_line(&mut line) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_affirmative(&line),
        }
    }
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes" | "ok")
}

/// Prompt wrapper that queues scripted answers in front of another prompt.
pub struct ChainedPrompt {
    scripted: VecDeque<bool>,
    rest: Box<dyn ConfirmPrompt>,
}

impl ChainedPrompt {
    pub fn new(scripted: impl IntoIterator<Item = bool>, rest: Box<dyn ConfirmPrompt>) -> Self {
        Self {
            scripted: scripted.into_iter().collect(),
            rest,
        }
    }
}

impl ConfirmPrompt for ChainedPrompt {
    fn confirm(&mut self, message: &str) -> bool {
        match self.scripted.pop_front() {
            Some(answer) => answer,
            None => self.rest.confirm(message),
        }
    }
}
