//! Shared test helpers.

use cfl_components::prompt::ConfirmPrompt;
use cfl_components::Document;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// Prompt whose answers and recorded messages stay reachable from the test.
#[derive(Clone, Default)]
#[allow(dead_code)]
pub struct SharedPrompt {
    pub answers: Rc<RefCell<VecDeque<bool>>>,
    pub asked: Rc<RefCell<Vec<String>>>,
}

#[allow(dead_code)]
impl SharedPrompt {
    pub fn new(answers: &[bool]) -> Self {
        let prompt = Self::default();
        prompt.answers.borrow_mut().extend(answers.iter().copied());
        prompt
    }

    pub fn push(&self, answer: bool) {
        self.answers.borrow_mut().push_back(answer);
    }

    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl ConfirmPrompt for SharedPrompt {
    /// An empty queue behaves like a dismissed dialog.
    fn confirm(&mut self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_string());
        self.answers.borrow_mut().pop_front().unwrap_or(false)
    }
}

/// Document with both components defined, driven by a shared prompt.
#[allow(dead_code)]
pub fn document_with(markup: &str) -> (Document, SharedPrompt) {
    let prompt = SharedPrompt::default();
    let mut doc = Document::with_components(prompt.clone());
    doc.load_markup(markup).expect("markup should load");
    (doc, prompt)
}
