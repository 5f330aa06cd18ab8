//! Confirmation prompts as an injected capability.
//!
//! A `Confirmer` receives the request together with the continuation to run
//! once the user has answered. `ConfirmQueue` holds pending requests for a
//! dialog component; `BrowserConfirm` falls back to `window.confirm`.

use leptos::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmRequest {
    pub title: String,
    pub message: String,
    pub confirm_label: String,
    /// Irreversible action (dialog shows a danger button)
    pub destructive: bool,
}

impl ConfirmRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            confirm_label: "OK".to_string(),
            destructive: false,
        }
    }

    pub fn destructive(mut self) -> Self {
        self.destructive = true;
        self
    }

    pub fn with_confirm_label(mut self, label: impl Into<String>) -> Self {
        self.confirm_label = label.into();
        self
    }
}

pub type ConfirmAnswer = Box<dyn FnOnce(bool)>;

pub trait Confirmer {
    /// Ask the user; `on_answer` runs exactly once with the decision
    fn confirm(&self, request: ConfirmRequest, on_answer: ConfirmAnswer);
}

/// Answers every request with a fixed value, without asking
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirmer for AutoConfirm {
    fn confirm(&self, _request: ConfirmRequest, on_answer: ConfirmAnswer) {
        on_answer(self.0)
    }
}

/// Native `window.confirm` dialog
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserConfirm;

impl Confirmer for BrowserConfirm {
    fn confirm(&self, request: ConfirmRequest, on_answer: ConfirmAnswer) {
        let text = format!("{}\n\n{}", request.title, request.message);
        let confirmed = web_sys::window()
            .map(|win| win.confirm_with_message(&text).unwrap_or(false))
            .unwrap_or(false);
        on_answer(confirmed)
    }
}

/// Pending confirmations waiting for a dialog to answer them
#[derive(Clone)]
pub struct ConfirmQueue {
    pending: RwSignal<Vec<(u64, ConfirmRequest)>>,
    answers: Rc<RefCell<HashMap<u64, ConfirmAnswer>>>,
    next_id: Rc<RefCell<u64>>,
}

impl ConfirmQueue {
    pub fn new() -> Self {
        Self {
            pending: RwSignal::new(Vec::new()),
            answers: Rc::new(RefCell::new(HashMap::new())),
            next_id: Rc::new(RefCell::new(1)),
        }
    }

    pub fn pending(&self) -> ReadSignal<Vec<(u64, ConfirmRequest)>> {
        self.pending.read_only()
    }

    /// Oldest unanswered request
    pub fn current(&self) -> Option<(u64, ConfirmRequest)> {
        self.pending.with(|p| p.first().cloned())
    }

    /// Answer a request; returns false if the id is unknown or already answered
    pub fn resolve(&self, id: u64, answer: bool) -> bool {
        self.pending.update(|p| p.retain(|(pid, _)| *pid != id));
        let callback = self.answers.borrow_mut().remove(&id);
        match callback {
            Some(cb) => {
                cb(answer);
                true
            }
            None => false,
        }
    }

    /// Decline every pending request (e.g. when the page is closed)
    pub fn cancel_all(&self) {
        let ids: Vec<u64> = self.pending.with(|p| p.iter().map(|(id, _)| *id).collect());
        for id in ids {
            self.resolve(id, false);
        }
    }
}

impl Default for ConfirmQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl Confirmer for ConfirmQueue {
    fn confirm(&self, request: ConfirmRequest, on_answer: ConfirmAnswer) {
        let id = {
            let mut next = self.next_id.borrow_mut();
            let id = *next;
            *next += 1;
            id
        };
        self.answers.borrow_mut().insert(id, on_answer);
        self.pending.update(|p| p.push((id, request)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_auto_confirm() {
        let answered = Rc::new(Cell::new(None));
        let a = answered.clone();
        AutoConfirm(true).confirm(
            ConfirmRequest::new("Delete", "Sure?"),
            Box::new(move |v: bool| a.set(Some(v))),
        );
        assert_eq!(answered.get(), Some(true));
    }

    #[test]
    fn test_queue_resolves_in_order() {
        let queue = ConfirmQueue::new();
        let answers = Rc::new(RefCell::new(Vec::new()));

        for name in ["first", "second"] {
            let answers = answers.clone();
            queue.confirm(
                ConfirmRequest::new(name, ""),
                Box::new(move |v: bool| answers.borrow_mut().push((name, v))),
            );
        }

        let (id, request) = queue.current().unwrap();
        assert_eq!(request.title, "first");
        assert!(queue.resolve(id, true));
        assert!(!queue.resolve(id, true));

        let (id, request) = queue.current().unwrap();
        assert_eq!(request.title, "second");
        queue.resolve(id, false);

        assert!(queue.current().is_none());
        assert_eq!(*answers.borrow(), vec![("first", true), ("second", false)]);
    }

    #[test]
    fn test_cancel_all_declines() {
        let queue = ConfirmQueue::new();
        let declined = Rc::new(Cell::new(0));
        for _ in 0..3 {
            let d = declined.clone();
            queue.confirm(
                ConfirmRequest::new("x", "").destructive(),
                Box::new(move |v: bool| {
                    if !v {
                        d.set(d.get() + 1)
                    }
                }),
            );
        }
        queue.cancel_all();
        assert_eq!(declined.get(), 3);
        assert!(queue.pending().get_untracked().is_empty());
    }
}
