//! Confirmation capability for destructive operations.
//!
//! The board asks before deleting anything. How the question reaches the user
//! is up to the caller: a terminal prompt, a modal, or a fixed answer in
//! tests.

/// Answers a yes/no question about a destructive operation.
///
pub trait Confirm {
    fn confirm(&mut self, message: &str) -> bool;
}

/// Fixed answer, used once the user has already been asked (or with `--yes`).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Answer(pub bool);

impl Confirm for Answer {
    fn confirm(&mut self, _message: &str) -> bool {
        self.0
    }
}

/// Declines, remembering the question so it can be shown to the user and the
/// operation repeated with their [`Answer`].
///
#[derive(Debug, Default)]
pub struct Deferred {
    prompt: Option<String>,
}

impl Deferred {
    pub fn new() -> Self {
        Deferred::default()
    }

    pub fn take_prompt(&mut self) -> Option<String> {
        self.prompt.take()
    }
}

impl Confirm for Deferred {
    fn confirm(&mut self, message: &str) -> bool {
        self.prompt = Some(message.to_string());
        false
    }
}
