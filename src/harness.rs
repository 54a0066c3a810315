//! # In-process Host
//!
//! A small recording registry for programs and tests that have no test framework of
//! their own. [`Suite`] keeps registrations in order, expands exclusive suites on
//! request and hands the selected cases back. Running them, and deciding what a
//! failure means, is left to the caller.
//!
//! ## Design Principles
//!
//! - **Registration order**: cases are listed in the order they were registered
//! - **Lazy exclusive suites**: suite bodies run only in [`Suite::expand_suites`]

mod suite;

pub use suite::{RegisteredCase, Suite};

/// Boxed error returned by failing case bodies.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What a case body registered with a [`Suite`] returns.
pub type CaseResult = Result<(), BoxError>;

/// Invocation context for case bodies registered with a [`Suite`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseContext {
    title: String,
    notes: Vec<String>,
}

impl CaseContext {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            notes: Vec::new(),
        }
    }

    /// Title of the running case.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Attaches a note the caller can read back after the case returns.
    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }
}
