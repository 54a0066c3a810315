//! Registrar configuration.

use serde::{Deserialize, Serialize};

/// How the sync/async invocation mode is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModeHint {
    /// Async iff the arity is exactly one more than the longest row.
    #[default]
    Infer,
    Sync,
    Async,
}

/// What happens to sync-mode rows longer than the arity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Truncation {
    #[default]
    Silent,
    Reject,
}

/// Options for a single `each(..)` registrar.
///
/// # Example
/// ```rust
/// use each_case::{EachOptions, ModeHint};
/// let opts = EachOptions::default().with_arity(3).with_mode(ModeHint::Sync);
/// assert_eq!(opts.arity, Some(3));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EachOptions {
    /// Overrides the test body's declared arity.
    pub arity: Option<usize>,
    pub mode: ModeHint,
    pub truncation: Truncation,
}

impl EachOptions {
    pub fn with_arity(mut self, arity: usize) -> Self {
        self.arity = Some(arity);
        self
    }

    pub fn with_mode(mut self, mode: ModeHint) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_truncation(mut self, truncation: Truncation) -> Self {
        self.truncation = truncation;
        self
    }

    /// Loads options from JSON; missing fields keep their defaults.
    ///
    /// ```rust
    /// use each_case::{EachOptions, Truncation};
    /// let opts = EachOptions::from_json(r#"{"truncation": "reject"}"#).unwrap();
    /// assert_eq!(opts.truncation, Truncation::Reject);
    /// assert_eq!(opts.arity, None);
    /// ```
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// The arity used for resolution: the override, else the body's own.
    pub fn effective_arity(&self, declared: Option<usize>) -> Option<usize> {
        self.arity.or(declared)
    }
}
