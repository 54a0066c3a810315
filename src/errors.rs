//! each-case error handling.
//!
//! A single diagnostic enum covers every failure the engine can report. Everything
//! else in the expansion path (row normalization, padding, title rendering) is total
//! and never produces an error.

use miette::Diagnostic;
use thiserror::Error;

/// Errors surfaced by registrar invocations and by hosts.
#[derive(Error, Diagnostic, Debug, Clone, PartialEq, Eq)]
#[diagnostic(url(docsrs))]
pub enum Error {
    #[error("Registration error: no ambient registry installed (expected `{expected}`)")]
    #[diagnostic(
        code(each_case::ambient::missing),
        help("install one with `ambient::install`, or pass a registry explicitly with `each_with`")
    )]
    AmbientMissing { expected: &'static str },

    #[error("Registration error: the ambient registry is not a `{expected}`")]
    #[diagnostic(
        code(each_case::ambient::incompatible),
        help("the installed registry uses a different context or output type than this test body")
    )]
    AmbientIncompatible { expected: &'static str },

    #[error("Registration error: registry does not support `{variant}`")]
    #[diagnostic(code(each_case::registry::unsupported_variant))]
    UnsupportedVariant { variant: &'static str },

    #[error("Arity error: row {row} has {len} values but the test body takes {arity}")]
    #[diagnostic(
        code(each_case::arity::row_too_long),
        help("shorten the row, raise the arity, or use `Truncation::Silent`")
    )]
    RowTooLong { row: usize, len: usize, arity: usize },

    #[error("Host error: {message}")]
    #[diagnostic(code(each_case::host))]
    Host { message: String },
}

impl Error {
    /// Builds a host-side registration failure.
    pub fn host(message: impl Into<String>) -> Self {
        Self::Host {
            message: message.into(),
        }
    }

    /// Get error code suffix, stable across releases.
    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::AmbientMissing { .. } => "ambient_missing",
            Self::AmbientIncompatible { .. } => "ambient_incompatible",
            Self::UnsupportedVariant { .. } => "unsupported_variant",
            Self::RowTooLong { .. } => "row_too_long",
            Self::Host { .. } => "host",
        }
    }
}
