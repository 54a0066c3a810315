//! # Title Formatting
//!
//! Every generated test case gets a title computed from its row. A title comes from
//! either a format string (see [`format_title`]) or a function of the row's values.
//! Neither form appends the row index.

mod format;

pub use format::format_title;

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Title-producing function over a row's normalized values.
pub type TitleFn = Arc<dyn Fn(&[Value]) -> String + Send + Sync>;

/// Template used to title each generated test case.
///
/// # Examples
///
/// ```rust
/// use each_case::{TitleTemplate, Value};
/// let row = [Value::from(2), Value::from(3)];
///
/// let fmt = TitleTemplate::from("%d * %d");
/// assert_eq!(fmt.render(&row), "2 * 3");
///
/// let func = TitleTemplate::function(|v: &[Value]| format!("product of {} values", v.len()));
/// assert_eq!(func.render(&row), "product of 2 values");
/// ```
#[derive(Clone)]
pub enum TitleTemplate {
    Format(String),
    Function(TitleFn),
}

impl TitleTemplate {
    /// Wraps a title function; any `Display` result becomes the title verbatim.
    pub fn function<F, T>(f: F) -> Self
    where
        F: Fn(&[Value]) -> T + Send + Sync + 'static,
        T: fmt::Display,
    {
        Self::Function(Arc::new(move |values: &[Value]| f(values).to_string()))
    }

    /// Renders the title for one row.
    pub fn render(&self, values: &[Value]) -> String {
        match self {
            Self::Format(template) => format_title(template, values),
            Self::Function(f) => f(values),
        }
    }
}

impl fmt::Debug for TitleTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Format(template) => f.debug_tuple("Format").field(template).finish(),
            Self::Function(_) => f.write_str("Function(..)"),
        }
    }
}

impl From<&str> for TitleTemplate {
    fn from(template: &str) -> Self {
        Self::Format(template.to_string())
    }
}

impl From<String> for TitleTemplate {
    fn from(template: String) -> Self {
        Self::Format(template)
    }
}

impl From<TitleFn> for TitleTemplate {
    fn from(f: TitleFn) -> Self {
        Self::Function(f)
    }
}
