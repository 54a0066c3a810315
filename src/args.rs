//! Final arguments handed to a test body.
//!
//! A row's values become [`Arg::Value`]s. The host's completion callback, when the
//! body runs in async mode, becomes an [`Arg::Done`], and padding slots up to the
//! declared arity are [`Arg::Undefined`].

use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Zero-argument completion signal supplied by the host for async test cases.
///
/// The engine never creates one; it forwards whatever the host passes to
/// [`crate::WrappedTest::call`].
#[derive(Clone)]
pub struct Done(Arc<dyn Fn() + Send + Sync>);

impl Done {
    pub fn new(signal: impl Fn() + Send + Sync + 'static) -> Self {
        Self(Arc::new(signal))
    }

    /// Signals that the async test case has finished.
    pub fn call(&self) {
        (self.0)()
    }

    /// True when both handles refer to the same host callback.
    pub fn same_as(&self, other: &Done) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Done {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Done(..)")
    }
}

/// One positional argument of a test body invocation.
#[derive(Debug, Clone, Default)]
pub enum Arg {
    Value(Value),
    Done(Done),
    #[default]
    Undefined,
}

impl Arg {
    pub fn is_undefined(&self) -> bool {
        matches!(self, Arg::Undefined)
    }

    pub fn value(&self) -> Option<&Value> {
        match self {
            Arg::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn into_value(self) -> Option<Value> {
        match self {
            Arg::Value(v) => Some(v),
            _ => None,
        }
    }

    pub fn done(&self) -> Option<&Done> {
        match self {
            Arg::Done(d) => Some(d),
            _ => None,
        }
    }

    /// Numeric view of a value argument.
    pub fn as_number(&self) -> Option<f64> {
        self.value().and_then(Value::as_number)
    }

    pub fn as_str(&self) -> Option<&str> {
        self.value().and_then(Value::as_str)
    }
}

impl From<Value> for Arg {
    fn from(value: Value) -> Self {
        Arg::Value(value)
    }
}

impl From<Done> for Arg {
    fn from(done: Done) -> Self {
        Arg::Done(done)
    }
}

/// Compares shapes and values; two `Done`s are equal when they share a callback.
impl PartialEq for Arg {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Arg::Value(a), Arg::Value(b)) => a == b,
            (Arg::Done(a), Arg::Done(b)) => a.same_as(b),
            (Arg::Undefined, Arg::Undefined) => true,
            _ => false,
        }
    }
}
