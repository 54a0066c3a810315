//! Parameter rows and their normalization.
//!
//! A row is either a single scalar or an ordered sequence of values. Every
//! consumer works on the normalized form, where a scalar is a one-element sequence.

use crate::value::Value;

/// One entry of a parameter set.
#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    Scalar(Value),
    Values(Vec<Value>),
}

impl Row {
    /// Returns the row as an ordered sequence of values.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use each_case::{Row, Value};
    /// assert_eq!(Row::from(7).normalize(), vec![Value::from(7)]);
    /// assert_eq!(Row::from(vec![1, 2]).normalize(), vec![Value::from(1), Value::from(2)]);
    /// ```
    pub fn normalize(&self) -> Vec<Value> {
        match self {
            Row::Scalar(v) => vec![v.clone()],
            Row::Values(values) => values.clone(),
        }
    }

    pub fn into_values(self) -> Vec<Value> {
        match self {
            Row::Scalar(v) => vec![v],
            Row::Values(values) => values,
        }
    }

    /// Length of the normalized row.
    pub fn len(&self) -> usize {
        match self {
            Row::Scalar(_) => 1,
            Row::Values(values) => values.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A `Value::List` is already an ordered sequence and becomes the row's values.
impl From<Value> for Row {
    fn from(value: Value) -> Self {
        match value {
            Value::List(items) => Row::Values(items),
            other => Row::Scalar(other),
        }
    }
}

impl From<serde_json::Value> for Row {
    fn from(json: serde_json::Value) -> Self {
        Row::from(Value::from(json))
    }
}

impl<T: Into<Value>> From<Vec<T>> for Row {
    fn from(values: Vec<T>) -> Self {
        Row::Values(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Row {
    fn from(values: [T; N]) -> Self {
        Row::Values(values.into_iter().map(Into::into).collect())
    }
}

macro_rules! impl_scalar_row {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Row {
                fn from(v: $ty) -> Self {
                    Row::Scalar(Value::from(v))
                }
            }
        )*
    };
}

impl_scalar_row!(bool, i32, i64, u32, u64, usize, f32, f64, &str, String);

/// Normalizes a whole parameter set.
pub fn normalize_all(rows: &[Row]) -> Vec<Vec<Value>> {
    rows.iter().map(Row::normalize).collect()
}

/// Builds a [`Row`] of heterogeneous values.
///
/// ```rust
/// use each_case::{row, Row, Value};
/// let r = row![0, "foo", true];
/// assert_eq!(r.len(), 3);
/// assert_eq!(r.normalize()[1], Value::from("foo"));
/// ```
#[macro_export]
macro_rules! row {
    ($($value:expr),* $(,)?) => {
        $crate::Row::Values(vec![$($crate::Value::from($value)),*])
    };
}
