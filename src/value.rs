use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

/// Represents a single parameter value in a row.
///
/// # Examples
///
/// ```rust
/// use each_case::Value;
/// let n = Value::Number(3.14);
/// assert_eq!(n.type_name(), "Number");
/// let s = Value::from("hello");
/// assert_eq!(s.type_name(), "String");
/// let nil = Value::default();
/// assert!(nil.is_nil());
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Nil,
    Bool(bool),
    Number(f64),
    String(String),
    List(Vec<Value>),
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the type name of the value as a string.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use each_case::Value;
    /// let v = Value::Bool(true);
    /// assert_eq!(v.type_name(), "Bool");
    /// ```
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Nil => "Nil",
            Value::Bool(_) => "Bool",
            Value::Number(_) => "Number",
            Value::String(_) => "String",
            Value::List(_) => "List",
            Value::Map(_) => "Map",
        }
    }

    /// Returns true if the value is Nil.
    pub fn is_nil(&self) -> bool {
        matches!(self, Value::Nil)
    }

    /// Returns the contained number if this is a Number value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use each_case::Value;
    /// assert_eq!(Value::from(2).as_number(), Some(2.0));
    /// assert_eq!(Value::from("nope").as_number(), None);
    /// ```
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the contained bool if this is a Bool value.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        match self {
            Value::List(items) => Some(items),
            _ => None,
        }
    }

    /// Numeric coercion used by the `%d`, `%i` and `%f` title specifiers.
    ///
    /// Strings are parsed after trimming (the empty string is zero), booleans map to
    /// 1 and 0, nil is zero, a list coerces through its only element, and anything
    /// else is `NaN`.
    ///
    /// ```rust
    /// use each_case::Value;
    /// assert_eq!(Value::from(" 42 ").to_number(), 42.0);
    /// assert_eq!(Value::Bool(true).to_number(), 1.0);
    /// assert!(Value::from("foo").to_number().is_nan());
    /// ```
    pub fn to_number(&self) -> f64 {
        match self {
            Value::Nil => 0.0,
            Value::Bool(b) => f64::from(u8::from(*b)),
            Value::Number(n) => *n,
            Value::String(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    0.0
                } else {
                    trimmed.parse().unwrap_or(f64::NAN)
                }
            }
            Value::List(items) => match items.as_slice() {
                [] => 0.0,
                [only] => only.to_number(),
                _ => f64::NAN,
            },
            Value::Map(_) => f64::NAN,
        }
    }

    /// Compact JSON text for this value, as used by the `%j` title specifier.
    ///
    /// ```rust
    /// use each_case::Value;
    /// let v = Value::from(vec![Value::from(1.5), Value::from(2)]);
    /// assert_eq!(v.to_json_string(), "[1.5,2]");
    /// ```
    pub fn to_json_string(&self) -> String {
        // Keys are strings and every leaf is serializable, so this cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Helper for formatting numbers the way titles expect them.
    fn fmt_number(f: &mut fmt::Formatter<'_>, n: f64) -> fmt::Result {
        if n.is_nan() {
            write!(f, "NaN")
        } else if n.is_infinite() {
            write!(f, "{}", if n > 0.0 { "Infinity" } else { "-Infinity" })
        } else if let Some(i) = integral(n) {
            write!(f, "{}", i)
        } else {
            write!(f, "{}", n)
        }
    }
}

/// Returns the number as an `i64` when it has no fractional part and fits.
pub(crate) fn integral(n: f64) -> Option<i64> {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 9.0e15 {
        Some(n as i64)
    } else {
        None
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil => write!(f, "null"),
            Value::Bool(b) => write!(f, "{}", b),
            Value::Number(n) => Value::fmt_number(f, *n),
            Value::String(s) => write!(f, "{}", s),
            Value::List(_) | Value::Map(_) => write!(f, "{}", self.to_json_string()),
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Nil => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Number(n) => match integral(*n) {
                Some(i) => serializer.serialize_i64(i),
                None => serializer.serialize_f64(*n),
            },
            Value::String(s) => serializer.serialize_str(s),
            Value::List(items) => serializer.collect_seq(items),
            Value::Map(map) => serializer.collect_map(map),
        }
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Value::from)
    }
}

impl From<serde_json::Value> for Value {
    fn from(json: serde_json::Value) -> Self {
        match json {
            serde_json::Value::Null => Value::Nil,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::List(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Map(
                map.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize, f32, f64);

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::List(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Value::Nil, Into::into)
    }
}

impl From<BTreeMap<String, Value>> for Value {
    fn from(map: BTreeMap<String, Value>) -> Self {
        Value::Map(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integral_numbers_serialize_without_fraction() {
        let v = Value::from(json!({"b": [3, 2, 1], "a": 1.2}));
        assert_eq!(v.to_json_string(), r#"{"a":1.2,"b":[3,2,1]}"#);
    }

    #[test]
    fn test_display_matches_title_conventions() {
        assert_eq!(Value::from(0).to_string(), "0");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
        assert_eq!(Value::Nil.to_string(), "null");
        assert_eq!(Value::from("foo").to_string(), "foo");
        assert_eq!(Value::from(vec![1, 2]).to_string(), "[1,2]");
        assert_eq!(Value::Number(f64::NAN).to_string(), "NaN");
        assert_eq!(Value::Number(f64::NEG_INFINITY).to_string(), "-Infinity");
    }

    #[test]
    fn test_json_round_trip() {
        let source = json!({"name": "row", "tags": ["x", null, true], "n": -7});
        let value = Value::from(source.clone());
        let text = value.to_json_string();
        let back: serde_json::Value = serde_json::from_str(&text).expect("valid json");
        assert_eq!(back, source);
        let again: Value = serde_json::from_str(&text).expect("deserialize value");
        assert_eq!(again, value);
    }

    #[test]
    fn test_numeric_coercion() {
        assert_eq!(Value::Nil.to_number(), 0.0);
        assert_eq!(Value::from("").to_number(), 0.0);
        assert_eq!(Value::from("2.5").to_number(), 2.5);
        assert_eq!(Value::from(vec![7]).to_number(), 7.0);
        assert!(Value::from(vec![1, 2]).to_number().is_nan());
        assert!(Value::Map(BTreeMap::new()).to_number().is_nan());
    }
}
