//! Format-string titles.
//!
//! Specifiers are scanned left to right; each one consumes the next row value unless
//! it names a position explicitly (`%2$s`). A specifier with no value left to consume
//! stays in the title as literal text.
//!
//! | spec | output                                             |
//! |------|----------------------------------------------------|
//! | `%d` `%i` | integer, numeric coercion truncated toward zero |
//! | `%f` | number, `%.N f` fixes N decimals                    |
//! | `%s` | display string, `%.N s` keeps the first N chars     |
//! | `%j` | compact JSON                                        |
//! | `%%` | a literal `%`, consumes nothing                     |
//!
//! Precisions above [`MAX_PRECISION`] leave the specifier as literal text without
//! consuming a value.

use crate::value::Value;
use log::trace;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

/// Largest precision honored by `%.Nf` and `%.Ns`.
pub const MAX_PRECISION: usize = 100;

static SPECIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"%(?:([1-9][0-9]*)\$)?(?:\.([0-9]+))?([%dfijs])")
        .unwrap_or_else(|e| unreachable!("specifier pattern is valid: {e}"))
});

/// Substitutes `values` into `template`.
///
/// ```rust
/// use each_case::{title::format_title, Value};
/// let title = format_title("adds %d + %d", &[Value::from(1), Value::from(2)]);
/// assert_eq!(title, "adds 1 + 2");
/// assert_eq!(format_title("100%% of %s", &[]), "100% of %s");
/// ```
pub fn format_title(template: &str, values: &[Value]) -> String {
    let mut cursor = 0;
    let title = SPECIFIER.replace_all(template, |caps: &Captures<'_>| {
        let conversion = caps.get(3).map_or("", |m| m.as_str());
        if conversion == "%" {
            return "%".to_string();
        }
        let precision = match caps.get(2) {
            Some(digits) => match digits.as_str().parse::<usize>() {
                Ok(n) if n <= MAX_PRECISION => Some(n),
                _ => return caps[0].to_string(),
            },
            None => None,
        };
        let value = match caps.get(1) {
            Some(position) => position
                .as_str()
                .parse::<usize>()
                .ok()
                .and_then(|p| values.get(p - 1)),
            None => {
                let next = values.get(cursor);
                if next.is_some() {
                    cursor += 1;
                }
                next
            }
        };
        let Some(value) = value else {
            return caps[0].to_string();
        };
        render_specifier(conversion, precision, value)
    });
    trace!("rendered title {title:?} from template {template:?}");
    title.into_owned()
}

fn render_specifier(conversion: &str, precision: Option<usize>, value: &Value) -> String {
    match conversion {
        "d" | "i" => Value::Number(value.to_number().trunc()).to_string(),
        "f" => {
            let n = value.to_number();
            match precision {
                Some(digits) if n.is_finite() => format!("{:.*}", digits, n),
                _ => Value::Number(n).to_string(),
            }
        }
        "j" => value.to_json_string(),
        _ => {
            let text = value.to_string();
            match precision {
                Some(limit) => text.chars().take(limit).collect(),
                None => text,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn vals(items: serde_json::Value) -> Vec<Value> {
        match Value::from(items) {
            Value::List(values) => values,
            other => vec![other],
        }
    }

    #[test]
    fn test_mixed_specifiers() {
        let values = vals(json!([0, "foo", {"a": 1.2, "b": [3, 2, 1]}]));
        assert_eq!(
            format_title("handles [%d, %s, %j]", &values),
            r#"handles [0, foo, {"a":1.2,"b":[3,2,1]}]"#
        );
    }

    #[rstest]
    #[case("%d", json!([3.9]), "3")]
    #[case("%i", json!([-3.9]), "-3")]
    #[case("%d", json!(["12"]), "12")]
    #[case("%d", json!(["foo"]), "NaN")]
    #[case("%f", json!([1.25]), "1.25")]
    #[case("%.1f", json!([1.26]), "1.3")]
    #[case("%.3s", json!(["abcdef"]), "abc")]
    #[case("%s", json!([null]), "null")]
    #[case("%s", json!([[1, "a"]]), "[1,\"a\"]")]
    #[case("%j", json!(["q\"uote"]), "\"q\\\"uote\"")]
    #[case("%2$s-%1$s", json!(["a", "b"]), "b-a")]
    #[case("%1$s %s %s", json!(["a", "b"]), "a a b")]
    #[case("%3$s", json!(["a"]), "%3$s")]
    #[case("%s and %s", json!(["only"]), "only and %s")]
    #[case("%z %s", json!(["x"]), "%z x")]
    #[case("100%%", json!([1]), "100%")]
    #[case("%%d", json!([1]), "%d")]
    #[case("no specifiers", json!([1, 2]), "no specifiers")]
    #[case("%.70000f", json!([1]), "%.70000f")]
    #[case("%.1000000000f|%d", json!([1]), "%.1000000000f|1")]
    #[case("%.99999999999999999999999s", json!(["a"]), "%.99999999999999999999999s")]
    #[case("%.100f", json!([0]), "0.0000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000000")]
    #[case("%.101s %s", json!(["a"]), "%.101s a")]
    fn test_specifiers(
        #[case] template: &str,
        #[case] row: serde_json::Value,
        #[case] expected: &str,
    ) {
        assert_eq!(format_title(template, &vals(row)), expected);
    }
}
