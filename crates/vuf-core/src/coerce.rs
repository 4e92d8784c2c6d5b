//! Loose value coercions
//!
//! Field values come from UI inputs and arrive as whatever the host toolkit
//! produced: numbers typed as strings, booleans, nulls, lists. Validators and
//! extraction compare them through the conversions in this module:
//!
//! | Input            | [`to_js_string`]         | [`to_js_number`]      |
//! |------------------|--------------------------|-----------------------|
//! | `null`           | `"null"`                 | `0`                   |
//! | `true` / `false` | `"true"` / `"false"`     | `1` / `0`             |
//! | `"  42 "`        | `"  42 "`                | `42`                  |
//! | `""`             | `""`                     | `0`                   |
//! | `"abc"`          | `"abc"`                  | NaN                   |
//! | `[1, 2]`         | `"1,2"`                  | NaN                   |
//! | `{"a": 1}`       | `{"a":1}`                | NaN                   |
//! | nested form      | its JSON text            | [`CoercionError`]     |

use crate::value::FieldValue;
use serde_json::Value;

/// Raised when a value has no numeric form at all.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("cannot convert {0} to a number")]
pub struct CoercionError(pub String);

/// String form of a field value.
pub fn to_js_string(value: &FieldValue) -> String {
	match value {
		FieldValue::Json(json) => json_to_js_string(json),
		FieldValue::Form(form) => Value::Object(form.get_json()).to_string(),
		FieldValue::List(items) => items
			.iter()
			.map(|item| {
				if item.is_null() {
					String::new()
				} else {
					to_js_string(item)
				}
			})
			.collect::<Vec<_>>()
			.join(","),
	}
}

/// String form of a plain JSON value.
pub fn json_to_js_string(value: &Value) -> String {
	match value {
		Value::Null => "null".to_string(),
		Value::Bool(b) => b.to_string(),
		Value::Number(n) => {
			if n.is_f64() {
				format_number(n.as_f64().unwrap_or(f64::NAN))
			} else {
				n.to_string()
			}
		}
		Value::String(s) => s.clone(),
		Value::Array(items) => items
			.iter()
			.map(|item| match item {
				Value::Null => String::new(),
				other => json_to_js_string(other),
			})
			.collect::<Vec<_>>()
			.join(","),
		Value::Object(_) => value.to_string(),
	}
}

/// Numeric form of a field value.
///
/// Values without a sensible number produce NaN. Only nested forms fail
/// outright, since they cannot be flattened to a scalar.
pub fn to_js_number(value: &FieldValue) -> Result<f64, CoercionError> {
	match value {
		FieldValue::Json(json) => Ok(json_to_js_number(json)),
		FieldValue::Form(_) => Err(CoercionError("a nested form".to_string())),
		FieldValue::List(_) => Ok(parse_js_number(&to_js_string(value))),
	}
}

pub fn json_to_js_number(value: &Value) -> f64 {
	match value {
		Value::Null => 0.0,
		Value::Bool(b) => {
			if *b {
				1.0
			} else {
				0.0
			}
		}
		Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
		Value::String(s) => parse_js_number(s),
		Value::Array(_) => parse_js_number(&json_to_js_string(value)),
		Value::Object(_) => f64::NAN,
	}
}

/// Parses numeric text the way form inputs are read: surrounding whitespace
/// is ignored, empty text is zero, and radix prefixes are honoured.
pub fn parse_js_number(text: &str) -> f64 {
	let trimmed = text.trim();
	if trimmed.is_empty() {
		return 0.0;
	}
	match trimmed {
		"Infinity" | "+Infinity" => return f64::INFINITY,
		"-Infinity" => return f64::NEG_INFINITY,
		_ => {}
	}
	for (prefixes, radix) in [(["0x", "0X"], 16), (["0o", "0O"], 8), (["0b", "0B"], 2)] {
		for prefix in prefixes {
			if let Some(digits) = trimmed.strip_prefix(prefix) {
				return u64::from_str_radix(digits, radix)
					.map(|n| n as f64)
					.unwrap_or(f64::NAN);
			}
		}
	}
	// `f64::from_str` also accepts words such as "inf" and "NaN".
	let numeric = trimmed
		.chars()
		.all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
	if !numeric {
		return f64::NAN;
	}
	trimmed.parse::<f64>().unwrap_or(f64::NAN)
}

pub fn is_truthy(value: &Value) -> bool {
	match value {
		Value::Null => false,
		Value::Bool(b) => *b,
		Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
		Value::String(s) => !s.is_empty(),
		Value::Array(_) | Value::Object(_) => true,
	}
}

/// Formats a number without a trailing `.0` for integral values.
pub fn format_number(n: f64) -> String {
	if n.is_nan() {
		"NaN".to_string()
	} else if n.is_infinite() {
		if n > 0.0 {
			"Infinity".to_string()
		} else {
			"-Infinity".to_string()
		}
	} else if n.trunc() == n && n.abs() < 1e21 {
		(n as i128).to_string()
	} else {
		n.to_string()
	}
}

/// JSON number for `n`, preferring an integer representation. Non-finite
/// input has no JSON form and yields `None`.
pub fn number_to_json(n: f64) -> Option<Value> {
	if !n.is_finite() {
		return None;
	}
	// 2^53: the largest range in which every integer is exactly representable
	if n.trunc() == n && n.abs() <= 9_007_199_254_740_992.0 {
		return Some(Value::from(n as i64));
	}
	serde_json::Number::from_f64(n).map(Value::Number)
}

/// Length in UTF-16 code units, the unit browser inputs count in.
pub fn utf16_len(text: &str) -> usize {
	text.encode_utf16().count()
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(json!(null), "null")]
	#[case(json!(true), "true")]
	#[case(json!(30), "30")]
	#[case(json!(30.0), "30")]
	#[case(json!(1.5), "1.5")]
	#[case(json!("text"), "text")]
	#[case(json!([1, null, "a"]), "1,,a")]
	#[case(json!({"a": 1}), "{\"a\":1}")]
	fn test_json_to_js_string(#[case] value: Value, #[case] expected: &str) {
		assert_eq!(json_to_js_string(&value), expected);
	}

	#[rstest]
	#[case("42", 42.0)]
	#[case("  42 ", 42.0)]
	#[case("", 0.0)]
	#[case("-1.5", -1.5)]
	#[case("1e3", 1000.0)]
	#[case("0x1F", 31.0)]
	#[case("0b101", 5.0)]
	#[case("Infinity", f64::INFINITY)]
	fn test_parse_js_number(#[case] text: &str, #[case] expected: f64) {
		assert_eq!(parse_js_number(text), expected);
	}

	#[rstest]
	#[case("abc")]
	#[case("12abc")]
	#[case("inf")]
	#[case("NaN")]
	#[case("1e")]
	#[case(".")]
	fn test_parse_js_number_nan(#[case] text: &str) {
		assert!(parse_js_number(text).is_nan());
	}

	#[test]
	fn test_json_to_js_number_scalars() {
		assert_eq!(json_to_js_number(&json!(null)), 0.0);
		assert_eq!(json_to_js_number(&json!(true)), 1.0);
		assert_eq!(json_to_js_number(&json!([7])), 7.0);
		assert!(json_to_js_number(&json!([1, 2])).is_nan());
		assert!(json_to_js_number(&json!({})).is_nan());
	}

	#[rstest]
	#[case(json!(null), false)]
	#[case(json!(0), false)]
	#[case(json!(""), false)]
	#[case(json!(false), false)]
	#[case(json!("0"), true)]
	#[case(json!([]), true)]
	#[case(json!(-1), true)]
	fn test_is_truthy(#[case] value: Value, #[case] expected: bool) {
		assert_eq!(is_truthy(&value), expected);
	}

	#[test]
	fn test_number_to_json_prefers_integers() {
		assert_eq!(number_to_json(30.0), Some(json!(30)));
		assert_eq!(number_to_json(2.5), Some(json!(2.5)));
		assert_eq!(number_to_json(f64::NAN), None);
	}

	#[test]
	fn test_utf16_len_counts_code_units() {
		assert_eq!(utf16_len("abc"), 3);
		assert_eq!(utf16_len("名前"), 2);
		assert_eq!(utf16_len("😀"), 2);
	}
}
