//! Built-in validators

use super::{ValidatorFn, str_param, usize_param, validator};
use crate::coerce::{self, CoercionError};
use crate::error::ValidatorError;
use crate::handle::FormHandle;
use crate::rule::names;
use crate::value::FieldValue;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

/// `local@domain.tld`, unanchored.
static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"[^\s@]+@[^\s@]+\.[^\s@]+").expect("EMAIL_PATTERN: invalid regex pattern")
});

pub(super) fn builtins() -> Vec<(&'static str, ValidatorFn)> {
	vec![
		(names::REQUIRED, validator(required)),
		(names::MAX_LENGTH, validator(max_length)),
		(names::LENGTH, validator(length)),
		(names::ANY_CONDITION, validator(any_condition)),
		(names::SAME_AS, validator(same_as)),
		(names::INTEGER, validator(integer)),
		(names::POSITIVE_INTEGER, validator(positive_integer)),
		(names::IS_EMAIL, validator(is_email)),
	]
}

/// Fails on `null` and on values whose string form is empty.
pub fn required(
	value: &FieldValue,
	_form: &dyn FormHandle,
	_params: &[Value],
) -> Result<bool, ValidatorError> {
	if value.is_null() {
		return Ok(false);
	}
	Ok(coerce::utf16_len(&coerce::to_js_string(value)) >= 1)
}

/// `maxLength(n)`: the string form has at most `n` characters.
pub fn max_length(
	value: &FieldValue,
	_form: &dyn FormHandle,
	params: &[Value],
) -> Result<bool, ValidatorError> {
	let max = usize_param(names::MAX_LENGTH, params, 0)?;
	Ok(coerce::utf16_len(&coerce::to_js_string(value)) <= max)
}

/// `length(n)`: the string form has exactly `n` characters.
pub fn length(
	value: &FieldValue,
	_form: &dyn FormHandle,
	params: &[Value],
) -> Result<bool, ValidatorError> {
	let expected = usize_param(names::LENGTH, params, 0)?;
	Ok(coerce::utf16_len(&coerce::to_js_string(value)) == expected)
}

/// `anyCondition(event, message)`: asks the form's `event` handler.
///
/// Blank values pass without consulting the form.
pub fn any_condition(
	value: &FieldValue,
	form: &dyn FormHandle,
	params: &[Value],
) -> Result<bool, ValidatorError> {
	if value.is_blank() {
		return Ok(true);
	}
	let event = str_param(names::ANY_CONDITION, params, 0)?;
	let message = params.get(1).cloned().unwrap_or(Value::Null);
	let verdict = form.emit(event, &[value.to_json(), message]);
	Ok(coerce::is_truthy(&verdict))
}

/// Not implemented. Compare fields with an `anyCondition` handler or a
/// registered validator instead.
pub fn same_as(
	_value: &FieldValue,
	_form: &dyn FormHandle,
	_params: &[Value],
) -> Result<bool, ValidatorError> {
	Err(ValidatorError::NotImplemented(names::SAME_AS.to_string()))
}

fn is_integral(value: &FieldValue) -> Result<f64, CoercionError> {
	let n = coerce::to_js_number(value)?;
	if n.is_finite() && n.trunc() == n {
		Ok(n)
	} else {
		Err(CoercionError(coerce::to_js_string(value)))
	}
}

pub fn integer(
	value: &FieldValue,
	_form: &dyn FormHandle,
	_params: &[Value],
) -> Result<bool, ValidatorError> {
	Ok(is_integral(value).is_ok())
}

pub fn positive_integer(
	value: &FieldValue,
	_form: &dyn FormHandle,
	_params: &[Value],
) -> Result<bool, ValidatorError> {
	match coerce::to_js_number(value) {
		Ok(n) => Ok(n.is_finite() && n.trunc() == n && n >= 0.0),
		Err(err) => {
			tracing::warn!("positiveInteger: {}", err);
			Ok(false)
		}
	}
}

/// A string of at least five characters shaped like `local@domain.tld`.
pub fn is_email(
	value: &FieldValue,
	_form: &dyn FormHandle,
	_params: &[Value],
) -> Result<bool, ValidatorError> {
	let Some(text) = value.as_str() else {
		return Ok(false);
	};
	Ok(coerce::utf16_len(text) >= 5 && EMAIL_PATTERN.is_match(text))
}
