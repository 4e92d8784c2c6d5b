//! Validator Registry
//!
//! Maps rule names to validator functions. A validator receives the field
//! value, a handle to the owning form and the rule's positional parameters,
//! and answers whether the value passes. Returning `Err` means the validator
//! could not decide; the form records that as a failed rule.
//!
//! Registration is strict: [`ValidatorRegistry::register`] refuses to
//! shadow an existing name and [`ValidatorRegistry::replace`] refuses to
//! invent a new one.

mod builtin;

pub use builtin::{
	any_condition, integer, is_email, length, max_length, positive_integer, required, same_as,
};

use crate::error::{ValidatorError, VufError, VufResult};
use crate::handle::FormHandle;
use crate::value::FieldValue;
use indexmap::IndexMap;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

pub type ValidatorFn = Rc<dyn Fn(&FieldValue, &dyn FormHandle, &[Value]) -> Result<bool, ValidatorError>>;

/// Wraps a closure as a [`ValidatorFn`].
pub fn validator<F>(f: F) -> ValidatorFn
where
	F: Fn(&FieldValue, &dyn FormHandle, &[Value]) -> Result<bool, ValidatorError> + 'static,
{
	Rc::new(f)
}

/// Named validator functions, kept in registration order.
#[derive(Clone, Default)]
pub struct ValidatorRegistry {
	validators: IndexMap<String, ValidatorFn>,
}

impl ValidatorRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry holding the built-in validators
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		for (name, f) in builtin::builtins() {
			registry.validators.insert(name.to_string(), f);
		}
		registry
	}

	/// Register a validator under a new name
	///
	/// # Errors
	///
	/// Returns [`VufError::ValidatorExists`] if `name` is already taken.
	pub fn register(&mut self, name: impl Into<String>, f: ValidatorFn) -> VufResult<()> {
		let name = name.into();
		if self.validators.contains_key(&name) {
			return Err(VufError::ValidatorExists(name));
		}
		self.validators.insert(name, f);
		Ok(())
	}

	/// Replace the validator registered under `name`
	///
	/// # Errors
	///
	/// Returns [`VufError::ValidatorMissing`] if nothing is registered under `name`.
	pub fn replace(&mut self, name: &str, f: ValidatorFn) -> VufResult<()> {
		match self.validators.get_mut(name) {
			Some(slot) => {
				*slot = f;
				Ok(())
			}
			None => Err(VufError::ValidatorMissing(name.to_string())),
		}
	}

	pub fn get(&self, name: &str) -> Option<ValidatorFn> {
		self.validators.get(name).cloned()
	}

	pub fn contains(&self, name: &str) -> bool {
		self.validators.contains_key(name)
	}

	/// Snapshot of the whole mapping.
	pub fn get_all(&self) -> IndexMap<String, ValidatorFn> {
		self.validators.clone()
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.validators.keys().map(String::as_str)
	}

	pub fn len(&self) -> usize {
		self.validators.len()
	}

	pub fn is_empty(&self) -> bool {
		self.validators.is_empty()
	}
}

impl fmt::Debug for ValidatorRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ValidatorRegistry")
			.field("validators", &self.validators.keys().collect::<Vec<_>>())
			.finish()
	}
}

/// Positional parameter `index` of `rule` as a length.
pub(crate) fn usize_param(rule: &str, params: &[Value], index: usize) -> Result<usize, ValidatorError> {
	params
		.get(index)
		.and_then(Value::as_u64)
		.map(|n| n as usize)
		.ok_or_else(|| ValidatorError::InvalidParam {
			rule: rule.to_string(),
			index,
			expected: "a non-negative integer",
		})
}

/// Positional parameter `index` of `rule` as a string.
pub(crate) fn str_param<'a>(
	rule: &str,
	params: &'a [Value],
	index: usize,
) -> Result<&'a str, ValidatorError> {
	params
		.get(index)
		.and_then(Value::as_str)
		.ok_or_else(|| ValidatorError::InvalidParam {
			rule: rule.to_string(),
			index,
			expected: "a string",
		})
}
