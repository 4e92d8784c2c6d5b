//! Rule evaluation
//!
//! Nothing is evaluated until the form is armed with [`Form::start_valid`]
//! (or implicitly by [`Form::group_is_valid`]). Arming is one-way.
//!
//! Per field, rules run in declaration order. Every failing rule marks the
//! field as errored; the stored message is the one of the last failing rule.
//! A validator that returns an error is contained: the field is marked with
//! the generic validation-error message and evaluation continues.

use crate::form::Form;
use std::cell::Cell;
use vuf_core::cell::{ReactiveCell, Reactivity};
use vuf_core::{FieldValue, VufError, VufResult};

/// Clears the per-field evaluation flag on scope exit.
struct EvalGuard<'a>(&'a Cell<bool>);

impl<'a> EvalGuard<'a> {
	fn enter(flag: &'a Cell<bool>) -> Option<Self> {
		if flag.replace(true) {
			None
		} else {
			Some(Self(flag))
		}
	}
}

impl Drop for EvalGuard<'_> {
	fn drop(&mut self) {
		self.0.set(false);
	}
}

impl<R: Reactivity> Form<R> {
	/// Arm the form. There is no way to disarm it.
	pub fn start_valid(&self) {
		if !self.inner.armed.get_untracked() {
			self.inner.armed.set(true);
		}
	}

	pub fn is_armed(&self) -> bool {
		self.inner.armed.get()
	}

	/// Evaluate the rules of `name` and record the result on the field.
	///
	/// Returns `false` without evaluating anything while the form is not armed.
	/// A call reaching a field that is already being evaluated returns the
	/// current error flag.
	pub fn is_error_field(&self, name: &str) -> bool {
		if !self.is_armed() {
			return false;
		}
		let Some(field) = self.get_field_object(name) else {
			tracing::warn!("is_error_field: no field named {:?}", name);
			return false;
		};
		let Some(_guard) = EvalGuard::enter(&field.evaluating) else {
			tracing::debug!("field {:?} is already being validated", name);
			return field.validation.borrow().error;
		};
		let env = self.environment();
		let mut has_error = false;
		let mut message = String::new();
		for rule in field.rules() {
			let Some(validate) = env.validator(rule.name()) else {
				tracing::debug!("validator {:?} is not registered, rule skipped", rule.name());
				continue;
			};
			let value = field.get();
			match validate(&value, self, rule.params()) {
				Ok(true) => {}
				Ok(false) => {
					message = env.message_for(rule.name(), rule.params());
					has_error = true;
				}
				Err(err) => {
					tracing::error!("validation error [{}]: {}", rule.name(), err);
					message = env.validation_error_message();
					has_error = true;
				}
			}
		}

		{
			let mut state = field.validation.borrow_mut();
			state.error = has_error;
			state.message = if has_error { message } else { String::new() };
		}
		field.started.set(true);
		has_error
	}

	/// Arm the form and validate `names` (all fields when `None` or empty).
	///
	/// `"parent.child"` addresses field `child` of the form held by `parent`.
	/// A nested lookup that fails is logged and does not affect the result.
	pub fn group_is_valid(&self, names: Option<&[&str]>) -> bool {
		self.start_valid();
		let targets: Vec<&str> = match names {
			Some(names) if !names.is_empty() => names.to_vec(),
			_ => self
				.field_names()
				.into_iter()
				.filter(|name| !name.starts_with('$'))
				.collect(),
		};

		let mut valid = true;
		for name in targets {
			if name.starts_with('$') {
				continue;
			}
			if name.contains('.') {
				match self.nested_field_error(name) {
					Ok(true) => valid = false,
					Ok(false) => {}
					Err(err) => tracing::error!("error processing nested field {}: {}", name, err),
				}
			} else if self.is_error_field(name) {
				valid = false;
			}
		}
		valid
	}

	/// Validate every field.
	pub fn validate(&self) -> bool {
		self.group_is_valid(None)
	}

	fn nested_field_error(&self, path: &str) -> VufResult<bool> {
		let mut segments = path.split('.');
		let parent = segments.next().unwrap_or_default();
		let child = segments.next().unwrap_or_default();

		let Some(FieldValue::Form(nested)) = self.get_field_value(parent) else {
			return Ok(false);
		};
		if nested.field_value(child).is_none() {
			return Err(VufError::UnknownField(path.to_string()));
		}
		Ok(nested.is_error_field(child))
	}

	/// Re-validate each field whenever its value changes.
	///
	/// With `immediate`, fields are validated right away and on every change.
	/// Otherwise validation starts once the form is armed. Fields whose name
	/// contains `$` are not watched. The subscriptions live as long as the form;
	/// calling this again replaces the previous ones.
	pub fn validate_watch(&self, immediate: bool) {
		let previous = std::mem::take(&mut *self.inner.watchers.borrow_mut());
		drop(previous);

		let names: Vec<String> = self
			.field_names()
			.into_iter()
			.filter(|name| !name.contains('$'))
			.map(str::to_string)
			.collect();

		for name in names {
			let form = self.downgrade();
			let watcher = self.reactivity().effect(Box::new(move || {
				let Some(form) = form.upgrade() else {
					return;
				};
				let Some(field) = form.get_field_object(&name) else {
					return;
				};
				let _ = field.get();
				if immediate || form.is_armed() {
					form.is_error_field(&name);
				}
			}));
			self.inner.watchers.borrow_mut().push(watcher);
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::{FormDefinition, field};
	use rstest::rstest;
	use std::rc::Rc;
	use vuf_core::{RuleEnvironment, rule, validator};

	fn form_with(env: Rc<RuleEnvironment>, def: FormDefinition) -> Form {
		Form::with_options(def, crate::FormOptions::new().environment(env))
	}

	#[test]
	fn test_unarmed_form_reports_no_error() {
		let form = Form::new(FormDefinition::new().field("name", field("").validate([rule::required()])));
		assert!(!form.is_error_field("name"));
		assert!(!form.get_field_object("name").unwrap().has_started_validation());
	}

	#[rstest]
	#[case("", true)]
	#[case("x", false)]
	fn test_required(#[case] value: &str, #[case] error: bool) {
		let form = Form::new(FormDefinition::new().field("name", field(value).validate([rule::required()])));
		form.start_valid();
		assert_eq!(form.is_error_field("name"), error);
		assert_eq!(form.validation("name").unwrap().error, error);
		assert!(form.get_field_object("name").unwrap().has_started_validation());
	}

	#[test]
	fn test_last_failing_message_wins() {
		let env = Rc::new(RuleEnvironment::new());
		env.set_locale("en");
		env.register_validator("never", validator(|_, _, _| Ok(false))).unwrap();
		let form = form_with(
			Rc::clone(&env),
			FormDefinition::new().field("name", field("").validate([rule::required(), "never".into()])),
		);
		form.start_valid();
		assert!(form.is_error_field("name"));
		assert_eq!(form.validation("name").unwrap().message, "Validation error: never");
	}

	#[test]
	fn test_validator_error_is_contained() {
		let env = Rc::new(RuleEnvironment::new());
		env.set_locale("en");
		let form = form_with(
			env,
			FormDefinition::new().field("confirm", field("a").validate([rule::same_as("password")])),
		);
		form.start_valid();
		assert!(form.is_error_field("confirm"));
		assert_eq!(
			form.validation("confirm").unwrap().message,
			"An error occurred during validation."
		);
	}

	#[test]
	fn test_unknown_validator_is_skipped() {
		let env = Rc::new(RuleEnvironment::empty());
		let form = form_with(env, FormDefinition::new().field("name", field("").validate([rule::required()])));
		form.start_valid();
		assert!(!form.is_error_field("name"));
	}

	#[test]
	fn test_message_cleared_after_fix() {
		let form = Form::new(FormDefinition::new().field("name", field("").validate([rule::required()])));
		form.start_valid();
		assert!(form.is_error_field("name"));
		assert!(!form.validation("name").unwrap().message.is_empty());

		form.set_field_value("name", "Taro").unwrap();
		assert!(!form.is_error_field("name"));
		assert_eq!(form.validation("name").unwrap().message, "");
	}

	#[test]
	fn test_empty_rule_list_resets_state() {
		let form = Form::new(FormDefinition::new().field("memo", field("").validate(Vec::<vuf_core::Rule>::new())));
		form.get_field_object("memo").unwrap().validation.borrow_mut().error = true;
		form.start_valid();
		assert!(!form.is_error_field("memo"));
		assert_eq!(form.validation("memo").unwrap(), crate::FieldValidation::default());
		assert!(form.get_field_object("memo").unwrap().has_started_validation());
	}

	#[test]
	fn test_unknown_field_reports_no_error() {
		let form = Form::new(FormDefinition::new());
		form.start_valid();
		assert!(!form.is_error_field("missing"));
	}

	#[test]
	fn test_group_is_valid_arms_and_skips_internal() {
		let form = Form::new(
			FormDefinition::new()
				.field("name", field("").validate([rule::required()]))
				.field("$state", field("").validate([rule::required()])),
		);
		assert!(!form.is_armed());
		assert!(!form.group_is_valid(Some(&["name"][..])));
		assert!(form.is_armed());

		form.set_field_value("name", "Taro").unwrap();
		assert!(form.validate());
		assert!(form.group_is_valid(Some(&["$state"][..])));
	}

	#[test]
	fn test_reentrant_evaluation_returns_current_flag() {
		let env = Rc::new(RuleEnvironment::new());
		env.register_validator(
			"selfCheck",
			validator(|_, form, _| Ok(!form.is_error_field("name"))),
		)
		.unwrap();
		let form = form_with(env, FormDefinition::new().field("name", field("").validate(["selfCheck"])));
		form.start_valid();
		assert!(!form.is_error_field("name"));
		assert!(!form.get_field_object("name").unwrap().evaluating.get());
	}

	#[test]
	fn test_validate_watch_immediate_on_plain_cells() {
		let form = Form::new(FormDefinition::new().field("name", field("").validate([rule::required()])));
		form.validate_watch(true);
		// not armed, so the immediate run records nothing
		assert!(!form.validation("name").unwrap().error);
		form.start_valid();
		form.validate_watch(true);
		assert!(form.validation("name").unwrap().error);
	}
}
