//! Rule environment
//!
//! A [`RuleEnvironment`] owns one Validator Registry and one Message
//! Registry. Forms hold an `Rc` to the environment they validate against,
//! which is the per-thread [`RuleEnvironment::shared`] instance unless one is
//! passed explicitly. Independent environments never see each other's
//! registrations.
//!
//! ```
//! use vuf_core::environment::RuleEnvironment;
//! use vuf_core::validators::validator;
//!
//! let env = RuleEnvironment::new();
//! env.register_validator("even", validator(|value, _form, _params| {
//! 	Ok(value.as_json().and_then(|v| v.as_i64()).is_some_and(|n| n % 2 == 0))
//! }))
//! .unwrap();
//! assert!(env.validator("even").is_some());
//! assert!(RuleEnvironment::new().validator("even").is_none());
//! ```

use crate::config::EnvironmentConfig;
use crate::error::VufResult;
use crate::messages::{MessageMap, MessageRegistry};
use crate::validators::{ValidatorFn, ValidatorRegistry};
use indexmap::IndexMap;
use serde_json::Value;
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

thread_local! {
	static SHARED: Rc<RuleEnvironment> = Rc::new(RuleEnvironment::new());
}

/// Validators and message catalogs consulted during rule evaluation.
#[derive(Debug)]
pub struct RuleEnvironment {
	validators: RefCell<ValidatorRegistry>,
	messages: RefCell<MessageRegistry>,
}

impl Default for RuleEnvironment {
	fn default() -> Self {
		Self::new()
	}
}

impl RuleEnvironment {
	/// Environment seeded with the built-in validators and catalogs.
	pub fn new() -> Self {
		Self::from_parts(ValidatorRegistry::with_builtins(), MessageRegistry::with_builtins())
	}

	/// Environment with no validators and no catalogs.
	pub fn empty() -> Self {
		Self::from_parts(ValidatorRegistry::new(), MessageRegistry::new())
	}

	pub fn from_parts(validators: ValidatorRegistry, messages: MessageRegistry) -> Self {
		Self {
			validators: RefCell::new(validators),
			messages: RefCell::new(messages),
		}
	}

	/// The application-wide environment of the current thread.
	pub fn shared() -> Rc<Self> {
		SHARED.with(Rc::clone)
	}

	/// Built-in environment with `config` applied on top.
	pub fn from_config(config: &EnvironmentConfig) -> Self {
		let env = Self::new();
		env.apply_config(config);
		env
	}

	/// Built-in environment with the configuration file at `path` applied.
	pub fn from_config_path(path: impl AsRef<Path>) -> VufResult<Self> {
		Ok(Self::from_config(&EnvironmentConfig::from_path(path)?))
	}

	/// Merge the configured catalogs, then switch locale if one is set.
	pub fn apply_config(&self, config: &EnvironmentConfig) {
		let mut messages = self.messages.borrow_mut();
		for (locale, partial) in &config.messages {
			messages.merge_messages(locale.clone(), partial.clone());
		}
		if let Some(locale) = &config.locale {
			messages.set_locale(locale.clone());
		}
	}

	pub fn register_validator(&self, name: impl Into<String>, f: ValidatorFn) -> VufResult<()> {
		self.validators.borrow_mut().register(name, f)
	}

	pub fn override_validator(&self, name: &str, f: ValidatorFn) -> VufResult<()> {
		self.validators.borrow_mut().replace(name, f)
	}

	pub fn validator(&self, name: &str) -> Option<ValidatorFn> {
		self.validators.borrow().get(name)
	}

	pub fn get_validator_map(&self) -> IndexMap<String, ValidatorFn> {
		self.validators.borrow().get_all()
	}

	pub fn set_messages(&self, locale: impl Into<String>, messages: MessageMap) {
		self.messages.borrow_mut().set_messages(locale, messages);
	}

	pub fn merge_messages(&self, locale: impl Into<String>, partial: MessageMap) {
		self.messages.borrow_mut().merge_messages(locale, partial);
	}

	pub fn set_locale(&self, locale: impl Into<String>) {
		self.messages.borrow_mut().set_locale(locale);
	}

	pub fn get_locale(&self) -> String {
		self.messages.borrow().get_locale().to_string()
	}

	pub fn get_messages(&self, locale: Option<&str>) -> MessageMap {
		self.messages.borrow().get_messages(locale)
	}

	/// Rendered failure message for a rule in the current locale.
	pub fn message_for(&self, name: &str, params: &[Value]) -> String {
		self.messages.borrow().message_for(name, params)
	}

	pub fn validation_error_message(&self) -> String {
		self.messages.borrow().validation_error_message()
	}
}

/// Register a validator in the shared environment. Fails if the name is taken.
pub fn register_validator(name: impl Into<String>, f: ValidatorFn) -> VufResult<()> {
	RuleEnvironment::shared().register_validator(name, f)
}

/// Replace a validator in the shared environment. Fails if the name is unknown.
pub fn override_validator(name: &str, f: ValidatorFn) -> VufResult<()> {
	RuleEnvironment::shared().override_validator(name, f)
}

pub fn get_validator_map() -> IndexMap<String, ValidatorFn> {
	RuleEnvironment::shared().get_validator_map()
}

pub fn set_messages(locale: impl Into<String>, messages: MessageMap) {
	RuleEnvironment::shared().set_messages(locale, messages);
}

pub fn merge_messages(locale: impl Into<String>, partial: MessageMap) {
	RuleEnvironment::shared().merge_messages(locale, partial);
}

pub fn set_locale(locale: impl Into<String>) {
	RuleEnvironment::shared().set_locale(locale);
}

pub fn get_locale() -> String {
	RuleEnvironment::shared().get_locale()
}

pub fn get_messages(locale: Option<&str>) -> MessageMap {
	RuleEnvironment::shared().get_messages(locale)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::VufError;
	use crate::validators::validator;
	use serde_json::json;

	#[test]
	fn test_empty_environment() {
		let env = RuleEnvironment::empty();
		assert!(env.get_validator_map().is_empty());
		assert_eq!(env.get_locale(), "");
		assert_eq!(env.message_for("required", &[]), "Validation error: required");
	}

	#[test]
	fn test_environments_are_isolated() {
		let a = RuleEnvironment::new();
		let b = RuleEnvironment::new();
		a.set_locale("en");
		a.register_validator("custom", validator(|_, _, _| Ok(true)))
			.unwrap();
		assert_eq!(b.get_locale(), "ja");
		assert!(b.validator("custom").is_none());
	}

	#[test]
	fn test_override_missing_validator() {
		let env = RuleEnvironment::new();
		let err = env
			.override_validator("custom", validator(|_, _, _| Ok(true)))
			.unwrap_err();
		assert!(matches!(err, VufError::ValidatorMissing(_)));
	}

	#[test]
	fn test_apply_config_merges_then_sets_locale() {
		let config = EnvironmentConfig::from_toml_str(
			r#"
locale = "en"

[messages.en]
maxLength = "Up to {0}."
"#,
		)
		.unwrap();
		let env = RuleEnvironment::from_config(&config);
		assert_eq!(env.get_locale(), "en");
		assert_eq!(env.message_for("maxLength", &[json!(3)]), "Up to 3.");
		assert_eq!(env.message_for("required", &[]), "Required.");
	}

	#[test]
	fn test_shared_is_per_thread_singleton() {
		let first = RuleEnvironment::shared();
		let second = RuleEnvironment::shared();
		assert!(Rc::ptr_eq(&first, &second));

		let other_thread_locale = std::thread::spawn(|| {
			set_locale("en");
			get_locale()
		})
		.join()
		.unwrap();
		assert_eq!(other_thread_locale, "en");
		assert_eq!(get_locale(), "ja");
	}
}
