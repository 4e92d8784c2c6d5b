//! # vuf
//!
//! Reactive form modeling with rule-based validation and plain JSON extraction.
//!
//! A form is declared as a set of named fields, each with an initial value and
//! an ordered list of validation rules. The form keeps every field value in a
//! reactive cell, ingests plain JSON objects (building nested forms as needed),
//! extracts its state back to JSON, and validates fields against a registry of
//! named validators with locale-keyed messages.
//!
//! ## Feature Flags
//!
//! - `forms` - The form engine ([`forms`])
//! - `reactive` - Signal/Effect runtime and the [`SignalReactivity`] adapter
//! - `full` (default) - Everything
//!
//! The [`core`] module (values, rules, registries, environments) is always available.
//!
//! ## Quick Example
//!
//! ```
//! # #[cfg(feature = "forms")]
//! # {
//! use vuf::prelude::*;
//! use serde_json::json;
//!
//! let login = Form::new(
//! 	FormDefinition::new()
//! 		.field("mail", field("").label("Mail").validate([rule::required(), rule::is_email()]))
//! 		.field("password", field("").validate([rule::required(), rule::max_length(64)])),
//! );
//!
//! login.set_data(&json!({"Mail": "taro@example.com"})).unwrap();
//! assert!(!login.validate());
//! assert!(login.validation("password").unwrap().error);
//! assert_eq!(serde_json::Value::Object(login.get_json()), json!({"mail": "taro@example.com"}));
//! # }
//! ```

pub mod core;
#[cfg(feature = "forms")]
pub mod forms;
#[cfg(feature = "reactive")]
pub mod reactive;

pub use vuf_core::{
	EnvironmentConfig, FieldValue, FormHandle, MessageMap, PlainReactivity, ReactiveCell,
	Reactivity, Rule, RuleEnvironment, ValidatorError, ValidatorFn, VufError, VufResult,
	get_locale, get_messages, get_validator_map, make_rule, merge_messages, override_validator,
	register_validator, rule, set_locale, set_messages, validator,
};

#[cfg(feature = "forms")]
pub use vuf_forms::{
	Assigners, ExtractOptions, FieldDef, FieldType, FieldValidation, Form, FormDefinition,
	FormOptions, FormSchema, SubForm, WeakForm, field,
};

#[cfg(feature = "reactive")]
pub use vuf_reactive::{Effect, Signal, SignalReactivity};

/// Prelude module for convenient imports
pub mod prelude {
	pub use crate::{
		FieldValue, PlainReactivity, Reactivity, Rule, RuleEnvironment, VufError, VufResult, rule,
	};

	#[cfg(feature = "forms")]
	pub use crate::{
		Assigners, ExtractOptions, FieldType, Form, FormDefinition, FormOptions, FormSchema,
		SubForm, field,
	};

	#[cfg(feature = "reactive")]
	pub use crate::SignalReactivity;
}
