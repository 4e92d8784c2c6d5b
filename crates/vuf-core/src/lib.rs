//! Core building blocks for vuf forms
//!
//! This crate holds everything the form engine consults but does not own:
//! - Field values and the loose coercions validators compare them with
//! - Rules and the rule builder
//! - The Validator Registry and its built-in validators
//! - Locale-keyed message catalogs
//! - [`RuleEnvironment`], which bundles both registries
//! - The reactive-cell abstraction that host reactivity systems implement

pub mod cell;
pub mod coerce;
pub mod config;
pub mod environment;
pub mod error;
pub mod handle;
pub mod messages;
pub mod rule;
pub mod validators;
pub mod value;

pub use cell::{PlainCell, PlainReactivity, ReactiveCell, Reactivity};
pub use config::EnvironmentConfig;
pub use environment::{
	RuleEnvironment, get_locale, get_messages, get_validator_map, merge_messages,
	override_validator, register_validator, set_locale, set_messages,
};
pub use error::{ValidatorError, VufError, VufResult};
pub use handle::FormHandle;
pub use messages::{MessageMap, MessageRegistry};
pub use rule::{Rule, make_rule};
pub use validators::{ValidatorFn, ValidatorRegistry, validator};
pub use value::FieldValue;

#[doc(hidden)]
pub use serde_json as __serde_json;
