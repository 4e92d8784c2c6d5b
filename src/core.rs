//! Values, rules, validator and message registries, rule environments.
//!
//! # Examples
//!
//! ```
//! use vuf::core::environment::RuleEnvironment;
//! use vuf::core::validators::validator;
//!
//! let env = RuleEnvironment::new();
//! env.register_validator("even", validator(|value, _form, _params| {
//! 	Ok(vuf::core::coerce::to_js_number(value)? % 2.0 == 0.0)
//! }))
//! .unwrap();
//! assert!(env.validator("even").is_some());
//! ```

pub use vuf_core::*;
