//! Form engine for vuf
//!
//! A [`Form`] is built from a [`FormDefinition`] and keeps one reactive cell
//! per field. Around those cells it provides:
//! - Emit handlers, the hook custom validators call into
//! - Ingestion of plain JSON objects, including nested forms ([`Form::set_data`])
//! - Extraction back to JSON ([`Form::get_json`] and friends)
//! - Rule-based validation, on demand or watched ([`Form::validate_watch`])
//!
//! ## Example
//!
//! ```
//! use serde_json::json;
//! use vuf_core::rule;
//! use vuf_forms::{Form, FormDefinition, field};
//!
//! let form = Form::new(
//! 	FormDefinition::new()
//! 		.field("name", field("").validate([rule::required()]))
//! 		.field("email", field("").validate([rule::is_email()]))
//! 		.field("age", field(30)),
//! );
//!
//! form.set_data(&json!({"Name": "John"})).unwrap();
//! assert_eq!(serde_json::Value::Object(form.get_json()), json!({"name": "John", "age": 30}));
//! assert!(!form.group_is_valid(Some(&["email"][..])));
//! ```

pub mod extract;
pub mod field;
pub mod form;
pub mod ingest;
pub mod schema;
pub mod validation;

pub use extract::ExtractOptions;
pub use field::{FieldDef, FieldObject, FieldType, FieldValidation, FormDefinition, field};
pub use form::{EmitFn, FieldRef, Form, FormOptions, WeakForm, downcast_form};
pub use ingest::{Assigners, head_lower, head_upper};
pub use schema::{FormSchema, SubForm};

/// Everything needed to define and use forms.
pub mod prelude {
	pub use crate::{
		Assigners, ExtractOptions, FieldDef, FieldType, Form, FormDefinition, FormOptions,
		FormSchema, SubForm, field,
	};
	pub use vuf_core::{FieldValue, PlainReactivity, Reactivity, Rule, RuleEnvironment, rule};
}
