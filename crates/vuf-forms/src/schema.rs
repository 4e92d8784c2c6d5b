//! Nested-form factories
//!
//! A field typed [`FieldType::Form`](crate::FieldType::Form) holds a sub-form,
//! and ingestion builds a fresh one for every `set_data` call. The factory
//! behind that is a [`SubForm`], usually derived from a [`FormSchema`]:
//!
//! ```
//! use vuf_core::{FieldValue, PlainReactivity, VufResult};
//! use vuf_forms::{FieldType, Form, FormDefinition, FormSchema, SubForm, field};
//! use serde_json::json;
//!
//! struct Address;
//!
//! impl FormSchema for Address {
//! 	fn generate() -> VufResult<Form> {
//! 		Ok(Form::new(FormDefinition::new().field("city", field(""))))
//! 	}
//! }
//!
//! let person = Form::new(
//! 	FormDefinition::new()
//! 		.field("name", field(""))
//! 		.field(
//! 			"address",
//! 			field(FieldValue::null()).kind(FieldType::Form(SubForm::of::<Address, PlainReactivity>())),
//! 		),
//! );
//! person.set_data(&json!({"name": "Taro", "address": {"city": "Osaka"}})).unwrap();
//! assert_eq!(person.get_json()["address"], json!({"city": "Osaka"}));
//! ```

use crate::form::Form;
use std::fmt;
use std::rc::Rc;
use vuf_core::cell::{PlainReactivity, Reactivity};
use vuf_core::{FormHandle, VufError, VufResult};

/// A form shape that can be instantiated without arguments.
///
/// Types used as nested form types must override [`FormSchema::generate`];
/// the default reports [`VufError::NotImplemented`].
pub trait FormSchema<R: Reactivity = PlainReactivity>: 'static {
	/// Build a fresh, empty form of this shape.
	fn generate() -> VufResult<Form<R>> {
		Err(VufError::NotImplemented(format!(
			"{}::generate",
			std::any::type_name::<Self>()
		)))
	}
}

/// The bare form has no shape of its own to generate.
impl<R: Reactivity> FormSchema<R> for Form<R> {}

type Factory = Rc<dyn Fn() -> VufResult<Rc<dyn FormHandle>>>;

/// Factory for the nested forms of one field type.
#[derive(Clone)]
pub struct SubForm {
	name: String,
	factory: Factory,
}

impl SubForm {
	/// Wrap any factory closure.
	pub fn new<F>(name: impl Into<String>, factory: F) -> Self
	where
		F: Fn() -> VufResult<Rc<dyn FormHandle>> + 'static,
	{
		Self {
			name: name.into(),
			factory: Rc::new(factory),
		}
	}

	/// Factory calling `S::generate`.
	pub fn of<S, R>() -> Self
	where
		S: FormSchema<R>,
		R: Reactivity,
	{
		Self::new(std::any::type_name::<S>(), || {
			let form = S::generate()?;
			Ok(Rc::new(form) as Rc<dyn FormHandle>)
		})
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Build a fresh sub-form.
	pub fn create(&self) -> VufResult<Rc<dyn FormHandle>> {
		(self.factory)()
	}
}

impl fmt::Debug for SubForm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("SubForm").field(&self.name).finish()
	}
}
