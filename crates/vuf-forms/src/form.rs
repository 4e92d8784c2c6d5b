//! The form engine
//!
//! A [`Form`] owns one [`FieldObject`] per declared field, an emit-handler
//! table and the armed-validation flag. It is a cheap handle: clones share
//! the same fields.
//!
//! ```
//! use vuf_core::rule;
//! use vuf_forms::{Form, FormDefinition, field};
//!
//! let form = Form::new(
//! 	FormDefinition::new()
//! 		.field("name", field("").validate([rule::required()]))
//! 		.field("age", field(30)),
//! );
//! form.set_field_value("name", "John").unwrap();
//! assert_eq!(form.get_field_value("name").unwrap(), "John");
//! assert_eq!(form.field_names(), vec!["name", "age"]);
//! ```

use crate::field::{FieldObject, FieldValidation, FormDefinition, next_key};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::any::Any;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};
use vuf_core::cell::{PlainReactivity, ReactiveCell, Reactivity};
use vuf_core::{FieldValue, FormHandle, RuleEnvironment, VufError, VufResult};

/// Handler invoked through [`Form::emit`].
pub type EmitFn = Rc<dyn Fn(&[Value]) -> Value>;

/// Construction options
pub struct FormOptions<R: Reactivity = PlainReactivity> {
	emits: Vec<(String, EmitFn)>,
	environment: Option<Rc<RuleEnvironment>>,
	reactivity: R,
}

impl<R: Reactivity> Default for FormOptions<R> {
	fn default() -> Self {
		Self {
			emits: Vec::new(),
			environment: None,
			reactivity: R::default(),
		}
	}
}

impl<R: Reactivity> FormOptions<R> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Register an initial emit handler
	pub fn emit<F>(mut self, event: impl Into<String>, handler: F) -> Self
	where
		F: Fn(&[Value]) -> Value + 'static,
	{
		self.emits.push((event.into(), Rc::new(handler)));
		self
	}

	/// Validate against `environment` instead of the shared one
	pub fn environment(mut self, environment: Rc<RuleEnvironment>) -> Self {
		self.environment = Some(environment);
		self
	}

	/// Cell and watch implementation to use
	pub fn reactivity(mut self, reactivity: R) -> Self {
		self.reactivity = reactivity;
		self
	}
}

pub(crate) struct FormInner<R: Reactivity> {
	pub(crate) fields: IndexMap<String, FieldObject<R>>,
	pub(crate) armed: R::Cell<bool>,
	emits: RefCell<HashMap<String, EmitFn>>,
	pub(crate) env: Rc<RuleEnvironment>,
	pub(crate) reactivity: R,
	pub(crate) watchers: RefCell<Vec<R::Watcher>>,
	key: u64,
}

/// A form: named fields, emit handlers and validation state.
pub struct Form<R: Reactivity = PlainReactivity> {
	pub(crate) inner: Rc<FormInner<R>>,
}

impl<R: Reactivity> Clone for Form<R> {
	fn clone(&self) -> Self {
		Self {
			inner: Rc::clone(&self.inner),
		}
	}
}

/// Non-owning reference to a [`Form`], for emit handlers that need the form.
pub struct WeakForm<R: Reactivity = PlainReactivity> {
	inner: Weak<FormInner<R>>,
}

impl<R: Reactivity> Clone for WeakForm<R> {
	fn clone(&self) -> Self {
		Self {
			inner: Weak::clone(&self.inner),
		}
	}
}

impl<R: Reactivity> WeakForm<R> {
	pub fn upgrade(&self) -> Option<Form<R>> {
		self.inner.upgrade().map(Form::from_inner)
	}
}

impl Form {
	/// Build a form with default options and no reactivity.
	pub fn new(definition: FormDefinition) -> Self {
		Self::with_options(definition, FormOptions::default())
	}
}

impl<R: Reactivity> Form<R> {
	pub fn with_options(definition: FormDefinition, options: FormOptions<R>) -> Self {
		let FormOptions {
			emits,
			environment,
			reactivity,
		} = options;
		let env = environment.unwrap_or_else(RuleEnvironment::shared);

		let inner = Rc::new_cyclic(|weak: &Weak<FormInner<R>>| {
			let fields = definition
				.into_iter()
				.map(|(name, def)| {
					let field = FieldObject::new(name.clone(), def, &reactivity, weak.clone());
					(name, field)
				})
				.collect();
			FormInner {
				fields,
				armed: reactivity.cell(false),
				emits: RefCell::new(emits.into_iter().collect()),
				env,
				reactivity: reactivity.clone(),
				watchers: RefCell::new(Vec::new()),
				key: next_key(),
			}
		});
		Self { inner }
	}

	/// Build a form whose cells come from `reactivity`.
	pub fn with_reactivity(definition: FormDefinition, reactivity: R) -> Self {
		Self::with_options(definition, FormOptions::default().reactivity(reactivity))
	}

	pub(crate) fn from_inner(inner: Rc<FormInner<R>>) -> Self {
		Self { inner }
	}

	pub fn downgrade(&self) -> WeakForm<R> {
		WeakForm {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Whether two handles refer to the same form.
	pub fn ptr_eq(&self, other: &Self) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	pub fn environment(&self) -> &Rc<RuleEnvironment> {
		&self.inner.env
	}

	pub fn reactivity(&self) -> &R {
		&self.inner.reactivity
	}

	/// Form-unique key, usable as a UI key.
	pub fn get_key(&self) -> u64 {
		self.inner.key
	}

	pub fn len(&self) -> usize {
		self.inner.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.inner.fields.is_empty()
	}

	/// Field names in declaration order.
	pub fn field_names(&self) -> Vec<&str> {
		self.inner.fields.keys().map(String::as_str).collect()
	}

	pub fn has_field(&self, name: &str) -> bool {
		self.inner.fields.contains_key(name)
	}

	/// Accessor for one field.
	pub fn field(&self, name: &str) -> Option<FieldRef<'_, R>> {
		self.inner
			.fields
			.get(name)
			.map(|field| FieldRef { form: self, field })
	}

	pub fn get_field_object(&self, name: &str) -> Option<&FieldObject<R>> {
		self.inner.fields.get(name)
	}

	pub fn get_field_value(&self, name: &str) -> Option<FieldValue> {
		self.inner.fields.get(name).map(FieldObject::get)
	}

	/// # Errors
	///
	/// Returns [`VufError::UnknownField`] if the form has no field `name`.
	pub fn set_field_value(&self, name: &str, value: impl Into<FieldValue>) -> VufResult<()> {
		let field = self
			.inner
			.fields
			.get(name)
			.ok_or_else(|| VufError::UnknownField(name.to_string()))?;
		field.set(value);
		Ok(())
	}

	/// Last validation result of `name`.
	pub fn validation(&self, name: &str) -> Option<FieldValidation> {
		self.inner.fields.get(name).map(FieldObject::validation)
	}

	/// Register or replace an emit handler.
	pub fn add_emit<F>(&self, event: impl Into<String>, handler: F)
	where
		F: Fn(&[Value]) -> Value + 'static,
	{
		self.inner
			.emits
			.borrow_mut()
			.insert(event.into(), Rc::new(handler));
	}

	/// Remove an emit handler. Unknown events are ignored.
	pub fn remove_emit(&self, event: &str) {
		self.inner.emits.borrow_mut().remove(event);
	}

	pub fn has_emit(&self, event: &str) -> bool {
		self.inner.emits.borrow().contains_key(event)
	}

	/// Invoke the handler registered for `event`.
	///
	/// Unregistered events are logged and yield `Value::Null`.
	pub fn emit(&self, event: &str, args: &[Value]) -> Value {
		let handler = self.inner.emits.borrow().get(event).cloned();
		match handler {
			Some(handler) => handler(args),
			None => {
				tracing::warn!("emit event is not found: {}", event);
				Value::Null
			}
		}
	}
}

impl<R: Reactivity> FormHandle for Form<R> {
	fn emit(&self, event: &str, args: &[Value]) -> Value {
		Form::emit(self, event, args)
	}

	fn get_json(&self) -> Map<String, Value> {
		Form::get_json(self)
	}

	fn is_error_field(&self, name: &str) -> bool {
		Form::is_error_field(self, name)
	}

	fn set_data(&self, data: &Value) -> VufResult<()> {
		Form::set_data(self, data)
	}

	fn field_value(&self, name: &str) -> Option<FieldValue> {
		self.get_field_value(name)
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl<R: Reactivity> fmt::Debug for Form<R> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Form")
			.field("key", &self.inner.key)
			.field("fields", &self.inner.fields.values().collect::<Vec<_>>())
			.field("armed", &self.inner.armed.get_untracked())
			.finish()
	}
}

/// Typed view of a nested form held in a field value.
pub fn downcast_form<R: Reactivity>(handle: &Rc<dyn FormHandle>) -> Option<Form<R>> {
	handle.as_any().downcast_ref::<Form<R>>().cloned()
}

/// Get/set accessor for one field of a form.
pub struct FieldRef<'a, R: Reactivity> {
	form: &'a Form<R>,
	field: &'a FieldObject<R>,
}

impl<R: Reactivity> Clone for FieldRef<'_, R> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<R: Reactivity> Copy for FieldRef<'_, R> {}

impl<'a, R: Reactivity> FieldRef<'a, R> {
	pub fn name(&self) -> &'a str {
		self.field.name()
	}

	pub fn get(&self) -> FieldValue {
		self.field.get()
	}

	pub fn set(&self, value: impl Into<FieldValue>) {
		self.field.set(value);
	}

	pub fn id(&self) -> &'a str {
		self.field.id()
	}

	pub fn label(&self) -> Option<&'a str> {
		self.field.label()
	}

	pub fn validation(&self) -> FieldValidation {
		self.field.validation()
	}

	/// Evaluate this field's rules.
	pub fn is_error(&self) -> bool {
		self.form.is_error_field(self.field.name())
	}

	pub fn object(&self) -> &'a FieldObject<R> {
		self.field
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::field::field;
	use rstest::rstest;
	use serde_json::json;

	fn sample() -> Form {
		Form::new(
			FormDefinition::new()
				.field("name", field("").label("Name"))
				.field("email", field("").id("email-input"))
				.field("age", field(30)),
		)
	}

	#[test]
	fn test_field_ids() {
		let form = sample();
		assert!(form.field("name").unwrap().id().starts_with("name_"));
		assert_eq!(form.field("email").unwrap().id(), "email-input");
		assert_ne!(form.field("name").unwrap().id(), sample().field("name").unwrap().id());
	}

	#[test]
	fn test_accessor_passes_through_cell() {
		let form = sample();
		let name = form.field("name").unwrap();
		name.set("Taro");
		assert_eq!(form.get_field_value("name").unwrap(), "Taro");
		assert_eq!(form.get_field_object("name").unwrap().get(), "Taro");
		assert_eq!(name.label(), Some("Name"));
	}

	#[test]
	fn test_set_unknown_field() {
		let err = sample().set_field_value("missing", 1).unwrap_err();
		assert!(matches!(err, VufError::UnknownField(name) if name == "missing"));
	}

	#[test]
	fn test_clones_share_state() {
		let form = sample();
		let other = form.clone();
		other.set_field_value("age", 31).unwrap();
		assert_eq!(form.get_field_value("age").unwrap(), json!(31));
		assert!(form.ptr_eq(&other));
		assert_eq!(form.get_key(), other.get_key());
	}

	#[test]
	fn test_field_back_reference() {
		let form = sample();
		let owner = form.get_field_object("age").unwrap().form().unwrap();
		assert!(owner.ptr_eq(&form));
	}

	#[rstest]
	#[case("check", json!(true))]
	#[case("unknown", Value::Null)]
	fn test_emit(#[case] event: &str, #[case] expected: Value) {
		let form: Form = Form::with_options(
			FormDefinition::new(),
			FormOptions::new().emit("check", |_| json!(true)),
		);
		assert_eq!(form.emit(event, &[]), expected);
	}

	#[test]
	fn test_add_and_remove_emit() {
		let form = sample();
		form.add_emit("echo", |args| args.first().cloned().unwrap_or(Value::Null));
		assert_eq!(form.emit("echo", &[json!("hi")]), json!("hi"));

		form.add_emit("echo", |_| json!("replaced"));
		assert_eq!(form.emit("echo", &[json!("hi")]), json!("replaced"));

		form.remove_emit("echo");
		form.remove_emit("echo");
		assert!(!form.has_emit("echo"));
		assert_eq!(form.emit("echo", &[]), Value::Null);
	}

	#[test]
	fn test_emit_handler_can_reach_form() {
		let form = sample();
		let weak = form.downgrade();
		form.add_emit("ageOver", move |args| {
			let limit = args.first().and_then(Value::as_i64).unwrap_or(0);
			let age = weak
				.upgrade()
				.and_then(|f| f.get_field_value("age"))
				.and_then(|v| v.as_json().and_then(Value::as_i64))
				.unwrap_or(0);
			json!(age > limit)
		});
		assert_eq!(form.emit("ageOver", &[json!(20)]), json!(true));
		assert_eq!(form.emit("ageOver", &[json!(40)]), json!(false));
	}

	#[test]
	fn test_downcast_form() {
		let handle: Rc<dyn FormHandle> = Rc::new(sample());
		assert!(downcast_form::<PlainReactivity>(&handle).is_some());
	}
}
