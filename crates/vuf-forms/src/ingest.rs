//! Data ingestion
//!
//! [`Form::set_data`] copies a plain JSON object into the form's fields,
//! building fresh sub-forms for nested-form fields. Coercion happens only on
//! extraction; values are stored as given.

use crate::form::Form;
use indexmap::IndexMap;
use serde_json::Value;
use vuf_core::cell::Reactivity;
use vuf_core::coerce::is_truthy;
use vuf_core::{FieldValue, VufResult};

type AssignFn<R> = Box<dyn Fn(&Form<R>, &Value) -> VufResult<()>>;

/// Per-key replacements for the default assignment of [`Form::set_data_with`].
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vuf_forms::{Assigners, Form, FormDefinition, field};
///
/// let form = Form::new(FormDefinition::new().field("tags", field("")));
/// let assigners = Assigners::new().on("tags", |form: &Form, value| {
/// 	let joined = value
/// 		.as_array()
/// 		.map(|items| items.iter().filter_map(|v| v.as_str()).collect::<Vec<_>>().join(" "))
/// 		.unwrap_or_default();
/// 	form.set_field_value("tags", joined)
/// });
/// form.set_data_with(&json!({"tags": ["a", "b"]}), &assigners).unwrap();
/// assert_eq!(form.get_field_value("tags").unwrap(), "a b");
/// ```
pub struct Assigners<R: Reactivity = vuf_core::PlainReactivity> {
	by_key: IndexMap<String, AssignFn<R>>,
}

impl<R: Reactivity> Default for Assigners<R> {
	fn default() -> Self {
		Self {
			by_key: IndexMap::new(),
		}
	}
}

impl<R: Reactivity> Assigners<R> {
	pub fn new() -> Self {
		Self::default()
	}

	/// Use `f` for `key` instead of the default assignment.
	pub fn on<F>(mut self, key: impl Into<String>, f: F) -> Self
	where
		F: Fn(&Form<R>, &Value) -> VufResult<()> + 'static,
	{
		self.by_key.insert(key.into(), Box::new(f));
		self
	}

	fn get(&self, key: &str) -> Option<&AssignFn<R>> {
		self.by_key.get(key)
	}
}

/// `"UserName"` -> `"userName"`
pub fn head_lower(key: &str) -> String {
	let mut chars = key.chars();
	match chars.next() {
		Some(first) => first.to_lowercase().chain(chars).collect(),
		None => String::new(),
	}
}

/// `"userName"` -> `"UserName"`
pub fn head_upper(key: &str) -> String {
	let mut chars = key.chars();
	match chars.next() {
		Some(first) => first.to_uppercase().chain(chars).collect(),
		None => String::new(),
	}
}

impl<R: Reactivity> Form<R> {
	/// Assign every key of `data` to the field of the same name.
	///
	/// Keys are matched after lower-casing their first character. Keys with no
	/// matching field are ignored. Input that is not an object is a no-op.
	///
	/// # Errors
	///
	/// Propagates failures of sub-form factories, typically
	/// [`VufError::NotImplemented`](vuf_core::VufError::NotImplemented) from a
	/// schema without `generate`.
	pub fn set_data(&self, data: &Value) -> VufResult<()> {
		self.set_data_with(data, &Assigners::new())
	}

	/// [`set_data`](Self::set_data) with per-key overrides. An override is
	/// looked up by the normalized key first, then by the raw key.
	pub fn set_data_with(&self, data: &Value, assigners: &Assigners<R>) -> VufResult<()> {
		let Value::Object(entries) = data else {
			return Ok(());
		};

		for (raw_key, value) in entries {
			let key = head_lower(raw_key);
			match assigners.get(&key).or_else(|| assigners.get(raw_key)) {
				Some(assign) => assign(self, value)?,
				None => self.assign_default(&key, value)?,
			}
		}
		Ok(())
	}

	fn assign_default(&self, key: &str, value: &Value) -> VufResult<()> {
		let Some(field) = self.get_field_object(key) else {
			tracing::debug!("set_data: no field named {:?}, key ignored", key);
			return Ok(());
		};

		if let Some(sub) = field.kind().as_sub_form() {
			if is_truthy(value) {
				let child = sub.create()?;
				child.set_data(value)?;
				field.set(FieldValue::Form(child));
				return Ok(());
			}
		} else if let (Some(sub), Value::Array(items)) = (field.element_form(), value) {
			let children = items
				.iter()
				.map(|item| {
					let child = sub.create()?;
					child.set_data(item)?;
					Ok(FieldValue::Form(child))
				})
				.collect::<VufResult<Vec<_>>>()?;
			field.set(FieldValue::List(children));
			return Ok(());
		}

		field.set(value.clone());
		Ok(())
	}
}
