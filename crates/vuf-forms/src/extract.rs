//! Value extraction
//!
//! Turns the live field values back into a plain JSON object. Nested forms
//! are extracted recursively and fields typed [`FieldType::Number`] are coerced
//! to numbers here, never on ingestion.

use crate::field::FieldType;
use crate::form::Form;
use crate::ingest::head_upper;
use serde_json::{Map, Value};
use std::fmt;
use std::rc::Rc;
use vuf_core::cell::Reactivity;
use vuf_core::coerce::{number_to_json, to_js_number};
use vuf_core::{FieldValue, VufResult};

type KeyFormat = Rc<dyn Fn(&str) -> String>;

/// Options for [`Form::get_value_json`]
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use vuf_forms::{ExtractOptions, Form, FormDefinition, field};
///
/// let form = Form::new(
/// 	FormDefinition::new()
/// 		.field("name", field("John"))
/// 		.field("email", field(""))
/// 		.field("age", field(30)),
/// );
/// let opts = ExtractOptions::new().except_keys(["age"]).ignore_blank(false);
/// assert_eq!(
/// 	serde_json::Value::Object(form.get_value_json(&opts)),
/// 	json!({"name": "John", "email": ""})
/// );
/// ```
#[derive(Clone)]
pub struct ExtractOptions {
	keys: Vec<String>,
	except_keys: Vec<String>,
	format: Option<KeyFormat>,
	ignore_blank: bool,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			keys: Vec::new(),
			except_keys: Vec::new(),
			format: None,
			ignore_blank: true,
		}
	}
}

impl ExtractOptions {
	pub fn new() -> Self {
		Self::default()
	}

	/// Extract only these fields, in this order. An empty list means all fields.
	pub fn keys<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.keys = keys.into_iter().map(Into::into).collect();
		self
	}

	/// Fields to leave out. Ignored when `keys` is non-empty.
	pub fn except_keys<I, S>(mut self, keys: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.except_keys = keys.into_iter().map(Into::into).collect();
		self
	}

	/// Rename every key of the result.
	pub fn format<F>(mut self, format: F) -> Self
	where
		F: Fn(&str) -> String + 'static,
	{
		self.format = Some(Rc::new(format));
		self
	}

	/// Omit empty-string values (default `true`).
	pub fn ignore_blank(mut self, ignore_blank: bool) -> Self {
		self.ignore_blank = ignore_blank;
		self
	}
}

impl fmt::Debug for ExtractOptions {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ExtractOptions")
			.field("keys", &self.keys)
			.field("except_keys", &self.except_keys)
			.field("format", &self.format.is_some())
			.field("ignore_blank", &self.ignore_blank)
			.finish()
	}
}

impl<R: Reactivity> Form<R> {
	/// Extract field values into a JSON object in field order (or `keys` order).
	pub fn get_value_json(&self, opts: &ExtractOptions) -> Map<String, Value> {
		let targets: Vec<&str> = if opts.keys.is_empty() {
			self.field_names()
				.into_iter()
				.filter(|name| !opts.except_keys.iter().any(|k| k == name))
				.collect()
		} else {
			opts.keys
				.iter()
				.map(String::as_str)
				.filter(|name| self.has_field(name))
				.collect()
		};

		let mut result = Map::new();
		for name in targets {
			if name.starts_with('$') {
				continue;
			}
			let Some(field) = self.get_field_object(name) else {
				continue;
			};
			let value = field.get();
			let include = match &value {
				FieldValue::Json(Value::String(s)) if opts.ignore_blank => !s.is_empty(),
				other => !other.is_null(),
			};
			if include {
				result.insert(name.to_string(), format_value(field.kind(), &value));
			}
		}

		match &opts.format {
			Some(format) => result
				.into_iter()
				.map(|(key, value)| (format(&key), value))
				.collect(),
			None => result,
		}
	}

	/// All fields with default options.
	pub fn get_json(&self) -> Map<String, Value> {
		self.get_value_json(&ExtractOptions::default())
	}

	pub fn get_json_with(&self, opts: &ExtractOptions) -> Map<String, Value> {
		self.get_value_json(opts)
	}

	/// Extraction with the first character of every top-level key upper-cased.
	pub fn get_json_head_upper(&self, opts: &ExtractOptions) -> Map<String, Value> {
		self.get_value_json(opts)
			.into_iter()
			.map(|(key, value)| (head_upper(&key), value))
			.collect()
	}

	/// Extraction serialized to JSON text.
	pub fn get_value_json_str(&self, opts: &ExtractOptions) -> VufResult<String> {
		Ok(serde_json::to_string(&self.get_value_json(opts))?)
	}
}

fn format_value(kind: &FieldType, value: &FieldValue) -> Value {
	match value {
		FieldValue::List(items) => Value::Array(
			items
				.iter()
				.map(|item| format_value(&FieldType::Any, item))
				.collect(),
		),
		FieldValue::Form(form) => Value::Object(form.get_json()),
		FieldValue::Json(json) if json.is_array() || json.is_number() || !kind.is_number() => {
			json.clone()
		}
		FieldValue::Json(_) => coerce_number(value),
	}
}

fn coerce_number(value: &FieldValue) -> Value {
	match to_js_number(value).map(number_to_json) {
		Ok(Some(number)) => number,
		Ok(None) => {
			tracing::warn!("number parse error, value: {:?}", value);
			Value::Null
		}
		Err(err) => {
			tracing::warn!("number parse error: {}", err);
			Value::Null
		}
	}
}
