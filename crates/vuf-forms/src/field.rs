//! Field definitions and per-field state

use crate::form::{Form, FormInner};
use crate::schema::SubForm;
use chrono::Utc;
use indexmap::IndexMap;
use once_cell::sync::Lazy;
use rand::Rng;
use serde::Serialize;
use serde_json::Value;
use std::cell::{Cell, RefCell};
use std::rc::Weak;
use std::sync::atomic::{AtomicU64, Ordering};
use vuf_core::cell::{ReactiveCell, Reactivity};
use vuf_core::{FieldValue, Rule};

/// Coercion target of a field.
///
/// `Number` fields are converted to numbers on extraction. `Form` fields, and
/// `Array` fields whose sub-type is `Form`, build nested forms on ingestion.
/// The other tags are carried as metadata.
#[derive(Debug, Clone, Default)]
pub enum FieldType {
	#[default]
	Any,
	String,
	Number,
	Boolean,
	Date,
	Array,
	Form(SubForm),
}

impl FieldType {
	pub fn is_number(&self) -> bool {
		matches!(self, Self::Number)
	}

	pub fn is_array(&self) -> bool {
		matches!(self, Self::Array)
	}

	pub fn as_sub_form(&self) -> Option<&SubForm> {
		match self {
			Self::Form(sub) => Some(sub),
			_ => None,
		}
	}
}

/// Declarative description of one field
///
/// # Examples
///
/// ```
/// use vuf_core::rule;
/// use vuf_forms::{FieldType, field};
///
/// let age = field(30)
/// 	.label("Age")
/// 	.kind(FieldType::Number)
/// 	.validate([rule::required(), rule::positive_integer()]);
/// assert_eq!(age.rules().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct FieldDef {
	pub(crate) value: FieldValue,
	pub(crate) label: Option<String>,
	pub(crate) validate: Vec<Rule>,
	pub(crate) kind: FieldType,
	pub(crate) sub_type: Option<FieldType>,
	pub(crate) id: Option<String>,
	pub(crate) meta: IndexMap<String, Value>,
}

/// Start a field definition from its initial value.
pub fn field(value: impl Into<FieldValue>) -> FieldDef {
	FieldDef::new(value)
}

impl FieldDef {
	pub fn new(value: impl Into<FieldValue>) -> Self {
		Self {
			value: value.into(),
			..Self::default()
		}
	}

	/// Display name of the field
	pub fn label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Replace the rule list. Rules run in the given order.
	pub fn validate<I>(mut self, rules: I) -> Self
	where
		I: IntoIterator,
		I::Item: Into<Rule>,
	{
		self.validate = rules.into_iter().map(Into::into).collect();
		self
	}

	/// Append one rule
	pub fn rule(mut self, rule: impl Into<Rule>) -> Self {
		self.validate.push(rule.into());
		self
	}

	pub fn kind(mut self, kind: FieldType) -> Self {
		self.kind = kind;
		self
	}

	/// Element type of an `Array` field
	pub fn sub_type(mut self, sub_type: FieldType) -> Self {
		self.sub_type = Some(sub_type);
		self
	}

	/// Use `id` instead of a generated one
	pub fn id(mut self, id: impl Into<String>) -> Self {
		self.id = Some(id.into());
		self
	}

	/// Attach arbitrary metadata
	pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.meta.insert(key.into(), value.into());
		self
	}

	pub fn rules(&self) -> &[Rule] {
		&self.validate
	}
}

/// Field definitions of a form, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FormDefinition {
	fields: IndexMap<String, FieldDef>,
}

impl FormDefinition {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a field. Redefining a name replaces the earlier definition in place.
	pub fn field(mut self, name: impl Into<String>, def: FieldDef) -> Self {
		self.fields.insert(name.into(), def);
		self
	}

	pub fn len(&self) -> usize {
		self.fields.len()
	}

	pub fn is_empty(&self) -> bool {
		self.fields.is_empty()
	}

	pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldDef)> {
		self.fields.iter().map(|(name, def)| (name.as_str(), def))
	}
}

impl<K: Into<String>> FromIterator<(K, FieldDef)> for FormDefinition {
	fn from_iter<I: IntoIterator<Item = (K, FieldDef)>>(iter: I) -> Self {
		Self {
			fields: iter.into_iter().map(|(k, def)| (k.into(), def)).collect(),
		}
	}
}

impl IntoIterator for FormDefinition {
	type Item = (String, FieldDef);
	type IntoIter = indexmap::map::IntoIter<String, FieldDef>;

	fn into_iter(self) -> Self::IntoIter {
		self.fields.into_iter()
	}
}

/// Result of the last evaluation of a field's rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
	pub error: bool,
	pub message: String,
}

/// Live state of one field: its value cell, metadata and validation result.
pub struct FieldObject<R: Reactivity> {
	name: String,
	value: R::Cell<FieldValue>,
	label: Option<String>,
	validate: Vec<Rule>,
	kind: FieldType,
	sub_type: Option<FieldType>,
	meta: IndexMap<String, Value>,
	id: String,
	pub(crate) validation: RefCell<FieldValidation>,
	pub(crate) started: Cell<bool>,
	pub(crate) evaluating: Cell<bool>,
	form: Weak<FormInner<R>>,
}

impl<R: Reactivity> FieldObject<R> {
	pub(crate) fn new(
		name: String,
		def: FieldDef,
		reactivity: &R,
		form: Weak<FormInner<R>>,
	) -> Self {
		let id = def.id.unwrap_or_else(|| format!("{}_{}", name, next_key()));
		Self {
			value: reactivity.cell(def.value),
			label: def.label,
			validate: def.validate,
			kind: def.kind,
			sub_type: def.sub_type,
			meta: def.meta,
			id,
			validation: RefCell::new(FieldValidation::default()),
			started: Cell::new(false),
			evaluating: Cell::new(false),
			form,
			name,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	pub fn rules(&self) -> &[Rule] {
		&self.validate
	}

	pub fn kind(&self) -> &FieldType {
		&self.kind
	}

	pub fn sub_type(&self) -> Option<&FieldType> {
		self.sub_type.as_ref()
	}

	pub fn meta(&self, key: &str) -> Option<&Value> {
		self.meta.get(key)
	}

	pub fn id(&self) -> &str {
		&self.id
	}

	/// Current value, read through the cell.
	pub fn get(&self) -> FieldValue {
		self.value.get()
	}

	pub fn get_untracked(&self) -> FieldValue {
		self.value.get_untracked()
	}

	pub fn set(&self, value: impl Into<FieldValue>) {
		self.value.set(value.into());
	}

	pub fn cell(&self) -> &R::Cell<FieldValue> {
		&self.value
	}

	pub fn validation(&self) -> FieldValidation {
		self.validation.borrow().clone()
	}

	/// The owning form, while it is alive.
	pub fn form(&self) -> Option<Form<R>> {
		self.form.upgrade().map(Form::from_inner)
	}

	/// Whether the rules of this field have been evaluated at least once.
	pub fn has_started_validation(&self) -> bool {
		self.started.get()
	}

	/// Sub-form factory to use when ingesting a list into this field.
	pub(crate) fn element_form(&self) -> Option<&SubForm> {
		if self.kind.is_array() {
			self.sub_type.as_ref().and_then(FieldType::as_sub_form)
		} else {
			None
		}
	}
}

impl<R: Reactivity> std::fmt::Debug for FieldObject<R> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FieldObject")
			.field("name", &self.name)
			.field("id", &self.id)
			.field("kind", &self.kind)
			.field("value", &self.get_untracked())
			.field("validation", &*self.validation.borrow())
			.finish()
	}
}

const COUNTER_PART: u64 = 100_000_000;
const TIME_PART: i64 = 10_000_000_000;

static KEY_COUNTER: Lazy<AtomicU64> =
	Lazy::new(|| AtomicU64::new(rand::thread_rng().gen_range(0..1_000_000)));

/// Session-unique key: `(epoch_ms mod 10^10) * 10^8 + counter`.
pub(crate) fn next_key() -> u64 {
	let counter = (KEY_COUNTER.fetch_add(1, Ordering::Relaxed) + 1) % COUNTER_PART;
	let time = Utc::now().timestamp_millis().rem_euclid(TIME_PART) as u64;
	time * COUNTER_PART + counter
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::collections::HashSet;

	#[test]
	fn test_next_key_is_unique() {
		let keys: HashSet<u64> = (0..1000).map(|_| next_key()).collect();
		assert_eq!(keys.len(), 1000);
	}

	#[test]
	fn test_definition_keeps_declaration_order() {
		let def = FormDefinition::new()
			.field("name", field(""))
			.field("email", field(""))
			.field("age", field(0));
		let names: Vec<&str> = def.iter().map(|(name, _)| name).collect();
		assert_eq!(names, vec!["name", "email", "age"]);
	}

	#[rstest]
	#[case(FieldType::Number, true, false)]
	#[case(FieldType::Array, false, true)]
	#[case(FieldType::Any, false, false)]
	fn test_field_type_predicates(
		#[case] kind: FieldType,
		#[case] number: bool,
		#[case] array: bool,
	) {
		assert_eq!(kind.is_number(), number);
		assert_eq!(kind.is_array(), array);
		assert!(kind.as_sub_form().is_none());
	}

	#[test]
	fn test_field_def_builder() {
		let def = field("x")
			.label("X")
			.rule("required")
			.rule(vuf_core::rule::max_length(3))
			.id("custom-id")
			.meta("placeholder", "type here");
		assert_eq!(def.label.as_deref(), Some("X"));
		assert_eq!(def.rules().len(), 2);
		assert_eq!(def.id.as_deref(), Some("custom-id"));
		assert_eq!(def.meta["placeholder"], "type here");
	}
}
