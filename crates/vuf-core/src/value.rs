//! Field values

use crate::coerce;
use crate::handle::FormHandle;
use serde_json::Value;
use std::fmt;
use std::rc::Rc;

/// The value held by a form field.
///
/// Plain data is carried as JSON. A field whose type is a nested form holds
/// the sub-form itself, and a field typed as a list of nested forms holds a
/// `List` of them.
#[derive(Clone)]
pub enum FieldValue {
	Json(Value),
	Form(Rc<dyn FormHandle>),
	List(Vec<FieldValue>),
}

impl FieldValue {
	pub fn null() -> Self {
		Self::Json(Value::Null)
	}

	pub fn is_null(&self) -> bool {
		matches!(self, Self::Json(Value::Null))
	}

	/// `null` or the empty string: the values `required` rejects and
	/// `anyCondition` treats as vacuously valid.
	pub fn is_blank(&self) -> bool {
		match self {
			Self::Json(Value::Null) => true,
			Self::Json(Value::String(s)) => s.is_empty(),
			_ => false,
		}
	}

	pub fn is_truthy(&self) -> bool {
		match self {
			Self::Json(value) => coerce::is_truthy(value),
			Self::Form(_) | Self::List(_) => true,
		}
	}

	pub fn as_str(&self) -> Option<&str> {
		match self {
			Self::Json(Value::String(s)) => Some(s),
			_ => None,
		}
	}

	pub fn as_json(&self) -> Option<&Value> {
		match self {
			Self::Json(value) => Some(value),
			_ => None,
		}
	}

	pub fn as_form(&self) -> Option<&Rc<dyn FormHandle>> {
		match self {
			Self::Form(form) => Some(form),
			_ => None,
		}
	}

	pub fn as_list(&self) -> Option<&[FieldValue]> {
		match self {
			Self::List(items) => Some(items),
			_ => None,
		}
	}

	/// Plain JSON rendering. Nested forms are extracted with default options.
	pub fn to_json(&self) -> Value {
		match self {
			Self::Json(value) => value.clone(),
			Self::Form(form) => Value::Object(form.get_json()),
			Self::List(items) => Value::Array(items.iter().map(Self::to_json).collect()),
		}
	}
}

impl Default for FieldValue {
	fn default() -> Self {
		Self::null()
	}
}

impl fmt::Debug for FieldValue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Json(value) => f.debug_tuple("Json").field(value).finish(),
			Self::Form(form) => f.debug_tuple("Form").field(&form.get_json()).finish(),
			Self::List(items) => f.debug_tuple("List").field(items).finish(),
		}
	}
}

impl PartialEq for FieldValue {
	fn eq(&self, other: &Self) -> bool {
		match (self, other) {
			(Self::Json(a), Self::Json(b)) => a == b,
			(Self::Form(a), Self::Form(b)) => std::ptr::addr_eq(Rc::as_ptr(a), Rc::as_ptr(b)),
			(Self::List(a), Self::List(b)) => a == b,
			_ => false,
		}
	}
}

impl PartialEq<Value> for FieldValue {
	fn eq(&self, other: &Value) -> bool {
		matches!(self, Self::Json(value) if value == other)
	}
}

impl PartialEq<&str> for FieldValue {
	fn eq(&self, other: &&str) -> bool {
		self.as_str() == Some(*other)
	}
}

impl From<Value> for FieldValue {
	fn from(value: Value) -> Self {
		Self::Json(value)
	}
}

impl From<&str> for FieldValue {
	fn from(value: &str) -> Self {
		Self::Json(Value::String(value.to_string()))
	}
}

impl From<String> for FieldValue {
	fn from(value: String) -> Self {
		Self::Json(Value::String(value))
	}
}

impl From<bool> for FieldValue {
	fn from(value: bool) -> Self {
		Self::Json(Value::Bool(value))
	}
}

macro_rules! impl_from_number {
	($($ty:ty),*) => {
		$(
			impl From<$ty> for FieldValue {
				fn from(value: $ty) -> Self {
					Self::Json(Value::from(value))
				}
			}
		)*
	};
}

impl_from_number!(i32, i64, u32, u64, usize, f64);

impl From<Vec<FieldValue>> for FieldValue {
	fn from(items: Vec<FieldValue>) -> Self {
		Self::List(items)
	}
}

impl From<Rc<dyn FormHandle>> for FieldValue {
	fn from(form: Rc<dyn FormHandle>) -> Self {
		Self::Form(form)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	#[case(FieldValue::null(), true)]
	#[case(FieldValue::from(""), true)]
	#[case(FieldValue::from(" "), false)]
	#[case(FieldValue::from(0), false)]
	#[case(FieldValue::from(false), false)]
	#[case(FieldValue::List(vec![]), false)]
	fn test_is_blank(#[case] value: FieldValue, #[case] expected: bool) {
		assert_eq!(value.is_blank(), expected);
	}

	#[test]
	fn test_comparisons_against_json() {
		assert_eq!(FieldValue::from("John"), "John");
		assert_eq!(FieldValue::from(30), json!(30));
		assert_ne!(FieldValue::from("30"), json!(30));
	}

	#[test]
	fn test_list_to_json() {
		let list = FieldValue::List(vec![FieldValue::from(1), FieldValue::from("a")]);
		assert_eq!(list.to_json(), json!([1, "a"]));
	}
}
