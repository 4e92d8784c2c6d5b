//! Validation rules and the rule builder
//!
//! A rule names a registered validator and carries its positional
//! parameters. On the wire a rule is either a bare name (`"required"`) or a
//! `[name, ...params]` array (`["maxLength", 50]`), and both forms
//! deserialize into [`Rule`].
//!
//! ```
//! use vuf_core::rule::{self, Rule};
//!
//! let rules: Vec<Rule> = vec![
//! 	rule::required(),
//! 	rule::max_length(50),
//! 	vuf_core::rule!("length", 8),
//! ];
//! assert_eq!(rules[1].name(), "maxLength");
//! assert_eq!(rules[2].params(), &[serde_json::json!(8)]);
//! ```

use serde::de::{self, Deserializer, SeqAccess, Visitor};
use serde::ser::{SerializeSeq, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Names of the built-in validators.
pub mod names {
	pub const REQUIRED: &str = "required";
	pub const MAX_LENGTH: &str = "maxLength";
	pub const LENGTH: &str = "length";
	pub const ANY_CONDITION: &str = "anyCondition";
	pub const SAME_AS: &str = "sameAs";
	pub const INTEGER: &str = "integer";
	pub const POSITIVE_INTEGER: &str = "positiveInteger";
	pub const IS_EMAIL: &str = "isEmail";
}

/// A validator reference plus positional parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
	name: String,
	params: Vec<Value>,
}

impl Rule {
	pub fn new(name: impl Into<String>, params: Vec<Value>) -> Self {
		Self {
			name: name.into(),
			params,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn params(&self) -> &[Value] {
		&self.params
	}

	pub fn param(&self, index: usize) -> Option<&Value> {
		self.params.get(index)
	}

	/// The `[name, ...params]` array form.
	pub fn to_tuple(&self) -> Value {
		let mut items = Vec::with_capacity(self.params.len() + 1);
		items.push(Value::String(self.name.clone()));
		items.extend(self.params.iter().cloned());
		Value::Array(items)
	}
}

impl From<&str> for Rule {
	fn from(name: &str) -> Self {
		Self::new(name, Vec::new())
	}
}

impl From<String> for Rule {
	fn from(name: String) -> Self {
		Self::new(name, Vec::new())
	}
}

impl fmt::Display for Rule {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if self.params.is_empty() {
			write!(f, "{}", self.name)
		} else {
			write!(f, "{}", self.to_tuple())
		}
	}
}

impl Serialize for Rule {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut seq = serializer.serialize_seq(Some(self.params.len() + 1))?;
		seq.serialize_element(&self.name)?;
		for param in &self.params {
			seq.serialize_element(param)?;
		}
		seq.end()
	}
}

impl<'de> Deserialize<'de> for Rule {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct RuleVisitor;

		impl<'de> Visitor<'de> for RuleVisitor {
			type Value = Rule;

			fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				f.write_str("a rule name or a [name, ...params] array")
			}

			fn visit_str<E: de::Error>(self, name: &str) -> Result<Rule, E> {
				Ok(Rule::from(name))
			}

			fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Rule, A::Error> {
				let name: String = seq
					.next_element()?
					.ok_or_else(|| de::Error::invalid_length(0, &self))?;
				let mut params = Vec::new();
				while let Some(param) = seq.next_element::<Value>()? {
					params.push(param);
				}
				Ok(Rule::new(name, params))
			}
		}

		deserializer.deserialize_any(RuleVisitor)
	}
}

/// Returns a builder producing `[name, ...params]` rules for `name`.
pub fn make_rule(name: impl Into<String>) -> impl Fn(Vec<Value>) -> Rule {
	let name = name.into();
	move |params| Rule::new(name.clone(), params)
}

/// Builds a [`Rule`] from a name and parameters convertible with `json!`.
#[macro_export]
macro_rules! rule {
	($name:expr $(,)?) => {
		$crate::rule::Rule::from($name)
	};
	($name:expr, $($param:expr),+ $(,)?) => {
		$crate::rule::Rule::new($name, vec![$($crate::__serde_json::json!($param)),+])
	};
}

pub fn required() -> Rule {
	Rule::from(names::REQUIRED)
}

pub fn max_length(n: usize) -> Rule {
	make_rule(names::MAX_LENGTH)(vec![Value::from(n)])
}

pub fn length(n: usize) -> Rule {
	make_rule(names::LENGTH)(vec![Value::from(n)])
}

/// `anyCondition`: delegates to the form's `event` emit handler.
pub fn any_condition(event: &str, message: &str) -> Rule {
	make_rule(names::ANY_CONDITION)(vec![Value::from(event), Value::from(message)])
}

pub fn same_as(field: &str) -> Rule {
	make_rule(names::SAME_AS)(vec![Value::from(field)])
}

pub fn integer() -> Rule {
	Rule::from(names::INTEGER)
}

pub fn positive_integer() -> Rule {
	Rule::from(names::POSITIVE_INTEGER)
}

pub fn is_email() -> Rule {
	Rule::from(names::IS_EMAIL)
}
