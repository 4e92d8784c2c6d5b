//! Message Registry
//!
//! Locale-keyed catalogs of message templates, one template per rule name.
//! Templates may contain `{param}`, replaced by the rule name, and `{0}`,
//! `{1}`, ... replaced by the rule's positional parameters.

mod en;
mod ja;

use crate::coerce;
use indexmap::IndexMap;
use serde_json::Value;

/// Ordered rule-name → template dictionary for one locale.
pub type MessageMap = IndexMap<String, String>;

/// Template used when the current locale has no entry for a rule.
pub const DEFAULT_TEMPLATE: &str = "Validation error: {name}";

/// Catalog key of the message recorded when a validator errors out.
pub const VALIDATION_ERROR_KEY: &str = "validationError";

const VALIDATION_ERROR_FALLBACK: &str = "An error occurred during validation.";

/// Built-in catalogs in registration order. The first one is the default locale.
pub fn builtin_catalogs() -> Vec<(&'static str, MessageMap)> {
	vec![("ja", to_map(ja::MESSAGES)), ("en", to_map(en::MESSAGES))]
}

fn to_map(entries: &[(&str, &str)]) -> MessageMap {
	entries
		.iter()
		.map(|(key, template)| (key.to_string(), template.to_string()))
		.collect()
}

/// Message catalogs plus the current-locale pointer.
#[derive(Debug, Clone, Default)]
pub struct MessageRegistry {
	catalogs: IndexMap<String, MessageMap>,
	locale: String,
}

impl MessageRegistry {
	/// A registry without catalogs. The locale pointer is empty until set.
	pub fn new() -> Self {
		Self::default()
	}

	/// A registry seeded with the built-in catalogs, pointing at the first.
	pub fn with_builtins() -> Self {
		let mut registry = Self::new();
		for (locale, messages) in builtin_catalogs() {
			if registry.locale.is_empty() {
				registry.locale = locale.to_string();
			}
			registry.catalogs.insert(locale.to_string(), messages);
		}
		registry
	}

	/// Replace the whole dictionary of `locale`.
	pub fn set_messages(&mut self, locale: impl Into<String>, messages: MessageMap) {
		self.catalogs.insert(locale.into(), messages);
	}

	/// Shallow-merge `partial` into the dictionary of `locale`, creating it if absent.
	pub fn merge_messages(&mut self, locale: impl Into<String>, partial: MessageMap) {
		self.catalogs.entry(locale.into()).or_default().extend(partial);
	}

	/// Point at `locale`. The locale does not need to have a catalog.
	pub fn set_locale(&mut self, locale: impl Into<String>) {
		self.locale = locale.into();
	}

	pub fn get_locale(&self) -> &str {
		&self.locale
	}

	/// Dictionary for `locale`, or the current locale when `None`.
	///
	/// Unknown locales yield an empty dictionary.
	pub fn get_messages(&self, locale: Option<&str>) -> MessageMap {
		let locale = locale.unwrap_or(&self.locale);
		self.catalogs.get(locale).cloned().unwrap_or_default()
	}

	pub fn locales(&self) -> impl Iterator<Item = &str> {
		self.catalogs.keys().map(String::as_str)
	}

	/// Template for `name` in the current locale.
	pub fn template(&self, name: &str) -> Option<&str> {
		self.catalogs
			.get(&self.locale)
			.and_then(|messages| messages.get(name))
			.map(String::as_str)
	}

	/// Rendered message for a failing rule, falling back to [`DEFAULT_TEMPLATE`].
	pub fn message_for(&self, name: &str, params: &[Value]) -> String {
		match self.template(name) {
			Some(template) => format_message(template, name, params),
			None => DEFAULT_TEMPLATE.replace("{name}", name),
		}
	}

	/// Message recorded when a validator cannot produce a verdict.
	pub fn validation_error_message(&self) -> String {
		self.template(VALIDATION_ERROR_KEY)
			.unwrap_or(VALIDATION_ERROR_FALLBACK)
			.to_string()
	}
}

/// Substitute the first `{param}` with `rule_name` and the first `{i}` with
/// the display string of `params[i]`.
pub fn format_message(template: &str, rule_name: &str, params: &[Value]) -> String {
	let mut message = template.replacen("{param}", rule_name, 1);
	for (index, param) in params.iter().enumerate() {
		let token = format!("{{{}}}", index);
		message = message.replacen(&token, &coerce::json_to_js_string(param), 1);
	}
	message
}
