//! Rule environment configuration
//!
//! Message catalogs and the starting locale can be supplied from a file
//! instead of code:
//!
//! ```toml
//! locale = "en"
//!
//! [messages.en]
//! required = "This field is required."
//!
//! [messages.fr]
//! required = "Obligatoire."
//! ```

use crate::error::{VufError, VufResult};
use crate::messages::MessageMap;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvironmentConfig {
	/// Locale to switch to after the catalogs are merged.
	pub locale: Option<String>,
	/// Per-locale templates, merged over the existing catalogs.
	pub messages: IndexMap<String, MessageMap>,
}

impl EnvironmentConfig {
	/// Parse a configuration from TOML text
	///
	/// # Examples
	///
	/// ```
	/// use vuf_core::config::EnvironmentConfig;
	///
	/// let config = EnvironmentConfig::from_toml_str(r#"
	/// locale = "en"
	///
	/// [messages.en]
	/// required = "This field is required."
	/// "#).unwrap();
	/// assert_eq!(config.locale.as_deref(), Some("en"));
	/// assert_eq!(config.messages["en"]["required"], "This field is required.");
	/// ```
	pub fn from_toml_str(text: &str) -> VufResult<Self> {
		Ok(toml::from_str(text)?)
	}

	/// Parse a configuration from JSON text
	pub fn from_json_str(text: &str) -> VufResult<Self> {
		Ok(serde_json::from_str(text)?)
	}

	/// Load a configuration file. `.json` files are read as JSON, anything
	/// else as TOML.
	pub fn from_path(path: impl AsRef<Path>) -> VufResult<Self> {
		let path = path.as_ref();
		let contents = std::fs::read_to_string(path)?;
		let config = if path.extension().and_then(|s| s.to_str()) == Some("json") {
			Self::from_json_str(&contents)?
		} else {
			Self::from_toml_str(&contents)?
		};
		tracing::debug!(
			"Loaded rule environment config from {} ({} locales)",
			path.display(),
			config.messages.len()
		);
		Ok(config)
	}

	pub fn is_empty(&self) -> bool {
		self.locale.is_none() && self.messages.is_empty()
	}
}

impl std::str::FromStr for EnvironmentConfig {
	type Err = VufError;

	fn from_str(text: &str) -> VufResult<Self> {
		Self::from_toml_str(text)
	}
}
