//! Error types shared by the vuf crates

/// Errors raised by registries, configuration loading and the form engine.
///
/// Validation failures are never reported through this type: a failing or
/// erroring rule is recorded on the field instead.
#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum VufError {
	/// A deliberately unsupported operation, such as a nested form type
	/// without a factory.
	#[error("{0} is not implemented")]
	NotImplemented(String),

	#[error("Validator already registered: {0}")]
	ValidatorExists(String),

	#[error("Validator not registered: {0}")]
	ValidatorMissing(String),

	#[error("Unknown field: {0}")]
	UnknownField(String),

	#[error("JSON error: {0}")]
	Json(#[from] serde_json::Error),

	#[error("TOML error: {0}")]
	Toml(#[from] toml::de::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),
}

pub type VufResult<T> = Result<T, VufError>;

/// Outcome of a validator that could not produce a verdict.
///
/// Returning one of these from a validator is the equivalent of the
/// validator throwing: the form contains it and marks the field as errored.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidatorError {
	#[error("{0} is not implemented")]
	NotImplemented(String),

	#[error("Rule '{rule}' expects {expected} at parameter {index}")]
	InvalidParam {
		rule: String,
		index: usize,
		expected: &'static str,
	},

	#[error("Coercion error: {0}")]
	Coercion(#[from] crate::coerce::CoercionError),

	#[error("{0}")]
	Custom(String),
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_not_implemented_display() {
		let err = VufError::NotImplemented("ChildForm::generate".to_string());
		assert_eq!(err.to_string(), "ChildForm::generate is not implemented");
	}

	#[test]
	fn test_invalid_param_display() {
		let err = ValidatorError::InvalidParam {
			rule: "maxLength".to_string(),
			index: 0,
			expected: "a non-negative integer",
		};
		assert_eq!(
			err.to_string(),
			"Rule 'maxLength' expects a non-negative integer at parameter 0"
		);
	}
}
