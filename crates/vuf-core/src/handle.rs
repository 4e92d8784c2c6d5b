//! The view of a form that validators and parent forms work against

use crate::error::VufResult;
use crate::value::FieldValue;
use serde_json::{Map, Value};
use std::any::Any;

/// Read-mostly handle to a form.
///
/// Validators receive the owning form as `&dyn FormHandle`, which lets them
/// dispatch to emit handlers or look at sibling fields. Parent forms hold
/// nested forms as `Rc<dyn FormHandle>` and use the same surface for
/// recursive extraction, ingestion and dotted-name validation.
pub trait FormHandle: 'static {
	/// Invoke a registered emit handler. Unregistered events yield `Value::Null`.
	fn emit(&self, event: &str, args: &[Value]) -> Value;

	/// Extract the form's fields with default extraction options.
	fn get_json(&self) -> Map<String, Value>;

	/// Evaluate the rules of one field and report whether it is in error.
	fn is_error_field(&self, name: &str) -> bool;

	/// Ingest a plain JSON object into the form's fields.
	fn set_data(&self, data: &Value) -> VufResult<()>;

	/// Current value of a field, if the field exists.
	fn field_value(&self, name: &str) -> Option<FieldValue>;

	/// Access to the concrete form type.
	fn as_any(&self) -> &dyn Any;
}
