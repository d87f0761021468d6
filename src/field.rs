//! Form field abstractions shared by all concrete field types

use thiserror::Error;

/// Errors produced while cleaning a single field value
#[derive(Debug, Error)]
pub enum FieldError {
	#[error("This field is required: {0}")]
	Required(String),
	#[error("Validation error: {0}")]
	Validation(String),
	#[error("Select a valid choice: {0}")]
	InvalidChoice(String),
}

pub type FieldResult<T> = Result<T, FieldError>;

/// Rendering hint for a field
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
	TextInput,
	TextArea,
	NumberInput,
	CheckboxInput,
	Select { choices: Vec<(String, String)> },
	Hidden,
}

/// A single form field: holds its configuration and knows how to clean
/// a submitted value into its canonical JSON representation.
///
/// Implementations are stateless with respect to submitted data; the
/// owning [`Form`](crate::Form) carries data and errors.
pub trait FormField: Send + Sync {
	/// Field name, also the key under which data is submitted
	fn name(&self) -> &str;

	/// Human-readable label, if set
	fn label(&self) -> Option<&str>;

	/// Whether a non-empty value must be submitted
	fn required(&self) -> bool;

	/// Help text rendered next to the field, if set
	fn help_text(&self) -> Option<&str>;

	/// Widget used to render the field
	fn widget(&self) -> &Widget;

	/// Initial value used when rendering an unbound form
	fn initial(&self) -> Option<&serde_json::Value>;

	/// Validate and normalize a submitted value
	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value>;

	/// Whether the submitted value differs from the initial one
	fn has_changed(
		&self,
		initial: Option<&serde_json::Value>,
		data: Option<&serde_json::Value>,
	) -> bool {
		initial != data
	}
}
