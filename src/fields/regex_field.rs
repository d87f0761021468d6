//! Text field validated against a regular expression

use crate::field::{FieldError, FieldResult, FormField, Widget};
use regex::Regex;

/// Character field whose non-empty values must match a pattern
#[derive(Debug, Clone)]
pub struct RegexField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub regex: Regex,
	/// Error message used instead of the generic pattern message
	pub message: Option<String>,
}

impl RegexField {
	/// Create a new RegexField with the given name and pattern
	///
	/// Returns an error if the pattern does not compile.
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::RegexField;
	///
	/// let field = RegexField::new("code".to_string(), r"^[A-Z]{3}$").unwrap();
	/// assert_eq!(field.name, "code");
	/// ```
	pub fn new(name: String, pattern: &str) -> Result<Self, regex::Error> {
		Ok(Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::TextInput,
			initial: None,
			regex: Regex::new(pattern)?,
			message: None,
		})
	}

	/// Create a new RegexField from an already-compiled pattern
	pub fn from_regex(name: String, regex: Regex) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::TextInput,
			initial: None,
			regex,
			message: None,
		}
	}

	/// Set the field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Set the label for the field
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the help text for the field
	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	/// Set the error message shown when the pattern does not match
	pub fn with_message(mut self, message: impl Into<String>) -> Self {
		self.message = Some(message.into());
		self
	}

	/// Set the initial value for the field
	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(serde_json::json!(initial.into()));
		self
	}
}

impl FormField for RegexField {
	fn name(&self) -> &str {
		&self.name
	}

	fn label(&self) -> Option<&str> {
		self.label.as_deref()
	}

	fn required(&self) -> bool {
		self.required
	}

	fn help_text(&self) -> Option<&str> {
		self.help_text.as_deref()
	}

	fn widget(&self) -> &Widget {
		&self.widget
	}

	fn initial(&self) -> Option<&serde_json::Value> {
		self.initial.as_ref()
	}

	fn clean(&self, value: Option<&serde_json::Value>) -> FieldResult<serde_json::Value> {
		let str_value = match value {
			None | Some(serde_json::Value::Null) => None,
			Some(v) => Some(
				v.as_str()
					.ok_or_else(|| {
						FieldError::Validation("Value must be a string".to_string())
					})?
					.trim(),
			),
		};

		let v = match str_value {
			Some(v) if !v.is_empty() => v,
			_ => {
				if self.required {
					return Err(FieldError::Required(self.name.clone()));
				}
				return Ok(serde_json::Value::String(String::new()));
			}
		};

		if !self.regex.is_match(v) {
			let message = self
				.message
				.clone()
				.unwrap_or_else(|| format!("Value does not match the required pattern: {}", v));
			return Err(FieldError::Validation(message));
		}

		Ok(serde_json::Value::String(v.to_string()))
	}
}
