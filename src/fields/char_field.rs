//! Free-text field with length limits
//!
//! Carries the label and help-text inputs of the definition form as
//! well as option values stored as plain text (the choices list).

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Text field; input is trimmed by default and measured in characters
#[derive(Debug, Clone)]
pub struct CharField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub max_length: Option<usize>,
	pub min_length: Option<usize>,
	/// Trim surrounding whitespace before validating
	pub strip: bool,
	/// Cleaned value substituted for an optional empty submission
	pub empty_value: Option<String>,
}

impl CharField {
	/// Create an optional text field with the given wire name
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::CharField;
	///
	/// let field = CharField::new("labels[en]".to_string());
	/// assert_eq!(field.name, "labels[en]");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::TextInput,
			initial: None,
			max_length: None,
			min_length: None,
			strip: true,
			empty_value: None,
		}
	}

	/// Require a non-empty value
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Reject values longer than `max_length` characters
	pub fn with_max_length(mut self, max_length: usize) -> Self {
		self.max_length = Some(max_length);
		self
	}

	/// Reject values shorter than `min_length` characters
	pub fn with_min_length(mut self, min_length: usize) -> Self {
		self.min_length = Some(min_length);
		self
	}

	/// Set the rendered label
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Set the help text rendered alongside the field
	pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
		self.help_text = Some(help_text.into());
		self
	}

	/// Set the value rendered before any submission
	pub fn with_initial(mut self, initial: impl Into<String>) -> Self {
		self.initial = Some(serde_json::json!(initial.into()));
		self
	}

	/// Render with a different widget, e.g. [`Widget::TextArea`]
	pub fn with_widget(mut self, widget: Widget) -> Self {
		self.widget = widget;
		self
	}
}

impl FormField for CharField {
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
		let raw = match value {
			None | Some(serde_json::Value::Null) => "",
			Some(v) => v.as_str().ok_or_else(|| {
				FieldError::Validation("Value must be a string".to_string())
			})?,
		};
		let raw = if self.strip { raw.trim() } else { raw };

		if raw.is_empty() {
			if self.required {
				return Err(FieldError::Required(self.name.clone()));
			}
			return Ok(serde_json::Value::String(
				self.empty_value.clone().unwrap_or_default(),
			));
		}

		// Limits count characters, not bytes
		let char_count = raw.chars().count();
		if let Some(max_length) = self.max_length
			&& char_count > max_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at most {} characters (it has {})",
				max_length, char_count
			)));
		}
		if let Some(min_length) = self.min_length
			&& char_count < min_length
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value has at least {} characters (it has {})",
				min_length, char_count
			)));
		}

		Ok(serde_json::Value::String(raw.to_string()))
	}
}
