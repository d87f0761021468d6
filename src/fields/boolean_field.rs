//! Boolean field rendered as a checkbox

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Checkbox field; an absent or empty submission means `false`
#[derive(Debug, Clone)]
pub struct BooleanField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
}

impl BooleanField {
	/// Create a new BooleanField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::BooleanField;
	///
	/// let field = BooleanField::new("active".to_string());
	/// assert_eq!(field.name, "active");
	/// assert!(!field.required);
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::CheckboxInput,
			initial: None,
		}
	}

	/// Require the box to be checked (e.g. terms of service)
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
}

impl FormField for BooleanField {
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
		// Browsers omit unchecked checkboxes entirely, so anything other
		// than an affirmative value counts as false.
		let checked = match value {
			None => false,
			Some(serde_json::Value::Null) => false,
			Some(serde_json::Value::Bool(b)) => *b,
			Some(serde_json::Value::String(s)) => {
				matches!(s.to_ascii_lowercase().as_str(), "on" | "true" | "1")
			}
			Some(serde_json::Value::Number(n)) => n.as_i64() == Some(1),
			Some(other) => {
				return Err(FieldError::Validation(format!(
					"Value must be a boolean, got {}",
					other
				)));
			}
		};

		if self.required && !checked {
			return Err(FieldError::Required(self.name.clone()));
		}

		Ok(serde_json::Value::Bool(checked))
	}

	fn has_changed(
		&self,
		initial: Option<&serde_json::Value>,
		data: Option<&serde_json::Value>,
	) -> bool {
		let to_bool = |v: Option<&serde_json::Value>| self.clean(v).ok();
		to_bool(initial) != to_bool(data)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	#[rstest]
	fn test_boolean_field_absent_is_false() {
		let field = BooleanField::new("active".to_string());

		assert_eq!(field.clean(None).unwrap(), json!(false));
		assert_eq!(field.clean(Some(&json!(null))).unwrap(), json!(false));
	}

	#[rstest]
	#[case(json!(true), true)]
	#[case(json!(false), false)]
	#[case(json!("on"), true)]
	#[case(json!("true"), true)]
	#[case(json!("1"), true)]
	#[case(json!("off"), false)]
	fn test_boolean_field_coercion(#[case] value: serde_json::Value, #[case] expected: bool) {
		let field = BooleanField::new("active".to_string());

		assert_eq!(field.clean(Some(&value)).unwrap(), json!(expected));
	}

	#[rstest]
	fn test_boolean_field_required_unchecked() {
		let field = BooleanField::new("terms".to_string()).required();

		assert!(field.clean(None).is_err());
		assert!(field.clean(Some(&json!(true))).is_ok());
	}
}
