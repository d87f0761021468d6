//! Choice field backed by a fixed list of (label, value) pairs

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Select field validating the submitted value against its choice list
///
/// Choices are `(label, value)` pairs in render order. An optional
/// placeholder becomes the leading widget entry with an empty value;
/// submitting that empty value never counts as a selection.
#[derive(Debug, Clone)]
pub struct ChoiceField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub choices: Vec<(String, String)>,
	pub placeholder: Option<String>,
}

impl ChoiceField {
	/// Create a new ChoiceField with the given name and no choices
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::ChoiceField;
	///
	/// let field = ChoiceField::new("color".to_string());
	/// assert!(field.choices.is_empty());
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::Select {
				choices: Vec::new(),
			},
			initial: None,
			choices: Vec::new(),
			placeholder: None,
		}
	}

	/// Set the selectable `(label, value)` pairs
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::ChoiceField;
	///
	/// let field = ChoiceField::new("color".to_string())
	/// 	.with_choices(vec![("Red".to_string(), "r".to_string())]);
	/// assert_eq!(field.choices.len(), 1);
	/// ```
	pub fn with_choices(mut self, choices: Vec<(String, String)>) -> Self {
		self.choices = choices;
		self.rebuild_widget();
		self
	}

	/// Set the placeholder entry rendered ahead of the choices
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::ChoiceField;
	/// use dynamic_forms::field::{FormField, Widget};
	///
	/// let field = ChoiceField::new("color".to_string())
	/// 	.with_choices(vec![("Red".to_string(), "r".to_string())])
	/// 	.with_placeholder("Pick one");
	/// let Widget::Select { choices } = field.widget() else { unreachable!() };
	/// assert_eq!(choices[0], ("Pick one".to_string(), String::new()));
	/// ```
	pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
		self.placeholder = Some(placeholder.into());
		self.rebuild_widget();
		self
	}

	fn rebuild_widget(&mut self) {
		let mut entries = Vec::with_capacity(self.choices.len() + 1);
		if let Some(placeholder) = &self.placeholder {
			entries.push((placeholder.clone(), String::new()));
		}
		entries.extend(self.choices.iter().cloned());
		self.widget = Widget::Select { choices: entries };
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

	fn is_valid_choice(&self, value: &str) -> bool {
		self.choices.iter().any(|(_, v)| v == value)
	}
}

impl FormField for ChoiceField {
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
			Some(v) => Some(v.as_str().ok_or_else(|| {
				FieldError::Validation("Value must be a string".to_string())
			})?),
		};

		match str_value {
			Some(v) if !v.is_empty() => {
				if self.is_valid_choice(v) {
					Ok(serde_json::Value::String(v.to_string()))
				} else {
					Err(FieldError::InvalidChoice(v.to_string()))
				}
			}
			_ => {
				if self.required {
					Err(FieldError::Required(self.name.clone()))
				} else {
					Ok(serde_json::Value::String(String::new()))
				}
			}
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use serde_json::json;

	fn color_field() -> ChoiceField {
		ChoiceField::new("color".to_string()).with_choices(vec![
			("Red".to_string(), "r".to_string()),
			("Green".to_string(), "g".to_string()),
		])
	}

	#[rstest]
	fn test_choice_field_valid_choice() {
		let field = color_field();

		assert_eq!(field.clean(Some(&json!("r"))).unwrap(), json!("r"));
	}

	#[rstest]
	fn test_choice_field_invalid_choice() {
		let field = color_field();

		let err = field.clean(Some(&json!("blue"))).unwrap_err();
		assert!(matches!(err, FieldError::InvalidChoice(_)));
	}

	#[rstest]
	fn test_choice_field_labels_are_not_values() {
		let field = color_field();

		// "Red" is a label, not a submittable value
		assert!(field.clean(Some(&json!("Red"))).is_err());
	}

	#[rstest]
	fn test_choice_field_required_empty() {
		let field = color_field().required();

		assert!(field.clean(None).is_err());
		assert!(field.clean(Some(&json!(""))).is_err());
	}

	#[rstest]
	fn test_choice_field_optional_empty() {
		let field = color_field();

		assert_eq!(field.clean(None).unwrap(), json!(""));
	}

	#[rstest]
	fn test_choice_field_widget_carries_choices() {
		let field = color_field();

		match field.widget() {
			Widget::Select { choices } => assert_eq!(choices.len(), 2),
			other => panic!("unexpected widget: {:?}", other),
		}
	}

	#[rstest]
	fn test_choice_field_placeholder_leads_widget_entries() {
		let field = color_field().with_placeholder("Pick one");

		match field.widget() {
			Widget::Select { choices } => {
				assert_eq!(
					choices,
					&vec![
						("Pick one".to_string(), String::new()),
						("Red".to_string(), "r".to_string()),
						("Green".to_string(), "g".to_string()),
					]
				);
			}
			other => panic!("unexpected widget: {:?}", other),
		}
	}

	#[rstest]
	fn test_choice_field_placeholder_survives_choice_order() {
		// Builder order must not matter
		let field = ChoiceField::new("color".to_string())
			.with_placeholder("Pick one")
			.with_choices(vec![("Red".to_string(), "r".to_string())]);

		match field.widget() {
			Widget::Select { choices } => {
				assert_eq!(choices[0], ("Pick one".to_string(), String::new()));
				assert_eq!(choices.len(), 2);
			}
			other => panic!("unexpected widget: {:?}", other),
		}
	}

	#[rstest]
	fn test_choice_field_placeholder_value_is_not_a_selection() {
		let field = color_field().with_placeholder("Pick one").required();

		// The placeholder's empty value never cleans as a choice
		assert!(field.clean(Some(&json!(""))).is_err());
		assert!(!field.choices.iter().any(|(_, v)| v.is_empty()));
	}
}
