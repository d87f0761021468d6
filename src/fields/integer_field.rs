//! Integer field with range validation

use crate::field::{FieldError, FieldResult, FormField, Widget};

/// Integer field with optional min/max bounds and a default for empty input
#[derive(Debug, Clone)]
pub struct IntegerField {
	pub name: String,
	pub label: Option<String>,
	pub required: bool,
	pub help_text: Option<String>,
	pub widget: Widget,
	pub initial: Option<serde_json::Value>,
	pub min_value: Option<i64>,
	pub max_value: Option<i64>,
	/// Value substituted when an optional field is submitted empty
	pub empty_value: Option<i64>,
}

impl IntegerField {
	/// Create a new IntegerField with the given name
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::IntegerField;
	///
	/// let field = IntegerField::new("weight".to_string());
	/// assert_eq!(field.name, "weight");
	/// assert_eq!(field.min_value, None);
	/// ```
	pub fn new(name: String) -> Self {
		Self {
			name,
			label: None,
			required: false,
			help_text: None,
			widget: Widget::NumberInput,
			initial: None,
			min_value: None,
			max_value: None,
			empty_value: None,
		}
	}

	/// Set the field as required
	pub fn required(mut self) -> Self {
		self.required = true;
		self
	}

	/// Set the minimum allowed value
	pub fn with_min_value(mut self, min_value: i64) -> Self {
		self.min_value = Some(min_value);
		self
	}

	/// Set the maximum allowed value
	pub fn with_max_value(mut self, max_value: i64) -> Self {
		self.max_value = Some(max_value);
		self
	}

	/// Set the label for the field
	pub fn with_label(mut self, label: impl Into<String>) -> Self {
		self.label = Some(label.into());
		self
	}

	/// Substitute `empty_value` when an optional field is submitted empty
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::fields::IntegerField;
	/// use dynamic_forms::field::FormField;
	///
	/// let field = IntegerField::new("weight".to_string()).with_empty_value(0);
	/// assert_eq!(field.clean(None).unwrap(), serde_json::json!(0));
	/// ```
	pub fn with_empty_value(mut self, empty_value: i64) -> Self {
		self.empty_value = Some(empty_value);
		self
	}
}

impl FormField for IntegerField {
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
		let parsed = match value {
			None | Some(serde_json::Value::Null) => None,
			Some(serde_json::Value::Number(n)) => Some(n.as_i64().ok_or_else(|| {
				FieldError::Validation(format!("Enter a whole number, got {}", n))
			})?),
			Some(serde_json::Value::String(s)) => {
				let s = s.trim();
				if s.is_empty() {
					None
				} else {
					Some(s.parse::<i64>().map_err(|_| {
						FieldError::Validation(format!("Enter a whole number, got '{}'", s))
					})?)
				}
			}
			Some(other) => {
				return Err(FieldError::Validation(format!(
					"Enter a whole number, got {}",
					other
				)));
			}
		};

		let parsed = match parsed {
			Some(n) => n,
			None => {
				if self.required {
					return Err(FieldError::Required(self.name.clone()));
				}
				match self.empty_value {
					Some(n) => n,
					None => return Ok(serde_json::Value::Null),
				}
			}
		};

		if let Some(min) = self.min_value
			&& parsed < min
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is greater than or equal to {}",
				min
			)));
		}

		if let Some(max) = self.max_value
			&& parsed > max
		{
			return Err(FieldError::Validation(format!(
				"Ensure this value is less than or equal to {}",
				max
			)));
		}

		Ok(serde_json::json!(parsed))
	}
}
