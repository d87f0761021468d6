//! Rendering view pairing a field with its current value and errors

use crate::field::{FormField, Widget};

/// A field together with the value and errors to render it with
///
/// Produced by [`Form::bound_fields`](crate::Form::bound_fields); the
/// value is the bound submission falling back to the form's initial
/// value, so an edit form shows stored definition data before the first
/// submission.
pub struct BoundField<'a> {
	field: &'a dyn FormField,
	value: Option<&'a serde_json::Value>,
	errors: &'a [String],
}

impl<'a> BoundField<'a> {
	pub fn new(
		field: &'a dyn FormField,
		value: Option<&'a serde_json::Value>,
		errors: &'a [String],
	) -> Self {
		Self {
			field,
			value,
			errors,
		}
	}

	/// The field's wire name, e.g. `formOptions[choices]`
	pub fn name(&self) -> &str {
		self.field.name()
	}

	/// The id attribute for the field's label element
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::{BoundField, CharField, FormField};
	///
	/// let field: Box<dyn FormField> = Box::new(CharField::new("name".to_string()));
	/// let view = BoundField::new(field.as_ref(), None, &[]);
	/// assert_eq!(view.id_for_label(), "id_name");
	/// ```
	pub fn id_for_label(&self) -> String {
		format!("id_{}", self.field.name())
	}

	pub fn label(&self) -> Option<&str> {
		self.field.label()
	}

	/// The value to render, falling back to the field's own initial
	pub fn value(&self) -> Option<&serde_json::Value> {
		self.value.or_else(|| self.field.initial())
	}

	pub fn errors(&self) -> &[String] {
		self.errors
	}

	pub fn has_errors(&self) -> bool {
		!self.errors.is_empty()
	}

	pub fn widget(&self) -> &Widget {
		self.field.widget()
	}

	pub fn help_text(&self) -> Option<&str> {
		self.field.help_text()
	}

	pub fn is_required(&self) -> bool {
		self.field.required()
	}
}
