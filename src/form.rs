//! Form container: an ordered field list plus bound data and errors
//!
//! Fields are added in render order and looked up by their wire name,
//! which for sub-form fields carries the bracket notation (`labels[en]`,
//! `formOptions[choices]`). Binding stores the submitted data as-is;
//! validation cleans it field by field and collects the failures.

use crate::bound_field::BoundField;
use crate::field::{FieldError, FormField};
use std::collections::HashMap;

#[derive(Debug, thiserror::Error)]
pub enum FormError {
	#[error("Field error in {field}: {error}")]
	Field { field: String, error: FieldError },
	#[error("Validation error: {0}")]
	Validation(String),
}

pub type FormResult<T> = Result<T, FormError>;

/// An ordered set of fields with bound data and validation state
pub struct Form {
	fields: Vec<Box<dyn FormField>>,
	data: HashMap<String, serde_json::Value>,
	initial: HashMap<String, serde_json::Value>,
	errors: HashMap<String, Vec<String>>,
	is_bound: bool,
}

impl Form {
	/// Create an empty, unbound form
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::Form;
	///
	/// let form = Form::new();
	/// assert!(!form.is_bound());
	/// assert_eq!(form.field_count(), 0);
	/// ```
	pub fn new() -> Self {
		Self {
			fields: vec![],
			data: HashMap::new(),
			initial: HashMap::new(),
			errors: HashMap::new(),
			is_bound: false,
		}
	}

	/// Create a form pre-filled with initial values keyed by wire name
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::Form;
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut stored = HashMap::new();
	/// stored.insert("labels[en]".to_string(), json!("Color"));
	///
	/// let form = Form::with_initial(stored);
	/// assert_eq!(form.initial().get("labels[en]"), Some(&json!("Color")));
	/// ```
	pub fn with_initial(initial: HashMap<String, serde_json::Value>) -> Self {
		let mut form = Self::new();
		form.initial = initial;
		form
	}

	/// Append a field; order of addition is render order
	pub fn add_field(&mut self, field: Box<dyn FormField>) {
		self.fields.push(field);
	}

	/// Bind submitted data keyed by wire name
	pub fn bind(&mut self, data: HashMap<String, serde_json::Value>) {
		self.data = data;
		self.is_bound = true;
	}

	/// Clean every field's value and record failures
	///
	/// Cleaned values replace the raw submitted ones, so
	/// [`cleaned_data`](Self::cleaned_data) afterwards holds canonical
	/// values. An unbound form is never valid.
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::{CharField, Form};
	/// use serde_json::json;
	/// use std::collections::HashMap;
	///
	/// let mut form = Form::new();
	/// form.add_field(Box::new(CharField::new("name".to_string()).required()));
	///
	/// let mut data = HashMap::new();
	/// data.insert("name".to_string(), json!("  color  "));
	/// form.bind(data);
	///
	/// assert!(form.is_valid());
	/// assert_eq!(form.cleaned_data().get("name"), Some(&json!("color")));
	/// ```
	pub fn is_valid(&mut self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.errors.clear();

		for field in &self.fields {
			match field.clean(self.data.get(field.name())) {
				Ok(cleaned) => {
					self.data.insert(field.name().to_string(), cleaned);
				}
				Err(e) => {
					self.errors
						.entry(field.name().to_string())
						.or_default()
						.push(e.to_string());
				}
			}
		}

		self.errors.is_empty()
	}

	pub fn cleaned_data(&self) -> &HashMap<String, serde_json::Value> {
		&self.data
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		&self.errors
	}

	pub fn is_bound(&self) -> bool {
		self.is_bound
	}

	pub fn fields(&self) -> &[Box<dyn FormField>] {
		&self.fields
	}

	pub fn initial(&self) -> &HashMap<String, serde_json::Value> {
		&self.initial
	}

	/// Replace the initial values wholesale
	pub fn set_initial(&mut self, initial: HashMap<String, serde_json::Value>) {
		self.initial = initial;
	}

	/// Whether any bound value differs from its initial counterpart
	///
	/// Each field decides what counts as a change; checkbox fields, for
	/// instance, treat an absent value and `false` as equal.
	pub fn has_changed(&self) -> bool {
		if !self.is_bound {
			return false;
		}

		self.fields.iter().any(|field| {
			field.has_changed(
				self.initial.get(field.name()),
				self.data.get(field.name()),
			)
		})
	}

	pub fn get_field(&self, name: &str) -> Option<&dyn FormField> {
		self.fields
			.iter()
			.find(|f| f.name() == name)
			.map(|f| f.as_ref())
	}

	pub fn remove_field(&mut self, name: &str) -> Option<Box<dyn FormField>> {
		let pos = self.fields.iter().position(|f| f.name() == name)?;
		Some(self.fields.remove(pos))
	}

	pub fn field_count(&self) -> usize {
		self.fields.len()
	}

	/// Rendering view of a single field, if present
	pub fn get_bound_field<'a>(&'a self, name: &str) -> Option<BoundField<'a>> {
		self.get_field(name).map(|field| self.view_of(field))
	}

	/// Rendering views of every field, in form order
	///
	/// Each view carries the field's current value (bound data, falling
	/// back to the form's initial value) and its errors.
	pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
		self.fields
			.iter()
			.map(|f| self.view_of(f.as_ref()))
			.collect()
	}

	fn view_of<'a>(&'a self, field: &'a dyn FormField) -> BoundField<'a> {
		let name = field.name();
		let value = self.data.get(name).or_else(|| self.initial.get(name));
		let errors = self.errors.get(name).map(|e| e.as_slice()).unwrap_or(&[]);

		BoundField::new(field, value, errors)
	}
}

impl Default for Form {
	fn default() -> Self {
		Self::new()
	}
}
