//! Per-type options sub-forms and their resolution registry
//!
//! Every field type exposes a set of configuration fields ("options").
//! An [`OptionsForm`] describes that set; schemas can declare a parent
//! whose fields are installed first, so type-specific schemas extend a
//! shared base. The [`OptionsFormRegistry`] maps a field-type identifier
//! to its schema; which schema a given identifier resolves to is pure
//! configuration.

use crate::fields::{BooleanField, CharField};
use crate::form::Form;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Wire name of the option input for `key`, e.g. `formOptions[multiple]`
pub fn option_field_name(key: &str) -> String {
	format!("formOptions[{}]", key)
}

/// Prefix shared by all option field wire names
pub const OPTIONS_FIELD_PREFIX: &str = "formOptions[";

/// One field type's configuration sub-form
pub trait OptionsForm: Send + Sync {
	/// Parent schema whose fields are installed before this schema's
	fn parent(&self) -> Option<Arc<dyn OptionsForm>> {
		None
	}

	/// Add this schema's own fields to the form
	fn build_options(&self, form: &mut Form);

	/// Install the full schema: parent chain first, then own fields
	fn build(&self, form: &mut Form) {
		if let Some(parent) = self.parent() {
			parent.build(form);
		}
		self.build_options(form);
	}
}

/// Options every field type accepts
pub struct CommonOptionsForm;

impl OptionsForm for CommonOptionsForm {
	fn build_options(&self, form: &mut Form) {
		form.add_field(Box::new(
			BooleanField::new(option_field_name("required")).with_label("Required"),
		));
		form.add_field(Box::new(
			CharField::new(option_field_name("help")).with_label("Help text"),
		));
	}
}

/// Options for choice-type fields: multiple, expanded and the choice list
pub struct ChoiceOptionsForm;

impl OptionsForm for ChoiceOptionsForm {
	fn parent(&self) -> Option<Arc<dyn OptionsForm>> {
		Some(Arc::new(CommonOptionsForm))
	}

	fn build_options(&self, form: &mut Form) {
		form.add_field(Box::new(
			BooleanField::new(option_field_name("multiple")).with_label("Multiple"),
		));
		form.add_field(Box::new(
			BooleanField::new(option_field_name("expanded")).with_label("Expanded"),
		));
		form.add_field(Box::new(
			CharField::new(option_field_name("choices"))
				.required()
				.with_label("Choices")
				.with_help_text(
					"A comma-delineated list. Either \"value, value, value\" or \
					 \"key:value, key:value, key:value\"",
				),
		));
	}
}

/// Resolution table from field-type identifier to options schema
///
/// # Examples
///
/// ```
/// use dynamic_forms::options::{OptionsFormRegistry, CommonOptionsForm};
/// use std::sync::Arc;
///
/// let registry = OptionsFormRegistry::new();
/// registry.register("text", Arc::new(CommonOptionsForm));
/// assert!(registry.resolve("text").is_some());
/// assert!(registry.resolve("unknown").is_none());
/// ```
#[derive(Default)]
pub struct OptionsFormRegistry {
	entries: RwLock<HashMap<String, Arc<dyn OptionsForm>>>,
}

impl OptionsFormRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry pre-populated with the builtin field types
	pub fn with_builtin_types() -> Self {
		let registry = Self::new();
		let common: Arc<dyn OptionsForm> = Arc::new(CommonOptionsForm);
		for type_id in ["text", "textarea", "checkbox", "integer"] {
			registry.register(type_id, Arc::clone(&common));
		}
		registry.register("choice", Arc::new(ChoiceOptionsForm));
		registry
	}

	/// Register (or replace) the schema for a field-type identifier
	pub fn register(&self, type_id: impl Into<String>, schema: Arc<dyn OptionsForm>) {
		self.entries.write().insert(type_id.into(), schema);
	}

	/// Resolve the schema registered for `type_id`, if any
	pub fn resolve(&self, type_id: &str) -> Option<Arc<dyn OptionsForm>> {
		self.entries.read().get(type_id).cloned()
	}

	/// Identifiers with a registered schema, unordered
	pub fn registered_types(&self) -> Vec<String> {
		self.entries.read().keys().cloned().collect()
	}
}
