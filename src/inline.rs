//! Building a concrete form out of stored dynamic field definitions
//!
//! This is the downstream consumer of a [`DynamicField`]'s options: it
//! resolves each definition's type identifier to a field factory,
//! applies the common options (`required`, `help`), and for choice
//! fields parses the comma-delimited choice list.

use crate::dynamic_field::DynamicField;
use crate::events::FormTypeChoiceEvent;
use crate::field::{FormField, Widget};
use crate::fields::{BooleanField, CharField, ChoiceField, IntegerField};
use crate::form::Form;
use crate::signals::Signal;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

/// Constructs a concrete form field from a definition and its resolved label
pub type FieldFactory = Arc<dyn Fn(&DynamicField, &str) -> Box<dyn FormField> + Send + Sync>;

/// Resolution table from field-type identifier to field factory
///
/// # Examples
///
/// ```
/// use dynamic_forms::inline::FieldTypeRegistry;
///
/// let registry = FieldTypeRegistry::with_builtin_types();
/// assert!(registry.resolve("text").is_some());
/// assert!(registry.resolve("unknown").is_none());
/// ```
#[derive(Default)]
pub struct FieldTypeRegistry {
	entries: RwLock<HashMap<String, FieldFactory>>,
}

impl FieldTypeRegistry {
	/// Create an empty registry
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a registry pre-populated with the builtin field types
	pub fn with_builtin_types() -> Self {
		let registry = Self::new();
		registry.register("text", Arc::new(text_factory));
		registry.register("textarea", Arc::new(textarea_factory));
		registry.register("checkbox", Arc::new(checkbox_factory));
		registry.register("integer", Arc::new(integer_factory));
		registry.register("choice", Arc::new(choice_factory));
		registry
	}

	/// Register (or replace) the factory for a field-type identifier
	pub fn register(&self, type_id: impl Into<String>, factory: FieldFactory) {
		self.entries.write().insert(type_id.into(), factory);
	}

	/// Resolve the factory registered for `type_id`, if any
	pub fn resolve(&self, type_id: &str) -> Option<FieldFactory> {
		self.entries.read().get(type_id).cloned()
	}
}

/// Builds a form containing one field per stored definition
///
/// Inactive definitions are skipped; the rest are added in ascending
/// weight order (stable for equal weights). The label is the requested
/// locale's translated label, falling back to the field name.
pub struct InlineFormDefinition {
	registry: Arc<FieldTypeRegistry>,
}

impl InlineFormDefinition {
	pub fn new(registry: Arc<FieldTypeRegistry>) -> Self {
		Self { registry }
	}

	/// Add the defined fields to `form`, labeled for `locale`
	pub fn build(&self, form: &mut Form, definitions: &[DynamicField], locale: &str) {
		let mut active: Vec<&DynamicField> = definitions.iter().filter(|d| d.active).collect();
		active.sort_by_key(|d| d.weight);

		for definition in active {
			let label = definition
				.labels
				.get(locale)
				.cloned()
				.unwrap_or_else(|| definition.name.clone());

			match self.registry.resolve(&definition.form_type) {
				Some(factory) => form.add_field(factory(definition, &label)),
				None => {
					tracing::debug!(
						form_type = %definition.form_type,
						field = %definition.name,
						"no field factory registered"
					);
				}
			}
		}
	}
}

impl Default for InlineFormDefinition {
	fn default() -> Self {
		Self::new(Arc::new(FieldTypeRegistry::with_builtin_types()))
	}
}

/// Connect the builtin field types to a choice signal
///
/// Registered under a fixed dispatch uid, so wiring it repeatedly
/// contributes the choices once.
pub fn connect_builtin_type_choices(signal: &Signal<FormTypeChoiceEvent>) {
	signal.connect_with_uid(
		|event: Arc<FormTypeChoiceEvent>| {
			event.add_choice("Text", "text");
			event.add_choice("Textarea", "textarea");
			event.add_choice("Checkbox", "checkbox");
			event.add_choice("Integer", "integer");
			event.add_choice("Choice", "choice");
		},
		"builtin_form_types",
	);
}

/// Parse the comma-delimited choice list mini-format
///
/// Entries are either `value` or `key:value`; a bare value doubles as
/// its own label. Surrounding whitespace is trimmed, empty entries are
/// skipped.
///
/// # Examples
///
/// ```
/// use dynamic_forms::inline::parse_choice_list;
///
/// assert_eq!(
/// 	parse_choice_list("red, green, key1:Blue"),
/// 	vec![
/// 		("red".to_string(), "red".to_string()),
/// 		("green".to_string(), "green".to_string()),
/// 		("key1".to_string(), "Blue".to_string()),
/// 	]
/// );
/// ```
pub fn parse_choice_list(raw: &str) -> Vec<(String, String)> {
	raw.split(',')
		.map(str::trim)
		.filter(|entry| !entry.is_empty())
		.map(|entry| match entry.split_once(':') {
			Some((key, value)) => (key.trim().to_string(), value.trim().to_string()),
			None => (entry.to_string(), entry.to_string()),
		})
		.collect()
}

fn common_required(definition: &DynamicField) -> bool {
	definition
		.form_options
		.get("required")
		.and_then(|v| v.as_bool())
		.unwrap_or(false)
}

fn common_help(definition: &DynamicField) -> Option<String> {
	definition
		.form_options
		.get("help")
		.and_then(|v| v.as_str())
		.filter(|s| !s.is_empty())
		.map(str::to_string)
}

fn char_field(definition: &DynamicField, label: &str, widget: Widget) -> Box<dyn FormField> {
	let mut field = CharField::new(definition.name.clone())
		.with_label(label)
		.with_widget(widget);
	if common_required(definition) {
		field = field.required();
	}
	if let Some(help) = common_help(definition) {
		field = field.with_help_text(help);
	}
	Box::new(field)
}

fn text_factory(definition: &DynamicField, label: &str) -> Box<dyn FormField> {
	char_field(definition, label, Widget::TextInput)
}

fn textarea_factory(definition: &DynamicField, label: &str) -> Box<dyn FormField> {
	char_field(definition, label, Widget::TextArea)
}

fn checkbox_factory(definition: &DynamicField, label: &str) -> Box<dyn FormField> {
	let mut field = BooleanField::new(definition.name.clone()).with_label(label);
	if common_required(definition) {
		field = field.required();
	}
	if let Some(help) = common_help(definition) {
		field = field.with_help_text(help);
	}
	Box::new(field)
}

fn integer_factory(definition: &DynamicField, label: &str) -> Box<dyn FormField> {
	let mut field = IntegerField::new(definition.name.clone()).with_label(label);
	if common_required(definition) {
		field = field.required();
	}
	Box::new(field)
}

fn choice_factory(definition: &DynamicField, label: &str) -> Box<dyn FormField> {
	let choices = definition
		.form_options
		.get("choices")
		.and_then(|v| v.as_str())
		.map(parse_choice_list)
		.unwrap_or_default();

	let mut field = ChoiceField::new(definition.name.clone())
		.with_choices(choices)
		.with_label(label);
	if common_required(definition) {
		field = field.required();
	}
	if let Some(help) = common_help(definition) {
		field = field.with_help_text(help);
	}
	Box::new(field)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::signals::SignalName;
	use rstest::rstest;
	use serde_json::json;

	fn definition(
		name: &str,
		form_type: &str,
		weight: i64,
		active: bool,
	) -> DynamicField {
		let mut field = DynamicField::new(name, form_type);
		field.weight = weight;
		field.active = active;
		field
	}

	#[rstest]
	#[case("red, green", vec![("red", "red"), ("green", "green")])]
	#[case("key1:Blue", vec![("key1", "Blue")])]
	#[case("", vec![])]
	#[case(" a , , b ", vec![("a", "a"), ("b", "b")])]
	fn test_parse_choice_list(#[case] raw: &str, #[case] expected: Vec<(&str, &str)>) {
		let expected: Vec<(String, String)> = expected
			.into_iter()
			.map(|(l, v)| (l.to_string(), v.to_string()))
			.collect();
		assert_eq!(parse_choice_list(raw), expected);
	}

	#[test]
	fn test_build_orders_by_weight_and_skips_inactive() {
		let definitions = vec![
			definition("second", "text", 5, true),
			definition("skipped", "text", 1, false),
			definition("first", "text", 0, true),
		];

		let mut form = Form::new();
		InlineFormDefinition::default().build(&mut form, &definitions, "en");

		let names: Vec<&str> = form.fields().iter().map(|f| f.name()).collect();
		assert_eq!(names, vec!["first", "second"]);
	}

	#[test]
	fn test_build_uses_translated_label_with_fallback() {
		let mut translated = definition("title", "text", 0, true);
		translated
			.labels
			.insert("fr".to_string(), "Titre".to_string());
		let untranslated = definition("subtitle", "text", 1, true);

		let mut form = Form::new();
		InlineFormDefinition::default().build(&mut form, &[translated, untranslated], "fr");

		assert_eq!(form.get_field("title").unwrap().label(), Some("Titre"));
		assert_eq!(form.get_field("subtitle").unwrap().label(), Some("subtitle"));
	}

	#[test]
	fn test_build_applies_common_options() {
		let mut def = definition("email", "text", 0, true);
		def.form_options.insert("required".to_string(), json!(true));
		def.form_options
			.insert("help".to_string(), json!("Work address preferred"));

		let mut form = Form::new();
		InlineFormDefinition::default().build(&mut form, &[def], "en");

		let field = form.get_field("email").unwrap();
		assert!(field.required());
		assert_eq!(field.help_text(), Some("Work address preferred"));
	}

	#[test]
	fn test_choice_definition_produces_choice_field() {
		let mut def = definition("color", "choice", 0, true);
		def.form_options
			.insert("choices".to_string(), json!("red, green, key1:Blue"));

		let mut form = Form::new();
		InlineFormDefinition::default().build(&mut form, &[def], "en");

		let field = form.get_field("color").unwrap();
		match field.widget() {
			Widget::Select { choices } => {
				assert_eq!(choices.len(), 3);
				assert_eq!(choices[2], ("key1".to_string(), "Blue".to_string()));
			}
			other => panic!("unexpected widget: {:?}", other),
		}

		assert!(field.clean(Some(&json!("green"))).is_ok());
		assert!(field.clean(Some(&json!("yellow"))).is_err());
	}

	#[test]
	fn test_unknown_type_is_skipped() {
		let definitions = vec![definition("thing", "mystery", 0, true)];

		let mut form = Form::new();
		InlineFormDefinition::default().build(&mut form, &definitions, "en");

		assert_eq!(form.field_count(), 0);
	}

	#[test]
	fn test_builtin_type_choices_receiver_is_idempotent() {
		let signal: Signal<FormTypeChoiceEvent> =
			Signal::new(SignalName::custom("inline_builtin_choices"));
		connect_builtin_type_choices(&signal);
		connect_builtin_type_choices(&signal);

		let event = Arc::new(FormTypeChoiceEvent::new());
		signal.send(Arc::clone(&event));

		let choices = event.choices();
		assert_eq!(choices.len(), 5);
		assert!(
			choices
				.iter()
				.any(|(label, id)| label == "Choice" && id == "choice")
		);
	}
}
