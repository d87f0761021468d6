//! End-to-end tests for the dynamic field definition workflow
//!
//! Covers the full round trip: choice collection over the signal,
//! translated-label fields, options dispatch on type change, and
//! rebuilding a concrete form from stored definitions.

use dynamic_forms::signals::{Signal, SignalName};
use dynamic_forms::{
	DynamicField, DynamicFieldForm, FORM_TYPE_PLACEHOLDER, FormTypeChoiceEvent,
	InlineFormDefinition, LocaleChoiceEvent, LocaleProvider, OptionsFormRegistry,
	TranslationCollection, Widget, connect_builtin_type_choices,
};
use rstest::rstest;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

fn english_french_locales(name: &'static str) -> LocaleProvider {
	let signal: Signal<LocaleChoiceEvent> = Signal::new(SignalName::custom(name));
	signal.connect(|event| {
		event.add_locale("English", "en");
		event.add_locale("French", "fr");
	});
	LocaleProvider::new(signal)
}

fn builtin_choices(name: &'static str) -> Signal<FormTypeChoiceEvent> {
	let signal = Signal::new(SignalName::custom(name));
	connect_builtin_type_choices(&signal);
	signal
}

#[rstest]
fn test_translation_subform_matches_locales() {
	let mut form = dynamic_forms::Form::new();
	TranslationCollection::new(english_french_locales("e2e_translation")).build(&mut form);

	// Exactly one optional text field per locale, no extras
	assert_eq!(form.field_count(), 2);

	let en = form.get_field("labels[en]").unwrap();
	assert_eq!(en.label(), Some("English"));
	assert!(!en.required());
	assert!(matches!(en.widget(), Widget::TextInput));

	let fr = form.get_field("labels[fr]").unwrap();
	assert_eq!(fr.label(), Some("French"));
	assert!(!fr.required());
}

#[rstest]
fn test_selector_is_union_of_registered_choices() {
	let signal: Signal<FormTypeChoiceEvent> = Signal::new(SignalName::custom("e2e_union"));
	signal.connect(|event| event.add_choice("Text", "text"));
	signal.connect(|event| event.add_choice("Rating", "rating"));

	let form = DynamicFieldForm::new(
		&signal,
		english_french_locales("e2e_union_locales"),
		Arc::new(OptionsFormRegistry::with_builtin_types()),
	);

	match form.form().get_field("formType").unwrap().widget() {
		Widget::Select { choices } => {
			// Placeholder first, then the contributed pairs
			assert_eq!(
				choices,
				&vec![
					(FORM_TYPE_PLACEHOLDER.to_string(), String::new()),
					("Text".to_string(), "text".to_string()),
					("Rating".to_string(), "rating".to_string()),
				]
			);
		}
		other => panic!("unexpected widget: {:?}", other),
	}
}

#[rstest]
fn test_zero_listeners_yields_placeholder_only_selector() {
	let signal: Signal<FormTypeChoiceEvent> = Signal::new(SignalName::custom("e2e_empty"));
	let form = DynamicFieldForm::new(
		&signal,
		english_french_locales("e2e_empty_locales"),
		Arc::new(OptionsFormRegistry::with_builtin_types()),
	);

	match form.form().get_field("formType").unwrap().widget() {
		Widget::Select { choices } => {
			let labels: Vec<&str> = choices.iter().map(|(l, _)| l.as_str()).collect();
			assert_eq!(labels, vec![FORM_TYPE_PLACEHOLDER]);
		}
		other => panic!("unexpected widget: {:?}", other),
	}
}

#[rstest]
fn test_choices_text_is_stored_verbatim() {
	let signal = builtin_choices("e2e_verbatim");
	let mut form = DynamicFieldForm::new(
		&signal,
		english_french_locales("e2e_verbatim_locales"),
		Arc::new(OptionsFormRegistry::with_builtin_types()),
	);

	let mut data = HashMap::new();
	data.insert("name".to_string(), json!("color"));
	data.insert("formType".to_string(), json!("choice"));
	data.insert(
		"formOptions[choices]".to_string(),
		json!("red, green, key1:Blue"),
	);
	form.bind(data);

	assert!(form.is_valid(), "errors: {:?}", form.errors());
	let field = form.cleaned_field().unwrap();
	// No parsing happens at definition time
	assert_eq!(
		field.form_options.get("choices"),
		Some(&json!("red, green, key1:Blue"))
	);
}

#[rstest]
fn test_full_round_trip_definition_to_inline_form() {
	let signal = builtin_choices("e2e_round_trip");
	let mut form = DynamicFieldForm::new(
		&signal,
		english_french_locales("e2e_round_trip_locales"),
		Arc::new(OptionsFormRegistry::with_builtin_types()),
	);

	let mut data = HashMap::new();
	data.insert("name".to_string(), json!("color"));
	data.insert("formType".to_string(), json!("choice"));
	data.insert("labels[fr]".to_string(), json!("Couleur"));
	data.insert(
		"formOptions[choices]".to_string(),
		json!("red, green, key1:Blue"),
	);
	data.insert("formOptions[required]".to_string(), json!(true));
	data.insert("weight".to_string(), json!(2));
	data.insert("active".to_string(), json!(true));
	form.bind(data);

	assert!(form.is_valid(), "errors: {:?}", form.errors());
	let definition = form.cleaned_field().unwrap();
	assert_eq!(definition.name, "color");
	assert_eq!(definition.weight, 2);
	assert!(definition.active);

	// The stored definition becomes a concrete, validating field
	let mut rendered = dynamic_forms::Form::new();
	InlineFormDefinition::default().build(&mut rendered, &[definition], "fr");

	let field = rendered.get_field("color").unwrap();
	assert_eq!(field.label(), Some("Couleur"));
	assert!(field.required());
	assert!(field.clean(Some(&json!("green"))).is_ok());
	assert!(field.clean(Some(&json!("magenta"))).is_err());
}

#[rstest]
fn test_type_change_does_not_carry_old_options() {
	let signal = builtin_choices("e2e_type_change");
	let registry = Arc::new(OptionsFormRegistry::with_builtin_types());

	let mut stored = DynamicField::new("color", "choice");
	stored
		.form_options
		.insert("choices".to_string(), json!("red, green"));
	stored
		.form_options
		.insert("required".to_string(), json!(true));

	let mut form = DynamicFieldForm::with_initial(
		&signal,
		english_french_locales("e2e_type_change_locales"),
		Arc::clone(&registry),
		&stored,
	);
	assert_eq!(form.bound_type(), Some("choice"));

	let mut data = HashMap::new();
	data.insert("name".to_string(), json!("color"));
	data.insert("formType".to_string(), json!("text"));
	form.bind(data);

	assert_eq!(form.bound_type(), Some("text"));
	assert!(form.is_valid(), "errors: {:?}", form.errors());

	let changed = form.cleaned_field().unwrap();
	assert_eq!(changed.form_type, "text");
	assert!(changed.form_options.get("choices").is_none());
}

#[rstest]
fn test_resubmitting_same_type_keeps_options_schema() {
	let signal = builtin_choices("e2e_same_type");

	let mut stored = DynamicField::new("color", "choice");
	stored
		.form_options
		.insert("choices".to_string(), json!("red, green"));

	let mut form = DynamicFieldForm::with_initial(
		&signal,
		english_french_locales("e2e_same_type_locales"),
		Arc::new(OptionsFormRegistry::with_builtin_types()),
		&stored,
	);
	let fields_before: Vec<String> = form
		.form()
		.fields()
		.iter()
		.map(|f| f.name().to_string())
		.collect();

	let mut data = HashMap::new();
	data.insert("name".to_string(), json!("color"));
	data.insert("formType".to_string(), json!("choice"));
	data.insert("formOptions[choices]".to_string(), json!("red, green"));
	form.bind(data);

	let fields_after: Vec<String> = form
		.form()
		.fields()
		.iter()
		.map(|f| f.name().to_string())
		.collect();
	assert_eq!(fields_before, fields_after);
	assert!(form.is_valid(), "errors: {:?}", form.errors());
	assert_eq!(
		form.cleaned_field().unwrap().form_options.get("choices"),
		Some(&json!("red, green"))
	);
}

#[rstest]
fn test_invalid_type_submission_is_rejected_by_selector() {
	let signal = builtin_choices("e2e_invalid_type");
	let mut form = DynamicFieldForm::new(
		&signal,
		english_french_locales("e2e_invalid_type_locales"),
		Arc::new(OptionsFormRegistry::with_builtin_types()),
	);

	let mut data = HashMap::new();
	data.insert("name".to_string(), json!("thing"));
	data.insert("formType".to_string(), json!("not_a_registered_type"));
	form.bind(data);

	assert!(!form.is_valid());
	assert!(form.errors().contains_key("formType"));
}

#[rstest]
fn test_global_signal_wiring() {
	// The application-wide signal works like a locally constructed one;
	// a unique dispatch uid keeps this test's receiver isolated.
	let signal = dynamic_forms::form_type_choices();
	signal.connect_with_uid(
		|event: Arc<FormTypeChoiceEvent>| event.add_choice("Global", "global_test_type"),
		"e2e_global_wiring",
	);

	let event = Arc::new(FormTypeChoiceEvent::new());
	signal.send(Arc::clone(&event));
	assert!(
		event
			.choices()
			.iter()
			.any(|(_, id)| id == "global_test_type")
	);

	signal.disconnect("e2e_global_wiring");
}
