//! The dynamic field composite form and its options dispatch
//!
//! A dynamic field is a form field whose type, per-type options and
//! translated labels are configured at runtime through a form. The
//! composite form combines a name input, a type selector populated via
//! the choice signal, the translated-label sub-form, the options
//! sub-form for the selected type, a weight and an active flag.
//!
//! The options sub-form is the moving part: [`OptionsSchemaBinding`]
//! tracks which type's schema is currently installed and swaps it when
//! the submitted type changes.

use crate::bound_field::BoundField;
use crate::events::FormTypeChoiceEvent;
use crate::field::FieldError;
use crate::fields::{BooleanField, ChoiceField, IntegerField, RegexField};
use crate::form::{Form, FormError, FormResult};
use crate::locale::LocaleProvider;
use crate::options::{OPTIONS_FIELD_PREFIX, OptionsFormRegistry};
use crate::signals::Signal;
use crate::translation::{LABELS_FIELD_PREFIX, TranslationCollection, label_field_name};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Placeholder entry shown in the type selector before a choice is made
pub const FORM_TYPE_PLACEHOLDER: &str = "Select";

static NAME_REGEX: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"^[A-Za-z_]+$").expect("static pattern compiles"));

/// A runtime-defined field: submission shape of the composite form
///
/// Wire names follow the form contract: `formType`, `formOptions`.
///
/// # Examples
///
/// ```
/// use dynamic_forms::DynamicField;
///
/// let field = DynamicField::new("color", "choice");
/// let json = serde_json::to_value(&field).unwrap();
/// assert_eq!(json["formType"], "choice");
/// assert_eq!(json["weight"], 0);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DynamicField {
	pub name: String,
	pub form_type: String,
	#[serde(default)]
	pub labels: BTreeMap<String, String>,
	#[serde(default)]
	pub form_options: serde_json::Map<String, serde_json::Value>,
	#[serde(default)]
	pub weight: i64,
	#[serde(default)]
	pub active: bool,
}

impl DynamicField {
	pub fn new(name: impl Into<String>, form_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			form_type: form_type.into(),
			labels: BTreeMap::new(),
			form_options: serde_json::Map::new(),
			weight: 0,
			active: false,
		}
	}

	/// Flatten into form data keyed by the wire field names
	pub fn to_form_data(&self) -> HashMap<String, serde_json::Value> {
		let mut data = HashMap::new();
		data.insert("name".to_string(), serde_json::json!(self.name));
		data.insert("formType".to_string(), serde_json::json!(self.form_type));
		for (code, text) in &self.labels {
			data.insert(label_field_name(code), serde_json::json!(text));
		}
		for (key, value) in &self.form_options {
			data.insert(crate::options::option_field_name(key), value.clone());
		}
		data.insert("weight".to_string(), serde_json::json!(self.weight));
		data.insert("active".to_string(), serde_json::json!(self.active));
		data
	}
}

/// Tracks which field type's options schema is installed in a form
///
/// Two states: uninitialized (`bound_type()` is `None`) and bound to a
/// type. Rebinding to the currently bound type is a no-op; rebinding to
/// a different type removes the installed `formOptions[*]` fields and
/// their initial values before installing the new schema. An identifier
/// with no registered schema binds with an empty options area.
pub struct OptionsSchemaBinding {
	registry: Arc<OptionsFormRegistry>,
	bound_type: Option<String>,
}

impl OptionsSchemaBinding {
	pub fn new(registry: Arc<OptionsFormRegistry>) -> Self {
		Self {
			registry,
			bound_type: None,
		}
	}

	/// The currently bound field type, if any
	pub fn bound_type(&self) -> Option<&str> {
		self.bound_type.as_deref()
	}

	/// Install the options schema for `type_id`, replacing the previous
	/// one. Returns false when `type_id` equals the bound type and
	/// nothing changed.
	pub fn rebind(&mut self, form: &mut Form, type_id: Option<&str>) -> bool {
		if self.bound_type.as_deref() == type_id {
			return false;
		}

		tracing::debug!(
			from = self.bound_type.as_deref().unwrap_or("<none>"),
			to = type_id.unwrap_or("<none>"),
			"rebinding options schema"
		);

		let stale: Vec<String> = form
			.fields()
			.iter()
			.map(|f| f.name().to_string())
			.filter(|n| n.starts_with(OPTIONS_FIELD_PREFIX))
			.collect();
		for name in stale {
			form.remove_field(&name);
		}

		// Previously entered option values do not survive a type change
		let mut initial = form.initial().clone();
		initial.retain(|k, _| !k.starts_with(OPTIONS_FIELD_PREFIX));
		form.set_initial(initial);

		match type_id {
			Some(t) => {
				match self.registry.resolve(t) {
					Some(schema) => schema.build(form),
					None => {
						tracing::debug!(form_type = t, "no options schema registered");
					}
				}
				self.bound_type = Some(t.to_string());
			}
			None => {
				self.bound_type = None;
			}
		}
		true
	}
}

/// The composite form for defining a dynamic field
///
/// # Examples
///
/// ```
/// use dynamic_forms::{DynamicFieldForm, FormTypeChoiceEvent, LocaleProvider, OptionsFormRegistry};
/// use dynamic_forms::signals::{Signal, SignalName};
/// use std::sync::Arc;
///
/// let choices: Signal<FormTypeChoiceEvent> = Signal::new(SignalName::custom("doc_choices"));
/// choices.connect(|event| event.add_choice("Text", "text"));
///
/// let locales = Signal::new(SignalName::custom("doc_field_locales"));
/// let form = DynamicFieldForm::new(
/// 	&choices,
/// 	LocaleProvider::new(locales),
/// 	Arc::new(OptionsFormRegistry::with_builtin_types()),
/// );
/// assert!(form.form().get_field("formType").is_some());
/// ```
pub struct DynamicFieldForm {
	form: Form,
	binding: OptionsSchemaBinding,
}

impl DynamicFieldForm {
	/// Build the form for creating a new dynamic field
	pub fn new(
		choice_signal: &Signal<FormTypeChoiceEvent>,
		locale_provider: LocaleProvider,
		registry: Arc<OptionsFormRegistry>,
	) -> Self {
		Self::build(choice_signal, locale_provider, registry, None)
	}

	/// Build the form for editing an existing dynamic field; the
	/// stored type's options schema is installed up front.
	pub fn with_initial(
		choice_signal: &Signal<FormTypeChoiceEvent>,
		locale_provider: LocaleProvider,
		registry: Arc<OptionsFormRegistry>,
		initial: &DynamicField,
	) -> Self {
		Self::build(choice_signal, locale_provider, registry, Some(initial))
	}

	fn build(
		choice_signal: &Signal<FormTypeChoiceEvent>,
		locale_provider: LocaleProvider,
		registry: Arc<OptionsFormRegistry>,
		initial: Option<&DynamicField>,
	) -> Self {
		// Collect the selectable types: every receiver appends its
		// entries before the selector is built.
		let event = Arc::new(FormTypeChoiceEvent::new());
		choice_signal.send(Arc::clone(&event));
		let choices = event.choices();

		let mut form = Form::new();
		form.add_field(Box::new(
			RegexField::from_regex("name".to_string(), NAME_REGEX.clone())
				.required()
				.with_label("Field name")
				.with_help_text(
					"The name can only contain letters and underscores. \
					 For property access and internal use.",
				)
				.with_message("The name can only contain letters and underscores."),
		));
		form.add_field(Box::new(
			ChoiceField::new("formType".to_string())
				.with_choices(choices)
				.with_placeholder(FORM_TYPE_PLACEHOLDER)
				.required()
				.with_label("Field type"),
		));
		TranslationCollection::new(locale_provider).build(&mut form);
		form.add_field(Box::new(
			IntegerField::new("weight".to_string()).with_empty_value(0),
		));
		form.add_field(Box::new(BooleanField::new("active".to_string())));

		let mut binding = OptionsSchemaBinding::new(registry);
		if let Some(field) = initial {
			let stored_type = (!field.form_type.is_empty()).then_some(field.form_type.as_str());
			binding.rebind(&mut form, stored_type);
			form.set_initial(field.to_form_data());
		}

		Self { form, binding }
	}

	/// Bind submitted data, swapping the options schema first if the
	/// submitted type differs from the bound one
	pub fn bind(&mut self, data: HashMap<String, serde_json::Value>) {
		let submitted = data
			.get("formType")
			.and_then(|v| v.as_str())
			.filter(|s| !s.is_empty())
			.map(str::to_string);

		if submitted.as_deref() != self.binding.bound_type() {
			self.binding.rebind(&mut self.form, submitted.as_deref());
		}

		self.form.bind(data);
	}

	/// Validate the bound data
	pub fn is_valid(&mut self) -> bool {
		self.form.is_valid()
	}

	pub fn errors(&self) -> &HashMap<String, Vec<String>> {
		self.form.errors()
	}

	/// The underlying form (for rendering and field inspection)
	pub fn form(&self) -> &Form {
		&self.form
	}

	/// Rendering views of every field, in form order
	///
	/// An edit form shows the stored definition's values until the first
	/// submission; after a failed validation each view carries its
	/// field's errors.
	pub fn bound_fields(&self) -> Vec<BoundField<'_>> {
		self.form.bound_fields()
	}

	/// Whether the submission differs from the stored definition
	pub fn has_changed(&self) -> bool {
		self.form.has_changed()
	}

	/// The currently bound field type, if any
	pub fn bound_type(&self) -> Option<&str> {
		self.binding.bound_type()
	}

	/// Assemble the validated submission into a [`DynamicField`].
	///
	/// Only labels and options belonging to fields of the current form
	/// are collected; stray data from a previous schema is dropped.
	/// Call after a successful [`is_valid`](Self::is_valid).
	pub fn cleaned_field(&self) -> FormResult<DynamicField> {
		let data = self.form.cleaned_data();

		let name = required_string(data, "name")?;
		let form_type = required_string(data, "formType")?;

		let mut labels = BTreeMap::new();
		let mut form_options = serde_json::Map::new();
		for field in self.form.fields() {
			let field_name = field.name();
			if let Some(code) = bracket_key(field_name, LABELS_FIELD_PREFIX) {
				if let Some(text) = data.get(field_name).and_then(|v| v.as_str())
					&& !text.is_empty()
				{
					labels.insert(code.to_string(), text.to_string());
				}
			} else if let Some(key) = bracket_key(field_name, OPTIONS_FIELD_PREFIX)
				&& let Some(value) = data.get(field_name)
				&& !value.is_null()
			{
				form_options.insert(key.to_string(), value.clone());
			}
		}

		Ok(DynamicField {
			name,
			form_type,
			labels,
			form_options,
			weight: data.get("weight").and_then(|v| v.as_i64()).unwrap_or(0),
			active: data.get("active").and_then(|v| v.as_bool()).unwrap_or(false),
		})
	}
}

fn required_string(
	data: &HashMap<String, serde_json::Value>,
	key: &str,
) -> FormResult<String> {
	data.get(key)
		.and_then(|v| v.as_str())
		.filter(|s| !s.is_empty())
		.map(str::to_string)
		.ok_or_else(|| FormError::Field {
			field: key.to_string(),
			error: FieldError::Required(key.to_string()),
		})
}

/// Extract `key` from a wire name like `prefix…[key]`
fn bracket_key<'a>(field_name: &'a str, prefix: &str) -> Option<&'a str> {
	field_name.strip_prefix(prefix)?.strip_suffix(']')
}
