//! Runtime-definable form fields
//!
//! This crate lets an application define "dynamic fields" at runtime: a
//! field whose type (text, choice, checkbox, …), per-type options and
//! per-locale labels are configured through a form rather than in code.
//!
//! The moving pieces:
//! - A synchronous signal layer ([`signals`]) over which extensible
//!   sets are collected: other components contribute the selectable
//!   field types ([`events::FormTypeChoiceEvent`]) and the supported
//!   locales ([`events::LocaleChoiceEvent`]).
//! - The composite definition form ([`dynamic_field::DynamicFieldForm`])
//!   with its type → options-schema dispatch
//!   ([`dynamic_field::OptionsSchemaBinding`] resolving through
//!   [`options::OptionsFormRegistry`]).
//! - The inline builder ([`inline::InlineFormDefinition`]) that turns
//!   stored definitions back into a concrete form.
//!
//! A small Django-style form layer ([`form`], [`field`], [`fields`])
//! carries the fields, binding and validation these pieces run on.
//!
//! # Examples
//!
//! ```
//! use dynamic_forms::signals::{Signal, SignalName};
//! use dynamic_forms::{
//! 	DynamicFieldForm, FormTypeChoiceEvent, LocaleProvider, OptionsFormRegistry,
//! 	connect_builtin_type_choices,
//! };
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! let choices: Signal<FormTypeChoiceEvent> = Signal::new(SignalName::custom("readme_choices"));
//! connect_builtin_type_choices(&choices);
//!
//! let locales = Signal::new(SignalName::custom("readme_locales"));
//! let mut form = DynamicFieldForm::new(
//! 	&choices,
//! 	LocaleProvider::new(locales),
//! 	Arc::new(OptionsFormRegistry::with_builtin_types()),
//! );
//!
//! let mut data = HashMap::new();
//! data.insert("name".to_string(), serde_json::json!("color"));
//! data.insert("formType".to_string(), serde_json::json!("choice"));
//! data.insert(
//! 	"formOptions[choices]".to_string(),
//! 	serde_json::json!("red, green, key1:Blue"),
//! );
//! form.bind(data);
//!
//! assert!(form.is_valid());
//! let field = form.cleaned_field().unwrap();
//! assert_eq!(field.form_type, "choice");
//! ```

pub mod bound_field;
pub mod dynamic_field;
pub mod events;
pub mod field;
pub mod fields;
pub mod form;
pub mod inline;
pub mod locale;
pub mod options;
pub mod signals;
pub mod translation;

pub use bound_field::BoundField;
pub use dynamic_field::{
	DynamicField, DynamicFieldForm, FORM_TYPE_PLACEHOLDER, OptionsSchemaBinding,
};
pub use events::{FormTypeChoiceEvent, LocaleChoiceEvent, form_type_choices, locale_choices};
pub use field::{FieldError, FieldResult, FormField, Widget};
pub use fields::{BooleanField, CharField, ChoiceField, IntegerField, RegexField};
pub use form::{Form, FormError, FormResult};
pub use inline::{
	FieldTypeRegistry, InlineFormDefinition, connect_builtin_type_choices, parse_choice_list,
};
pub use locale::LocaleProvider;
pub use options::{
	ChoiceOptionsForm, CommonOptionsForm, OptionsForm, OptionsFormRegistry, option_field_name,
};
pub use signals::{Signal, SignalName, get_signal};
pub use translation::{TranslationCollection, label_field_name};
