//! Translated-label sub-form: one text input per supported locale

use crate::fields::CharField;
use crate::form::Form;
use crate::locale::LocaleProvider;

/// Wire name of the label input for `code`, e.g. `labels[en]`
pub fn label_field_name(code: &str) -> String {
	format!("labels[{}]", code)
}

/// Prefix shared by all label field wire names
pub const LABELS_FIELD_PREFIX: &str = "labels[";

/// Builds the translated-label fields into a form
///
/// For each supported locale one optional free-text field is added,
/// named `labels[<code>]` and labeled with the locale's display name.
/// Field order follows the provider.
///
/// # Examples
///
/// ```
/// use dynamic_forms::{Form, TranslationCollection};
/// use dynamic_forms::locale::LocaleProvider;
/// use dynamic_forms::events::LocaleChoiceEvent;
/// use dynamic_forms::signals::{Signal, SignalName};
///
/// let signal = Signal::new(SignalName::custom("doc_translation"));
/// signal.connect(|event: std::sync::Arc<LocaleChoiceEvent>| {
/// 	event.add_locale("English", "en");
/// });
///
/// let mut form = Form::new();
/// TranslationCollection::new(LocaleProvider::new(signal)).build(&mut form);
/// assert!(form.get_field("labels[en]").is_some());
/// ```
pub struct TranslationCollection {
	provider: LocaleProvider,
}

impl TranslationCollection {
	pub fn new(provider: LocaleProvider) -> Self {
		Self { provider }
	}

	/// Add one optional label field per supported locale
	pub fn build(&self, form: &mut Form) {
		for (display_name, code) in self.provider.supported_locale_names() {
			form.add_field(Box::new(
				CharField::new(label_field_name(&code)).with_label(display_name),
			));
		}
	}
}
