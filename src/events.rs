//! Collector events carried by the form signals
//!
//! Both events are fan-out collectors: the sender constructs an empty
//! event, broadcasts it, and reads the entries receivers appended.

use crate::signals::{Signal, SignalName, get_signal};
use parking_lot::RwLock;

/// Event collecting the selectable field types for the type selector
///
/// Receivers append `(label, identifier)` pairs. Entries keep insertion
/// order; a later entry with an already-present label replaces the
/// earlier identifier.
///
/// # Examples
///
/// ```
/// use dynamic_forms::events::FormTypeChoiceEvent;
///
/// let event = FormTypeChoiceEvent::new();
/// event.add_choice("Text", "text");
/// event.add_choice("Choice", "choice");
/// assert_eq!(event.choices().len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct FormTypeChoiceEvent {
	choices: RwLock<Vec<(String, String)>>,
}

impl FormTypeChoiceEvent {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a `(label, identifier)` choice
	pub fn add_choice(&self, label: impl Into<String>, type_id: impl Into<String>) {
		let label = label.into();
		let type_id = type_id.into();
		let mut choices = self.choices.write();
		if let Some(entry) = choices.iter_mut().find(|(l, _)| *l == label) {
			entry.1 = type_id;
		} else {
			choices.push((label, type_id));
		}
	}

	/// Snapshot of the collected choices, in insertion order
	pub fn choices(&self) -> Vec<(String, String)> {
		self.choices.read().clone()
	}

	pub fn is_empty(&self) -> bool {
		self.choices.read().is_empty()
	}
}

/// Event collecting the supported locales
///
/// Receivers append `(display_name, locale_code)` pairs, e.g.
/// `("English", "en")`.
#[derive(Debug, Default)]
pub struct LocaleChoiceEvent {
	locales: RwLock<Vec<(String, String)>>,
}

impl LocaleChoiceEvent {
	pub fn new() -> Self {
		Self::default()
	}

	/// Append a `(display_name, locale_code)` pair
	pub fn add_locale(&self, display_name: impl Into<String>, code: impl Into<String>) {
		let display_name = display_name.into();
		let code = code.into();
		let mut locales = self.locales.write();
		if let Some(entry) = locales.iter_mut().find(|(n, _)| *n == display_name) {
			entry.1 = code;
		} else {
			locales.push((display_name, code));
		}
	}

	/// Snapshot of the collected locales, in insertion order
	pub fn locales(&self) -> Vec<(String, String)> {
		self.locales.read().clone()
	}

	pub fn is_empty(&self) -> bool {
		self.locales.read().is_empty()
	}
}

/// The application-wide field-type choice signal
pub fn form_type_choices() -> Signal<FormTypeChoiceEvent> {
	get_signal(SignalName::FORM_TYPE_CHOICES)
}

/// The application-wide locale collection signal
pub fn locale_choices() -> Signal<LocaleChoiceEvent> {
	get_signal(SignalName::LOCALE_CHOICES)
}
