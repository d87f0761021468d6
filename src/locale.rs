//! Supported-locale lookup via the locale collection signal

use crate::events::{LocaleChoiceEvent, locale_choices};
use crate::signals::Signal;
use std::sync::Arc;

/// Provides the supported locales by broadcasting a collection event
///
/// The locales themselves come from whatever receivers the host
/// application has connected to the signal; with no receivers the
/// provider returns an empty list.
///
/// # Examples
///
/// ```
/// use dynamic_forms::locale::LocaleProvider;
/// use dynamic_forms::signals::{Signal, SignalName};
///
/// let signal = Signal::new(SignalName::custom("doc_locales"));
/// signal.connect(|event: std::sync::Arc<dynamic_forms::events::LocaleChoiceEvent>| {
/// 	event.add_locale("English", "en");
/// });
///
/// let provider = LocaleProvider::new(signal);
/// assert_eq!(
/// 	provider.supported_locale_names(),
/// 	vec![("English".to_string(), "en".to_string())]
/// );
/// ```
pub struct LocaleProvider {
	signal: Signal<LocaleChoiceEvent>,
}

impl LocaleProvider {
	/// Create a provider backed by the given signal
	pub fn new(signal: Signal<LocaleChoiceEvent>) -> Self {
		Self { signal }
	}

	/// The supported `(display_name, locale_code)` pairs
	pub fn supported_locale_names(&self) -> Vec<(String, String)> {
		let event = Arc::new(LocaleChoiceEvent::new());
		self.signal.send(Arc::clone(&event));
		event.locales()
	}
}

impl Default for LocaleProvider {
	/// Provider backed by the application-wide locale signal
	fn default() -> Self {
		Self::new(locale_choices())
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::signals::SignalName;

	#[test]
	fn test_provider_collects_from_receivers() {
		let signal: Signal<LocaleChoiceEvent> = Signal::new(SignalName::custom("test_locales"));
		signal.connect(|event| {
			event.add_locale("English", "en");
			event.add_locale("German", "de");
		});

		let provider = LocaleProvider::new(signal);
		assert_eq!(
			provider.supported_locale_names(),
			vec![
				("English".to_string(), "en".to_string()),
				("German".to_string(), "de".to_string()),
			]
		);
	}

	#[test]
	fn test_provider_without_receivers_is_empty() {
		let signal: Signal<LocaleChoiceEvent> =
			Signal::new(SignalName::custom("test_locales_empty"));

		let provider = LocaleProvider::new(signal);
		assert!(provider.supported_locale_names().is_empty());
	}
}
