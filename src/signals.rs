//! Synchronous in-process signal dispatch
//!
//! Signals carry an event value to every connected receiver on the calling
//! thread; all receivers run to completion before `send` returns. Events
//! that collect contributions (choice lists, locale lists) expose interior
//! mutability so receivers can append to them.

use parking_lot::RwLock;
use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Internal storage for signal names, supporting both static and owned strings.
#[derive(Debug, Clone)]
enum SignalNameInner {
	/// Compile-time constant string (zero allocation)
	Static(&'static str),
	/// Dynamically created name (reference-counted)
	Owned(Arc<str>),
}

/// Type-safe signal name wrapper
///
/// # Examples
///
/// ```
/// use dynamic_forms::signals::SignalName;
///
/// let name = SignalName::FORM_TYPE_CHOICES;
/// assert_eq!(name.as_str(), "form_type_choices");
///
/// let custom = SignalName::custom("my_signal");
/// assert_eq!(custom.as_str(), "my_signal");
/// ```
#[derive(Debug, Clone)]
pub struct SignalName(SignalNameInner);

impl SignalName {
	/// Signal collecting the selectable field-type choices
	pub const FORM_TYPE_CHOICES: Self = Self(SignalNameInner::Static("form_type_choices"));
	/// Signal collecting the supported locales
	pub const LOCALE_CHOICES: Self = Self(SignalNameInner::Static("locale_choices"));

	/// Create a custom signal name from a static string
	pub const fn custom(name: &'static str) -> Self {
		Self(SignalNameInner::Static(name))
	}

	/// Create a signal name from an owned string
	pub fn from_string(name: impl Into<String>) -> Self {
		Self(SignalNameInner::Owned(Arc::from(name.into())))
	}

	/// Get the name as a string slice
	pub fn as_str(&self) -> &str {
		match &self.0 {
			SignalNameInner::Static(s) => s,
			SignalNameInner::Owned(s) => s,
		}
	}
}

impl fmt::Display for SignalName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

type ReceiverFn<T> = Arc<dyn Fn(Arc<T>) + Send + Sync>;

struct ReceiverInfo<T: Send + Sync + 'static> {
	receiver: ReceiverFn<T>,
	dispatch_uid: Option<String>,
}

impl<T: Send + Sync + 'static> Clone for ReceiverInfo<T> {
	fn clone(&self) -> Self {
		Self {
			receiver: Arc::clone(&self.receiver),
			dispatch_uid: self.dispatch_uid.clone(),
		}
	}
}

/// A signal that synchronously dispatches events to connected receivers
pub struct Signal<T: Send + Sync + 'static> {
	receivers: Arc<RwLock<Vec<ReceiverInfo<T>>>>,
	name: String,
}

impl<T: Send + Sync + 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			receivers: Arc::clone(&self.receivers),
			name: self.name.clone(),
		}
	}
}

impl<T: Send + Sync + 'static> Signal<T> {
	/// Create a new signal with a type-safe name
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::signals::{Signal, SignalName};
	///
	/// let signal = Signal::<String>::new(SignalName::custom("my_signal"));
	/// assert_eq!(signal.name(), "my_signal");
	/// assert_eq!(signal.receiver_count(), 0);
	/// ```
	pub fn new(name: SignalName) -> Self {
		Self {
			receivers: Arc::new(RwLock::new(Vec::new())),
			name: name.as_str().to_string(),
		}
	}

	/// Get the signal name
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Connect a receiver function to this signal
	pub fn connect<F>(&self, receiver: F)
	where
		F: Fn(Arc<T>) + Send + Sync + 'static,
	{
		self.receivers.write().push(ReceiverInfo {
			receiver: Arc::new(receiver),
			dispatch_uid: None,
		});
	}

	/// Connect a receiver with a dispatch uid; a receiver already
	/// connected under the same uid is replaced, so repeated wiring
	/// stays idempotent.
	///
	/// # Examples
	///
	/// ```
	/// use dynamic_forms::signals::{Signal, SignalName};
	///
	/// let signal = Signal::<String>::new(SignalName::custom("example"));
	/// signal.connect_with_uid(|_| {}, "listener_a");
	/// signal.connect_with_uid(|_| {}, "listener_a");
	/// assert_eq!(signal.receiver_count(), 1);
	/// ```
	pub fn connect_with_uid<F>(&self, receiver: F, dispatch_uid: impl Into<String>)
	where
		F: Fn(Arc<T>) + Send + Sync + 'static,
	{
		let uid = dispatch_uid.into();
		let mut receivers = self.receivers.write();
		receivers.retain(|r| r.dispatch_uid.as_deref() != Some(uid.as_str()));
		receivers.push(ReceiverInfo {
			receiver: Arc::new(receiver),
			dispatch_uid: Some(uid),
		});
	}

	/// Disconnect the receiver registered under `dispatch_uid`
	pub fn disconnect(&self, dispatch_uid: &str) -> bool {
		let mut receivers = self.receivers.write();
		let before = receivers.len();
		receivers.retain(|r| r.dispatch_uid.as_deref() != Some(dispatch_uid));
		receivers.len() != before
	}

	/// Send an event to all connected receivers, in connection order.
	///
	/// Every receiver runs to completion on the calling thread before
	/// this returns.
	pub fn send(&self, event: Arc<T>) {
		let receivers: Vec<ReceiverInfo<T>> = self.receivers.read().clone();
		for info in receivers {
			(info.receiver)(Arc::clone(&event));
		}
	}

	/// Number of currently connected receivers
	pub fn receiver_count(&self) -> usize {
		self.receivers.read().len()
	}
}

/// Global signal registry, keyed by event type and signal name
struct SignalRegistry {
	signals: RwLock<HashMap<(TypeId, String), Box<dyn Any + Send + Sync>>>,
}

impl SignalRegistry {
	fn new() -> Self {
		Self {
			signals: RwLock::new(HashMap::new()),
		}
	}

	fn get_or_create<T: Send + Sync + 'static>(&self, name: SignalName) -> Signal<T> {
		let type_id = TypeId::of::<T>();
		let key = (type_id, name.as_str().to_string());

		{
			let signals = self.signals.read();
			if let Some(signal_any) = signals.get(&key)
				&& let Some(signal) = signal_any.downcast_ref::<Signal<T>>()
			{
				return signal.clone();
			}
		}

		let signal = Signal::new(name);
		self.signals.write().insert(key, Box::new(signal.clone()));
		signal
	}
}

static GLOBAL_REGISTRY: once_cell::sync::Lazy<SignalRegistry> =
	once_cell::sync::Lazy::new(SignalRegistry::new);

/// Get a signal from the global registry
///
/// Repeated calls with the same event type and name return handles to
/// the same underlying signal.
pub fn get_signal<T: Send + Sync + 'static>(name: SignalName) -> Signal<T> {
	GLOBAL_REGISTRY.get_or_create(name)
}
