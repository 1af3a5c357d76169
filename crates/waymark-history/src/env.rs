//! Browser environment boundary.
//!
//! [`BrowserEnv`] is the only place where the history adapters touch
//! `window.location` / `window.history`. The WASM build uses
//! [`WebEnv`](crate::WebEnv); native builds and tests use
//! [`MemoryEnv`](crate::MemoryEnv).

use std::rc::Rc;

use crate::error::HistoryError;

/// Native browser events the adapters subscribe to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NativeEvent {
	/// `popstate`: back/forward traversal. Never fired by `pushState`/`replaceState`.
	PopState,
	/// `hashchange`: the fragment changed.
	HashChange,
}

impl NativeEvent {
	/// Returns the DOM event type name.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::PopState => "popstate",
			Self::HashChange => "hashchange",
		}
	}
}

/// Handle of a native event listener registered with a [`BrowserEnv`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeListenerId(pub(crate) u64);

/// Callback invoked when a native event fires.
pub type NativeHandler = Rc<dyn Fn()>;

/// Abstraction over `window.location`, `window.history` and window events.
///
/// Hash values are passed and returned without the leading `#`.
pub trait BrowserEnv {
	/// Returns `location.hash` without its leading `#`.
	fn hash(&self) -> Result<String, HistoryError>;

	/// Assigns `location.hash`, creating a new history entry.
	fn set_hash(&self, hash: &str) -> Result<(), HistoryError>;

	/// Replaces the current entry with one carrying the given hash, through
	/// `history.replaceState`. No event fires.
	fn replace_hash(&self, hash: &str) -> Result<(), HistoryError>;

	/// Returns `location.pathname`.
	fn pathname(&self) -> Result<String, HistoryError>;

	/// Returns `location.search`, including its leading `?` when non-empty.
	fn search(&self) -> Result<String, HistoryError>;

	/// Calls `history.pushState(null, "", url)`.
	fn push_state(&self, url: &str) -> Result<(), HistoryError>;

	/// Calls `history.replaceState(null, "", url)`.
	fn replace_state(&self, url: &str) -> Result<(), HistoryError>;

	/// Calls `history.go(delta)`.
	fn go(&self, delta: i32) -> Result<(), HistoryError>;

	/// Registers a window event listener.
	fn add_listener(
		&self,
		event: NativeEvent,
		handler: NativeHandler,
	) -> Result<NativeListenerId, HistoryError>;

	/// Removes a listener previously returned by [`BrowserEnv::add_listener`].
	fn remove_listener(&self, id: NativeListenerId);
}
