//! Browser history adapters for the waymark client-side router.
//!
//! Two interchangeable [`History`] strategies:
//!
//! - [`HashHistory`]: route path lives in `location.hash` (`/#/users/42`)
//! - [`BrowserHistory`]: route path lives in `location.pathname` and is
//!   changed through the History API (`/users/42`)
//!
//! Both talk to the browser exclusively through [`BrowserEnv`]. On
//! `wasm32` use [`WebEnv`]; elsewhere [`MemoryEnv`] provides the same
//! semantics in memory, with native events queued until
//! [`MemoryEnv::dispatch_pending`] is called.
//!
//! ## Example
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use waymark_history::{HashHistory, History, MemoryEnv};
//!
//! let env = Rc::new(MemoryEnv::new());
//! let history = HashHistory::new(env.clone()).unwrap();
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let log = seen.clone();
//! let _guard = history
//!     .listen(Rc::new(move |path: &str| log.borrow_mut().push(path.to_string())))
//!     .unwrap();
//!
//! history.push("/about").unwrap();
//! assert_eq!(*seen.borrow(), vec!["/about"]);
//! ```

#![warn(missing_docs)]

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

pub mod browser;
pub mod env;
pub mod error;
pub mod hash;
pub mod listeners;
pub mod memory;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use browser::{BrowserHistory, normalize_base};
pub use env::{BrowserEnv, NativeEvent, NativeHandler, NativeListenerId};
pub use error::HistoryError;
pub use hash::HashHistory;
pub use listeners::{HistoryListener, ListenerGuard, ListenerRegistry};
pub use memory::MemoryEnv;
#[cfg(target_arch = "wasm32")]
pub use web::WebEnv;

/// Where the router keeps its path in the URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HistoryMode {
	/// `location.hash`.
	#[default]
	Hash,
	/// `location.pathname` via the History API.
	History,
}

impl fmt::Display for HistoryMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Hash => write!(f, "hash"),
			Self::History => write!(f, "history"),
		}
	}
}

/// Common interface of the history strategies.
pub trait History {
	/// Returns the strategy of this adapter.
	fn mode(&self) -> HistoryMode;

	/// Returns the current route path, including query and hash.
	fn current_path(&self) -> Result<String, HistoryError>;

	/// Adds a history entry for `path` and notifies listeners.
	fn push(&self, path: &str) -> Result<(), HistoryError>;

	/// Replaces the current history entry with `path` and notifies listeners.
	fn replace(&self, path: &str) -> Result<(), HistoryError>;

	/// Moves through the session history. Listeners are notified when the
	/// browser reports the traversal.
	fn go(&self, delta: i32) -> Result<(), HistoryError>;

	/// Equivalent to `go(-1)`.
	fn back(&self) -> Result<(), HistoryError> {
		self.go(-1)
	}

	/// Equivalent to `go(1)`.
	fn forward(&self) -> Result<(), HistoryError> {
		self.go(1)
	}

	/// Subscribes to path changes.
	fn listen(&self, listener: HistoryListener) -> Result<ListenerGuard, HistoryError>;

	/// Returns the `href` an anchor must carry to reach `path`.
	fn create_href(&self, path: &str) -> String;
}

/// Creates the history strategy for `mode` over `env`.
///
/// `base` only applies to [`HistoryMode::History`].
pub fn create_history<E: BrowserEnv + 'static>(
	mode: HistoryMode,
	base: &str,
	env: Rc<E>,
) -> Result<Rc<dyn History>, HistoryError> {
	tracing::debug!(%mode, base, "creating history adapter");
	Ok(match mode {
		HistoryMode::Hash => Rc::new(HashHistory::new(env)?),
		HistoryMode::History => Rc::new(BrowserHistory::new(env, base)),
	})
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case(HistoryMode::Hash, "#/a")]
	#[case(HistoryMode::History, "/base/a")]
	fn test_create_history_by_mode(#[case] mode: HistoryMode, #[case] href: &str) {
		let history = create_history(mode, "/base", Rc::new(MemoryEnv::new())).unwrap();

		assert_eq!(history.mode(), mode);
		assert_eq!(history.create_href("/a"), href);
	}

	#[rstest]
	fn test_mode_display() {
		assert_eq!(HistoryMode::Hash.to_string(), "hash");
		assert_eq!(HistoryMode::History.to_string(), "history");
	}
}
