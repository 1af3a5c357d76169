//! Hash-fragment history (`/#/users/42`).

use std::rc::{Rc, Weak};

use crate::env::{BrowserEnv, NativeEvent};
use crate::error::HistoryError;
use crate::listeners::{HistoryListener, ListenerGuard, ListenerRegistry};
use crate::{History, HistoryMode};

/// History adapter storing the route path in `location.hash`.
///
/// `push` and `replace` notify listeners synchronously after mutating the
/// hash. The browser may additionally deliver its own `hashchange` for the
/// same path later; listeners receive that as a second, identical
/// notification.
pub struct HashHistory<E: BrowserEnv + 'static> {
	env: Rc<E>,
	listeners: Rc<ListenerRegistry>,
}

impl<E: BrowserEnv + 'static> std::fmt::Debug for HashHistory<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("HashHistory")
			.field("listeners", &self.listeners)
			.finish()
	}
}

impl<E: BrowserEnv + 'static> HashHistory<E> {
	/// Creates the adapter, rewriting an empty or slash-less hash to `#/...`.
	pub fn new(env: Rc<E>) -> Result<Self, HistoryError> {
		let hash = env.hash()?;
		if !hash.starts_with('/') {
			env.replace_hash(&format!("/{}", hash))?;
		}
		Ok(Self {
			env,
			listeners: ListenerRegistry::new(),
		})
	}

	/// Returns the environment this adapter drives.
	pub fn env(&self) -> &Rc<E> {
		&self.env
	}

	fn read_path(env: &E) -> Result<String, HistoryError> {
		let hash = env.hash()?;
		Ok(if hash.is_empty() { "/".to_string() } else { hash })
	}

	fn notify(&self) -> Result<(), HistoryError> {
		let path = Self::read_path(&self.env)?;
		self.listeners.notify(&path);
		Ok(())
	}
}

impl<E: BrowserEnv + 'static> History for HashHistory<E> {
	fn mode(&self) -> HistoryMode {
		HistoryMode::Hash
	}

	fn current_path(&self) -> Result<String, HistoryError> {
		Self::read_path(&self.env)
	}

	fn push(&self, path: &str) -> Result<(), HistoryError> {
		self.env.set_hash(path)?;
		self.notify()
	}

	fn replace(&self, path: &str) -> Result<(), HistoryError> {
		self.env.replace_hash(path)?;
		self.notify()
	}

	fn go(&self, delta: i32) -> Result<(), HistoryError> {
		self.env.go(delta)
	}

	fn listen(&self, listener: HistoryListener) -> Result<ListenerGuard, HistoryError> {
		let env = Rc::downgrade(&self.env);
		let registry = Rc::downgrade(&self.listeners);
		self.listeners.subscribe(listener, move || {
			let handler_env: Weak<E> = env.clone();
			let id = env
				.upgrade()
				.ok_or(HistoryError::Unavailable("window"))?
				.add_listener(
					NativeEvent::HashChange,
					Rc::new(move || {
						let (Some(env), Some(registry)) = (handler_env.upgrade(), registry.upgrade())
						else {
							return;
						};
						match Self::read_path(&env) {
							Ok(path) => registry.notify(&path),
							Err(error) => tracing::warn!(%error, "failed to read hash on hashchange"),
						}
					}),
				)?;
			Ok(Box::new(move || {
				if let Some(env) = env.upgrade() {
					env.remove_listener(id);
				}
			}) as Box<dyn FnOnce()>)
		})
	}

	fn create_href(&self, path: &str) -> String {
		format!("#{}", path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MemoryEnv;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/#/")]
	#[case("/#about", "/#/about")]
	#[case("/#/users", "/#/users")]
	fn test_ensure_slash(#[case] initial: &str, #[case] expected: &str) {
		let env = Rc::new(MemoryEnv::with_url(initial));

		let history = HashHistory::new(env.clone()).unwrap();

		assert_eq!(env.url(), expected);
		assert_eq!(env.pending_events(), 0);
		assert!(history.current_path().unwrap().starts_with('/'));
	}

	#[rstest]
	fn test_create_href_prefixes_hash() {
		let history = HashHistory::new(Rc::new(MemoryEnv::new())).unwrap();
		assert_eq!(history.create_href("/users/1"), "#/users/1");
	}

	#[rstest]
	fn test_replace_does_not_add_entry() {
		let env = Rc::new(MemoryEnv::new());
		let history = HashHistory::new(env.clone()).unwrap();

		history.replace("/login").unwrap();

		assert_eq!(env.entry_count(), 1);
		assert_eq!(history.current_path().unwrap(), "/login");
	}

	#[rstest]
	fn test_native_listener_detached_with_last_guard() {
		let env = Rc::new(MemoryEnv::new());
		let history = HashHistory::new(env.clone()).unwrap();

		let guard = history.listen(Rc::new(|_| {})).unwrap();
		assert_eq!(env.listener_count(NativeEvent::HashChange), 1);

		guard.unlisten();
		assert_eq!(env.listener_count(NativeEvent::HashChange), 0);
	}
}
