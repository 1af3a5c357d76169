//! History API adapter (`/app/users/42`).

use std::rc::Rc;

use crate::env::{BrowserEnv, NativeEvent};
use crate::error::HistoryError;
use crate::listeners::{HistoryListener, ListenerGuard, ListenerRegistry};
use crate::{History, HistoryMode};

/// Normalizes a deployment base: leading `/`, no trailing `/`, `""` for root.
pub fn normalize_base(base: &str) -> String {
	let trimmed = base.trim_end_matches('/');
	if trimmed.is_empty() {
		String::new()
	} else if trimmed.starts_with('/') {
		trimmed.to_string()
	} else {
		format!("/{}", trimmed)
	}
}

/// History adapter built on `pushState`/`replaceState` and `popstate`.
///
/// `popstate` never fires for programmatic navigation, so `push` and
/// `replace` notify listeners themselves, exactly once each.
pub struct BrowserHistory<E: BrowserEnv + 'static> {
	env: Rc<E>,
	base: String,
	listeners: Rc<ListenerRegistry>,
}

impl<E: BrowserEnv + 'static> std::fmt::Debug for BrowserHistory<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BrowserHistory")
			.field("base", &self.base)
			.field("listeners", &self.listeners)
			.finish()
	}
}

impl<E: BrowserEnv + 'static> BrowserHistory<E> {
	/// Creates the adapter for an application served under `base`.
	pub fn new(env: Rc<E>, base: &str) -> Self {
		Self {
			env,
			base: normalize_base(base),
			listeners: ListenerRegistry::new(),
		}
	}

	/// Returns the normalized base.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// Returns the environment this adapter drives.
	pub fn env(&self) -> &Rc<E> {
		&self.env
	}

	fn read_path(env: &E, base: &str) -> Result<String, HistoryError> {
		let pathname = env.pathname()?;
		let mut path = match pathname.strip_prefix(base) {
			Some(rest) if !base.is_empty() && (rest.is_empty() || rest.starts_with('/')) => {
				rest.to_string()
			}
			_ => pathname.clone(),
		};
		if !path.starts_with('/') {
			path.insert(0, '/');
		}
		path.push_str(&env.search()?);
		let hash = env.hash()?;
		if !hash.is_empty() {
			path.push('#');
			path.push_str(&hash);
		}
		Ok(path)
	}

	fn notify(&self) -> Result<(), HistoryError> {
		let path = Self::read_path(&self.env, &self.base)?;
		self.listeners.notify(&path);
		Ok(())
	}
}

impl<E: BrowserEnv + 'static> History for BrowserHistory<E> {
	fn mode(&self) -> HistoryMode {
		HistoryMode::History
	}

	fn current_path(&self) -> Result<String, HistoryError> {
		Self::read_path(&self.env, &self.base)
	}

	fn push(&self, path: &str) -> Result<(), HistoryError> {
		self.env.push_state(&self.create_href(path))?;
		self.notify()
	}

	fn replace(&self, path: &str) -> Result<(), HistoryError> {
		self.env.replace_state(&self.create_href(path))?;
		self.notify()
	}

	fn go(&self, delta: i32) -> Result<(), HistoryError> {
		self.env.go(delta)
	}

	fn listen(&self, listener: HistoryListener) -> Result<ListenerGuard, HistoryError> {
		let env = Rc::downgrade(&self.env);
		let registry = Rc::downgrade(&self.listeners);
		let base = self.base.clone();
		self.listeners.subscribe(listener, move || {
			let handler_env = env.clone();
			let id = env
				.upgrade()
				.ok_or(HistoryError::Unavailable("window"))?
				.add_listener(
					NativeEvent::PopState,
					Rc::new(move || {
						let (Some(env), Some(registry)) = (handler_env.upgrade(), registry.upgrade())
						else {
							return;
						};
						match Self::read_path(&env, &base) {
							Ok(path) => registry.notify(&path),
							Err(error) => tracing::warn!(%error, "failed to read location on popstate"),
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
		format!("{}{}", self.base, path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::MemoryEnv;
	use rstest::rstest;

	#[rstest]
	#[case("", "")]
	#[case("/", "")]
	#[case("app", "/app")]
	#[case("/app/", "/app")]
	fn test_normalize_base(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(normalize_base(input), expected);
	}

	#[rstest]
	#[case("/app/users/1?tab=posts#top", "/users/1?tab=posts#top")]
	#[case("/app", "/")]
	#[case("/application", "/application")]
	#[case("/other", "/other")]
	fn test_current_path_strips_base(#[case] url: &str, #[case] expected: &str) {
		let history = BrowserHistory::new(Rc::new(MemoryEnv::with_url(url)), "/app");
		assert_eq!(history.current_path().unwrap(), expected);
	}

	#[rstest]
	fn test_push_writes_base_prefixed_url() {
		let env = Rc::new(MemoryEnv::with_url("/app"));
		let history = BrowserHistory::new(env.clone(), "/app");

		history.push("/users/2").unwrap();

		assert_eq!(env.url(), "/app/users/2");
		assert_eq!(env.entry_count(), 2);
		assert_eq!(history.current_path().unwrap(), "/users/2");
	}

	#[rstest]
	fn test_create_href_uses_base() {
		let history = BrowserHistory::new(Rc::new(MemoryEnv::new()), "/app");
		assert_eq!(history.create_href("/about"), "/app/about");
	}
}
