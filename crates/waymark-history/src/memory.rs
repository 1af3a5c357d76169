//! In-memory browser environment.
//!
//! Models the parts of browser history semantics the adapters rely on:
//! a stack of entries with a cursor, `pushState`/`replaceState` that never
//! fire `popstate`, hash assignment that fires `hashchange` only when the
//! fragment actually changes, hash replacement through `replaceState` that
//! fires nothing, and `go` that fires `popstate`.
//!
//! Browsers dispatch these events from a later task, never synchronously
//! inside the call that caused them. `MemoryEnv` queues them instead and
//! delivers them on [`MemoryEnv::dispatch_pending`].

use std::cell::RefCell;
use std::collections::VecDeque;

use crate::env::{BrowserEnv, NativeEvent, NativeHandler, NativeListenerId};
use crate::error::HistoryError;

#[derive(Default)]
struct MemoryState {
	entries: Vec<String>,
	index: usize,
	queued: VecDeque<NativeEvent>,
	listeners: Vec<(NativeListenerId, NativeEvent, NativeHandler)>,
	next_listener: u64,
}

impl MemoryState {
	fn current(&self) -> &str {
		&self.entries[self.index]
	}

	fn push_entry(&mut self, url: String) {
		self.entries.truncate(self.index + 1);
		self.entries.push(url);
		self.index = self.entries.len() - 1;
	}

	fn replace_entry(&mut self, url: String) {
		self.entries[self.index] = url;
	}
}

fn hash_of(url: &str) -> &str {
	url.split_once('#').map(|(_, hash)| hash).unwrap_or("")
}

fn without_hash(url: &str) -> &str {
	url.split_once('#').map(|(rest, _)| rest).unwrap_or(url)
}

/// Browser environment backed by an in-memory entry stack.
pub struct MemoryEnv {
	state: RefCell<MemoryState>,
}

impl std::fmt::Debug for MemoryEnv {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("MemoryEnv")
			.field("entries", &state.entries)
			.field("index", &state.index)
			.field("queued", &state.queued)
			.field("listeners", &state.listeners.len())
			.finish()
	}
}

impl Default for MemoryEnv {
	fn default() -> Self {
		Self::new()
	}
}

impl MemoryEnv {
	/// Creates an environment positioned at `/`.
	pub fn new() -> Self {
		Self::with_url("/")
	}

	/// Creates an environment positioned at the given URL (`/path?search#hash`).
	pub fn with_url(url: &str) -> Self {
		Self {
			state: RefCell::new(MemoryState {
				entries: vec![url.to_string()],
				..MemoryState::default()
			}),
		}
	}

	/// Returns the URL of the current entry.
	pub fn url(&self) -> String {
		self.state.borrow().current().to_string()
	}

	/// Returns the number of history entries.
	pub fn entry_count(&self) -> usize {
		self.state.borrow().entries.len()
	}

	/// Returns the index of the current entry.
	pub fn index(&self) -> usize {
		self.state.borrow().index
	}

	/// Returns the number of registered native listeners for an event.
	pub fn listener_count(&self, event: NativeEvent) -> usize {
		self.state
			.borrow()
			.listeners
			.iter()
			.filter(|(_, kind, _)| *kind == event)
			.count()
	}

	/// Returns the number of queued, undelivered events.
	pub fn pending_events(&self) -> usize {
		self.state.borrow().queued.len()
	}

	/// Delivers every queued event to the listeners registered for it.
	///
	/// Returns the number of events delivered.
	pub fn dispatch_pending(&self) -> usize {
		let mut delivered = 0;
		loop {
			let Some(event) = self.state.borrow_mut().queued.pop_front() else {
				break;
			};
			let handlers: Vec<NativeHandler> = self
				.state
				.borrow()
				.listeners
				.iter()
				.filter(|(_, kind, _)| *kind == event)
				.map(|(_, _, handler)| handler.clone())
				.collect();
			for handler in handlers {
				handler();
			}
			delivered += 1;
		}
		delivered
	}

	/// Simulates the user editing the address bar to a different fragment.
	pub fn user_sets_hash(&self, hash: &str) {
		// Identical to a script assignment from the browser's point of view
		let _ = self.set_hash(hash);
	}

	fn queue(&self, event: NativeEvent) {
		self.state.borrow_mut().queued.push_back(event);
	}
}

impl BrowserEnv for MemoryEnv {
	fn hash(&self) -> Result<String, HistoryError> {
		Ok(hash_of(self.state.borrow().current()).to_string())
	}

	fn set_hash(&self, hash: &str) -> Result<(), HistoryError> {
		let changed = {
			let mut state = self.state.borrow_mut();
			if hash_of(state.current()) == hash {
				false
			} else {
				let url = format!("{}#{}", without_hash(state.current()), hash);
				state.push_entry(url);
				true
			}
		};
		if changed {
			self.queue(NativeEvent::HashChange);
		}
		Ok(())
	}

	fn replace_hash(&self, hash: &str) -> Result<(), HistoryError> {
		let mut state = self.state.borrow_mut();
		let url = format!("{}#{}", without_hash(state.current()), hash);
		state.replace_entry(url);
		Ok(())
	}

	fn pathname(&self) -> Result<String, HistoryError> {
		let state = self.state.borrow();
		let url = without_hash(state.current());
		Ok(url.split_once('?').map(|(path, _)| path).unwrap_or(url).to_string())
	}

	fn search(&self) -> Result<String, HistoryError> {
		let state = self.state.borrow();
		let url = without_hash(state.current());
		Ok(url
			.split_once('?')
			.map(|(_, search)| format!("?{}", search))
			.unwrap_or_default())
	}

	fn push_state(&self, url: &str) -> Result<(), HistoryError> {
		self.state.borrow_mut().push_entry(url.to_string());
		Ok(())
	}

	fn replace_state(&self, url: &str) -> Result<(), HistoryError> {
		self.state.borrow_mut().replace_entry(url.to_string());
		Ok(())
	}

	fn go(&self, delta: i32) -> Result<(), HistoryError> {
		let hash_changed = {
			let mut state = self.state.borrow_mut();
			let target = state.index as i64 + i64::from(delta);
			if delta == 0 || target < 0 || target >= state.entries.len() as i64 {
				return Ok(());
			}
			let before = hash_of(state.current()).to_string();
			state.index = target as usize;
			before != hash_of(state.current())
		};
		self.queue(NativeEvent::PopState);
		if hash_changed {
			self.queue(NativeEvent::HashChange);
		}
		Ok(())
	}

	fn add_listener(
		&self,
		event: NativeEvent,
		handler: NativeHandler,
	) -> Result<NativeListenerId, HistoryError> {
		let mut state = self.state.borrow_mut();
		let id = NativeListenerId(state.next_listener);
		state.next_listener += 1;
		state.listeners.push((id, event, handler));
		Ok(id)
	}

	fn remove_listener(&self, id: NativeListenerId) {
		self.state
			.borrow_mut()
			.listeners
			.retain(|(existing, _, _)| *existing != id);
	}
}
