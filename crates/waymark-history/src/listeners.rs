//! Reference-counted change listeners.
//!
//! An adapter owns one [`ListenerRegistry`]. The native browser listener
//! backing it is attached when the first subscriber registers and detached
//! when the last [`ListenerGuard`] is released.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use crate::error::HistoryError;

/// Callback receiving the adapter's current path after a change.
pub type HistoryListener = Rc<dyn Fn(&str)>;

type Detach = Box<dyn FnOnce()>;

#[derive(Default)]
struct RegistryState {
	entries: Vec<(u64, HistoryListener)>,
	next_id: u64,
	detach: Option<Detach>,
}

/// Ordered set of history listeners sharing one native event listener.
#[derive(Default)]
pub struct ListenerRegistry {
	state: RefCell<RegistryState>,
}

impl std::fmt::Debug for ListenerRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let state = self.state.borrow();
		f.debug_struct("ListenerRegistry")
			.field("listeners", &state.entries.len())
			.field("attached", &state.detach.is_some())
			.finish()
	}
}

impl ListenerRegistry {
	/// Creates an empty registry.
	pub fn new() -> Rc<Self> {
		Rc::new(Self::default())
	}

	/// Returns the number of registered listeners.
	pub fn len(&self) -> usize {
		self.state.borrow().entries.len()
	}

	/// Returns `true` if no listener is registered.
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Returns `true` while the native listener is attached.
	pub fn is_attached(&self) -> bool {
		self.state.borrow().detach.is_some()
	}

	/// Registers a listener.
	///
	/// `attach` runs only when this is the first subscriber; it installs the
	/// native listener and returns the closure that removes it again. If it
	/// fails, the listener is not registered.
	pub fn subscribe<A>(
		self: &Rc<Self>,
		listener: HistoryListener,
		attach: A,
	) -> Result<ListenerGuard, HistoryError>
	where
		A: FnOnce() -> Result<Box<dyn FnOnce()>, HistoryError>,
	{
		if !self.is_attached() {
			let detach = attach()?;
			tracing::trace!("native history listener attached");
			self.state.borrow_mut().detach = Some(detach);
		}

		let mut state = self.state.borrow_mut();
		let id = state.next_id;
		state.next_id += 1;
		state.entries.push((id, listener));

		Ok(ListenerGuard {
			registry: Rc::downgrade(self),
			id: Some(id),
		})
	}

	/// Invokes every listener with `path`, in registration order.
	///
	/// Listeners may unsubscribe themselves or others while being notified;
	/// a listener removed mid-notification is not called afterwards.
	pub fn notify(&self, path: &str) {
		let snapshot: Vec<(u64, HistoryListener)> = self.state.borrow().entries.clone();
		for (id, listener) in snapshot {
			if self.contains(id) {
				listener(path);
			}
		}
	}

	fn contains(&self, id: u64) -> bool {
		self.state
			.borrow()
			.entries
			.iter()
			.any(|(existing, _)| *existing == id)
	}

	fn release(&self, id: u64) {
		let detach = {
			let mut state = self.state.borrow_mut();
			state.entries.retain(|(existing, _)| *existing != id);
			if state.entries.is_empty() {
				state.detach.take()
			} else {
				None
			}
		};
		if let Some(detach) = detach {
			detach();
			tracing::trace!("native history listener detached");
		}
	}
}

/// Subscription handle returned by `History::listen`.
///
/// Dropping the guard unsubscribes the listener.
#[must_use = "dropping the guard immediately unsubscribes the listener"]
#[derive(Debug)]
pub struct ListenerGuard {
	registry: Weak<ListenerRegistry>,
	id: Option<u64>,
}

impl ListenerGuard {
	/// Unsubscribes the listener.
	pub fn unlisten(mut self) {
		self.release();
	}

	fn release(&mut self) {
		if let (Some(id), Some(registry)) = (self.id.take(), self.registry.upgrade()) {
			registry.release(id);
		}
	}
}

impl Drop for ListenerGuard {
	fn drop(&mut self) {
		self.release();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;
	use std::cell::Cell;

	fn counting_attach(
		attached: &Rc<Cell<u32>>,
		detached: &Rc<Cell<u32>>,
	) -> impl FnOnce() -> Result<Detach, HistoryError> {
		let attached = attached.clone();
		let detached = detached.clone();
		move || {
			attached.set(attached.get() + 1);
			Ok(Box::new(move || detached.set(detached.get() + 1)) as Detach)
		}
	}

	#[rstest]
	fn test_native_listener_is_reference_counted() {
		// Arrange
		let registry = ListenerRegistry::new();
		let attached = Rc::new(Cell::new(0));
		let detached = Rc::new(Cell::new(0));

		// Act
		let first = registry
			.subscribe(Rc::new(|_| {}), counting_attach(&attached, &detached))
			.unwrap();
		let second = registry
			.subscribe(Rc::new(|_| {}), counting_attach(&attached, &detached))
			.unwrap();

		// Assert
		assert_eq!(attached.get(), 1);
		first.unlisten();
		assert_eq!(detached.get(), 0);
		drop(second);
		assert_eq!(detached.get(), 1);
		assert!(!registry.is_attached());
	}

	#[rstest]
	fn test_reattaches_after_last_unsubscribe() {
		let registry = ListenerRegistry::new();
		let attached = Rc::new(Cell::new(0));
		let detached = Rc::new(Cell::new(0));

		registry
			.subscribe(Rc::new(|_| {}), counting_attach(&attached, &detached))
			.unwrap()
			.unlisten();
		let _guard = registry
			.subscribe(Rc::new(|_| {}), counting_attach(&attached, &detached))
			.unwrap();

		assert_eq!(attached.get(), 2);
		assert_eq!(detached.get(), 1);
	}

	#[rstest]
	fn test_failed_attach_registers_nothing() {
		let registry = ListenerRegistry::new();

		let result = registry.subscribe(Rc::new(|_| {}), || {
			Err(HistoryError::Unavailable("window"))
		});

		assert!(result.is_err());
		assert!(registry.is_empty());
	}

	#[rstest]
	fn test_listener_removed_during_notify_is_skipped() {
		// Arrange
		let registry = ListenerRegistry::new();
		let second_calls = Rc::new(Cell::new(0));
		let second_guard: Rc<RefCell<Option<ListenerGuard>>> = Rc::new(RefCell::new(None));

		let slot = second_guard.clone();
		let _first = registry
			.subscribe(
				Rc::new(move |_| {
					slot.borrow_mut().take();
				}),
				|| Ok(Box::new(|| {}) as Detach),
			)
			.unwrap();
		let counter = second_calls.clone();
		let guard = registry
			.subscribe(
				Rc::new(move |_| counter.set(counter.get() + 1)),
				|| Ok(Box::new(|| {}) as Detach),
			)
			.unwrap();
		*second_guard.borrow_mut() = Some(guard);

		// Act
		registry.notify("/a");

		// Assert
		assert_eq!(second_calls.get(), 0);
		assert_eq!(registry.len(), 1);
	}

	#[rstest]
	fn test_notify_preserves_registration_order() {
		let registry = ListenerRegistry::new();
		let log = Rc::new(RefCell::new(Vec::new()));
		let mut guards = Vec::new();
		for label in ["a", "b", "c"] {
			let log = log.clone();
			guards.push(
				registry
					.subscribe(
						Rc::new(move |path: &str| log.borrow_mut().push(format!("{label}{path}"))),
						|| Ok(Box::new(|| {}) as Detach),
					)
					.unwrap(),
			);
		}

		registry.notify("/x");

		assert_eq!(*log.borrow(), vec!["a/x", "b/x", "c/x"]);
	}
}
