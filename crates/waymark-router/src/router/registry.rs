//! Ordered callback lists with removable entries.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

struct Entries<T> {
	items: Vec<(u64, T)>,
	next_id: u64,
}

/// Callbacks kept in registration order.
///
/// Iteration works on a snapshot, and entries removed while a snapshot is
/// being walked are skipped through [`Registry::contains`].
pub(crate) struct Registry<T> {
	entries: Rc<RefCell<Entries<T>>>,
}

impl<T: Clone + 'static> Registry<T> {
	pub(crate) fn new() -> Self {
		Self {
			entries: Rc::new(RefCell::new(Entries {
				items: Vec::new(),
				next_id: 0,
			})),
		}
	}

	pub(crate) fn add(&self, item: T) -> Registration {
		let id = {
			let mut entries = self.entries.borrow_mut();
			let id = entries.next_id;
			entries.next_id += 1;
			entries.items.push((id, item));
			id
		};
		let weak: Weak<RefCell<Entries<T>>> = Rc::downgrade(&self.entries);
		Registration {
			remove: Some(Box::new(move || {
				if let Some(entries) = weak.upgrade() {
					entries.borrow_mut().items.retain(|(existing, _)| *existing != id);
				}
			})),
		}
	}

	pub(crate) fn snapshot(&self) -> Vec<(u64, T)> {
		self.entries.borrow().items.clone()
	}

	pub(crate) fn contains(&self, id: u64) -> bool {
		self.entries
			.borrow()
			.items
			.iter()
			.any(|(existing, _)| *existing == id)
	}

	pub(crate) fn len(&self) -> usize {
		self.entries.borrow().items.len()
	}
}

/// Handle returned by `before_each`, `after_each` and `subscribe`.
///
/// Dropping the handle keeps the callback registered; call
/// [`Registration::unregister`] to remove it.
pub struct Registration {
	remove: Option<Box<dyn FnOnce()>>,
}

impl std::fmt::Debug for Registration {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registration")
			.field("active", &self.remove.is_some())
			.finish()
	}
}

impl Registration {
	/// Removes the callback. Later navigations no longer see it.
	pub fn unregister(mut self) {
		if let Some(remove) = self.remove.take() {
			remove();
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unregister_removes_only_its_entry() {
		let registry: Registry<&'static str> = Registry::new();
		let first = registry.add("a");
		let _second = registry.add("b");

		first.unregister();

		let items: Vec<_> = registry.snapshot().into_iter().map(|(_, item)| item).collect();
		assert_eq!(items, vec!["b"]);
	}

	#[rstest]
	fn test_dropped_handle_keeps_entry() {
		let registry: Registry<u8> = Registry::new();
		drop(registry.add(1));
		assert_eq!(registry.len(), 1);
	}

	#[rstest]
	fn test_unregister_after_registry_dropped_is_noop() {
		let registry: Registry<u8> = Registry::new();
		let handle = registry.add(1);
		drop(registry);
		handle.unregister();
	}
}
