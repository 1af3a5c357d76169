//! Integration tests for history adapter notifications
//!
//! Success Criteria:
//! 1. Programmatic push/replace notify listeners synchronously with the new path
//! 2. Hash mode keeps working when no native event is delivered
//! 3. A late native event for the same path is a harmless repeat
//! 4. Back/forward reach listeners only through the native event
//! 5. The native listener lives exactly as long as the first..last subscriber

use std::cell::RefCell;
use std::rc::Rc;

use rstest::*;
use waymark_history::{
	BrowserHistory, HashHistory, History, ListenerGuard, MemoryEnv, NativeEvent,
};

// ============================================================================
// Fixtures
// ============================================================================

struct Recorder {
	paths: Rc<RefCell<Vec<String>>>,
}

impl Recorder {
	fn new() -> Self {
		Self {
			paths: Rc::new(RefCell::new(Vec::new())),
		}
	}

	fn attach(&self, history: &dyn History) -> ListenerGuard {
		let paths = self.paths.clone();
		history
			.listen(Rc::new(move |path: &str| paths.borrow_mut().push(path.to_string())))
			.unwrap()
	}

	fn seen(&self) -> Vec<String> {
		self.paths.borrow().clone()
	}
}

#[fixture]
fn env() -> Rc<MemoryEnv> {
	Rc::new(MemoryEnv::new())
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[rstest]
fn test_hash_push_twice_notifies_exactly_twice(env: Rc<MemoryEnv>) {
	// Arrange
	let history = HashHistory::new(env.clone()).unwrap();
	let recorder = Recorder::new();
	let _guard = recorder.attach(&history);

	// Act
	history.push("/x").unwrap();
	history.push("/y").unwrap();

	// Assert
	assert_eq!(env.listener_count(NativeEvent::PopState), 0);
	assert_eq!(recorder.seen(), vec!["/x", "/y"]);
}

#[rstest]
fn test_hash_late_native_event_repeats_current_path(env: Rc<MemoryEnv>) {
	let history = HashHistory::new(env.clone()).unwrap();
	let recorder = Recorder::new();
	let _guard = recorder.attach(&history);

	history.push("/x").unwrap();
	env.dispatch_pending();

	assert_eq!(recorder.seen(), vec!["/x", "/x"]);
}

#[rstest]
fn test_browser_push_and_replace_notify_once_each(env: Rc<MemoryEnv>) {
	// Arrange
	let history = BrowserHistory::new(env.clone(), "");
	let recorder = Recorder::new();
	let _guard = recorder.attach(&history);

	// Act
	history.push("/a?page=1").unwrap();
	history.replace("/b").unwrap();
	let delivered = env.dispatch_pending();

	// Assert
	assert_eq!(delivered, 0);
	assert_eq!(recorder.seen(), vec!["/a?page=1", "/b"]);
	assert_eq!(env.entry_count(), 2);
}

#[rstest]
fn test_back_notifies_through_popstate(env: Rc<MemoryEnv>) {
	// Arrange
	let history = BrowserHistory::new(env.clone(), "");
	history.push("/a").unwrap();
	history.push("/b").unwrap();
	let recorder = Recorder::new();
	let _guard = recorder.attach(&history);

	// Act
	history.back().unwrap();
	assert!(recorder.seen().is_empty());
	env.dispatch_pending();

	// Assert
	assert_eq!(recorder.seen(), vec!["/a"]);
}

#[rstest]
fn test_user_hash_edit_reaches_listeners(env: Rc<MemoryEnv>) {
	let history = HashHistory::new(env.clone()).unwrap();
	let recorder = Recorder::new();
	let _guard = recorder.attach(&history);

	env.user_sets_hash("/typed");
	env.dispatch_pending();

	assert_eq!(recorder.seen(), vec!["/typed"]);
}

// ============================================================================
// Edge Cases
// ============================================================================

#[rstest]
fn test_native_listener_reference_counted_across_subscribers(env: Rc<MemoryEnv>) {
	// Arrange
	let history = HashHistory::new(env.clone()).unwrap();
	let first = Recorder::new();
	let second = Recorder::new();

	// Act
	let first_guard = first.attach(&history);
	let second_guard = second.attach(&history);

	// Assert
	assert_eq!(env.listener_count(NativeEvent::HashChange), 1);
	drop(first_guard);
	assert_eq!(env.listener_count(NativeEvent::HashChange), 1);
	second_guard.unlisten();
	assert_eq!(env.listener_count(NativeEvent::HashChange), 0);
}

#[rstest]
fn test_unsubscribed_listener_not_notified(env: Rc<MemoryEnv>) {
	let history = HashHistory::new(env.clone()).unwrap();
	let recorder = Recorder::new();

	recorder.attach(&history).unlisten();
	history.push("/x").unwrap();
	env.dispatch_pending();

	assert!(recorder.seen().is_empty());
}

#[rstest]
fn test_go_beyond_history_is_silent(env: Rc<MemoryEnv>) {
	let history = HashHistory::new(env.clone()).unwrap();
	let recorder = Recorder::new();
	let _guard = recorder.attach(&history);

	history.forward().unwrap();
	env.dispatch_pending();

	assert!(recorder.seen().is_empty());
}
