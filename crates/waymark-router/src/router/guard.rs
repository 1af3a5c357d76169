//! Navigation guards.
//!
//! A guard inspects a candidate transition `(to, from)` and decides to
//! continue, cancel or redirect. Guards run in series: the matched leaf's
//! `before_enter` first, then every global `before_each` in registration
//! order. The first guard that does not continue ends the pipeline.
//!
//! Three ways to write one:
//!
//! - [`sync_guard`]: a plain closure returning a [`GuardDecision`]
//! - [`guard_fn`]: a closure returning a future of [`GuardResult`]
//! - [`next_guard`]: the callback style, receiving a [`Next`] that must be
//!   called exactly once

use std::future::Future;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};

use crate::error::GuardError;
use crate::router::{Location, Route};

/// Verdict of a guard.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardDecision {
	/// Approve; the next guard runs.
	Continue,
	/// Abort the transition. `current_route` is unchanged.
	Cancel,
	/// Abort the transition and start a new one at this location.
	Redirect(Location),
}

impl GuardDecision {
	/// Shorthand for [`GuardDecision::Redirect`].
	pub fn redirect(to: impl Into<Location>) -> Self {
		Self::Redirect(to.into())
	}
}

impl From<bool> for GuardDecision {
	fn from(approve: bool) -> Self {
		if approve { Self::Continue } else { Self::Cancel }
	}
}

/// Result of a guard. An `Err` aborts the transition and is surfaced to
/// the caller of the navigation.
pub type GuardResult = Result<GuardDecision, GuardError>;

/// A guard consulted before a transition commits.
pub trait NavigationGuard {
	/// Decides on the transition from `from` to `to`.
	fn check<'a>(&'a self, to: &'a Route, from: &'a Route) -> LocalBoxFuture<'a, GuardResult>;
}

/// Guard built by [`sync_guard`].
pub struct SyncGuard<F>(F);

impl<F> NavigationGuard for SyncGuard<F>
where
	F: Fn(&Route, &Route) -> GuardDecision,
{
	fn check<'a>(&'a self, to: &'a Route, from: &'a Route) -> LocalBoxFuture<'a, GuardResult> {
		let decision = (self.0)(to, from);
		futures::future::ready(Ok(decision)).boxed_local()
	}
}

/// Creates a guard from a synchronous closure.
pub fn sync_guard<F>(f: F) -> SyncGuard<F>
where
	F: Fn(&Route, &Route) -> GuardDecision,
{
	SyncGuard(f)
}

/// Guard built by [`guard_fn`].
pub struct FnGuard<F>(F);

impl<F, Fut> NavigationGuard for FnGuard<F>
where
	F: Fn(&Route, &Route) -> Fut,
	Fut: Future<Output = GuardResult> + 'static,
{
	fn check<'a>(&'a self, to: &'a Route, from: &'a Route) -> LocalBoxFuture<'a, GuardResult> {
		(self.0)(to, from).boxed_local()
	}
}

/// Creates a guard from a closure returning a future.
///
/// The future cannot borrow `to`/`from`; clone what it needs.
pub fn guard_fn<F, Fut>(f: F) -> FnGuard<F>
where
	F: Fn(&Route, &Route) -> Fut,
	Fut: Future<Output = GuardResult> + 'static,
{
	FnGuard(f)
}

/// Continuation handed to callback-style guards.
///
/// Consuming `self` makes a second call impossible. Dropping it without a
/// call fails the transition with [`GuardError::NextDropped`].
#[must_use = "a guard must call next exactly once"]
#[derive(Debug)]
pub struct Next {
	sender: oneshot::Sender<GuardResult>,
}

impl Next {
	fn resolve(self, result: GuardResult) {
		// The receiver is gone only if the transition was dropped
		let _ = self.sender.send(result);
	}

	/// `next()`: approve.
	pub fn proceed(self) {
		self.resolve(Ok(GuardDecision::Continue));
	}

	/// `next(false)`: cancel.
	pub fn cancel(self) {
		self.resolve(Ok(GuardDecision::Cancel));
	}

	/// `next(path)`: redirect.
	pub fn redirect(self, to: impl Into<Location>) {
		self.resolve(Ok(GuardDecision::Redirect(to.into())));
	}

	/// Reports an explicit decision.
	pub fn decide(self, decision: GuardDecision) {
		self.resolve(Ok(decision));
	}

	/// Fails the transition.
	pub fn fail(self, error: GuardError) {
		self.resolve(Err(error));
	}
}

/// Guard built by [`next_guard`].
pub struct NextGuard<F>(F);

impl<F> NavigationGuard for NextGuard<F>
where
	F: Fn(&Route, &Route, Next),
{
	fn check<'a>(&'a self, to: &'a Route, from: &'a Route) -> LocalBoxFuture<'a, GuardResult> {
		let (sender, receiver) = oneshot::channel();
		(self.0)(to, from, Next { sender });
		async move { receiver.await.unwrap_or(Err(GuardError::NextDropped)) }.boxed_local()
	}
}

/// Creates a callback-style guard.
///
/// The closure may hand `next` to a spawned task and call it later; the
/// transition waits until it does.
pub fn next_guard<F>(f: F) -> NextGuard<F>
where
	F: Fn(&Route, &Route, Next),
{
	NextGuard(f)
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::executor::block_on;
	use rstest::rstest;

	fn routes() -> (Route, Route) {
		(Route::unmatched("/to"), Route::unmatched("/from"))
	}

	#[rstest]
	#[case(true, GuardDecision::Continue)]
	#[case(false, GuardDecision::Cancel)]
	fn test_decision_from_bool(#[case] approve: bool, #[case] expected: GuardDecision) {
		assert_eq!(GuardDecision::from(approve), expected);
	}

	#[rstest]
	fn test_sync_guard_sees_both_routes() {
		let (to, from) = routes();
		let guard = sync_guard(|to: &Route, from: &Route| {
			GuardDecision::from(to.path() == "/to" && from.path() == "/from")
		});

		let result = block_on(guard.check(&to, &from));

		assert_eq!(result, Ok(GuardDecision::Continue));
	}

	#[rstest]
	fn test_next_guard_redirect() {
		let (to, from) = routes();
		let guard = next_guard(|_: &Route, _: &Route, next: Next| next.redirect("/login"));

		let result = block_on(guard.check(&to, &from));

		assert_eq!(result, Ok(GuardDecision::Redirect(Location::from("/login"))));
	}

	#[rstest]
	fn test_dropped_next_fails() {
		let (to, from) = routes();
		let guard = next_guard(|_: &Route, _: &Route, next: Next| drop(next));

		let result = block_on(guard.check(&to, &from));

		assert_eq!(result, Err(GuardError::NextDropped));
	}

	#[rstest]
	fn test_async_guard_error() {
		let (to, from) = routes();
		let guard = guard_fn(|_: &Route, _: &Route| async { Err(GuardError::failed("offline")) });

		let result = block_on(guard.check(&to, &from));

		assert_eq!(result, Err(GuardError::Failed("offline".to_string())));
	}
}
