//! Root of the view composition.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::{NavigationError, ViewError};
use crate::router::{NavigationOutcome, Registration, Router};
use crate::view::{RenderSummary, ViewTree};

/// Owns the router and the view arena and keeps them in sync.
///
/// Subscribes to the router once; every committed route re-renders the
/// arena. Render errors from subscriptions cannot propagate, so they are
/// logged and kept for [`RouterProvider::last_error`].
pub struct RouterProvider {
	router: Router,
	tree: Rc<RefCell<ViewTree>>,
	last_error: Rc<RefCell<Option<ViewError>>>,
	subscription: Option<Registration>,
}

impl std::fmt::Debug for RouterProvider {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterProvider")
			.field("router", &self.router)
			.field("tree", &self.tree)
			.field("last_error", &self.last_error)
			.finish()
	}
}

impl RouterProvider {
	/// Creates the provider and subscribes it to `router`.
	pub fn new(router: Router) -> Self {
		let tree = Rc::new(RefCell::new(ViewTree::new()));
		let last_error = Rc::new(RefCell::new(None));

		let weak_tree = Rc::downgrade(&tree);
		let weak_error = Rc::downgrade(&last_error);
		let weak_router = router.downgrade();
		let subscription = router.subscribe(move |route| {
			let (Some(tree), Some(router)) = (weak_tree.upgrade(), weak_router.upgrade()) else {
				return;
			};
			let result = tree.borrow_mut().render(route, &router);
			if let Err(error) = &result {
				tracing::warn!(%error, route = %route.full_path(), "failed to render route");
			}
			if let Some(slot) = weak_error.upgrade() {
				*slot.borrow_mut() = result.err();
			}
		});

		Self {
			router,
			tree,
			last_error,
			subscription: Some(subscription),
		}
	}

	/// Returns the router.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Starts the router; the initial route renders on commit.
	pub async fn start(&self) -> Result<NavigationOutcome, NavigationError> {
		self.router.start().await
	}

	/// Renders the current route now.
	pub fn render(&self) -> Result<RenderSummary, ViewError> {
		let route = self.router.current_route();
		let result = self.tree.borrow_mut().render(&route, &self.router);
		*self.last_error.borrow_mut() = result.as_ref().err().cloned();
		result
	}

	/// Calls `f` with the view arena.
	pub fn with_tree<R>(&self, f: impl FnOnce(&ViewTree) -> R) -> R {
		f(&self.tree.borrow())
	}

	/// Returns the error of the latest render, if it failed.
	pub fn last_error(&self) -> Option<ViewError> {
		self.last_error.borrow().clone()
	}

	/// Unmounts every component, deepest first, and stops following the
	/// router.
	pub fn unmount(&mut self) {
		if let Some(subscription) = self.subscription.take() {
			subscription.unregister();
		}
		self.tree.borrow_mut().clear();
	}
}

impl Drop for RouterProvider {
	fn drop(&mut self) {
		self.unmount();
	}
}
