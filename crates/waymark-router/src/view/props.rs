//! Props handed to mounted route components.

use std::rc::Rc;

use waymark_urls::{Params, Query};

use crate::router::{CompiledRoute, Meta, Route, Router};

/// What a route component receives on mount and on every update.
///
/// Carries the router itself, so components deep in the tree (links,
/// nested views) reach it without a global.
#[derive(Debug, Clone)]
pub struct RouteProps {
	route: Route,
	router: Router,
	depth: usize,
}

impl RouteProps {
	pub(crate) fn new(route: Route, router: Router, depth: usize) -> Self {
		Self {
			route,
			router,
			depth,
		}
	}

	/// Returns the current route.
	pub fn route(&self) -> &Route {
		&self.route
	}

	/// Returns the router.
	pub fn router(&self) -> &Router {
		&self.router
	}

	/// Returns the depth this component is mounted at.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Returns the definition matched at this depth.
	pub fn matched(&self) -> Option<&Rc<CompiledRoute>> {
		self.route.matched().get(self.depth)
	}

	/// Returns the path parameters.
	pub fn params(&self) -> &Params {
		self.route.params()
	}

	/// Returns the query.
	pub fn query(&self) -> &Query {
		self.route.query()
	}

	/// Returns the merged route metadata.
	pub fn meta(&self) -> &Meta {
		self.route.meta()
	}
}
