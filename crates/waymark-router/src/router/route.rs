//! Compiled routes and resolved navigation targets.

use std::cell::RefCell;
use std::rc::Rc;
use std::str::FromStr;

use waymark_urls::{FromParams, ParamError, Params, Query, RouteId};

use crate::error::LoadError;
use crate::router::{Location, NavigationGuard};
use crate::view::{ComponentFactory, ComponentSource};

/// Opaque route metadata.
pub type Meta = serde_json::Map<String, serde_json::Value>;

/// A route definition after construction: one per definition in the tree.
///
/// Never mutated after construction, except for caching the factory a
/// lazy loader produced.
pub struct CompiledRoute {
	pub(crate) id: RouteId,
	pub(crate) parent: Option<RouteId>,
	pub(crate) depth: usize,
	pub(crate) path: String,
	pub(crate) full_path: String,
	pub(crate) name: Option<String>,
	pub(crate) meta: Meta,
	pub(crate) redirect: Option<Location>,
	pub(crate) before_enter: Option<Rc<dyn NavigationGuard>>,
	pub(crate) source: Option<ComponentSource>,
	pub(crate) resolved: RefCell<Option<ComponentFactory>>,
}

impl std::fmt::Debug for CompiledRoute {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("CompiledRoute")
			.field("id", &self.id)
			.field("full_path", &self.full_path)
			.field("name", &self.name)
			.field("depth", &self.depth)
			.field("source", &self.source)
			.field("has_before_enter", &self.before_enter.is_some())
			.field("redirect", &self.redirect)
			.finish()
	}
}

impl CompiledRoute {
	/// Returns the matcher id.
	pub fn id(&self) -> RouteId {
		self.id
	}

	/// Returns the parent's id.
	pub fn parent(&self) -> Option<RouteId> {
		self.parent
	}

	/// Returns the nesting depth (0 for top-level definitions).
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Returns the pattern as written in the definition.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the pattern joined with all ancestor patterns.
	pub fn full_path(&self) -> &str {
		&self.full_path
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}

	/// Returns the definition's own metadata.
	pub fn meta(&self) -> &Meta {
		&self.meta
	}

	/// Returns the redirect target.
	pub fn redirect(&self) -> Option<&Location> {
		self.redirect.as_ref()
	}

	/// Returns whether the component is loaded lazily.
	pub fn is_lazy(&self) -> bool {
		matches!(self.source, Some(ComponentSource::Lazy(_)))
	}

	/// Returns the factory, if the component is eager or already loaded.
	pub fn component(&self) -> Option<ComponentFactory> {
		match &self.source {
			Some(ComponentSource::Eager(factory)) => Some(factory.clone()),
			Some(ComponentSource::Lazy(_)) => self.resolved.borrow().clone(),
			None => None,
		}
	}

	/// Runs the lazy loader unless the factory is already available.
	pub(crate) async fn load(&self) -> Result<(), LoadError> {
		let Some(ComponentSource::Lazy(loader)) = &self.source else {
			return Ok(());
		};
		if self.resolved.borrow().is_some() {
			return Ok(());
		}
		tracing::debug!(route = %self.full_path, "loading lazy component");
		let factory = loader().await?;
		*self.resolved.borrow_mut() = Some(factory);
		Ok(())
	}
}

/// A resolved navigation target.
///
/// Built fresh for every navigation attempt. `matched` is root-first and
/// `matched[i]` is always the parent of `matched[i + 1]`; it is empty when
/// nothing matched.
#[derive(Clone)]
pub struct Route {
	pub(crate) path: String,
	pub(crate) full_path: String,
	pub(crate) query: Query,
	pub(crate) params: Params,
	pub(crate) hash: String,
	pub(crate) meta: Meta,
	pub(crate) matched: Vec<Rc<CompiledRoute>>,
	pub(crate) redirected_from: Option<String>,
}

impl std::fmt::Debug for Route {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Route")
			.field("full_path", &self.full_path)
			.field("params", &self.params)
			.field(
				"matched",
				&self
					.matched
					.iter()
					.map(|route| route.full_path.as_str())
					.collect::<Vec<_>>(),
			)
			.field("redirected_from", &self.redirected_from)
			.finish()
	}
}

impl Route {
	/// A route for `full_path` with nothing matched.
	pub(crate) fn unmatched(full_path: &str) -> Self {
		let parts = waymark_urls::split_full_path(full_path);
		Self {
			path: waymark_urls::normalize_path(parts.path),
			full_path: full_path.to_string(),
			query: waymark_urls::parse_query(parts.query),
			params: Params::new(),
			hash: parts.hash.to_string(),
			meta: Meta::new(),
			matched: Vec::new(),
			redirected_from: None,
		}
	}

	/// Returns the normalized path.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns path, query and hash as written to history.
	pub fn full_path(&self) -> &str {
		&self.full_path
	}

	/// Returns the query.
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Returns the decoded path parameters.
	pub fn params(&self) -> &Params {
		&self.params
	}

	/// Returns the hash (without `#`).
	pub fn hash(&self) -> &str {
		&self.hash
	}

	/// Returns the metadata of the matched chain, merged root to leaf.
	pub fn meta(&self) -> &Meta {
		&self.meta
	}

	/// Returns the matched chain, root first.
	pub fn matched(&self) -> &[Rc<CompiledRoute>] {
		&self.matched
	}

	/// Returns the matched leaf.
	pub fn leaf(&self) -> Option<&Rc<CompiledRoute>> {
		self.matched.last()
	}

	/// Returns the leaf's name.
	pub fn name(&self) -> Option<&str> {
		self.leaf().and_then(|route| route.name())
	}

	/// Returns whether any definition matched.
	pub fn is_matched(&self) -> bool {
		!self.matched.is_empty()
	}

	/// Returns the full path originally requested when redirects were followed.
	pub fn redirected_from(&self) -> Option<&str> {
		self.redirected_from.as_deref()
	}

	/// Parses one path parameter.
	pub fn param<T: FromStr>(&self, name: &str) -> Result<T, ParamError>
	where
		T::Err: std::fmt::Display,
	{
		self.params.parse(name)
	}

	/// Extracts all path parameters at once, in pattern order.
	///
	/// ```ignore
	/// // route "/posts/:year/:slug"
	/// let (year, slug) = route.params_as::<(u32, String)>()?;
	/// ```
	pub fn params_as<T: FromParams>(&self) -> Result<T, ParamError> {
		T::from_params(&self.params)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_unmatched_route_splits_full_path() {
		let route = Route::unmatched("/missing//?a=1#top");

		assert_eq!(route.path(), "/missing");
		assert_eq!(route.query().get("a"), Some("1"));
		assert_eq!(route.hash(), "top");
		assert!(!route.is_matched());
		assert!(route.name().is_none());
	}

	#[rstest]
	fn test_typed_params() {
		let mut route = Route::unmatched("/posts/2024/hello");
		route.params = [("year", "2024"), ("slug", "hello")].into_iter().collect();

		assert_eq!(route.param::<u32>("year").unwrap(), 2024);
		assert!(route.param::<u32>("slug").is_err());
		let (year, slug) = route.params_as::<(u32, String)>().unwrap();
		assert_eq!((year, slug.as_str()), (2024, "hello"));
	}
}
