//! Route definitions authored by the application.
//!
//! ```
//! use waymark_router::{RouteComponent, RouteDefinition, RouteProps};
//!
//! struct Home;
//!
//! impl RouteComponent for Home {
//!     fn mount(&mut self, _props: &RouteProps) -> anyhow::Result<()> {
//!         Ok(())
//!     }
//!
//!     fn unmount(&mut self) {}
//! }
//!
//! let routes = vec![
//!     RouteDefinition::new("/").redirect("/home"),
//!     RouteDefinition::new("/home").component(|| Home).name("home"),
//! ];
//! assert_eq!(routes.len(), 2);
//! ```

use std::future::Future;
use std::rc::Rc;

use serde_json::Value;

use crate::error::LoadError;
use crate::router::{Location, Meta, NavigationGuard};
use crate::view::{
	ComponentFactory, ComponentSource, RouteComponent, component_factory, component_loader,
};

/// Static configuration mapping a path pattern to a component.
///
/// Owned by the application and consumed by the router builder.
pub struct RouteDefinition {
	pub(crate) path: String,
	pub(crate) source: Option<ComponentSource>,
	pub(crate) children: Vec<RouteDefinition>,
	pub(crate) meta: Meta,
	pub(crate) before_enter: Option<Rc<dyn NavigationGuard>>,
	pub(crate) redirect: Option<Location>,
	pub(crate) name: Option<String>,
}

impl std::fmt::Debug for RouteDefinition {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteDefinition")
			.field("path", &self.path)
			.field("name", &self.name)
			.field("source", &self.source)
			.field("redirect", &self.redirect)
			.field("has_before_enter", &self.before_enter.is_some())
			.field("children", &self.children)
			.finish()
	}
}

impl RouteDefinition {
	/// Creates a definition for `path`.
	///
	/// Child paths are relative to their parent: `/dash` with child
	/// `overview` (or `/overview`) matches `/dash/overview`, and a child
	/// with an empty path is the parent's default child.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			source: None,
			children: Vec::new(),
			meta: Meta::new(),
			before_enter: None,
			redirect: None,
			name: None,
		}
	}

	/// Sets the component constructor.
	pub fn component<C, F>(mut self, constructor: F) -> Self
	where
		C: RouteComponent + 'static,
		F: Fn() -> C + 'static,
	{
		self.source = Some(ComponentSource::Eager(component_factory(constructor)));
		self
	}

	/// Sets a prebuilt component factory.
	pub fn factory(mut self, factory: ComponentFactory) -> Self {
		self.source = Some(ComponentSource::Eager(factory));
		self
	}

	/// Sets an async loader resolved on first navigation to this route.
	pub fn lazy<F, Fut>(mut self, loader: F) -> Self
	where
		F: Fn() -> Fut + 'static,
		Fut: Future<Output = Result<ComponentFactory, LoadError>> + 'static,
	{
		self.source = Some(ComponentSource::Lazy(component_loader(loader)));
		self
	}

	/// Appends a child definition.
	pub fn child(mut self, child: RouteDefinition) -> Self {
		self.children.push(child);
		self
	}

	/// Appends several child definitions.
	pub fn children(mut self, children: impl IntoIterator<Item = RouteDefinition>) -> Self {
		self.children.extend(children);
		self
	}

	/// Adds a metadata entry.
	pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
		self.meta.insert(key.into(), value.into());
		self
	}

	/// Sets the per-route guard, run before any global guard.
	pub fn before_enter(mut self, guard: impl NavigationGuard + 'static) -> Self {
		self.before_enter = Some(Rc::new(guard));
		self
	}

	/// Redirects navigations that match this definition.
	pub fn redirect(mut self, to: impl Into<Location>) -> Self {
		self.redirect = Some(to.into());
		self
	}

	/// Names the route for reverse lookups and named locations.
	pub fn name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Returns the pattern.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Returns the child definitions.
	pub fn child_definitions(&self) -> &[RouteDefinition] {
		&self.children
	}
}
