//! Route component contract handed to the renderer.

use std::future::Future;
use std::rc::Rc;

use futures::future::{FutureExt, LocalBoxFuture};

use crate::error::LoadError;
use crate::view::RouteProps;

/// A component instance mounted for one depth of the matched chain.
///
/// The router decides which component is mounted where; rendering is the
/// component's own business. `mount` and `unmount` are each called at most
/// once per instance, in that order.
pub trait RouteComponent {
	/// Name used in logs and errors.
	fn name(&self) -> &'static str {
		std::any::type_name::<Self>()
	}

	/// Mounts the component. An error leaves the instance unregistered and
	/// it is dropped without `unmount`.
	fn mount(&mut self, props: &RouteProps) -> anyhow::Result<()>;

	/// Receives new params/query/meta while the same definition stays
	/// matched at this depth.
	fn update(&mut self, props: &RouteProps) {
		let _ = props;
	}

	/// Unmounts the component. Children have already been unmounted.
	fn unmount(&mut self);
}

/// Creates a fresh component instance.
pub type ComponentFactory = Rc<dyn Fn() -> Box<dyn RouteComponent>>;

/// Asynchronously produces a [`ComponentFactory`].
pub type ComponentLoader = Rc<dyn Fn() -> LocalBoxFuture<'static, Result<ComponentFactory, LoadError>>>;

/// Wraps a constructor closure into a [`ComponentFactory`].
pub fn component_factory<C, F>(constructor: F) -> ComponentFactory
where
	C: RouteComponent + 'static,
	F: Fn() -> C + 'static,
{
	Rc::new(move || Box::new(constructor()) as Box<dyn RouteComponent>)
}

/// Wraps an async closure into a [`ComponentLoader`].
pub fn component_loader<F, Fut>(loader: F) -> ComponentLoader
where
	F: Fn() -> Fut + 'static,
	Fut: Future<Output = Result<ComponentFactory, LoadError>> + 'static,
{
	Rc::new(move || loader().boxed_local())
}

/// How a definition provides its component.
#[derive(Clone)]
pub enum ComponentSource {
	/// Available immediately.
	Eager(ComponentFactory),
	/// Loaded on first navigation to the route, then cached.
	Lazy(ComponentLoader),
}

impl std::fmt::Debug for ComponentSource {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Eager(_) => f.write_str("Eager"),
			Self::Lazy(_) => f.write_str("Lazy"),
		}
	}
}
