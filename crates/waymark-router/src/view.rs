//! Nested view composition.
//!
//! [`RouterProvider`] subscribes to the router and drives a [`ViewTree`],
//! which mounts one [`RouteComponent`] per depth of the matched chain and
//! only remounts the depths whose definition changed.

mod component;
mod props;
mod provider;
mod tree;

pub use component::{
	ComponentFactory, ComponentLoader, ComponentSource, RouteComponent, component_factory,
	component_loader,
};
pub use props::RouteProps;
pub use provider::RouterProvider;
pub use tree::{RenderSummary, ViewSlot, ViewTree};
