//! Navigation controller and nested views for the waymark client-side router.
//!
//! - [`Router`]: owns the current [`Route`], runs the guard pipeline and
//!   commits transitions to history
//! - [`RouteDefinition`]: the route table authored by the application
//! - [`RouterProvider`] and [`ViewTree`]: keep one mounted
//!   [`RouteComponent`] per depth of the matched chain
//! - [`Link`]: `href`, active state and click handling for anchors
//!
//! ## Example
//!
//! ```
//! use futures::executor::block_on;
//! use waymark_router::{NavigationOutcome, RouteComponent, RouteDefinition, RouteProps, Router};
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
//! let router = Router::builder()
//!     .route(RouteDefinition::new("/").redirect("/home"))
//!     .route(RouteDefinition::new("/home").component(|| Home))
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(block_on(router.push("/")).unwrap(), NavigationOutcome::Committed);
//! assert_eq!(router.current_route().path(), "/home");
//! ```

#![warn(missing_docs)]

pub mod conf;
pub mod definition;
pub mod error;
pub mod link;
pub mod router;
pub mod spawn;
pub mod view;

pub use conf::RouterOptions;
pub use definition::RouteDefinition;
pub use error::{ConfigError, GuardError, LoadError, NavigationError, RouterError, ViewError};
pub use link::{Link, LinkClick, LinkState};
pub use router::{
	AfterEachHook, CompiledRoute, GuardDecision, GuardResult, Location, LocationTarget, Meta,
	NavigationGuard, NavigationOutcome, NavigationTrigger, Next, Registration, Route,
	RouteListener, Router, RouterBuilder, RouterStatus, WeakRouter, guard_fn, next_guard,
	sync_guard,
};
pub use spawn::Spawn;
#[cfg(target_arch = "wasm32")]
pub use spawn::WasmSpawner;
pub use view::{
	ComponentFactory, ComponentLoader, ComponentSource, RenderSummary, RouteComponent,
	RouteProps, RouterProvider, ViewSlot, ViewTree, component_factory, component_loader,
};
pub use waymark_history::HistoryMode;
