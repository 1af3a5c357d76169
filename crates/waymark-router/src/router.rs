//! Navigation controller, routes, locations and guards.

mod core;
pub mod guard;
mod location;
mod registry;
mod route;

pub use self::core::{
	AfterEachHook, NavigationOutcome, NavigationTrigger, RouteListener, Router, RouterBuilder,
	RouterStatus, WeakRouter,
};
pub use guard::{
	FnGuard, GuardDecision, GuardResult, NavigationGuard, Next, NextGuard, SyncGuard, guard_fn,
	next_guard, sync_guard,
};
pub use location::{Location, LocationTarget};
pub use registry::Registration;
pub use route::{CompiledRoute, Meta, Route};
