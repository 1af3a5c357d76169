//! # Waymark
//!
//! A client-side router for single-page applications written in Rust and
//! compiled to WebAssembly.
//!
//! Waymark maps the browser URL to a chain of nested route components,
//! runs navigation guards before every transition, and keeps the URL and
//! the mounted views in sync in both hash mode (`#/path`) and history
//! mode (`/base/path`).
//!
//! ## Crates
//!
//! - [`urls`] - path patterns, query strings and route matching
//! - [`history`] - hash and History API adapters over the browser
//! - [`router`] - navigation controller, guards, nested views and links
//!
//! ## Quick Example
//!
//! ```rust
//! use futures::executor::block_on;
//! use waymark::prelude::*;
//!
//! struct UserPage;
//!
//! impl RouteComponent for UserPage {
//!     fn mount(&mut self, props: &RouteProps) -> anyhow::Result<()> {
//!         let id: u32 = props.route().param("id")?;
//!         assert_eq!(id, 42);
//!         Ok(())
//!     }
//!
//!     fn unmount(&mut self) {}
//! }
//!
//! let router = Router::builder()
//!     .route(RouteDefinition::new("/users/:id").component(|| UserPage).name("user"))
//!     .build()
//!     .unwrap();
//! let provider = RouterProvider::new(router.clone());
//!
//! let outcome = block_on(router.push(Location::named("user", [("id", "42")]))).unwrap();
//!
//! assert_eq!(outcome, NavigationOutcome::Committed);
//! assert!(provider.last_error().is_none());
//! assert_eq!(Link::new("/users/42", "Me").resolve(&router).unwrap().href, "#/users/42");
//! ```

pub mod history;
pub mod router;
pub mod urls;

/// Items most applications need.
pub mod prelude {
	pub use waymark_history::{History, HistoryMode};
	pub use waymark_router::{
		GuardDecision, Link, Location, NavigationError, NavigationGuard, NavigationOutcome, Next,
		Route, RouteComponent, RouteDefinition, RouteProps, Router, RouterOptions, RouterProvider,
		guard_fn, next_guard, sync_guard,
	};
	pub use waymark_urls::{Params, Query};
}
