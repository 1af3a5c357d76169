//! Path parsing and route matching for the waymark client-side router.
//!
//! This crate holds the pure, stateless half of the router:
//!
//! - [`path`]: path normalization, joining and splitting
//! - [`pattern`]: compilation of `/user/:id`-style patterns into regex matchers
//! - [`query`]: query string parsing and stringification
//! - [`params`]: ordered path parameters and typed extraction
//! - [`matcher`]: the static / dynamic / wildcard route matcher
//!
//! ## Example
//!
//! ```
//! use waymark_urls::RouteMatcher;
//!
//! let mut builder = RouteMatcher::builder();
//! let user = builder.add(None, "/users/:id", Some("user")).unwrap();
//! let new_user = builder.add(None, "/users/new", None).unwrap();
//! let matcher = builder.build();
//!
//! // Static routes beat dynamic ones
//! assert_eq!(matcher.match_path("/users/new").unwrap().route, new_user);
//!
//! let matched = matcher.match_path("/users/42").unwrap();
//! assert_eq!(matched.route, user);
//! assert_eq!(matched.params.get("id"), Some("42"));
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod matcher;
pub mod params;
pub mod path;
pub mod pattern;
pub mod query;

pub use error::{MatcherError, ParamError, PatternError, ReverseError};
pub use matcher::{CompiledPath, MatcherBuilder, RouteId, RouteMatch, RouteMatcher};
pub use params::{FromParams, Params};
pub use path::{PathParts, compose_full_path, join_paths, normalize_path, split_full_path};
pub use pattern::{PathPattern, PatternKind, extract_params};
pub use query::{Query, parse_query, stringify_query};
