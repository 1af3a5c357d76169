//! Path patterns, query strings and route matching
//!
//! This module provides access to waymark-urls, the pure URL layer of the
//! router. Nothing here touches the browser.
//!
//! ## Example
//!
//! ```rust
//! use waymark::urls::{RouteMatcher, parse_query};
//!
//! let mut builder = RouteMatcher::builder();
//! builder.add(None, "/users/:id", Some("user")).unwrap();
//! let matcher = builder.build();
//!
//! let found = matcher.match_path("/users/42").unwrap();
//! assert_eq!(found.params.get("id"), Some("42"));
//! assert_eq!(parse_query("?tab=posts").get("tab"), Some("posts"));
//! ```

pub use waymark_urls::*;
