//! Route matcher built from a route-definition tree.
//!
//! Routes are classified into three buckets at build time:
//!
//! - **static**: no parameters, stored in a path-keyed map for O(1) lookup
//! - **dynamic**: `:name` parameters or a trailing `*`, tried in order of
//!   decreasing specificity
//! - **wildcard**: the standalone `*`, the fallback of last resort
//!
//! Matching always prefers static over dynamic over wildcard.

use std::collections::HashMap;

use crate::error::{MatcherError, ReverseError};
use crate::params::Params;
use crate::path::{join_paths, normalize_path};
use crate::pattern::{PathPattern, PatternKind};

/// Identifier of a compiled route inside a [`RouteMatcher`].
///
/// Ids are assigned in depth-first registration order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(usize);

impl RouteId {
	/// Returns the numeric index of this id.
	pub fn index(self) -> usize {
		self.0
	}
}

impl std::fmt::Display for RouteId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{}", self.0)
	}
}

/// A compiled route entry.
#[derive(Debug, Clone)]
pub struct CompiledPath {
	id: RouteId,
	parent: Option<RouteId>,
	depth: usize,
	full_path: String,
	pattern: PathPattern,
	name: Option<String>,
}

impl CompiledPath {
	/// Returns the id of this route.
	pub fn id(&self) -> RouteId {
		self.id
	}

	/// Returns the parent route id, if any.
	pub fn parent(&self) -> Option<RouteId> {
		self.parent
	}

	/// Returns the nesting depth (0 for top-level routes).
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Returns the full path (parent path joined with own pattern).
	pub fn full_path(&self) -> &str {
		&self.full_path
	}

	/// Returns the compiled pattern.
	pub fn pattern(&self) -> &PathPattern {
		&self.pattern
	}

	/// Returns the route name.
	pub fn name(&self) -> Option<&str> {
		self.name.as_deref()
	}
}

/// Result of a successful match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
	/// The matched (leaf) route.
	pub route: RouteId,
	/// Extracted, decoded path parameters.
	pub params: Params,
}

/// Builder collecting routes depth-first before classification.
#[derive(Debug, Default)]
pub struct MatcherBuilder {
	entries: Vec<CompiledPath>,
	names: HashMap<String, RouteId>,
}

impl MatcherBuilder {
	/// Creates an empty builder.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a route under an optional parent.
	///
	/// The full path is the parent's full path joined with `path`.
	///
	/// # Errors
	///
	/// Returns [`MatcherError`] if the parent is unknown, the name is taken
	/// or the pattern fails to compile.
	pub fn add(
		&mut self,
		parent: Option<RouteId>,
		path: &str,
		name: Option<&str>,
	) -> Result<RouteId, MatcherError> {
		let (parent_path, depth) = match parent {
			Some(parent_id) => {
				let parent_entry = self
					.entries
					.get(parent_id.0)
					.ok_or(MatcherError::UnknownParent(parent_id.0))?;
				(parent_entry.full_path.as_str(), parent_entry.depth + 1)
			}
			None => ("", 0),
		};

		let full_path = join_paths(parent_path, path);
		let pattern = PathPattern::new(&full_path)?;
		let id = RouteId(self.entries.len());

		if let Some(name) = name {
			if self.names.contains_key(name) {
				return Err(MatcherError::DuplicateName(name.to_string()));
			}
			self.names.insert(name.to_string(), id);
		}

		self.entries.push(CompiledPath {
			id,
			parent,
			depth,
			full_path,
			pattern,
			name: name.map(str::to_string),
		});
		Ok(id)
	}

	/// Classifies the registered routes and produces the matcher.
	pub fn build(self) -> RouteMatcher {
		let mut statics = HashMap::new();
		let mut dynamics = Vec::new();
		let mut wildcard = None;

		for entry in &self.entries {
			match entry.pattern.kind() {
				// Later registrations win, so a default child (`''`) shadows its parent
				PatternKind::Static => {
					statics.insert(entry.full_path.clone(), entry.id);
				}
				PatternKind::Dynamic => dynamics.push(entry.id),
				PatternKind::Wildcard => match wildcard {
					None => wildcard = Some(entry.id),
					Some(kept) => {
						tracing::warn!(
							kept = %kept,
							ignored = %entry.id,
							"multiple wildcard routes registered; keeping the first"
						);
					}
				},
			}
		}

		// Most parameters first, then longest path; stable for ties
		dynamics.sort_by(|a: &RouteId, b: &RouteId| {
			let a = &self.entries[a.0];
			let b = &self.entries[b.0];
			b.pattern
				.param_count()
				.cmp(&a.pattern.param_count())
				.then_with(|| b.full_path.len().cmp(&a.full_path.len()))
		});

		tracing::debug!(
			statics = statics.len(),
			dynamics = dynamics.len(),
			wildcard = wildcard.is_some(),
			"route matcher built"
		);

		RouteMatcher {
			entries: self.entries,
			names: self.names,
			statics,
			dynamics,
			wildcard,
		}
	}
}

/// Three-bucket route matcher.
#[derive(Debug, Clone)]
pub struct RouteMatcher {
	entries: Vec<CompiledPath>,
	names: HashMap<String, RouteId>,
	statics: HashMap<String, RouteId>,
	dynamics: Vec<RouteId>,
	wildcard: Option<RouteId>,
}

impl RouteMatcher {
	/// Starts building a matcher.
	pub fn builder() -> MatcherBuilder {
		MatcherBuilder::new()
	}

	/// Returns the compiled entry for an id.
	pub fn get(&self, id: RouteId) -> Option<&CompiledPath> {
		self.entries.get(id.0)
	}

	/// Returns all compiled entries in registration order.
	pub fn entries(&self) -> &[CompiledPath] {
		&self.entries
	}

	/// Returns the number of registered routes.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no routes are registered.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Returns the dynamic routes in the order they are tried.
	pub fn dynamic_order(&self) -> &[RouteId] {
		&self.dynamics
	}

	/// Looks up a route id by name.
	pub fn resolve_name(&self, name: &str) -> Option<RouteId> {
		self.names.get(name).copied()
	}

	/// Matches a path.
	///
	/// The path is normalized first. Lookup order: exact static match,
	/// then the sorted dynamic list (first regex match wins), then the
	/// wildcard.
	pub fn match_path(&self, path: &str) -> Option<RouteMatch> {
		let path = normalize_path(path);

		if let Some(&route) = self.statics.get(&path) {
			return Some(RouteMatch {
				route,
				params: Params::new(),
			});
		}

		for &route in &self.dynamics {
			if let Some(params) = self.entries[route.0].pattern.matches(&path) {
				return Some(RouteMatch { route, params });
			}
		}

		self.wildcard.map(|route| RouteMatch {
			route,
			params: Params::new(),
		})
	}

	/// Reconstructs the root-to-leaf chain of a route by walking parent links.
	pub fn build_match_chain(&self, leaf: RouteId) -> Vec<RouteId> {
		let mut chain = Vec::new();
		let mut cursor = self.entries.get(leaf.0).map(|entry| entry.id);
		while let Some(id) = cursor {
			chain.push(id);
			cursor = self.entries[id.0].parent;
		}
		chain.reverse();
		chain
	}

	/// Generates a path for a named route.
	///
	/// # Errors
	///
	/// Returns [`ReverseError::UnknownName`] for an unknown name, or the
	/// pattern's reverse error.
	pub fn reverse(&self, name: &str, params: &Params) -> Result<String, ReverseError> {
		let id = self
			.resolve_name(name)
			.ok_or_else(|| ReverseError::UnknownName(name.to_string()))?;
		self.entries[id.0].pattern.reverse(params)
	}
}
