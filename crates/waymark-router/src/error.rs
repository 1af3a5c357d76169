//! Error types for the navigation controller and view layer.
//!
//! Expected control flow is not an error: a path that matches nothing
//! yields an empty matched chain, and cancelled, superseded or duplicated
//! navigations are reported as a [`NavigationOutcome`](crate::NavigationOutcome).

use thiserror::Error;
use waymark_history::HistoryError;
use waymark_urls::{MatcherError, ReverseError};

/// Construction-time misconfiguration.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouterError {
	/// A route pattern or name was rejected by the matcher.
	#[error("Invalid route table: {0}")]
	Matcher(#[from] MatcherError),

	/// A definition has neither a component, a loader nor a redirect.
	#[error("Route '{path}' has no component and no redirect")]
	MissingComponent {
		/// Full path of the offending definition.
		path: String,
	},

	/// Router options failed to load or validate.
	#[error(transparent)]
	Config(#[from] ConfigError),

	/// The history adapter could not be created.
	#[error("History adapter unavailable: {0}")]
	History(#[from] HistoryError),
}

/// Invalid router options.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
	/// The TOML document could not be parsed.
	#[error("Failed to parse router options: {0}")]
	Parse(String),

	/// A field holds a value outside its domain.
	#[error("Invalid value for '{key}': {message}")]
	InvalidValue {
		/// Field name.
		key: &'static str,
		/// What is wrong with it.
		message: String,
	},
}

/// Failure reported by a navigation guard.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
	/// A `next` callback was dropped without being called.
	#[error("Guard finished without calling next")]
	NextDropped,

	/// The guard itself failed.
	#[error("Guard failed: {0}")]
	Failed(String),
}

impl GuardError {
	/// Creates a [`GuardError::Failed`] from any displayable error.
	pub fn failed(error: impl std::fmt::Display) -> Self {
		Self::Failed(error.to_string())
	}
}

/// Failure of a lazy component loader.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct LoadError(pub String);

/// A navigation that could not complete.
///
/// `current_route` is never modified when one of these is returned.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
	/// More consecutive redirects than `max_redirects`.
	#[error("Redirect limit of {limit} exceeded while navigating to '{path}'")]
	RedirectLimit {
		/// Configured limit.
		limit: u32,
		/// Target of the redirect that exceeded it.
		path: String,
	},

	/// A guard failed instead of deciding.
	#[error("Navigation to '{path}' aborted by a failing guard: {source}")]
	Guard {
		/// Path of the rejected target.
		path: String,
		/// Guard failure.
		#[source]
		source: GuardError,
	},

	/// A lazy component loader failed.
	#[error("Failed to load component for route '{route}': {source}")]
	Loader {
		/// Full path of the route whose loader failed.
		route: String,
		/// Loader failure.
		#[source]
		source: LoadError,
	},

	/// A named location could not be turned into a path.
	#[error(transparent)]
	Reverse(#[from] ReverseError),

	/// The history adapter rejected the URL update.
	#[error("History update failed: {0}")]
	History(#[from] HistoryError),
}

/// Misuse detected while composing nested views.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViewError {
	/// The definition at this depth has nothing mountable (a redirect-only
	/// definition, or a lazy component that was never resolved).
	#[error("Route '{path}' at depth {depth} does not provide a route component")]
	NotARouteComponent {
		/// Full path of the definition.
		path: String,
		/// Nesting depth.
		depth: usize,
	},

	/// A component failed to mount.
	#[error("Component '{component}' for route '{path}' failed to mount: {message}")]
	Mount {
		/// Component name.
		component: &'static str,
		/// Full path of the definition.
		path: String,
		/// Failure reported by the component.
		message: String,
	},
}
