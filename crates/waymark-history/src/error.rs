//! Error types for history adapters.

use thiserror::Error;

/// Error raised by the browser boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HistoryError {
	/// A browser global (`window`, `history`) is not available.
	#[error("Browser API unavailable: {0}")]
	Unavailable(&'static str),
	/// A browser API call threw.
	#[error("History operation failed: {0}")]
	Browser(String),
}
