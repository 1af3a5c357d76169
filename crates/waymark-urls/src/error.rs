//! Error types for path patterns, parameters and the route matcher.

use thiserror::Error;

/// Error raised when compiling a path pattern.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
	/// The pattern exceeds the maximum allowed length.
	#[error("Pattern length {length} exceeds maximum allowed length of {max} bytes")]
	TooLong {
		/// Actual pattern length in bytes.
		length: usize,
		/// Maximum allowed length in bytes.
		max: usize,
	},
	/// The pattern has too many path segments.
	#[error("Pattern has {count} path segments, exceeding maximum of {max}")]
	TooManySegments {
		/// Actual number of segments.
		count: usize,
		/// Maximum allowed number of segments.
		max: usize,
	},
	/// A `:name` segment has an empty or malformed name.
	#[error("Invalid parameter segment '{segment}' in pattern '{pattern}'")]
	InvalidParameter {
		/// The offending segment.
		segment: String,
		/// The full pattern.
		pattern: String,
	},
	/// The generated regex failed to compile.
	#[error("Failed to compile pattern regex for '{pattern}': {message}")]
	Regex {
		/// The full pattern.
		pattern: String,
		/// Message from the regex engine.
		message: String,
	},
}

/// Error raised when extracting typed values from path parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParamError {
	/// Failed to parse a parameter value.
	#[error("Failed to parse parameter {} '{raw_value}' as {param_type}: {source_message}", display_index(.param_index, .param_name))]
	Parse {
		/// Index of the parameter in pattern order, if known.
		param_index: Option<usize>,
		/// Name of the parameter, if known.
		param_name: Option<String>,
		/// Expected type name.
		param_type: &'static str,
		/// Raw string value that failed to parse.
		raw_value: String,
		/// Error message from parsing.
		source_message: String,
	},
	/// Parameter count mismatch.
	#[error("Parameter count mismatch: expected {expected}, got {actual}")]
	CountMismatch {
		/// Expected number of parameters.
		expected: usize,
		/// Actual number of parameters.
		actual: usize,
	},
	/// A named parameter is not present in the match.
	#[error("Missing parameter: {0}")]
	Missing(String),
}

fn display_index(index: &Option<usize>, name: &Option<String>) -> String {
	match (index, name) {
		(_, Some(name)) => format!("'{}'", name),
		(Some(index), None) => format!("[{}]", index),
		(None, None) => String::new(),
	}
}

/// Error raised when building a path from a pattern and parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReverseError {
	/// No route is registered under this name.
	#[error("Invalid route name: {0}")]
	UnknownName(String),
	/// A required parameter was not supplied.
	#[error("Missing parameter '{param}' for pattern '{pattern}'")]
	MissingParameter {
		/// Name of the missing parameter.
		param: String,
		/// The pattern being reversed.
		pattern: String,
	},
	/// Wildcard patterns cannot be turned back into a concrete path.
	#[error("Pattern '{0}' contains a wildcard and cannot be reversed")]
	Wildcard(String),
}

/// Error raised while building a [`RouteMatcher`](crate::RouteMatcher).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatcherError {
	/// A route pattern failed to compile.
	#[error(transparent)]
	Pattern(#[from] PatternError),
	/// Two routes share the same name.
	#[error("Duplicate route name: {0}")]
	DuplicateName(String),
	/// A parent id does not belong to this builder.
	#[error("Unknown parent route id: {0}")]
	UnknownParent(usize),
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_param_error_display_with_index() {
		let err = ParamError::Parse {
			param_index: Some(0),
			param_name: None,
			param_type: "i32",
			raw_value: "abc".to_string(),
			source_message: "invalid digit".to_string(),
		};
		let message = err.to_string();
		assert!(message.contains("[0]"));
		assert!(message.contains("abc"));
		assert!(message.contains("i32"));
	}

	#[rstest]
	fn test_param_error_display_with_name() {
		let err = ParamError::Parse {
			param_index: None,
			param_name: Some("id".to_string()),
			param_type: "u64",
			raw_value: "-1".to_string(),
			source_message: "invalid digit".to_string(),
		};
		assert!(err.to_string().contains("'id'"));
	}

	#[rstest]
	fn test_count_mismatch_display() {
		let err = ParamError::CountMismatch {
			expected: 2,
			actual: 1,
		};
		assert!(err.to_string().contains("expected 2"));
		assert!(err.to_string().contains("got 1"));
	}

	#[rstest]
	fn test_reverse_error_display() {
		assert_eq!(
			ReverseError::UnknownName("home".to_string()).to_string(),
			"Invalid route name: home"
		);
	}
}
