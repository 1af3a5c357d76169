//! Path Pattern compilation for client-side routing.
//!
//! Patterns use colon-style parameters:
//! - `/users` - Static path
//! - `/users/:id` - Single path parameter (one segment, excludes `/`)
//! - `/users/:id?` - Optional parameter
//! - `/files/*` - Trailing wildcard, matches the rest of the path without capturing
//! - `*` - Standalone wildcard, matches any path

use crate::error::{PatternError, ReverseError};
use crate::params::Params;

/// Maximum allowed length for a URL pattern string in bytes.
const MAX_PATTERN_LENGTH: usize = 1024;

/// Maximum allowed number of path segments in a URL pattern.
const MAX_PATH_SEGMENTS: usize = 32;

/// Maximum allowed size for a compiled pattern regex (in bytes).
const MAX_REGEX_SIZE: usize = 1 << 20; // 1 MiB

/// Matching bucket a pattern belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
	/// No parameters or wildcards; matched by exact string lookup.
	Static,
	/// Contains `:name` parameters or a trailing `*`.
	Dynamic,
	/// The standalone `*` pattern.
	Wildcard,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
	Literal(String),
	Param { name: String, optional: bool },
	Splat,
}

/// A compiled path pattern.
///
/// Holds the regex matcher and the ordered list of parameter names that
/// correspond to its capture groups.
#[derive(Debug, Clone)]
pub struct PathPattern {
	pattern: String,
	regex: regex::Regex,
	param_names: Vec<String>,
	segments: Vec<Segment>,
	kind: PatternKind,
}

impl PathPattern {
	/// Compiles a pattern string.
	///
	/// # Errors
	///
	/// Returns [`PatternError`] if:
	/// - Pattern exceeds maximum length (1024 bytes)
	/// - Pattern has too many path segments (>32)
	/// - A `:` segment has an invalid parameter name
	/// - Pattern compiles to an invalid regex
	pub fn new(pattern: &str) -> Result<Self, PatternError> {
		// Reject patterns exceeding the maximum length to prevent ReDoS
		if pattern.len() > MAX_PATTERN_LENGTH {
			return Err(PatternError::TooLong {
				length: pattern.len(),
				max: MAX_PATTERN_LENGTH,
			});
		}

		let segment_count = pattern.split('/').count();
		if segment_count > MAX_PATH_SEGMENTS {
			return Err(PatternError::TooManySegments {
				count: segment_count,
				max: MAX_PATH_SEGMENTS,
			});
		}

		if pattern == "*" {
			let regex = Self::build_regex(pattern, "^.*")?;
			return Ok(Self {
				pattern: pattern.to_string(),
				regex,
				param_names: Vec::new(),
				segments: vec![Segment::Splat],
				kind: PatternKind::Wildcard,
			});
		}

		let segments = Self::parse_segments(pattern)?;
		let (regex_str, param_names) = Self::compile_segments(&segments);
		let regex = Self::build_regex(pattern, &regex_str)?;

		let kind = if segments.iter().all(|s| matches!(s, Segment::Literal(_))) {
			PatternKind::Static
		} else {
			PatternKind::Dynamic
		};

		Ok(Self {
			pattern: pattern.to_string(),
			regex,
			param_names,
			segments,
			kind,
		})
	}

	fn parse_segments(pattern: &str) -> Result<Vec<Segment>, PatternError> {
		let trimmed = pattern.strip_prefix('/').unwrap_or(pattern);
		if trimmed.is_empty() {
			return Ok(Vec::new());
		}

		trimmed
			.split('/')
			.map(|raw| {
				if raw == "*" {
					return Ok(Segment::Splat);
				}
				let Some(name) = raw.strip_prefix(':') else {
					return Ok(Segment::Literal(raw.to_string()));
				};
				let (name, optional) = match name.strip_suffix('?') {
					Some(name) => (name, true),
					None => (name, false),
				};
				let valid = !name.is_empty()
					&& name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
				if !valid {
					return Err(PatternError::InvalidParameter {
						segment: raw.to_string(),
						pattern: pattern.to_string(),
					});
				}
				Ok(Segment::Param {
					name: name.to_string(),
					optional,
				})
			})
			.collect()
	}

	fn compile_segments(segments: &[Segment]) -> (String, Vec<String>) {
		let mut regex_str = String::from("^");
		let mut param_names = Vec::new();

		if segments.is_empty() {
			regex_str.push('/');
		}

		for segment in segments {
			match segment {
				Segment::Literal(text) => {
					regex_str.push('/');
					regex_str.push_str(&regex::escape(text));
				}
				Segment::Param {
					name,
					optional: false,
				} => {
					regex_str.push_str("/([^/]+)");
					param_names.push(name.clone());
				}
				Segment::Param {
					name,
					optional: true,
				} => {
					regex_str.push_str("(?:/([^/]+))?");
					param_names.push(name.clone());
				}
				Segment::Splat => {
					regex_str.push_str("(?:/.*)?");
				}
			}
		}

		regex_str.push('$');
		(regex_str, param_names)
	}

	fn build_regex(pattern: &str, regex_str: &str) -> Result<regex::Regex, PatternError> {
		// Size limits keep pathological patterns from exhausting memory
		regex::RegexBuilder::new(regex_str)
			.size_limit(MAX_REGEX_SIZE)
			.build()
			.map_err(|e| PatternError::Regex {
				pattern: pattern.to_string(),
				message: e.to_string(),
			})
	}

	/// Returns the original pattern string.
	pub fn pattern(&self) -> &str {
		&self.pattern
	}

	/// Returns the parameter names in capture order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Returns the number of parameters, optional ones included.
	pub fn param_count(&self) -> usize {
		self.param_names.len()
	}

	/// Returns the matching bucket of this pattern.
	pub fn kind(&self) -> PatternKind {
		self.kind
	}

	/// Returns the compiled regex.
	pub fn regex(&self) -> &regex::Regex {
		&self.regex
	}

	/// Checks if this pattern would match the given path.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Attempts to match a path against this pattern.
	///
	/// Returns the decoded parameters in pattern order. An optional
	/// parameter that did not participate in the match maps to `""`.
	pub fn matches(&self, path: &str) -> Option<Params> {
		self.regex
			.captures(path)
			.map(|caps| extract_params(&caps, &self.param_names))
	}

	/// Generates a path from this pattern with the given parameters.
	///
	/// Values are percent-encoded. Missing optional parameters drop their
	/// segment.
	pub fn reverse(&self, params: &Params) -> Result<String, ReverseError> {
		let mut path = String::new();

		for segment in &self.segments {
			match segment {
				Segment::Literal(text) => {
					path.push('/');
					path.push_str(text);
				}
				Segment::Param { name, optional } => match params.get(name) {
					Some(value) if !value.is_empty() => {
						path.push('/');
						path.push_str(&urlencoding::encode(value));
					}
					_ if *optional => {}
					_ => {
						return Err(ReverseError::MissingParameter {
							param: name.clone(),
							pattern: self.pattern.clone(),
						});
					}
				},
				Segment::Splat => return Err(ReverseError::Wildcard(self.pattern.clone())),
			}
		}

		if path.is_empty() {
			path.push('/');
		}
		Ok(path)
	}
}

/// Zips captured groups to parameter names, URL-decoding each value.
///
/// A name whose group did not capture maps to `""`.
pub fn extract_params(caps: &regex::Captures<'_>, param_names: &[String]) -> Params {
	param_names
		.iter()
		.enumerate()
		.map(|(index, name)| {
			let value = caps
				.get(index + 1)
				.map(|m| decode_component(m.as_str()))
				.unwrap_or_default();
			(name.clone(), value)
		})
		.collect()
}

/// Percent-decodes a path component, keeping the raw text when it is not valid UTF-8.
pub(crate) fn decode_component(raw: &str) -> String {
	urlencoding::decode(raw)
		.map(|decoded| decoded.into_owned())
		.unwrap_or_else(|_| raw.to_string())
}

impl PartialEq for PathPattern {
	fn eq(&self, other: &Self) -> bool {
		self.pattern == other.pattern
	}
}

impl Eq for PathPattern {}

impl std::fmt::Display for PathPattern {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.pattern)
	}
}
