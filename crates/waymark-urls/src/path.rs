//! Path normalization and splitting helpers.
//!
//! All functions here are pure and hold no shared state.

/// Normalizes a URL path.
///
/// - Collapses runs of `/` into a single `/`
/// - Strips a trailing `/` (the root path `/` is kept as-is)
/// - Maps the empty string to `/`
///
/// # Example
///
/// ```
/// use waymark_urls::normalize_path;
///
/// assert_eq!(normalize_path("/a//b/"), "/a/b");
/// assert_eq!(normalize_path(""), "/");
/// assert_eq!(normalize_path("/"), "/");
/// ```
pub fn normalize_path(path: &str) -> String {
	if path.is_empty() {
		return "/".to_string();
	}

	let mut normalized = String::with_capacity(path.len());
	let mut previous_slash = false;
	for c in path.chars() {
		if c == '/' {
			if previous_slash {
				continue;
			}
			previous_slash = true;
		} else {
			previous_slash = false;
		}
		normalized.push(c);
	}

	while normalized.len() > 1 && normalized.ends_with('/') {
		normalized.pop();
	}
	normalized
}

/// Joins a parent route path with a child pattern.
///
/// The child pattern is always interpreted relative to its parent, so
/// `join_paths("/dash", "/overview")` and `join_paths("/dash", "overview")`
/// both yield `/dash/overview`. An empty child resolves to the parent path
/// (a default child). A root-level `*` stays the bare wildcard `*`.
pub fn join_paths(parent: &str, child: &str) -> String {
	let parent = if parent == "*" { "" } else { parent };

	if child == "*" && (parent.is_empty() || parent == "/") {
		return "*".to_string();
	}

	let joined = format!("{}/{}", parent, child);
	let normalized = normalize_path(&joined);
	if normalized.starts_with('/') {
		normalized
	} else {
		format!("/{}", normalized)
	}
}

/// A full path split into its path, query and hash components.
///
/// `query` excludes the leading `?` and `hash` excludes the leading `#`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathParts<'a> {
	/// The path component.
	pub path: &'a str,
	/// The raw query string.
	pub query: &'a str,
	/// The fragment.
	pub hash: &'a str,
}

/// Splits `"/path?query#hash"` into its components.
///
/// # Example
///
/// ```
/// use waymark_urls::split_full_path;
///
/// let parts = split_full_path("/users/1?tab=posts#top");
/// assert_eq!(parts.path, "/users/1");
/// assert_eq!(parts.query, "tab=posts");
/// assert_eq!(parts.hash, "top");
/// ```
pub fn split_full_path(full_path: &str) -> PathParts<'_> {
	let (rest, hash) = match full_path.split_once('#') {
		Some((rest, hash)) => (rest, hash),
		None => (full_path, ""),
	};
	let (path, query) = match rest.split_once('?') {
		Some((path, query)) => (path, query),
		None => (rest, ""),
	};
	PathParts { path, query, hash }
}

/// Builds a full path from a path, an already-stringified query and a hash.
pub fn compose_full_path(path: &str, query: &str, hash: &str) -> String {
	let mut full = String::with_capacity(path.len() + query.len() + hash.len() + 2);
	full.push_str(path);
	if !query.is_empty() {
		full.push('?');
		full.push_str(query);
	}
	if !hash.is_empty() {
		full.push('#');
		full.push_str(hash);
	}
	full
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("", "/")]
	#[case("/", "/")]
	#[case("//", "/")]
	#[case("/a//b/", "/a/b")]
	#[case("/a/b", "/a/b")]
	#[case("/users///42//", "/users/42")]
	fn test_normalize_path(#[case] input: &str, #[case] expected: &str) {
		assert_eq!(normalize_path(input), expected);
	}

	#[rstest]
	fn test_normalize_equivalence() {
		assert_eq!(normalize_path("/a//b/"), normalize_path("/a/b"));
	}

	#[rstest]
	#[case("", "/", "/")]
	#[case("/", "about", "/about")]
	#[case("/dash", "/overview", "/dash/overview")]
	#[case("/dash", "overview", "/dash/overview")]
	#[case("/dash", "", "/dash")]
	#[case("", "*", "*")]
	#[case("/", "*", "*")]
	#[case("/docs", "*", "/docs/*")]
	#[case("", "users/:id", "/users/:id")]
	fn test_join_paths(#[case] parent: &str, #[case] child: &str, #[case] expected: &str) {
		assert_eq!(join_paths(parent, child), expected);
	}

	#[rstest]
	fn test_split_full_path_without_query_or_hash() {
		let parts = split_full_path("/users");
		assert_eq!(parts.path, "/users");
		assert_eq!(parts.query, "");
		assert_eq!(parts.hash, "");
	}

	#[rstest]
	fn test_split_full_path_hash_containing_question_mark() {
		let parts = split_full_path("/a#b?c");
		assert_eq!(parts.path, "/a");
		assert_eq!(parts.query, "");
		assert_eq!(parts.hash, "b?c");
	}

	#[rstest]
	fn test_compose_full_path() {
		assert_eq!(compose_full_path("/a", "", ""), "/a");
		assert_eq!(compose_full_path("/a", "x=1", ""), "/a?x=1");
		assert_eq!(compose_full_path("/a", "x=1", "top"), "/a?x=1#top");
		assert_eq!(compose_full_path("/a", "", "top"), "/a#top");
	}
}
