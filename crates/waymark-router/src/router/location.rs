//! Navigation targets.

use waymark_urls::{Params, Query, parse_query, split_full_path};

/// Where a location points to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationTarget {
	/// A literal path such as `/users/42`.
	Path(String),
	/// A named route plus the parameters to fill its pattern.
	Named {
		/// Route name.
		name: String,
		/// Pattern parameters.
		params: Params,
	},
}

/// A navigation target accepted by `push`, `replace` and `Link`.
///
/// Strings convert through `From`, splitting `"/a?x=1#top"` into path,
/// query and hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
	target: LocationTarget,
	query: Query,
	hash: String,
}

impl Location {
	/// Creates a location for a literal path (which may carry `?query#hash`).
	pub fn path(path: impl AsRef<str>) -> Self {
		let parts = split_full_path(path.as_ref());
		Self {
			target: LocationTarget::Path(parts.path.to_string()),
			query: parse_query(parts.query),
			hash: parts.hash.to_string(),
		}
	}

	/// Creates a location for a named route.
	///
	/// ```
	/// use waymark_router::Location;
	///
	/// let location = Location::named("user", [("id", "42")]).with_query("tab", "posts");
	/// assert_eq!(location.query().get("tab"), Some("posts"));
	/// ```
	pub fn named<I, K, V>(name: impl Into<String>, params: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		Self {
			target: LocationTarget::Named {
				name: name.into(),
				params: params.into_iter().collect(),
			},
			query: Query::new(),
			hash: String::new(),
		}
	}

	/// Adds a query entry.
	pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.query.insert(key, value);
		self
	}

	/// Sets the hash (without `#`).
	pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
		self.hash = hash.into();
		self
	}

	/// Returns the target.
	pub fn target(&self) -> &LocationTarget {
		&self.target
	}

	/// Returns the query.
	pub fn query(&self) -> &Query {
		&self.query
	}

	/// Returns the hash (without `#`).
	pub fn hash(&self) -> &str {
		&self.hash
	}
}

impl From<&str> for Location {
	fn from(path: &str) -> Self {
		Self::path(path)
	}
}

impl From<String> for Location {
	fn from(path: String) -> Self {
		Self::path(path)
	}
}

impl From<&String> for Location {
	fn from(path: &String) -> Self {
		Self::path(path)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_from_full_path() {
		let location = Location::from("/search?q=rust&page=2#results");

		assert_eq!(location.target(), &LocationTarget::Path("/search".to_string()));
		assert_eq!(location.query().get("q"), Some("rust"));
		assert_eq!(location.query().get("page"), Some("2"));
		assert_eq!(location.hash(), "results");
	}

	#[rstest]
	fn test_named_collects_params() {
		let location = Location::named("post", [("year", "2024"), ("slug", "hello")]);

		let LocationTarget::Named { name, params } = location.target() else {
			panic!("expected a named target");
		};
		assert_eq!(name, "post");
		assert_eq!(params.get("slug"), Some("hello"));
	}
}
