//! Query string parsing and stringification.
//!
//! `key=value&key2=value2` round trip: `parse_query(&stringify_query(q))`
//! reproduces `q` for any map of string keys and values.

use std::collections::BTreeMap;

use crate::pattern::decode_component;

/// Decoded query parameters.
///
/// Keys are kept sorted so that stringification is deterministic and two
/// queries with the same content always produce the same full path.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
	entries: BTreeMap<String, String>,
}

impl Query {
	/// Creates an empty query.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the value of a key.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.entries.get(key).map(String::as_str)
	}

	/// Inserts a key, returning the previous value.
	pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) -> Option<String> {
		self.entries.insert(key.into(), value.into())
	}

	/// Removes a key.
	pub fn remove(&mut self, key: &str) -> Option<String> {
		self.entries.remove(key)
	}

	/// Returns whether every entry of `other` is present in `self` with the same value.
	pub fn includes(&self, other: &Query) -> bool {
		other
			.entries
			.iter()
			.all(|(key, value)| self.entries.get(key) == Some(value))
	}

	/// Returns the number of keys.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether the query is empty.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(key, value)` pairs in key order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}

	/// Serializes the query without a leading `?`.
	pub fn to_query_string(&self) -> String {
		stringify_query(self.iter().map(|(key, value)| (key, Some(value))))
	}
}

impl<K, V> FromIterator<(K, V)> for Query
where
	K: Into<String>,
	V: Into<String>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			entries: iter
				.into_iter()
				.map(|(key, value)| (key.into(), value.into()))
				.collect(),
		}
	}
}

impl std::fmt::Display for Query {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.to_query_string())
	}
}

/// Parses a query string into a [`Query`].
///
/// A leading `?` is ignored, empty and `?`-only input yield an empty map,
/// `+` decodes to a space and a key without `=` maps to `""`. When a key
/// repeats, the last value wins.
///
/// # Example
///
/// ```
/// use waymark_urls::parse_query;
///
/// let query = parse_query("?page=2&q=rust%20lang");
/// assert_eq!(query.get("page"), Some("2"));
/// assert_eq!(query.get("q"), Some("rust lang"));
/// assert!(parse_query("?").is_empty());
/// ```
pub fn parse_query(input: &str) -> Query {
	let trimmed = input.strip_prefix('?').unwrap_or(input);

	trimmed
		.split('&')
		.filter(|pair| !pair.is_empty())
		.map(|pair| {
			let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
			(decode_query_component(key), decode_query_component(value))
		})
		.collect()
}

fn decode_query_component(raw: &str) -> String {
	decode_component(&raw.replace('+', " "))
}

/// Stringifies query entries as `key=value&key2=value2`.
///
/// Entries whose value is `None` are omitted. Keys and values are
/// percent-encoded. An empty input yields the empty string.
///
/// # Example
///
/// ```
/// use waymark_urls::stringify_query;
///
/// let query = stringify_query([("a", Some("1")), ("skip", None), ("b", Some("x y"))]);
/// assert_eq!(query, "a=1&b=x%20y");
/// assert_eq!(stringify_query(Vec::<(&str, Option<&str>)>::new()), "");
/// ```
pub fn stringify_query<I, K, V>(entries: I) -> String
where
	I: IntoIterator<Item = (K, Option<V>)>,
	K: AsRef<str>,
	V: AsRef<str>,
{
	entries
		.into_iter()
		.filter_map(|(key, value)| {
			value.map(|value| {
				format!(
					"{}={}",
					urlencoding::encode(key.as_ref()),
					urlencoding::encode(value.as_ref())
				)
			})
		})
		.collect::<Vec<_>>()
		.join("&")
}
