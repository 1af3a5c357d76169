//! Integration tests for route matching priority and path/query laws
//!
//! Success Criteria:
//! 1. Static paths always resolve to the route registered at that path
//! 2. Among dynamic routes, the more specific pattern wins
//! 3. The wildcard only matches when nothing else does
//! 4. Path normalization and query stringification obey their laws

use proptest::prelude::*;
use rstest::*;
use waymark_urls::{
	Query, RouteId, RouteMatcher, normalize_path, parse_query, stringify_query,
};

// ============================================================================
// Fixtures
// ============================================================================

/// Registers a mixed table; returns the matcher and ids by label.
fn mixed_table(order: &[&'static str]) -> (RouteMatcher, Vec<(&'static str, RouteId)>) {
	let mut builder = RouteMatcher::builder();
	let ids = order
		.iter()
		.map(|path| (*path, builder.add(None, path, None).unwrap()))
		.collect();
	(builder.build(), ids)
}

fn id_of(ids: &[(&'static str, RouteId)], path: &str) -> RouteId {
	ids.iter()
		.find(|(p, _)| *p == path)
		.map(|(_, id)| *id)
		.unwrap()
}

#[fixture]
fn table_paths() -> Vec<&'static str> {
	vec![
		"*",
		"/a/:x",
		"/a/:x/:y",
		"/a/static",
		"/a/static/deeper",
		"/files/*",
		"/",
	]
}

// ============================================================================
// Happy Path Tests
// ============================================================================

#[rstest]
fn test_more_parameters_win(table_paths: Vec<&'static str>) {
	let (matcher, ids) = mixed_table(&table_paths);

	let matched = matcher.match_path("/a/1/2").unwrap();

	assert_eq!(matched.route, id_of(&ids, "/a/:x/:y"));
	assert_ne!(matched.route, id_of(&ids, "/a/:x"));
}

#[rstest]
fn test_static_beats_dynamic(table_paths: Vec<&'static str>) {
	let (matcher, ids) = mixed_table(&table_paths);

	assert_eq!(
		matcher.match_path("/a/static").unwrap().route,
		id_of(&ids, "/a/static")
	);
	assert_eq!(
		matcher.match_path("/a/other").unwrap().route,
		id_of(&ids, "/a/:x")
	);
}

#[rstest]
fn test_wildcard_fallback(table_paths: Vec<&'static str>) {
	let (matcher, ids) = mixed_table(&table_paths);

	let matched = matcher.match_path("/nothing/here/at/all").unwrap();

	assert_eq!(matched.route, id_of(&ids, "*"));
	assert!(matched.params.is_empty());
}

#[rstest]
fn test_trailing_splat_beats_wildcard(table_paths: Vec<&'static str>) {
	let (matcher, ids) = mixed_table(&table_paths);

	assert_eq!(
		matcher.match_path("/files/a/b.txt").unwrap().route,
		id_of(&ids, "/files/*")
	);
}

// ============================================================================
// Error Path Tests
// ============================================================================

#[rstest]
fn test_no_match_without_wildcard() {
	let (matcher, _) = mixed_table(&["/a", "/b/:id"]);
	assert!(matcher.match_path("/c").is_none());
	assert!(matcher.match_path("/b/1/2").is_none());
}

// ============================================================================
// Property-based Tests
// ============================================================================

fn segment() -> impl Strategy<Value = String> {
	"[a-z]{1,6}"
}

proptest! {
	/// Static lookup is independent of dynamic/wildcard registration order.
	#[test]
	fn prop_static_match_independent_of_order(
		segments in prop::collection::vec(segment(), 1..4),
		shuffle in prop::collection::vec(any::<prop::sample::Index>(), 4),
	) {
		let static_path = format!("/{}", segments.join("/"));
		let mut paths: Vec<String> = vec![
			"*".to_string(),
			"/:a".to_string(),
			"/:a/:b".to_string(),
			"/:a/:b/:c".to_string(),
			static_path.clone(),
		];
		for index in shuffle {
			let i = index.index(paths.len());
			let last = paths.len() - 1;
			paths.swap(i, last);
		}

		let mut builder = RouteMatcher::builder();
		let mut static_id = None;
		for path in &paths {
			let id = builder.add(None, path, None).unwrap();
			if *path == static_path {
				static_id = Some(id);
			}
		}
		let matcher = builder.build();

		prop_assert_eq!(matcher.match_path(&static_path).map(|m| m.route), static_id);
	}

	/// `normalize_path` is idempotent and ignores duplicate/trailing slashes.
	#[test]
	fn prop_normalize_idempotent(segments in prop::collection::vec(segment(), 0..5)) {
		let clean = format!("/{}", segments.join("/"));
		let messy = format!("//{}//", segments.join("//"));

		let normalized = normalize_path(&messy);
		prop_assert_eq!(normalize_path(&normalized), normalized.clone());
		prop_assert_eq!(normalized, normalize_path(&clean));
	}

	/// `parse_query(stringify_query(q))` reproduces `q`.
	#[test]
	fn prop_query_round_trip(
		entries in prop::collection::btree_map(".{0,8}", ".{0,8}", 0..6)
	) {
		let query: Query = entries.clone().into_iter().collect();
		let raw = stringify_query(entries.iter().map(|(k, v)| (k, Some(v))));

		prop_assert_eq!(parse_query(&raw), query);
	}
}

// ============================================================================
// Boundary Analysis
// ============================================================================

#[rstest]
fn test_stringify_empty_query_is_empty_string() {
	assert_eq!(Query::new().to_query_string(), "");
	assert_eq!(stringify_query(Vec::<(String, Option<String>)>::new()), "");
}

#[rstest]
#[case("/a//b/", "/a/b")]
#[case("", "/")]
fn test_normalize_examples(#[case] input: &str, #[case] expected: &str) {
	assert_eq!(normalize_path(input), expected);
}
