//! Integration tests for nested view composition
//!
//! Success Criteria:
//! 1. Each depth of the matched chain mounts exactly one component
//! 2. Leaving a branch unmounts children before parents
//! 3. A depth whose definition is unchanged is updated, never remounted
//! 4. Render failures are reported and leave no half-mounted slot behind

use std::cell::RefCell;
use std::rc::Rc;

use futures::executor::block_on;
use rstest::*;
use waymark_router::{
	RouteComponent, RouteDefinition, RouteProps, Router, RouterProvider, ViewError,
};

// ============================================================================
// Fixtures
// ============================================================================

type Log = Rc<RefCell<Vec<String>>>;

struct Logged {
	label: &'static str,
	log: Log,
}

impl RouteComponent for Logged {
	fn name(&self) -> &'static str {
		self.label
	}

	fn mount(&mut self, props: &RouteProps) -> anyhow::Result<()> {
		self.log
			.borrow_mut()
			.push(format!("mount {} @{}", self.label, props.depth()));
		Ok(())
	}

	fn update(&mut self, props: &RouteProps) {
		let id = props.params().get("id").unwrap_or("-");
		self.log.borrow_mut().push(format!("update {} {}", self.label, id));
	}

	fn unmount(&mut self) {
		self.log.borrow_mut().push(format!("unmount {}", self.label));
	}
}

struct Broken;

impl RouteComponent for Broken {
	fn name(&self) -> &'static str {
		"Broken"
	}

	fn mount(&mut self, _props: &RouteProps) -> anyhow::Result<()> {
		anyhow::bail!("template missing")
	}

	fn unmount(&mut self) {
		panic!("a component that failed to mount must not be unmounted");
	}
}

fn logged(label: &'static str, log: &Log) -> impl Fn() -> Logged + 'static {
	let log = log.clone();
	move || Logged {
		label,
		log: log.clone(),
	}
}

fn take(log: &Log) -> Vec<String> {
	log.borrow_mut().drain(..).collect()
}

#[fixture]
fn log() -> Log {
	Rc::new(RefCell::new(Vec::new()))
}

fn build(log: &Log) -> Router {
	Router::builder()
		.route(
			RouteDefinition::new("/dash")
				.component(logged("Dash", log))
				.child(RouteDefinition::new("overview").component(logged("Overview", log)))
				.child(RouteDefinition::new("stats").component(logged("Stats", log)))
				.child(RouteDefinition::new("broken").component(|| Broken)),
		)
		.route(RouteDefinition::new("/users/:id").component(logged("User", log)))
		.route(RouteDefinition::new("/other").component(logged("Other", log)))
		.route(
			RouteDefinition::new("/legacy")
				.redirect("/other")
				.child(RouteDefinition::new("page").component(logged("Page", log))),
		)
		.build()
		.unwrap()
}

// ============================================================================
// Mount Order Tests
// ============================================================================

#[rstest]
fn test_nested_route_mounts_top_down(log: Log) {
	// Arrange
	let router = build(&log);
	let provider = RouterProvider::new(router.clone());

	// Act
	block_on(router.push("/dash/overview")).unwrap();

	// Assert
	assert_eq!(take(&log), vec!["mount Dash @0", "mount Overview @1"]);
	provider.with_tree(|tree| {
		assert_eq!(tree.len(), 2);
		assert_eq!(tree.slot(1).unwrap().component_name(), "Overview");
		assert_eq!(tree.slot(1).unwrap().route().full_path(), "/dash/overview");
	});
}

#[rstest]
fn test_leaving_branch_unmounts_bottom_up(log: Log) {
	// Arrange
	let router = build(&log);
	let _provider = RouterProvider::new(router.clone());
	block_on(router.push("/dash/overview")).unwrap();
	take(&log);

	// Act
	block_on(router.push("/other")).unwrap();

	// Assert
	assert_eq!(
		take(&log),
		vec!["unmount Overview", "unmount Dash", "mount Other @0"]
	);
}

#[rstest]
fn test_sibling_switch_keeps_parent(log: Log) {
	// Arrange
	let router = build(&log);
	let _provider = RouterProvider::new(router.clone());
	block_on(router.push("/dash/overview")).unwrap();
	take(&log);

	// Act
	block_on(router.push("/dash/stats")).unwrap();

	// Assert
	assert_eq!(
		take(&log),
		vec!["unmount Overview", "update Dash -", "mount Stats @1"]
	);
}

#[rstest]
fn test_param_change_updates_in_place(log: Log) {
	// Arrange
	let router = build(&log);
	let provider = RouterProvider::new(router.clone());
	block_on(router.push("/users/1")).unwrap();
	take(&log);

	// Act
	block_on(router.push("/users/2")).unwrap();

	// Assert
	assert_eq!(take(&log), vec!["update User 2"]);
	provider.with_tree(|tree| {
		assert_eq!(tree.len(), 1);
		assert_eq!(tree.slot(0).unwrap().generation(), tree.generation());
	});
}

#[rstest]
fn test_dropping_provider_unmounts_everything(log: Log) {
	// Arrange
	let router = build(&log);
	let provider = RouterProvider::new(router.clone());
	block_on(router.push("/dash/stats")).unwrap();
	take(&log);

	// Act
	drop(provider);
	block_on(router.push("/other")).unwrap();

	// Assert
	assert_eq!(take(&log), vec!["unmount Stats", "unmount Dash"]);
}

#[rstest]
fn test_manual_render_reports_summary(log: Log) {
	// Arrange
	let router = build(&log);
	let provider = RouterProvider::new(router.clone());
	block_on(router.push("/dash/overview")).unwrap();

	// Act
	let summary = provider.render().unwrap();

	// Assert
	assert_eq!(summary.kept, 2);
	assert_eq!(summary.mounted, 0);
	assert_eq!(summary.unmounted, 0);
}

// ============================================================================
// Error Tests
// ============================================================================

#[rstest]
fn test_failed_mount_is_not_registered(log: Log) {
	// Arrange
	let router = build(&log);
	let provider = RouterProvider::new(router.clone());

	// Act
	block_on(router.push("/dash/broken")).unwrap();

	// Assert
	assert!(matches!(
		provider.last_error(),
		Some(ViewError::Mount { component: "Broken", ref path, .. }) if path == "/dash/broken"
	));
	provider.with_tree(|tree| assert_eq!(tree.len(), 1));
}

#[rstest]
fn test_definition_without_component_cannot_render(log: Log) {
	// Arrange
	let router = build(&log);
	let provider = RouterProvider::new(router.clone());

	// Act
	block_on(router.push("/legacy/page")).unwrap();

	// Assert
	assert_eq!(
		provider.last_error(),
		Some(ViewError::NotARouteComponent {
			path: "/legacy".to_string(),
			depth: 0,
		})
	);
	provider.with_tree(|tree| assert!(tree.is_empty()));
}

#[rstest]
fn test_successful_render_clears_last_error(log: Log) {
	// Arrange
	let router = build(&log);
	let provider = RouterProvider::new(router.clone());
	block_on(router.push("/dash/broken")).unwrap();

	// Act
	block_on(router.push("/other")).unwrap();

	// Assert
	assert!(provider.last_error().is_none());
}
