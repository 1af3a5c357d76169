//! Navigation controller.
//!
//! The [`Router`] owns the current [`Route`] and serializes transitions:
//!
//! 1. Resolve the target into a candidate route through the matcher.
//! 2. Follow a route-level `redirect` of the matched leaf, before any guard.
//! 3. Run the leaf's `before_enter`, then every `before_each`, in series.
//! 4. Resolve lazy components of the matched chain.
//! 5. Commit: write history (explicit navigations only), swap the current
//!    route, run `after_each` hooks, notify subscribers.
//!
//! Every transition takes a monotonically increasing token. A transition
//! whose token is no longer the latest resolves to
//! [`NavigationOutcome::Superseded`] and never commits. A target equal to
//! the current route resolves to [`NavigationOutcome::Duplicated`] before
//! taking a token, so a repeated history notification never disturbs a
//! pending transition.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use futures::future::FutureExt;
use waymark_history::{History, ListenerGuard, create_history};
use waymark_urls::{
	MatcherBuilder, Params, ReverseError, RouteId, RouteMatcher, compose_full_path, normalize_path,
	parse_query, split_full_path,
};

use crate::conf::RouterOptions;
use crate::definition::RouteDefinition;
use crate::error::{GuardError, NavigationError, RouterError};
use crate::router::registry::{Registration, Registry};
use crate::router::{
	CompiledRoute, GuardDecision, Location, LocationTarget, Meta, NavigationGuard, Route,
};
use crate::spawn::Spawn;
use crate::view::ComponentSource;

/// What started a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationTrigger {
	/// First navigation after [`Router::start`]; the URL is already in place.
	Initial,
	/// [`Router::push`]; adds a history entry on commit.
	Push,
	/// [`Router::replace`]; replaces the history entry on commit.
	Replace,
	/// The URL changed outside the router (back/forward, address bar).
	Pop,
}

/// How a navigation ended when it did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
	/// The target became the current route.
	Committed,
	/// A guard cancelled the transition.
	Cancelled,
	/// A newer navigation started before this one finished.
	Superseded,
	/// The target is already the current route; nothing ran.
	Duplicated,
}

/// The controller's two-state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterStatus {
	/// A committed route is current and no transition is pending.
	Idle,
	/// A transition is being evaluated.
	Navigating,
}

/// Hook run after every committed navigation, with `(to, from)`.
pub type AfterEachHook = Rc<dyn Fn(&Route, &Route)>;

/// Listener notified with the new current route.
pub type RouteListener = Rc<dyn Fn(&Route)>;

enum Verdict {
	Approve,
	Cancel,
	Redirect(Location),
	Failed(GuardError),
	Stale,
}

struct RouterInner {
	options: RouterOptions,
	matcher: RouteMatcher,
	routes: Vec<Rc<CompiledRoute>>,
	history: Rc<dyn History>,
	spawner: Option<Rc<dyn Spawn>>,
	current: RefCell<Route>,
	committed: Cell<bool>,
	token: Cell<u64>,
	pending: Cell<Option<u64>>,
	muted: Cell<bool>,
	before_each: Registry<Rc<dyn NavigationGuard>>,
	after_each: Registry<AfterEachHook>,
	subscribers: Registry<RouteListener>,
	history_listener: RefCell<Option<ListenerGuard>>,
}

/// Client-side router handle.
///
/// Cheap to clone; clones share the same state. Components receive it
/// through [`RouteProps`](crate::RouteProps) rather than a global.
#[derive(Clone)]
pub struct Router {
	inner: Rc<RouterInner>,
}

impl std::fmt::Debug for Router {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Router")
			.field("mode", &self.inner.options.mode)
			.field("routes", &self.inner.routes.len())
			.field("current", &self.inner.current.borrow().full_path)
			.field("status", &self.status())
			.field("before_each", &self.inner.before_each.len())
			.field("subscribers", &self.inner.subscribers.len())
			.finish()
	}
}

/// Non-owning handle to a [`Router`].
#[derive(Clone, Debug)]
pub struct WeakRouter {
	inner: Weak<RouterInner>,
}

impl WeakRouter {
	/// Returns the router if it is still alive.
	pub fn upgrade(&self) -> Option<Router> {
		self.inner.upgrade().map(|inner| Router { inner })
	}
}

/// Builder for [`Router`].
pub struct RouterBuilder {
	options: RouterOptions,
	routes: Vec<RouteDefinition>,
	history: Option<Rc<dyn History>>,
	spawner: Option<Rc<dyn Spawn>>,
	before_each: Vec<Rc<dyn NavigationGuard>>,
	after_each: Vec<AfterEachHook>,
}

impl std::fmt::Debug for RouterBuilder {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouterBuilder")
			.field("options", &self.options)
			.field("routes", &self.routes.len())
			.field("has_history", &self.history.is_some())
			.field("has_spawner", &self.spawner.is_some())
			.finish()
	}
}

struct PendingRoute {
	id: RouteId,
	path: String,
	meta: Meta,
	redirect: Option<Location>,
	before_enter: Option<Rc<dyn NavigationGuard>>,
	source: Option<ComponentSource>,
}

fn register(
	definition: RouteDefinition,
	parent: Option<RouteId>,
	matcher: &mut MatcherBuilder,
	pending: &mut Vec<PendingRoute>,
) -> Result<(), RouterError> {
	let RouteDefinition {
		path,
		source,
		children,
		meta,
		before_enter,
		redirect,
		name,
	} = definition;

	let id = matcher.add(parent, &path, name.as_deref())?;
	if source.is_none() && redirect.is_none() {
		return Err(RouterError::MissingComponent { path });
	}
	pending.push(PendingRoute {
		id,
		path,
		meta,
		redirect,
		before_enter,
		source,
	});

	for child in children {
		register(child, Some(id), matcher, pending)?;
	}
	Ok(())
}

/// Normalized path, sorted query and hash, as stored in `Route::full_path`.
fn canonical_full_path(full_path: &str) -> String {
	let parts = split_full_path(full_path);
	let path = normalize_path(parts.path);
	let query = parse_query(parts.query);
	compose_full_path(&path, &query.to_query_string(), parts.hash)
}

#[cfg(target_arch = "wasm32")]
fn default_history(options: &RouterOptions) -> Result<Rc<dyn History>, RouterError> {
	let env = Rc::new(waymark_history::WebEnv::new()?);
	Ok(create_history(options.mode, &options.base, env)?)
}

#[cfg(not(target_arch = "wasm32"))]
fn default_history(options: &RouterOptions) -> Result<Rc<dyn History>, RouterError> {
	let env = Rc::new(waymark_history::MemoryEnv::new());
	Ok(create_history(options.mode, &options.base, env)?)
}

#[cfg(target_arch = "wasm32")]
fn default_spawner() -> Option<Rc<dyn Spawn>> {
	Some(Rc::new(crate::spawn::WasmSpawner))
}

#[cfg(not(target_arch = "wasm32"))]
fn default_spawner() -> Option<Rc<dyn Spawn>> {
	None
}

impl RouterBuilder {
	fn new() -> Self {
		Self {
			options: RouterOptions::default(),
			routes: Vec::new(),
			history: None,
			spawner: None,
			before_each: Vec::new(),
			after_each: Vec::new(),
		}
	}

	/// Sets the options.
	pub fn options(mut self, options: RouterOptions) -> Self {
		self.options = options;
		self
	}

	/// Appends a top-level route definition.
	pub fn route(mut self, definition: RouteDefinition) -> Self {
		self.routes.push(definition);
		self
	}

	/// Appends several top-level route definitions.
	pub fn routes(mut self, definitions: impl IntoIterator<Item = RouteDefinition>) -> Self {
		self.routes.extend(definitions);
		self
	}

	/// Uses an existing history adapter instead of creating one from the
	/// options.
	pub fn history(mut self, history: Rc<dyn History>) -> Self {
		self.history = Some(history);
		self
	}

	/// Sets the executor for history-driven and link-driven navigations.
	pub fn spawner(mut self, spawner: impl Spawn + 'static) -> Self {
		self.spawner = Some(Rc::new(spawner));
		self
	}

	/// Registers a global guard at construction.
	pub fn before_each(mut self, guard: impl NavigationGuard + 'static) -> Self {
		self.before_each.push(Rc::new(guard));
		self
	}

	/// Registers an after-each hook at construction.
	pub fn after_each(mut self, hook: impl Fn(&Route, &Route) + 'static) -> Self {
		self.after_each.push(Rc::new(hook));
		self
	}

	/// Compiles the route table and creates the router.
	///
	/// # Errors
	///
	/// Returns [`RouterError`] for invalid options, invalid patterns,
	/// duplicate names, definitions without component or redirect, or a
	/// history adapter that cannot be created.
	pub fn build(self) -> Result<Router, RouterError> {
		self.options.validate()?;

		let mut matcher = RouteMatcher::builder();
		let mut pending = Vec::new();
		for definition in self.routes {
			register(definition, None, &mut matcher, &mut pending)?;
		}
		let matcher = matcher.build();

		let routes = pending
			.into_iter()
			.filter_map(|route| {
				let entry = matcher.get(route.id)?;
				Some(Rc::new(CompiledRoute {
					id: route.id,
					parent: entry.parent(),
					depth: entry.depth(),
					path: route.path,
					full_path: entry.full_path().to_string(),
					name: entry.name().map(str::to_string),
					meta: route.meta,
					redirect: route.redirect,
					before_enter: route.before_enter,
					source: route.source,
					resolved: RefCell::new(None),
				}))
			})
			.collect::<Vec<_>>();

		let history = match self.history {
			Some(history) => history,
			None => default_history(&self.options)?,
		};

		let before_each = Registry::new();
		for guard in self.before_each {
			// Construction-time guards live as long as the router
			let _ = before_each.add(guard);
		}
		let after_each = Registry::new();
		for hook in self.after_each {
			let _ = after_each.add(hook);
		}

		tracing::debug!(
			routes = routes.len(),
			mode = %self.options.mode,
			"router built"
		);

		Ok(Router {
			inner: Rc::new(RouterInner {
				options: self.options,
				matcher,
				routes,
				history,
				spawner: self.spawner.or_else(default_spawner),
				current: RefCell::new(Route::unmatched("/")),
				committed: Cell::new(false),
				token: Cell::new(0),
				pending: Cell::new(None),
				muted: Cell::new(false),
				before_each,
				after_each,
				subscribers: Registry::new(),
				history_listener: RefCell::new(None),
			}),
		})
	}
}

impl Router {
	/// Starts building a router.
	pub fn builder() -> RouterBuilder {
		RouterBuilder::new()
	}

	/// Returns the options.
	pub fn options(&self) -> &RouterOptions {
		&self.inner.options
	}

	/// Returns the history adapter.
	pub fn history(&self) -> &Rc<dyn History> {
		&self.inner.history
	}

	/// Returns every compiled route, in definition order (depth-first).
	pub fn routes(&self) -> &[Rc<CompiledRoute>] {
		&self.inner.routes
	}

	/// Returns a non-owning handle.
	pub fn downgrade(&self) -> WeakRouter {
		WeakRouter {
			inner: Rc::downgrade(&self.inner),
		}
	}

	/// Returns whether two handles point to the same router.
	pub fn ptr_eq(&self, other: &Router) -> bool {
		Rc::ptr_eq(&self.inner, &other.inner)
	}

	/// Returns the current route.
	pub fn current_route(&self) -> Route {
		self.inner.current.borrow().clone()
	}

	/// Returns the definition matched at `depth` in the current route.
	pub fn matched_at(&self, depth: usize) -> Option<Rc<CompiledRoute>> {
		self.inner.current.borrow().matched.get(depth).cloned()
	}

	/// Returns whether a transition is pending.
	pub fn status(&self) -> RouterStatus {
		if self.inner.pending.get().is_some() {
			RouterStatus::Navigating
		} else {
			RouterStatus::Idle
		}
	}

	/// Registers a global guard. Guards run in registration order, after
	/// the matched leaf's `before_enter`.
	pub fn before_each(&self, guard: impl NavigationGuard + 'static) -> Registration {
		self.inner.before_each.add(Rc::new(guard))
	}

	/// Registers a hook run after every committed navigation.
	pub fn after_each(&self, hook: impl Fn(&Route, &Route) + 'static) -> Registration {
		self.inner.after_each.add(Rc::new(hook))
	}

	/// Registers a listener notified with each newly committed route.
	pub fn subscribe(&self, listener: impl Fn(&Route) + 'static) -> Registration {
		self.inner.subscribers.add(Rc::new(listener))
	}

	/// Resolves a location into a route without navigating.
	pub fn resolve(&self, to: impl Into<Location>) -> Result<Route, NavigationError> {
		let full_path = self.location_to_full_path(&to.into(), None)?;
		Ok(self.resolve_full_path(&full_path))
	}

	/// Builds the path of a named route.
	pub fn reverse<I, K, V>(&self, name: &str, params: I) -> Result<String, ReverseError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: Into<String>,
		V: Into<String>,
	{
		self.inner.matcher.reverse(name, &params.into_iter().collect())
	}

	/// Returns the `href` an anchor needs to reach `to` in the current mode.
	pub fn href(&self, to: impl Into<Location>) -> Result<String, NavigationError> {
		let full_path = self.location_to_full_path(&to.into(), None)?;
		Ok(self.inner.history.create_href(&full_path))
	}

	/// Subscribes to history changes and navigates to the URL currently
	/// shown by the browser.
	pub async fn start(&self) -> Result<NavigationOutcome, NavigationError> {
		if self.inner.history_listener.borrow().is_none() {
			let weak = self.downgrade();
			let guard = self.inner.history.listen(Rc::new(move |path: &str| {
				if let Some(router) = weak.upgrade() {
					router.on_history_change(path);
				}
			}))?;
			*self.inner.history_listener.borrow_mut() = Some(guard);
		}
		let path = self.inner.history.current_path()?;
		tracing::debug!(%path, "router starting");
		self.navigate(Location::from(path), NavigationTrigger::Initial).await
	}

	/// Stops observing history changes.
	pub fn stop(&self) {
		if let Some(guard) = self.inner.history_listener.borrow_mut().take() {
			guard.unlisten();
		}
	}

	/// Navigates to `to`, adding a history entry on commit.
	pub async fn push(&self, to: impl Into<Location>) -> Result<NavigationOutcome, NavigationError> {
		self.navigate(to.into(), NavigationTrigger::Push).await
	}

	/// Navigates to `to`, replacing the current history entry on commit.
	pub async fn replace(
		&self,
		to: impl Into<Location>,
	) -> Result<NavigationOutcome, NavigationError> {
		self.navigate(to.into(), NavigationTrigger::Replace).await
	}

	/// Moves through history. The resulting navigation runs when the
	/// browser reports the URL change.
	pub fn go(&self, delta: i32) -> Result<(), NavigationError> {
		Ok(self.inner.history.go(delta)?)
	}

	/// Equivalent to `go(-1)`.
	pub fn back(&self) -> Result<(), NavigationError> {
		self.go(-1)
	}

	/// Equivalent to `go(1)`.
	pub fn forward(&self) -> Result<(), NavigationError> {
		self.go(1)
	}

	/// Runs `push` (or `replace`) on the configured spawner.
	///
	/// Returns `false` when no spawner is configured.
	pub fn spawn_navigation(&self, to: Location, replace: bool) -> bool {
		let Some(spawner) = self.inner.spawner.clone() else {
			tracing::warn!("no spawner configured; navigation dropped");
			return false;
		};
		let router = self.clone();
		spawner.spawn_local(
			async move {
				let result = if replace {
					router.replace(to).await
				} else {
					router.push(to).await
				};
				if let Err(error) = result {
					tracing::warn!(%error, "navigation failed");
				}
			}
			.boxed_local(),
		);
		true
	}

	fn on_history_change(&self, path: &str) {
		if self.inner.muted.get() {
			tracing::trace!(%path, "ignoring history notification caused by the router");
			return;
		}
		let Some(spawner) = self.inner.spawner.clone() else {
			tracing::warn!(%path, "no spawner configured; history change ignored");
			return;
		};
		let router = self.clone();
		let location = Location::from(path);
		spawner.spawn_local(
			async move {
				if let Err(error) = router.navigate(location, NavigationTrigger::Pop).await {
					tracing::warn!(%error, "history navigation failed");
				}
			}
			.boxed_local(),
		);
	}

	async fn navigate(
		&self,
		location: Location,
		trigger: NavigationTrigger,
	) -> Result<NavigationOutcome, NavigationError> {
		let from = self.current_route();

		// Repeated notifications must not take a token from a pending transition
		if trigger != NavigationTrigger::Initial && self.inner.committed.get() {
			let target = self.location_to_full_path(&location, None)?;
			if canonical_full_path(&target) == from.full_path {
				tracing::debug!(?trigger, to = %from.full_path, "already at target");
				return Ok(NavigationOutcome::Duplicated);
			}
		}

		let token = self.inner.token.get() + 1;
		self.inner.token.set(token);
		self.inner.pending.set(Some(token));

		let result = self.run_transition(location, trigger, &from, token).await;

		// A browser traversal already changed the URL; put it back
		let aborted = matches!(result, Ok(NavigationOutcome::Cancelled) | Err(_));
		if aborted && trigger == NavigationTrigger::Pop && !self.is_stale(token) {
			self.restore_url(&from);
		}
		if self.inner.pending.get() == Some(token) {
			self.inner.pending.set(None);
		}

		match &result {
			Ok(outcome) => tracing::debug!(?trigger, ?outcome, "navigation finished"),
			Err(error) => tracing::warn!(?trigger, %error, "navigation failed"),
		}
		result
	}

	async fn run_transition(
		&self,
		location: Location,
		trigger: NavigationTrigger,
		from: &Route,
		token: u64,
	) -> Result<NavigationOutcome, NavigationError> {
		let mut mode = trigger;
		let mut target = self.location_to_full_path(&location, None)?;
		let mut redirected_from: Option<String> = None;
		let mut hops = 0;

		loop {
			let mut to = self.resolve_full_path(&target);
			to.redirected_from = redirected_from.clone();
			tracing::debug!(to = %to.full_path, from = %from.full_path, ?mode, "transition started");

			// Redirected back to the current route
			if hops > 0 && self.inner.committed.get() && to.full_path == from.full_path {
				match trigger {
					NavigationTrigger::Push | NavigationTrigger::Replace => {
						return Ok(NavigationOutcome::Duplicated);
					}
					// The browser shows the popped URL; cancelling restores it
					NavigationTrigger::Pop => return Ok(NavigationOutcome::Cancelled),
					NavigationTrigger::Initial => {}
				}
			}

			if let Some(redirect) = to.leaf().and_then(|leaf| leaf.redirect.clone()) {
				let next = self.location_to_full_path(&redirect, Some(&to.params))?;
				self.count_hop(&mut hops, &next)?;
				tracing::debug!(from = %to.full_path, to = %next, "following route redirect");
				redirected_from.get_or_insert_with(|| to.full_path.clone());
				target = next;
				if matches!(mode, NavigationTrigger::Initial | NavigationTrigger::Pop) {
					mode = NavigationTrigger::Replace;
				}
				continue;
			}

			match self.run_guards(&to, from, token).await {
				Verdict::Approve => {}
				Verdict::Stale => return Ok(NavigationOutcome::Superseded),
				Verdict::Cancel => return Ok(NavigationOutcome::Cancelled),
				Verdict::Redirect(location) => {
					let next = self.location_to_full_path(&location, None)?;
					self.count_hop(&mut hops, &next)?;
					tracing::debug!(from = %to.full_path, to = %next, "guard redirected");
					redirected_from.get_or_insert_with(|| to.full_path.clone());
					target = next;
					mode = match mode {
						NavigationTrigger::Initial | NavigationTrigger::Replace => {
							NavigationTrigger::Replace
						}
						NavigationTrigger::Push | NavigationTrigger::Pop => NavigationTrigger::Push,
					};
					continue;
				}
				Verdict::Failed(source) => {
					if self.is_stale(token) {
						return Ok(NavigationOutcome::Superseded);
					}
					return Err(NavigationError::Guard {
						path: to.full_path.clone(),
						source,
					});
				}
			}

			for route in to.matched.iter() {
				let loaded = route.load().await;
				if self.is_stale(token) {
					return Ok(NavigationOutcome::Superseded);
				}
				loaded.map_err(|source| NavigationError::Loader {
					route: route.full_path.clone(),
					source,
				})?;
			}

			self.commit(to, from, mode)?;
			return Ok(NavigationOutcome::Committed);
		}
	}

	async fn run_guards(&self, to: &Route, from: &Route, token: u64) -> Verdict {
		let mut guards: Vec<(Option<u64>, Rc<dyn NavigationGuard>)> = Vec::new();
		if let Some(guard) = to.leaf().and_then(|leaf| leaf.before_enter.clone()) {
			guards.push((None, guard));
		}
		guards.extend(
			self.inner
				.before_each
				.snapshot()
				.into_iter()
				.map(|(id, guard)| (Some(id), guard)),
		);

		for (index, (id, guard)) in guards.into_iter().enumerate() {
			// Unregistered while an earlier guard was pending
			if id.is_some_and(|id| !self.inner.before_each.contains(id)) {
				continue;
			}
			let result = guard.check(to, from).await;
			if self.is_stale(token) {
				return Verdict::Stale;
			}
			tracing::debug!(guard = index, to = %to.full_path, ?result, "guard decided");
			match result {
				Ok(GuardDecision::Continue) => {}
				Ok(GuardDecision::Cancel) => return Verdict::Cancel,
				Ok(GuardDecision::Redirect(location)) => return Verdict::Redirect(location),
				Err(error) => {
					tracing::warn!(%error, to = %to.full_path, "guard failed");
					return Verdict::Failed(error);
				}
			}
		}
		Verdict::Approve
	}

	fn commit(
		&self,
		to: Route,
		from: &Route,
		mode: NavigationTrigger,
	) -> Result<(), NavigationError> {
		match mode {
			NavigationTrigger::Push => self.with_muted(|history| history.push(&to.full_path))?,
			NavigationTrigger::Replace => {
				self.with_muted(|history| history.replace(&to.full_path))?
			}
			NavigationTrigger::Initial => {
				// Normalization may have changed the URL the browser shows
				if self.inner.history.current_path()? != to.full_path {
					self.with_muted(|history| history.replace(&to.full_path))?;
				}
			}
			NavigationTrigger::Pop => {}
		}

		*self.inner.current.borrow_mut() = to.clone();
		self.inner.committed.set(true);
		tracing::info!(
			to = %to.full_path,
			from = %from.full_path,
			redirected_from = to.redirected_from.as_deref(),
			"navigation committed"
		);

		for (id, hook) in self.inner.after_each.snapshot() {
			if self.inner.after_each.contains(id) {
				hook(&to, from);
			}
		}
		for (id, listener) in self.inner.subscribers.snapshot() {
			if self.inner.subscribers.contains(id) {
				listener(&to);
			}
		}
		Ok(())
	}

	fn restore_url(&self, from: &Route) {
		tracing::debug!(to = %from.full_path, "restoring URL after aborted history navigation");
		if let Err(error) = self.with_muted(|history| history.replace(&from.full_path)) {
			tracing::warn!(%error, "failed to restore URL");
		}
	}

	fn with_muted<R>(&self, f: impl FnOnce(&dyn History) -> R) -> R {
		let previous = self.inner.muted.replace(true);
		let result = f(self.inner.history.as_ref());
		self.inner.muted.set(previous);
		result
	}

	fn is_stale(&self, token: u64) -> bool {
		self.inner.token.get() != token
	}

	fn count_hop(&self, hops: &mut u32, path: &str) -> Result<(), NavigationError> {
		*hops += 1;
		let limit = self.inner.options.max_redirects;
		if *hops > limit {
			tracing::warn!(limit, %path, "redirect limit exceeded");
			return Err(NavigationError::RedirectLimit {
				limit,
				path: path.to_string(),
			});
		}
		Ok(())
	}

	fn location_to_full_path(
		&self,
		location: &Location,
		inherited: Option<&Params>,
	) -> Result<String, NavigationError> {
		let path = match location.target() {
			LocationTarget::Path(path) => path.clone(),
			LocationTarget::Named { name, params } => {
				let mut merged = inherited.cloned().unwrap_or_default();
				for (key, value) in params.iter() {
					merged.insert(key, value);
				}
				self.inner.matcher.reverse(name, &merged)?
			}
		};
		Ok(compose_full_path(
			&path,
			&location.query().to_query_string(),
			location.hash(),
		))
	}

	fn resolve_full_path(&self, full_path: &str) -> Route {
		let parts = split_full_path(full_path);
		let path = normalize_path(parts.path);
		let query = parse_query(parts.query);
		let hash = parts.hash.to_string();
		let full_path = canonical_full_path(full_path);

		let (matched, params) = match self.inner.matcher.match_path(&path) {
			Some(found) => {
				let chain = self
					.inner
					.matcher
					.build_match_chain(found.route)
					.into_iter()
					.filter_map(|id| self.inner.routes.get(id.index()).cloned())
					.collect::<Vec<_>>();
				(chain, found.params)
			}
			None => (Vec::new(), Params::new()),
		};

		let mut meta = Meta::new();
		for route in &matched {
			for (key, value) in &route.meta {
				meta.insert(key.clone(), value.clone());
			}
		}

		Route {
			path,
			full_path,
			query,
			params,
			hash,
			meta,
			matched,
			redirected_from: None,
		}
	}
}
