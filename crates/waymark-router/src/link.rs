//! Declarative navigation anchor.

use crate::error::NavigationError;
use crate::router::{Location, Router};

/// A link that navigates through the router instead of reloading the page.
///
/// # Example
///
/// ```ignore
/// let link = Link::new("/users/42", "View user").class("nav");
/// let state = link.resolve(&router)?;
/// assert_eq!(state.href, "#/users/42");
/// ```
#[derive(Debug, Clone)]
pub struct Link {
	to: Location,
	content: String,
	class: Option<String>,
	replace: bool,
	exact: bool,
	active_class: Option<String>,
	exact_active_class: Option<String>,
	attrs: Vec<(String, String)>,
}

/// A link resolved against the current route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkState {
	/// `href` for the anchor, in the router's history mode.
	pub href: String,
	/// Target path is a prefix of the current path (and its query is
	/// contained in the current query).
	pub active: bool,
	/// Target path equals the current path.
	pub exact_active: bool,
	/// Space-separated classes, including the active ones.
	pub class: String,
}

/// The parts of a click event that decide whether the router handles it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkClick {
	/// `MouseEvent.button`; 0 is the primary button.
	pub button: i16,
	/// Ctrl was held.
	pub ctrl_key: bool,
	/// Meta (cmd) was held.
	pub meta_key: bool,
	/// Shift was held.
	pub shift_key: bool,
	/// Alt was held.
	pub alt_key: bool,
	/// Another handler already called `preventDefault`.
	pub default_prevented: bool,
	/// The anchor's `target` attribute.
	pub target: Option<String>,
}

impl LinkClick {
	/// A plain primary-button click.
	pub fn primary() -> Self {
		Self::default()
	}

	/// Returns whether the router should take over this click. Modified
	/// clicks, secondary buttons, handled events and `target="_blank"` are
	/// left to the browser.
	pub fn should_navigate(&self) -> bool {
		if self.ctrl_key || self.meta_key || self.shift_key || self.alt_key {
			return false;
		}
		if self.default_prevented || self.button != 0 {
			return false;
		}
		!matches!(self.target.as_deref(), Some(target) if target.eq_ignore_ascii_case("_blank"))
	}
}

#[cfg(target_arch = "wasm32")]
impl From<&web_sys::MouseEvent> for LinkClick {
	fn from(event: &web_sys::MouseEvent) -> Self {
		use wasm_bindgen::JsCast;

		let target = event
			.current_target()
			.and_then(|target| target.dyn_into::<web_sys::Element>().ok())
			.and_then(|element| element.get_attribute("target"));
		Self {
			button: event.button(),
			ctrl_key: event.ctrl_key(),
			meta_key: event.meta_key(),
			shift_key: event.shift_key(),
			alt_key: event.alt_key(),
			default_prevented: event.default_prevented(),
			target,
		}
	}
}

impl Link {
	/// Creates a link to `to`.
	pub fn new(to: impl Into<Location>, content: impl Into<String>) -> Self {
		Self {
			to: to.into(),
			content: content.into(),
			class: None,
			replace: false,
			exact: false,
			active_class: None,
			exact_active_class: None,
			attrs: Vec::new(),
		}
	}

	/// Sets the base CSS class.
	pub fn class(mut self, class: impl Into<String>) -> Self {
		self.class = Some(class.into());
		self
	}

	/// Uses `replace` instead of `push`.
	pub fn replace(mut self, replace: bool) -> Self {
		self.replace = replace;
		self
	}

	/// Applies the active class only on an exact match.
	pub fn exact(mut self, exact: bool) -> Self {
		self.exact = exact;
		self
	}

	/// Overrides the router's active class.
	pub fn active_class(mut self, class: impl Into<String>) -> Self {
		self.active_class = Some(class.into());
		self
	}

	/// Overrides the router's exact-active class.
	pub fn exact_active_class(mut self, class: impl Into<String>) -> Self {
		self.exact_active_class = Some(class.into());
		self
	}

	/// Adds a custom attribute.
	pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.attrs.push((name.into(), value.into()));
		self
	}

	/// Returns the target.
	pub fn to(&self) -> &Location {
		&self.to
	}

	/// Returns the content.
	pub fn content(&self) -> &str {
		&self.content
	}

	/// Returns whether this link replaces the history entry.
	pub fn is_replace(&self) -> bool {
		self.replace
	}

	/// Resolves `href` and active state against the router's current route.
	pub fn resolve(&self, router: &Router) -> Result<LinkState, NavigationError> {
		let target = router.resolve(self.to.clone())?;
		let current = router.current_route();
		let href = router.history().create_href(target.full_path());

		let exact_active = current.path() == target.path();
		let active = exact_active || (is_path_prefix(target.path(), current.path())
			&& current.query().includes(target.query()));

		let options = router.options();
		let mut classes: Vec<&str> = self.class.iter().map(String::as_str).collect();
		if active && !self.exact {
			classes.push(self.active_class.as_deref().unwrap_or(&options.link_active_class));
		}
		if exact_active {
			if self.exact {
				classes.push(self.active_class.as_deref().unwrap_or(&options.link_active_class));
			}
			classes.push(
				self.exact_active_class
					.as_deref()
					.unwrap_or(&options.link_exact_active_class),
			);
		}

		Ok(LinkState {
			href,
			active,
			exact_active,
			class: classes.join(" "),
		})
	}

	/// Handles a click. Returns `true` when the router took over and the
	/// caller must call `preventDefault`.
	pub fn on_click(&self, router: &Router, click: &LinkClick) -> bool {
		if !click.should_navigate() {
			return false;
		}
		router.spawn_navigation(self.to.clone(), self.replace)
	}

	/// Renders the anchor as HTML.
	pub fn render_to_string(&self, router: &Router) -> Result<String, NavigationError> {
		let state = self.resolve(router)?;
		let mut html = format!("<a href=\"{}\"", escape_html(&state.href));
		if !state.class.is_empty() {
			html.push_str(&format!(" class=\"{}\"", escape_html(&state.class)));
		}
		if state.exact_active {
			html.push_str(" aria-current=\"page\"");
		}
		html.push_str(" data-link=\"true\"");
		if self.replace {
			html.push_str(" data-replace=\"true\"");
		}
		for (name, value) in &self.attrs {
			if !is_attribute_name(name) {
				tracing::warn!(%name, "skipping invalid attribute name");
				continue;
			}
			html.push_str(&format!(" {}=\"{}\"", name, escape_html(value)));
		}
		html.push('>');
		html.push_str(&escape_html(&self.content));
		html.push_str("</a>");
		Ok(html)
	}
}

/// Whether `prefix` equals `path` or is an ancestor of it on a segment
/// boundary. `/` is a prefix of every path.
fn is_path_prefix(prefix: &str, path: &str) -> bool {
	if prefix == "/" {
		return true;
	}
	match path.strip_prefix(prefix) {
		Some(rest) => rest.is_empty() || rest.starts_with('/'),
		None => false,
	}
}

/// ASCII letters, digits and `_ : . -`, not starting with a digit, `.` or `-`.
fn is_attribute_name(name: &str) -> bool {
	let mut chars = name.chars();
	chars
		.next()
		.is_some_and(|first| first.is_ascii_alphabetic() || first == '_' || first == ':')
		&& chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '.' | '-'))
}

fn escape_html(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());
	for c in value.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			'\'' => escaped.push_str("&#x27;"),
			_ => escaped.push(c),
		}
	}
	escaped
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	#[case("/", "/anything", true)]
	#[case("/users", "/users/1", true)]
	#[case("/users", "/users", true)]
	#[case("/users", "/users2", false)]
	#[case("/users/1", "/users", false)]
	fn test_is_path_prefix(#[case] prefix: &str, #[case] path: &str, #[case] expected: bool) {
		assert_eq!(is_path_prefix(prefix, path), expected);
	}

	#[rstest]
	#[case(LinkClick::primary(), true)]
	#[case(LinkClick { ctrl_key: true, ..LinkClick::default() }, false)]
	#[case(LinkClick { meta_key: true, ..LinkClick::default() }, false)]
	#[case(LinkClick { button: 1, ..LinkClick::default() }, false)]
	#[case(LinkClick { default_prevented: true, ..LinkClick::default() }, false)]
	#[case(LinkClick { target: Some("_blank".to_string()), ..LinkClick::default() }, false)]
	#[case(LinkClick { target: Some("_self".to_string()), ..LinkClick::default() }, true)]
	fn test_click_filtering(#[case] click: LinkClick, #[case] expected: bool) {
		assert_eq!(click.should_navigate(), expected);
	}

	#[rstest]
	#[case("title", true)]
	#[case("data-user-id", true)]
	#[case("xml:lang", true)]
	#[case("_x.y", true)]
	#[case("", false)]
	#[case("1st", false)]
	#[case("-x", false)]
	#[case("on click", false)]
	#[case("x\"><script>", false)]
	#[case("a=b", false)]
	fn test_is_attribute_name(#[case] name: &str, #[case] expected: bool) {
		assert_eq!(is_attribute_name(name), expected);
	}

	#[rstest]
	fn test_escape_html() {
		assert_eq!(escape_html("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
	}
}
