//! Router options.
//!
//! Options can be built in code or loaded from a TOML document:
//!
//! ```
//! use waymark_router::RouterOptions;
//! use waymark_history::HistoryMode;
//!
//! let options = RouterOptions::from_toml_str(
//!     r#"
//!     mode = "history"
//!     base = "/app"
//!     "#,
//! )
//! .unwrap();
//!
//! assert_eq!(options.mode, HistoryMode::History);
//! assert_eq!(options.max_redirects, 32);
//! ```

use serde::{Deserialize, Serialize};
use waymark_history::HistoryMode;

use crate::error::ConfigError;

/// Default for [`RouterOptions::max_redirects`].
pub const DEFAULT_MAX_REDIRECTS: u32 = 32;

/// Default for [`RouterOptions::link_active_class`].
pub const DEFAULT_LINK_ACTIVE_CLASS: &str = "router-link-active";

/// Default for [`RouterOptions::link_exact_active_class`].
pub const DEFAULT_LINK_EXACT_ACTIVE_CLASS: &str = "router-link-exact-active";

/// Router configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RouterOptions {
	/// Where the route path lives in the URL.
	pub mode: HistoryMode,
	/// Deployment prefix stripped from `location.pathname` in history mode.
	pub base: String,
	/// Maximum number of consecutive redirects (route-level and guard)
	/// followed by one navigation.
	pub max_redirects: u32,
	/// Class applied by [`Link`](crate::Link) when its target is a prefix of
	/// the current path.
	pub link_active_class: String,
	/// Class applied by [`Link`](crate::Link) when its target is the
	/// current path.
	pub link_exact_active_class: String,
}

impl Default for RouterOptions {
	fn default() -> Self {
		Self {
			mode: HistoryMode::default(),
			base: String::new(),
			max_redirects: DEFAULT_MAX_REDIRECTS,
			link_active_class: DEFAULT_LINK_ACTIVE_CLASS.to_string(),
			link_exact_active_class: DEFAULT_LINK_EXACT_ACTIVE_CLASS.to_string(),
		}
	}
}

impl RouterOptions {
	/// Creates options with defaults.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses and validates options from TOML.
	pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
		let options: Self =
			toml::from_str(source).map_err(|e| ConfigError::Parse(e.to_string()))?;
		options.validate()?;
		Ok(options)
	}

	/// Sets the history mode.
	pub fn mode(mut self, mode: HistoryMode) -> Self {
		self.mode = mode;
		self
	}

	/// Sets the deployment base.
	pub fn base(mut self, base: impl Into<String>) -> Self {
		self.base = base.into();
		self
	}

	/// Sets the redirect hop limit.
	pub fn max_redirects(mut self, max_redirects: u32) -> Self {
		self.max_redirects = max_redirects;
		self
	}

	/// Sets the active link class.
	pub fn link_active_class(mut self, class: impl Into<String>) -> Self {
		self.link_active_class = class.into();
		self
	}

	/// Sets the exact-active link class.
	pub fn link_exact_active_class(mut self, class: impl Into<String>) -> Self {
		self.link_exact_active_class = class.into();
		self
	}

	/// Checks field domains.
	pub fn validate(&self) -> Result<(), ConfigError> {
		if self.max_redirects == 0 {
			return Err(ConfigError::InvalidValue {
				key: "max_redirects",
				message: "must be at least 1".to_string(),
			});
		}
		if !self.base.is_empty() && !self.base.starts_with('/') {
			return Err(ConfigError::InvalidValue {
				key: "base",
				message: format!("'{}' must start with '/'", self.base),
			});
		}
		Ok(())
	}
}
