//! `web-sys` backed browser environment (WASM only).

use std::cell::{Cell, RefCell};
use std::collections::HashMap;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

use crate::env::{BrowserEnv, NativeEvent, NativeHandler, NativeListenerId};
use crate::error::HistoryError;

fn js_error(value: JsValue) -> HistoryError {
	HistoryError::Browser(
		value
			.as_string()
			.unwrap_or_else(|| format!("{:?}", value)),
	)
}

/// Browser environment over the real `window`.
pub struct WebEnv {
	window: web_sys::Window,
	closures: RefCell<HashMap<u64, (NativeEvent, Closure<dyn FnMut()>)>>,
	next_id: Cell<u64>,
}

impl std::fmt::Debug for WebEnv {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("WebEnv")
			.field("listeners", &self.closures.borrow().len())
			.finish()
	}
}

impl WebEnv {
	/// Binds to the global `window`.
	pub fn new() -> Result<Self, HistoryError> {
		let window = web_sys::window().ok_or(HistoryError::Unavailable("window"))?;
		Ok(Self {
			window,
			closures: RefCell::new(HashMap::new()),
			next_id: Cell::new(0),
		})
	}

	fn history(&self) -> Result<web_sys::History, HistoryError> {
		self.window.history().map_err(js_error)
	}
}

impl BrowserEnv for WebEnv {
	fn hash(&self) -> Result<String, HistoryError> {
		let hash = self.window.location().hash().map_err(js_error)?;
		Ok(hash.strip_prefix('#').unwrap_or(&hash).to_string())
	}

	fn set_hash(&self, hash: &str) -> Result<(), HistoryError> {
		self.window.location().set_hash(hash).map_err(js_error)
	}

	fn replace_hash(&self, hash: &str) -> Result<(), HistoryError> {
		let url = format!("#{}", hash);
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(&url))
			.map_err(js_error)
	}

	fn pathname(&self) -> Result<String, HistoryError> {
		self.window.location().pathname().map_err(js_error)
	}

	fn search(&self) -> Result<String, HistoryError> {
		self.window.location().search().map_err(js_error)
	}

	fn push_state(&self, url: &str) -> Result<(), HistoryError> {
		self.history()?
			.push_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(js_error)
	}

	fn replace_state(&self, url: &str) -> Result<(), HistoryError> {
		self.history()?
			.replace_state_with_url(&JsValue::NULL, "", Some(url))
			.map_err(js_error)
	}

	fn go(&self, delta: i32) -> Result<(), HistoryError> {
		self.history()?.go_with_delta(delta).map_err(js_error)
	}

	fn add_listener(
		&self,
		event: NativeEvent,
		handler: NativeHandler,
	) -> Result<NativeListenerId, HistoryError> {
		let closure = Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
		self.window
			.add_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
			.map_err(js_error)?;

		let id = self.next_id.get();
		self.next_id.set(id + 1);
		self.closures.borrow_mut().insert(id, (event, closure));
		Ok(NativeListenerId(id))
	}

	fn remove_listener(&self, id: NativeListenerId) {
		let Some((event, closure)) = self.closures.borrow_mut().remove(&id.0) else {
			return;
		};
		if let Err(error) = self
			.window
			.remove_event_listener_with_callback(event.as_str(), closure.as_ref().unchecked_ref())
		{
			tracing::warn!(error = ?error, event = event.as_str(), "failed to remove listener");
		}
	}
}
