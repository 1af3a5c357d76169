//! Single-threaded task spawning.
//!
//! History notifications are synchronous callbacks; the router turns each one
//! into a transition future and hands it to a [`Spawn`] implementation.

use futures::future::LocalBoxFuture;

/// Runs `'static` futures on the current thread.
pub trait Spawn {
	/// Schedules `future` to run to completion.
	fn spawn_local(&self, future: LocalBoxFuture<'static, ()>);
}

impl Spawn for futures::executor::LocalSpawner {
	fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
		use futures::task::LocalSpawnExt;

		if let Err(error) = LocalSpawnExt::spawn_local(self, future) {
			tracing::warn!(%error, "executor rejected navigation task");
		}
	}
}

/// Spawner backed by `wasm_bindgen_futures::spawn_local`.
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Clone, Copy, Default)]
pub struct WasmSpawner;

#[cfg(target_arch = "wasm32")]
impl Spawn for WasmSpawner {
	fn spawn_local(&self, future: LocalBoxFuture<'static, ()>) {
		wasm_bindgen_futures::spawn_local(future);
	}
}
