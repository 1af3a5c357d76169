//! Hash and History API adapters
//!
//! Re-exports waymark-history. On `wasm32` targets `WebEnv` binds the
//! adapters to `window`; elsewhere `MemoryEnv` stands in for the browser.

pub use waymark_history::*;
