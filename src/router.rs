//! Navigation controller, guards, nested views and links
//!
//! Re-exports waymark-router.

pub use waymark_router::*;
