//! Depth-indexed view arena.
//!
//! One [`ViewSlot`] per rendering depth, holding the component mounted for
//! `matched[depth]`. Nested routing is a linear chain, so the arena is a
//! vector indexed by depth: slot `i + 1` is always the child of slot `i`.
//!
//! Rendering a new route:
//!
//! 1. Find the first depth whose definition differs from the one mounted
//!    (compared by identity).
//! 2. Unmount every slot from the deepest up to that depth.
//! 3. Update the kept slots with the new props, top-down.
//! 4. Mount components for the remaining depths, top-down.

use std::rc::Rc;

use crate::error::ViewError;
use crate::router::{CompiledRoute, Route, Router};
use crate::view::{RouteComponent, RouteProps};

/// A mounted component at one depth.
pub struct ViewSlot {
	depth: usize,
	route: Rc<CompiledRoute>,
	component: Box<dyn RouteComponent>,
	generation: u64,
}

impl std::fmt::Debug for ViewSlot {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ViewSlot")
			.field("depth", &self.depth)
			.field("route", &self.route.full_path())
			.field("component", &self.component.name())
			.field("generation", &self.generation)
			.finish()
	}
}

impl ViewSlot {
	/// Returns the depth.
	pub fn depth(&self) -> usize {
		self.depth
	}

	/// Returns the definition this slot was mounted for.
	pub fn route(&self) -> &Rc<CompiledRoute> {
		&self.route
	}

	/// Returns the mounted component's name.
	pub fn component_name(&self) -> &'static str {
		self.component.name()
	}

	/// Returns the render pass that last mounted or updated this slot.
	pub fn generation(&self) -> u64 {
		self.generation
	}
}

/// What a render pass changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderSummary {
	/// Slots kept and updated in place.
	pub kept: usize,
	/// Slots torn down.
	pub unmounted: usize,
	/// Slots newly mounted.
	pub mounted: usize,
}

/// The arena of mounted route components.
#[derive(Debug, Default)]
pub struct ViewTree {
	slots: Vec<ViewSlot>,
	generation: u64,
}

impl ViewTree {
	/// Creates an empty tree.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the number of mounted depths.
	pub fn len(&self) -> usize {
		self.slots.len()
	}

	/// Returns `true` when nothing is mounted.
	pub fn is_empty(&self) -> bool {
		self.slots.is_empty()
	}

	/// Returns the slot at `depth`.
	pub fn slot(&self, depth: usize) -> Option<&ViewSlot> {
		self.slots.get(depth)
	}

	/// Iterates over slots, root first.
	pub fn slots(&self) -> impl Iterator<Item = &ViewSlot> {
		self.slots.iter()
	}

	/// Returns the number of completed render passes.
	pub fn generation(&self) -> u64 {
		self.generation
	}

	/// Brings the mounted chain in line with `route.matched`.
	///
	/// On error, the slots above the failing depth stay mounted and nothing
	/// at or below it is.
	pub fn render(&mut self, route: &Route, router: &Router) -> Result<RenderSummary, ViewError> {
		self.generation += 1;
		let generation = self.generation;
		let matched = route.matched();

		let divergence = self
			.slots
			.iter()
			.zip(matched)
			.take_while(|(slot, definition)| Rc::ptr_eq(&slot.route, definition))
			.count();

		let mut summary = RenderSummary {
			unmounted: self.truncate(divergence),
			..RenderSummary::default()
		};

		for slot in &mut self.slots {
			let props = RouteProps::new(route.clone(), router.clone(), slot.depth);
			slot.component.update(&props);
			slot.generation = generation;
			summary.kept += 1;
		}

		for (depth, definition) in matched.iter().enumerate().skip(divergence) {
			let factory = definition
				.component()
				.ok_or_else(|| ViewError::NotARouteComponent {
					path: definition.full_path().to_string(),
					depth,
				})?;
			let mut component = factory();
			let props = RouteProps::new(route.clone(), router.clone(), depth);
			if let Err(error) = component.mount(&props) {
				return Err(ViewError::Mount {
					component: component.name(),
					path: definition.full_path().to_string(),
					message: format!("{error:#}"),
				});
			}
			tracing::debug!(depth, route = %definition.full_path(), component = component.name(), "mounted");
			self.slots.push(ViewSlot {
				depth,
				route: definition.clone(),
				component,
				generation,
			});
			summary.mounted += 1;
		}

		Ok(summary)
	}

	/// Unmounts everything, deepest first.
	pub fn clear(&mut self) -> usize {
		self.truncate(0)
	}

	fn truncate(&mut self, depth: usize) -> usize {
		let mut unmounted = 0;
		while self.slots.len() > depth {
			let Some(mut slot) = self.slots.pop() else {
				break;
			};
			slot.component.unmount();
			tracing::debug!(depth = slot.depth, route = %slot.route.full_path(), "unmounted");
			unmounted += 1;
		}
		unmounted
	}
}
