//! Everything the backdrop consumes from the rest of the page.

use super::presets::{ThemeName, World};
use super::viewport::Viewport;

/// Explicit input port of the engine. The page writes it, the render loop
/// reads it; nothing flows back.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BackdropInputs {
	/// Section currently dominating the scroll position.
	pub world: World,
	pub theme: ThemeName,
	/// System or forced reduced-motion preference.
	pub reduced_motion: bool,
	pub viewport: Viewport,
}

impl BackdropInputs {
	/// True when a change from `self` to `next` needs a new preset target.
	pub fn retargets(&self, next: &BackdropInputs) -> bool {
		self.world != next.world || self.theme != next.theme
	}
}
