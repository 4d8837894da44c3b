//! Reactive hooks that turn browser state into backdrop inputs.
//!
//! Each hook registers its listeners on creation and removes them when the
//! owning reactive scope is cleaned up.

mod motion;
mod theme;
mod viewport;
mod world;

pub use motion::{REDUCED_MOTION_QUERY, use_prefers_reduced_motion};
pub use theme::{THEME_STORAGE_KEY, ThemeController, use_theme};
pub use viewport::use_viewport;
pub use world::{ROOT_MARGIN, THRESHOLDS, WORLD_ATTRIBUTE, pick_world, use_intersection_world};
