//! Procedural cosmic backdrop.
//!
//! Paints a full-viewport canvas behind the page: a vertical gradient, a
//! parallax particle field and optional ambience layers (grid, wisps, spiral
//! arms, glows, comets, pulses, ring). The look of each section ("world") and
//! theme comes from a static preset table; the live scene blends towards the
//! active preset with exponential smoothing so world and theme changes fade
//! over several seconds instead of snapping.
//!
//! The engine itself ([`Backdrop`], [`RenderLoop`]) only sees an explicit
//! [`BackdropInputs`] value, a [`Surface`] to draw on and a [`TickSource`]
//! for frame callbacks. [`BackgroundCanvas`] binds those to the browser.
//!
//! # Example
//!
//! ```ignore
//! use grencape_site::components::backdrop::{BackgroundCanvas, ThemeName, World};
//!
//! view! {
//!     <BackgroundCanvas
//!         world=world_signal
//!         theme=theme_signal
//!         reduced_motion=false
//!         viewport=viewport_signal
//!     />
//! }
//! ```

pub mod ambience;
pub mod clock;
pub mod color;
mod component;
pub mod config;
pub mod engine;
pub mod inputs;
pub mod particles;
pub mod pool;
pub mod presets;
pub mod render;
pub mod scene;
pub mod surface;
pub mod viewport;

pub use clock::{AnimationFrames, FrameGate, TickSource, TickToken};
pub use component::BackgroundCanvas;
pub use config::{BackdropConfig, load_config};
pub use engine::{Backdrop, LoopPhase, RenderLoop, TickOutcome};
pub use inputs::BackdropInputs;
pub use particles::particle_count;
pub use presets::{ThemeName, World, WorldPreset, lookup};
pub use scene::{ArchetypeWeights, SceneState};
pub use surface::{CanvasSurface, Surface};
pub use viewport::Viewport;
