//! Crate-wide error type.
//!
//! The backdrop is decorative: every error ends up logged and swallowed by the
//! component, never surfaced to page code.

use thiserror::Error;

/// Everything that can go wrong while wiring the backdrop into the page.
#[derive(Debug, Error)]
pub enum BackdropError {
	/// `window` is not available (not running in a browser main thread).
	#[error("no window available")]
	NoWindow,
	/// The canvas refused to hand out a 2D drawing context.
	#[error("2d drawing context unavailable")]
	ContextUnavailable,
	/// The browser could not create an `IntersectionObserver`.
	#[error("intersection observer unavailable")]
	ObserverUnavailable,
	/// A `data-world` attribute named a world that has no preset.
	#[error("unknown world `{0}`")]
	UnknownWorld(String),
	/// A stored theme value was neither `light` nor `dark`.
	#[error("unknown theme `{0}`")]
	UnknownTheme(String),
	/// The JSON configuration could not be decoded.
	#[error("invalid backdrop config: {0}")]
	Config(#[from] serde_json::Error),
	/// The JSON configuration decoded but holds unusable values.
	#[error("invalid backdrop config: {0}")]
	InvalidConfig(&'static str),
}
