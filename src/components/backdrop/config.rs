//! Backdrop tuning, optionally supplied by the page as JSON.
//!
//! The page may embed
//!
//! ```html
//! <script id="backdrop-config" type="application/json">
//!   { "target_fps": 24, "ambience": false }
//! </script>
//! ```
//!
//! Missing fields keep their defaults.

use log::{info, warn};
use serde::Deserialize;
use wasm_bindgen::JsCast;
use web_sys::HtmlScriptElement;

use super::clock::{MAX_FRAME_DT, TARGET_FPS};
use super::scene::TRANSITION_SECONDS;
use crate::error::BackdropError;

/// Id of the optional JSON configuration element.
pub const CONFIG_ELEMENT_ID: &str = "backdrop-config";

/// Engine tuning knobs.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BackdropConfig {
	/// Upper bound on executed frames per second.
	pub target_fps: f64,
	/// Time constant of world/theme transitions, in seconds.
	pub transition_seconds: f64,
	/// Largest step, in seconds, a single frame may advance the simulation.
	pub max_frame_dt: f64,
	/// Paint the grid, wisp, arm, glow, comet, pulse and ring layers.
	pub ambience: bool,
	/// Treat the page as reduced-motion regardless of the system preference.
	pub force_reduced_motion: bool,
	/// Fixed RNG seed for reproducible particle layouts.
	pub seed: Option<u64>,
}

impl Default for BackdropConfig {
	fn default() -> Self {
		Self {
			target_fps: TARGET_FPS,
			transition_seconds: TRANSITION_SECONDS,
			max_frame_dt: MAX_FRAME_DT,
			ambience: true,
			force_reduced_motion: false,
			seed: None,
		}
	}
}

impl BackdropConfig {
	/// Parses and validates a JSON document.
	pub fn from_json(json: &str) -> Result<Self, BackdropError> {
		let config: Self = serde_json::from_str(json)?;
		config.validate()?;
		Ok(config)
	}

	pub fn validate(&self) -> Result<(), BackdropError> {
		if !(self.target_fps.is_finite() && self.target_fps > 0.0) {
			return Err(BackdropError::InvalidConfig("target_fps must be positive"));
		}
		if !(self.transition_seconds.is_finite() && self.transition_seconds > 0.0) {
			return Err(BackdropError::InvalidConfig("transition_seconds must be positive"));
		}
		if !(self.max_frame_dt.is_finite() && self.max_frame_dt > 0.0) {
			return Err(BackdropError::InvalidConfig("max_frame_dt must be positive"));
		}
		Ok(())
	}
}

/// Reads the configuration element from the current document, falling back to
/// defaults when it is absent or unusable.
pub fn load_config() -> BackdropConfig {
	let Some(json) = config_text() else {
		return BackdropConfig::default();
	};
	match BackdropConfig::from_json(&json) {
		Ok(config) => {
			info!("backdrop: loaded config {config:?}");
			config
		}
		Err(e) => {
			warn!("backdrop: ignoring config: {e}");
			BackdropConfig::default()
		}
	}
}

fn config_text() -> Option<String> {
	let document = web_sys::window()?.document()?;
	let element = document.get_element_by_id(CONFIG_ELEMENT_ID)?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	script.text().ok()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_object_is_default() {
		assert_eq!(BackdropConfig::from_json("{}").unwrap(), BackdropConfig::default());
	}

	#[test]
	fn defaults_match_engine_constants() {
		let config = BackdropConfig::default();
		assert_eq!(config.target_fps, 30.0);
		assert_eq!(config.transition_seconds, 12.0);
		assert_eq!(config.max_frame_dt, 0.05);
		assert!(config.ambience);
		assert!(!config.force_reduced_motion);
		assert_eq!(config.seed, None);
	}

	#[test]
	fn partial_override() {
		let config =
			BackdropConfig::from_json(r#"{ "target_fps": 24, "ambience": false, "seed": 7 }"#)
				.unwrap();
		assert_eq!(config.target_fps, 24.0);
		assert!(!config.ambience);
		assert_eq!(config.seed, Some(7));
		assert_eq!(config.transition_seconds, TRANSITION_SECONDS);
	}

	#[test]
	fn rejects_malformed_json() {
		assert!(matches!(
			BackdropConfig::from_json("{ target_fps: }"),
			Err(BackdropError::Config(_))
		));
		assert!(matches!(
			BackdropConfig::from_json(r#"{ "fps": 30 }"#),
			Err(BackdropError::Config(_))
		));
	}

	#[test]
	fn rejects_non_positive_values() {
		for json in [
			r#"{ "target_fps": 0 }"#,
			r#"{ "transition_seconds": -1 }"#,
			r#"{ "max_frame_dt": 0 }"#,
		] {
			assert!(
				matches!(BackdropConfig::from_json(json), Err(BackdropError::InvalidConfig(_))),
				"{json}"
			);
		}
	}
}
