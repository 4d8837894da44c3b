//! Viewport measurements that drive canvas resolution and particle density.

use web_sys::Window;

/// Widths below this count as a mobile viewport.
pub const MOBILE_BREAKPOINT: f64 = 768.0;

/// Device pixel ratios above this are clamped to keep fill-rate bounded.
pub const MAX_DEVICE_PIXEL_RATIO: f64 = 2.0;

/// Logical viewport size in CSS pixels plus the effective device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
	pub width: f64,
	pub height: f64,
	pub dpr: f64,
	pub is_mobile: bool,
}

impl Default for Viewport {
	fn default() -> Self {
		Self::new(1280.0, 800.0, 1.0)
	}
}

impl Viewport {
	/// Builds a viewport, capping `raw_dpr` at [`MAX_DEVICE_PIXEL_RATIO`] and
	/// treating missing or nonsensical ratios as 1.
	pub fn new(width: f64, height: f64, raw_dpr: f64) -> Self {
		let width = width.max(0.0);
		let dpr = if raw_dpr.is_finite() && raw_dpr > 0.0 {
			raw_dpr.min(MAX_DEVICE_PIXEL_RATIO)
		} else {
			1.0
		};
		Self {
			width,
			height: height.max(0.0),
			dpr,
			is_mobile: width < MOBILE_BREAKPOINT,
		}
	}

	/// Reads the current window size and pixel ratio.
	pub fn from_window(window: &Window) -> Option<Self> {
		let width = window.inner_width().ok()?.as_f64()?;
		let height = window.inner_height().ok()?.as_f64()?;
		Some(Self::new(width, height, window.device_pixel_ratio()))
	}

	/// Canvas backing-store size in device pixels.
	pub fn backing_size(&self) -> (u32, u32) {
		(
			(self.width * self.dpr).round() as u32,
			(self.height * self.dpr).round() as u32,
		)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn dpr_is_capped() {
		assert_eq!(Viewport::new(800.0, 600.0, 3.0).dpr, 2.0);
		assert_eq!(Viewport::new(800.0, 600.0, 1.5).dpr, 1.5);
		assert_eq!(Viewport::new(800.0, 600.0, 0.0).dpr, 1.0);
		assert_eq!(Viewport::new(800.0, 600.0, f64::NAN).dpr, 1.0);
	}

	#[test]
	fn mobile_breakpoint() {
		assert!(Viewport::new(767.0, 1000.0, 1.0).is_mobile);
		assert!(!Viewport::new(768.0, 1000.0, 1.0).is_mobile);
	}

	#[test]
	fn backing_store_scales_by_dpr() {
		assert_eq!(Viewport::new(1200.0, 800.0, 2.0).backing_size(), (2400, 1600));
		assert_eq!(Viewport::new(375.0, 667.0, 3.0).backing_size(), (750, 1334));
		assert_eq!(Viewport::new(100.5, 10.0, 1.0).backing_size(), (101, 10));
	}
}
