//! Color types for preset data and continuously blended scene state.
//!
//! Presets are authored as 8-bit [`Color`] values. Blending happens on [`Rgb`],
//! which keeps fractional channels so that slow transitions never stall on
//! integer rounding.

/// 8-bit RGB triple as authored in the preset table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Color {
	pub r: u8,
	pub g: u8,
	pub b: u8,
}

impl Color {
	pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
		Self { r, g, b }
	}

	/// Color from a `0xRRGGBB` literal.
	pub const fn hex(value: u32) -> Self {
		Self::rgb(
			((value >> 16) & 0xff) as u8,
			((value >> 8) & 0xff) as u8,
			(value & 0xff) as u8,
		)
	}

	/// `#rrggbb` notation.
	pub fn to_css(self) -> String {
		format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
	}

	/// Parses `#RRGGBB` notation.
	pub fn parse_hex(value: &str) -> Option<Self> {
		let digits = value.strip_prefix('#')?;
		if digits.len() != 6 {
			return None;
		}
		u32::from_str_radix(digits, 16).ok().map(Self::hex)
	}
}

/// Continuous RGB triple used by the interpolator. Channels stay in `0.0..=255.0`
/// as long as both endpoints of every blend do.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rgb {
	pub r: f64,
	pub g: f64,
	pub b: f64,
}

impl Rgb {
	pub const fn new(r: f64, g: f64, b: f64) -> Self {
		Self { r, g, b }
	}

	/// Unclamped linear interpolation towards `other`.
	pub fn lerp(self, other: Rgb, t: f64) -> Self {
		Self {
			r: lerp(self.r, other.r, t),
			g: lerp(self.g, other.g, t),
			b: lerp(self.b, other.b, t),
		}
	}

	pub fn channels(self) -> [f64; 3] {
		[self.r, self.g, self.b]
	}

	pub fn to_css(self) -> String {
		format!(
			"rgb({}, {}, {})",
			self.r.round(),
			self.g.round(),
			self.b.round()
		)
	}

	pub fn to_css_alpha(self, alpha: f64) -> String {
		format!(
			"rgba({}, {}, {}, {})",
			self.r.round(),
			self.g.round(),
			self.b.round(),
			alpha.clamp(0.0, 1.0)
		)
	}
}

impl From<Color> for Rgb {
	fn from(color: Color) -> Self {
		Self::new(color.r as f64, color.g as f64, color.b as f64)
	}
}

pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
	a + (b - a) * t
}
