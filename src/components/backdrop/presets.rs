//! Static look-and-motion presets for every (world, theme) pair.
//!
//! Lookups are total: [`World`] and [`ThemeName`] are closed enums and the
//! table below is matched exhaustively, so there is no failure path.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::color::Color;
use crate::error::BackdropError;

/// A decorative world bound to a page section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum World {
	#[default]
	Deep,
	Nebula,
	Lensing,
	Accretion,
}

impl World {
	pub const ALL: [World; 4] = [World::Deep, World::Nebula, World::Lensing, World::Accretion];

	/// Identifier used in `data-world` attributes.
	pub fn as_str(self) -> &'static str {
		match self {
			World::Deep => "deep",
			World::Nebula => "nebula",
			World::Lensing => "lensing",
			World::Accretion => "accretion",
		}
	}

	/// Human-readable name shown by the world indicator.
	pub fn label(self) -> &'static str {
		match self {
			World::Deep => "Deep Space",
			World::Nebula => "Nebula",
			World::Lensing => "Lensing",
			World::Accretion => "Accretion",
		}
	}
}

impl fmt::Display for World {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for World {
	type Err = BackdropError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		World::ALL
			.into_iter()
			.find(|w| w.as_str() == s.trim())
			.ok_or_else(|| BackdropError::UnknownWorld(s.to_string()))
	}
}

/// Light/dark visual mode, independent of the world.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
	#[default]
	Light,
	Dark,
}

impl ThemeName {
	pub fn as_str(self) -> &'static str {
		match self {
			ThemeName::Light => "light",
			ThemeName::Dark => "dark",
		}
	}

	pub fn toggled(self) -> Self {
		match self {
			ThemeName::Light => ThemeName::Dark,
			ThemeName::Dark => ThemeName::Light,
		}
	}

	/// Caption of the theme toggle button while this theme is active.
	pub fn toggle_label(self) -> &'static str {
		match self {
			ThemeName::Light => "White Cosmos",
			ThemeName::Dark => "Dark Space",
		}
	}
}

impl fmt::Display for ThemeName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ThemeName {
	type Err = BackdropError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim() {
			"light" => Ok(ThemeName::Light),
			"dark" => Ok(ThemeName::Dark),
			other => Err(BackdropError::UnknownTheme(other.to_string())),
		}
	}
}

/// Vertical background gradient.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BackgroundStyle {
	pub top: Color,
	pub bottom: Color,
}

/// Particle look and motion.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ParticleStyle {
	pub color: Color,
	/// Base opacity in `0.0..=1.0`.
	pub alpha: f64,
	/// `(min, max)` radius in CSS pixels.
	pub size: (f64, f64),
	/// Signed drift in pixels per second.
	pub speed: (f64, f64),
	/// Oscillation amplitude.
	pub wobble: f64,
	/// Twinkle frequency multiplier.
	pub twinkle: f64,
	/// Archetype selector: 0 star, 1 bubble, 2 dust. Values beyond the
	/// archetype range fall back to an even mix.
	pub mode: u8,
}

/// Glow colors used by the wisp and radial-glow layers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NebulaStyle {
	pub core: Color,
	pub outer: Color,
}

/// Complete parameter bundle for one (world, theme) pair.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WorldPreset {
	pub label: &'static str,
	pub background: BackgroundStyle,
	pub particle: ParticleStyle,
	pub nebula: NebulaStyle,
	/// Grid, arm, comet, pulse and ring color.
	pub accent: Color,
}

/// Returns the preset for `world` rendered in `theme`.
pub fn lookup(world: World, theme: ThemeName) -> &'static WorldPreset {
	match (theme, world) {
		(ThemeName::Light, World::Deep) => &LIGHT_DEEP,
		(ThemeName::Light, World::Nebula) => &LIGHT_NEBULA,
		(ThemeName::Light, World::Lensing) => &LIGHT_LENSING,
		(ThemeName::Light, World::Accretion) => &LIGHT_ACCRETION,
		(ThemeName::Dark, World::Deep) => &DARK_DEEP,
		(ThemeName::Dark, World::Nebula) => &DARK_NEBULA,
		(ThemeName::Dark, World::Lensing) => &DARK_LENSING,
		(ThemeName::Dark, World::Accretion) => &DARK_ACCRETION,
	}
}

const LIGHT_DEEP: WorldPreset = WorldPreset {
	label: "Deep Space",
	background: BackgroundStyle {
		top: Color::hex(0x0a0f18),
		bottom: Color::hex(0x0c1320),
	},
	particle: ParticleStyle {
		color: Color::hex(0xcfe6ff),
		alpha: 0.55,
		size: (0.6, 2.2),
		speed: (1.2, 0.8),
		wobble: 0.5,
		twinkle: 2.0,
		mode: 0,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x1c2940),
		outer: Color::hex(0x10192c),
	},
	accent: Color::hex(0x7bc8ff),
};

const LIGHT_NEBULA: WorldPreset = WorldPreset {
	label: "Nebula",
	background: BackgroundStyle {
		top: Color::hex(0x0a101c),
		bottom: Color::hex(0x0a1524),
	},
	particle: ParticleStyle {
		color: Color::hex(0xaee2ff),
		alpha: 0.42,
		size: (0.8, 2.6),
		speed: (0.6, -3.8),
		wobble: 1.1,
		twinkle: 0.6,
		mode: 1,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x1c3046),
		outer: Color::hex(0x0e1b2f),
	},
	accent: Color::hex(0x7fb2ff),
};

const LIGHT_LENSING: WorldPreset = WorldPreset {
	label: "Lensing",
	background: BackgroundStyle {
		top: Color::hex(0x0c1322),
		bottom: Color::hex(0x0b1222),
	},
	particle: ParticleStyle {
		color: Color::hex(0xbfd7ff),
		alpha: 0.38,
		size: (0.6, 2.0),
		speed: (1.6, 0.3),
		wobble: 0.7,
		twinkle: 0.4,
		mode: 2,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x1a243b),
		outer: Color::hex(0x0d162a),
	},
	accent: Color::hex(0x7ea8ff),
};

const LIGHT_ACCRETION: WorldPreset = WorldPreset {
	label: "Accretion",
	background: BackgroundStyle {
		top: Color::hex(0x0a0f1a),
		bottom: Color::hex(0x0a0f1d),
	},
	particle: ParticleStyle {
		color: Color::hex(0xcbe4ff),
		alpha: 0.45,
		size: (0.7, 2.4),
		speed: (1.4, 0.6),
		wobble: 0.6,
		twinkle: 1.3,
		mode: 3,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x1b2a40),
		outer: Color::hex(0x0e182b),
	},
	accent: Color::hex(0x9fd4ff),
};

const DARK_DEEP: WorldPreset = WorldPreset {
	label: "Deep Space",
	background: BackgroundStyle {
		top: Color::hex(0x050913),
		bottom: Color::hex(0x070c19),
	},
	particle: ParticleStyle {
		color: Color::hex(0xe6f0ff),
		alpha: 0.55,
		size: (0.7, 2.4),
		speed: (1.1, 0.7),
		wobble: 0.4,
		twinkle: 2.0,
		mode: 0,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x121e3a),
		outer: Color::hex(0x0a1226),
	},
	accent: Color::hex(0x7dcbff),
};

const DARK_NEBULA: WorldPreset = WorldPreset {
	label: "Nebula",
	background: BackgroundStyle {
		top: Color::hex(0x050a16),
		bottom: Color::hex(0x081021),
	},
	particle: ParticleStyle {
		color: Color::hex(0xb5d7ff),
		alpha: 0.42,
		size: (0.9, 2.6),
		speed: (0.5, -3.4),
		wobble: 1.0,
		twinkle: 0.5,
		mode: 1,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x121f36),
		outer: Color::hex(0x0a1327),
	},
	accent: Color::hex(0x7fb2ff),
};

const DARK_LENSING: WorldPreset = WorldPreset {
	label: "Lensing",
	background: BackgroundStyle {
		top: Color::hex(0x060b18),
		bottom: Color::hex(0x08101d),
	},
	particle: ParticleStyle {
		color: Color::hex(0xc7daff),
		alpha: 0.4,
		size: (0.7, 2.2),
		speed: (1.4, 0.3),
		wobble: 0.7,
		twinkle: 0.4,
		mode: 2,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x111c34),
		outer: Color::hex(0x0a1226),
	},
	accent: Color::hex(0x7ea8ff),
};

const DARK_ACCRETION: WorldPreset = WorldPreset {
	label: "Accretion",
	background: BackgroundStyle {
		top: Color::hex(0x040813),
		bottom: Color::hex(0x070b18),
	},
	particle: ParticleStyle {
		color: Color::hex(0xd7e8ff),
		alpha: 0.45,
		size: (0.8, 2.6),
		speed: (1.2, 0.6),
		wobble: 0.6,
		twinkle: 1.2,
		mode: 3,
	},
	nebula: NebulaStyle {
		core: Color::hex(0x13203a),
		outer: Color::hex(0x0a1226),
	},
	accent: Color::hex(0x9fd4ff),
};
