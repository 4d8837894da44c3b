//! Continuously blended scene parameters.
//!
//! Two [`SceneState`] values exist at runtime: the *current* one that gets
//! rendered, and the *target* one built from the most recently selected preset.
//! Every executed frame moves current towards target with exponential
//! smoothing:
//!
//! ```text
//! factor = 1 - e^(-elapsed / tau)
//! value += (target - value) * factor
//! ```
//!
//! The factor depends only on wall-clock time, so convergence speed is the same
//! at any frame rate. Retargeting mid-transition simply continues from wherever
//! current sits.

use super::color::{Rgb, lerp};
use super::presets::WorldPreset;

/// Default time constant of the interpolator, in seconds.
pub const TRANSITION_SECONDS: f64 = 12.0;

/// Interpolation-ready counterpart of a [`WorldPreset`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneState {
	pub bg_top: Rgb,
	pub bg_bottom: Rgb,
	pub particle_color: Rgb,
	pub particle_alpha: f64,
	pub nebula_core: Rgb,
	pub nebula_outer: Rgb,
	pub accent: Rgb,
	pub size_min: f64,
	pub size_max: f64,
	pub speed_x: f64,
	pub speed_y: f64,
	pub wobble: f64,
	pub twinkle: f64,
	/// Archetype selector as a continuous value, fractional mid-transition.
	pub mode: f64,
}

impl SceneState {
	pub fn from_preset(preset: &WorldPreset) -> Self {
		Self {
			bg_top: preset.background.top.into(),
			bg_bottom: preset.background.bottom.into(),
			particle_color: preset.particle.color.into(),
			particle_alpha: preset.particle.alpha,
			nebula_core: preset.nebula.core.into(),
			nebula_outer: preset.nebula.outer.into(),
			accent: preset.accent.into(),
			size_min: preset.particle.size.0,
			size_max: preset.particle.size.1,
			speed_x: preset.particle.speed.0,
			speed_y: preset.particle.speed.1,
			wobble: preset.particle.wobble,
			twinkle: preset.particle.twinkle,
			mode: preset.particle.mode as f64,
		}
	}

	/// Moves every channel a fraction `t` of the way towards `target`.
	pub fn lerp(&self, target: &SceneState, t: f64) -> Self {
		Self {
			bg_top: self.bg_top.lerp(target.bg_top, t),
			bg_bottom: self.bg_bottom.lerp(target.bg_bottom, t),
			particle_color: self.particle_color.lerp(target.particle_color, t),
			particle_alpha: lerp(self.particle_alpha, target.particle_alpha, t),
			nebula_core: self.nebula_core.lerp(target.nebula_core, t),
			nebula_outer: self.nebula_outer.lerp(target.nebula_outer, t),
			accent: self.accent.lerp(target.accent, t),
			size_min: lerp(self.size_min, target.size_min, t),
			size_max: lerp(self.size_max, target.size_max, t),
			speed_x: lerp(self.speed_x, target.speed_x, t),
			speed_y: lerp(self.speed_y, target.speed_y, t),
			wobble: lerp(self.wobble, target.wobble, t),
			twinkle: lerp(self.twinkle, target.twinkle, t),
			mode: lerp(self.mode, target.mode, t),
		}
	}

	/// Advances the blend towards `target` by `elapsed` seconds with time constant `tau`.
	pub fn blend(&self, target: &SceneState, elapsed: f64, tau: f64) -> Self {
		self.lerp(target, blend_factor(elapsed, tau))
	}

	/// Every scalar channel, colors flattened, in a fixed order.
	pub fn channels(&self) -> [f64; 26] {
		let [a, b, c] = self.bg_top.channels();
		let [d, e, f] = self.bg_bottom.channels();
		let [g, h, i] = self.particle_color.channels();
		let [j, k, l] = self.nebula_core.channels();
		let [m, n, o] = self.nebula_outer.channels();
		let [p, q, r] = self.accent.channels();
		[
			a,
			b,
			c,
			d,
			e,
			f,
			g,
			h,
			i,
			j,
			k,
			l,
			m,
			n,
			o,
			p,
			q,
			r,
			self.particle_alpha,
			self.size_min,
			self.size_max,
			self.speed_x,
			self.speed_y,
			self.wobble,
			self.twinkle,
			self.mode,
		]
	}

	/// Largest per-channel difference to `other`.
	pub fn distance(&self, other: &SceneState) -> f64 {
		self.channels()
			.iter()
			.zip(other.channels().iter())
			.map(|(a, b)| (a - b).abs())
			.fold(0.0, f64::max)
	}

	pub fn weights(&self) -> ArchetypeWeights {
		ArchetypeWeights::from_mode(self.mode)
	}
}

/// Fraction of the remaining distance covered after `elapsed` seconds.
pub fn blend_factor(elapsed: f64, tau: f64) -> f64 {
	if elapsed <= 0.0 || tau <= 0.0 {
		return if tau <= 0.0 && elapsed > 0.0 { 1.0 } else { 0.0 };
	}
	1.0 - (-elapsed / tau).exp()
}

/// Normalized mix of the three particle archetypes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchetypeWeights {
	pub star: f64,
	pub bubble: f64,
	pub dust: f64,
}

impl ArchetypeWeights {
	/// Triangular kernel `max(0, 1 - |mode - i|)` per archetype, normalized to
	/// sum to one. Falls back to an even mix when every kernel is zero.
	pub fn from_mode(mode: f64) -> Self {
		let kernel = |i: f64| (1.0 - (mode - i).abs()).max(0.0);
		let (star, bubble, dust) = (kernel(0.0), kernel(1.0), kernel(2.0));
		let sum = star + bubble + dust;
		if !sum.is_finite() || sum <= 0.0 {
			return Self::uniform();
		}
		Self {
			star: star / sum,
			bubble: bubble / sum,
			dust: dust / sum,
		}
	}

	pub fn uniform() -> Self {
		Self {
			star: 1.0 / 3.0,
			bubble: 1.0 / 3.0,
			dust: 1.0 / 3.0,
		}
	}

	pub fn sum(&self) -> f64 {
		self.star + self.bubble + self.dust
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::components::backdrop::presets::{ThemeName, World, lookup};

	fn scene(world: World, theme: ThemeName) -> SceneState {
		SceneState::from_preset(lookup(world, theme))
	}

	#[test]
	fn blending_with_itself_is_a_fixed_point() {
		for world in World::ALL {
			let s = scene(world, ThemeName::Dark);
			for dt in [0.001, 0.033, 0.05, 1.0, 100.0] {
				let blended = s.blend(&s, dt, TRANSITION_SECONDS);
				assert!(blended.distance(&s) < 1e-12, "{world} dt={dt}");
			}
		}
	}

	#[test]
	fn repeated_blends_converge_monotonically() {
		let target = scene(World::Accretion, ThemeName::Dark);
		let mut current = scene(World::Nebula, ThemeName::Light);
		let mut previous: Vec<f64> = differences(&current, &target);

		for _ in 0..200 {
			current = current.blend(&target, 1.0 / 30.0, TRANSITION_SECONDS);
			let now = differences(&current, &target);
			for (i, (before, after)) in previous.iter().zip(now.iter()).enumerate() {
				if *before > 0.0 {
					assert!(after < before, "channel {i} did not shrink: {before} -> {after}");
				} else {
					assert_eq!(*after, 0.0);
				}
			}
			previous = now;
		}
	}

	fn differences(a: &SceneState, b: &SceneState) -> Vec<f64> {
		a.channels()
			.iter()
			.zip(b.channels().iter())
			.map(|(x, y)| (x - y).abs())
			.collect()
	}

	#[test]
	fn convergence_is_framerate_independent() {
		let target = scene(World::Lensing, ThemeName::Light);
		let start = scene(World::Deep, ThemeName::Dark);

		let mut fast = start;
		for _ in 0..60 {
			fast = fast.blend(&target, 1.0 / 60.0, TRANSITION_SECONDS);
		}
		let mut slow = start;
		for _ in 0..20 {
			slow = slow.blend(&target, 1.0 / 20.0, TRANSITION_SECONDS);
		}
		assert!(fast.distance(&slow) < 1e-9);
	}

	#[test]
	fn one_time_constant_covers_most_of_the_way() {
		let factor = blend_factor(TRANSITION_SECONDS, TRANSITION_SECONDS);
		assert!((factor - (1.0 - (-1.0f64).exp())).abs() < 1e-12);
		assert_eq!(blend_factor(0.0, TRANSITION_SECONDS), 0.0);
		assert_eq!(blend_factor(-1.0, TRANSITION_SECONDS), 0.0);
		assert_eq!(blend_factor(0.5, 0.0), 1.0);
	}

	#[test]
	fn retargeting_continues_from_current() {
		let a = scene(World::Deep, ThemeName::Light);
		let b = scene(World::Nebula, ThemeName::Light);
		let c = scene(World::Lensing, ThemeName::Light);
		let mid = a.blend(&b, 3.0, TRANSITION_SECONDS);
		let next = mid.blend(&c, 0.001, TRANSITION_SECONDS);
		assert!(next.distance(&mid) < 0.05);
	}

	#[test]
	fn weights_sum_to_one() {
		let mut mode = -3.0;
		while mode <= 6.0 {
			let w = ArchetypeWeights::from_mode(mode);
			assert!((w.sum() - 1.0).abs() < 1e-12, "mode {mode}");
			assert!(w.star >= 0.0 && w.bubble >= 0.0 && w.dust >= 0.0);
			mode += 0.05;
		}
		for mode in [f64::MAX, f64::MIN, 1e300] {
			assert!((ArchetypeWeights::from_mode(mode).sum() - 1.0).abs() < 1e-12);
		}
	}

	#[test]
	fn integer_modes_select_single_archetype() {
		assert_eq!(ArchetypeWeights::from_mode(0.0).star, 1.0);
		assert_eq!(ArchetypeWeights::from_mode(1.0).bubble, 1.0);
		assert_eq!(ArchetypeWeights::from_mode(2.0).dust, 1.0);
		assert_eq!(ArchetypeWeights::from_mode(3.0), ArchetypeWeights::uniform());
	}

	#[test]
	fn fractional_mode_mixes_neighbours() {
		let w = ArchetypeWeights::from_mode(0.25);
		assert!((w.star - 0.75).abs() < 1e-12);
		assert!((w.bubble - 0.25).abs() < 1e-12);
		assert_eq!(w.dust, 0.0);
	}
}
