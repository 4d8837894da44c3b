//! Atmospheric extras layered around the particle field: slow glow wisps,
//! transient comets and expanding pulse rings.

use fastrand::Rng;

use super::color::lerp;
use super::pool::Pool;

/// Per-frame chance of spawning a comet while stars dominate.
pub const COMET_SPAWN_CHANCE: f64 = 0.015;
/// Per-frame chance of spawning a pulse while stars dominate.
pub const PULSE_SPAWN_CHANCE: f64 = 0.01;
/// Star weight above which comets and pulses may spawn.
pub const STAR_DOMINANCE: f64 = 0.4;

pub const COMET_CAPACITY: usize = 16;
pub const PULSE_CAPACITY: usize = 8;

/// Comets are culled once they travel this far past the right/bottom edge.
const COMET_EXIT_MARGIN: f64 = 200.0;
const COMET_DECAY: f64 = 0.6;
const PULSE_DECAY: f64 = 0.4;
const PULSE_GROWTH: f64 = 80.0;

/// One wisp per 18 particles, never fewer than four.
pub fn wisp_count(particle_count: usize) -> usize {
	(particle_count / 18).max(4)
}

/// Slow-drifting glow blob.
#[derive(Clone, Debug, PartialEq)]
pub struct Wisp {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub drift: f64,
	pub seed: f64,
}

impl Wisp {
	/// Center and radius at host time `now_ms`; `index` staggers the drift phase.
	pub fn placement(&self, index: usize, now_ms: f64) -> (f64, f64, f64) {
		let i = index as f64;
		let wobble = (now_ms * 0.00015 + self.seed).sin() * 18.0;
		let drift_x = (now_ms * 0.00008 + i).cos() * self.drift;
		let drift_y = (now_ms * 0.0001 + i).sin() * self.drift;
		let radius = self.radius + (now_ms * 0.0002 + self.seed).sin() * 20.0;
		(
			self.x + drift_x + wobble,
			self.y + drift_y - wobble * 0.3,
			radius,
		)
	}
}

/// Transient streak crossing the upper part of the canvas.
#[derive(Clone, Debug, PartialEq)]
pub struct Comet {
	pub x: f64,
	pub y: f64,
	pub vx: f64,
	pub vy: f64,
	pub life: f64,
}

/// Expanding, fading ring.
#[derive(Clone, Debug, PartialEq)]
pub struct Pulse {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub life: f64,
}

/// Owns every ambience primitive. Only the render loop touches it.
#[derive(Clone, Debug)]
pub struct Ambience {
	wisps: Pool<Wisp>,
	comets: Pool<Comet>,
	pulses: Pool<Pulse>,
}

impl Default for Ambience {
	fn default() -> Self {
		Self {
			wisps: Pool::default(),
			comets: Pool::with_capacity(COMET_CAPACITY),
			pulses: Pool::with_capacity(PULSE_CAPACITY),
		}
	}
}

impl Ambience {
	/// Reallocates the wisp pool for new canvas bounds.
	pub fn reset_wisps(&mut self, count: usize, width: f64, height: f64, rng: &mut Rng) {
		self.wisps.reset_with(count, || Wisp {
			x: rng.f64() * width,
			y: rng.f64() * height,
			radius: lerp(180.0, 420.0, rng.f64()),
			drift: lerp(0.5, 1.8, rng.f64()),
			seed: rng.f64() * 1000.0,
		});
	}

	/// Drops all comets and pulses.
	pub fn clear_transients(&mut self) {
		self.comets.clear();
		self.pulses.clear();
	}

	/// Rolls the per-frame spawn chances. Nothing spawns unless stars dominate
	/// the archetype mix; spawns into a full pool are dropped.
	pub fn spawn(&mut self, star_weight: f64, width: f64, height: f64, rng: &mut Rng) {
		if star_weight <= STAR_DOMINANCE {
			return;
		}
		if rng.f64() < COMET_SPAWN_CHANCE && !self.comets.is_full() {
			let _ = self.comets.insert(Comet {
				x: rng.f64() * width * 1.2 - width * 0.1,
				y: rng.f64() * height * 0.4,
				vx: lerp(120.0, 220.0, rng.f64()),
				vy: lerp(40.0, 120.0, rng.f64()),
				life: 1.0,
			});
		}
		if rng.f64() < PULSE_SPAWN_CHANCE && !self.pulses.is_full() {
			let _ = self.pulses.insert(Pulse {
				x: width * (0.3 + rng.f64() * 0.4),
				y: height * (0.2 + rng.f64() * 0.4),
				radius: lerp(80.0, 160.0, rng.f64()),
				life: 1.0,
			});
		}
	}

	/// Moves comets, grows pulses, decays both and culls the expired ones.
	pub fn advance(&mut self, dt: f64, width: f64, height: f64) {
		self.comets.retain(|c| {
			c.x += c.vx * dt;
			c.y += c.vy * dt;
			c.life -= dt * COMET_DECAY;
			c.life > 0.0 && c.x < width + COMET_EXIT_MARGIN && c.y < height + COMET_EXIT_MARGIN
		});
		self.pulses.retain(|p| {
			p.life -= dt * PULSE_DECAY;
			p.radius += dt * PULSE_GROWTH;
			p.life > 0.0
		});
	}

	pub fn wisps(&self) -> impl Iterator<Item = &Wisp> {
		self.wisps.iter()
	}

	pub fn comets(&self) -> impl Iterator<Item = &Comet> {
		self.comets.iter()
	}

	pub fn pulses(&self) -> impl Iterator<Item = &Pulse> {
		self.pulses.iter()
	}

	pub fn wisp_len(&self) -> usize {
		self.wisps.len()
	}

	pub fn comet_len(&self) -> usize {
		self.comets.len()
	}

	pub fn pulse_len(&self) -> usize {
		self.pulses.len()
	}

	#[cfg(test)]
	fn push_comet(&mut self, comet: Comet) {
		let _ = self.comets.insert(comet);
	}

	#[cfg(test)]
	fn push_pulse(&mut self, pulse: Pulse) {
		let _ = self.pulses.insert(pulse);
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn wisp_count_has_floor() {
		assert_eq!(wisp_count(0), 4);
		assert_eq!(wisp_count(53), 4);
		assert_eq!(wisp_count(115), 6);
		assert_eq!(wisp_count(180), 10);
	}

	#[test]
	fn wisps_are_recreated_wholesale() {
		let mut rng = Rng::with_seed(1);
		let mut ambience = Ambience::default();
		ambience.reset_wisps(6, 800.0, 600.0, &mut rng);
		assert_eq!(ambience.wisp_len(), 6);
		for w in ambience.wisps() {
			assert!((180.0..=420.0).contains(&w.radius));
			assert!((0.5..=1.8).contains(&w.drift));
		}
		ambience.reset_wisps(4, 800.0, 600.0, &mut rng);
		assert_eq!(ambience.wisp_len(), 4);
	}

	#[test]
	fn nothing_spawns_without_star_dominance() {
		let mut rng = Rng::with_seed(9);
		let mut ambience = Ambience::default();
		for _ in 0..10_000 {
			ambience.spawn(0.4, 800.0, 600.0, &mut rng);
		}
		assert_eq!(ambience.comet_len(), 0);
		assert_eq!(ambience.pulse_len(), 0);
	}

	#[test]
	fn spawning_is_bounded_by_capacity() {
		let mut rng = Rng::with_seed(9);
		let mut ambience = Ambience::default();
		for _ in 0..10_000 {
			ambience.spawn(1.0, 800.0, 600.0, &mut rng);
		}
		assert_eq!(ambience.comet_len(), COMET_CAPACITY);
		assert_eq!(ambience.pulse_len(), PULSE_CAPACITY);
		for c in ambience.comets() {
			assert!(c.x >= -80.0 && c.x < 880.0);
			assert!(c.y >= 0.0 && c.y < 240.0);
			assert_eq!(c.life, 1.0);
		}
	}

	#[test]
	fn comets_fade_and_expire() {
		let mut ambience = Ambience::default();
		ambience.push_comet(Comet {
			x: 0.0,
			y: 0.0,
			vx: 100.0,
			vy: 50.0,
			life: 1.0,
		});
		ambience.advance(0.05, 10_000.0, 10_000.0);
		let c = ambience.comets().next().unwrap();
		assert!((c.x - 5.0).abs() < 1e-12);
		assert!((c.y - 2.5).abs() < 1e-12);
		assert!((c.life - 0.97).abs() < 1e-12);

		// 1.0 life at 0.6/s lasts just under 34 frames of 0.05 s.
		for _ in 0..34 {
			ambience.advance(0.05, 10_000.0, 10_000.0);
		}
		assert_eq!(ambience.comet_len(), 0);
	}

	#[test]
	fn comets_leaving_the_canvas_are_culled() {
		let mut ambience = Ambience::default();
		ambience.push_comet(Comet {
			x: 999.0,
			y: 10.0,
			vx: 100.0,
			vy: 0.0,
			life: 1.0,
		});
		ambience.push_comet(Comet {
			x: 10.0,
			y: 799.0,
			vx: 0.0,
			vy: 100.0,
			life: 1.0,
		});
		ambience.advance(0.05, 800.0, 600.0);
		assert_eq!(ambience.comet_len(), 0);
	}

	#[test]
	fn pulses_grow_then_expire() {
		let mut ambience = Ambience::default();
		ambience.push_pulse(Pulse {
			x: 0.0,
			y: 0.0,
			radius: 100.0,
			life: 1.0,
		});
		ambience.advance(0.05, 800.0, 600.0);
		let p = ambience.pulses().next().unwrap();
		assert!((p.radius - 104.0).abs() < 1e-12);
		assert!((p.life - 0.98).abs() < 1e-12);
		for _ in 0..50 {
			ambience.advance(0.05, 800.0, 600.0);
		}
		assert_eq!(ambience.pulse_len(), 0);
	}

	#[test]
	fn clear_transients_keeps_wisps() {
		let mut rng = Rng::with_seed(2);
		let mut ambience = Ambience::default();
		ambience.reset_wisps(5, 100.0, 100.0, &mut rng);
		for _ in 0..1000 {
			ambience.spawn(1.0, 100.0, 100.0, &mut rng);
		}
		ambience.clear_transients();
		assert_eq!(ambience.comet_len() + ambience.pulse_len(), 0);
		assert_eq!(ambience.wisp_len(), 5);
	}

	#[test]
	fn wisp_placement_stays_near_anchor() {
		let w = Wisp {
			x: 100.0,
			y: 100.0,
			radius: 200.0,
			drift: 1.0,
			seed: 3.0,
		};
		for t in [0.0, 1000.0, 123_456.0] {
			let (x, y, r) = w.placement(2, t);
			assert!((x - 100.0).abs() <= 19.0 + 1e-9);
			assert!((y - 100.0).abs() <= 1.0 + 18.0 * 0.3 + 1e-9);
			assert!((r - 200.0).abs() <= 20.0 + 1e-9);
		}
	}

	#[test]
	fn full_pools_keep_their_entries() {
		let mut ambience = Ambience::default();
		for i in 0..COMET_CAPACITY {
			ambience.push_comet(Comet {
				x: i as f64,
				y: 0.0,
				vx: 0.0,
				vy: 0.0,
				life: 0.5,
			});
		}
		let before: Vec<_> = ambience.comets().cloned().collect();
		let mut rng = Rng::with_seed(5);
		for _ in 0..2_000 {
			ambience.spawn(1.0, 800.0, 600.0, &mut rng);
		}
		let after: Vec<_> = ambience.comets().cloned().collect();
		assert_eq!(before, after);
	}
}
