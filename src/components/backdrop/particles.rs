//! Drifting particle field.
//!
//! The pool is sized once per viewport and never thins out: particles that
//! drift past an edge re-enter from the opposite side (toroidal space). The
//! same pool reads as a starfield, rising bubbles or drifting dust depending
//! only on the blended archetype weights.

use fastrand::Rng;

use super::color::lerp;
use super::pool::Pool;
use super::scene::{ArchetypeWeights, SceneState};
use super::viewport::Viewport;

/// Distance past an edge before a particle wraps to the opposite side.
pub const EDGE_MARGIN: f64 = 20.0;

/// Canvas area (CSS px²) per particle.
const AREA_PER_PARTICLE: f64 = 18000.0;
const MIN_PARTICLES: usize = 40;
const MOBILE_SCALE: f64 = 0.6;
const REDUCED_MOTION_SCALE: f64 = 0.2;

/// Number of particles for a viewport:
/// `floor(max(40, floor(w*h / 18000)) * mobileScale * reducedMotionScale)`.
pub fn particle_count(width: f64, height: f64, is_mobile: bool, reduced_motion: bool) -> usize {
	let base = ((width * height / AREA_PER_PARTICLE).floor() as usize).max(MIN_PARTICLES);
	let mobile = if is_mobile { MOBILE_SCALE } else { 1.0 };
	let reduced = if reduced_motion { REDUCED_MOTION_SCALE } else { 1.0 };
	(base as f64 * mobile * reduced).floor() as usize
}

/// Shorthand for [`particle_count`] on a [`Viewport`].
pub fn particle_count_for(viewport: &Viewport, reduced_motion: bool) -> usize {
	particle_count(viewport.width, viewport.height, viewport.is_mobile, reduced_motion)
}

/// A single pooled particle.
#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
	pub x: f64,
	pub y: f64,
	/// Phase offset for wobble and twinkle, fixed at creation.
	pub seed: f64,
	/// Position inside the preset's size range, `0.0..=1.0`.
	pub size: f64,
	/// Parallax depth fraction, `0.0..=1.0`.
	pub layer: f64,
}

impl Particle {
	/// Parallax multiplier applied to speed, alpha and radius.
	pub fn depth(&self) -> f64 {
		0.4 + self.layer * 0.8
	}
}

/// A particle resolved to paintable values for one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sprite {
	pub x: f64,
	pub y: f64,
	pub radius: f64,
	pub alpha: f64,
}

/// Pool of particles spread over a `width × height` canvas.
#[derive(Clone, Debug, Default)]
pub struct ParticleField {
	pool: Pool<Particle>,
	width: f64,
	height: f64,
}

impl ParticleField {
	/// Scatters `count` particles uniformly over the canvas.
	pub fn create(count: usize, width: f64, height: f64, rng: &mut Rng) -> Self {
		let mut field = Self {
			pool: Pool::default(),
			width,
			height,
		};
		field.reset(count, width, height, rng);
		field
	}

	/// Reallocates the whole pool for new canvas bounds.
	pub fn reset(&mut self, count: usize, width: f64, height: f64, rng: &mut Rng) {
		self.width = width;
		self.height = height;
		self.pool.reset_with(count, || Particle {
			x: rng.f64() * width,
			y: rng.f64() * height,
			seed: rng.f64() * 1000.0,
			size: rng.f64(),
			layer: rng.f64(),
		});
	}

	/// Moves every particle by one frame of `dt` seconds at host time `now_ms`.
	///
	/// With `reduced_motion` positions are frozen, but the edge wrap still
	/// applies so nothing stays parked outside the canvas.
	pub fn advance(&mut self, state: &SceneState, dt: f64, now_ms: f64, reduced_motion: bool) {
		let (width, height) = self.bounds();
		for p in self.pool.iter_mut() {
			if !reduced_motion {
				let depth = p.depth();
				let wobble = (now_ms * 0.0008 + p.seed).sin() * state.wobble;
				p.x += state.speed_x * dt * depth + wobble * 0.3;
				p.y += state.speed_y * dt * depth + wobble * 0.2;
			}
			wrap(p, width, height);
		}
	}

	/// Resolves each particle's alpha and radius from the blended state.
	pub fn sprites<'a>(
		&'a self,
		state: &'a SceneState,
		weights: ArchetypeWeights,
		now_ms: f64,
	) -> impl Iterator<Item = Sprite> + 'a {
		self.pool.iter().map(move |p| sprite(p, state, weights, now_ms))
	}

	pub fn len(&self) -> usize {
		self.pool.len()
	}

	pub fn is_empty(&self) -> bool {
		self.pool.is_empty()
	}

	pub fn particles(&self) -> impl Iterator<Item = &Particle> {
		self.pool.iter()
	}

	pub fn particle_mut(&mut self, index: usize) -> Option<&mut Particle> {
		self.pool.get_mut(index)
	}

	pub fn bounds(&self) -> (f64, f64) {
		(self.width, self.height)
	}
}

fn wrap(p: &mut Particle, width: f64, height: f64) {
	if p.x > width + EDGE_MARGIN {
		p.x = -EDGE_MARGIN;
	}
	if p.x < -EDGE_MARGIN {
		p.x = width + EDGE_MARGIN;
	}
	if p.y > height + EDGE_MARGIN {
		p.y = -EDGE_MARGIN;
	}
	if p.y < -EDGE_MARGIN {
		p.y = height + EDGE_MARGIN;
	}
}

fn sprite(p: &Particle, state: &SceneState, w: ArchetypeWeights, now_ms: f64) -> Sprite {
	let depth = p.depth();
	let twinkle = 0.7 + 0.3 * (now_ms * 0.0012 * state.twinkle + p.seed).sin();
	let alpha = state.particle_alpha * depth * (w.star * twinkle + w.bubble * 0.7 + w.dust * 0.5);
	let radius = lerp(state.size_min, state.size_max, p.size)
		* depth
		* (w.star * 0.7 + w.bubble * 1.6 + w.dust * 0.4);
	Sprite {
		x: p.x,
		y: p.y,
		radius,
		alpha,
	}
}
