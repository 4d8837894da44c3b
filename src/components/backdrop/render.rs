//! Per-layer painting for one backdrop frame.
//!
//! Layers are painted back to front:
//! 1. Vertical background gradient (normal blending)
//! 2. Ambience: drifting grid, glow wisps, spiral arms, radial glows (screen)
//! 3. Particle field
//! 4. Ambience: comets, pulses, rotating ring accent
//!
//! Every layer that changes blend mode or alpha either brackets itself with
//! `save`/`restore` or is followed by [`finish`], so nothing leaks into the
//! next frame.

use std::f64::consts::TAU;

use super::ambience::Ambience;
use super::particles::ParticleField;
use super::scene::{ArchetypeWeights, SceneState};
use super::surface::{Blend, ColorStop, Ellipse, Paint, Surface};

const GRID_SIZE: f64 = 120.0;
const ARM_COUNT: usize = 3;
const ARM_SEGMENTS: usize = 220;
const ARM_SWEEP: f64 = 5.2;
const GLOW_COUNT: usize = 3;
const COMET_TAIL: f64 = 140.0;

/// Frame-wide values every layer needs.
#[derive(Clone, Copy, Debug)]
pub struct FrameInfo {
	pub width: f64,
	pub height: f64,
	/// Host timestamp in milliseconds; drives every oscillation.
	pub now_ms: f64,
	pub reduced_motion: bool,
	pub weights: ArchetypeWeights,
}

impl FrameInfo {
	fn center(&self) -> (f64, f64) {
		(self.width * 0.5, self.height * 0.45)
	}
}

pub fn paint_background(surface: &mut dyn Surface, frame: &FrameInfo, state: &SceneState) {
	let stops = [
		ColorStop::opaque(0.0, state.bg_top),
		ColorStop::opaque(1.0, state.bg_bottom),
	];
	surface.set_blend(Blend::Normal);
	surface.set_alpha(1.0);
	surface.fill_rect(
		0.0,
		0.0,
		frame.width,
		frame.height,
		&Paint::Linear {
			from: (0.0, 0.0),
			to: (0.0, frame.height),
			stops: &stops,
		},
	);
}

pub fn paint_grid(surface: &mut dyn Surface, frame: &FrameInfo, state: &SceneState) {
	let paint = Paint::Solid(state.accent);
	let offset_x = (frame.now_ms * 0.003).rem_euclid(GRID_SIZE);
	let offset_y = (frame.now_ms * 0.002).rem_euclid(GRID_SIZE);

	surface.save();
	surface.set_blend(Blend::Screen);
	surface.set_alpha(if frame.reduced_motion { 0.04 } else { 0.08 });

	let mut x = -GRID_SIZE;
	while x <= frame.width + GRID_SIZE {
		let gx = x + offset_x;
		surface.stroke_polyline(&[(gx, 0.0), (gx, frame.height)], 1.0, &paint);
		x += GRID_SIZE;
	}
	let mut y = -GRID_SIZE;
	while y <= frame.height + GRID_SIZE {
		let gy = y + offset_y;
		surface.stroke_polyline(&[(0.0, gy), (frame.width, gy)], 1.0, &paint);
		y += GRID_SIZE;
	}

	surface.restore();
}

pub fn paint_wisps(
	surface: &mut dyn Surface,
	frame: &FrameInfo,
	state: &SceneState,
	ambience: &Ambience,
) {
	surface.save();
	surface.set_blend(Blend::Screen);
	surface.set_alpha(if frame.reduced_motion { 0.12 } else { 0.2 });

	for (index, wisp) in ambience.wisps().enumerate() {
		let (x, y, radius) = wisp.placement(index, frame.now_ms);
		let stops = [
			ColorStop::opaque(0.0, state.nebula_core),
			ColorStop::opaque(1.0, state.nebula_outer),
		];
		surface.fill_circle(
			x,
			y,
			radius,
			&Paint::Radial {
				center: (x, y),
				inner: radius * 0.2,
				outer: radius,
				stops: &stops,
			},
		);
	}

	surface.restore();
}

/// Spiral arms; motion only.
pub fn paint_arms(surface: &mut dyn Surface, frame: &FrameInfo, state: &SceneState) {
	let (cx, cy) = frame.center();
	let reach = frame.width.min(frame.height) * 0.6;
	let paint = Paint::Solid(state.accent);
	let mut points = Vec::with_capacity(ARM_SEGMENTS);

	surface.save();
	surface.set_blend(Blend::Screen);
	surface.set_alpha(0.12);

	for arm in 0..ARM_COUNT {
		let phase = TAU * arm as f64 / ARM_COUNT as f64 + frame.now_ms * 0.00005;
		points.clear();
		points.extend((0..ARM_SEGMENTS).map(|i| {
			let t = i as f64 / ARM_SEGMENTS as f64;
			let radius = t * reach;
			let angle = phase + t * ARM_SWEEP;
			(cx + angle.cos() * radius, cy + angle.sin() * radius * 0.6)
		}));
		surface.stroke_polyline(&points, 18.0, &paint);
	}

	surface.restore();
}

pub fn paint_glows(surface: &mut dyn Surface, frame: &FrameInfo, state: &SceneState) {
	let (cx, cy) = frame.center();
	let stops = [
		ColorStop::opaque(0.0, state.nebula_core),
		ColorStop::transparent(1.0),
	];

	surface.save();
	surface.set_blend(Blend::Screen);
	surface.set_alpha(if frame.reduced_motion { 0.08 } else { 0.16 });

	for i in 0..GLOW_COUNT {
		let offset = (frame.now_ms * 0.00003 + i as f64 * 1.4).rem_euclid(TAU);
		let x = cx + offset.cos() * frame.width * 0.18;
		let y = cy + (offset * 0.9).sin() * frame.height * 0.12;
		let radius = frame.width.min(frame.height) * (0.42 + i as f64 * 0.08);
		surface.fill_circle(
			x,
			y,
			radius,
			&Paint::Radial {
				center: (x, y),
				inner: radius * 0.15,
				outer: radius,
				stops: &stops,
			},
		);
	}

	surface.restore();
}

pub fn paint_particles(
	surface: &mut dyn Surface,
	frame: &FrameInfo,
	state: &SceneState,
	field: &ParticleField,
) {
	let paint = Paint::Solid(state.particle_color);
	for sprite in field.sprites(state, frame.weights, frame.now_ms) {
		surface.set_alpha(sprite.alpha);
		surface.fill_circle(sprite.x, sprite.y, sprite.radius, &paint);
	}
}

pub fn paint_comets(surface: &mut dyn Surface, state: &SceneState, ambience: &Ambience) {
	let stops = [
		ColorStop::opaque(0.0, state.accent),
		ColorStop::transparent(1.0),
	];
	for comet in ambience.comets() {
		let head = (comet.x, comet.y);
		let tail = (comet.x - COMET_TAIL, comet.y - COMET_TAIL * 0.6);
		surface.set_alpha(comet.life.max(0.0));
		surface.stroke_polyline(
			&[head, tail],
			2.2,
			&Paint::Linear {
				from: head,
				to: tail,
				stops: &stops,
			},
		);
	}
}

pub fn paint_pulses(surface: &mut dyn Surface, state: &SceneState, ambience: &Ambience) {
	let stops = [
		ColorStop::opaque(0.0, state.accent),
		ColorStop::transparent(1.0),
	];
	for pulse in ambience.pulses() {
		surface.set_alpha(0.25 * pulse.life.max(0.0));
		surface.fill_circle(
			pulse.x,
			pulse.y,
			pulse.radius,
			&Paint::Radial {
				center: (pulse.x, pulse.y),
				inner: 0.0,
				outer: pulse.radius,
				stops: &stops,
			},
		);
	}
}

/// Faint rotating elliptical ring, brighter while stars dominate.
pub fn paint_ring(surface: &mut dyn Surface, frame: &FrameInfo, state: &SceneState) {
	let (cx, cy) = frame.center();
	let stops = [
		ColorStop::transparent(0.0),
		ColorStop::opaque(0.4, state.accent),
		ColorStop::transparent(1.0),
	];
	surface.set_alpha(0.3 + frame.weights.star * 0.5);
	surface.set_blend(Blend::Screen);
	surface.fill_ellipse(
		&Ellipse {
			cx,
			cy,
			rx: frame.width * 0.55,
			ry: frame.width * 0.22,
			rotation: frame.now_ms * 0.00012,
		},
		&Paint::Radial {
			center: (cx, cy),
			inner: 30.0,
			outer: frame.width * 0.5,
			stops: &stops,
		},
	);
}

/// Restores normal blending and full opacity for whoever draws next.
pub fn finish(surface: &mut dyn Surface) {
	surface.set_blend(Blend::Normal);
	surface.set_alpha(1.0);
}

#[cfg(test)]
mod tests {
	use fastrand::Rng;

	use super::*;
	use crate::components::backdrop::presets::{ThemeName, World, lookup};
	use crate::components::backdrop::surface::recording::{Op, RecordingSurface};

	fn frame(width: f64, height: f64, reduced_motion: bool) -> FrameInfo {
		FrameInfo {
			width,
			height,
			now_ms: 5000.0,
			reduced_motion,
			weights: ArchetypeWeights::from_mode(0.0),
		}
	}

	fn state() -> SceneState {
		SceneState::from_preset(lookup(World::Deep, ThemeName::Dark))
	}

	#[test]
	fn grid_covers_canvas_with_margin() {
		let mut surface = RecordingSurface::default();
		paint_grid(&mut surface, &frame(480.0, 240.0, false), &state());
		// x: -120..=600 step 120 -> 7 lines; y: -120..=360 -> 5 lines.
		assert_eq!(surface.count(|op| matches!(op, Op::Stroke { .. })), 12);
		assert_eq!(surface.depth(), 0);
		assert_eq!(surface.blend, Blend::Normal);
	}

	#[test]
	fn glow_layers_use_screen_blending() {
		let mut surface = RecordingSurface::default();
		let mut rng = Rng::with_seed(5);
		let mut ambience = Ambience::default();
		ambience.reset_wisps(4, 800.0, 600.0, &mut rng);
		let f = frame(800.0, 600.0, false);

		paint_wisps(&mut surface, &f, &state(), &ambience);
		paint_arms(&mut surface, &f, &state());
		paint_glows(&mut surface, &f, &state());

		assert_eq!(surface.ops.len(), 4 + ARM_COUNT + GLOW_COUNT);
		for op in &surface.ops {
			match op {
				Op::FillCircle { blend, .. } | Op::Stroke { blend, .. } => {
					assert_eq!(*blend, Blend::Screen)
				}
				other => panic!("unexpected {other:?}"),
			}
		}
		assert_eq!(surface.blend, Blend::Normal);
		assert_eq!(surface.alpha, 1.0);
	}

	#[test]
	fn arms_are_polylines_of_fixed_resolution() {
		let mut surface = RecordingSurface::default();
		paint_arms(&mut surface, &frame(800.0, 600.0, false), &state());
		assert!(
			surface
				.ops
				.iter()
				.all(|op| matches!(op, Op::Stroke { points, .. } if *points == ARM_SEGMENTS))
		);
	}

	#[test]
	fn reduced_motion_dims_ambient_layers() {
		let mut calm = RecordingSurface::default();
		let mut rng = Rng::with_seed(5);
		let mut ambience = Ambience::default();
		ambience.reset_wisps(4, 800.0, 600.0, &mut rng);
		paint_wisps(&mut calm, &frame(800.0, 600.0, true), &state(), &ambience);
		assert!(calm.ops.iter().all(|op| matches!(op, Op::FillCircle { alpha, .. } if *alpha == 0.12)));
	}

	#[test]
	fn particles_paint_one_circle_each() {
		let mut surface = RecordingSurface::default();
		let mut rng = Rng::with_seed(11);
		let field = ParticleField::create(40, 800.0, 600.0, &mut rng);
		paint_particles(&mut surface, &frame(800.0, 600.0, false), &state(), &field);
		assert_eq!(surface.count(|op| matches!(op, Op::FillCircle { .. })), 40);
	}

	#[test]
	fn ring_alpha_tracks_star_weight() {
		let mut surface = RecordingSurface::default();
		paint_ring(&mut surface, &frame(800.0, 600.0, false), &state());
		let [Op::FillEllipse { alpha, blend }] = surface.ops.as_slice() else {
			panic!("expected a single ellipse, got {:?}", surface.ops);
		};
		assert!((alpha - 0.8).abs() < 1e-12);
		assert_eq!(*blend, Blend::Screen);
		finish(&mut surface);
		assert_eq!((surface.blend, surface.alpha), (Blend::Normal, 1.0));
	}
}
