//! The render loop: blended scene state, pools and frame pacing.
//!
//! [`Backdrop`] owns everything that changes per frame and paints one frame
//! on demand. [`RenderLoop`] drives it from host ticks:
//!
//! ```text
//! Idle --start--> Scheduled --tick--> Rendering --> Scheduled --tick--> ...
//!                     \--stop--> Stopped
//! ```
//!
//! A tick only ever schedules the next one from inside itself, so exactly one
//! request is in flight at any time and re-entrancy cannot happen.

use fastrand::Rng;
use log::{debug, info, warn};

use super::ambience::{Ambience, wisp_count};
use super::clock::{FrameGate, TickSource, TickToken};
use super::config::BackdropConfig;
use super::inputs::BackdropInputs;
use super::particles::{ParticleField, particle_count_for};
use super::presets::lookup;
use super::render::{self, FrameInfo};
use super::scene::SceneState;
use super::surface::Surface;
use super::viewport::Viewport;

/// Largest channel difference at which a transition counts as finished.
const SETTLED_DISTANCE: f64 = 0.25;

/// What a single host tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
	/// Too soon after the previous executed frame; nothing was drawn.
	Skipped,
	/// A frame was painted after advancing the simulation by `dt` seconds.
	Painted { dt: f64 },
	/// The loop was not expecting a tick (stopped, or never started).
	Inactive,
}

/// Live engine state for one canvas.
pub struct Backdrop {
	config: BackdropConfig,
	inputs: BackdropInputs,
	current: SceneState,
	target: SceneState,
	field: ParticleField,
	ambience: Ambience,
	gate: FrameGate,
	rng: Rng,
	settled: bool,
}

impl Backdrop {
	/// Builds the engine already showing the preset for `inputs`, with its
	/// frame interval counting from `now_ms`.
	pub fn new(inputs: BackdropInputs, config: BackdropConfig, seed: u64, now_ms: f64) -> Self {
		let target = SceneState::from_preset(lookup(inputs.world, inputs.theme));
		let gate = FrameGate::new(config.target_fps, config.max_frame_dt, now_ms);
		let mut backdrop = Self {
			inputs,
			current: target,
			target,
			field: ParticleField::default(),
			ambience: Ambience::default(),
			gate,
			rng: Rng::with_seed(seed),
			settled: true,
			config,
		};
		let count = particle_count_for(&inputs.viewport, backdrop.reduced_motion());
		backdrop.reallocate(count, &inputs.viewport);
		backdrop
	}

	/// Effective reduced-motion flag.
	pub fn reduced_motion(&self) -> bool {
		self.inputs.reduced_motion || self.config.force_reduced_motion
	}

	/// Applies new page inputs. A world or theme change replaces the target
	/// wholesale; a viewport or particle count change reallocates the pools.
	///
	/// Switching reduced motion on discards live comets and pulses rather than
	/// freezing them, so none reappear mid-flight when motion resumes.
	pub fn set_inputs(&mut self, next: BackdropInputs) {
		if self.inputs.retargets(&next) {
			debug!("backdrop: retarget to {}/{}", next.world, next.theme);
			self.target = SceneState::from_preset(lookup(next.world, next.theme));
			self.settled = false;
		}

		let reduced = next.reduced_motion || self.config.force_reduced_motion;
		if reduced && !self.reduced_motion() {
			self.ambience.clear_transients();
		}

		let count = particle_count_for(&next.viewport, reduced);
		let viewport_changed = next.viewport != self.inputs.viewport;
		self.inputs = next;
		if viewport_changed || count != self.field.len() {
			self.reallocate(count, &next.viewport);
		}
	}

	fn reallocate(&mut self, count: usize, viewport: &Viewport) {
		let wisps = wisp_count(count);
		debug!(
			"backdrop: {count} particles, {wisps} wisps for {}x{} @{}x",
			viewport.width, viewport.height, viewport.dpr
		);
		self.field
			.reset(count, viewport.width, viewport.height, &mut self.rng);
		self.ambience
			.reset_wisps(wisps, viewport.width, viewport.height, &mut self.rng);
	}

	/// Runs one host tick at `now_ms`. Paints onto `surface` unless the frame
	/// gate rejects the tick.
	pub fn frame(&mut self, now_ms: f64, surface: &mut dyn Surface) -> TickOutcome {
		let Some(dt) = self.gate.admit(now_ms) else {
			return TickOutcome::Skipped;
		};

		self.current = self
			.current
			.blend(&self.target, dt, self.config.transition_seconds);
		if !self.settled && self.current.distance(&self.target) < SETTLED_DISTANCE {
			self.settled = true;
			debug!(
				"backdrop: settled on {}/{}",
				self.inputs.world, self.inputs.theme
			);
		}

		let reduced = self.reduced_motion();
		let viewport = self.inputs.viewport;
		let frame = FrameInfo {
			width: viewport.width,
			height: viewport.height,
			now_ms,
			reduced_motion: reduced,
			weights: self.current.weights(),
		};
		let state = &self.current;

		render::paint_background(surface, &frame, state);
		if self.config.ambience {
			render::paint_grid(surface, &frame, state);
			render::paint_wisps(surface, &frame, state, &self.ambience);
			if !reduced {
				render::paint_arms(surface, &frame, state);
			}
			render::paint_glows(surface, &frame, state);
		}

		self.field.advance(state, dt, now_ms, reduced);
		render::paint_particles(surface, &frame, state, &self.field);

		if self.config.ambience && !reduced {
			self.ambience
				.spawn(frame.weights.star, frame.width, frame.height, &mut self.rng);
			self.ambience.advance(dt, frame.width, frame.height);
			render::paint_comets(surface, state, &self.ambience);
			render::paint_pulses(surface, state, &self.ambience);
			render::paint_ring(surface, &frame, state);
		}

		render::finish(surface);
		TickOutcome::Painted { dt }
	}

	pub fn inputs(&self) -> &BackdropInputs {
		&self.inputs
	}

	/// Scene state being rendered.
	pub fn current(&self) -> &SceneState {
		&self.current
	}

	/// Scene state being blended towards.
	pub fn target(&self) -> &SceneState {
		&self.target
	}

	pub fn field(&self) -> &ParticleField {
		&self.field
	}

	pub fn ambience(&self) -> &Ambience {
		&self.ambience
	}
}

/// Where the loop is in its lifecycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopPhase {
	Idle,
	Scheduled(TickToken),
	Rendering,
	Stopped,
}

/// Drives a [`Backdrop`] from host ticks onto a surface.
pub struct RenderLoop<T: TickSource, S: Surface> {
	backdrop: Backdrop,
	ticks: T,
	surface: S,
	phase: LoopPhase,
}

impl<T: TickSource, S: Surface> RenderLoop<T, S> {
	pub fn new(backdrop: Backdrop, ticks: T, surface: S) -> Self {
		Self {
			backdrop,
			ticks,
			surface,
			phase: LoopPhase::Idle,
		}
	}

	/// Requests the first tick. No-op unless the loop is idle.
	pub fn start(&mut self) {
		if self.phase == LoopPhase::Idle {
			info!("backdrop: render loop started");
			self.schedule();
		}
	}

	/// Handles a host tick and schedules the next one.
	pub fn on_tick(&mut self, now_ms: f64) -> TickOutcome {
		if !matches!(self.phase, LoopPhase::Scheduled(_)) {
			return TickOutcome::Inactive;
		}
		self.phase = LoopPhase::Rendering;
		let outcome = self.backdrop.frame(now_ms, &mut self.surface);
		self.schedule();
		outcome
	}

	/// Cancels the pending tick. The loop cannot be restarted afterwards.
	pub fn stop(&mut self) {
		if let LoopPhase::Scheduled(token) = self.phase {
			self.ticks.cancel_tick(token);
		}
		if self.phase != LoopPhase::Stopped {
			debug!("backdrop: render loop stopped");
		}
		self.phase = LoopPhase::Stopped;
	}

	fn schedule(&mut self) {
		self.phase = match self.ticks.request_tick() {
			Some(token) => LoopPhase::Scheduled(token),
			None => {
				warn!("backdrop: host refused a frame request, stopping");
				LoopPhase::Stopped
			}
		};
	}

	pub fn phase(&self) -> LoopPhase {
		self.phase
	}

	pub fn backdrop(&self) -> &Backdrop {
		&self.backdrop
	}

	pub fn set_inputs(&mut self, inputs: BackdropInputs) {
		self.backdrop.set_inputs(inputs);
	}

	pub fn surface(&self) -> &S {
		&self.surface
	}

	pub fn ticks(&self) -> &T {
		&self.ticks
	}
}

impl<T: TickSource, S: Surface> Drop for RenderLoop<T, S> {
	fn drop(&mut self) {
		self.stop();
	}
}
