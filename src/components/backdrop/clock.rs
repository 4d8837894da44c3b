//! Frame pacing and the host tick capability.
//!
//! The render loop never reads a clock on its own. The host hands it
//! timestamps through [`TickSource`] callbacks, and [`FrameGate`] decides which
//! of those ticks do real work.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::Window;

/// Default cap on executed frames per second.
pub const TARGET_FPS: f64 = 30.0;

/// Default ceiling on a frame's simulation step, in seconds.
pub const MAX_FRAME_DT: f64 = 0.05;

/// Caps the executed frame rate and clamps the step handed to the simulation.
#[derive(Clone, Debug)]
pub struct FrameGate {
	min_interval_ms: f64,
	max_dt: f64,
	last_ms: f64,
}

impl FrameGate {
	/// Gate whose interval starts counting at `start_ms`.
	pub fn new(target_fps: f64, max_dt: f64, start_ms: f64) -> Self {
		Self {
			min_interval_ms: 1000.0 / target_fps,
			max_dt,
			last_ms: start_ms,
		}
	}

	/// Returns the clamped step in seconds if a frame should run at `now_ms`.
	/// Ticks arriving sooner than the minimum interval are rejected and do not
	/// move the reference point.
	pub fn admit(&mut self, now_ms: f64) -> Option<f64> {
		let elapsed = now_ms - self.last_ms;
		if elapsed < self.min_interval_ms {
			return None;
		}
		self.last_ms = now_ms;
		Some((elapsed / 1000.0).min(self.max_dt))
	}
}

/// Handle of one pending tick request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickToken(pub i32);

/// Host capability that schedules exactly one callback on the next display
/// refresh. The callback itself is bound when the source is created.
pub trait TickSource {
	/// Schedules the callback. `None` means the host refused.
	fn request_tick(&self) -> Option<TickToken>;
	/// Cancels a pending request.
	fn cancel_tick(&self, token: TickToken);
}

/// Callback slot shared between the component and [`AnimationFrames`].
pub type TickCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// [`TickSource`] backed by `requestAnimationFrame`.
pub struct AnimationFrames {
	window: Window,
	callback: TickCallback,
}

impl AnimationFrames {
	pub fn new(window: Window, callback: TickCallback) -> Self {
		Self { window, callback }
	}
}

impl TickSource for AnimationFrames {
	fn request_tick(&self) -> Option<TickToken> {
		let callback = self.callback.borrow();
		let cb = callback.as_ref()?;
		self.window
			.request_animation_frame(cb.as_ref().unchecked_ref())
			.ok()
			.map(TickToken)
	}

	fn cancel_tick(&self, token: TickToken) {
		let _ = self.window.cancel_animation_frame(token.0);
	}
}

#[cfg(test)]
pub(crate) mod manual {
	//! Test [`TickSource`] that only records requests.

	use std::cell::{Cell, RefCell};

	use super::{TickSource, TickToken};

	#[derive(Default)]
	pub struct ManualTicks {
		next: Cell<i32>,
		pub pending: RefCell<Vec<TickToken>>,
		pub cancelled: RefCell<Vec<TickToken>>,
		pub refuse: Cell<bool>,
	}

	impl TickSource for ManualTicks {
		fn request_tick(&self) -> Option<TickToken> {
			if self.refuse.get() {
				return None;
			}
			let token = TickToken(self.next.get());
			self.next.set(token.0 + 1);
			self.pending.borrow_mut().push(token);
			Some(token)
		}

		fn cancel_tick(&self, token: TickToken) {
			self.pending.borrow_mut().retain(|t| *t != token);
			self.cancelled.borrow_mut().push(token);
		}
	}
}
