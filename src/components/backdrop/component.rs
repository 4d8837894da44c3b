//! Leptos component binding the backdrop engine to a canvas element.
//!
//! On mount the component acquires a 2D context, sizes the canvas for the
//! current viewport and starts a [`RenderLoop`] on `requestAnimationFrame`.
//! Reactive inputs are pushed into the loop as they change. Teardown cancels
//! the pending frame and drops the frame callback.

use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::{info, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::HtmlCanvasElement;

use super::clock::{AnimationFrames, TickCallback};
use super::config::BackdropConfig;
use super::engine::{Backdrop, RenderLoop};
use super::inputs::BackdropInputs;
use super::presets::{ThemeName, World};
use super::surface::CanvasSurface;
use super::viewport::Viewport;
use crate::error::BackdropError;

type CanvasLoop = RenderLoop<AnimationFrames, CanvasSurface>;
type SharedLoop = Rc<RefCell<Option<CanvasLoop>>>;

/// Full-viewport animated canvas painted behind the page content.
///
/// All inputs are reactive. If the browser refuses a 2D context the canvas
/// stays transparent and the page is unaffected.
#[component]
pub fn BackgroundCanvas(
	/// Section currently in view.
	#[prop(into)]
	world: Signal<World>,
	#[prop(into)] theme: Signal<ThemeName>,
	/// Freeze motion and thin out the particle field.
	#[prop(into)]
	reduced_motion: Signal<bool>,
	#[prop(into)] viewport: Signal<Viewport>,
	/// Engine tuning; defaults when omitted.
	#[prop(optional)]
	config: BackdropConfig,
) -> impl IntoView {
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let render_loop: SharedLoop = Rc::new(RefCell::new(None));
	let callback: TickCallback = Rc::new(RefCell::new(None));

	let inputs = move || BackdropInputs {
		world: world.get(),
		theme: theme.get(),
		reduced_motion: reduced_motion.get(),
		viewport: viewport.get(),
	};
	let inputs_untracked = move || BackdropInputs {
		world: world.get_untracked(),
		theme: theme.get_untracked(),
		reduced_motion: reduced_motion.get_untracked(),
		viewport: viewport.get_untracked(),
	};

	let (loop_mount, callback_mount) = (render_loop.clone(), callback.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		if loop_mount.borrow().is_some() {
			return;
		}
		let canvas: HtmlCanvasElement = canvas.into();
		match mount(
			&canvas,
			inputs_untracked(),
			config.clone(),
			&loop_mount,
			&callback_mount,
		) {
			Ok(()) => info!("backdrop: mounted"),
			Err(e) => warn!("backdrop: {e}, leaving the canvas static"),
		}
	});

	let loop_sync = render_loop.clone();
	Effect::new(move |_| {
		let next = inputs();
		if let Some(rl) = loop_sync.borrow_mut().as_mut() {
			if rl.backdrop().inputs().viewport != next.viewport {
				rl.surface().fit(&next.viewport);
			}
			rl.set_inputs(next);
		}
	});

	let teardown = SendWrapper::new((render_loop, callback));
	on_cleanup(move || {
		let (render_loop, callback) = teardown.take();
		if let Some(mut rl) = render_loop.borrow_mut().take() {
			rl.stop();
		}
		callback.borrow_mut().take();
	});

	view! {
		<canvas
			node_ref=canvas_ref
			class="backdrop-canvas"
			aria-hidden="true"
			style="position: fixed; inset: 0; z-index: -10; pointer-events: none; display: block;"
		/>
	}
}

/// Builds the engine for `canvas` and starts its frame loop.
fn mount(
	canvas: &HtmlCanvasElement,
	inputs: BackdropInputs,
	config: BackdropConfig,
	render_loop: &SharedLoop,
	callback: &TickCallback,
) -> Result<(), BackdropError> {
	let window = web_sys::window().ok_or(BackdropError::NoWindow)?;
	let surface = CanvasSurface::from_canvas(canvas)?;
	surface.fit(&inputs.viewport);

	let now = window.performance().map(|p| p.now()).unwrap_or_default();
	let seed = config.seed.unwrap_or_else(random_seed);
	let backdrop = Backdrop::new(inputs, config, seed, now);

	// The frame callback only holds a weak handle; the loop owns the callback
	// through its tick source.
	let weak_loop = Rc::downgrade(render_loop);
	*callback.borrow_mut() = Some(Closure::new(move |now: f64| {
		if let Some(shared) = weak_loop.upgrade()
			&& let Some(rl) = shared.borrow_mut().as_mut()
		{
			rl.on_tick(now);
		}
	}));

	let mut rl = RenderLoop::new(
		backdrop,
		AnimationFrames::new(window, callback.clone()),
		surface,
	);
	rl.start();
	*render_loop.borrow_mut() = Some(rl);
	Ok(())
}

fn random_seed() -> u64 {
	(js_sys::Math::random() * u64::MAX as f64) as u64
}
