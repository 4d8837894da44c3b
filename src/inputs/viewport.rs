//! Window size and pixel ratio as a signal.

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;

use crate::components::backdrop::Viewport;

/// Measures the window once at mount and again on every `resize` event.
pub fn use_viewport() -> Signal<Viewport> {
	let Some(window) = web_sys::window() else {
		return Signal::stored(Viewport::default());
	};

	let (viewport, set_viewport) = signal(Viewport::from_window(&window).unwrap_or_default());
	let listener = Closure::<dyn FnMut()>::new(move || {
		let Some(next) = web_sys::window().as_ref().and_then(Viewport::from_window) else {
			return;
		};
		if viewport.get_untracked() != next {
			set_viewport.set(next);
		}
	});
	let _ = window.add_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());

	let teardown = SendWrapper::new((window, listener));
	on_cleanup(move || {
		let (window, listener) = teardown.take();
		let _ =
			window.remove_event_listener_with_callback("resize", listener.as_ref().unchecked_ref());
	});

	viewport.into()
}
