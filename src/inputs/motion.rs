//! System reduced-motion preference.

use leptos::prelude::*;
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;

/// Media query matched when the user asks for less motion.
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";

/// Tracks [`REDUCED_MOTION_QUERY`], updating live when the system setting
/// changes. Reports `false` outside a browser.
pub fn use_prefers_reduced_motion() -> Signal<bool> {
	let Some(query) = web_sys::window().and_then(|w| w.match_media(REDUCED_MOTION_QUERY).ok().flatten())
	else {
		return Signal::stored(false);
	};

	let (reduced, set_reduced) = signal(query.matches());
	let listener = Closure::<dyn FnMut()>::new({
		let query = query.clone();
		move || set_reduced.set(query.matches())
	});
	let _ = query.add_event_listener_with_callback("change", listener.as_ref().unchecked_ref());

	let teardown = SendWrapper::new((query, listener));
	on_cleanup(move || {
		let (query, listener) = teardown.take();
		let _ =
			query.remove_event_listener_with_callback("change", listener.as_ref().unchecked_ref());
	});

	reduced.into()
}
