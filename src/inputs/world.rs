//! Active world from scroll position.
//!
//! Every element carrying a `data-world` attribute is watched by one
//! `IntersectionObserver`. Whenever visibility changes, the most visible
//! intersecting section decides the world.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Array;
use leptos::prelude::*;
use log::{debug, warn};
use send_wrapper::SendWrapper;
use wasm_bindgen::prelude::*;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry, IntersectionObserverInit};

use crate::components::backdrop::World;
use crate::error::BackdropError;

/// Attribute naming the world of a page section.
pub const WORLD_ATTRIBUTE: &str = "data-world";

/// Intersection ratios at which the observer reports.
pub const THRESHOLDS: [f64; 3] = [0.2, 0.45, 0.7];

/// Shrinks the observed viewport so a section wins once it reaches the upper
/// middle of the screen.
pub const ROOT_MARGIN: &str = "-10% 0px -45% 0px";

type EntriesCallback = Closure<dyn FnMut(Array)>;

/// Picks the world of the most visible intersecting section.
///
/// `entries` yields `(is_intersecting, intersection_ratio, world attribute)`.
/// Sections naming an unknown world are skipped.
pub fn pick_world<I, S>(entries: I) -> Option<World>
where
	I: IntoIterator<Item = (bool, f64, Option<S>)>,
	S: AsRef<str>,
{
	entries
		.into_iter()
		.filter(|(intersecting, _, _)| *intersecting)
		.filter_map(|(_, ratio, name)| match name?.as_ref().parse::<World>() {
			Ok(world) => Some((ratio, world)),
			Err(e) => {
				debug!("grencape: {e}");
				None
			}
		})
		.max_by(|a, b| a.0.total_cmp(&b.0))
		.map(|(_, world)| world)
}

/// Observes the tagged sections once the page has rendered. Starts at
/// [`World::Deep`] until a section reports in.
pub fn use_intersection_world() -> Signal<World> {
	let (world, set_world) = signal(World::default());
	let observation: Rc<RefCell<Option<(IntersectionObserver, EntriesCallback)>>> =
		Rc::new(RefCell::new(None));

	let observation_mount = observation.clone();
	Effect::new(move |_| {
		if observation_mount.borrow().is_some() {
			return;
		}
		match observe_sections(set_world) {
			Ok((observer, callback, count)) => {
				debug!("grencape: observing {count} world sections");
				*observation_mount.borrow_mut() = Some((observer, callback));
			}
			Err(e) => warn!("grencape: world tracking disabled: {e}"),
		}
	});

	let teardown = SendWrapper::new(observation);
	on_cleanup(move || {
		if let Some((observer, _callback)) = teardown.take().borrow_mut().take() {
			observer.disconnect();
		}
	});

	world.into()
}

fn observe_sections(
	set_world: WriteSignal<World>,
) -> Result<(IntersectionObserver, EntriesCallback, u32), BackdropError> {
	let document = web_sys::window()
		.and_then(|w| w.document())
		.ok_or(BackdropError::NoWindow)?;

	let callback = EntriesCallback::new(move |entries: Array| {
		let entries = entries
			.iter()
			.filter_map(|entry| entry.dyn_into::<IntersectionObserverEntry>().ok())
			.map(|entry| {
				(
					entry.is_intersecting(),
					entry.intersection_ratio(),
					entry.target().get_attribute(WORLD_ATTRIBUTE),
				)
			});
		if let Some(next) = pick_world(entries) {
			set_world.set(next);
		}
	});

	let init = IntersectionObserverInit::new();
	init.set_root_margin(ROOT_MARGIN);
	let thresholds: Array = THRESHOLDS.iter().map(|t| JsValue::from_f64(*t)).collect();
	init.set_threshold(&thresholds);
	let observer = IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
		.map_err(|_| BackdropError::ObserverUnavailable)?;

	let sections = document
		.query_selector_all(&format!("[{WORLD_ATTRIBUTE}]"))
		.map_err(|_| BackdropError::ObserverUnavailable)?;
	for i in 0..sections.length() {
		if let Some(section) = sections.item(i).and_then(|n| n.dyn_into::<Element>().ok()) {
			observer.observe(&section);
		}
	}

	Ok((observer, callback, sections.length()))
}
