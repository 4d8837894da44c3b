//! grencape-site: single-page GRENCAPE site with a procedural cosmic backdrop.
//!
//! The page is a column of sections, each bound to a backdrop "world". As the
//! reader scrolls, the most visible section selects the world and the canvas
//! behind the page fades towards that world's look. A persisted light/dark
//! theme and the system reduced-motion preference feed the same engine.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info};

pub mod components;
pub mod error;
pub mod inputs;

pub use components::backdrop::{BackdropConfig, BackgroundCanvas, ThemeName, World, load_config};
pub use error::BackdropError;

use components::chrome::{ThemeToggle, WorldIndicator};
use inputs::{use_intersection_world, use_prefers_reduced_motion, use_theme, use_viewport};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("grencape: logging initialized");
}

/// One scroll section and the world it selects.
struct Section {
	id: &'static str,
	world: World,
	title: &'static str,
	body: &'static str,
}

static SECTIONS: [Section; 4] = [
	Section {
		id: "hero",
		world: World::Deep,
		title: "GRENCAPE",
		body: "Interfaces and infrastructure for teams building at the edge of the known.",
	},
	Section {
		id: "services",
		world: World::Nebula,
		title: "Services",
		body: "Product design, web engineering and cloud operations.",
	},
	Section {
		id: "work",
		world: World::Lensing,
		title: "Selected work",
		body: "A few of the things we have shipped recently.",
	},
	Section {
		id: "contact",
		world: World::Accretion,
		title: "Contact",
		body: "hello@grencape.xyz",
	},
];

/// Main application component.
/// Wires the page inputs into the backdrop and lays out the sections.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let config = load_config();
	let theme = use_theme();
	let world = use_intersection_world();
	let reduced_motion = use_prefers_reduced_motion();
	let viewport = use_viewport();

	view! {
		<Html attr:lang="en" attr:dir="ltr" />
		<Title text="GRENCAPE" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<BackgroundCanvas
			world=world
			theme=theme.theme()
			reduced_motion=reduced_motion
			viewport=viewport
			config=config
		/>
		<header class="site-header">
			<span class="site-logo">"GRENCAPE"</span>
			<ThemeToggle controller=theme />
		</header>
		<main class="site-sections">
			{SECTIONS
				.iter()
				.map(|section| {
					view! {
						<section
							id=section.id
							class="world-section"
							data-world=section.world.as_str()
						>
							<h2>{section.title}</h2>
							<p>{section.body}</p>
						</section>
					}
				})
				.collect_view()}
		</main>
		<WorldIndicator world=world />
	}
}
