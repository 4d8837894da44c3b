//! Small fixed-position page widgets around the backdrop.

use leptos::prelude::*;

use crate::components::backdrop::{ThemeName, World};
use crate::inputs::ThemeController;

/// Button flipping the page between light and dark.
#[component]
pub fn ThemeToggle(controller: ThemeController) -> impl IntoView {
	let theme = controller.theme();
	view! {
		<button
			class="theme-toggle"
			type="button"
			aria-label="Toggle light and dark theme"
			aria-pressed=move || (theme.get() == ThemeName::Dark).to_string()
			on:click=move |_| controller.toggle()
		>
			{move || theme.get().toggle_label()}
		</button>
	}
}

/// Badge naming the world of the section in view.
#[component]
pub fn WorldIndicator(#[prop(into)] world: Signal<World>) -> impl IntoView {
	view! {
		<div class="world-indicator" aria-live="polite">
			<span class="world-indicator-dot" />
			{move || world.get().label()}
		</div>
	}
}
