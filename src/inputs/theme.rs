//! Light/dark preference persisted in local storage.

use leptos::prelude::*;
use log::{debug, warn};
use web_sys::Storage;

use crate::components::backdrop::ThemeName;

/// Local-storage key holding the chosen theme.
pub const THEME_STORAGE_KEY: &str = "grencape-theme";

/// Handle to the page theme. Cheap to copy into event handlers.
#[derive(Clone, Copy)]
pub struct ThemeController {
	theme: RwSignal<ThemeName>,
}

impl ThemeController {
	pub fn theme(&self) -> Signal<ThemeName> {
		self.theme.into()
	}

	/// Switches theme, persisting it and updating the document attribute.
	pub fn set(&self, theme: ThemeName) {
		self.theme.set(theme);
		apply(theme);
	}

	/// Flips between light and dark.
	pub fn toggle(&self) {
		self.set(self.theme.get_untracked().toggled());
	}
}

/// Restores the stored theme (light when absent or unreadable) and writes it
/// back to storage and the document's `data-theme` attribute.
pub fn use_theme() -> ThemeController {
	let initial = stored_theme().unwrap_or_default();
	apply(initial);
	ThemeController {
		theme: RwSignal::new(initial),
	}
}

fn local_storage() -> Option<Storage> {
	web_sys::window()?.local_storage().ok().flatten()
}

fn stored_theme() -> Option<ThemeName> {
	let value = local_storage()?.get_item(THEME_STORAGE_KEY).ok().flatten()?;
	match value.parse() {
		Ok(theme) => Some(theme),
		Err(e) => {
			warn!("grencape: ignoring stored theme: {e}");
			None
		}
	}
}

fn apply(theme: ThemeName) {
	if let Some(storage) = local_storage() {
		let _ = storage.set_item(THEME_STORAGE_KEY, theme.as_str());
	}
	if let Some(root) = web_sys::window()
		.and_then(|w| w.document())
		.and_then(|d| d.document_element())
	{
		let _ = root.set_attribute("data-theme", theme.as_str());
	}
	debug!("grencape: theme {theme}");
}
