//! panel-particles: ambient particle background for the code review panel.
//!
//! This crate provides a WASM canvas component that draws a few hundred
//! softly orbiting particles behind the panel UI, following the pointer and
//! drifting between random waypoints when it is away.

use leptos::prelude::*;
use leptos_meta::*;
use log::{Level, info, warn};
use wasm_bindgen::JsCast;
use web_sys::{HtmlScriptElement, Window};

// Only needed for its `js` feature, which lets `rand` seed from the browser.
use getrandom as _;

pub mod components;

pub use components::particle_background::{
	MountOptions, ParticleBackground, Point, Rect, SimulationConfig, SimulationContext,
};

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging() {
	let _ = console_log::init_with_level(Level::Debug);
	console_error_panic_hook::set_once();
	info!("panel-particles: logging initialized");
}

/// Load mount options from a script element with id="particle-options".
/// Expected format: JSON with optional { header_selector, seed }.
fn load_mount_options() -> Option<MountOptions> {
	let window: Window = web_sys::window()?;
	let document = window.document()?;
	let element = document.get_element_by_id("particle-options")?;
	let script: HtmlScriptElement = element.dyn_into().ok()?;
	let json_text = script.text().ok()?;

	match serde_json::from_str::<MountOptions>(&json_text) {
		Ok(options) => {
			info!(
				"panel-particles: header '{}', seed {:?}",
				options.header_selector, options.seed
			);
			Some(options)
		}
		Err(e) => {
			warn!("panel-particles: failed to parse particle options: {}", e);
			None
		}
	}
}

/// Main application component.
/// Renders the panel header over the particle background.
#[component]
pub fn App() -> impl IntoView {
	provide_meta_context();

	let options = load_mount_options().unwrap_or_default();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="dark" />
		<Title text="Code Review" />
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<ParticleBackground options=options />
		<div class="cr-header">
			<h1>"Code Review"</h1>
			<p class="subtitle">"Move the pointer below the header to pull the field along."</p>
		</div>
	}
}
