//! Leptos client-side app wiring and routes.
//!
//! The traversal logic lives in [`engine`] and never touches the browser;
//! `components` and `pages` are the thin Leptos layer on top of it.

use leptos::prelude::*;
use leptos_meta::*;
use leptos_router::components::*;
use leptos_router::path;
use log::{Level, info};

pub mod config;
pub mod engine;
pub mod error;
pub mod narration;

// Modules
mod components;
mod pages;

#[cfg(test)]
use proptest as _;

use crate::components::context::AppContext;
use crate::config::VisualizerConfig;
// Top-Level pages
use crate::pages::not_found::NotFound;
use crate::pages::visualizer::Visualizer;

/// Initialize logging and panic hooks for the WASM target.
pub fn init_logging(level: Level) {
	let _ = console_log::init_with_level(level);
	console_error_panic_hook::set_once();
	info!("Logging initialized at {level}");
}

/// An app router which renders the visualizer and handles 404's
#[component]
pub fn App(
	/// Falls back to the defaults when omitted.
	#[prop(optional)]
	config: Option<VisualizerConfig>,
) -> impl IntoView {
	// Provides context that manages stylesheets, titles, meta tags, etc.
	provide_meta_context();
	AppContext::new(config.unwrap_or_default()).provide();

	view! {
		<Html attr:lang="en" attr:dir="ltr" attr:data-theme="light" />

		// sets the document title
		<Title text="Graph Traversal Visualizer" />

		// injects metadata in the <head> of the page
		<Meta charset="UTF-8" />
		<Meta name="viewport" content="width=device-width, initial-scale=1.0" />

		<Router>
			<Routes fallback=|| view! { <NotFound /> }>
				<Route path=path!("/") view=Visualizer />
			</Routes>
		</Router>
	}
}
