// The binary only mounts the app; the rest of the stack is used by the library.
#![allow(unused_crate_dependencies)]

use leptos::prelude::*;
use traversal_visualizer::config::VisualizerConfig;
use traversal_visualizer::{App, init_logging};

fn main() {
	let defaults = VisualizerConfig::default();
	init_logging(defaults.level());
	// Logging is up before the config is read so a malformed block is reported.
	let config = VisualizerConfig::load();
	log::set_max_level(config.level().to_level_filter());
	leptos::mount::mount_to_body(move || view! { <App config=config.clone() /> });
}
