//! Runtime configuration.
//!
//! Read once at startup from an inline JSON block in `index.html`:
//!
//! ```html
//! <script type="application/json" id="visualizer-config">
//!   { "narrationUrl": "http://localhost:5000/explain-step", "playIntervalMs": 500 }
//! </script>
//! ```
//!
//! Missing keys take their defaults; a missing or malformed block falls back
//! to [`VisualizerConfig::default`].

use std::time::Duration;

use log::{Level, warn};
use serde::Deserialize;

use crate::engine::Layout;

/// Id of the `<script>` element holding the configuration.
pub const CONFIG_ELEMENT_ID: &str = "visualizer-config";

/// Settings read from the page at startup.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct VisualizerConfig {
	/// Narration proxy endpoint.
	pub narration_url: String,
	/// Abort a narration request after this many milliseconds.
	pub narration_timeout_ms: u64,
	/// Auto-play advance interval.
	pub play_interval_ms: u64,
	/// Console log level name, e.g. `info`.
	pub log_level: String,
	/// Circle on which new nodes are placed.
	pub layout: Layout,
}

impl Default for VisualizerConfig {
	fn default() -> Self {
		Self {
			narration_url: "http://localhost:5000/explain-step".into(),
			narration_timeout_ms: 10_000,
			play_interval_ms: 500,
			log_level: "debug".into(),
			layout: Layout::default(),
		}
	}
}

impl VisualizerConfig {
	/// Parses a config block. Missing keys take their defaults.
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		serde_json::from_str(json)
	}

	/// Reads the inline config block, if the page has one.
	pub fn load() -> Self {
		let text = web_sys::window()
			.and_then(|w| w.document())
			.and_then(|d| d.get_element_by_id(CONFIG_ELEMENT_ID))
			.and_then(|el| el.text_content());
		let Some(text) = text else {
			return Self::default();
		};
		Self::from_json(&text).unwrap_or_else(|err| {
			warn!("ignoring malformed #{CONFIG_ELEMENT_ID}: {err}");
			Self::default()
		})
	}

	/// Unknown names fall back to `Debug`.
	pub fn level(&self) -> Level {
		self.log_level.parse().unwrap_or(Level::Debug)
	}

	/// Auto-play interval as a `Duration`.
	pub fn play_interval(&self) -> Duration {
		Duration::from_millis(self.play_interval_ms)
	}

	/// Narration timeout as a `Duration`.
	pub fn narration_timeout(&self) -> Duration {
		Duration::from_millis(self.narration_timeout_ms)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_documented_values() {
		let config = VisualizerConfig::default();
		assert_eq!(config.play_interval(), Duration::from_millis(500));
		assert_eq!(config.narration_timeout(), Duration::from_secs(10));
		assert_eq!(config.level(), Level::Debug);
	}

	#[test]
	fn partial_json_keeps_other_defaults() {
		let config = VisualizerConfig::from_json(
			r#"{"playIntervalMs": 250, "logLevel": "warn", "layout": {"radius": 90}}"#,
		)
		.unwrap();
		assert_eq!(config.play_interval_ms, 250);
		assert_eq!(config.level(), Level::Warn);
		assert_eq!(config.layout.radius, 90.0);
		assert_eq!(config.layout.center_x, Layout::default().center_x);
		assert_eq!(config.narration_url, VisualizerConfig::default().narration_url);
	}

	#[test]
	fn unknown_level_falls_back_to_debug() {
		let config = VisualizerConfig::from_json(r#"{"logLevel": "chatty"}"#).unwrap();
		assert_eq!(config.level(), Level::Debug);
	}

	#[test]
	fn malformed_json_is_an_error() {
		assert!(VisualizerConfig::from_json("{ nope").is_err());
	}
}
