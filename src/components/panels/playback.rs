use leptos::prelude::*;
use log::{debug, warn};

use crate::components::context::AppContext;
use crate::config::VisualizerConfig;
use crate::engine::Session;

/// The single auto-play interval. Starting it clears any previous one.
#[derive(Clone, Copy)]
struct PlaybackTimer {
	handle: StoredValue<Option<IntervalHandle>>,
}

impl PlaybackTimer {
	fn new() -> Self {
		Self {
			handle: StoredValue::new(None),
		}
	}

	fn start(self, ctx: AppContext) {
		self.stop();
		let interval = ctx.config.with_value(VisualizerConfig::play_interval);
		let tick = move || {
			let keep_going = ctx.session.try_update(Session::tick).unwrap_or(false);
			if !keep_going {
				self.stop();
			}
		};
		match set_interval_with_handle(tick, interval) {
			Ok(handle) => self.handle.set_value(Some(handle)),
			Err(err) => warn!("auto-play timer failed to start: {err:?}"),
		}
	}

	fn stop(self) {
		if let Some(handle) = self.handle.try_update_value(Option::take).flatten() {
			handle.clear();
			debug!("auto-play timer cleared");
		}
	}
}

/// Next / Play / Pause / Reset over the active run.
#[component]
pub fn PlaybackPanel() -> impl IntoView {
	let ctx = AppContext::get();
	let timer = PlaybackTimer::new();
	on_cleanup(move || timer.stop());

	// A graph edit or a new run clears or replaces the replay underneath us.
	Effect::new(move |_| {
		let idle = ctx.frame.with(Option::is_none);
		let playing = ctx.session.with(|s| s.replay().is_playing());
		if idle || !playing {
			timer.stop();
		}
	});

	let is_active = move || ctx.frame.with(Option::is_some);
	let is_playing = move || ctx.session.with(|s| s.replay().is_playing());
	let at_end = move || ctx.frame.with(|f| f.as_ref().is_none_or(|f| f.is_last()));
	let position = move || {
		ctx.frame.with(|f| match f {
			Some(frame) => format!("Step {} of {}", frame.index() + 1, frame.sequence().len()),
			None => "No active run".to_owned(),
		})
	};

	let next = move |_| {
		timer.stop();
		ctx.apply(Session::next);
	};
	let play = move |_| {
		ctx.apply(Session::play);
		if ctx.session.with_untracked(|s| s.replay().is_playing()) {
			timer.start(ctx);
		}
	};
	let pause = move |_| {
		timer.stop();
		ctx.session.update(Session::pause);
	};
	let reset = move |_| {
		timer.stop();
		ctx.session.update(Session::reset);
	};

	view! {
		<section class="panel playback-panel">
			<h3>"Playback"</h3>
			<p class="position">{position}</p>
			<div class="row">
				<button type="button" on:click=next disabled=move || !is_active() || at_end()>
					"Next"
				</button>
				<Show
					when=is_playing
					fallback=move || {
						view! {
							<button
								type="button"
								on:click=play
								disabled=move || !is_active() || at_end()
							>
								"Play"
							</button>
						}
					}
				>
					<button type="button" on:click=pause>
						"Pause"
					</button>
				</Show>
				<button type="button" on:click=reset disabled=move || !is_active()>
					"Reset"
				</button>
			</div>
		</section>
	}
}
