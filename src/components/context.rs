use std::fmt::Display;

use leptos::prelude::*;
use log::debug;

use crate::config::VisualizerConfig;
use crate::engine::{NodeId, ReplayEvent, Session, StepFrame};

/// Reactive handles shared by the canvas and the panels.
#[derive(Clone, Copy)]
pub struct AppContext {
	/// Holds replay observers, so it stays on the UI thread.
	pub session: RwSignal<Session, LocalStorage>,
	/// Mirror of the replay position, pushed by the session observer.
	pub frame: RwSignal<Option<StepFrame>>,
	/// First endpoint of an edge being drawn on the canvas.
	pub selected: RwSignal<Option<NodeId>>,
	/// Last user-facing error, cleared by the next successful action.
	pub status: RwSignal<Option<String>>,
	pub edge_weight: RwSignal<f64>,
	pub config: StoredValue<VisualizerConfig>,
}

impl AppContext {
	pub fn new(config: VisualizerConfig) -> Self {
		let frame = RwSignal::new(None);
		let mut session = Session::new(config.layout);
		session.subscribe(move |event| match event {
			ReplayEvent::Step(step) => frame.set(Some(step.clone())),
			ReplayEvent::Cleared => frame.set(None),
		});
		Self {
			session: RwSignal::new_local(session),
			frame,
			selected: RwSignal::new(None),
			status: RwSignal::new(None),
			edge_weight: RwSignal::new(1.0),
			config: StoredValue::new(config),
		}
	}

	pub fn provide(self) {
		provide_context(self);
	}

	pub fn get() -> Self {
		expect_context::<Self>()
	}

	/// Runs `action` against the session and reports its error, if any.
	pub fn apply<T, E: Display>(&self, action: impl FnOnce(&mut Session) -> Result<T, E>) -> Option<T> {
		match self.session.try_update(action)? {
			Ok(value) => {
				self.status.set(None);
				Some(value)
			}
			Err(err) => {
				debug!("reporting: {err}");
				self.status.set(Some(err.to_string()));
				None
			}
		}
	}

	/// Weight for a newly drawn edge; `None` while the graph is unweighted.
	pub fn new_edge_weight(&self) -> Option<f64> {
		let weighted = self.session.with_untracked(|s| s.graph().is_weighted());
		weighted.then(|| self.edge_weight.get_untracked())
	}

	/// Canvas click: the first node is remembered, a second distinct node
	/// completes an edge, clicking the remembered node again forgets it.
	pub fn select_or_connect(&self, id: NodeId) {
		match self.selected.get_untracked() {
			None => self.selected.set(Some(id)),
			Some(first) if first == id => self.selected.set(None),
			Some(first) => {
				let weight = self.new_edge_weight();
				self.apply(|s| s.add_edge(first, id, weight));
				self.selected.set(None);
			}
		}
	}
}
