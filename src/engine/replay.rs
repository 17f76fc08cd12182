//! Playback of a generated step sequence.
//!
//! The controller is an explicit two-state machine. It does not own a timer:
//! whoever drives auto-play calls [`ReplayController::tick`] on a fixed
//! interval and stops once it returns `false`.

use log::debug;

use super::step::{Algorithm, Step, StepSequence};
use crate::error::ReplayError;

/// Cursor into a shared step sequence. Cheap to clone.
#[derive(Clone, Debug, PartialEq)]
pub struct StepFrame {
	sequence: StepSequence,
	index: usize,
}

impl StepFrame {
	/// Run this frame points into.
	pub fn sequence(&self) -> &StepSequence {
		&self.sequence
	}

	/// 0-based position of the current step.
	pub fn index(&self) -> usize {
		self.index
	}

	/// Step under the cursor.
	pub fn current(&self) -> &Step {
		&self.sequence.steps()[self.index]
	}

	/// Step just before the cursor, `None` at the first step.
	pub fn previous(&self) -> Option<&Step> {
		self.index.checked_sub(1).and_then(|i| self.sequence.get(i))
	}

	/// Whether the cursor sits on the final step.
	pub fn is_last(&self) -> bool {
		self.index + 1 == self.sequence.len()
	}
}

/// Emitted to observers on every cursor change.
#[derive(Clone, Debug, PartialEq)]
pub enum ReplayEvent {
	/// The cursor moved, or a run was loaded.
	Step(StepFrame),
	/// The controller went back to idle.
	Cleared,
}

/// Either nothing loaded or a run with a cursor.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum ReplayState {
	/// No run loaded.
	#[default]
	Idle,
	/// A run is loaded.
	Active {
		/// The loaded run.
		steps: StepSequence,
		/// Index of the step on display.
		cursor: usize,
		/// Whether `tick` advances.
		playing: bool,
	},
}

type Observer = Box<dyn FnMut(&ReplayEvent)>;

/// Owns the replay state and notifies subscribers of cursor changes.
#[derive(Default)]
pub struct ReplayController {
	state: ReplayState,
	observers: Vec<Observer>,
}

impl std::fmt::Debug for ReplayController {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ReplayController")
			.field("state", &self.state)
			.field("observers", &self.observers.len())
			.finish()
	}
}

impl ReplayController {
	/// Idle controller with no subscribers.
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers a consumer of cursor changes. Called synchronously.
	pub fn subscribe(&mut self, observer: impl FnMut(&ReplayEvent) + 'static) {
		self.observers.push(Box::new(observer));
	}

	/// Raw state.
	pub fn state(&self) -> &ReplayState {
		&self.state
	}

	/// Whether a run is loaded.
	pub fn is_active(&self) -> bool {
		matches!(self.state, ReplayState::Active { .. })
	}

	/// `-1` while idle.
	pub fn cursor(&self) -> isize {
		match self.state {
			ReplayState::Idle => -1,
			ReplayState::Active { cursor, .. } => cursor as isize,
		}
	}

	/// Whether auto-play is on.
	pub fn is_playing(&self) -> bool {
		matches!(self.state, ReplayState::Active { playing: true, .. })
	}

	/// Algorithm of the loaded run.
	pub fn algorithm(&self) -> Option<Algorithm> {
		self.sequence().map(StepSequence::algorithm)
	}

	/// The loaded run.
	pub fn sequence(&self) -> Option<&StepSequence> {
		match &self.state {
			ReplayState::Idle => None,
			ReplayState::Active { steps, .. } => Some(steps),
		}
	}

	/// Cursor snapshot for consumers.
	pub fn frame(&self) -> Option<StepFrame> {
		match &self.state {
			ReplayState::Idle => None,
			ReplayState::Active { steps, cursor, .. } => Some(StepFrame {
				sequence: steps.clone(),
				index: *cursor,
			}),
		}
	}

	/// Step under the cursor.
	pub fn current(&self) -> Option<&Step> {
		match &self.state {
			ReplayState::Idle => None,
			ReplayState::Active { steps, cursor, .. } => steps.get(*cursor),
		}
	}

	/// Step before the cursor.
	pub fn previous(&self) -> Option<&Step> {
		match &self.state {
			ReplayState::Idle => None,
			ReplayState::Active { steps, cursor, .. } => {
				cursor.checked_sub(1).and_then(|i| steps.get(i))
			}
		}
	}

	/// Loads `sequence` at its first step, replacing whatever ran before.
	pub fn run(&mut self, sequence: StepSequence) -> Result<(), ReplayError> {
		if sequence.is_empty() {
			return Err(ReplayError::EmptySequence);
		}
		debug!(
			"replay loaded {} run with {} steps",
			sequence.algorithm(),
			sequence.len()
		);
		self.state = ReplayState::Active {
			steps: sequence,
			cursor: 0,
			playing: false,
		};
		self.emit_step();
		Ok(())
	}

	/// Manual advance. Always stops auto-play; a no-op on the last step.
	pub fn next(&mut self) -> Result<(), ReplayError> {
		let ReplayState::Active {
			steps,
			cursor,
			playing,
		} = &mut self.state
		else {
			return Err(ReplayError::Idle);
		};
		*playing = false;
		if *cursor + 1 < steps.len() {
			*cursor += 1;
			self.emit_step();
		}
		Ok(())
	}

	/// Starts auto-play. Nothing to play once the last step is shown.
	pub fn play(&mut self) -> Result<(), ReplayError> {
		let ReplayState::Active {
			steps,
			cursor,
			playing,
		} = &mut self.state
		else {
			return Err(ReplayError::Idle);
		};
		*playing = *cursor + 1 < steps.len();
		Ok(())
	}

	/// Stops auto-play and keeps the cursor. Ignored while idle.
	pub fn pause(&mut self) {
		if let ReplayState::Active { playing, .. } = &mut self.state {
			*playing = false;
		}
	}

	/// Timer hook. Advances one step while playing and reports whether the
	/// timer should keep running.
	pub fn tick(&mut self) -> bool {
		let ReplayState::Active {
			steps,
			cursor,
			playing,
		} = &mut self.state
		else {
			return false;
		};
		if !*playing {
			return false;
		}
		let last = steps.len() - 1;
		let advanced = *cursor < last;
		if advanced {
			*cursor += 1;
		}
		if *cursor >= last {
			*playing = false;
		}
		let keep_going = *playing;
		if advanced {
			self.emit_step();
		}
		keep_going
	}

	/// Back to idle from any state.
	pub fn reset(&mut self) {
		let was_active = self.is_active();
		self.state = ReplayState::Idle;
		if was_active {
			debug!("replay reset");
			self.emit(&ReplayEvent::Cleared);
		}
	}

	fn emit_step(&mut self) {
		if let Some(frame) = self.frame() {
			self.emit(&ReplayEvent::Step(frame));
		}
	}

	fn emit(&mut self, event: &ReplayEvent) {
		for observer in &mut self.observers {
			observer(event);
		}
	}
}
