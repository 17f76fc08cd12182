//! Editing session: the live graph plus the replay of the latest run.
//!
//! Every successful structural edit resets the replay first, so a displayed
//! run always matches the graph it was generated from. Position moves are
//! cosmetic and leave the replay alone.

use log::{info, warn};

use super::graph::{Edge, Graph, Layout, NodeId, Position};
use super::replay::{ReplayController, ReplayEvent, StepFrame};
use super::run::{RunRequest, generate};
use super::step::StepSequence;
use crate::error::{EngineResult, GraphResult};

/// The graph being edited and the replay of its latest run.
#[derive(Debug, Default)]
pub struct Session {
	graph: Graph,
	replay: ReplayController,
}

impl Session {
	/// Empty session placing nodes on `layout`.
	pub fn new(layout: Layout) -> Self {
		Self {
			graph: Graph::with_layout(layout),
			replay: ReplayController::new(),
		}
	}

	/// The live graph.
	pub fn graph(&self) -> &Graph {
		&self.graph
	}

	/// The replay of the latest run.
	pub fn replay(&self) -> &ReplayController {
		&self.replay
	}

	/// Forwards to [`ReplayController::subscribe`].
	pub fn subscribe(&mut self, observer: impl FnMut(&ReplayEvent) + 'static) {
		self.replay.subscribe(observer);
	}

	/// Cursor snapshot, `None` while idle.
	pub fn frame(&self) -> Option<StepFrame> {
		self.replay.frame()
	}

	/// Whether `sequence` was generated from an older graph.
	pub fn is_stale(&self, sequence: &StepSequence) -> bool {
		sequence.graph_revision() != self.graph.revision()
	}

	/// Applies a structural edit; on success the replay is reset.
	fn edit<T>(&mut self, what: &str, f: impl FnOnce(&mut Graph) -> GraphResult<T>) -> GraphResult<T> {
		match f(&mut self.graph) {
			Ok(value) => {
				self.replay.reset();
				info!("graph edit: {what} (revision {})", self.graph.revision());
				Ok(value)
			}
			Err(err) => {
				warn!("graph edit rejected: {err}");
				Err(err)
			}
		}
	}

	/// Adds a node and discards the run.
	pub fn add_node(&mut self) -> GraphResult<NodeId> {
		self.edit("add node", Graph::add_node)
	}

	/// Removes a node with its edges and discards the run.
	pub fn remove_node(&mut self, id: NodeId) -> GraphResult<()> {
		self.edit("remove node", |g| g.remove_node(id))
	}

	/// Adds an edge and discards the run.
	pub fn add_edge(&mut self, source: NodeId, target: NodeId, weight: Option<f64>) -> GraphResult<Edge> {
		self.edit("add edge", |g| g.add_edge(source, target, weight).cloned())
	}

	/// Removes an edge and discards the run.
	pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<Edge> {
		self.edit("remove edge", |g| g.remove_edge(source, target))
	}

	/// Flips directedness, discards the run and returns the new flag.
	pub fn toggle_directed(&mut self) -> bool {
		self.edit("toggle directed", |g| Ok(g.toggle_directed()))
			.unwrap_or_default()
	}

	/// Flips weighting, discards the run and returns the new flag.
	pub fn toggle_weighted(&mut self) -> bool {
		self.edit("toggle weighted", |g| Ok(g.toggle_weighted()))
			.unwrap_or_default()
	}

	/// Clears the graph and the replay.
	pub fn clear(&mut self) {
		let _ = self.edit("clear", |g| {
			g.clear();
			Ok(())
		});
	}

	/// Drags a node. The run survives.
	pub fn move_node(&mut self, id: NodeId, position: Position) -> GraphResult<()> {
		self.graph.move_node(id, position)
	}

	/// Validates `request`, generates its steps and loads them for replay.
	pub fn run(&mut self, request: &RunRequest) -> EngineResult<StepSequence> {
		let plan = request.validate(&self.graph).inspect_err(|err| {
			warn!("run rejected: {err}");
		})?;
		let sequence = generate(&self.graph, &plan);
		self.replay.run(sequence.clone())?;
		info!(
			"{} run started from {} ({} steps)",
			plan.algorithm,
			plan.start,
			sequence.len()
		);
		Ok(sequence)
	}

	/// Manual step forward.
	pub fn next(&mut self) -> EngineResult<()> {
		Ok(self.replay.next()?)
	}

	/// Starts auto-play.
	pub fn play(&mut self) -> EngineResult<()> {
		Ok(self.replay.play()?)
	}

	/// Stops auto-play.
	pub fn pause(&mut self) {
		self.replay.pause();
	}

	/// Timer hook, see [`ReplayController::tick`].
	pub fn tick(&mut self) -> bool {
		self.replay.tick()
	}

	/// Drops the run and goes idle.
	pub fn reset(&mut self) {
		self.replay.reset();
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::step::{Algorithm, Goal};
	use crate::error::{EngineError, GraphError, RunError};

	fn id(c: char) -> NodeId {
		NodeId::new(c).unwrap()
	}

	fn chain() -> Session {
		let mut session = Session::default();
		for _ in 0..3 {
			session.add_node().unwrap();
		}
		session.add_edge(id('A'), id('B'), None).unwrap();
		session.add_edge(id('B'), id('C'), None).unwrap();
		session
	}

	#[test]
	fn run_loads_the_replay() {
		let mut session = chain();
		let seq = session
			.run(&RunRequest::new(Algorithm::Bfs, "A"))
			.unwrap();
		assert_eq!(seq.len(), 3);
		assert_eq!(session.replay().cursor(), 0);
		assert!(!session.is_stale(&seq));
	}

	#[test]
	fn rejected_run_keeps_the_previous_replay() {
		let mut session = chain();
		session.run(&RunRequest::new(Algorithm::Bfs, "A")).unwrap();
		session.next().unwrap();
		let err = session
			.run(&RunRequest::new(Algorithm::Bfs, "X"))
			.unwrap_err();
		assert_eq!(err, EngineError::Run(RunError::UnknownStartNode(id('X'))));
		assert_eq!(session.replay().cursor(), 1);
	}

	#[test]
	fn empty_graph_run_is_rejected() {
		let mut session = Session::default();
		assert_eq!(
			session.run(&RunRequest::new(Algorithm::Dfs, "A")),
			Err(EngineError::Run(RunError::EmptyGraph))
		);
	}

	#[test]
	fn graph_edits_reset_the_replay() {
		let mut session = chain();
		let seq = session
			.run(&RunRequest::new(Algorithm::Dfs, "A"))
			.unwrap();
		session.play().unwrap();
		session.add_node().unwrap();
		assert_eq!(session.replay().cursor(), -1);
		assert!(!session.replay().is_playing());
		assert!(session.is_stale(&seq));
	}

	#[test]
	fn toggles_reset_the_replay() {
		let mut session = chain();
		session.run(&RunRequest::new(Algorithm::Bfs, "A")).unwrap();
		assert!(session.toggle_directed());
		assert!(!session.replay().is_active());
		session.run(&RunRequest::new(Algorithm::Bfs, "A")).unwrap();
		assert!(session.toggle_weighted());
		assert!(!session.replay().is_active());
	}

	#[test]
	fn rejected_edit_keeps_the_replay() {
		let mut session = chain();
		session.run(&RunRequest::new(Algorithm::Bfs, "A")).unwrap();
		assert_eq!(
			session.add_edge(id('B'), id('A'), None),
			Err(GraphError::DuplicateEdge {
				from: id('B'),
				to: id('A')
			})
		);
		assert!(session.replay().is_active());
	}

	#[test]
	fn moving_nodes_keeps_the_replay() {
		let mut session = chain();
		session.run(&RunRequest::new(Algorithm::Bfs, "A")).unwrap();
		session
			.move_node(id('A'), Position { x: 5.0, y: 5.0 })
			.unwrap();
		assert!(session.replay().is_active());
	}

	#[test]
	fn shortest_path_summary_through_session() {
		let mut session = chain();
		let seq = session
			.run(
				&RunRequest::new(Algorithm::Bfs, "A")
					.end_node("C")
					.goal(Goal::ShortestPath),
			)
			.unwrap();
		assert_eq!(
			seq.summary().unwrap().final_path,
			vec![id('A'), id('B'), id('C')]
		);
	}

	#[test]
	fn clear_empties_graph_and_replay() {
		let mut session = chain();
		session.run(&RunRequest::new(Algorithm::Bfs, "A")).unwrap();
		session.clear();
		assert!(session.graph().is_empty());
		assert!(!session.replay().is_active());
	}
}
