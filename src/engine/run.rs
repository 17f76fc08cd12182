//! Run requests: validation against the live graph and dispatch to the
//! matching step generator.

use log::{debug, warn};
use serde::Deserialize;

use super::graph::{Graph, NodeId};
use super::step::{Algorithm, Goal, StepSequence};
use super::{bfs, dfs};
use crate::error::{RunError, RunResult};

/// Raw request as submitted by the setup panel.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunRequest {
	/// Strategy to run.
	pub algorithm: Algorithm,
	/// Start node letter as typed.
	pub start_node: String,
	/// End node letter as typed, blank meaning none.
	#[serde(default)]
	pub end_node: Option<String>,
	/// Requested goal.
	#[serde(default, rename = "algorithmGoal")]
	pub goal: Goal,
}

impl RunRequest {
	/// Plain traversal request with no end node.
	pub fn new(algorithm: Algorithm, start_node: impl Into<String>) -> Self {
		Self {
			algorithm,
			start_node: start_node.into(),
			end_node: None,
			goal: Goal::Traversal,
		}
	}

	/// Sets the end node.
	#[must_use]
	pub fn end_node(mut self, end: impl Into<String>) -> Self {
		self.end_node = Some(end.into());
		self
	}

	/// Sets the goal.
	#[must_use]
	pub fn goal(mut self, goal: Goal) -> Self {
		self.goal = goal;
		self
	}

	/// Checks the request against `graph`.
	pub fn validate(&self, graph: &Graph) -> RunResult<RunPlan> {
		if graph.is_empty() {
			return Err(RunError::EmptyGraph);
		}
		if self.start_node.trim().is_empty() {
			return Err(RunError::MissingStartNode);
		}
		let start = NodeId::parse(&self.start_node)?;
		if !graph.contains(start) {
			return Err(RunError::UnknownStartNode(start));
		}
		let end = match self.end_node.as_deref().map(str::trim) {
			None | Some("") => None,
			Some(raw) => {
				let end = NodeId::parse(raw)?;
				if !graph.contains(end) {
					return Err(RunError::UnknownEndNode(end));
				}
				Some(end)
			}
		};
		Ok(RunPlan {
			algorithm: self.algorithm,
			start,
			end,
			goal: self.goal,
		})
	}
}

/// A validated run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunPlan {
	/// Strategy to run.
	pub algorithm: Algorithm,
	/// Existing start node.
	pub start: NodeId,
	/// Existing end node, if one was given.
	pub end: Option<NodeId>,
	/// Requested goal, before any downgrade.
	pub goal: Goal,
}

impl RunPlan {
	/// Goal the generator will actually pursue on `graph`.
	pub fn effective_goal(&self, graph: &Graph) -> Goal {
		let active = match self.algorithm {
			Algorithm::Bfs => bfs::shortest_path_mode(graph, self.end, self.goal),
			Algorithm::Dfs => dfs::path_existence_mode(self.end, self.goal),
		};
		if active { self.goal } else { Goal::Traversal }
	}
}

/// Runs the generator for `plan` and stamps the result with the graph
/// revision.
pub fn generate(graph: &Graph, plan: &RunPlan) -> StepSequence {
	let applied = plan.effective_goal(graph);
	if applied != plan.goal {
		warn!(
			"{} goal {} not applicable (end node: {:?}, weighted: {}); running plain traversal",
			plan.algorithm,
			plan.goal,
			plan.end,
			graph.is_weighted()
		);
	}
	let steps = match plan.algorithm {
		Algorithm::Bfs => bfs::generate(graph, Some(plan.start), plan.end, applied),
		Algorithm::Dfs => dfs::generate(graph, Some(plan.start), plan.end, applied),
	};
	debug!(
		"{} run from {} produced {} steps at graph revision {}",
		plan.algorithm,
		plan.start,
		steps.len(),
		graph.revision()
	);
	StepSequence::new(
		steps,
		plan.algorithm,
		plan.goal,
		applied,
		plan.start,
		plan.end,
		graph.revision(),
	)
}
