//! Immutable traversal snapshots.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use super::graph::NodeId;

/// Traversal strategy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Algorithm {
	/// Breadth-first, driven by a queue.
	Bfs,
	/// Depth-first, driven by recursion.
	Dfs,
}

impl Algorithm {
	/// Upper-case label used on the wire and in the UI.
	pub fn name(self) -> &'static str {
		match self {
			Self::Bfs => "BFS",
			Self::Dfs => "DFS",
		}
	}
}

impl fmt::Display for Algorithm {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// What the user wants the run to achieve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Goal {
	/// Visit everything reachable from the start node.
	#[default]
	Traversal,
	/// BFS only, unweighted graphs only.
	ShortestPath,
	/// DFS only.
	PathExistence,
}

impl Goal {
	/// Wire name, e.g. `SHORTEST_PATH`.
	pub fn name(self) -> &'static str {
		match self {
			Self::Traversal => "TRAVERSAL",
			Self::ShortestPath => "SHORTEST_PATH",
			Self::PathExistence => "PATH_EXISTENCE",
		}
	}

	/// Whether `algorithm` knows how to pursue this goal.
	pub fn belongs_to(self, algorithm: Algorithm) -> bool {
		matches!(
			(self, algorithm),
			(Self::Traversal, _)
				| (Self::ShortestPath, Algorithm::Bfs)
				| (Self::PathExistence, Algorithm::Dfs)
		)
	}
}

impl fmt::Display for Goal {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// How a goal-directed run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
	/// The end node was reached.
	TargetFound,
	/// The search ran out of nodes first.
	TargetNotFound,
}

impl Outcome {
	/// Wire name, e.g. `TARGET_FOUND`.
	pub fn name(self) -> &'static str {
		match self {
			Self::TargetFound => "TARGET_FOUND",
			Self::TargetNotFound => "TARGET_NOT_FOUND",
		}
	}
}

/// BFS queue (front first) or DFS stack (bottom first).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frontier {
	/// Pending BFS nodes.
	Queue(Vec<NodeId>),
	/// Active DFS recursion frames.
	Stack(Vec<NodeId>),
}

impl Frontier {
	/// Contents regardless of kind.
	pub fn nodes(&self) -> &[NodeId] {
		match self {
			Self::Queue(nodes) | Self::Stack(nodes) => nodes,
		}
	}

	/// Queue contents, empty for a stack.
	pub fn queue(&self) -> &[NodeId] {
		match self {
			Self::Queue(nodes) => nodes,
			Self::Stack(_) => &[],
		}
	}

	/// Stack contents, empty for a queue.
	pub fn stack(&self) -> &[NodeId] {
		match self {
			Self::Stack(nodes) => nodes,
			Self::Queue(_) => &[],
		}
	}
}

/// Parent/distance bookkeeping of a shortest-path BFS.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Distances {
	/// `None` marks the start node.
	pub parent: BTreeMap<NodeId, Option<NodeId>>,
	/// Hop count from the start node.
	pub distance: BTreeMap<NodeId, usize>,
}

impl Distances {
	/// Bookkeeping holding only `start` at distance zero.
	pub fn seeded(start: NodeId) -> Self {
		Self {
			parent: BTreeMap::from([(start, None)]),
			distance: BTreeMap::from([(start, 0)]),
		}
	}

	/// Records `node` as discovered from `parent`, one hop further.
	pub fn record(&mut self, node: NodeId, parent: NodeId) {
		let d = self.distance.get(&parent).map_or(1, |d| d + 1);
		self.parent.insert(node, Some(parent));
		self.distance.insert(node, d);
	}

	/// Walks parent pointers from `node` back to the root.
	pub fn path_to(&self, node: NodeId) -> Option<Vec<NodeId>> {
		let mut path = vec![node];
		let mut current = node;
		while let Some(parent) = *self.parent.get(&current)? {
			path.push(parent);
			current = parent;
		}
		path.reverse();
		Some(path)
	}
}

/// Terminal metadata carried by the synthetic final step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Summary {
	/// Whether the end node was reached.
	pub outcome: Outcome,
	/// Empty when nothing was found.
	pub final_path: Vec<NodeId>,
}

impl Summary {
	/// `Some` path means found.
	pub fn from_path(path: Option<Vec<NodeId>>) -> Self {
		match path {
			Some(final_path) => Self {
				outcome: Outcome::TargetFound,
				final_path,
			},
			None => Self {
				outcome: Outcome::TargetNotFound,
				final_path: Vec::new(),
			},
		}
	}
}

/// One frozen moment of a traversal.
///
/// Every collection is an owned copy taken when the step was emitted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
	/// `None` only on the synthetic final step.
	pub current_node: Option<NodeId>,
	/// Discovery order, no duplicates.
	pub visited: Vec<NodeId>,
	/// Queue or stack after this step.
	pub frontier: Frontier,
	/// Node the run began from.
	pub start_node: NodeId,
	/// Target, when the goal has one.
	pub end_node: Option<NodeId>,
	/// Shortest-path BFS only.
	pub distances: Option<Distances>,
	/// BFS: set on the step that reached the end node.
	pub shortest_path: Option<Vec<NodeId>>,
	/// DFS: root-to-current recursion chain.
	pub path: Option<Vec<NodeId>>,
	/// Set only on the synthetic final step.
	pub summary: Option<Summary>,
	/// Strategy that produced the step.
	pub algorithm: Algorithm,
	/// Goal the generator pursued.
	pub goal: Goal,
}

impl Step {
	/// True for the synthetic final step.
	pub fn is_final_step(&self) -> bool {
		self.summary.is_some()
	}

	/// Outcome, final step only.
	pub fn outcome(&self) -> Option<Outcome> {
		self.summary.as_ref().map(|s| s.outcome)
	}

	/// Path from the summary, empty elsewhere.
	pub fn final_path(&self) -> &[NodeId] {
		self.summary
			.as_ref()
			.map(|s| s.final_path.as_slice())
			.unwrap_or(&[])
	}

	/// BFS queue snapshot.
	pub fn queue(&self) -> &[NodeId] {
		self.frontier.queue()
	}

	/// DFS stack snapshot.
	pub fn stack(&self) -> &[NodeId] {
		self.frontier.stack()
	}
}

/// Output of one run. Shared read-only between the replay controller and
/// anything displaying it; cloning only bumps a reference count.
#[derive(Clone, Debug, PartialEq)]
pub struct StepSequence {
	steps: Arc<[Step]>,
	algorithm: Algorithm,
	goal_requested: Goal,
	goal_applied: Goal,
	start_node: NodeId,
	end_node: Option<NodeId>,
	graph_revision: u64,
}

impl StepSequence {
	pub(crate) fn new(
		steps: Vec<Step>,
		algorithm: Algorithm,
		goal_requested: Goal,
		goal_applied: Goal,
		start_node: NodeId,
		end_node: Option<NodeId>,
		graph_revision: u64,
	) -> Self {
		Self {
			steps: steps.into(),
			algorithm,
			goal_requested,
			goal_applied,
			start_node,
			end_node,
			graph_revision,
		}
	}

	/// All steps, final step last.
	pub fn steps(&self) -> &[Step] {
		&self.steps
	}

	/// Step at a 0-based index.
	pub fn get(&self, index: usize) -> Option<&Step> {
		self.steps.get(index)
	}

	/// Number of steps including the final one.
	pub fn len(&self) -> usize {
		self.steps.len()
	}

	/// Never true for a generated run.
	pub fn is_empty(&self) -> bool {
		self.steps.is_empty()
	}

	/// The synthetic final step.
	pub fn last(&self) -> Option<&Step> {
		self.steps.last()
	}

	/// Strategy used for every step.
	pub fn algorithm(&self) -> Algorithm {
		self.algorithm
	}

	/// Goal as submitted by the user.
	pub fn goal_requested(&self) -> Goal {
		self.goal_requested
	}

	/// Goal the generator actually pursued after downgrades.
	pub fn goal_applied(&self) -> Goal {
		self.goal_applied
	}

	/// Validated start node.
	pub fn start_node(&self) -> NodeId {
		self.start_node
	}

	/// Validated end node, if any.
	pub fn end_node(&self) -> Option<NodeId> {
		self.end_node
	}

	/// Revision of the graph this run was generated from.
	pub fn graph_revision(&self) -> u64 {
		self.graph_revision
	}

	/// Summary of the synthetic final step, if the goal produced one.
	pub fn summary(&self) -> Option<&Summary> {
		self.last().and_then(|s| s.summary.as_ref())
	}
}
