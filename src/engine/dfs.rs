//! Depth-first step generation.
//!
//! Recursive DFS with an explicit mirror of the call stack. The recursion
//! depth is bounded by the 26-node limit. Every call reports back whether
//! the end node was reached, so a hit unwinds all pending neighbor loops
//! without shared flags.

use log::{debug, warn};

use super::graph::{Adjacency, Graph, NodeId};
use super::step::{Algorithm, Frontier, Goal, Step, Summary};

/// Whether a DFS run with these inputs looks for a start-to-end path.
pub fn path_existence_mode(end: Option<NodeId>, goal: Goal) -> bool {
	goal == Goal::PathExistence && end.is_some()
}

/// Result of exploring one subtree.
#[derive(Debug, PartialEq, Eq)]
enum Search {
	Continue,
	Found(Vec<NodeId>),
}

/// Generates every DFS step from `start` (first node when `None`).
///
/// A path found here is valid but not necessarily the shortest one.
pub fn generate(graph: &Graph, start: Option<NodeId>, end: Option<NodeId>, goal: Goal) -> Vec<Step> {
	let adjacency = graph.adjacency();
	let Some(start) = start.or_else(|| adjacency.first()) else {
		return Vec::new();
	};
	if !adjacency.contains(start) {
		warn!("DFS start node {start} is not in the graph");
		return Vec::new();
	}

	let existence = path_existence_mode(end, goal);
	let mut walker = Walker {
		adjacency: &adjacency,
		target: end.filter(|_| existence),
		start,
		end,
		goal,
		visited: Vec::new(),
		stack: Vec::new(),
		path: Vec::new(),
		steps: Vec::new(),
	};
	let found = match walker.visit(start) {
		Search::Found(path) => Some(path),
		Search::Continue => None,
	};

	if existence {
		let summary = Summary::from_path(found);
		debug!(
			"DFS {start}->{:?}: {} after {} steps",
			end,
			summary.outcome.name(),
			walker.steps.len()
		);
		let step = Step {
			current_node: None,
			path: None,
			summary: Some(summary),
			..walker.snapshot(start)
		};
		walker.steps.push(step);
	} else {
		debug!(
			"DFS from {start}: {} steps, {} visited",
			walker.steps.len(),
			walker.visited.len()
		);
	}
	walker.steps
}

struct Walker<'a> {
	adjacency: &'a Adjacency,
	target: Option<NodeId>,
	start: NodeId,
	end: Option<NodeId>,
	goal: Goal,
	visited: Vec<NodeId>,
	stack: Vec<NodeId>,
	path: Vec<NodeId>,
	steps: Vec<Step>,
}

impl Walker<'_> {
	fn visit(&mut self, node: NodeId) -> Search {
		self.visited.push(node);
		self.stack.push(node);
		self.path.push(node);
		let step = self.snapshot(node);
		self.steps.push(step);

		let result = if self.target == Some(node) {
			Search::Found(self.path.clone())
		} else {
			self.explore(node)
		};

		self.stack.pop();
		self.path.pop();
		result
	}

	fn explore(&mut self, node: NodeId) -> Search {
		let adjacency = self.adjacency;
		for &next in adjacency.neighbors(node) {
			if self.visited.contains(&next) {
				continue;
			}
			if let Search::Found(path) = self.visit(next) {
				return Search::Found(path);
			}
		}
		Search::Continue
	}

	fn snapshot(&self, current: NodeId) -> Step {
		Step {
			current_node: Some(current),
			visited: self.visited.clone(),
			frontier: Frontier::Stack(self.stack.clone()),
			start_node: self.start,
			end_node: self.end,
			distances: None,
			shortest_path: None,
			path: Some(self.path.clone()),
			summary: None,
			algorithm: Algorithm::Dfs,
			goal: self.goal,
		}
	}
}
