//! Breadth-first step generation.
//!
//! Plain FIFO BFS. One step for the start node, then one step per newly
//! discovered neighbor. With the shortest-path goal on an unweighted graph
//! the generator also tracks parents and distances, stops at the first step
//! that reaches the end node, and appends a synthetic summary step.

use std::collections::VecDeque;

use log::{debug, warn};

use super::graph::{Graph, NodeId};
use super::step::{Algorithm, Distances, Frontier, Goal, Step, Summary};

/// Whether a BFS run with these inputs computes a shortest path.
pub fn shortest_path_mode(graph: &Graph, end: Option<NodeId>, goal: Goal) -> bool {
	goal == Goal::ShortestPath && end.is_some() && !graph.is_weighted()
}

/// Generates every BFS step from `start` (first node when `None`).
///
/// Returns an empty sequence for an empty graph or an unknown start node.
pub fn generate(graph: &Graph, start: Option<NodeId>, end: Option<NodeId>, goal: Goal) -> Vec<Step> {
	let adjacency = graph.adjacency();
	let Some(start) = start.or_else(|| adjacency.first()) else {
		return Vec::new();
	};
	if !adjacency.contains(start) {
		warn!("BFS start node {start} is not in the graph");
		return Vec::new();
	}

	let shortest = shortest_path_mode(graph, end, goal);
	let target = end.filter(|_| shortest);
	let snapshot = Snapshot {
		start,
		end,
		goal,
	};

	let mut visited = vec![start];
	let mut queue = VecDeque::from([start]);
	let mut distances = shortest.then(|| Distances::seeded(start));
	let mut found = (target == Some(start)).then(|| vec![start]);
	let mut steps = vec![snapshot.step(start, &visited, &queue, &distances, found.clone())];

	'search: while found.is_none() {
		let Some(node) = queue.pop_front() else {
			break;
		};
		for &next in adjacency.neighbors(node) {
			if visited.contains(&next) {
				continue;
			}
			visited.push(next);
			queue.push_back(next);
			if let Some(d) = distances.as_mut() {
				d.record(next, node);
			}
			if target == Some(next) {
				found = distances.as_ref().and_then(|d| d.path_to(next));
				steps.push(snapshot.step(next, &visited, &queue, &distances, found.clone()));
				break 'search;
			}
			steps.push(snapshot.step(next, &visited, &queue, &distances, None));
		}
	}

	if shortest {
		let summary = Summary::from_path(found);
		debug!(
			"BFS {start}->{:?}: {} after {} steps",
			end,
			summary.outcome.name(),
			steps.len()
		);
		steps.push(snapshot.summary(&visited, &queue, &distances, summary));
	} else {
		debug!("BFS from {start}: {} steps, {} visited", steps.len(), visited.len());
	}
	steps
}

/// Fields shared by every step of one run.
struct Snapshot {
	start: NodeId,
	end: Option<NodeId>,
	goal: Goal,
}

impl Snapshot {
	fn step(
		&self,
		current: NodeId,
		visited: &[NodeId],
		queue: &VecDeque<NodeId>,
		distances: &Option<Distances>,
		shortest_path: Option<Vec<NodeId>>,
	) -> Step {
		Step {
			current_node: Some(current),
			visited: visited.to_vec(),
			frontier: Frontier::Queue(queue.iter().copied().collect()),
			start_node: self.start,
			end_node: self.end,
			distances: distances.clone(),
			shortest_path,
			path: None,
			summary: None,
			algorithm: Algorithm::Bfs,
			goal: self.goal,
		}
	}

	fn summary(
		&self,
		visited: &[NodeId],
		queue: &VecDeque<NodeId>,
		distances: &Option<Distances>,
		summary: Summary,
	) -> Step {
		Step {
			current_node: None,
			summary: Some(summary),
			..self.step(self.start, visited, queue, distances, None)
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::engine::step::Outcome;

	fn id(c: char) -> NodeId {
		NodeId::new(c).unwrap()
	}

	fn graph(nodes: usize, directed: bool, edges: &[(char, char)]) -> Graph {
		let mut graph = Graph::new();
		for _ in 0..nodes {
			graph.add_node().unwrap();
		}
		if directed {
			graph.toggle_directed();
		}
		for &(a, b) in edges {
			graph.add_edge(id(a), id(b), None).unwrap();
		}
		graph
	}

	fn currents(steps: &[Step]) -> Vec<Option<NodeId>> {
		steps.iter().map(|s| s.current_node).collect()
	}

	#[test]
	fn chain_traversal_has_no_summary() {
		let g = graph(3, false, &[('A', 'B'), ('B', 'C')]);
		let steps = generate(&g, Some(id('A')), None, Goal::Traversal);
		assert_eq!(steps.len(), 3);
		assert_eq!(steps[2].visited, vec![id('A'), id('B'), id('C')]);
		assert!(steps.iter().all(|s| !s.is_final_step()));
		assert!(steps.iter().all(|s| s.distances.is_none()));
	}

	#[test]
	fn start_step_shows_seeded_queue() {
		let g = graph(2, false, &[('A', 'B')]);
		let steps = generate(&g, Some(id('A')), None, Goal::Traversal);
		assert_eq!(steps[0].current_node, Some(id('A')));
		assert_eq!(steps[0].queue(), &[id('A')]);
		// A was dequeued before B was discovered.
		assert_eq!(steps[1].queue(), &[id('B')]);
	}

	#[test]
	fn start_defaults_to_first_node() {
		let g = graph(2, false, &[('A', 'B')]);
		let steps = generate(&g, None, None, Goal::Traversal);
		assert_eq!(steps[0].start_node, id('A'));
	}

	#[test]
	fn empty_graph_yields_no_steps() {
		assert!(generate(&Graph::new(), None, None, Goal::Traversal).is_empty());
	}

	#[test]
	fn level_order_across_branches() {
		let g = graph(5, false, &[('A', 'B'), ('A', 'C'), ('B', 'D'), ('C', 'E')]);
		let steps = generate(&g, Some(id('A')), None, Goal::Traversal);
		assert_eq!(
			steps.last().unwrap().visited,
			vec![id('A'), id('B'), id('C'), id('D'), id('E')]
		);
		assert_eq!(steps[2].queue(), &[id('B'), id('C')]);
	}

	#[test]
	fn shortest_path_found_and_summarized() {
		let g = graph(3, false, &[('A', 'B'), ('B', 'C')]);
		let steps = generate(&g, Some(id('A')), Some(id('C')), Goal::ShortestPath);
		let last = steps.last().unwrap();
		assert!(last.is_final_step());
		assert_eq!(last.current_node, None);
		assert_eq!(last.outcome(), Some(Outcome::TargetFound));
		assert_eq!(last.final_path(), &[id('A'), id('B'), id('C')]);
		let reached = &steps[steps.len() - 2];
		assert_eq!(reached.current_node, Some(id('C')));
		assert_eq!(
			reached.shortest_path.as_deref(),
			Some(&[id('A'), id('B'), id('C')][..])
		);
	}

	#[test]
	fn shortest_path_stops_at_first_discovery() {
		// C is discovered from A before D or E are looked at.
		let g = graph(5, false, &[('A', 'B'), ('A', 'C'), ('A', 'D'), ('B', 'E')]);
		let steps = generate(&g, Some(id('A')), Some(id('C')), Goal::ShortestPath);
		assert_eq!(
			currents(&steps),
			vec![Some(id('A')), Some(id('B')), Some(id('C')), None]
		);
		assert!(!steps.last().unwrap().visited.contains(&id('D')));
	}

	#[test]
	fn unreachable_target_reports_not_found() {
		let g = graph(3, false, &[('A', 'B')]);
		let steps = generate(&g, Some(id('A')), Some(id('C')), Goal::ShortestPath);
		let last = steps.last().unwrap();
		assert_eq!(last.outcome(), Some(Outcome::TargetNotFound));
		assert!(last.final_path().is_empty());
		assert!(last.queue().is_empty());
	}

	#[test]
	fn weighted_graph_disables_shortest_path_mode() {
		let mut g = graph(3, false, &[('A', 'B'), ('B', 'C')]);
		g.toggle_weighted();
		let steps = generate(&g, Some(id('A')), Some(id('C')), Goal::ShortestPath);
		assert_eq!(steps.len(), 3);
		assert!(steps.iter().all(|s| s.summary.is_none() && s.distances.is_none()));
	}

	#[test]
	fn distances_grow_by_one_from_parent() {
		let g = graph(4, false, &[('A', 'B'), ('B', 'C'), ('C', 'D')]);
		let steps = generate(&g, Some(id('A')), Some(id('D')), Goal::ShortestPath);
		let d = steps.last().unwrap().distances.as_ref().unwrap();
		assert_eq!(d.distance[&id('D')], 3);
		assert_eq!(d.parent[&id('D')], Some(id('C')));
		assert_eq!(d.parent[&id('A')], None);
	}

	#[test]
	fn start_equal_to_end_is_found_immediately() {
		let g = graph(2, false, &[('A', 'B')]);
		let steps = generate(&g, Some(id('A')), Some(id('A')), Goal::ShortestPath);
		assert_eq!(steps.len(), 2);
		assert_eq!(steps[1].final_path(), &[id('A')]);
	}

	#[test]
	fn earlier_steps_are_not_mutated_by_later_ones() {
		let g = graph(3, false, &[('A', 'B'), ('A', 'C')]);
		let steps = generate(&g, Some(id('A')), None, Goal::Traversal);
		assert_eq!(steps[0].visited, vec![id('A')]);
		assert_eq!(steps[1].visited, vec![id('A'), id('B')]);
	}
}
