//! Randomized checks of the step generators.

// Only the library and the test harness crates are used directly.
#![allow(unused_crate_dependencies)]

use std::collections::{HashSet, VecDeque};

use proptest::prelude::*;
use traversal_visualizer::engine::{
	Algorithm, Goal, Graph, NodeId, Outcome, RunRequest, StepSequence, run,
};

#[derive(Clone, Debug)]
struct Case {
	nodes: usize,
	directed: bool,
	edges: Vec<(usize, usize)>,
	start: usize,
	end: usize,
}

impl Case {
	fn graph(&self) -> Graph {
		let mut graph = Graph::new();
		for _ in 0..self.nodes {
			graph.add_node().unwrap();
		}
		if self.directed {
			graph.toggle_directed();
		}
		for &(a, b) in &self.edges {
			// Self-loops and duplicates are rejected; skipping them is fine.
			let _ = graph.add_edge(node(a), node(b), None);
		}
		graph
	}

	fn run(&self, graph: &Graph, algorithm: Algorithm, goal: Goal) -> StepSequence {
		let request = RunRequest::new(algorithm, node(self.start).to_string())
			.end_node(node(self.end).to_string())
			.goal(goal);
		run::generate(graph, &request.validate(graph).unwrap())
	}
}

fn node(index: usize) -> NodeId {
	NodeId::from_index(index).unwrap()
}

fn case() -> impl Strategy<Value = Case> {
	(1usize..=8).prop_flat_map(|n| {
		(
			Just(n),
			any::<bool>(),
			proptest::collection::vec((0..n, 0..n), 0..16),
			0..n,
			0..n,
		)
			.prop_map(|(nodes, directed, edges, start, end)| Case {
				nodes,
				directed,
				edges,
				start,
				end,
			})
	})
}

/// Hop count from `start` to `end`, computed independently of the engine.
fn min_hops(graph: &Graph, start: NodeId, end: NodeId) -> Option<usize> {
	let mut seen = HashSet::from([start]);
	let mut queue = VecDeque::from([(start, 0)]);
	while let Some((at, hops)) = queue.pop_front() {
		if at == end {
			return Some(hops);
		}
		for edge in graph.edges() {
			let next = if edge.source == at {
				edge.target
			} else if !graph.is_directed() && edge.target == at {
				edge.source
			} else {
				continue;
			};
			if seen.insert(next) {
				queue.push_back((next, hops + 1));
			}
		}
	}
	None
}

fn is_edge(graph: &Graph, a: NodeId, b: NodeId) -> bool {
	graph.edges().iter().any(|e| e.connects(a, b, graph.is_directed()))
}

proptest! {
	/// Visited never repeats, never shrinks and never exceeds the graph.
	#[test]
	fn visited_grows_monotonically(
		c in case(),
		bfs in any::<bool>(),
		goal in prop_oneof![Just(Goal::Traversal), Just(Goal::ShortestPath), Just(Goal::PathExistence)],
	) {
		let graph = c.graph();
		let algorithm = if bfs { Algorithm::Bfs } else { Algorithm::Dfs };
		let seq = c.run(&graph, algorithm, goal);
		prop_assert!(!seq.is_empty());

		let mut previous: &[NodeId] = &[];
		for step in seq.steps() {
			let unique: HashSet<_> = step.visited.iter().collect();
			prop_assert_eq!(unique.len(), step.visited.len());
			prop_assert!(step.visited.len() <= c.nodes);
			prop_assert!(step.visited.starts_with(previous));
			previous = &step.visited;
		}
	}

	/// Every recorded BFS distance is one more than its parent's, down to
	/// zero at the start node.
	#[test]
	fn bfs_distances_follow_parents(c in case()) {
		let graph = c.graph();
		let seq = c.run(&graph, Algorithm::Bfs, Goal::ShortestPath);
		let start = node(c.start);
		for step in seq.steps() {
			let Some(d) = &step.distances else {
				continue;
			};
			prop_assert_eq!(d.distance.get(&start), Some(&0));
			for (x, parent) in &d.parent {
				match parent {
					None => prop_assert_eq!(*x, start),
					Some(p) => prop_assert_eq!(d.distance[x], d.distance[p] + 1),
				}
				let path = d.path_to(*x).unwrap();
				prop_assert_eq!(path.first(), Some(&start));
				let hops: Vec<_> = path.iter().map(|n| d.distance[n]).collect();
				prop_assert!(hops.iter().enumerate().all(|(i, &h)| h == i));
			}
		}
	}

	/// A found BFS path has the minimum hop count, and the search stops as
	/// soon as the end node is discovered.
	#[test]
	fn bfs_shortest_path_is_minimal(c in case()) {
		let graph = c.graph();
		let seq = c.run(&graph, Algorithm::Bfs, Goal::ShortestPath);
		let (start, end) = (node(c.start), node(c.end));
		let last = seq.last().unwrap();

		match min_hops(&graph, start, end) {
			Some(hops) => {
				prop_assert_eq!(last.outcome(), Some(Outcome::TargetFound));
				prop_assert_eq!(last.final_path().len(), hops + 1);
				let content = &seq.steps()[..seq.len() - 1];
				let first_hit = content.iter().position(|s| s.visited.contains(&end));
				prop_assert_eq!(first_hit, Some(content.len() - 1));
			}
			None => {
				prop_assert_eq!(last.outcome(), Some(Outcome::TargetNotFound));
				prop_assert!(last.final_path().is_empty());
			}
		}
	}

	/// A DFS path runs from start to end over real edges without revisiting.
	#[test]
	fn dfs_path_is_a_simple_walk(c in case()) {
		let graph = c.graph();
		let seq = c.run(&graph, Algorithm::Dfs, Goal::PathExistence);
		let (start, end) = (node(c.start), node(c.end));
		let last = seq.last().unwrap();
		let path = last.final_path();

		prop_assert_eq!(
			last.outcome() == Some(Outcome::TargetFound),
			min_hops(&graph, start, end).is_some()
		);
		if !path.is_empty() {
			prop_assert_eq!(path.first(), Some(&start));
			prop_assert_eq!(path.last(), Some(&end));
			let unique: HashSet<_> = path.iter().collect();
			prop_assert_eq!(unique.len(), path.len());
			for pair in path.windows(2) {
				prop_assert!(is_edge(&graph, pair[0], pair[1]));
			}
		}
	}

	/// Same graph and request, same steps.
	#[test]
	fn generation_is_deterministic(c in case(), bfs in any::<bool>()) {
		let graph = c.graph();
		let (algorithm, goal) = if bfs {
			(Algorithm::Bfs, Goal::ShortestPath)
		} else {
			(Algorithm::Dfs, Goal::PathExistence)
		};
		let first = c.run(&graph, algorithm, goal);
		let second = c.run(&graph, algorithm, goal);
		prop_assert_eq!(first.steps(), second.steps());
	}
}
