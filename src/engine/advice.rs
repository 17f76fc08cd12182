//! Suitability verdicts shown in the BFS vs DFS comparison panel.

use super::step::{Algorithm, Goal};

/// Headline plus supporting bullet points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Verdict {
	/// One-line verdict.
	pub title: &'static str,
	/// Bullet points backing it.
	pub reasons: &'static [&'static str],
}

/// Rows of the complexity table: algorithm, time, space.
pub const COMPLEXITY: [(Algorithm, &str, &str); 2] = [
	(Algorithm::Bfs, "O(V + E)", "O(V)"),
	(Algorithm::Dfs, "O(V + E)", "O(V)"),
];

/// Recommends an algorithm for `goal` on the current graph.
pub fn recommend(algorithm: Algorithm, goal: Goal, is_weighted: bool) -> Verdict {
	match (goal, algorithm) {
		(Goal::ShortestPath, _) if is_weighted => Verdict {
			title: "Neither BFS nor DFS is suitable.",
			reasons: &[
				"The graph contains weighted edges.",
				"BFS cannot guarantee shortest paths when weights are involved.",
				"DFS does not prioritize path length.",
				"Algorithms like Dijkstra are required for weighted shortest paths.",
			],
		},
		(Goal::ShortestPath, _) => Verdict {
			title: "BFS is recommended.",
			reasons: &[
				"BFS explores the graph level by level from the start node.",
				"In an unweighted graph, the first time the target is reached, that path is guaranteed to be shortest.",
				"DFS may reach the target along a longer path because it explores deeply before backtracking.",
			],
		},
		(Goal::PathExistence, _) => Verdict {
			title: "DFS is often preferred, but BFS also works.",
			reasons: &[
				"Both BFS and DFS can determine whether a path exists between two nodes.",
				"DFS naturally follows one path deeply, which can feel intuitive when just checking for any connection.",
				"BFS can also be used, and may discover shorter paths, but path length is not required for this goal.",
			],
		},
		(Goal::Traversal, Algorithm::Bfs) => Verdict {
			title: "BFS is well-suited for broad exploration.",
			reasons: &[
				"BFS reveals the graph layer by layer, which is useful for understanding distance from the start node.",
				"It is a good choice when you care about how far nodes are from the start.",
				"DFS can still traverse the whole graph, but its deep-first order may feel less structured for overview.",
			],
		},
		(Goal::Traversal, Algorithm::Dfs) => Verdict {
			title: "DFS is well-suited for deep exploration.",
			reasons: &[
				"DFS follows paths as far as possible before backtracking, which is helpful for exploring long chains.",
				"It is a good choice when you care about discovering deep structures or confirming reachability.",
				"BFS can give better intuition about distance levels, but DFS keeps the focus on one path at a time.",
			],
		},
	}
}

/// "Directed · Weighted" style label.
pub fn graph_kind_label(is_directed: bool, is_weighted: bool) -> String {
	format!(
		"{} · {}",
		if is_directed { "Directed" } else { "Undirected" },
		if is_weighted { "Weighted" } else { "Unweighted" }
	)
}
