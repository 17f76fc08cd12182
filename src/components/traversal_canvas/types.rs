use crate::engine::{Graph, NodeId, Step};

/// How a node is painted for the active step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeRole {
	Unvisited,
	Visited,
	/// Waiting in the queue or on the stack.
	Frontier,
	/// Part of the highlighted path.
	OnPath,
	Current,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
	pub id: NodeId,
	pub x: f64,
	pub y: f64,
	pub role: NodeRole,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneEdge {
	pub from: (f64, f64),
	pub to: (f64, f64),
	pub weight: Option<f64>,
	pub on_path: bool,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
	pub nodes: Vec<SceneNode>,
	pub edges: Vec<SceneEdge>,
	pub directed: bool,
	pub weighted: bool,
}

impl Scene {
	pub fn build(graph: &Graph, step: Option<&Step>) -> Self {
		let path = step.map(highlighted_path).unwrap_or_default();
		let nodes = graph
			.nodes()
			.iter()
			.map(|n| SceneNode {
				id: n.id,
				x: n.position.x,
				y: n.position.y,
				role: step.map_or(NodeRole::Unvisited, |s| role_of(n.id, s, &path)),
			})
			.collect();
		let edges = graph
			.edges()
			.iter()
			.filter_map(|e| {
				let (a, b) = (graph.node(e.source)?, graph.node(e.target)?);
				Some(SceneEdge {
					from: (a.position.x, a.position.y),
					to: (b.position.x, b.position.y),
					weight: e.weight,
					on_path: path.windows(2).any(|w| {
						e.connects(w[0], w[1], graph.is_directed())
					}),
				})
			})
			.collect();
		Self {
			nodes,
			edges,
			directed: graph.is_directed(),
			weighted: graph.is_weighted(),
		}
	}

	pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
		self.nodes.iter().find(|n| n.id == id)
	}
}

/// Final path on the summary step, the BFS shortest path once found, or the
/// live DFS recursion chain.
fn highlighted_path(step: &Step) -> Vec<NodeId> {
	if step.is_final_step() {
		return step.final_path().to_vec();
	}
	step.shortest_path
		.clone()
		.or_else(|| step.path.clone())
		.unwrap_or_default()
}

fn role_of(id: NodeId, step: &Step, path: &[NodeId]) -> NodeRole {
	if step.current_node == Some(id) {
		NodeRole::Current
	} else if path.contains(&id) {
		NodeRole::OnPath
	} else if step.frontier.nodes().contains(&id) {
		NodeRole::Frontier
	} else if step.visited.contains(&id) {
		NodeRole::Visited
	} else {
		NodeRole::Unvisited
	}
}
