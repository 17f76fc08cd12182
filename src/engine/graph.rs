//! Graph model edited by the user.
//!
//! Nodes carry single-letter ids and a cosmetic position. Directedness and
//! weighting are global flags; toggling them never rewrites edge data.
//! Traversals never look at the graph directly, they work off the derived
//! [`Adjacency`] view.

use std::collections::HashMap;
use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{GraphError, GraphResult, RunError, RunResult};

/// Letters A-Z, one per node.
pub const MAX_NODES: usize = 26;

/// Single uppercase letter identifying a node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(char);

impl NodeId {
	/// Wraps `letter` if it is an ASCII uppercase letter.
	pub fn new(letter: char) -> Option<Self> {
		letter.is_ascii_uppercase().then_some(Self(letter))
	}

	/// Id for the `index`-th letter (0 = A).
	pub fn from_index(index: usize) -> Option<Self> {
		if index < MAX_NODES {
			Some(Self((b'A' + index as u8) as char))
		} else {
			None
		}
	}

	/// Parses user input: surrounding whitespace is ignored and lowercase
	/// letters are accepted.
	pub fn parse(input: &str) -> RunResult<Self> {
		let trimmed = input.trim();
		let mut chars = trimmed.chars();
		match (chars.next(), chars.next()) {
			(Some(c), None) => Self::new(c.to_ascii_uppercase())
				.ok_or_else(|| RunError::InvalidNodeId(trimmed.to_string())),
			_ => Err(RunError::InvalidNodeId(trimmed.to_string())),
		}
	}

	/// The letter itself.
	pub fn letter(self) -> char {
		self.0
	}
}

impl fmt::Display for NodeId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.0)
	}
}

impl Serialize for NodeId {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.collect_str(self)
	}
}

/// Layout coordinate. Only the canvas cares about it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Position {
	/// Horizontal offset in canvas units.
	pub x: f64,
	/// Vertical offset in canvas units, growing downwards.
	pub y: f64,
}

/// Circle on which new nodes are placed.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Layout {
	/// Circle center, x.
	pub center_x: f64,
	/// Circle center, y.
	pub center_y: f64,
	/// Distance from the center to each new node.
	pub radius: f64,
}

impl Default for Layout {
	fn default() -> Self {
		Self {
			center_x: 300.0,
			center_y: 250.0,
			radius: 180.0,
		}
	}
}

impl Layout {
	/// Spot for a node added when `count` nodes already exist.
	pub fn position_for(&self, count: usize) -> Position {
		let angle = 2.0 * PI * count as f64 / (count as f64 + 1.0);
		Position {
			x: self.center_x + self.radius * angle.cos(),
			y: self.center_y + self.radius * angle.sin(),
		}
	}
}

/// A graph vertex.
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
	/// Letter shown on the canvas.
	pub id: NodeId,
	/// Where the canvas draws it.
	pub position: Position,
}

/// A link between two nodes. Direction only matters while the graph is
/// directed.
#[derive(Clone, Debug, PartialEq)]
pub struct Edge {
	/// `"{source}-{target}"`.
	pub id: String,
	/// Tail of the edge.
	pub source: NodeId,
	/// Head of the edge.
	pub target: NodeId,
	/// Kept even while the graph is unweighted.
	pub weight: Option<f64>,
}

impl Edge {
	fn new(source: NodeId, target: NodeId, weight: Option<f64>) -> Self {
		Self {
			id: format!("{source}-{target}"),
			source,
			target,
			weight,
		}
	}

	/// Whether this edge links `a` to `b` under the given directedness.
	pub fn connects(&self, a: NodeId, b: NodeId, directed: bool) -> bool {
		(self.source == a && self.target == b)
			|| (!directed && self.source == b && self.target == a)
	}
}

/// Nodes, edges and the two global flags.
#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	directed: bool,
	weighted: bool,
	layout: Layout,
	revision: u64,
}

impl Graph {
	/// Empty, undirected, unweighted graph on the default layout.
	pub fn new() -> Self {
		Self::default()
	}

	/// Empty graph placing new nodes on `layout`.
	pub fn with_layout(layout: Layout) -> Self {
		Self {
			layout,
			..Self::default()
		}
	}

	/// Nodes in creation order.
	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	/// Edges in creation order.
	pub fn edges(&self) -> &[Edge] {
		&self.edges
	}

	/// Node ids in creation order.
	pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
		self.nodes.iter().map(|n| n.id)
	}

	/// Looks up a node by id.
	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.nodes.iter().find(|n| n.id == id)
	}

	/// Whether `id` names an existing node.
	pub fn contains(&self, id: NodeId) -> bool {
		self.node(id).is_some()
	}

	/// True when there are no nodes.
	pub fn is_empty(&self) -> bool {
		self.nodes.is_empty()
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.nodes.len()
	}

	/// Whether edges are one-way.
	pub fn is_directed(&self) -> bool {
		self.directed
	}

	/// Whether edge weights are shown and attached to new edges.
	pub fn is_weighted(&self) -> bool {
		self.weighted
	}

	/// Bumped on every structural change. Position moves do not count.
	pub fn revision(&self) -> u64 {
		self.revision
	}

	/// Appends a node with the lowest unused letter, placed on the layout
	/// circle.
	pub fn add_node(&mut self) -> GraphResult<NodeId> {
		let id = (0..MAX_NODES)
			.filter_map(NodeId::from_index)
			.find(|id| !self.contains(*id))
			.ok_or(GraphError::NodeLimitReached { limit: MAX_NODES })?;
		let position = self.layout.position_for(self.nodes.len());
		self.nodes.push(Node { id, position });
		self.revision += 1;
		Ok(id)
	}

	/// Removes `id` and every edge touching it.
	pub fn remove_node(&mut self, id: NodeId) -> GraphResult<()> {
		if !self.contains(id) {
			return Err(GraphError::UnknownNode(id));
		}
		self.nodes.retain(|n| n.id != id);
		self.edges.retain(|e| e.source != id && e.target != id);
		self.revision += 1;
		Ok(())
	}

	/// Repositions a node. Not a structural change.
	pub fn move_node(&mut self, id: NodeId, position: Position) -> GraphResult<()> {
		let node = self
			.nodes
			.iter_mut()
			.find(|n| n.id == id)
			.ok_or(GraphError::UnknownNode(id))?;
		node.position = position;
		Ok(())
	}

	/// Connects `source` to `target`. Fails without inserting anything when
	/// an equivalent edge already exists.
	pub fn add_edge(
		&mut self,
		source: NodeId,
		target: NodeId,
		weight: Option<f64>,
	) -> GraphResult<&Edge> {
		for id in [source, target] {
			if !self.contains(id) {
				return Err(GraphError::UnknownNode(id));
			}
		}
		if source == target {
			return Err(GraphError::SelfLoop(source));
		}
		if let Some(w) = weight {
			if !w.is_finite() || w <= 0.0 {
				return Err(GraphError::InvalidWeight(w));
			}
		}
		if self.find_edge(source, target).is_some() {
			return Err(GraphError::DuplicateEdge {
				from: source,
				to: target,
			});
		}
		self.edges.push(Edge::new(source, target, weight));
		self.revision += 1;
		Ok(&self.edges[self.edges.len() - 1])
	}

	/// Removes the edge linking `source` to `target` and returns it. When
	/// undirected, every edge between the pair goes, so a pair left over from
	/// directed mode cannot keep the nodes connected.
	pub fn remove_edge(&mut self, source: NodeId, target: NodeId) -> GraphResult<Edge> {
		let idx = self
			.find_edge(source, target)
			.ok_or(GraphError::UnknownEdge {
				from: source,
				to: target,
			})?;
		let removed = self.edges.remove(idx);
		let directed = self.directed;
		self.edges.retain(|e| !e.connects(source, target, directed));
		self.revision += 1;
		Ok(removed)
	}

	/// Whether an edge links `source` to `target` under the current
	/// directedness.
	pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
		self.find_edge(source, target).is_some()
	}

	fn find_edge(&self, source: NodeId, target: NodeId) -> Option<usize> {
		self.edges
			.iter()
			.position(|e| e.connects(source, target, self.directed))
	}

	/// Flips the directed flag and returns the new value.
	pub fn toggle_directed(&mut self) -> bool {
		self.directed = !self.directed;
		self.revision += 1;
		self.directed
	}

	/// Flips the weighted flag and returns the new value.
	pub fn toggle_weighted(&mut self) -> bool {
		self.weighted = !self.weighted;
		self.revision += 1;
		self.weighted
	}

	/// Drops every node and edge. Flags are kept.
	pub fn clear(&mut self) {
		self.nodes.clear();
		self.edges.clear();
		self.revision += 1;
	}

	/// Single-hop neighbor lists honoring the directed flag.
	pub fn adjacency(&self) -> Adjacency {
		let mut neighbors: HashMap<NodeId, Vec<NodeId>> =
			self.nodes.iter().map(|n| (n.id, Vec::new())).collect();
		let mut link = |from: NodeId, to: NodeId| {
			if let Some(list) = neighbors.get_mut(&from) {
				if !list.contains(&to) {
					list.push(to);
				}
			}
		};
		for edge in &self.edges {
			link(edge.source, edge.target);
			if !self.directed {
				link(edge.target, edge.source);
			}
		}
		Adjacency {
			order: self.node_ids().collect(),
			neighbors,
		}
	}
}

/// Read-only neighbor lookup, rebuilt on demand.
///
/// Neighbors appear in edge creation order, not sorted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Adjacency {
	order: Vec<NodeId>,
	neighbors: HashMap<NodeId, Vec<NodeId>>,
}

impl Adjacency {
	/// Outgoing neighbors of `id`, empty for unknown ids.
	pub fn neighbors(&self, id: NodeId) -> &[NodeId] {
		self.neighbors.get(&id).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Whether `id` is a node of the graph this view was built from.
	pub fn contains(&self, id: NodeId) -> bool {
		self.neighbors.contains_key(&id)
	}

	/// First node in creation order.
	pub fn first(&self) -> Option<NodeId> {
		self.order.first().copied()
	}

	/// True for an empty graph.
	pub fn is_empty(&self) -> bool {
		self.order.is_empty()
	}

	/// Number of nodes.
	pub fn len(&self) -> usize {
		self.order.len()
	}

	/// Nodes with their neighbor lists, in creation order.
	pub fn iter(&self) -> impl Iterator<Item = (NodeId, &[NodeId])> + '_ {
		self.order.iter().map(|id| (*id, self.neighbors(*id)))
	}
}
