//! Error types for graph editing, run validation, replay and narration.
//!
//! Every fallible engine call returns one of these and leaves the state it
//! was called on untouched. Narration errors never reach the user; callers
//! log them and show the fallback sentence instead.

use thiserror::Error;

use crate::engine::NodeId;

/// Result alias for graph model operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// Result alias for run validation.
pub type RunResult<T> = Result<T, RunError>;

/// Result alias for session-level calls.
pub type EngineResult<T> = Result<T, EngineError>;

/// Rejected graph edits.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
	/// All 26 letters are in use.
	#[error("node limit reached: a graph holds at most {limit} nodes")]
	NodeLimitReached {
		/// Maximum number of nodes.
		limit: usize,
	},

	/// An edge already connects the pair under the current directedness.
	#[error("edge {from} -> {to} already exists")]
	DuplicateEdge {
		/// Requested source node.
		from: NodeId,
		/// Requested target node.
		to: NodeId,
	},

	/// The referenced node is not part of the graph.
	#[error("node {0} does not exist in the graph")]
	UnknownNode(NodeId),

	/// No edge links the pair under the current directedness.
	#[error("no edge {from} -> {to}")]
	UnknownEdge {
		/// Requested source node.
		from: NodeId,
		/// Requested target node.
		to: NodeId,
	},

	/// Edges must connect two distinct nodes.
	#[error("self-loop on node {0} is not allowed")]
	SelfLoop(NodeId),

	/// Weights must be finite and strictly positive.
	#[error("invalid edge weight {0}: weights must be positive numbers")]
	InvalidWeight(f64),
}

/// Rejected run requests.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RunError {
	/// Nothing to traverse.
	#[error("cannot run an algorithm on an empty graph")]
	EmptyGraph,

	/// The start node field was left blank.
	#[error("please enter a start node")]
	MissingStartNode,

	/// Input is not a single letter A-Z.
	#[error("\"{0}\" is not a node id (expected a single letter A-Z)")]
	InvalidNodeId(String),

	/// Start node is not in the graph.
	#[error("start node \"{0}\" does not exist in the graph")]
	UnknownStartNode(NodeId),

	/// End node is not in the graph.
	#[error("end node \"{0}\" does not exist in the graph")]
	UnknownEndNode(NodeId),
}

/// Replay transitions that are not valid in the current state.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayError {
	/// No run is loaded.
	#[error("no algorithm run is active")]
	Idle,

	/// The generator produced no steps.
	#[error("the run produced no steps")]
	EmptySequence,
}

/// Narration failures. All of them are recovered with the fallback sentence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NarrationError {
	/// Network failure or a browser API error.
	#[error("narration transport failed: {0}")]
	Transport(String),

	/// The service answered with a non-2xx status.
	#[error("narration service returned status {0}")]
	Status(u16),

	/// No answer within the configured timeout.
	#[error("narration request timed out")]
	Timeout,

	/// The body was not the expected JSON shape.
	#[error("narration response could not be decoded: {0}")]
	Decode(String),

	/// The `explanation` field was absent or blank.
	#[error("narration response carried no explanation")]
	EmptyExplanation,

	/// A newer step was requested before this one answered.
	#[error("narration request superseded by a newer step")]
	Superseded,
}

/// Any error a [`Session`](crate::engine::Session) call can return.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
	/// Graph edit rejected.
	#[error(transparent)]
	Graph(#[from] GraphError),

	/// Run request rejected.
	#[error(transparent)]
	Run(#[from] RunError),

	/// Replay transition rejected.
	#[error(transparent)]
	Replay(#[from] ReplayError),
}
