//! Traversal engine: graph model, BFS/DFS step generation, replay and the
//! narration adapter.
//!
//! Nothing in here depends on the browser. The flow is
//! `Graph -> run::generate -> StepSequence -> ReplayController -> StepFrame`,
//! with [`Session`] tying the editable graph to the active replay.

pub mod advice;
pub mod bfs;
pub mod dfs;
pub mod explain;
pub mod graph;
pub mod replay;
pub mod run;
mod session;
pub mod step;

pub use explain::{IDLE_EXPLANATION, NarrationRequest, fallback_explanation};
pub use graph::{Adjacency, Edge, Graph, Layout, MAX_NODES, Node, NodeId, Position};
pub use replay::{ReplayController, ReplayEvent, ReplayState, StepFrame};
pub use run::{RunPlan, RunRequest};
pub use session::Session;
pub use step::{Algorithm, Distances, Frontier, Goal, Outcome, Step, StepSequence, Summary};
