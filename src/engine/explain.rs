//! Translation of step frames into narration requests.
//!
//! The narrator is an external service. Nothing here talks to it; this
//! module only shapes what gets sent, decodes what comes back and supplies
//! the deterministic fallback sentences.

use serde::{Deserialize, Serialize};

use super::graph::NodeId;
use super::replay::StepFrame;
use super::step::{Algorithm, Goal, Outcome, Step};
use crate::error::NarrationError;

/// Shown while no run is loaded.
pub const IDLE_EXPLANATION: &str = "Run an algorithm to see step-by-step explanation.";

/// Body POSTed to the narration service.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationRequest {
	/// Strategy of the run.
	pub algorithm: Algorithm,
	/// Goal the run actually pursued.
	pub algorithm_goal: Goal,
	/// Zero-based; see [`NarrationRequest::step_number`].
	pub step_index: usize,
	/// Node handled by this step, `None` on the final step.
	pub current_node: Option<NodeId>,
	/// Node handled by the step before.
	pub previous_node: Option<NodeId>,
	/// BFS queue now.
	pub queue: Vec<NodeId>,
	/// BFS queue one step earlier.
	pub previous_queue: Vec<NodeId>,
	/// DFS stack now.
	pub stack: Vec<NodeId>,
	/// DFS stack one step earlier.
	pub previous_stack: Vec<NodeId>,
	/// Visited set now, in discovery order.
	pub visited: Vec<NodeId>,
	/// Visited set one step earlier.
	pub previous_visited: Vec<NodeId>,
	/// Whether this is the synthetic final step.
	pub is_final_step: bool,
	/// Path found, final step only.
	pub final_path: Option<Vec<NodeId>>,
	/// Start node of the run.
	pub start_node: NodeId,
	/// End node of the run, if any.
	pub end_node: Option<NodeId>,
	/// Outcome, final step only.
	pub outcome: Option<Outcome>,
}

impl NarrationRequest {
	/// Builds the request for `current`, diffing against `previous`.
	pub fn new(
		step_index: usize,
		current: &Step,
		previous: Option<&Step>,
		algorithm: Algorithm,
		goal: Goal,
		start_node: NodeId,
		end_node: Option<NodeId>,
	) -> Self {
		let is_final_step = current.is_final_step();
		let prev = |f: fn(&Step) -> &[NodeId]| previous.map(|p| f(p).to_vec()).unwrap_or_default();
		Self {
			algorithm,
			algorithm_goal: goal,
			step_index,
			current_node: current.current_node,
			previous_node: previous.and_then(|p| p.current_node),
			queue: current.queue().to_vec(),
			previous_queue: prev(Step::queue),
			stack: current.stack().to_vec(),
			previous_stack: prev(Step::stack),
			visited: current.visited.clone(),
			previous_visited: previous.map(|p| p.visited.clone()).unwrap_or_default(),
			is_final_step,
			final_path: is_final_step.then(|| current.final_path().to_vec()),
			start_node,
			end_node,
			outcome: if is_final_step { current.outcome() } else { None },
		}
	}

	/// Request for the step a replay frame points at.
	pub fn from_frame(frame: &StepFrame) -> Self {
		let seq = frame.sequence();
		Self::new(
			frame.index(),
			frame.current(),
			frame.previous(),
			seq.algorithm(),
			seq.goal_applied(),
			seq.start_node(),
			seq.end_node(),
		)
	}

	/// One-based step number for display.
	pub fn step_number(&self) -> usize {
		self.step_index + 1
	}

	/// Serializes the request body.
	pub fn to_json(&self) -> Result<String, NarrationError> {
		serde_json::to_string(self).map_err(|e| NarrationError::Decode(e.to_string()))
	}

	/// Sentence used whenever the narrator cannot answer.
	pub fn fallback(&self) -> String {
		fallback_explanation(self.algorithm, self.current_node)
	}
}

/// Deterministic stand-in built from the algorithm and current node only.
pub fn fallback_explanation(algorithm: Algorithm, current: Option<NodeId>) -> String {
	match current {
		Some(node) => format!("{algorithm} is now processing node {node}."),
		None => format!("{algorithm} has finished exploring the graph."),
	}
}

#[derive(Debug, Deserialize)]
struct NarrationResponse {
	#[serde(default)]
	explanation: Option<String>,
}

/// Extracts the trimmed `explanation` field from a response body.
pub fn parse_response(body: &str) -> Result<String, NarrationError> {
	let response: NarrationResponse =
		serde_json::from_str(body).map_err(|e| NarrationError::Decode(e.to_string()))?;
	let text = response.explanation.unwrap_or_default();
	let text = text.trim();
	if text.is_empty() {
		Err(NarrationError::EmptyExplanation)
	} else {
		Ok(text.to_string())
	}
}

#[cfg(test)]
mod tests {
	use serde_json::json;

	use super::*;
	use crate::engine::graph::Graph;
	use crate::engine::replay::{ReplayController, ReplayEvent};
	use crate::engine::run::{RunRequest, generate};

	fn id(c: char) -> NodeId {
		NodeId::new(c).unwrap()
	}

	fn controller(request: RunRequest) -> ReplayController {
		let mut graph = Graph::new();
		for _ in 0..3 {
			graph.add_node().unwrap();
		}
		graph.add_edge(id('A'), id('B'), None).unwrap();
		graph.add_edge(id('B'), id('C'), None).unwrap();
		let plan = request.validate(&graph).unwrap();
		let mut controller = ReplayController::new();
		controller.run(generate(&graph, &plan)).unwrap();
		controller
	}

	#[test]
	fn first_step_has_no_previous_state() {
		let c = controller(RunRequest::new(Algorithm::Bfs, "A"));
		let req = NarrationRequest::from_frame(&c.frame().unwrap());
		assert_eq!(req.step_number(), 1);
		assert_eq!(req.current_node, Some(id('A')));
		assert_eq!(req.previous_node, None);
		assert!(req.previous_visited.is_empty());
		assert_eq!(req.queue, vec![id('A')]);
		assert!(req.stack.is_empty());
		assert!(!req.is_final_step);
		assert_eq!(req.final_path, None);
		assert_eq!(req.outcome, None);
	}

	#[test]
	fn middle_step_carries_previous_structures() {
		let mut c = controller(RunRequest::new(Algorithm::Dfs, "A"));
		c.next().unwrap();
		let req = NarrationRequest::from_frame(&c.frame().unwrap());
		assert_eq!(req.previous_node, Some(id('A')));
		assert_eq!(req.previous_stack, vec![id('A')]);
		assert_eq!(req.stack, vec![id('A'), id('B')]);
		assert!(req.queue.is_empty() && req.previous_queue.is_empty());
	}

	#[test]
	fn final_step_reports_outcome_and_path() {
		let mut c = controller(
			RunRequest::new(Algorithm::Bfs, "A")
				.end_node("C")
				.goal(Goal::ShortestPath),
		);
		while !c.frame().unwrap().is_last() {
			c.next().unwrap();
		}
		let req = NarrationRequest::from_frame(&c.frame().unwrap());
		assert!(req.is_final_step);
		assert_eq!(req.current_node, None);
		assert_eq!(req.outcome, Some(Outcome::TargetFound));
		assert_eq!(req.final_path, Some(vec![id('A'), id('B'), id('C')]));
		assert_eq!(req.fallback(), "BFS has finished exploring the graph.");
	}

	#[test]
	fn downgraded_goal_is_what_gets_narrated() {
		let mut graph = Graph::new();
		for _ in 0..3 {
			graph.add_node().unwrap();
		}
		graph.toggle_weighted();
		graph.add_edge(id('A'), id('B'), Some(2.0)).unwrap();
		graph.add_edge(id('B'), id('C'), Some(5.0)).unwrap();
		let plan = RunRequest::new(Algorithm::Bfs, "A")
			.end_node("C")
			.goal(Goal::ShortestPath)
			.validate(&graph)
			.unwrap();
		let mut c = ReplayController::new();
		c.run(generate(&graph, &plan)).unwrap();

		let frame = c.frame().unwrap();
		assert_eq!(frame.sequence().goal_requested(), Goal::ShortestPath);
		assert_eq!(frame.current().goal, Goal::Traversal);
		let req = NarrationRequest::from_frame(&frame);
		assert_eq!(req.algorithm_goal, Goal::Traversal);
		assert_eq!(req.algorithm_goal, frame.current().goal);
	}

	#[test]
	fn serializes_to_the_wire_shape() {
		let c = controller(RunRequest::new(Algorithm::Bfs, "A").end_node("C"));
		let req = NarrationRequest::from_frame(&c.frame().unwrap());
		let value: serde_json::Value = serde_json::from_str(&req.to_json().unwrap()).unwrap();
		assert_eq!(
			value,
			json!({
				"algorithm": "BFS",
				"algorithmGoal": "TRAVERSAL",
				"stepIndex": 0,
				"currentNode": "A",
				"previousNode": null,
				"queue": ["A"],
				"previousQueue": [],
				"stack": [],
				"previousStack": [],
				"visited": ["A"],
				"previousVisited": [],
				"isFinalStep": false,
				"finalPath": null,
				"startNode": "A",
				"endNode": "C",
				"outcome": null,
			})
		);
	}

	#[test]
	fn fallback_uses_algorithm_and_node() {
		assert_eq!(
			fallback_explanation(Algorithm::Dfs, Some(id('B'))),
			"DFS is now processing node B."
		);
	}

	#[test]
	fn response_parsing() {
		assert_eq!(
			parse_response(r#"{"explanation":"  BFS visits B next. "}"#),
			Ok("BFS visits B next.".to_string())
		);
		assert_eq!(
			parse_response(r#"{"explanation":"   "}"#),
			Err(NarrationError::EmptyExplanation)
		);
		assert_eq!(parse_response("{}"), Err(NarrationError::EmptyExplanation));
		assert!(matches!(parse_response("<html>"), Err(NarrationError::Decode(_))));
	}

	#[test]
	fn events_carry_frames_usable_by_the_adapter() {
		let mut c = ReplayController::new();
		let seen = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
		let sink = seen.clone();
		c.subscribe(move |event| {
			if let ReplayEvent::Step(frame) = event {
				sink.borrow_mut()
					.push(NarrationRequest::from_frame(frame).step_index);
			}
		});
		let mut graph = Graph::new();
		graph.add_node().unwrap();
		let plan = RunRequest::new(Algorithm::Bfs, "A").validate(&graph).unwrap();
		c.run(generate(&graph, &plan)).unwrap();
		assert_eq!(*seen.borrow(), vec![0]);
	}
}
