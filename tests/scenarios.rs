//! End-to-end runs through the public engine API.

// Only the library and the test harness crates are used directly.
#![allow(unused_crate_dependencies)]

use traversal_visualizer::engine::{
	Algorithm, Goal, Graph, NodeId, Outcome, ReplayEvent, RunRequest, Session, StepFrame, run,
};
use traversal_visualizer::error::{EngineError, GraphError, ReplayError, RunError};

use std::cell::RefCell;
use std::rc::Rc;

fn id(c: char) -> NodeId {
	NodeId::new(c).unwrap()
}

fn ids(s: &str) -> Vec<NodeId> {
	s.chars().map(id).collect()
}

fn build(nodes: usize, directed: bool, edges: &[(char, char)]) -> Graph {
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

fn sequence(graph: &Graph, request: RunRequest) -> traversal_visualizer::engine::StepSequence {
	let plan = request.validate(graph).unwrap();
	run::generate(graph, &plan)
}

#[test]
fn bfs_traversal_over_a_line() {
	let graph = build(3, false, &[('A', 'B'), ('B', 'C')]);
	let seq = sequence(&graph, RunRequest::new(Algorithm::Bfs, "A"));

	assert_eq!(seq.len(), 3);
	assert!(seq.steps().iter().all(|s| !s.is_final_step()));
	assert_eq!(seq.last().unwrap().visited, ids("ABC"));
	assert_eq!(
		seq.steps().iter().map(|s| s.current_node).collect::<Vec<_>>(),
		vec![Some(id('A')), Some(id('B')), Some(id('C'))]
	);
}

#[test]
fn bfs_shortest_path_found() {
	let graph = build(3, false, &[('A', 'B'), ('B', 'C')]);
	let seq = sequence(
		&graph,
		RunRequest::new(Algorithm::Bfs, "A")
			.end_node("C")
			.goal(Goal::ShortestPath),
	);

	let last = seq.last().unwrap();
	assert!(last.is_final_step());
	assert_eq!(last.outcome(), Some(Outcome::TargetFound));
	assert_eq!(last.final_path(), ids("ABC").as_slice());
}

#[test]
fn bfs_shortest_path_unreachable() {
	let graph = build(3, false, &[('A', 'B')]);
	let seq = sequence(
		&graph,
		RunRequest::new(Algorithm::Bfs, "a")
			.end_node(" c ")
			.goal(Goal::ShortestPath),
	);

	let last = seq.last().unwrap();
	assert_eq!(last.outcome(), Some(Outcome::TargetNotFound));
	assert!(last.final_path().is_empty());
}

#[test]
fn dfs_path_existence_respects_direction() {
	let graph = build(3, true, &[('A', 'B'), ('B', 'C')]);
	let seq = sequence(
		&graph,
		RunRequest::new(Algorithm::Dfs, "C")
			.end_node("A")
			.goal(Goal::PathExistence),
	);

	assert_eq!(seq.len(), 2);
	assert_eq!(seq.get(0).unwrap().visited, ids("C"));
	let last = seq.last().unwrap();
	assert_eq!(last.outcome(), Some(Outcome::TargetNotFound));
	assert!(last.final_path().is_empty());
}

#[test]
fn rerunning_an_unchanged_graph_is_identical() {
	let graph = build(5, false, &[('A', 'C'), ('A', 'B'), ('C', 'D'), ('B', 'D'), ('D', 'E')]);
	for request in [
		RunRequest::new(Algorithm::Bfs, "A").end_node("E").goal(Goal::ShortestPath),
		RunRequest::new(Algorithm::Dfs, "A").end_node("E").goal(Goal::PathExistence),
		RunRequest::new(Algorithm::Dfs, "B"),
	] {
		let first = sequence(&graph, request.clone());
		let second = sequence(&graph, request);
		assert_eq!(first.steps(), second.steps());
	}
}

#[test]
fn invalid_requests_leave_the_session_idle() {
	let mut session = Session::default();
	assert!(matches!(
		session.run(&RunRequest::new(Algorithm::Bfs, "A")),
		Err(EngineError::Run(RunError::EmptyGraph))
	));

	session.add_node().unwrap();
	assert!(matches!(
		session.run(&RunRequest::new(Algorithm::Bfs, "  ")),
		Err(EngineError::Run(RunError::MissingStartNode))
	));
	assert!(matches!(
		session.run(&RunRequest::new(Algorithm::Bfs, "Z")),
		Err(EngineError::Run(RunError::UnknownStartNode(_)))
	));
	assert!(matches!(
		session.run(&RunRequest::new(Algorithm::Bfs, "A").end_node("Q")),
		Err(EngineError::Run(RunError::UnknownEndNode(_)))
	));
	assert!(!session.replay().is_active());
	assert!(matches!(session.next(), Err(EngineError::Replay(ReplayError::Idle))));
}

#[test]
fn rejected_edits_change_nothing() {
	let mut session = Session::default();
	session.add_node().unwrap();
	session.add_node().unwrap();
	session.add_edge(id('A'), id('B'), None).unwrap();
	let revision = session.graph().revision();

	assert_eq!(
		session.add_edge(id('B'), id('A'), None),
		Err(GraphError::DuplicateEdge {
			from: id('B'),
			to: id('A')
		})
	);
	assert_eq!(
		session.add_edge(id('A'), id('A'), None),
		Err(GraphError::SelfLoop(id('A')))
	);
	assert_eq!(session.graph().revision(), revision);
	assert_eq!(session.graph().edges().len(), 1);
}

#[test]
fn replay_walks_to_the_end_and_resets() {
	let mut session = Session::default();
	for _ in 0..3 {
		session.add_node().unwrap();
	}
	session.add_edge(id('A'), id('B'), None).unwrap();
	session.add_edge(id('B'), id('C'), None).unwrap();

	let frames: Rc<RefCell<Vec<Option<StepFrame>>>> = Rc::default();
	let sink = frames.clone();
	session.subscribe(move |event| {
		sink.borrow_mut().push(match event {
			ReplayEvent::Step(frame) => Some(frame.clone()),
			ReplayEvent::Cleared => None,
		});
	});

	let seq = session.run(&RunRequest::new(Algorithm::Bfs, "A")).unwrap();
	assert_eq!(session.replay().cursor(), 0);
	session.play().unwrap();
	while session.tick() {}
	assert_eq!(session.replay().cursor(), seq.len() as isize - 1);
	assert!(!session.replay().is_playing());

	// Manual advance at the last step changes nothing.
	session.next().unwrap();
	assert_eq!(session.replay().cursor(), seq.len() as isize - 1);

	session.reset();
	assert_eq!(session.replay().cursor(), -1);
	assert!(!session.replay().is_playing());

	let frames = frames.borrow();
	let indices: Vec<_> = frames.iter().map(|f| f.as_ref().map(StepFrame::index)).collect();
	assert_eq!(indices, vec![Some(0), Some(1), Some(2), None]);
}

#[test]
fn editing_the_graph_discards_the_run() {
	let mut session = Session::default();
	session.add_node().unwrap();
	session.add_node().unwrap();
	session.add_edge(id('A'), id('B'), None).unwrap();
	let seq = session.run(&RunRequest::new(Algorithm::Dfs, "A")).unwrap();
	assert!(!session.is_stale(&seq));

	session.add_node().unwrap();
	assert!(!session.replay().is_active());
	assert!(session.is_stale(&seq));
}
