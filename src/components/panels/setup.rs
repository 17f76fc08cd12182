use leptos::prelude::*;

use crate::components::context::AppContext;
use crate::engine::{Algorithm, Goal, RunRequest};

fn goal_hint(goal: Goal) -> &'static str {
	match goal {
		Goal::Traversal => "visit nodes in order without focusing on a specific path.",
		Goal::ShortestPath => "BFS finds the shortest path from start to end.",
		Goal::PathExistence => "DFS looks for one path from start to end (not necessarily shortest).",
	}
}

fn goal_label(goal: Goal) -> &'static str {
	match goal {
		Goal::Traversal => "Traversal only",
		Goal::ShortestPath => "Shortest path (unweighted)",
		Goal::PathExistence => "Path existence",
	}
}

/// Algorithm, endpoints and goal for the next run.
#[component]
pub fn SetupPanel() -> impl IntoView {
	let ctx = AppContext::get();
	let algorithm = RwSignal::new(Algorithm::Bfs);
	let goal = RwSignal::new(Goal::Traversal);
	let start = RwSignal::new(String::new());
	let end = RwSignal::new(String::new());

	let pick_algorithm = move |choice: Algorithm| {
		algorithm.set(choice);
		if !goal.get_untracked().belongs_to(choice) {
			goal.set(Goal::Traversal);
		}
	};

	let confirm = move |_| {
		let mut request = RunRequest::new(algorithm.get_untracked(), start.get_untracked())
			.goal(goal.get_untracked());
		let end = end.get_untracked();
		if !end.trim().is_empty() {
			request = request.end_node(end);
		}
		ctx.apply(|s| s.run(&request));
	};
	let cancel = move |_| {
		start.set(String::new());
		end.set(String::new());
		goal.set(Goal::Traversal);
	};

	let goal_options = move || {
		let current = algorithm.get();
		[Goal::Traversal, Goal::ShortestPath, Goal::PathExistence]
			.into_iter()
			.filter(|g| g.belongs_to(current))
			.map(|g| {
				view! {
					<label class="row">
						<input
							type="radio"
							name="algorithm-goal"
							prop:checked=move || goal.get() == g
							on:change=move |_| goal.set(g)
						/>
						<span>{goal_label(g)} " – " {goal_hint(g)}</span>
					</label>
				}
			})
			.collect_view()
	};

	view! {
		<section class="panel setup-panel">
			<h3>"Algorithm Setup"</h3>
			<div class="row">
				{[Algorithm::Bfs, Algorithm::Dfs]
					.into_iter()
					.map(|a| {
						view! {
							<button
								type="button"
								class:active=move || algorithm.get() == a
								on:click=move |_| pick_algorithm(a)
							>
								{a.name()}
							</button>
						}
					})
					.collect_view()}
			</div>
			<label>
				"Start Node *"
				<input
					type="text"
					maxlength="1"
					placeholder="e.g., A"
					prop:value=start
					on:input=move |ev| start.set(event_target_value(&ev))
				/>
			</label>
			<p class="hint">"Choose what you want " {move || algorithm.get().name()} " to do before it runs."</p>
			{goal_options}
			<label>
				"End Node (optional)"
				<input
					type="text"
					maxlength="1"
					placeholder="e.g., B (optional)"
					prop:value=end
					on:input=move |ev| end.set(event_target_value(&ev))
				/>
			</label>
			<div class="row">
				<button type="button" class="primary" on:click=confirm>"Confirm & Run"</button>
				<button type="button" on:click=cancel>"Cancel"</button>
			</div>
		</section>
	}
}
