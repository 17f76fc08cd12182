use leptos::prelude::*;

use crate::components::context::AppContext;
use crate::engine::advice::{COMPLEXITY, graph_kind_label, recommend};
use crate::engine::{Algorithm, Goal};

/// BFS vs DFS side panel for the latest run, or the defaults when idle.
#[component]
pub fn ComparisonPanel(#[prop(into)] on_close: Callback<()>) -> impl IntoView {
	let ctx = AppContext::get();
	let run = move || {
		ctx.frame.with(|f| {
			f.as_ref().map(|frame| {
				let seq = frame.sequence();
				(seq.algorithm(), seq.goal_requested(), seq.start_node(), seq.end_node())
			})
		})
	};
	let algorithm = move || run().map_or(Algorithm::Bfs, |r| r.0);
	let goal = move || run().map_or(Goal::Traversal, |r| r.1);
	let kind = move || ctx.session.with(|s| graph_kind_label(s.graph().is_directed(), s.graph().is_weighted()));
	let verdict = move || {
		let weighted = ctx.session.with(|s| s.graph().is_weighted());
		recommend(algorithm(), goal(), weighted)
	};
	let node_or = |node: Option<String>| node.unwrap_or_else(|| "Not specified".to_owned());

	view! {
		<aside class="panel comparison-panel">
			<header class="row">
				<div>
					<p class="eyebrow">"Algorithm Comparison"</p>
					<p>"BFS vs DFS"</p>
				</div>
				<button type="button" on:click=move |_| on_close.run(())>
					"✕"
				</button>
			</header>
			<section>
				<h4>"Suitability for This Run"</h4>
				<p class="verdict">{move || verdict().title}</p>
				<ul>
					{move || {
						verdict()
							.reasons
							.iter()
							.map(|reason| view! { <li>{*reason}</li> })
							.collect_view()
					}}
				</ul>
			</section>
			<section>
				<h4>"Complexity Overview"</h4>
				<table>
					<thead>
						<tr>
							<th>"Algorithm"</th>
							<th>"Time Complexity"</th>
							<th>"Space Complexity"</th>
						</tr>
					</thead>
					<tbody>
						{COMPLEXITY
							.iter()
							.map(|(a, time, space)| {
								view! {
									<tr>
										<td>{a.name()}</td>
										<td>{*time}</td>
										<td>{*space}</td>
									</tr>
								}
							})
							.collect_view()}
					</tbody>
				</table>
				<p class="hint">"V = number of vertices, E = number of edges"</p>
			</section>
			<section>
				<h4>"Context for This Comparison"</h4>
				<p>"Algorithm chosen: " {move || algorithm().name()}</p>
				<p>"Goal: " {move || goal().name()}</p>
				<p>"Graph type: " {kind}</p>
				<p>"Start node: " {move || node_or(run().map(|r| r.2.to_string()))}</p>
				<p>"End node: " {move || node_or(run().and_then(|r| r.3).map(|n| n.to_string()))}</p>
			</section>
		</aside>
	}
}
