use leptos::prelude::*;

use crate::components::context::AppContext;
use crate::engine::{Algorithm, NodeId, Step};

fn join(nodes: &[NodeId], sep: &str) -> String {
	nodes.iter().map(NodeId::to_string).collect::<Vec<_>>().join(sep)
}

fn frontier_label(step: &Step) -> &'static str {
	match step.algorithm {
		Algorithm::Bfs => "Queue",
		Algorithm::Dfs => "Stack",
	}
}

/// Path worth showing for this step, if any.
fn path_line(step: &Step) -> Option<String> {
	if let Some(summary) = &step.summary {
		let path = if summary.final_path.is_empty() {
			"none".to_owned()
		} else {
			join(&summary.final_path, " → ")
		};
		return Some(format!("{} ({path})", summary.outcome.name()));
	}
	step.shortest_path
		.as_deref()
		.or(step.path.as_deref())
		.map(|p| join(p, " → "))
}

fn distance_rows(step: &Step) -> Vec<(NodeId, usize, Option<NodeId>)> {
	let Some(distances) = &step.distances else {
		return Vec::new();
	};
	distances
		.distance
		.iter()
		.map(|(&node, &d)| (node, d, distances.parent.get(&node).copied().flatten()))
		.collect()
}

/// Frontier, visited set, path and BFS distances of the current step.
#[component]
pub fn DataStructuresPanel() -> impl IntoView {
	let ctx = AppContext::get();
	let with_step = move |f: fn(&Step) -> String, idle: &'static str| {
		move || {
			ctx.frame
				.with(|frame| frame.as_ref().map_or_else(|| idle.to_owned(), |fr| f(fr.current())))
		}
	};

	let frontier_name = with_step(|s| frontier_label(s).to_owned(), "Queue / Stack");
	let frontier = with_step(|s| format!("[ {} ]", join(s.frontier.nodes(), ", ")), "[ ] – waiting for nodes…");
	let visited = with_step(|s| format!("{{ {} }}", join(&s.visited, ", ")), "{ nodes will appear here }");
	let path = move || ctx.frame.with(|f| f.as_ref().and_then(|fr| path_line(fr.current())));
	let rows = move || ctx.frame.with(|f| f.as_ref().map(|fr| distance_rows(fr.current())).unwrap_or_default());

	view! {
		<section class="panel data-structures-panel">
			<h3>"Data Structures"</h3>
			<div class="card">
				<p class="label">{frontier_name}</p>
				<p class="value">{frontier}</p>
			</div>
			<div class="card">
				<p class="label">"Visited"</p>
				<p class="value">{visited}</p>
			</div>
			<Show when=move || path().is_some()>
				<div class="card">
					<p class="label">"Path"</p>
					<p class="value">{move || path().unwrap_or_default()}</p>
				</div>
			</Show>
			<Show when=move || !rows().is_empty()>
				<table class="distances">
					<thead>
						<tr>
							<th>"Node"</th>
							<th>"Distance"</th>
							<th>"Parent"</th>
						</tr>
					</thead>
					<tbody>
						{move || {
							rows()
								.into_iter()
								.map(|(node, d, parent)| {
									view! {
										<tr>
											<td>{node.to_string()}</td>
											<td>{d}</td>
											<td>{parent.map_or_else(|| "–".to_owned(), |p| p.to_string())}</td>
										</tr>
									}
								})
								.collect_view()
						}}
					</tbody>
				</table>
			</Show>
		</section>
	}
}
