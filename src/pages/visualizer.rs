use leptos::prelude::*;

use crate::components::context::AppContext;
use crate::components::panels::{
	ComparisonPanel, DataStructuresPanel, EditorPanel, ExplanationPanel, PlaybackPanel,
	SetupPanel,
};
use crate::components::traversal_canvas::TraversalCanvas;

/// Editor and replay workspace.
#[component]
pub fn Visualizer() -> impl IntoView {
	let ctx = AppContext::get();
	let show_comparison = RwSignal::new(false);

	view! {
		<ErrorBoundary fallback=|errors| {
			view! {
				<h1>"Uh oh! Something went wrong!"</h1>

				<p>"Errors: "</p>
				<ul>
					{move || {
						errors
							.get()
							.into_iter()
							.map(|(_, e)| view! { <li>{e.to_string()}</li> })
							.collect_view()
					}}
				</ul>
			}
		}>
			<div class="visualizer">
				<aside class="sidebar left">
					<EditorPanel />
					<SetupPanel />
				</aside>
				<main class="stage">
					<header class="stage-header">
						<h1>"Graph Traversal Visualizer"</h1>
						<button type="button" on:click=move |_| show_comparison.update(|v| *v = !*v)>
							"Compare BFS / DFS"
						</button>
					</header>
					<Show when=move || ctx.status.with(Option::is_some)>
						<p class="status" role="alert">
							{move || ctx.status.get().unwrap_or_default()}
						</p>
					</Show>
					<div class="canvas-host">
						<TraversalCanvas />
					</div>
				</main>
				<aside class="sidebar right">
					<PlaybackPanel />
					<DataStructuresPanel />
					<ExplanationPanel />
				</aside>
				<Show when=move || show_comparison.get()>
					<ComparisonPanel on_close=move |_| show_comparison.set(false) />
				</Show>
			</div>
		</ErrorBoundary>
	}
}
