use leptos::prelude::*;
use log::debug;
use web_sys::Event;

use crate::components::context::AppContext;
use crate::engine::{Edge, MAX_NODES, NodeId, Session};
use crate::error::EngineResult;

/// Graph editing tools. Every structural edit discards the active run.
#[component]
pub fn EditorPanel() -> impl IntoView {
	let ctx = AppContext::get();
	let edge_from = RwSignal::new(String::new());
	let edge_to = RwSignal::new(String::new());

	let node_count = move || {
		format!(
			"{} / {MAX_NODES} nodes",
			ctx.session.with(|s| s.graph().len())
		)
	};
	let directed = move || ctx.session.with(|s| s.graph().is_directed());
	let weighted = move || ctx.session.with(|s| s.graph().is_weighted());
	let selected = move || {
		ctx.selected
			.get()
			.map_or_else(|| "none".to_owned(), |id| id.to_string())
	};

	let add_node = move |_| {
		if let Some(id) = ctx.apply(Session::add_node) {
			ctx.selected.set(None);
			debug!("added node {id}");
		}
	};
	let remove_selected = move |_| {
		if let Some(id) = ctx.selected.get_untracked() {
			ctx.apply(|s| s.remove_node(id));
			ctx.selected.set(None);
		}
	};
	let remove_edge = move |_| {
		let (from, to) = (edge_from.get_untracked(), edge_to.get_untracked());
		let removed = ctx.apply(|s| -> EngineResult<Edge> {
			let (a, b) = (NodeId::parse(&from)?, NodeId::parse(&to)?);
			Ok(s.remove_edge(a, b)?)
		});
		if removed.is_some() {
			edge_from.set(String::new());
			edge_to.set(String::new());
		}
	};
	let set_weight = move |ev: Event| match event_target_value(&ev).trim().parse::<f64>() {
		Ok(weight) => ctx.edge_weight.set(weight),
		Err(_) => ctx
			.status
			.set(Some("Edge weight must be a number.".to_owned())),
	};
	let clear = move |_| {
		ctx.session.update(Session::clear);
		ctx.selected.set(None);
		ctx.status.set(None);
	};

	view! {
		<section class="panel editor-panel">
			<h3>"Graph Editor"</h3>
			<p class="hint">"Click two nodes to connect them. Drag nodes to move them."</p>
			<p class="count">{node_count}</p>
			<div class="row">
				<button type="button" on:click=add_node>"Add Node"</button>
				<button type="button" on:click=remove_selected>"Remove Selected"</button>
				<span class="selected">"Selected: " {selected}</span>
			</div>
			<label class="row">
				<input
					type="checkbox"
					prop:checked=directed
					on:change=move |_| {
						ctx.session.update(|s| {
							s.toggle_directed();
						});
					}
				/>
				"Directed"
			</label>
			<label class="row">
				<input
					type="checkbox"
					prop:checked=weighted
					on:change=move |_| {
						ctx.session.update(|s| {
							s.toggle_weighted();
						});
					}
				/>
				"Weighted"
			</label>
			<label class="row" class:hidden=move || !weighted()>
				"New edge weight "
				<input
					type="number"
					min="1"
					step="1"
					prop:value=move || ctx.edge_weight.get().to_string()
					on:change=set_weight
				/>
			</label>
			<div class="row">
				<input
					type="text"
					maxlength="1"
					placeholder="From"
					prop:value=edge_from
					on:input=move |ev| edge_from.set(event_target_value(&ev))
				/>
				<input
					type="text"
					maxlength="1"
					placeholder="To"
					prop:value=edge_to
					on:input=move |ev| edge_to.set(event_target_value(&ev))
				/>
				<button type="button" on:click=remove_edge>"Remove Edge"</button>
			</div>
			<button type="button" class="danger" on:click=clear>"Reset Canvas"</button>
		</section>
	}
}
