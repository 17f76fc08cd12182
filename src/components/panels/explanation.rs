use std::rc::Rc;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::components::context::AppContext;
use crate::engine::{IDLE_EXPLANATION, NarrationRequest};
use crate::narration::NarrationClient;

/// Narrates the current step through the explanation service.
#[component]
pub fn ExplanationPanel() -> impl IntoView {
	let ctx = AppContext::get();
	let client = Rc::new(ctx.config.with_value(NarrationClient::new));
	let text = RwSignal::new(IDLE_EXPLANATION.to_owned());
	let loading = RwSignal::new(false);

	Effect::new(move |_| {
		let Some(request) = ctx.frame.with(|f| f.as_ref().map(NarrationRequest::from_frame)) else {
			client.cancel();
			loading.set(false);
			text.set(IDLE_EXPLANATION.to_owned());
			return;
		};
		loading.set(true);
		let client = client.clone();
		spawn_local(async move {
			// `None` means a newer step already took over.
			if let Some(explanation) = client.narrate(request).await {
				text.set(explanation);
				loading.set(false);
			}
		});
	});

	view! {
		<section class="panel explanation-panel">
			<h3>"Step Explanation"</h3>
			<p class="explanation" class:loading=move || loading.get()>
				{move || text.get()}
			</p>
		</section>
	}
}
