use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use leptos::prelude::set_timeout_with_handle;
use log::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{AbortController, AbortSignal, Request, RequestInit, Response};

use super::RequestLedger;
use crate::config::VisualizerConfig;
use crate::engine::NarrationRequest;
use crate::engine::explain::parse_response;
use crate::error::NarrationError;

/// Browser-side client for the narration proxy.
///
/// Starting a request aborts the one still in flight. Responses are only
/// delivered for the newest request.
pub struct NarrationClient {
	url: String,
	timeout: Duration,
	ledger: RefCell<RequestLedger>,
	in_flight: RefCell<Option<AbortController>>,
}

impl NarrationClient {
	/// Client posting to the configured narration endpoint.
	pub fn new(config: &VisualizerConfig) -> Self {
		Self {
			url: config.narration_url.clone(),
			timeout: config.narration_timeout(),
			ledger: RefCell::new(RequestLedger::new()),
			in_flight: RefCell::new(None),
		}
	}

	/// Explanation text for `request`, the fallback sentence on any failure,
	/// or `None` when a newer request replaced this one.
	pub async fn narrate(&self, request: NarrationRequest) -> Option<String> {
		match self.explain(&request).await {
			Ok(text) => Some(text),
			Err(NarrationError::Superseded) => {
				debug!("dropping narration for step {}", request.step_number());
				None
			}
			Err(err) => {
				warn!("narration fallback for step {}: {err}", request.step_number());
				Some(request.fallback())
			}
		}
	}

	/// Aborts the in-flight request and invalidates its answer.
	pub fn cancel(&self) {
		self.ledger.borrow_mut().cancel_all();
		if let Some(controller) = self.in_flight.borrow_mut().take() {
			controller.abort();
		}
	}

	/// Fetches the narration for `request` without any fallback.
	/// Fails with [`NarrationError::Superseded`] once a newer request started.
	pub async fn explain(&self, request: &NarrationRequest) -> Result<String, NarrationError> {
		let ticket = self.ledger.borrow_mut().issue();
		if let Some(previous) = self.in_flight.borrow_mut().take() {
			previous.abort();
		}
		let controller = AbortController::new().map_err(transport)?;
		*self.in_flight.borrow_mut() = Some(controller.clone());

		let timed_out = Rc::new(Cell::new(false));
		let timer = {
			let (controller, timed_out) = (controller.clone(), timed_out.clone());
			set_timeout_with_handle(
				move || {
					timed_out.set(true);
					controller.abort();
				},
				self.timeout,
			)
			.ok()
		};

		let started = js_sys::Date::now();
		let result = self.post(request, &controller.signal()).await;
		if let Some(timer) = timer {
			timer.clear();
		}
		if !self.ledger.borrow().is_current(ticket) {
			return Err(NarrationError::Superseded);
		}
		debug!(
			"narration for step {} settled in {:.0} ms",
			request.step_number(),
			js_sys::Date::now() - started
		);
		self.in_flight.borrow_mut().take();
		match result {
			Err(_) if timed_out.get() => Err(NarrationError::Timeout),
			other => other,
		}
	}

	async fn post(&self, request: &NarrationRequest, signal: &AbortSignal) -> Result<String, NarrationError> {
		let body = request.to_json()?;
		let init = RequestInit::new();
		init.set_method("POST");
		init.set_body(&JsValue::from_str(&body));
		init.set_signal(Some(signal));
		let http = Request::new_with_str_and_init(&self.url, &init).map_err(transport)?;
		http.headers()
			.set("Content-Type", "application/json")
			.map_err(transport)?;

		let window = web_sys::window().ok_or_else(|| NarrationError::Transport("no window".into()))?;
		let value = JsFuture::from(window.fetch_with_request(&http))
			.await
			.map_err(transport)?;
		let response: Response = value.dyn_into().map_err(transport)?;
		if !response.ok() {
			return Err(NarrationError::Status(response.status()));
		}
		let text = JsFuture::from(response.text().map_err(transport)?)
			.await
			.map_err(transport)?;
		parse_response(&text.as_string().unwrap_or_default())
	}
}

fn transport(err: JsValue) -> NarrationError {
	NarrationError::Transport(format!("{err:?}"))
}
