use std::cell::RefCell;
use std::rc::Rc;

use leptos::prelude::*;
use log::warn;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, MouseEvent, WheelEvent};

use super::render;
use super::state::CanvasState;
use super::types::Scene;
use crate::components::context::AppContext;
use crate::engine::StepFrame;

type FrameSlot = RefCell<Option<Closure<dyn FnMut()>>>;

/// Requests the next animation frame for the loop held in `slot`.
fn schedule(state: &RefCell<CanvasState>, slot: &FrameSlot) {
	let Some(window) = web_sys::window() else {
		return;
	};
	let callback = slot.borrow();
	let Some(cb) = callback.as_ref() else {
		return;
	};
	if let Ok(id) = window.request_animation_frame(cb.as_ref().unchecked_ref()) {
		state.borrow_mut().frame_scheduled(id);
	}
}

fn stop(state: &RefCell<CanvasState>) {
	let pending = state.borrow_mut().stop_animation();
	if let (Some(id), Some(window)) = (pending, web_sys::window()) {
		let _ = window.cancel_animation_frame(id);
	}
}

fn pointer(canvas_ref: NodeRef<leptos::html::Canvas>, ev: &MouseEvent) -> Option<(f64, f64)> {
	let canvas: HtmlCanvasElement = canvas_ref.get()?.into();
	let rect = canvas.get_bounding_client_rect();
	Some((
		ev.client_x() as f64 - rect.left(),
		ev.client_y() as f64 - rect.top(),
	))
}

/// Graph canvas. Drag a node to move it, drag the background to pan, scroll
/// to zoom, click two nodes to connect them.
#[component]
pub fn TraversalCanvas(
	#[prop(default = None)] width: Option<f64>,
	#[prop(default = None)] height: Option<f64>,
) -> impl IntoView {
	let ctx = AppContext::get();
	let canvas_ref = NodeRef::<leptos::html::Canvas>::new();
	let state = Rc::new(RefCell::new(CanvasState::new(0.0, 0.0)));
	let animate: Rc<FrameSlot> = Rc::new(RefCell::new(None));

	let state_sync = state.clone();
	Effect::new(move |_| {
		let scene = ctx.frame.with(|frame| {
			ctx.session.with(|s| Scene::build(s.graph(), frame.as_ref().map(StepFrame::current)))
		});
		let mut s = state_sync.borrow_mut();
		s.scene = scene;
		s.selected = ctx.selected.get();
	});

	let (state_init, animate_init) = (state.clone(), animate.clone());
	Effect::new(move |_| {
		let Some(canvas) = canvas_ref.get() else {
			return;
		};
		let canvas: HtmlCanvasElement = canvas.into();
		let parent = canvas.parent_element();
		let parent_size = |f: fn(&web_sys::Element) -> i32, fallback: f64| {
			parent
				.as_ref()
				.map(|p| f(p) as f64)
				.filter(|v| *v > 0.0)
				.unwrap_or(fallback)
		};
		let w = width.unwrap_or_else(|| parent_size(web_sys::Element::client_width, 800.0));
		let h = height.unwrap_or_else(|| parent_size(web_sys::Element::client_height, 600.0));
		canvas.set_width(w as u32);
		canvas.set_height(h as u32);
		state_init.borrow_mut().resize(w, h);

		let Some(ctx2d) = canvas
			.get_context("2d")
			.ok()
			.flatten()
			.and_then(|c| c.dyn_into::<CanvasRenderingContext2d>().ok())
		else {
			warn!("canvas has no 2d context");
			return;
		};

		stop(&state_init);
		let (state_anim, slot) = (state_init.clone(), Rc::downgrade(&animate_init));
		*animate_init.borrow_mut() = Some(Closure::new(move || {
			if !state_anim.borrow().animation_running {
				return;
			}
			render::render(&state_anim.borrow(), &ctx2d);
			if let Some(slot) = slot.upgrade() {
				schedule(&state_anim, &slot);
			}
		}));
		state_init.borrow_mut().start_animation();
		schedule(&state_init, &animate_init);
	});

	let teardown = StoredValue::new_local((state.clone(), animate.clone()));
	on_cleanup(move || {
		teardown.try_with_value(|(state, animate)| {
			stop(state);
			animate.borrow_mut().take();
		});
	});

	let state_md = state.clone();
	let on_mousedown = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let mut s = state_md.borrow_mut();
		match s.node_at_position(x, y) {
			Some(id) => s.begin_drag(id, x, y),
			None => s.begin_pan(x, y),
		}
	};

	let state_mm = state.clone();
	let on_mousemove = move |ev: MouseEvent| {
		let Some((x, y)) = pointer(canvas_ref, &ev) else {
			return;
		};
		let moved = {
			let mut s = state_mm.borrow_mut();
			if s.drag.node.is_none() {
				let hovered = s.node_at_position(x, y);
				s.hovered = hovered;
				s.pan_to(x, y);
				None
			} else {
				s.drag_to(x, y)
			}
		};
		if let Some((id, position)) = moved {
			ctx.apply(|session| session.move_node(id, position));
		}
	};

	let state_mu = state.clone();
	let on_mouseup = move |_: MouseEvent| {
		let clicked = state_mu.borrow_mut().end_drag();
		if let Some(id) = clicked {
			ctx.select_or_connect(id);
		}
	};

	let state_ml = state.clone();
	let on_mouseleave = move |_: MouseEvent| {
		let mut s = state_ml.borrow_mut();
		s.end_drag();
		s.hovered = None;
	};

	let state_wh = state.clone();
	let on_wheel = move |ev: WheelEvent| {
		ev.prevent_default();
		if let Some((x, y)) = pointer(canvas_ref, &ev) {
			state_wh.borrow_mut().zoom_at(x, y, ev.delta_y());
		}
	};

	view! {
		<canvas
			node_ref=canvas_ref
			class="traversal-canvas"
			on:mousedown=on_mousedown
			on:mousemove=on_mousemove
			on:mouseup=on_mouseup
			on:mouseleave=on_mouseleave
			on:wheel=on_wheel
			style="display: block; cursor: grab;"
		/>
	}
}
