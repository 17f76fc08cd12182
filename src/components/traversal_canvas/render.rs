use std::f64::consts::PI;

use web_sys::CanvasRenderingContext2d;

use super::state::{CanvasState, NODE_RADIUS};
use super::types::{NodeRole, SceneEdge};

const BACKGROUND: &str = "#1a1a2e";
const EDGE: &str = "rgba(100, 180, 255, 0.6)";
const EDGE_ON_PATH: &str = "#f5c542";

fn role_color(role: NodeRole) -> &'static str {
	match role {
		NodeRole::Unvisited => "#4a4e69",
		NodeRole::Visited => "#2ca02c",
		NodeRole::Frontier => "#1f77b4",
		NodeRole::OnPath => "#f5c542",
		NodeRole::Current => "#d62728",
	}
}

pub fn render(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	ctx.set_fill_style_str(BACKGROUND);
	ctx.fill_rect(0.0, 0.0, state.width, state.height);
	ctx.save();
	let _ = ctx.translate(state.transform.x, state.transform.y);
	let _ = ctx.scale(state.transform.k, state.transform.k);
	for edge in &state.scene.edges {
		draw_edge(state, edge, ctx);
	}
	draw_nodes(state, ctx);
	ctx.restore();
}

fn draw_edge(state: &CanvasState, edge: &SceneEdge, ctx: &CanvasRenderingContext2d) {
	let ((x1, y1), (x2, y2)) = (edge.from, edge.to);
	let (dx, dy) = (x2 - x1, y2 - y1);
	let dist = dx.hypot(dy);
	if dist < 0.001 {
		return;
	}
	let k = state.transform.k;
	let arrow_size = 10.0 / k;
	let color = if edge.on_path { EDGE_ON_PATH } else { EDGE };
	let (ux, uy) = (dx / dist, dy / dist);
	let end_inset = if state.scene.directed {
		NODE_RADIUS + arrow_size
	} else {
		NODE_RADIUS
	};

	ctx.set_stroke_style_str(color);
	let width = if edge.on_path { 3.0 } else { 1.5 };
	ctx.set_line_width(width / k);
	ctx.begin_path();
	ctx.move_to(x1 + ux * NODE_RADIUS, y1 + uy * NODE_RADIUS);
	ctx.line_to(x2 - ux * end_inset, y2 - uy * end_inset);
	ctx.stroke();

	if state.scene.directed {
		ctx.set_fill_style_str(color);
		let (tip_x, tip_y) = (x2 - ux * NODE_RADIUS, y2 - uy * NODE_RADIUS);
		let (back_x, back_y) = (tip_x - ux * arrow_size, tip_y - uy * arrow_size);
		let (px, py) = (-uy * arrow_size * 0.5, ux * arrow_size * 0.5);
		ctx.begin_path();
		ctx.move_to(tip_x, tip_y);
		ctx.line_to(back_x + px, back_y + py);
		ctx.line_to(back_x - px, back_y - py);
		ctx.close_path();
		ctx.fill();
	}

	if state.scene.weighted {
		let label = edge.weight.map_or_else(|| "1".to_owned(), |w| w.to_string());
		// Offset the label off the line so it stays readable.
		let (mx, my) = ((x1 + x2) / 2.0 - uy * 10.0, (y1 + y2) / 2.0 + ux * 10.0);
		ctx.set_fill_style_str("rgba(255, 255, 255, 0.85)");
		ctx.set_font(&format!("{}px sans-serif", 12.0 / k.max(0.5)));
		ctx.set_text_align("center");
		ctx.set_text_baseline("middle");
		let _ = ctx.fill_text(&label, mx, my);
	}
}

fn draw_nodes(state: &CanvasState, ctx: &CanvasRenderingContext2d) {
	let k = state.transform.k;
	ctx.set_text_align("center");
	ctx.set_text_baseline("middle");
	ctx.set_font(&format!("bold {}px sans-serif", 14.0 / k.max(0.5)));

	for node in &state.scene.nodes {
		ctx.begin_path();
		let _ = ctx.arc(node.x, node.y, NODE_RADIUS, 0.0, 2.0 * PI);
		ctx.set_fill_style_str(role_color(node.role));
		ctx.fill();

		let ring = if state.selected == Some(node.id) {
			Some(("#ffffff", 3.0))
		} else if state.hovered == Some(node.id) {
			Some(("rgba(255, 255, 255, 0.6)", 1.5))
		} else {
			None
		};
		if let Some((color, width)) = ring {
			ctx.begin_path();
			let _ = ctx.arc(node.x, node.y, NODE_RADIUS + 3.0 / k, 0.0, 2.0 * PI);
			ctx.set_stroke_style_str(color);
			ctx.set_line_width(width / k);
			ctx.stroke();
		}

		ctx.set_fill_style_str("white");
		let _ = ctx.fill_text(&node.id.to_string(), node.x, node.y);
	}
}
