use crate::engine::{NodeId, Position};

use super::types::Scene;

pub const NODE_RADIUS: f64 = 20.0;
pub const HIT_RADIUS: f64 = 24.0;
/// Pointer travel below this counts as a click rather than a drag.
pub const CLICK_SLOP: f64 = 4.0;

#[derive(Clone, Debug)]
pub struct ViewTransform {
	pub x: f64,
	pub y: f64,
	pub k: f64,
}

impl Default for ViewTransform {
	fn default() -> Self {
		Self { x: 0.0, y: 0.0, k: 1.0 }
	}
}

#[derive(Clone, Debug, Default)]
pub struct DragState {
	pub node: Option<NodeId>,
	pub start_x: f64,
	pub start_y: f64,
	pub node_start: Position,
	pub moved: bool,
}

#[derive(Clone, Debug, Default)]
pub struct PanState {
	pub active: bool,
	pub start_x: f64,
	pub start_y: f64,
	pub transform_start_x: f64,
	pub transform_start_y: f64,
}

/// Canvas-local view state. The graph itself lives in the session; the
/// scene here is a render copy refreshed whenever the session or frame
/// changes.
#[derive(Debug, Default)]
pub struct CanvasState {
	pub scene: Scene,
	pub selected: Option<NodeId>,
	pub hovered: Option<NodeId>,
	pub transform: ViewTransform,
	pub drag: DragState,
	pub pan: PanState,
	pub width: f64,
	pub height: f64,
	/// The render loop reschedules itself only while this is set.
	pub animation_running: bool,
	/// Id of the requested but not yet delivered animation frame.
	pub frame_request: Option<i32>,
}

impl CanvasState {
	pub fn new(width: f64, height: f64) -> Self {
		Self {
			width,
			height,
			..Self::default()
		}
	}

	pub fn screen_to_graph(&self, sx: f64, sy: f64) -> (f64, f64) {
		(
			(sx - self.transform.x) / self.transform.k,
			(sy - self.transform.y) / self.transform.k,
		)
	}

	/// Topmost node under the screen point.
	pub fn node_at_position(&self, sx: f64, sy: f64) -> Option<NodeId> {
		let (gx, gy) = self.screen_to_graph(sx, sy);
		self.scene
			.nodes
			.iter()
			.rev()
			.find(|n| (n.x - gx).hypot(n.y - gy) < HIT_RADIUS)
			.map(|n| n.id)
	}

	pub fn begin_drag(&mut self, id: NodeId, sx: f64, sy: f64) {
		let Some(node) = self.scene.node(id) else {
			return;
		};
		self.drag = DragState {
			node: Some(id),
			start_x: sx,
			start_y: sy,
			node_start: Position { x: node.x, y: node.y },
			moved: false,
		};
	}

	/// New graph position for the dragged node, once the pointer has left
	/// the click slop.
	pub fn drag_to(&mut self, sx: f64, sy: f64) -> Option<(NodeId, Position)> {
		let id = self.drag.node?;
		let (dx, dy) = (sx - self.drag.start_x, sy - self.drag.start_y);
		if !self.drag.moved && dx.hypot(dy) < CLICK_SLOP {
			return None;
		}
		self.drag.moved = true;
		let k = self.transform.k;
		Some((
			id,
			Position {
				x: self.drag.node_start.x + dx / k,
				y: self.drag.node_start.y + dy / k,
			},
		))
	}

	/// Ends a drag and returns the node if the gesture was a click.
	pub fn end_drag(&mut self) -> Option<NodeId> {
		let drag = std::mem::take(&mut self.drag);
		self.pan.active = false;
		drag.node.filter(|_| !drag.moved)
	}

	pub fn begin_pan(&mut self, sx: f64, sy: f64) {
		self.pan = PanState {
			active: true,
			start_x: sx,
			start_y: sy,
			transform_start_x: self.transform.x,
			transform_start_y: self.transform.y,
		};
	}

	pub fn pan_to(&mut self, sx: f64, sy: f64) {
		if self.pan.active {
			self.transform.x = self.pan.transform_start_x + (sx - self.pan.start_x);
			self.transform.y = self.pan.transform_start_y + (sy - self.pan.start_y);
		}
	}

	/// Zooms around the screen point, keeping it fixed.
	pub fn zoom_at(&mut self, sx: f64, sy: f64, delta_y: f64) {
		let factor = if delta_y > 0.0 { 0.9 } else { 1.1 };
		let new_k = (self.transform.k * factor).clamp(0.25, 4.0);
		let ratio = new_k / self.transform.k;
		self.transform.x = sx - (sx - self.transform.x) * ratio;
		self.transform.y = sy - (sy - self.transform.y) * ratio;
		self.transform.k = new_k;
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
	}

	pub fn start_animation(&mut self) {
		self.animation_running = true;
	}

	/// Records the pending frame. Ignored once the loop was stopped.
	pub fn frame_scheduled(&mut self, id: i32) {
		if self.animation_running {
			self.frame_request = Some(id);
		}
	}

	/// Stops the render loop and hands back the frame that still has to be
	/// cancelled, if any.
	pub fn stop_animation(&mut self) -> Option<i32> {
		self.animation_running = false;
		self.frame_request.take()
	}
}
