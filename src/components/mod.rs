pub mod context;
pub mod panels;
pub mod traversal_canvas;
