mod component;
mod render;
mod state;
mod types;

pub use component::TraversalCanvas;
