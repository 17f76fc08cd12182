//! Side panels around the canvas.

mod comparison;
mod data_structures;
mod editor;
mod explanation;
mod playback;
mod setup;

pub use comparison::ComparisonPanel;
pub use data_structures::DataStructuresPanel;
pub use editor::EditorPanel;
pub use explanation::ExplanationPanel;
pub use playback::PlaybackPanel;
pub use setup::SetupPanel;
