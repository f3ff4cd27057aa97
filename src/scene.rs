pub mod graph;
pub mod systems;
pub mod types;
pub mod ui;

pub use graph::SceneGraph;
pub use types::*;
