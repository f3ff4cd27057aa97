pub mod config;
pub mod hook;
pub mod prefs;
pub mod restructure;
pub mod scene;
pub mod sweep;

pub use config::{FoldConfig, FoldSettings};
pub use hook::{InspectorHook, PanelBuilt, SubjectKind};
pub use restructure::{restructure, TRACKING_TAG};
pub use scene::SceneGraph;
pub use sweep::{SweepScheduler, SWEEP_DELAY};
