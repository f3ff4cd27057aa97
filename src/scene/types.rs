use bevy_ecs::prelude::*;
use glam::{Vec2, Vec4};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

#[derive(Component, Clone, Copy)]
pub struct Parent(pub Entity);
#[derive(Component, Default)]
pub struct Children(pub Vec<Entity>);

#[derive(Component, Clone)]
pub struct Name(pub String);

/// String tag presence set. A node carries zero or more tags; tags are the
/// only cross-subsystem identification mechanism, deliberately weaker than an
/// entity reference so they survive arbitrary host-side reparenting.
#[derive(Component, Default)]
pub struct Tags(pub HashSet<String>);

/// Node-local active flag. An inactive node is hidden along with its subtree.
#[derive(Component, Clone, Copy)]
pub struct ActiveSelf(pub bool);

impl Default for ActiveSelf {
    fn default() -> Self {
        Self(true)
    }
}

#[derive(Component, Clone, Copy)]
pub struct VerticalLayout {
    pub spacing: f32,
}

#[derive(Component, Clone, Copy)]
pub struct Button {
    pub min_width: f32,
}

/// Per-part color drives owned by a button. Index 0 tints the button
/// background, index 1 tints the icon. A drive with a target writes its color
/// into the target's `RawImage` tint on every propagation turn.
#[derive(Component, Default)]
pub struct ColorDrivers(pub Vec<ColorDrive>);

#[derive(Clone, Copy)]
pub struct ColorDrive {
    pub color: Vec4,
    pub target: Option<Entity>,
}

/// Default UI image renderer attached by the host's button builder.
#[derive(Component, Clone, Copy)]
pub struct Image {
    pub tint: Vec4,
}

#[derive(Component, Clone)]
pub struct SpriteProvider {
    pub source: String,
}

#[derive(Component, Clone)]
pub struct StaticTexture {
    pub uri: String,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RectOrientation {
    #[default]
    Default,
    CounterClockwise90,
}

/// Raw texture renderer. `texture` references the node hosting the backing
/// `StaticTexture` rather than copying the URI, so re-skinning shares the
/// texture instead of duplicating it.
#[derive(Component, Clone, Copy)]
pub struct RawImage {
    pub texture: Option<Entity>,
    pub preserve_aspect: bool,
    pub tint: Vec4,
    pub orientation: RectOrientation,
}

#[derive(Component, Clone, Copy, Default)]
pub struct RectOffsets {
    pub min: Vec2,
    pub max: Vec2,
}

/// Drive-capable binding from a toggle control to its collapsible section.
/// Once attached, this is the sole writer of the section's `ActiveSelf`.
#[derive(Component, Clone, Copy)]
pub struct SectionToggle {
    pub section_root: Entity,
    pub expanded: bool,
}

/// Two-state orientation driver: reads `ActiveSelf` on `source` and writes
/// the matching orientation into the carrying node's `RawImage`.
#[derive(Component, Clone, Copy)]
pub struct OrientationDrive {
    pub source: Entity,
    pub active_value: RectOrientation,
    pub inactive_value: RectOrientation,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

/// Marks a user's root node in the tree.
#[derive(Component, Clone, Copy)]
pub struct UserRoot(pub UserId);

/// Named per-user variable namespace. Externally owned; this crate only reads
/// from it.
#[derive(Component, Clone, Default)]
pub struct VariableSpace {
    pub name: String,
    pub bools: HashMap<String, bool>,
}

impl VariableSpace {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), bools: HashMap::new() }
    }

    pub fn with_bool(mut self, key: impl Into<String>, value: bool) -> Self {
        self.bools.insert(key.into(), value);
        self
    }

    pub fn read_bool(&self, key: &str) -> Option<bool> {
        self.bools.get(key).copied()
    }
}
