use super::graph::SceneGraph;
use super::types::{Button, ColorDrive, ColorDrivers, Image, RectOffsets, SpriteProvider, StaticTexture};
use bevy_ecs::prelude::Entity;
use glam::{Vec2, Vec4};

// Standard editor palette, matching the host's inspector chrome.
pub const SUB_PURPLE: Vec4 = Vec4::new(0.23, 0.12, 0.33, 1.0);
pub const HERO_PURPLE: Vec4 = Vec4::new(0.68, 0.43, 1.0, 1.0);
pub const WHITE: Vec4 = Vec4::new(1.0, 1.0, 1.0, 1.0);

// Icon slots come out of the host builder with a small inset; restructuring
// zeroes this so the re-skinned icon fills its slot exactly.
const ICON_INSET: f32 = 4.0;

/// Builds a standard editor-style icon button: the button node carries the
/// sizing and color drives, its first child is the icon with the host's
/// default renderer stack.
pub fn editor_button(
    graph: &mut SceneGraph,
    parent: Entity,
    icon_uri: &str,
    base: Vec4,
    accent: Vec4,
    min_width: f32,
) -> Entity {
    let button = graph.spawn_child(parent, "Button");
    graph.world.entity_mut(button).insert((
        Button { min_width },
        ColorDrivers(vec![
            ColorDrive { color: base, target: None },
            ColorDrive { color: accent, target: None },
        ]),
    ));

    let icon = graph.spawn_child(button, "Icon");
    graph.world.entity_mut(icon).insert((
        Image { tint: WHITE },
        SpriteProvider { source: icon_uri.to_string() },
        StaticTexture { uri: icon_uri.to_string() },
        RectOffsets { min: Vec2::splat(ICON_INSET), max: Vec2::splat(-ICON_INSET) },
    ));

    button
}
