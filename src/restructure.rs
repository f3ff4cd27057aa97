use crate::config::FoldSettings;
use crate::hook::SubjectKind;
use crate::prefs;
use crate::scene::ui;
use crate::scene::{
    ColorDrivers, Image, OrientationDrive, RawImage, RectOffsets, RectOrientation, SceneGraph,
    SectionToggle, SpriteProvider, StaticTexture, UserId, VerticalLayout,
};
use crate::sweep::SweepScheduler;
use bevy_ecs::prelude::Entity;
use glam::Vec2;

/// Marker identifying sections produced by this crate. Cleanup relies on this
/// tag plus tree position instead of a back-pointer, so it keeps working no
/// matter where the host moves the panel afterwards.
pub const TRACKING_TAG: &str = "InspectorFoldSection";

pub const SECTION_SPACING: f32 = 4.0;
pub const TOGGLE_MIN_WIDTH: f32 = 80.0;
pub const FOLD_ICON_URI: &str = "textures/ui/fold_arrow.png";

/// Wraps the body of a freshly built component panel in a togglable section.
///
/// Strictly additive: every guard and lookup failure degrades to a silent
/// no-op, because panel construction is outside this crate's control and must
/// never be broken by the retrofit.
pub fn restructure(
    graph: &mut SceneGraph,
    settings: &FoldSettings,
    sweeper: &SweepScheduler,
    panel: Entity,
    requester: UserId,
    subject: SubjectKind,
    allow_container: bool,
) {
    if !settings.enabled() {
        return;
    }
    // Only leaf component panels fold; group panels would nest collapses.
    if allow_container || subject == SubjectKind::Group {
        return;
    }

    // The body just appended by the construction callback.
    let Some(latest) = graph.last_child(panel) else {
        return;
    };
    let Some(header) = graph.first_child(latest) else {
        return;
    };

    // A duplicate hook invocation keeps the first section.
    if graph.children(latest).into_iter().any(|c| graph.has_tag(c, TRACKING_TAG)) {
        return;
    }

    // Snapshot before the section exists so it can never be moved into
    // itself; everything except the header relocates.
    let body: Vec<Entity> = graph.children(latest).into_iter().skip(1).collect();

    let section = graph.spawn_child(latest, "FoldSection");
    graph.add_tag(section, TRACKING_TAG);
    graph.world.entity_mut(section).insert(VerticalLayout { spacing: SECTION_SPACING });

    for child in body {
        graph.reparent(child, section);
    }

    let expanded = prefs::resolve_default_expanded(graph, requester, settings);
    build_toggle(graph, header, section, expanded);

    if settings.run_cleanup() {
        sweeper.arm();
    }
}

/// Builds the toggle control under the header and wires it to the section.
fn build_toggle(graph: &mut SceneGraph, header: Entity, section: Entity, expanded: bool) -> Entity {
    let toggle = ui::editor_button(
        graph,
        header,
        FOLD_ICON_URI,
        ui::SUB_PURPLE,
        ui::HERO_PURPLE,
        TOGGLE_MIN_WIDTH,
    );
    graph.reorder_front(toggle);

    graph.world.entity_mut(toggle).insert(SectionToggle { section_root: section, expanded });
    // Seed the section so the tree is consistent before the first
    // propagation turn; the toggle owns this field from here on.
    graph.set_active(section, expanded);

    reskin_icon(graph, toggle, section);
    toggle
}

/// Swaps the icon's default renderer stack for a raw-image renderer on the
/// same backing texture, and wires the orientation drive so the arrow rotates
/// with the section's active state.
fn reskin_icon(graph: &mut SceneGraph, toggle: Entity, section: Entity) {
    let Some(icon) = graph.first_child(toggle) else {
        return;
    };

    graph.world.entity_mut(icon).remove::<Image>();
    graph.world.entity_mut(icon).remove::<SpriteProvider>();

    let texture = graph.world.get::<StaticTexture>(icon).map(|_| icon);
    graph.world.entity_mut(icon).insert((
        RawImage {
            texture,
            preserve_aspect: true,
            tint: ui::WHITE,
            orientation: RectOrientation::Default,
        },
        OrientationDrive {
            source: section,
            active_value: RectOrientation::Default,
            inactive_value: RectOrientation::CounterClockwise90,
        },
    ));

    // Existing icon theming keeps flowing through the secondary color drive.
    if let Some(mut drivers) = graph.world.get_mut::<ColorDrivers>(toggle) {
        if let Some(drive) = drivers.0.get_mut(1) {
            drive.target = Some(icon);
        }
    }

    // The re-skinned icon fills its slot exactly.
    if let Some(mut rect) = graph.world.get_mut::<RectOffsets>(icon) {
        rect.min = Vec2::ZERO;
        rect.max = Vec2::ZERO;
    }
}
