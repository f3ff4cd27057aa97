use bevy_ecs::prelude::Entity;
use inspector_fold::scene::{
    ColorDrivers, Image, OrientationDrive, RawImage, RectOffsets, RectOrientation, SectionToggle,
    SpriteProvider, ui,
};
use inspector_fold::{
    FoldSettings, InspectorHook, PanelBuilt, SceneGraph, SubjectKind, TRACKING_TAG,
};
use inspector_fold::scene::UserId;
use std::sync::Arc;

fn build_panel(graph: &mut SceneGraph, rows: &[&str]) -> (Entity, Entity, Entity, Vec<Entity>) {
    let panel = graph.spawn_child(graph.root(), "Inspector");
    let body = graph.spawn_child(panel, "ComponentPanel");
    let header = graph.spawn_child(body, "Header");
    let rows = rows.iter().map(|row| graph.spawn_child(body, row)).collect();
    (panel, body, header, rows)
}

fn component_event(panel: Entity) -> PanelBuilt {
    PanelBuilt {
        panel,
        subject: SubjectKind::Component,
        requester: UserId::new(),
        allow_container: false,
    }
}

fn section_of(graph: &SceneGraph, body: Entity) -> Option<Entity> {
    graph.children(body).into_iter().find(|&c| graph.has_tag(c, TRACKING_TAG))
}

#[test]
fn header_stays_first_and_rows_move_in_order() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let (panel, body, header, rows) = build_panel(&mut graph, &["RowA", "RowB", "RowC"]);

    hook.on_panel_built(&mut graph, &component_event(panel));

    let children = graph.children(body);
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], header);

    let section = section_of(&graph, body).expect("tagged section under the body");
    assert_eq!(children[1], section);
    assert_eq!(graph.children(section), rows);
    assert_eq!(graph.parent(section), Some(body));
}

#[test]
fn toggle_is_first_child_of_header_and_targets_section() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let (panel, body, header, _) = build_panel(&mut graph, &["RowA"]);

    hook.on_panel_built(&mut graph, &component_event(panel));

    let section = section_of(&graph, body).unwrap();
    let toggle = graph.first_child(header).expect("toggle under the header");
    let binding = graph.world.get::<SectionToggle>(toggle).expect("toggle binding");
    assert_eq!(binding.section_root, section);

    let toggles: Vec<Entity> = graph
        .children(header)
        .into_iter()
        .filter(|&c| graph.world.get::<SectionToggle>(c).is_some())
        .collect();
    assert_eq!(toggles, vec![toggle]);
}

#[test]
fn group_subject_is_a_noop() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let (panel, body, header, rows) = build_panel(&mut graph, &["RowA", "RowB"]);

    let mut event = component_event(panel);
    event.subject = SubjectKind::Group;
    hook.on_panel_built(&mut graph, &event);

    let mut expected = vec![header];
    expected.extend(rows);
    assert_eq!(graph.children(body), expected);
    assert!(section_of(&graph, body).is_none());
    assert!(graph.children(header).is_empty());
}

#[test]
fn allow_container_is_a_noop() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let (panel, body, _, _) = build_panel(&mut graph, &["RowA"]);

    let mut event = component_event(panel);
    event.allow_container = true;
    hook.on_panel_built(&mut graph, &event);

    assert_eq!(graph.children(body).len(), 2);
    assert!(section_of(&graph, body).is_none());
}

#[test]
fn disabled_feature_is_a_noop() {
    let mut graph = SceneGraph::new();
    let settings = Arc::new(FoldSettings::default());
    settings.set_enabled(false);
    let hook = InspectorHook::new(settings);
    let (panel, body, _, _) = build_panel(&mut graph, &["RowA"]);

    hook.on_panel_built(&mut graph, &component_event(panel));

    assert_eq!(graph.children(body).len(), 2);
    assert!(section_of(&graph, body).is_none());
}

#[test]
fn body_without_header_is_a_noop() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let panel = graph.spawn_child(graph.root(), "Inspector");
    let body = graph.spawn_child(panel, "ComponentPanel");

    hook.on_panel_built(&mut graph, &component_event(panel));

    assert!(graph.children(body).is_empty());
}

#[test]
fn duplicate_invocation_keeps_a_single_section() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let (panel, body, header, rows) = build_panel(&mut graph, &["RowA", "RowB"]);

    let event = component_event(panel);
    hook.on_panel_built(&mut graph, &event);
    hook.on_panel_built(&mut graph, &event);

    let sections: Vec<Entity> = graph
        .children(body)
        .into_iter()
        .filter(|&c| graph.has_tag(c, TRACKING_TAG))
        .collect();
    assert_eq!(sections.len(), 1);
    assert_eq!(graph.children(sections[0]), rows);
    assert_eq!(graph.children(header).len(), 1);
}

#[test]
fn icon_is_reskinned_onto_a_raw_image() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let (panel, body, header, _) = build_panel(&mut graph, &["RowA"]);

    hook.on_panel_built(&mut graph, &component_event(panel));

    let section = section_of(&graph, body).unwrap();
    let toggle = graph.first_child(header).unwrap();
    let icon = graph.first_child(toggle).unwrap();

    assert!(graph.world.get::<Image>(icon).is_none());
    assert!(graph.world.get::<SpriteProvider>(icon).is_none());

    let raw = graph.world.get::<RawImage>(icon).expect("raw image renderer");
    assert_eq!(raw.texture, Some(icon));
    assert!(raw.preserve_aspect);

    let drive = graph.world.get::<OrientationDrive>(icon).expect("orientation drive");
    assert_eq!(drive.source, section);

    let drivers = graph.world.get::<ColorDrivers>(toggle).expect("color drivers");
    assert_eq!(drivers.0[1].target, Some(icon));

    let rect = graph.world.get::<RectOffsets>(icon).expect("rect offsets");
    assert_eq!(rect.min, glam::Vec2::ZERO);
    assert_eq!(rect.max, glam::Vec2::ZERO);
}

#[test]
fn toggle_drives_section_and_icon_through_propagation() {
    let mut graph = SceneGraph::new();
    let hook = InspectorHook::new(Arc::new(FoldSettings::default()));
    let (panel, body, header, _) = build_panel(&mut graph, &["RowA"]);

    hook.on_panel_built(&mut graph, &component_event(panel));

    let section = section_of(&graph, body).unwrap();
    let toggle = graph.first_child(header).unwrap();
    let icon = graph.first_child(toggle).unwrap();

    assert!(graph.set_toggle_expanded(toggle, false));
    graph.update();
    assert!(!graph.is_active(section));
    assert_eq!(
        graph.world.get::<RawImage>(icon).unwrap().orientation,
        RectOrientation::CounterClockwise90
    );
    assert_eq!(graph.world.get::<RawImage>(icon).unwrap().tint, ui::HERO_PURPLE);

    assert!(graph.set_toggle_expanded(toggle, true));
    graph.update();
    assert!(graph.is_active(section));
    assert_eq!(graph.world.get::<RawImage>(icon).unwrap().orientation, RectOrientation::Default);
}

#[test]
fn end_to_end_fold_with_global_default_expanded() {
    let mut graph = SceneGraph::new();
    let settings = Arc::new(FoldSettings::default());
    settings.set_default_expanded(true);
    let hook = InspectorHook::new(settings);
    let (panel, body, header, rows) = build_panel(&mut graph, &["RowA", "RowB"]);

    hook.on_panel_built(&mut graph, &component_event(panel));
    graph.update();

    let section = section_of(&graph, body).expect("tagged section");
    assert_eq!(graph.children(body), vec![header, section]);
    assert_eq!(graph.children(section), rows);
    assert!(graph.is_active(section));

    let toggle = graph.first_child(header).unwrap();
    let binding = graph.world.get::<SectionToggle>(toggle).unwrap();
    assert_eq!(binding.section_root, section);
    assert!(binding.expanded);
}
