use crate::config::FoldSettings;
use crate::restructure;
use crate::scene::{SceneGraph, UserId};
use crate::sweep::SweepScheduler;
use bevy_ecs::prelude::Entity;
use std::sync::Arc;
use std::time::Instant;

/// What the panel being built inspects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SubjectKind {
    /// A leaf behavior component; its panel folds.
    Component,
    /// A plain grouping node; left alone.
    Group,
}

/// Post-construction notification from the host's inspector subsystem.
#[derive(Clone, Copy, Debug)]
pub struct PanelBuilt {
    pub panel: Entity,
    pub subject: SubjectKind,
    pub requester: UserId,
    pub allow_container: bool,
}

/// The single entry point into the retrofit. The host invokes
/// `on_panel_built` after each panel construction and forwards its scheduler
/// turns through `pump`; this crate never polls or initiates construction.
pub struct InspectorHook {
    settings: Arc<FoldSettings>,
    sweeper: SweepScheduler,
}

impl InspectorHook {
    pub fn new(settings: Arc<FoldSettings>) -> Self {
        Self::with_sweeper(settings, SweepScheduler::new())
    }

    pub fn with_sweeper(settings: Arc<FoldSettings>, sweeper: SweepScheduler) -> Self {
        Self { settings, sweeper }
    }

    pub fn settings(&self) -> &FoldSettings {
        &self.settings
    }

    pub fn sweeper(&self) -> &SweepScheduler {
        &self.sweeper
    }

    pub fn on_panel_built(&self, graph: &mut SceneGraph, event: &PanelBuilt) {
        restructure::restructure(
            graph,
            &self.settings,
            &self.sweeper,
            event.panel,
            event.requester,
            event.subject,
            event.allow_container,
        );
    }

    pub fn pump(&self, now: Instant, graph: &mut SceneGraph) -> Option<usize> {
        self.sweeper.pump(now, graph, &self.settings)
    }
}
