use crate::config::FoldSettings;
use crate::restructure::TRACKING_TAG;
use crate::scene::SceneGraph;
use bevy_ecs::prelude::Entity;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Quiet period between arming and the scan. Long enough for a legitimate
/// panel rebuild to settle, short enough that escaped sections do not visibly
/// accumulate.
pub const SWEEP_DELAY: Duration = Duration::from_secs(10);

#[derive(Default)]
struct SweepState {
    running: bool,
    due_at: Option<Instant>,
}

/// Single-flight deferred cleanup for sections that the host's own layout
/// logic has reparented onto the tree root. Clones share one pending slot;
/// the host instantiates one scheduler per tree.
#[derive(Clone)]
pub struct SweepScheduler {
    state: Arc<Mutex<SweepState>>,
    delay: Duration,
}

impl Default for SweepScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl SweepScheduler {
    pub fn new() -> Self {
        Self::with_delay(SWEEP_DELAY)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self { state: Arc::new(Mutex::new(SweepState::default())), delay }
    }

    fn state(&self) -> MutexGuard<'_, SweepState> {
        // The flag must stay reachable even if a poisoned lock is left behind
        // by a panicking turn, or the scheduler wedges with a sweep forever
        // pending.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn arm(&self) {
        self.arm_at(Instant::now());
    }

    /// Fire-and-forget. If a sweep is already armed or in flight the request
    /// coalesces into it; the pending sweep covers any damage that exists by
    /// the time it fires.
    pub fn arm_at(&self, now: Instant) {
        let mut state = self.state();
        if state.running {
            return;
        }
        state.running = true;
        state.due_at = Some(now + self.delay);
    }

    pub fn is_running(&self) -> bool {
        self.state().running
    }

    /// One cooperative scheduler turn. When the armed sweep's delay has
    /// elapsed, the scan runs synchronously inside this call and the number
    /// of escaped sections removed is returned. The lock is never held across
    /// the scan.
    pub fn pump(&self, now: Instant, graph: &mut SceneGraph, settings: &FoldSettings) -> Option<usize> {
        {
            let mut state = self.state();
            let due = matches!(state.due_at, Some(due) if now >= due);
            if !due {
                return None;
            }
            state.due_at = None;
        }

        // Scoped release: `running` resets on every exit path, including an
        // unwinding scan.
        let _reset = RunningReset(self);
        Some(sweep_body(graph, settings))
    }
}

struct RunningReset<'a>(&'a SweepScheduler);

impl Drop for RunningReset<'_> {
    fn drop(&mut self) {
        let mut state = self.0.state();
        state.running = false;
        state.due_at = None;
    }
}

/// The scan itself. Re-validates the enabled switch (it may have flipped
/// during the wait), snapshots the matches, then destroys them.
fn sweep_body(graph: &mut SceneGraph, settings: &FoldSettings) -> usize {
    if !settings.enabled() {
        return 0;
    }

    log::debug!("Checking for escaped sections...");

    let root = graph.root();
    // Escaped signature: tracking tag plus the tree root as immediate parent.
    // Snapshot before destroying; the child lists mutate under the scan
    // otherwise.
    let escaped: Vec<Entity> = graph
        .descendants_with_tag(root, TRACKING_TAG)
        .into_iter()
        .filter(|&node| graph.parent(node) == Some(root))
        .collect();

    let mut count = 0;
    for node in escaped {
        if graph.entity_exists(node) && graph.destroy_branch(node) {
            count += 1;
        }
    }

    log::debug!("Removed {count} escaped sections.");
    count
}
