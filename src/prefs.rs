use crate::config::FoldSettings;
use crate::scene::{SceneGraph, UserId};

pub const USER_SPACE: &str = "User";
pub const COLLAPSE_DEFAULT_VAR: &str = "Inspector_Collapse_Default";

/// Computes the initial expanded state for a panel built on behalf of
/// `requester`. Queried fresh on every panel build; the preference may change
/// between panels in the same session.
///
/// The user variable expresses "collapse by default", the return value
/// expresses "expanded by default", so a present variable is negated. Absent
/// variable or unavailable namespace falls back to the global switch.
pub fn resolve_default_expanded(
    graph: &SceneGraph,
    requester: UserId,
    settings: &FoldSettings,
) -> bool {
    if let Some(user_root) = graph.user_root(requester) {
        if let Some(space) = graph.variable_space(user_root, USER_SPACE) {
            if let Some(collapse_default) = space.read_bool(COLLAPSE_DEFAULT_VAR) {
                return !collapse_default;
            }
        }
    }
    settings.default_expanded()
}
