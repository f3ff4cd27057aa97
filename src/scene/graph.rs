use super::systems::{
    sys_drive_color_targets, sys_drive_icon_orientation, sys_drive_section_visibility,
};
use super::types::{
    ActiveSelf, Children, Name, Parent, SectionToggle, Tags, UserId, UserRoot, VariableSpace,
};
use bevy_ecs::prelude::{Entity, Schedule, World};
use bevy_ecs::schedule::IntoSystemConfigs;

// ---------- Tree container ----------
//
// The host scene graph: a bevy_ecs world plus the binding-propagation
// schedule. All mutation happens on the caller's turn; nothing in here is
// touched from another thread.
pub struct SceneGraph {
    pub world: World,
    root: Entity,
    bindings: Schedule,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let mut world = World::new();
        let root = world
            .spawn((Name("Root".to_string()), Children::default(), Tags::default(), ActiveSelf::default()))
            .id();

        let mut bindings = Schedule::default();
        bindings.add_systems(
            (sys_drive_section_visibility, sys_drive_icon_orientation, sys_drive_color_targets).chain(),
        );

        Self { world, root, bindings }
    }

    pub fn root(&self) -> Entity {
        self.root
    }

    /// Runs one binding-propagation turn. The host calls this once per frame;
    /// tests call it directly.
    pub fn update(&mut self) {
        self.bindings.run(&mut self.world);
    }

    fn spawn_named(&mut self, name: &str) -> Entity {
        self.world
            .spawn((Name(name.to_string()), Children::default(), Tags::default(), ActiveSelf::default()))
            .id()
    }

    pub fn spawn_child(&mut self, parent: Entity, name: &str) -> Entity {
        let child = self.spawn_named(name);
        self.attach_child(child, parent, None);
        child
    }

    /// Spawns a child ordered before the parent's existing children.
    pub fn spawn_child_front(&mut self, parent: Entity, name: &str) -> Entity {
        let child = self.spawn_named(name);
        self.attach_child(child, parent, Some(0));
        child
    }

    fn attach_child(&mut self, child: Entity, parent: Entity, index: Option<usize>) {
        self.world.entity_mut(child).insert(Parent(parent));
        if let Some(mut children) = self.world.get_mut::<Children>(parent) {
            if !children.0.contains(&child) {
                match index {
                    Some(at) if at <= children.0.len() => children.0.insert(at, child),
                    _ => children.0.push(child),
                }
            }
        } else {
            self.world.entity_mut(parent).insert(Children(vec![child]));
        }
    }

    /// Removes the node from its parent's child sequence. The node stays
    /// alive; callers that want it gone follow up with a destroy.
    pub fn detach(&mut self, child: Entity) {
        if let Some(parent) = self.world.get::<Parent>(child).copied() {
            if let Some(mut siblings) = self.world.get_mut::<Children>(parent.0) {
                siblings.0.retain(|&c| c != child);
            }
        }
        self.world.entity_mut(child).remove::<Parent>();
    }

    /// Moves the node to the front of its parent's child sequence.
    pub fn reorder_front(&mut self, child: Entity) {
        if let Some(parent) = self.world.get::<Parent>(child).copied() {
            if let Some(mut siblings) = self.world.get_mut::<Children>(parent.0) {
                siblings.0.retain(|&c| c != child);
                siblings.0.insert(0, child);
            }
        }
    }

    /// Ownership transfer: the node leaves its old parent's child sequence
    /// and is appended to the new parent's. Existing bindings on the moved
    /// subtree stay intact since no node is copied.
    pub fn reparent(&mut self, child: Entity, new_parent: Entity) {
        self.detach(child);
        self.attach_child(child, new_parent, None);
    }

    pub fn parent(&self, entity: Entity) -> Option<Entity> {
        self.world.get::<Parent>(entity).map(|p| p.0)
    }

    pub fn children(&self, entity: Entity) -> Vec<Entity> {
        self.world.get::<Children>(entity).map(|c| c.0.clone()).unwrap_or_default()
    }

    pub fn first_child(&self, entity: Entity) -> Option<Entity> {
        self.world.get::<Children>(entity).and_then(|c| c.0.first().copied())
    }

    pub fn last_child(&self, entity: Entity) -> Option<Entity> {
        self.world.get::<Children>(entity).and_then(|c| c.0.last().copied())
    }

    pub fn node_name(&self, entity: Entity) -> Option<&str> {
        self.world.get::<Name>(entity).map(|n| n.0.as_str())
    }

    pub fn entity_exists(&self, entity: Entity) -> bool {
        self.world.get_entity(entity).is_ok()
    }

    pub fn add_tag(&mut self, entity: Entity, tag: &str) {
        if let Some(mut tags) = self.world.get_mut::<Tags>(entity) {
            tags.0.insert(tag.to_string());
        } else {
            let mut tags = Tags::default();
            tags.0.insert(tag.to_string());
            self.world.entity_mut(entity).insert(tags);
        }
    }

    pub fn has_tag(&self, entity: Entity, tag: &str) -> bool {
        self.world.get::<Tags>(entity).map(|t| t.0.contains(tag)).unwrap_or(false)
    }

    /// Depth-first scan of the subtree below `from` for nodes carrying `tag`.
    /// `from` itself is not considered.
    pub fn descendants_with_tag(&self, from: Entity, tag: &str) -> Vec<Entity> {
        let mut matches = Vec::new();
        let mut stack = self.children(from);
        stack.reverse();
        while let Some(node) = stack.pop() {
            if self.has_tag(node, tag) {
                matches.push(node);
            }
            let mut kids = self.children(node);
            kids.reverse();
            stack.extend(kids);
        }
        matches
    }

    pub fn set_active(&mut self, entity: Entity, active: bool) {
        if let Some(mut flag) = self.world.get_mut::<ActiveSelf>(entity) {
            flag.0 = active;
        } else {
            self.world.entity_mut(entity).insert(ActiveSelf(active));
        }
    }

    pub fn is_active(&self, entity: Entity) -> bool {
        self.world.get::<ActiveSelf>(entity).map(|a| a.0).unwrap_or(true)
    }

    /// Destroys a single node and its attached components. Children are left
    /// alive on purpose: the host does not cascade destruction, so callers
    /// detach or destroy children deliberately first.
    pub fn destroy_node(&mut self, entity: Entity) -> bool {
        self.detach(entity);
        self.world.despawn(entity)
    }

    /// Children-first recursive destroy for callers that own the whole
    /// subtree.
    pub fn destroy_branch(&mut self, entity: Entity) -> bool {
        let child_ids = self.children(entity);
        for child in child_ids {
            self.destroy_branch(child);
        }
        self.destroy_node(entity)
    }

    pub fn set_toggle_expanded(&mut self, toggle: Entity, expanded: bool) -> bool {
        if let Some(mut section) = self.world.get_mut::<SectionToggle>(toggle) {
            section.expanded = expanded;
            true
        } else {
            false
        }
    }

    /// Finds the user's root node anywhere under the tree root.
    pub fn user_root(&self, user: UserId) -> Option<Entity> {
        let mut stack = self.children(self.root);
        while let Some(node) = stack.pop() {
            if self.world.get::<UserRoot>(node).map(|u| u.0 == user).unwrap_or(false) {
                return Some(node);
            }
            stack.extend(self.children(node));
        }
        None
    }

    /// Reads the variable namespace with the given name attached to a node.
    pub fn variable_space(&self, entity: Entity, name: &str) -> Option<&VariableSpace> {
        self.world.get::<VariableSpace>(entity).filter(|space| space.name == name)
    }
}
