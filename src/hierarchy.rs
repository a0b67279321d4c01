//! Host-tree helpers over Bevy's `ChildOf`/`Children` relationship.
//!
//! The engine propagates `Visibility` into `InheritedVisibility` only inside its
//! render schedule, so menu code that must reason about "is this node shown"
//! between frames walks the hierarchy explicitly here, with the engine's rules:
//! `Hidden` hides, `Visible` shows regardless of ancestors, `Inherited` (or no
//! component) follows the parent.
use bevy::prelude::*;
use smallvec::SmallVec;

pub(crate) type ChildList = SmallVec<[Entity; 8]>;

/// Direct children in insertion order. Empty when the node has none.
pub(crate) fn children_of(world: &World, entity: Entity) -> ChildList {
    world
        .get::<Children>(entity)
        .map(|children| {
            let children: &[Entity] = children;
            SmallVec::from_slice(children)
        })
        .unwrap_or_default()
}

pub(crate) fn parent_of(world: &World, entity: Entity) -> Option<Entity> {
    world.get::<ChildOf>(entity).map(ChildOf::parent)
}

/// Effective visibility of a node given its parent's effective visibility.
pub fn resolve_visibility(visibility: Option<&Visibility>, parent_visible: bool) -> bool {
    match visibility {
        Some(Visibility::Hidden) => false,
        Some(Visibility::Visible) => true,
        Some(Visibility::Inherited) | None => parent_visible,
    }
}

/// Whether the engine would show `entity`: the nearest non-`Inherited`
/// visibility on the path to the root decides, a fully inherited path is shown.
pub fn active_in_hierarchy(world: &World, entity: Entity) -> bool {
    let mut current = Some(entity);
    while let Some(node) = current {
        match world.get::<Visibility>(node) {
            Some(Visibility::Hidden) => return false,
            Some(Visibility::Visible) => return true,
            Some(Visibility::Inherited) | None => current = parent_of(world, node),
        }
    }
    true
}

/// Nearest ancestor carrying `T`, starting with `entity` itself.
pub fn nearest_with<T: Component>(world: &World, entity: Entity) -> Option<Entity> {
    let mut current = Some(entity);
    while let Some(node) = current {
        if world.get::<T>(node).is_some() {
            return Some(node);
        }
        current = parent_of(world, node);
    }
    None
}

/// Descendants of `root` (root excluded) in depth-first pre-order, children
/// visited in insertion order.
pub(crate) fn descendants_preorder(world: &World, root: Entity) -> Vec<Entity> {
    let mut ordered = Vec::new();
    let mut pending: Vec<Entity> = children_of(world, root).into_iter().rev().collect();
    while let Some(entity) = pending.pop() {
        ordered.push(entity);
        pending.extend(children_of(world, entity).into_iter().rev());
    }
    ordered
}

/// Visibility a node had before a panel hid it, restored when the panel shows
/// again.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct SuspendedVisibility(pub Visibility);

/// Hides `entity`, remembering its own visibility. Hiding twice keeps the
/// first remembered value.
pub(crate) fn suspend_node(world: &mut World, entity: Entity) {
    let mut node = match world.get_entity_mut(entity) {
        Ok(node) => node,
        Err(error) => {
            warn!("cannot hide {entity:?}: {error}");
            return;
        }
    };
    if !node.contains::<SuspendedVisibility>() {
        let previous = node
            .get::<Visibility>()
            .copied()
            .unwrap_or(Visibility::Inherited);
        node.insert(SuspendedVisibility(previous));
    }
    node.insert(Visibility::Hidden);
}

/// Puts back the visibility saved by `suspend_node`. Nodes that were never
/// suspended are left alone.
pub(crate) fn restore_node(world: &mut World, entity: Entity) {
    let Ok(mut node) = world.get_entity_mut(entity) else {
        return;
    };
    if let Some(SuspendedVisibility(previous)) = node.take::<SuspendedVisibility>() {
        node.insert(previous);
    }
}
