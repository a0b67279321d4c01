//! Startup-time discovery of panels by node-name prefix.
use bevy::prelude::*;

use crate::{
    hierarchy::children_of,
    panel::{Panel, PanelKind},
};

/// Kind implied by a node name, if any. The overlay prefix wins when both
/// match; an empty prefix matches nothing.
pub fn classify_name(name: &str, menu_prefix: &str, overlay_prefix: &str) -> Option<PanelKind> {
    if !overlay_prefix.is_empty() && name.starts_with(overlay_prefix) {
        Some(PanelKind::Overlay)
    } else if !menu_prefix.is_empty() && name.starts_with(menu_prefix) {
        Some(PanelKind::Menu)
    } else {
        None
    }
}

/// Walks every descendant of `root` once, attaching a `Panel` to nodes whose
/// name carries one of the prefixes, and returns all panel nodes in
/// depth-first document order. Nodes that already are panels are returned
/// as-is whatever their name. Recursion continues below panels, so nested
/// menus are found too.
pub fn discover(
    world: &mut World,
    root: Entity,
    menu_prefix: &str,
    overlay_prefix: &str,
) -> Vec<Entity> {
    let mut tracked = Vec::new();
    let mut tagged = 0usize;
    let mut pending: Vec<Entity> = children_of(world, root).into_iter().rev().collect();

    while let Some(entity) = pending.pop() {
        if world.get::<Panel>(entity).is_some() {
            tracked.push(entity);
        } else {
            let kind = world
                .get::<Name>(entity)
                .and_then(|name| classify_name(name.as_str(), menu_prefix, overlay_prefix));
            if let Some(kind) = kind {
                let panel = match kind {
                    PanelKind::Menu => Panel::menu(),
                    PanelKind::Overlay => Panel::overlay(),
                };
                world.entity_mut(entity).insert(panel);
                tagged += 1;
                tracked.push(entity);
            }
        }
        pending.extend(children_of(world, entity).into_iter().rev());
    }

    debug!(
        "discovered {} panels under {root:?} ({tagged} newly tagged)",
        tracked.len()
    );
    tracked
}
