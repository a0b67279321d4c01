//! Tree builders shared by unit tests.
use bevy::prelude::*;

use crate::panel::{Control, Panel};

pub(crate) fn spawn_node(world: &mut World, name: &str, parent: Option<Entity>) -> Entity {
    let entity = world.spawn(Name::new(name.to_owned())).id();
    if let Some(parent) = parent {
        world.entity_mut(entity).insert(ChildOf(parent));
    }
    world.flush();
    entity
}

pub(crate) fn spawn_panel(world: &mut World, name: &str, parent: Entity, panel: Panel) -> Entity {
    let entity = spawn_node(world, name, Some(parent));
    world.entity_mut(entity).insert(panel);
    entity
}

/// A button node directly under `parent`.
pub(crate) fn spawn_control(world: &mut World, name: &str, parent: Entity) -> Entity {
    let entity = spawn_node(world, name, Some(parent));
    world.entity_mut(entity).insert(Control::default());
    entity
}
