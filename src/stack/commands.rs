//! Deferred stack operations for regular systems, which cannot hold `&mut World`.
use bevy::{ecs::system::Command, prelude::*};

use super::MenuStackWorldExt;

/// Opens `menu` on `root` when the command queue is applied.
///
/// `leave_previous_visible: None` follows the panel's kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OpenMenu {
    pub root: Entity,
    pub menu: Entity,
    pub leave_previous_visible: Option<bool>,
}

impl Command for OpenMenu {
    fn apply(self, world: &mut World) {
        match self.leave_previous_visible {
            Some(leave) => world.open_menu_with(self.root, self.menu, leave),
            None => world.open_menu(self.root, self.menu),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CloseMenu {
    pub root: Entity,
}

impl Command for CloseMenu {
    fn apply(self, world: &mut World) {
        world.close_menu(self.root);
    }
}

pub trait MenuStackCommandsExt {
    fn open_menu(&mut self, root: Entity, menu: Entity);
    fn open_menu_with(&mut self, root: Entity, menu: Entity, leave_previous_visible: bool);
    fn close_menu(&mut self, root: Entity);
}

impl MenuStackCommandsExt for Commands<'_, '_> {
    fn open_menu(&mut self, root: Entity, menu: Entity) {
        self.queue(OpenMenu {
            root,
            menu,
            leave_previous_visible: None,
        });
    }

    fn open_menu_with(&mut self, root: Entity, menu: Entity, leave_previous_visible: bool) {
        self.queue(OpenMenu {
            root,
            menu,
            leave_previous_visible: Some(leave_previous_visible),
        });
    }

    fn close_menu(&mut self, root: Entity) {
        self.queue(CloseMenu { root });
    }
}
