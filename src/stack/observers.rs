use std::sync::Arc;

use bevy::{ecs::event::Events, prelude::*};

use crate::journal::{record, TransitionRecord};

/// Synchronous menu callback: receives the world and the menu that changed.
pub type MenuHandler = Arc<dyn Fn(&mut World, Entity) + Send + Sync>;

/// Buffered counterpart of an `on_opened` callback, for ordinary systems.
#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuOpened {
    pub root: Entity,
    pub menu: Entity,
}

#[derive(Event, Clone, Copy, Debug, PartialEq, Eq)]
pub struct MenuClosed {
    pub root: Entity,
    pub menu: Entity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChange {
    Opened { root: Entity, menu: Entity },
    Closed { root: Entity, menu: Entity },
}

impl MenuChange {
    pub const fn root(self) -> Entity {
        match self {
            Self::Opened { root, .. } | Self::Closed { root, .. } => root,
        }
    }

    pub const fn menu(self) -> Entity {
        match self {
            Self::Opened { menu, .. } | Self::Closed { menu, .. } => menu,
        }
    }
}

/// Per-root callback lists, invoked in registration order.
#[derive(Component, Default, Clone)]
pub struct MenuObservers {
    opened: Vec<MenuHandler>,
    closed: Vec<MenuHandler>,
}

impl MenuObservers {
    pub fn on_opened(&mut self, handler: impl Fn(&mut World, Entity) + Send + Sync + 'static) {
        self.opened.push(Arc::new(handler));
    }

    pub fn on_closed(&mut self, handler: impl Fn(&mut World, Entity) + Send + Sync + 'static) {
        self.closed.push(Arc::new(handler));
    }

    fn handlers_for(&self, change: MenuChange) -> &[MenuHandler] {
        match change {
            MenuChange::Opened { .. } => &self.opened,
            MenuChange::Closed { .. } => &self.closed,
        }
    }
}

/// Delivers `change` after the transition has fully committed.
///
/// The handler list is snapshotted first, so handlers may reenter the stack
/// or register further handlers; newly registered ones see the next change.
pub(crate) fn notify(world: &mut World, change: MenuChange) {
    let (root, menu) = (change.root(), change.menu());
    match change {
        MenuChange::Opened { .. } => {
            record(world, TransitionRecord::Opened { root, menu });
            send_if_registered(world, MenuOpened { root, menu });
        }
        MenuChange::Closed { .. } => {
            record(world, TransitionRecord::Closed { root, menu });
            send_if_registered(world, MenuClosed { root, menu });
        }
    }

    let handlers: Vec<MenuHandler> = world
        .get::<MenuObservers>(root)
        .map(|observers| observers.handlers_for(change).to_vec())
        .unwrap_or_default();
    for handler in handlers {
        handler(world, menu);
    }
}

fn send_if_registered<E: Event>(world: &mut World, event: E) {
    if let Some(mut events) = world.get_resource_mut::<Events<E>>() {
        events.send(event);
    }
}
