//! The menu stack controller.
//!
//! A `MenuRoot` owns the history of opened panels under one UI root. The top
//! of the history is the foreground panel; opening suspends it, closing pops
//! it and restores whatever lies beneath.
//!
//! `open_menu` hides the previous foreground unless the incoming panel is an
//! overlay (`PanelKind::Overlay`), in which case the previous foreground stays
//! visible but inert. `open_menu_with` takes that choice explicitly. Anything
//! built on `open_menu`, such as `navigation::navigate`, inherits the overlay
//! default.
//!
//! Ordering inside a transition matters because hidden controls are not
//! touched: the outgoing panel loses interaction before it is hidden, the
//! incoming one is shown before it gains interaction. Notifications fire only after the
//! whole transition has been applied, so handlers may open or close again and
//! see a consistent history.
use bevy::prelude::*;

use crate::{
    config::MenuRootConfig,
    panel::{apply_interactable, apply_visible, Panel, PanelWorldExt},
    tagger::discover,
};

mod commands;
mod observers;

pub use commands::{CloseMenu, MenuStackCommandsExt, OpenMenu};
pub use observers::{MenuChange, MenuClosed, MenuHandler, MenuObservers, MenuOpened};

use observers::notify;

/// History of opened panels under one UI root. Opening an overlay panel
/// through `MenuStackWorldExt::open_menu` keeps the current foreground on
/// screen.
#[derive(Component, Clone, Debug, Default)]
#[require(MenuObservers)]
pub struct MenuRoot {
    pub config: MenuRootConfig,
    tracked: Vec<Entity>,
    selected: Option<Entity>,
    history: Vec<Entity>,
    awake: bool,
}

impl MenuRoot {
    pub fn new(tracked: impl IntoIterator<Item = Entity>) -> Self {
        Self {
            tracked: tracked.into_iter().collect(),
            ..default()
        }
    }

    /// A root that discovers its panels by name when it initializes.
    pub fn tagging() -> Self {
        Self::default().with_config(MenuRootConfig::tagging())
    }

    pub fn with_config(mut self, config: MenuRootConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_selected(mut self, selected: Entity) -> Self {
        self.selected = Some(selected);
        self
    }

    pub fn foreground(&self) -> Option<Entity> {
        self.history.last().copied()
    }

    /// Oldest first; the last entry is the foreground.
    pub fn history(&self) -> &[Entity] {
        &self.history
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn tracked(&self) -> &[Entity] {
        &self.tracked
    }

    pub fn selected(&self) -> Option<Entity> {
        self.selected
    }

    pub fn is_awake(&self) -> bool {
        self.awake
    }
}

/// Stack operations on a `MenuRoot` entity.
///
/// Missing roots are logged and ignored. Panels do not have to be tracked by
/// the root to be opened.
pub trait MenuStackWorldExt {
    /// Forces every tracked panel closed and opens the initial selection.
    /// Runs once per root.
    fn initialize_menu_root(&mut self, root: Entity);
    /// Opens `menu`, leaving the previous foreground visible only when `menu`
    /// is an overlay panel.
    fn open_menu(&mut self, root: Entity, menu: Entity);
    fn open_menu_with(&mut self, root: Entity, menu: Entity, leave_previous_visible: bool);
    fn close_menu(&mut self, root: Entity);
    fn on_menu_opened(
        &mut self,
        root: Entity,
        handler: impl Fn(&mut World, Entity) + Send + Sync + 'static,
    );
    fn on_menu_closed(
        &mut self,
        root: Entity,
        handler: impl Fn(&mut World, Entity) + Send + Sync + 'static,
    );
}

impl MenuStackWorldExt for World {
    fn initialize_menu_root(&mut self, root: Entity) {
        initialize(self, root);
    }

    fn open_menu(&mut self, root: Entity, menu: Entity) {
        let leave_previous_visible = self.get::<Panel>(menu).is_some_and(Panel::is_overlay);
        open(self, root, menu, leave_previous_visible);
    }

    fn open_menu_with(&mut self, root: Entity, menu: Entity, leave_previous_visible: bool) {
        open(self, root, menu, leave_previous_visible);
    }

    fn close_menu(&mut self, root: Entity) {
        close(self, root);
    }

    fn on_menu_opened(
        &mut self,
        root: Entity,
        handler: impl Fn(&mut World, Entity) + Send + Sync + 'static,
    ) {
        match self.get_mut::<MenuObservers>(root) {
            Some(mut observers) => observers.on_opened(handler),
            None => warn!("cannot observe {root:?}: not a menu root"),
        }
    }

    fn on_menu_closed(
        &mut self,
        root: Entity,
        handler: impl Fn(&mut World, Entity) + Send + Sync + 'static,
    ) {
        match self.get_mut::<MenuObservers>(root) {
            Some(mut observers) => observers.on_closed(handler),
            None => warn!("cannot observe {root:?}: not a menu root"),
        }
    }
}

fn initialize(world: &mut World, root: Entity) {
    let Some(menu_root) = world.get::<MenuRoot>(root) else {
        warn!("cannot initialize {root:?}: not a menu root");
        return;
    };
    if menu_root.awake {
        return;
    }
    let config = menu_root.config.clone();
    let explicit = menu_root.tracked.clone();
    let selected = menu_root.selected;

    let tracked = if config.runtime_tagging {
        discover(world, root, &config.menu_prefix, &config.overlay_prefix)
    } else {
        explicit
    };

    for &panel in &tracked {
        apply_interactable(world, panel, false, true);
        apply_visible(world, panel, false, true);
    }

    let selected = selected.or_else(|| tracked.first().copied());
    debug!(
        "menu root {root:?} tracks {} panels, initial selection {selected:?}",
        tracked.len()
    );

    if let Some(mut menu_root) = world.get_mut::<MenuRoot>(root) {
        menu_root.tracked = tracked;
        menu_root.selected = selected;
        menu_root.awake = true;
    }

    if let Some(selected) = selected {
        open(world, root, selected, false);
    }
}

fn open(world: &mut World, root: Entity, menu: Entity, leave_previous_visible: bool) {
    let Some(menu_root) = world.get::<MenuRoot>(root) else {
        warn!("cannot open {menu:?}: {root:?} is not a menu root");
        return;
    };

    if let Some(previous) = menu_root.foreground() {
        world.set_panel_interactable(previous, false);
        if !leave_previous_visible {
            world.set_panel_visible(previous, false);
        }
    }

    if let Some(mut menu_root) = world.get_mut::<MenuRoot>(root) {
        menu_root.history.push(menu);
    }

    world.set_panel_visible(menu, true);
    world.set_panel_interactable(menu, true);

    debug!("opened {menu:?} on {root:?} (leave previous visible: {leave_previous_visible})");
    notify(world, MenuChange::Opened { root, menu });
}

fn close(world: &mut World, root: Entity) {
    let Some(mut menu_root) = world.get_mut::<MenuRoot>(root) else {
        warn!("cannot close: {root:?} is not a menu root");
        return;
    };
    let Some(top) = menu_root.history.pop() else {
        return;
    };

    world.set_panel_interactable(top, false);
    world.set_panel_visible(top, false);

    debug!("closed {top:?} on {root:?}");
    notify(world, MenuChange::Closed { root, menu: top });

    // Read after notifying: a handler may already have changed the stack.
    let restored = world.get::<MenuRoot>(root).and_then(MenuRoot::foreground);
    if let Some(restored) = restored {
        world.set_panel_visible(restored, true);
        world.set_panel_interactable(restored, true);
    }
}

/// Initializes every root that has not run its startup pass yet.
pub fn initialize_menu_roots(world: &mut World) {
    let pending: Vec<Entity> = world
        .query::<(Entity, &MenuRoot)>()
        .iter(world)
        .filter(|(_, menu_root)| !menu_root.awake)
        .map(|(entity, _)| entity)
        .collect();

    for root in pending {
        initialize(world, root);
    }
}
