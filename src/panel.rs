//! Panels: one unit of visibility + interactability state bound to one node.
//!
//! Visibility toggles the direct children of the panel node, never the panel
//! node itself, and never a child that is itself the root of another panel.
//! Nested panels own their subtree exclusively, which is what lets a submenu
//! stay closed while its parent menu opens around it.
//!
//! Because `Visibility::Visible` overrides a hidden parent, hiding also
//! suspends any `Visible` node inside the content, and showing restores every
//! suspended node to the value it had. A shown panel always leaves its direct
//! children active.
//!
//! Interactability only reaches controls that are currently shown, so callers
//! must revoke interaction before hiding and reveal before granting it; the
//! stack controller does both in that order.
use bevy::prelude::*;
use smallvec::{smallvec, SmallVec};

use crate::{
    hierarchy::{
        active_in_hierarchy, children_of, parent_of, resolve_visibility, restore_node,
        suspend_node, SuspendedVisibility,
    },
    journal::{record, TransitionRecord},
};

/// An input-receiving widget as seen by the menu system.
///
/// Two independent switches exist because hosts differ in which one they use
/// to block input; a control accepts input only when both are on.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Control {
    pub enabled: bool,
    pub interactable: bool,
}

impl Default for Control {
    fn default() -> Self {
        Self {
            enabled: true,
            interactable: true,
        }
    }
}

impl Control {
    pub const fn accepts_input(&self) -> bool {
        self.enabled && self.interactable
    }
}

/// How a panel switches its controls on and off.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InteractionMode {
    /// Flip `Control::enabled`.
    ToggleComponentEnabled,
    /// Flip `Control::interactable`.
    #[default]
    ToggleInteractiveFlag,
}

impl InteractionMode {
    pub fn apply(self, control: &mut Control, value: bool) {
        match self {
            Self::ToggleComponentEnabled => control.enabled = value,
            Self::ToggleInteractiveFlag => control.interactable = value,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PanelKind {
    #[default]
    Menu,
    /// Opens on top of the current foreground without hiding it.
    Overlay,
}

#[derive(Component, Clone, Debug, Default, PartialEq, Eq)]
pub struct Panel {
    pub custom_name: Option<String>,
    pub interaction_mode: InteractionMode,
    pub kind: PanelKind,
    visible: bool,
    interactable: bool,
    initialized: bool,
}

impl Panel {
    pub fn menu() -> Self {
        Self::default()
    }

    pub fn overlay() -> Self {
        Self {
            kind: PanelKind::Overlay,
            ..default()
        }
    }

    pub fn with_custom_name(mut self, name: impl Into<String>) -> Self {
        self.custom_name = Some(name.into());
        self
    }

    pub fn with_interaction_mode(mut self, mode: InteractionMode) -> Self {
        self.interaction_mode = mode;
        self
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn interactable(&self) -> bool {
        self.interactable
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_overlay(&self) -> bool {
        self.kind == PanelKind::Overlay
    }

    /// Ends the force-apply window; later mutator calls become idempotent.
    pub fn start(&mut self) {
        self.initialized = true;
    }

    /// `custom_name` when set, otherwise the node's own name.
    pub fn display_name(&self, node_name: Option<&Name>, entity: Entity) -> String {
        match (&self.custom_name, node_name) {
            (Some(custom), _) => custom.clone(),
            (None, Some(name)) => name.as_str().to_owned(),
            (None, None) => format!("{entity}"),
        }
    }

    fn needs_apply(&self, current: bool, value: bool) -> bool {
        !self.initialized || current != value
    }
}

/// Panel mutators. They live on `World` because applying them walks the host
/// tree while updating the panel's own component.
pub trait PanelWorldExt {
    fn set_panel_visible(&mut self, panel: Entity, value: bool);
    fn set_panel_interactable(&mut self, panel: Entity, value: bool);
    fn panel_name(&self, panel: Entity) -> Option<String>;
}

impl PanelWorldExt for World {
    fn set_panel_visible(&mut self, panel: Entity, value: bool) {
        apply_visible(self, panel, value, false);
    }

    fn set_panel_interactable(&mut self, panel: Entity, value: bool) {
        apply_interactable(self, panel, value, false);
    }

    fn panel_name(&self, panel: Entity) -> Option<String> {
        let state = self.get::<Panel>(panel)?;
        Some(state.display_name(self.get::<Name>(panel), panel))
    }
}

pub(crate) fn apply_visible(world: &mut World, entity: Entity, value: bool, force: bool) {
    let Some(panel) = world.get::<Panel>(entity) else {
        error!("set_visible({value}) on {entity:?}, which is not a panel");
        return;
    };

    if force || panel.needs_apply(panel.visible, value) {
        for child in children_of(world, entity) {
            if world.get::<Panel>(child).is_some() {
                continue;
            }
            if value {
                reveal_content(world, child);
            } else {
                conceal_content(world, child);
            }
        }
        record(world, TransitionRecord::Visible { panel: entity, value });
    }

    if let Some(mut panel) = world.get_mut::<Panel>(entity) {
        if panel.visible != value {
            panel.visible = value;
        }
    }
}

pub(crate) fn apply_interactable(world: &mut World, entity: Entity, value: bool, force: bool) {
    let Some(panel) = world.get::<Panel>(entity) else {
        error!("set_interactable({value}) on {entity:?}, which is not a panel");
        return;
    };
    let mode = panel.interaction_mode;

    if force || panel.needs_apply(panel.interactable, value) {
        // Disabling reaches into nested panels so nothing below an inactive
        // panel takes input; enabling leaves nested panels to decide for
        // themselves.
        for control in controls_below(world, entity, value) {
            if let Some(mut state) = world.get_mut::<Control>(control) {
                mode.apply(&mut state, value);
            }
        }
        record(world, TransitionRecord::Interactable { panel: entity, value });
    }

    if let Some(mut panel) = world.get_mut::<Panel>(entity) {
        if panel.interactable != value {
            panel.interactable = value;
        }
    }
}

/// Hides one content child and suspends every `Visible` node below it that
/// would otherwise stay on screen. Nested panels are left to themselves.
fn conceal_content(world: &mut World, child: Entity) {
    suspend_node(world, child);
    let mut pending: SmallVec<[Entity; 16]> = children_of(world, child).into_iter().collect();
    while let Some(entity) = pending.pop() {
        if world.get::<Panel>(entity).is_some() {
            continue;
        }
        if matches!(world.get::<Visibility>(entity), Some(Visibility::Visible)) {
            suspend_node(world, entity);
        }
        pending.extend(children_of(world, entity));
    }
}

/// Undoes `conceal_content`. The child itself ends up active even when it
/// started out hidden; deeper nodes get back exactly what they had.
fn reveal_content(world: &mut World, child: Entity) {
    let mut pending: SmallVec<[Entity; 16]> = smallvec![child];
    while let Some(entity) = pending.pop() {
        if entity != child && world.get::<Panel>(entity).is_some() {
            continue;
        }
        if world.get::<SuspendedVisibility>(entity).is_some() {
            restore_node(world, entity);
        }
        pending.extend(children_of(world, entity));
    }
    if matches!(world.get::<Visibility>(child), Some(Visibility::Hidden)) {
        world.entity_mut(child).insert(Visibility::Inherited);
    }
}

/// Every shown `Control` at or below `panel`, in pre-order. Hidden nodes are
/// still descended into because a `Visible` node below them is shown.
fn controls_below(world: &World, panel: Entity, skip_nested: bool) -> Vec<Entity> {
    let parent_visible =
        parent_of(world, panel).is_none_or(|parent| active_in_hierarchy(world, parent));
    let mut found = Vec::new();
    let mut pending: SmallVec<[(Entity, bool); 16]> = smallvec![(panel, parent_visible)];
    while let Some((entity, parent_visible)) = pending.pop() {
        if skip_nested && entity != panel && world.get::<Panel>(entity).is_some() {
            continue;
        }
        let visible = resolve_visibility(world.get::<Visibility>(entity), parent_visible);
        if visible && world.get::<Control>(entity).is_some() {
            found.push(entity);
        }
        pending.extend(
            children_of(world, entity)
                .into_iter()
                .rev()
                .map(|child| (child, visible)),
        );
    }
    found
}

/// Marks every panel that has not started yet as started.
pub fn start_panels(world: &mut World) {
    let mut panels = world.query::<&mut Panel>();
    for mut panel in panels.iter_mut(world) {
        if !panel.initialized {
            panel.start();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        journal::TransitionJournal,
        test_support::{spawn_control, spawn_node, spawn_panel},
    };

    fn control(world: &World, entity: Entity) -> Control {
        *world.get::<Control>(entity).expect("control")
    }

    fn panel(world: &World, entity: Entity) -> &Panel {
        world.get::<Panel>(entity).expect("panel")
    }

    #[test]
    fn uninitialized_panel_forces_first_apply() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let menu = spawn_panel(&mut world, "menu", root, Panel::menu());
        let content = spawn_node(&mut world, "content", Some(menu));
        world.flush();

        // Cached state already says "hidden", but the panel never started.
        assert!(!panel(&world, menu).visible());
        world.set_panel_visible(menu, false);

        assert!(!active_in_hierarchy(&world, content));
        assert!(active_in_hierarchy(&world, menu));
    }

    #[test]
    fn started_panel_mutators_are_idempotent() {
        let mut world = World::new();
        world.init_resource::<TransitionJournal>();
        let root = spawn_node(&mut world, "root", None);
        let menu = spawn_panel(&mut world, "menu", root, Panel::menu());
        spawn_control(&mut world, "button", menu);
        world.flush();

        world.set_panel_visible(menu, true);
        world.set_panel_interactable(menu, true);
        start_panels(&mut world);
        world.resource_mut::<TransitionJournal>().clear();

        world.set_panel_visible(menu, true);
        world.set_panel_interactable(menu, true);
        assert!(world.resource::<TransitionJournal>().is_empty());

        world.set_panel_interactable(menu, false);
        world.set_panel_interactable(menu, false);
        assert_eq!(
            world.resource::<TransitionJournal>().records(),
            &[TransitionRecord::Interactable {
                panel: menu,
                value: false
            }]
        );
    }

    #[test]
    fn hiding_a_parent_leaves_nested_panel_untouched() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let parent = spawn_panel(&mut world, "parent", root, Panel::menu());
        let parent_content = spawn_node(&mut world, "parent_content", Some(parent));
        let nested = spawn_panel(&mut world, "nested", parent, Panel::menu());
        let nested_content = spawn_node(&mut world, "nested_content", Some(nested));
        world.flush();

        world.set_panel_visible(nested, true);
        world.set_panel_interactable(nested, true);
        world.set_panel_visible(parent, true);
        start_panels(&mut world);

        world.set_panel_visible(parent, false);

        assert!(!active_in_hierarchy(&world, parent_content));
        assert!(active_in_hierarchy(&world, nested));
        assert!(active_in_hierarchy(&world, nested_content));
        assert!(panel(&world, nested).visible());
        assert!(panel(&world, nested).interactable());
    }

    #[test]
    fn enabling_skips_nested_panel_controls_but_disabling_reaches_them() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let parent = spawn_panel(&mut world, "parent", root, Panel::menu());
        let parent_button = spawn_control(&mut world, "parent_button", parent);
        let nested = spawn_panel(&mut world, "nested", parent, Panel::menu());
        let nested_button = spawn_control(&mut world, "nested_button", nested);
        world.flush();

        world.set_panel_interactable(parent, false);
        assert!(!control(&world, parent_button).accepts_input());
        assert!(!control(&world, nested_button).accepts_input());

        world.set_panel_interactable(parent, true);
        assert!(control(&world, parent_button).accepts_input());
        assert!(!control(&world, nested_button).accepts_input());
    }

    #[test]
    fn hidden_subtrees_are_not_walked_for_controls() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let menu = spawn_panel(&mut world, "menu", root, Panel::menu());
        let button = spawn_control(&mut world, "button", menu);
        world.flush();

        world.set_panel_visible(menu, false);
        world.set_panel_interactable(menu, false);

        assert!(control(&world, button).accepts_input());
        assert!(!panel(&world, menu).interactable());
    }

    #[test]
    fn hiding_suspends_visible_descendants_and_showing_restores_them() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let menu = spawn_panel(&mut world, "menu", root, Panel::menu());
        let content = spawn_node(&mut world, "content", Some(menu));
        let badge = spawn_node(&mut world, "badge", Some(content));
        world.entity_mut(badge).insert(Visibility::Visible);
        let tooltip = spawn_node(&mut world, "tooltip", Some(content));
        world.entity_mut(tooltip).insert(Visibility::Hidden);
        let header = spawn_node(&mut world, "header", Some(menu));
        world.entity_mut(header).insert(Visibility::Visible);

        world.set_panel_visible(menu, true);
        start_panels(&mut world);
        assert!(active_in_hierarchy(&world, badge));
        assert!(!active_in_hierarchy(&world, tooltip));

        world.set_panel_visible(menu, false);
        assert!(!active_in_hierarchy(&world, content));
        assert!(!active_in_hierarchy(&world, badge));
        assert!(!active_in_hierarchy(&world, header));

        world.set_panel_visible(menu, true);
        assert!(active_in_hierarchy(&world, content));
        assert_eq!(world.get::<Visibility>(badge), Some(&Visibility::Visible));
        assert_eq!(world.get::<Visibility>(header), Some(&Visibility::Visible));
        assert_eq!(world.get::<Visibility>(tooltip), Some(&Visibility::Hidden));
        assert!(world.get::<SuspendedVisibility>(badge).is_none());
    }

    #[test]
    fn showing_activates_content_that_started_hidden() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let menu = spawn_panel(&mut world, "menu", root, Panel::menu());
        let content = spawn_node(&mut world, "content", Some(menu));
        world.entity_mut(content).insert(Visibility::Hidden);

        world.set_panel_visible(menu, true);

        assert!(active_in_hierarchy(&world, content));
    }

    #[test]
    fn visible_controls_under_hidden_nodes_are_still_revoked() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let menu = spawn_panel(&mut world, "menu", root, Panel::menu());
        let drawer = spawn_node(&mut world, "drawer", Some(menu));
        world.entity_mut(drawer).insert(Visibility::Hidden);
        let pinned = spawn_control(&mut world, "pinned", drawer);
        world.entity_mut(pinned).insert(Visibility::Visible);
        let tucked = spawn_control(&mut world, "tucked", drawer);

        world.set_panel_interactable(menu, false);

        assert!(!control(&world, pinned).accepts_input());
        assert!(control(&world, tucked).accepts_input());
    }

    #[test]
    fn interaction_mode_selects_the_flag_that_flips() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let by_flag = spawn_panel(&mut world, "flag", root, Panel::menu());
        let flag_button = spawn_control(&mut world, "flag_button", by_flag);
        let by_enable = spawn_panel(
            &mut world,
            "enable",
            root,
            Panel::menu().with_interaction_mode(InteractionMode::ToggleComponentEnabled),
        );
        let enable_button = spawn_control(&mut world, "enable_button", by_enable);
        world.flush();

        world.set_panel_interactable(by_flag, false);
        world.set_panel_interactable(by_enable, false);

        assert_eq!(
            control(&world, flag_button),
            Control {
                enabled: true,
                interactable: false
            }
        );
        assert_eq!(
            control(&world, enable_button),
            Control {
                enabled: false,
                interactable: true
            }
        );
    }

    #[test]
    fn name_prefers_custom_name() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let plain = spawn_panel(&mut world, "menu_main", root, Panel::menu());
        let custom = spawn_panel(
            &mut world,
            "menu_settings",
            root,
            Panel::menu().with_custom_name("Settings"),
        );
        let unnamed = world.spawn(Panel::menu()).id();

        assert_eq!(world.panel_name(plain).as_deref(), Some("menu_main"));
        assert_eq!(world.panel_name(custom).as_deref(), Some("Settings"));
        assert_eq!(world.panel_name(unnamed), Some(format!("{unnamed}")));
        assert_eq!(world.panel_name(root), None);
    }

    #[test]
    fn mutating_a_non_panel_is_ignored() {
        let mut world = World::new();
        let node = spawn_node(&mut world, "plain", None);
        let child = spawn_node(&mut world, "child", Some(node));
        world.flush();

        world.set_panel_visible(node, false);

        assert!(active_in_hierarchy(&world, child));
        assert!(world.get::<Panel>(node).is_none());
    }
}
