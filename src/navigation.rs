//! Navigation strategies for buttons and other triggers.
//!
//! A `Navigator` only picks a target; the stack does the work. Input wiring
//! (which click calls `navigate`) belongs to the host.
//!
//! `navigate` opens through `MenuStackWorldExt::open_menu`, so moving to an
//! overlay panel leaves the previous foreground visible.
use bevy::prelude::*;

use crate::{
    hierarchy::{descendants_preorder, nearest_with},
    panel::Panel,
    stack::{MenuRoot, MenuStackWorldExt},
};

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Navigator {
    /// Open the panel that follows the navigator's own panel in document
    /// order, wrapping around to the first.
    Next,
    /// Close the foreground panel.
    Back,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavigationAction {
    Open(Entity),
    Close,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavigationTarget {
    pub root: Entity,
    pub action: NavigationAction,
}

impl Navigator {
    /// Resolves against the nearest enclosing `MenuRoot` of `entity`.
    pub fn resolve_target(self, world: &World, entity: Entity) -> Option<NavigationTarget> {
        let root = nearest_with::<MenuRoot>(world, entity)?;
        let action = match self {
            Self::Back => NavigationAction::Close,
            Self::Next => {
                let current = nearest_with::<Panel>(world, entity);
                NavigationAction::Open(next_panel(world, root, current)?)
            }
        };
        Some(NavigationTarget { root, action })
    }
}

/// Panels under `root` in document order, after `current` and wrapping.
/// Never returns `current` itself.
pub fn next_panel(world: &World, root: Entity, current: Option<Entity>) -> Option<Entity> {
    let panels: Vec<Entity> = descendants_preorder(world, root)
        .into_iter()
        .filter(|&entity| world.get::<Panel>(entity).is_some())
        .collect();
    let start = current
        .and_then(|current| panels.iter().position(|&panel| panel == current))
        .map_or(0, |index| index + 1);
    panels
        .iter()
        .cycle()
        .skip(start)
        .take(panels.len())
        .copied()
        .find(|&panel| Some(panel) != current)
}

/// Runs the `Navigator` on `entity`. Returns the action taken, if any.
pub fn navigate(world: &mut World, entity: Entity) -> Option<NavigationTarget> {
    let Some(navigator) = world.get::<Navigator>(entity).copied() else {
        warn!("{entity:?} has no navigator");
        return None;
    };
    let Some(target) = navigator.resolve_target(world, entity) else {
        debug!("{navigator:?} on {entity:?} resolved to nothing");
        return None;
    };
    match target.action {
        NavigationAction::Open(menu) => world.open_menu(target.root, menu),
        NavigationAction::Close => world.close_menu(target.root),
    }
    Some(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{spawn_control, spawn_node, spawn_panel};

    struct Tree {
        world: World,
        root: Entity,
        a: Entity,
        a_next: Entity,
        a_nested: Entity,
        b: Entity,
        b_back: Entity,
        c: Entity,
    }

    fn tree() -> Tree {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let a = spawn_panel(&mut world, "a", root, Panel::menu());
        let a_next = spawn_control(&mut world, "a_next", a);
        world.entity_mut(a_next).insert(Navigator::Next);
        let a_nested = spawn_panel(&mut world, "a_nested", a, Panel::menu());
        let b = spawn_panel(&mut world, "b", root, Panel::menu());
        let b_back = spawn_control(&mut world, "b_back", b);
        world.entity_mut(b_back).insert(Navigator::Back);
        let c = spawn_panel(&mut world, "c", root, Panel::menu());
        world
            .entity_mut(root)
            .insert(MenuRoot::new([a, a_nested, b, c]));
        world.initialize_menu_root(root);
        Tree {
            world,
            root,
            a,
            a_next,
            a_nested,
            b,
            b_back,
            c,
        }
    }

    #[test]
    fn next_follows_document_order_and_wraps() {
        let tree = tree();
        let panels = [tree.a, tree.a_nested, tree.b, tree.c];
        assert_eq!(next_panel(&tree.world, tree.root, None), Some(tree.a));
        assert_eq!(next_panel(&tree.world, tree.root, Some(tree.a)), Some(tree.a_nested));
        assert_eq!(next_panel(&tree.world, tree.root, Some(tree.b)), Some(tree.c));
        assert_eq!(next_panel(&tree.world, tree.root, Some(tree.c)), Some(tree.a));
        for panel in panels {
            assert_ne!(next_panel(&tree.world, tree.root, Some(panel)), Some(panel));
        }
    }

    #[test]
    fn single_panel_has_no_next() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let only = spawn_panel(&mut world, "only", root, Panel::menu());
        assert_eq!(next_panel(&world, root, Some(only)), None);
    }

    #[test]
    fn next_navigator_opens_the_following_panel() {
        let mut tree = tree();

        let target = navigate(&mut tree.world, tree.a_next);

        assert_eq!(
            target,
            Some(NavigationTarget {
                root: tree.root,
                action: NavigationAction::Open(tree.a_nested),
            })
        );
        assert_eq!(
            tree.world.get::<MenuRoot>(tree.root).unwrap().foreground(),
            Some(tree.a_nested)
        );
    }

    #[test]
    fn next_into_an_overlay_keeps_the_current_panel_shown() {
        let mut world = World::new();
        let root = spawn_node(&mut world, "root", None);
        let base = spawn_panel(&mut world, "base", root, Panel::menu());
        let base_next = spawn_control(&mut world, "base_next", base);
        world.entity_mut(base_next).insert(Navigator::Next);
        let popup = spawn_panel(&mut world, "popup", root, Panel::overlay());
        world.entity_mut(root).insert(MenuRoot::new([base, popup]));
        world.initialize_menu_root(root);

        navigate(&mut world, base_next);

        assert_eq!(world.get::<MenuRoot>(root).unwrap().foreground(), Some(popup));
        assert!(world.get::<Panel>(base).unwrap().visible());
        assert!(crate::hierarchy::active_in_hierarchy(&world, base_next));
    }

    #[test]
    fn back_navigator_closes_the_foreground() {
        let mut tree = tree();
        tree.world.open_menu(tree.root, tree.b);

        let target = navigate(&mut tree.world, tree.b_back);

        assert_eq!(target.map(|target| target.action), Some(NavigationAction::Close));
        assert_eq!(
            tree.world.get::<MenuRoot>(tree.root).unwrap().history(),
            &[tree.a]
        );
    }

    #[test]
    fn navigator_outside_a_root_does_nothing() {
        let mut world = World::new();
        let orphan = world.spawn(Navigator::Back).id();
        let plain = world.spawn_empty().id();

        assert_eq!(navigate(&mut world, orphan), None);
        assert_eq!(navigate(&mut world, plain), None);
    }
}
