//! Ad-hoc visibility preview for inspector tooling.
//!
//! Toggles go straight to the panel mutators and are logged so the whole
//! session can be undone, leaving the stack exactly as the tool found it.
use bevy::prelude::*;

use crate::{
    panel::{Panel, PanelWorldExt},
    stack::MenuRoot,
    tagger::discover,
};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreviewEntry {
    pub panel: Entity,
    pub name: String,
    pub visible: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct PreviewChange {
    panel: Entity,
    applied: bool,
}

#[derive(Debug, Default)]
pub struct PanelPreview {
    changes: Vec<PreviewChange>,
}

impl PanelPreview {
    /// Tracked panels of `root` plus whatever its prefixes discover now,
    /// without duplicates, tracked ones first.
    pub fn panels(world: &mut World, root: Entity) -> Vec<PreviewEntry> {
        let Some(menu_root) = world.get::<MenuRoot>(root) else {
            return Vec::new();
        };
        let mut panels = menu_root.tracked().to_vec();
        let config = menu_root.config.clone();

        for found in discover(world, root, &config.menu_prefix, &config.overlay_prefix) {
            if !panels.contains(&found) {
                panels.push(found);
            }
        }

        panels
            .into_iter()
            .filter_map(|panel| {
                let visible = world.get::<Panel>(panel)?.visible();
                let name = world.panel_name(panel)?;
                Some(PreviewEntry {
                    panel,
                    name,
                    visible,
                })
            })
            .collect()
    }

    /// Applies `value` if it differs from the panel's current visibility.
    /// Returns whether anything changed.
    pub fn set_visible(&mut self, world: &mut World, panel: Entity, value: bool) -> bool {
        let Some(current) = world.get::<Panel>(panel).map(Panel::visible) else {
            return false;
        };
        if current == value {
            return false;
        }
        world.set_panel_visible(panel, value);
        self.changes.push(PreviewChange {
            panel,
            applied: value,
        });
        true
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }

    /// Undoes every change, newest first.
    pub fn reset(&mut self, world: &mut World) {
        while let Some(change) = self.changes.pop() {
            world.set_panel_visible(change.panel, !change.applied);
        }
    }
}
