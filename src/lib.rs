//! Stacked, mutually exclusive menu panels for Bevy UI trees.
//!
//! - `panel`: per-node visibility and interactability state
//! - `stack`: the open/close/overlay history controller (`MenuRoot`)
//! - `tagger`: name-prefix discovery of panels at startup
//! - `navigation`: "next" and "back" strategies for buttons
//! - `preview`: undoable visibility toggles for inspector tools
use bevy::prelude::*;

pub mod config;
pub mod hierarchy;
pub mod journal;
pub mod navigation;
pub mod panel;
pub mod preview;
pub mod stack;
pub mod tagger;
#[cfg(test)]
mod test_support;

pub mod prelude {
    pub use crate::{
        config::{ConfigError, MenuRootConfig},
        hierarchy::{active_in_hierarchy, SuspendedVisibility},
        journal::{TransitionJournal, TransitionRecord},
        navigation::{navigate, NavigationAction, NavigationTarget, Navigator},
        panel::{Control, InteractionMode, Panel, PanelKind, PanelWorldExt},
        preview::{PanelPreview, PreviewEntry},
        stack::{
            CloseMenu, MenuChange, MenuClosed, MenuObservers, MenuOpened, MenuRoot,
            MenuStackCommandsExt, MenuStackWorldExt, OpenMenu,
        },
        tagger::discover,
        MenuStackPlugin, MenuStackSystems,
    };
}

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum MenuStackSystems {
    /// Root initialization followed by panel start.
    Lifecycle,
}

pub struct MenuStackPlugin;

impl Plugin for MenuStackPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<stack::MenuOpened>()
            .add_event::<stack::MenuClosed>()
            .add_systems(
                PreUpdate,
                (stack::initialize_menu_roots, panel::start_panels)
                    .chain()
                    .in_set(MenuStackSystems::Lifecycle),
            );
    }
}
