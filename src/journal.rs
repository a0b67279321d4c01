use bevy::prelude::*;

/// One applied state change or notification, in the order it happened.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TransitionRecord {
    Visible { panel: Entity, value: bool },
    Interactable { panel: Entity, value: bool },
    Opened { root: Entity, menu: Entity },
    Closed { root: Entity, menu: Entity },
}

/// Opt-in trace of menu transitions.
///
/// Nothing is recorded unless the resource exists. Panel entries are only
/// written when a mutator actually walks the tree, so idempotent calls leave
/// no trace.
#[derive(Resource, Debug, Default)]
pub struct TransitionJournal {
    records: Vec<TransitionRecord>,
}

impl TransitionJournal {
    pub fn records(&self) -> &[TransitionRecord] {
        &self.records
    }

    pub fn drain(&mut self) -> Vec<TransitionRecord> {
        std::mem::take(&mut self.records)
    }

    pub fn clear(&mut self) {
        self.records.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

pub(crate) fn record(world: &mut World, entry: TransitionRecord) {
    if let Some(mut journal) = world.get_resource_mut::<TransitionJournal>() {
        journal.records.push(entry);
    }
}
