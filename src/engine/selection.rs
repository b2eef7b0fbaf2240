//! Single-selection state machine.
//!
//! `Idle ⇄ Selected(id)`. Selecting always reverts the previous record's
//! highlight before highlighting the new one, so at most one record is ever
//! lit. Clicking the selected record again re-applies the selection; there is
//! no toggle-off. Clicking empty space clears it.

use crate::render::registry::{EntityId, SceneRegistry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Selection {
    #[default]
    Idle,
    Selected(EntityId),
}

/// What a click did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// `entity` is now selected; `previous` was reverted first
    Selected {
        entity: EntityId,
        previous: Option<EntityId>,
    },
    /// `previous` was reverted and nothing is selected
    Cleared { previous: EntityId },
    /// Empty click while idle
    Unchanged,
}

impl Selection {
    pub fn selected(&self) -> Option<EntityId> {
        match *self {
            Selection::Idle => None,
            Selection::Selected(id) => Some(id),
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Selection::Idle)
    }

    /// Apply a click that resolved to `hit` (or to nothing).
    pub fn click(&mut self, hit: Option<EntityId>, registry: &mut SceneRegistry) -> Transition {
        match hit.filter(|id| registry.get(*id).is_some()) {
            Some(entity) => self.select(entity, registry),
            None => self.clear(registry),
        }
    }

    /// Drop the current selection, if any.
    pub fn clear(&mut self, registry: &mut SceneRegistry) -> Transition {
        match std::mem::take(self) {
            Selection::Idle => Transition::Unchanged,
            Selection::Selected(previous) => {
                if let Some(e) = registry.get_mut(previous) {
                    e.revert();
                }
                Transition::Cleared { previous }
            }
        }
    }

    fn select(&mut self, entity: EntityId, registry: &mut SceneRegistry) -> Transition {
        let previous = self.selected();
        if let Some(prev) = previous.and_then(|id| registry.get_mut(id)) {
            prev.revert();
        }
        if let Some(e) = registry.get_mut(entity) {
            e.highlight();
        }
        *self = Selection::Selected(entity);
        Transition::Selected { entity, previous }
    }
}
