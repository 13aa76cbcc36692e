//! Upstream configuration/catalog change streams.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::event::Event;

/// A change in one of the three upstream sources the material view depends
/// on: the active machine, the active extruder selection, or the material
/// catalog contents.
///
/// The sources are independent, but consumers treat every variant the same
/// way: as an invalidation of derived state. Funneling them through one
/// typed stream gives views a single drain point instead of three ad hoc
/// callbacks.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigEvent {
    /// The active machine changed (selected, swapped, or deselected).
    ActiveMachineChanged { occurred_at: DateTime<Utc> },

    /// The active extruder selection changed.
    ActiveExtruderChanged { occurred_at: DateTime<Utc> },

    /// The material catalog contents were updated.
    MaterialsUpdated { occurred_at: DateTime<Utc> },
}

impl ConfigEvent {
    pub fn active_machine_changed() -> Self {
        Self::ActiveMachineChanged {
            occurred_at: Utc::now(),
        }
    }

    pub fn active_extruder_changed() -> Self {
        Self::ActiveExtruderChanged {
            occurred_at: Utc::now(),
        }
    }

    pub fn materials_updated() -> Self {
        Self::MaterialsUpdated {
            occurred_at: Utc::now(),
        }
    }
}

impl Event for ConfigEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ConfigEvent::ActiveMachineChanged { .. } => "config.active_machine_changed",
            ConfigEvent::ActiveExtruderChanged { .. } => "config.active_extruder_changed",
            ConfigEvent::MaterialsUpdated { .. } => "catalog.materials_updated",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ConfigEvent::ActiveMachineChanged { occurred_at }
            | ConfigEvent::ActiveExtruderChanged { occurred_at }
            | ConfigEvent::MaterialsUpdated { occurred_at } => *occurred_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_types_are_stable_identifiers() {
        assert_eq!(
            ConfigEvent::active_machine_changed().event_type(),
            "config.active_machine_changed"
        );
        assert_eq!(
            ConfigEvent::active_extruder_changed().event_type(),
            "config.active_extruder_changed"
        );
        assert_eq!(
            ConfigEvent::materials_updated().event_type(),
            "catalog.materials_updated"
        );
    }
}
