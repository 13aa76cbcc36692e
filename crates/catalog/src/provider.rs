//! Collaborator traits the view consumes, plus in-memory implementations
//! for tests/dev.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use indexmap::IndexMap;

use spoolview_core::{MachineId, RootMaterialId};

use crate::machine::{Extruder, Machine};
use crate::material::CatalogEntry;

/// Insertion-ordered material table returned by a catalog query.
///
/// The view iterates this in table order and never sorts; whatever order the
/// catalog yields is the order the groups are built in.
pub type MaterialTable = IndexMap<RootMaterialId, CatalogEntry>;

/// Source of the active machine configuration.
pub trait MachineConfigProvider: Send + Sync {
    /// Currently active machine, if any.
    ///
    /// `None` is a legitimate nothing-selected state, not an error.
    fn active_machine(&self) -> Option<Machine>;
}

impl<P> MachineConfigProvider for Arc<P>
where
    P: MachineConfigProvider + ?Sized,
{
    fn active_machine(&self) -> Option<Machine> {
        (**self).active_machine()
    }
}

/// Source of machine/extruder-filtered material data.
pub trait MaterialCatalog: Send + Sync {
    /// Materials available for the given machine/extruder pair.
    ///
    /// `None` means the catalog has no data for this pair, which is distinct
    /// from `Some` of an empty table.
    fn available_materials(&self, machine: &Machine, extruder: &Extruder)
    -> Option<MaterialTable>;
}

impl<C> MaterialCatalog for Arc<C>
where
    C: MaterialCatalog + ?Sized,
{
    fn available_materials(
        &self,
        machine: &Machine,
        extruder: &Extruder,
    ) -> Option<MaterialTable> {
        (**self).available_materials(machine, extruder)
    }
}

/// In-memory machine configuration for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryMachineConfig {
    active: RwLock<Option<Machine>>,
}

impl InMemoryMachineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active machine (`None` deselects).
    pub fn set_active_machine(&self, machine: Option<Machine>) {
        if let Ok(mut active) = self.active.write() {
            *active = machine;
        }
    }
}

impl MachineConfigProvider for InMemoryMachineConfig {
    fn active_machine(&self) -> Option<Machine> {
        self.active.read().ok()?.clone()
    }
}

/// In-memory material catalog for tests/dev.
///
/// Holds one table per machine; the extruder argument is accepted but not
/// used for filtering in this simple implementation. A machine with no table
/// is in the "no data" state.
#[derive(Debug, Default)]
pub struct InMemoryMaterialCatalog {
    tables: RwLock<HashMap<MachineId, MaterialTable>>,
}

impl InMemoryMaterialCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the material table for a machine.
    pub fn set_materials(&self, machine_id: MachineId, table: MaterialTable) {
        if let Ok(mut tables) = self.tables.write() {
            tables.insert(machine_id, table);
        }
    }

    /// Drop a machine's table, putting it back into the "no data" state.
    pub fn clear_data(&self, machine_id: &MachineId) {
        if let Ok(mut tables) = self.tables.write() {
            tables.remove(machine_id);
        }
    }
}

impl MaterialCatalog for InMemoryMaterialCatalog {
    fn available_materials(
        &self,
        machine: &Machine,
        _extruder: &Extruder,
    ) -> Option<MaterialTable> {
        self.tables.read().ok()?.get(machine.id()).cloned()
    }
}
