use serde::{Deserialize, Serialize};

use spoolview_core::MachineId;

/// A single extrusion unit on a machine.
///
/// `nozzle_size` is descriptive metadata only; nothing in the view layer
/// interprets it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Extruder {
    position: u32,
    name: String,
    nozzle_size: Option<String>,
}

impl Extruder {
    pub fn new(position: u32, name: impl Into<String>) -> Self {
        Self {
            position,
            name: name.into(),
            nozzle_size: None,
        }
    }

    pub fn with_nozzle_size(mut self, nozzle_size: impl Into<String>) -> Self {
        self.nozzle_size = Some(nozzle_size.into());
        self
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nozzle_size(&self) -> Option<&str> {
        self.nozzle_size.as_deref()
    }
}

/// Active machine configuration as seen by the view layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Machine {
    id: MachineId,
    name: String,
    extruders: Vec<Extruder>,
}

impl Machine {
    pub fn new(id: MachineId, name: impl Into<String>, extruders: Vec<Extruder>) -> Self {
        Self {
            id,
            name: name.into(),
            extruders,
        }
    }

    pub fn id(&self) -> &MachineId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn extruders(&self) -> &[Extruder] {
        &self.extruders
    }

    /// Look up the extruder at a position.
    ///
    /// Absence means the caller's position selector and the machine model
    /// have diverged; callers surface that as a configuration fault rather
    /// than an empty result.
    pub fn extruder_by_position(&self, position: u32) -> Option<&Extruder> {
        self.extruders.iter().find(|e| e.position() == position)
    }
}
