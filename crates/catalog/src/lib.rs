//! Material catalog domain module.
//!
//! The data-provider boundary of the brand-grouped material view: validated
//! material records, the machine/extruder model, and the collaborator traits
//! the view consumes. Pure domain logic plus in-memory providers (no IO, no
//! HTTP, no storage).

pub mod machine;
pub mod material;
pub mod provider;

pub use machine::{Extruder, Machine};
pub use material::{CatalogEntry, GENERIC_BRAND, MaterialMetadata, MaterialRecord};
pub use provider::{
    InMemoryMachineConfig, InMemoryMaterialCatalog, MachineConfigProvider, MaterialCatalog,
    MaterialTable,
};
