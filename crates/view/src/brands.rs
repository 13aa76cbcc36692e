//! Brand -> material type -> color variants aggregation.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::warn;

use spoolview_catalog::{MaterialRecord, MaterialTable};

/// Color variants of one (brand, material type) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeGroup {
    name: String,
    items: Vec<MaterialRecord>,
}

impl TypeGroup {
    /// Material type name (e.g. "PLA").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Variants in first-seen input order.
    pub fn items(&self) -> &[MaterialRecord] {
        &self.items
    }
}

/// Material types of one brand.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandGroup {
    name: String,
    types: Vec<TypeGroup>,
}

impl BrandGroup {
    /// Brand name (e.g. "Acme").
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Material types in first-seen input order.
    pub fn types(&self) -> &[TypeGroup] {
        &self.types
    }
}

/// Group a catalog table by brand, then material type.
///
/// Pure transform: iterates the table in its own order, builds fresh groups
/// on every call, and never sorts. Brand order and per-brand type order match
/// the first occurrence of each key in the input.
///
/// Entries under the reserved generic brand are excluded (the unbranded
/// catalog is not browsable by brand). Entries with missing required
/// metadata are skipped with a diagnostic; the rest of the table still
/// aggregates.
pub fn build_brand_groups(materials: &MaterialTable) -> Vec<BrandGroup> {
    let mut by_brand: IndexMap<String, IndexMap<String, Vec<MaterialRecord>>> = IndexMap::new();

    for (root_material_id, entry) in materials {
        let record = match MaterialRecord::from_entry(root_material_id.clone(), entry) {
            Ok(record) => record,
            Err(err) => {
                warn!(%root_material_id, %err, "skipping malformed material entry");
                continue;
            }
        };

        if record.is_generic_brand() {
            continue;
        }

        by_brand
            .entry(record.brand().to_owned())
            .or_default()
            .entry(record.material_type().to_owned())
            .or_default()
            .push(record);
    }

    by_brand
        .into_iter()
        .map(|(name, types)| BrandGroup {
            name,
            types: types
                .into_iter()
                .map(|(name, items)| TypeGroup { name, items })
                .collect(),
        })
        .collect()
}
