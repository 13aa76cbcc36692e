use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use spoolview_core::{DomainError, DomainResult, MaterialId, RootMaterialId};

/// Reserved brand marking unbranded/default catalog entries.
///
/// Compared case-insensitively. Entries under this brand are excluded from
/// brand-grouped browsing.
pub const GENERIC_BRAND: &str = "generic";

/// Raw, possibly-incomplete metadata a catalog yields for one variant.
///
/// Every field is optional at this layer; validation happens when the
/// metadata is promoted to a [`MaterialRecord`]. Unknown keys from the
/// source catalog are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialMetadata {
    pub id: Option<String>,
    pub name: Option<String>,
    pub brand: Option<String>,
    pub material: Option<String>,
    pub color_name: Option<String>,
}

/// One catalog row: raw metadata plus an opaque payload from the
/// originating catalog entry.
///
/// The payload is carried through to the view unmodified and never
/// inspected; adapters can stash whatever their catalog keeps per entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogEntry {
    pub metadata: MaterialMetadata,
    #[serde(default)]
    pub payload: JsonValue,
}

impl CatalogEntry {
    pub fn new(metadata: MaterialMetadata) -> Self {
        Self {
            metadata,
            payload: JsonValue::Null,
        }
    }

    pub fn with_payload(mut self, payload: JsonValue) -> Self {
        self.payload = payload;
        self
    }
}

/// A validated material variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    root_material_id: RootMaterialId,
    id: MaterialId,
    name: String,
    brand: String,
    material_type: String,
    color_name: String,
    payload: JsonValue,
}

impl MaterialRecord {
    /// Validate one catalog entry into a record.
    ///
    /// Fails on the first missing required metadata field; a field that is
    /// blank after trimming counts as missing.
    pub fn from_entry(
        root_material_id: RootMaterialId,
        entry: &CatalogEntry,
    ) -> DomainResult<Self> {
        let meta = &entry.metadata;
        let id = required(&root_material_id, "id", &meta.id)?;
        let name = required(&root_material_id, "name", &meta.name)?;
        let brand = required(&root_material_id, "brand", &meta.brand)?;
        let material_type = required(&root_material_id, "material", &meta.material)?;
        let color_name = required(&root_material_id, "color_name", &meta.color_name)?;

        Ok(Self {
            root_material_id,
            id: MaterialId::new(id),
            name,
            brand,
            material_type,
            color_name,
            payload: entry.payload.clone(),
        })
    }

    pub fn root_material_id(&self) -> &RootMaterialId {
        &self.root_material_id
    }

    pub fn id(&self) -> &MaterialId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn brand(&self) -> &str {
        &self.brand
    }

    pub fn material_type(&self) -> &str {
        &self.material_type
    }

    pub fn color_name(&self) -> &str {
        &self.color_name
    }

    /// Opaque payload from the originating catalog entry, untouched.
    pub fn payload(&self) -> &JsonValue {
        &self.payload
    }

    /// True when the brand is the reserved unbranded sentinel.
    pub fn is_generic_brand(&self) -> bool {
        self.brand.eq_ignore_ascii_case(GENERIC_BRAND)
    }
}

fn required(
    root_material_id: &RootMaterialId,
    field: &'static str,
    value: &Option<String>,
) -> DomainResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v.clone()),
        _ => Err(DomainError::missing_metadata(
            root_material_id.as_str(),
            field,
        )),
    }
}
