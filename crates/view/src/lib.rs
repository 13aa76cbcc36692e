//! Brand-grouped material browsing view.
//!
//! The aggregation (brand -> material type -> color variants) and its
//! change-driven recompute wrapper, implemented purely as deterministic
//! domain logic (no IO, no HTTP, no storage).

pub mod brands;
pub mod notify;
pub mod view;

pub use brands::{BrandGroup, TypeGroup, build_brand_groups};
pub use notify::ViewEvent;
pub use view::BrandMaterialsView;
