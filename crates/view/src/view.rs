//! Reactive wrapper around the brand aggregation.

use std::sync::Arc;

use tracing::{debug, info};

use spoolview_catalog::{MachineConfigProvider, MaterialCatalog};
use spoolview_core::{DomainError, DomainResult};
use spoolview_events::{
    ConfigEvent, Event, EventBus, EventEnvelope, InMemoryEventBus, Subscription,
};

use crate::brands::{BrandGroup, build_brand_groups};
use crate::notify::ViewEvent;

/// Recompute state of the view.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Freshness {
    /// Inputs changed since the last publish.
    Stale,
    /// Published groups match current inputs.
    Fresh,
}

/// Brand -> material type -> color variants view over the active
/// machine/extruder pair.
///
/// Owns the extruder-position selector and the last published aggregation.
/// Upstream changes arrive on a [`ConfigEvent`] subscription;
/// [`process_pending`](Self::process_pending) coalesces a burst of them into
/// a single recompute. Published state is replaced wholesale on every
/// recompute, never patched.
///
/// Single-threaded by design: all mutating operations take `&mut self`, and
/// collaborators are queried synchronously at recompute time, so each
/// recompute observes a settled snapshot of upstream state.
pub struct BrandMaterialsView {
    machine_config: Arc<dyn MachineConfigProvider>,
    catalog: Arc<dyn MaterialCatalog>,
    changes: Subscription<ConfigEvent>,
    notifications: Arc<InMemoryEventBus<EventEnvelope<ViewEvent>>>,
    extruder_position: u32,
    groups: Vec<BrandGroup>,
    freshness: Freshness,
}

impl BrandMaterialsView {
    /// Build the view and run the initial recompute, so a freshly
    /// constructed view is never empty without cause.
    ///
    /// Fails only on a configuration-consistency fault: the active machine
    /// has no extruder at the default position 0.
    pub fn new(
        machine_config: Arc<dyn MachineConfigProvider>,
        catalog: Arc<dyn MaterialCatalog>,
        changes: Subscription<ConfigEvent>,
    ) -> DomainResult<Self> {
        let mut view = Self {
            machine_config,
            catalog,
            changes,
            notifications: Arc::new(InMemoryEventBus::new()),
            extruder_position: 0,
            groups: Vec::new(),
            freshness: Freshness::Stale,
        };
        view.recompute()?;
        Ok(view)
    }

    /// Select which extruder slot's materials to show.
    ///
    /// Setting the current position again is a complete no-op: no
    /// notification, no recompute. A new value updates the selector, emits
    /// [`ViewEvent::ExtruderPositionChanged`], and recomputes.
    pub fn set_extruder_position(&mut self, position: u32) -> DomainResult<()> {
        if self.extruder_position == position {
            return Ok(());
        }

        self.extruder_position = position;
        self.freshness = Freshness::Stale;
        info!(position, "extruder position changed");
        self.notify(ViewEvent::extruder_position_changed(position));
        self.recompute()
    }

    pub fn extruder_position(&self) -> u32 {
        self.extruder_position
    }

    /// Drain pending upstream change notifications, in arrival order.
    ///
    /// Any drained event marks the view stale; a stale view recomputes
    /// exactly once per call, so a burst of changes costs one rebuild.
    pub fn process_pending(&mut self) -> DomainResult<()> {
        for event in self.changes.drain() {
            debug!(event_type = event.event_type(), "upstream change");
            self.freshness = Freshness::Stale;
        }

        match self.freshness {
            Freshness::Fresh => Ok(()),
            Freshness::Stale => self.recompute(),
        }
    }

    /// Rebuild the published groups from current collaborator state.
    ///
    /// The two legitimate empty states publish an empty list and succeed:
    /// no active machine, and a catalog with no data for the pair (distinct
    /// from empty data). A position with no matching extruder on the active
    /// machine is a configuration-consistency fault; the error is returned
    /// and the previously published groups stay untouched.
    pub fn recompute(&mut self) -> DomainResult<()> {
        let Some(machine) = self.machine_config.active_machine() else {
            debug!("no active machine, publishing empty view");
            self.publish(Vec::new());
            return Ok(());
        };

        let extruder = machine
            .extruder_by_position(self.extruder_position)
            .ok_or_else(|| {
                DomainError::extruder_not_found(machine.id().as_str(), self.extruder_position)
            })?;

        let Some(materials) = self.catalog.available_materials(&machine, extruder) else {
            debug!(machine = %machine.id(), "catalog has no data for this machine/extruder pair");
            self.publish(Vec::new());
            return Ok(());
        };

        let groups = build_brand_groups(&materials);
        debug!(brands = groups.len(), "rebuilt brand groups");
        self.publish(groups);
        Ok(())
    }

    /// Last published aggregation. Never triggers a recompute.
    pub fn current_groups(&self) -> &[BrandGroup] {
        &self.groups
    }

    /// Subscribe to view notifications (position changes, group updates).
    pub fn subscribe(&self) -> Subscription<EventEnvelope<ViewEvent>> {
        self.notifications.subscribe()
    }

    fn publish(&mut self, groups: Vec<BrandGroup>) {
        self.groups = groups;
        self.freshness = Freshness::Fresh;
        self.notify(ViewEvent::groups_changed(self.groups.len()));
    }

    fn notify(&self, event: ViewEvent) {
        // Delivery is best-effort; a poisoned subscriber list is not a view error.
        let _ = self.notifications.publish(EventEnvelope::new(event));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use indexmap::IndexMap;

    use spoolview_catalog::{
        CatalogEntry, Extruder, InMemoryMachineConfig, InMemoryMaterialCatalog, Machine,
        MaterialMetadata, MaterialTable,
    };
    use spoolview_core::{MachineId, RootMaterialId};

    fn init_tracing() {
        spoolview_observability::init();
    }

    fn machine() -> Machine {
        Machine::new(
            MachineId::new("workhorse_3"),
            "Workhorse Mk3",
            vec![Extruder::new(0, "left"), Extruder::new(1, "right")],
        )
    }

    fn entry(id: &str, brand: &str, material: &str, color: &str) -> CatalogEntry {
        CatalogEntry::new(MaterialMetadata {
            id: Some(id.to_owned()),
            name: Some(format!("{brand} {material} {color}")),
            brand: Some(brand.to_owned()),
            material: Some(material.to_owned()),
            color_name: Some(color.to_owned()),
        })
    }

    fn sample_table() -> MaterialTable {
        let mut table = IndexMap::new();
        table.insert(
            RootMaterialId::new("m1"),
            entry("m1", "Acme", "PLA", "Red"),
        );
        table.insert(
            RootMaterialId::new("m2"),
            entry("m2", "Acme", "PLA", "Blue"),
        );
        table.insert(
            RootMaterialId::new("m3"),
            entry("m3", "generic", "PLA", "White"),
        );
        table.insert(
            RootMaterialId::new("m4"),
            entry("m4", "Zen", "ABS", "Black"),
        );
        table
    }

    struct Fixture {
        config: Arc<InMemoryMachineConfig>,
        catalog: Arc<InMemoryMaterialCatalog>,
        changes: Arc<InMemoryEventBus<ConfigEvent>>,
    }

    impl Fixture {
        fn new() -> Self {
            init_tracing();
            Self {
                config: Arc::new(InMemoryMachineConfig::new()),
                catalog: Arc::new(InMemoryMaterialCatalog::new()),
                changes: Arc::new(InMemoryEventBus::new()),
            }
        }

        fn with_machine_and_materials() -> Self {
            let fixture = Self::new();
            let machine = machine();
            fixture
                .catalog
                .set_materials(machine.id().clone(), sample_table());
            fixture.config.set_active_machine(Some(machine));
            fixture
        }

        fn view(&self) -> BrandMaterialsView {
            BrandMaterialsView::new(
                self.config.clone(),
                self.catalog.clone(),
                self.changes.subscribe(),
            )
            .unwrap()
        }
    }

    fn groups_changed_count(sub: &Subscription<EventEnvelope<ViewEvent>>) -> usize {
        sub.drain()
            .iter()
            .filter(|env| matches!(env.payload(), ViewEvent::GroupsChanged { .. }))
            .count()
    }

    #[test]
    fn construction_runs_the_initial_recompute() {
        let fixture = Fixture::with_machine_and_materials();
        let view = fixture.view();

        let brands: Vec<&str> = view.current_groups().iter().map(|g| g.name()).collect();
        assert_eq!(brands, vec!["Acme", "Zen"]);
    }

    #[test]
    fn no_active_machine_publishes_empty_regardless_of_catalog() {
        let fixture = Fixture::new();
        // Catalog has data, but nothing is selected.
        fixture
            .catalog
            .set_materials(MachineId::new("workhorse_3"), sample_table());

        let view = fixture.view();

        assert!(view.current_groups().is_empty());
    }

    #[test]
    fn catalog_without_data_publishes_empty() {
        let fixture = Fixture::new();
        fixture.config.set_active_machine(Some(machine()));

        let view = fixture.view();

        assert!(view.current_groups().is_empty());
    }

    #[test]
    fn missing_extruder_position_is_a_configuration_fault() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();
        let before = view.current_groups().to_vec();

        let err = view.set_extruder_position(7).unwrap_err();

        assert_eq!(
            err,
            DomainError::ExtruderNotFound {
                machine: "workhorse_3".to_owned(),
                position: 7,
            }
        );
        // The fault is not masked by a silent empty or partial publish.
        assert_eq!(view.current_groups(), before.as_slice());
    }

    #[test]
    fn setting_a_new_position_notifies_and_recomputes() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();
        let sub = view.subscribe();

        view.set_extruder_position(1).unwrap();

        assert_eq!(view.extruder_position(), 1);
        let events = sub.drain();
        assert!(matches!(
            events[0].payload(),
            ViewEvent::ExtruderPositionChanged { position: 1, .. }
        ));
        assert!(matches!(
            events[1].payload(),
            ViewEvent::GroupsChanged { brands: 2, .. }
        ));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn setting_the_same_position_again_is_a_noop() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();
        let sub = view.subscribe();

        view.set_extruder_position(1).unwrap();
        view.set_extruder_position(1).unwrap();

        // Exactly one recompute and one position-changed notification.
        let events = sub.drain();
        let positions = events
            .iter()
            .filter(|env| matches!(env.payload(), ViewEvent::ExtruderPositionChanged { .. }))
            .count();
        let groups = events
            .iter()
            .filter(|env| matches!(env.payload(), ViewEvent::GroupsChanged { .. }))
            .count();
        assert_eq!(positions, 1);
        assert_eq!(groups, 1);

        let sub = view.subscribe();
        view.set_extruder_position(1).unwrap();
        assert_eq!(sub.drain().len(), 0);
    }

    #[test]
    fn process_pending_coalesces_a_burst_into_one_recompute() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();
        let sub = view.subscribe();

        fixture
            .changes
            .publish(ConfigEvent::active_machine_changed())
            .unwrap();
        fixture
            .changes
            .publish(ConfigEvent::materials_updated())
            .unwrap();
        fixture
            .changes
            .publish(ConfigEvent::active_extruder_changed())
            .unwrap();

        view.process_pending().unwrap();

        assert_eq!(groups_changed_count(&sub), 1);
    }

    #[test]
    fn process_pending_without_changes_does_not_recompute() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();
        let sub = view.subscribe();

        view.process_pending().unwrap();

        assert_eq!(sub.drain().len(), 0);
    }

    #[test]
    fn machine_deselection_empties_the_view_on_next_change() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();
        assert!(!view.current_groups().is_empty());

        fixture.config.set_active_machine(None);
        fixture
            .changes
            .publish(ConfigEvent::active_machine_changed())
            .unwrap();
        view.process_pending().unwrap();

        assert!(view.current_groups().is_empty());
    }

    #[test]
    fn groups_changed_fires_even_for_empty_to_empty_transitions() {
        let fixture = Fixture::new();
        let mut view = fixture.view();
        assert!(view.current_groups().is_empty());

        let sub = view.subscribe();
        fixture
            .changes
            .publish(ConfigEvent::materials_updated())
            .unwrap();
        view.process_pending().unwrap();

        assert_eq!(groups_changed_count(&sub), 1);
        assert!(view.current_groups().is_empty());
    }

    #[test]
    fn catalog_update_is_visible_after_process_pending() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();

        let mut table = sample_table();
        table.insert(
            RootMaterialId::new("m5"),
            entry("m5", "Nova", "PETG", "Clear"),
        );
        fixture
            .catalog
            .set_materials(MachineId::new("workhorse_3"), table);
        fixture
            .changes
            .publish(ConfigEvent::materials_updated())
            .unwrap();
        view.process_pending().unwrap();

        let brands: Vec<&str> = view.current_groups().iter().map(|g| g.name()).collect();
        assert_eq!(brands, vec!["Acme", "Zen", "Nova"]);
    }

    #[test]
    fn recompute_error_leaves_the_view_stale_until_inputs_recover() {
        let fixture = Fixture::with_machine_and_materials();
        let mut view = fixture.view();

        view.set_extruder_position(7).unwrap_err();

        // Position 7 stays selected and invalid; picking a valid slot recovers.
        view.set_extruder_position(1).unwrap();
        let brands: Vec<&str> = view.current_groups().iter().map(|g| g.name()).collect();
        assert_eq!(brands, vec!["Acme", "Zen"]);
    }
}
