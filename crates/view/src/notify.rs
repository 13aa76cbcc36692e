//! Notifications the view emits toward its presentation layer.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use spoolview_events::Event;

/// Outbound view notification.
///
/// `GroupsChanged` carries the new brand count only; consumers pull the full
/// aggregation through `BrandMaterialsView::current_groups` (pull is
/// decoupled from push).
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewEvent {
    /// The extruder position selector changed to a new value.
    ExtruderPositionChanged {
        position: u32,
        occurred_at: DateTime<Utc>,
    },

    /// A recompute published a new group list (possibly empty).
    GroupsChanged {
        brands: usize,
        occurred_at: DateTime<Utc>,
    },
}

impl ViewEvent {
    pub fn extruder_position_changed(position: u32) -> Self {
        Self::ExtruderPositionChanged {
            position,
            occurred_at: Utc::now(),
        }
    }

    pub fn groups_changed(brands: usize) -> Self {
        Self::GroupsChanged {
            brands,
            occurred_at: Utc::now(),
        }
    }
}

impl Event for ViewEvent {
    fn event_type(&self) -> &'static str {
        match self {
            ViewEvent::ExtruderPositionChanged { .. } => "view.extruder_position_changed",
            ViewEvent::GroupsChanged { .. } => "view.groups_changed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            ViewEvent::ExtruderPositionChanged { occurred_at, .. }
            | ViewEvent::GroupsChanged { occurred_at, .. } => *occurred_at,
        }
    }
}
