//! Notification contract.

use chrono::{DateTime, Utc};

/// A change notification.
///
/// Notifications are:
/// - **immutable** (treat them as facts about an upstream change)
/// - **transient** (fire-and-forget; the bus does not persist them)
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "config.active_machine_changed").
    fn event_type(&self) -> &'static str;

    /// When the change occurred (business time).
    fn occurred_at(&self) -> DateTime<Utc>;
}
