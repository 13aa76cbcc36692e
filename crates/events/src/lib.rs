//! Change-notification plumbing for the material view.
//!
//! No event store and no replay: notifications here are transient
//! invalidation signals between the configuration/catalog layer and its
//! views, not a source of truth.

pub mod bus;
pub mod change;
pub mod envelope;
pub mod event;
pub mod in_memory_bus;

pub use bus::{EventBus, Subscription};
pub use change::ConfigEvent;
pub use envelope::EventEnvelope;
pub use event::Event;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
