use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for a published notification.
///
/// Carries delivery metadata alongside the payload. Notifications are
/// transient, so the envelope exists for correlation and logging, not for
/// persistence or replay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    published_at: DateTime<Utc>,
    payload: E,
}

impl<E> EventEnvelope<E> {
    /// Wrap a payload, stamping a fresh UUIDv7 id and the publication time.
    pub fn new(payload: E) -> Self {
        Self {
            event_id: Uuid::now_v7(),
            published_at: Utc::now(),
            payload,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    /// When the envelope was published (transport time, not business time).
    pub fn published_at(&self) -> DateTime<Utc> {
        self.published_at
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_stamps_id_and_publication_time() {
        let a = EventEnvelope::new("payload");
        let b = EventEnvelope::new("payload");

        assert_ne!(a.event_id(), b.event_id());
        assert_eq!(*a.payload(), "payload");
        assert!(a.published_at() <= b.published_at());
    }
}
