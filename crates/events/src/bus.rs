//! Notification publishing/subscription (mechanics only).
//!
//! A lightweight pub/sub layer that fans upstream changes out to views.
//! Transport is in-process; delivery is best-effort fan-out to live
//! subscribers. Consumption is strictly non-blocking: the owning component
//! drains its subscription at a point of its choosing, which keeps the core
//! compatible with a single-threaded, cooperative scheduling model.

use std::sync::Arc;
use std::sync::mpsc::{Receiver, TryRecvError};

/// A subscription to a notification stream.
///
/// Each subscription receives a copy of every message published after it was
/// created, in publication order.
#[derive(Debug)]
pub struct Subscription<M> {
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(receiver: Receiver<M>) -> Self {
        Self { receiver }
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Drain all pending messages in arrival order.
    pub fn drain(&self) -> Vec<M> {
        let mut pending = Vec::new();
        while let Ok(message) = self.receiver.try_recv() {
            pending.push(message);
        }
        pending
    }
}

/// Domain-agnostic notification bus (pub/sub abstraction).
///
/// Sits between change emitters (machine configuration, extruder selection,
/// the material catalog) and the views derived from them. Implementations
/// must not block on `publish`; a slow or dead subscriber is the subscriber's
/// problem, never the publisher's.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self) -> Subscription<M>;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self) -> Subscription<M> {
        (**self).subscribe()
    }
}
