//! Change-notification hub.
//!
//! Subscribers register a zero-argument callback under a [`SubscriberId`];
//! the store broadcasts after every successful mutation. The callback is a
//! plain boxed `FnMut()` capability, deliberately free of any UI-toolkit
//! interface. Callbacks return `()`: a subscriber that must not fail is the
//! subscriber's contract, and the hub never fails a broadcast on one's
//! behalf.

use std::fmt;

use crate::error::StoreError;
use crate::types::SubscriberId;

/// A subscriber's update hook.
pub type UpdateFn = Box<dyn FnMut()>;

/// Ordered registry of notification subscribers.
///
/// Empty at start; grows and shrinks via subscribe/unsubscribe; broadcast
/// invokes hooks in subscription order.
#[derive(Default)]
pub struct ObserverHub {
    subscribers: Vec<(SubscriberId, UpdateFn)>,
}

impl ObserverHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `hook` under `id`.
    ///
    /// Returns `StoreError::Duplicate` if `id` is already subscribed.
    pub fn subscribe(&mut self, id: SubscriberId, hook: UpdateFn) -> Result<(), StoreError> {
        if self.subscribers.iter().any(|(s, _)| *s == id) {
            return Err(StoreError::Duplicate(format!("subscriber {id}")));
        }
        self.subscribers.push((id, hook));
        Ok(())
    }

    /// Drop the subscription registered under `id`.
    ///
    /// Returns `StoreError::NotFound` if `id` is not subscribed.
    pub fn unsubscribe(&mut self, id: &SubscriberId) -> Result<(), StoreError> {
        let before = self.subscribers.len();
        self.subscribers.retain(|(s, _)| s != id);
        if self.subscribers.len() == before {
            return Err(StoreError::NotFound(format!("subscriber {id}")));
        }
        Ok(())
    }

    /// Invoke every subscriber's hook in subscription order.
    pub fn broadcast(&mut self) {
        for (_, hook) in &mut self.subscribers {
            hook();
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for ObserverHub {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ids: Vec<&SubscriberId> = self.subscribers.iter().map(|(id, _)| id).collect();
        f.debug_struct("ObserverHub").field("subscribers", &ids).finish()
    }
}
