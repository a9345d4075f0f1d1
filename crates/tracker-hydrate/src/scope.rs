//! Request-scoped, single-use hydration cache
//!
//! One [`HydrationScope`] lives for one page-load cycle. The render step
//! stores each slot at most once; the first consumer to drain a slot takes
//! the value and every later consumer sees `None`, so nothing reads stale
//! data after the handoff.

use crate::error::{HydrationError, Result};
use crate::globals::EmbeddedGlobals;
use crate::slot::HydrationSlot;
use parking_lot::Mutex;
use serde::de::DeserializeOwned;
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Default)]
enum SlotState {
    #[default]
    Empty,
    Stored(Value),
    Drained,
}

#[derive(Debug, Default)]
struct Slots {
    initial_data: SlotState,
    user_data: SlotState,
}

impl Slots {
    fn get_mut(&mut self, slot: HydrationSlot) -> &mut SlotState {
        match slot {
            HydrationSlot::InitialData => &mut self.initial_data,
            HydrationSlot::UserData => &mut self.user_data,
        }
    }
}

/// Hydration cache for one page load
#[derive(Debug)]
pub struct HydrationScope {
    id: Uuid,
    slots: Mutex<Slots>,
}

impl Default for HydrationScope {
    fn default() -> Self {
        Self::new()
    }
}

impl HydrationScope {
    /// Empty scope with a fresh id
    #[must_use]
    pub fn new() -> Self {
        Self::with_id(Uuid::new_v4())
    }

    /// Empty scope tied to an existing request id
    #[must_use]
    pub fn with_id(id: Uuid) -> Self {
        Self {
            id,
            slots: Mutex::new(Slots::default()),
        }
    }

    /// Browser-side scope seeded from the globals embedded in the page
    ///
    /// Absent globals leave their slot empty.
    #[must_use]
    pub fn from_globals(globals: EmbeddedGlobals) -> Self {
        let scope = Self::new();
        {
            let mut slots = scope.slots.lock();
            if let Some(value) = globals.initial_data {
                slots.initial_data = SlotState::Stored(value);
            }
            if let Some(value) = globals.user_data {
                slots.user_data = SlotState::Stored(value);
            }
        }
        scope
    }

    #[inline]
    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Fill `slot`; a second store in the same cycle is rejected
    pub fn store(&self, slot: HydrationSlot, value: Value) -> Result<()> {
        let mut slots = self.slots.lock();
        let state = slots.get_mut(slot);
        if !matches!(state, SlotState::Empty) {
            return Err(HydrationError::AlreadyStored {
                slot,
                scope: self.id,
            });
        }
        tracing::debug!(scope = %self.id, %slot, "hydration slot stored");
        *state = SlotState::Stored(value);
        Ok(())
    }

    /// Take the value in `slot`, leaving it empty for good
    pub fn drain(&self, slot: HydrationSlot) -> Option<Value> {
        let mut slots = self.slots.lock();
        let state = slots.get_mut(slot);
        match std::mem::replace(state, SlotState::Drained) {
            SlotState::Stored(value) => {
                tracing::debug!(scope = %self.id, %slot, "hydration slot drained");
                Some(value)
            }
            SlotState::Empty => {
                // Never stored: keep it storable.
                *state = SlotState::Empty;
                None
            }
            SlotState::Drained => None,
        }
    }

    /// Drain and decode; an undecodable value is logged and treated as absent
    pub fn drain_as<T: DeserializeOwned>(&self, slot: HydrationSlot) -> Option<T> {
        let value = self.drain(slot)?;
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(decoded) => Some(decoded),
            Err(err) => {
                tracing::warn!(scope = %self.id, %slot, error = %err, "discarding undecodable hydration data");
                None
            }
        }
    }

    /// Whether `slot` still holds an undrained value
    #[must_use]
    pub fn is_stored(&self, slot: HydrationSlot) -> bool {
        let mut slots = self.slots.lock();
        matches!(slots.get_mut(slot), SlotState::Stored(_))
    }
}
