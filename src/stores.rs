use std::sync::mpsc::Sender;

use tracing::{debug, info, instrument, warn};

use crate::{
    dispatcher::Dispatcher,
    domain::AggregatedView,
    event::VibeEvent,
    id::{Handle, Slot},
};

/// What a display slot currently holds
#[derive(Debug, Clone, Default, PartialEq)]
pub enum SlotState {
    #[default]
    Empty,
    Loading(Handle),
    Ready(Box<AggregatedView>),
}

/// Fixed-capacity set of profile cards: one primary and two comparisons
pub struct ComparisonStore {
    sender: Sender<VibeEvent>,
    slots: [SlotState; 3],
}

impl ComparisonStore {
    pub fn new(sender: Sender<VibeEvent>) -> Self {
        Self { sender, slots: Default::default() }
    }

    #[instrument(skip(self, event), fields(event_type = %event.variant_name(), slot = %event.slot()))]
    pub fn apply(&mut self, event: &VibeEvent) {
        match event {
            VibeEvent::ProfileRequested(slot, handle) => {
                debug!(handle = %handle, "Slot waiting for profile");
                self.slots[slot.index()] = SlotState::Loading(handle.clone());
            },

            // a result for a slot that was removed or reassigned meanwhile is dropped
            VibeEvent::ProfileLoaded(slot, handle, view) => {
                if self.is_waiting_for(*slot, handle) {
                    self.slots[slot.index()] = SlotState::Ready(view.clone());
                } else {
                    debug!(login = %view.profile.login, "Discarding profile for inactive slot");
                }
            },

            VibeEvent::ProfileFailed(slot, handle, _) => {
                if self.is_waiting_for(*slot, handle) {
                    self.slots[slot.index()] = SlotState::Empty;
                }
            },

            VibeEvent::ProfileRemoved(slot) => {
                self.slots[slot.index()] = SlotState::Empty;
            },
        }
    }

    /// Drop the card in `slot`; no network activity is involved
    pub fn remove(&mut self, slot: Slot) -> Option<AggregatedView> {
        let previous = std::mem::take(&mut self.slots[slot.index()]);
        if previous != SlotState::Empty {
            self.dispatch(VibeEvent::ProfileRemoved(slot));
        }

        match previous {
            SlotState::Ready(view) => Some(*view),
            _ => None,
        }
    }

    pub fn state(&self, slot: Slot) -> &SlotState {
        &self.slots[slot.index()]
    }

    pub fn get(&self, slot: Slot) -> Option<&AggregatedView> {
        match self.state(slot) {
            SlotState::Ready(view) => Some(view.as_ref()),
            _ => None,
        }
    }

    /// Loaded views in display order
    pub fn views(&self) -> impl Iterator<Item = (Slot, &AggregatedView)> {
        Slot::ALL
            .into_iter()
            .filter_map(move |slot| self.get(slot).map(|view| (slot, view)))
    }

    /// Slot the next submitted handle goes to.
    ///
    /// The primary slot is always filled first; comparisons may be requested
    /// while the primary pipeline is still in flight.
    pub fn next_free_slot(&self) -> Option<Slot> {
        Slot::ALL
            .into_iter()
            .find(|slot| *self.state(*slot) == SlotState::Empty)
    }

    pub fn is_loading(&self) -> bool {
        self.slots
            .iter()
            .any(|s| matches!(s, SlotState::Loading(_)))
    }

    fn is_waiting_for(&self, slot: Slot, handle: &Handle) -> bool {
        matches!(self.state(slot), SlotState::Loading(h) if h == handle)
    }

    pub fn len(&self) -> usize {
        self.views().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Dispatcher for ComparisonStore {
    fn dispatch(&self, event: VibeEvent) {
        self.sender.dispatch(event)
    }
}

#[instrument(skip(event))]
pub fn log_event(event: &VibeEvent) {
    match event {
        VibeEvent::ProfileRequested(slot, handle) => {
            info!(slot = %slot, handle = %handle, "Requesting profile from GitHub")
        },
        VibeEvent::ProfileLoaded(slot, handle, view) => {
            info!(slot = %slot, handle = %handle, login = %view.profile.login, "Received aggregated profile")
        },
        VibeEvent::ProfileFailed(slot, handle, err) => {
            warn!(slot = %slot, handle = %handle, stage = %err.stage(), cause = %err.cause(), "Profile unavailable")
        },
        VibeEvent::ProfileRemoved(slot) => debug!(slot = %slot, "Removed profile"),
    }
}
