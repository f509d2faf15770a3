use std::sync::mpsc;

use crate::{
    client::AggregationError,
    domain::AggregatedView,
    id::{Handle, Slot},
};

#[derive(Debug)]
pub enum VibeEvent {
    /// A pipeline was started for the slot
    ProfileRequested(Slot, Handle),
    ProfileLoaded(Slot, Handle, Box<AggregatedView>),
    ProfileFailed(Slot, Handle, AggregationError),
    /// The caller discarded the slot's card
    ProfileRemoved(Slot),
}

impl VibeEvent {
    /// Get the variant name as a string slice (without "VibeEvent::" prefix)
    pub fn variant_name(&self) -> &'static str {
        match self {
            VibeEvent::ProfileRequested(_, _) => "ProfileRequested",
            VibeEvent::ProfileLoaded(_, _, _) => "ProfileLoaded",
            VibeEvent::ProfileFailed(_, _, _) => "ProfileFailed",
            VibeEvent::ProfileRemoved(_) => "ProfileRemoved",
        }
    }

    pub fn slot(&self) -> Slot {
        match self {
            VibeEvent::ProfileRequested(slot, _)
            | VibeEvent::ProfileLoaded(slot, _, _)
            | VibeEvent::ProfileFailed(slot, _, _)
            | VibeEvent::ProfileRemoved(slot) => *slot,
        }
    }
}

/// Channel carrying pipeline outcomes back to the caller
#[derive(Debug)]
pub struct EventHandler {
    sender: mpsc::Sender<VibeEvent>,
    receiver: mpsc::Receiver<VibeEvent>,
}

impl EventHandler {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self { sender, receiver }
    }

    pub fn sender(&self) -> mpsc::Sender<VibeEvent> {
        self.sender.clone()
    }

    pub fn next(&self) -> Result<VibeEvent, mpsc::RecvError> {
        self.receiver.recv()
    }

    pub fn try_next(&self) -> Option<VibeEvent> {
        self.receiver.try_recv().ok()
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}

impl From<(Slot, Handle, AggregatedView)> for VibeEvent {
    fn from(value: (Slot, Handle, AggregatedView)) -> Self {
        let (slot, handle, view) = value;
        VibeEvent::ProfileLoaded(slot, handle, Box::new(view))
    }
}
