use std::sync::mpsc;

use crate::event::VibeEvent;

pub trait Dispatcher {
    fn dispatch(&self, event: VibeEvent);
}

impl Dispatcher for mpsc::Sender<VibeEvent> {
    fn dispatch(&self, event: VibeEvent) {
        let _ = self.send(event);
    }
}
