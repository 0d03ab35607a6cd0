use crate::event::NormalizedEvent;
use std::collections::BTreeMap;

/// Trait for reacting to button events inside the process.
pub trait ButtonListener: Send {
    fn on_button(&mut self, event: &NormalizedEvent);
}

impl<F> ButtonListener for F
where
    F: FnMut(&NormalizedEvent) + Send,
{
    fn on_button(&mut self, event: &NormalizedEvent) {
        self(event)
    }
}

/// Determines which events a listener wants to receive.
#[derive(Debug, Clone, Copy)]
pub enum EventFilter {
    All,
    /// Volume up/down only, whichever variant produced them.
    VolumeOnly,
    /// Everything except volume up/down.
    MediaOnly,
    Custom(fn(&NormalizedEvent) -> bool),
}

impl EventFilter {
    pub fn accepts(&self, event: &NormalizedEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::VolumeOnly => event.action.is_volume(),
            EventFilter::MediaOnly => !event.action.is_volume(),
            EventFilter::Custom(f) => f(event),
        }
    }
}

struct ListenerEntry {
    listener: Box<dyn ButtonListener>,
    enabled: bool,
    filter: EventFilter,
}

/// In-process fan-out of emitted button events, in registration order.
#[derive(Default)]
pub struct ButtonEventBus {
    next_id: u64,
    listeners: BTreeMap<u64, ListenerEntry>,
}

impl ButtonEventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener and returns its id.
    pub fn add_listener(
        &mut self,
        listener: impl ButtonListener + 'static,
        filter: EventFilter,
    ) -> u64 {
        let id = self.next_id;
        self.listeners.insert(
            id,
            ListenerEntry {
                listener: Box::new(listener),
                enabled: true,
                filter,
            },
        );
        self.next_id += 1;
        id
    }

    pub fn enable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = true;
        }
    }

    /// Mutes a listener without removing it.
    pub fn disable(&mut self, id: u64) {
        if let Some(entry) = self.listeners.get_mut(&id) {
            entry.enabled = false;
        }
    }

    pub fn remove_listener(&mut self, id: u64) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Emits one event to all active and matching listeners.
    pub fn emit(&mut self, event: &NormalizedEvent) {
        for entry in self.listeners.values_mut() {
            if entry.enabled && entry.filter.accepts(event) {
                entry.listener.on_button(event);
            }
        }
    }
}
