use crate::event::NormalizedEvent;
use crate::eventbus::ButtonListener;

/// A simple listener that traces every emitted button event.
#[derive(Clone, Copy, Debug, Default)]
pub struct LoggingListener;

impl LoggingListener {
    pub fn new() -> Self {
        LoggingListener
    }
}

impl ButtonListener for LoggingListener {
    fn on_button(&mut self, event: &NormalizedEvent) {
        tracing::info!(action = %event.action, timestamp = event.timestamp, "button event");
    }
}
