//! Hardware key interception.
//!
//! The host forwards every key event here before its default handling. Only
//! key-down events are looked at, and only while listening. Volume keys are
//! consumed so the system volume does not change; the power key is logged and
//! handed back to the OS.

use super::{Captured, InputCapture};
use crate::event::{KeyEvent, KeyPhase, Platform};
use crate::normalizer::{classify_key, KeyClass, Normalizer};
use crate::resource::ResourceProvider;
use crate::session::SessionController;
use tracing::{debug, info};

/// Whether the host should suppress its default handling of a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyDispatch {
    Consumed,
    PassThrough,
}

impl KeyDispatch {
    pub fn is_consumed(self) -> bool {
        self == KeyDispatch::Consumed
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct KeyEventCapture;

impl KeyEventCapture {
    pub fn new() -> Self {
        Self
    }
}

impl InputCapture for KeyEventCapture {
    type Raw = KeyEvent;
    type Ack = KeyDispatch;

    fn platform(&self) -> Platform {
        Platform::KeyEvents
    }

    fn activate(&mut self) {
        debug!("key interception active");
    }

    fn deactivate(&mut self) {
        debug!("key interception inactive");
    }

    fn capture<P: ResourceProvider>(
        &mut self,
        session: &SessionController<P>,
        raw: &KeyEvent,
        normalizer: &Normalizer,
    ) -> Captured<KeyDispatch> {
        let listening = session.is_listening();

        #[cfg(feature = "debug-log")]
        tracing::trace!(code = ?raw.code, phase = ?raw.phase, listening, "key event");

        if !listening || raw.phase != KeyPhase::Down {
            return Captured::ignore(KeyDispatch::PassThrough);
        }

        match classify_key(raw.code) {
            KeyClass::Action(action) => {
                info!(action = %action, "panic key pressed during SafeWalk monitoring");
                Captured::emit(normalizer.event(action), KeyDispatch::Consumed)
            }
            KeyClass::Power => {
                // Detected only. Forwarding the power key is not enabled.
                debug!("power button detected during SafeWalk monitoring");
                Captured::ignore(KeyDispatch::PassThrough)
            }
            KeyClass::Unrecognized => Captured::ignore(KeyDispatch::PassThrough),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_resource::VirtualResource;
    use crate::clock::ManualClock;
    use crate::event::{ActionKind, KeyCode};
    use std::sync::Arc;
    use std::time::Duration;

    fn setup(listening: bool) -> (SessionController<VirtualResource>, Normalizer) {
        let mut session =
            SessionController::new(VirtualResource::new("keys"), Duration::from_secs(600));
        if listening {
            assert!(session.start_listening());
        }
        let normalizer = Normalizer::new(Arc::new(ManualClock::new(7)));
        (session, normalizer)
    }

    #[test]
    fn volume_down_while_listening_is_consumed() {
        let (session, normalizer) = setup(true);
        let mut capture = KeyEventCapture::new();

        let out = capture.capture(&session, &KeyEvent::down(KeyCode::VolumeDown), &normalizer);
        assert_eq!(out.ack, KeyDispatch::Consumed);
        let event = out.event.unwrap();
        assert_eq!(event.action, ActionKind::VolumeDown);
        assert_eq!(event.timestamp, 7);
    }

    #[test]
    fn not_listening_passes_everything_through() {
        let (session, normalizer) = setup(false);
        let mut capture = KeyEventCapture::new();

        for code in [KeyCode::VolumeUp, KeyCode::VolumeDown, KeyCode::Power] {
            let out = capture.capture(&session, &KeyEvent::down(code), &normalizer);
            assert_eq!(out, Captured::ignore(KeyDispatch::PassThrough));
        }
    }

    #[test]
    fn key_up_never_emits() {
        let (session, normalizer) = setup(true);
        let mut capture = KeyEventCapture::new();

        let out = capture.capture(&session, &KeyEvent::up(KeyCode::VolumeUp), &normalizer);
        assert!(out.event.is_none());
        assert!(!out.ack.is_consumed());
    }

    #[test]
    fn power_and_unknown_keys_are_inert() {
        let (session, normalizer) = setup(true);
        let mut capture = KeyEventCapture::new();

        for code in [KeyCode::Power, KeyCode::Other(66)] {
            let out = capture.capture(&session, &KeyEvent::down(code), &normalizer);
            assert!(out.event.is_none());
            assert_eq!(out.ack, KeyDispatch::PassThrough);
        }
    }
}
