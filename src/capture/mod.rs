//! Input capture adapters.
//!
//! An [`InputCapture`] turns one platform's raw input into at most one
//! [`NormalizedEvent`] plus the acknowledgement the platform expects back:
//! - [`KeyEventCapture`]: hardware keys; answers with [`KeyDispatch`]
//!   (consume or pass through to the OS).
//! - [`RemoteCommandCapture`]: media remote commands; always answers
//!   [`CommandStatus::Success`].
//!
//! Adapters read the session's listening state through a shared reference to
//! the [`SessionController`]; they never change it.

use crate::event::{NormalizedEvent, Platform};
use crate::normalizer::Normalizer;
use crate::resource::ResourceProvider;
use crate::session::SessionController;

pub mod key_events;
pub mod remote_commands;

pub use key_events::{KeyDispatch, KeyEventCapture};
pub use remote_commands::{CommandCenter, CommandStatus, RemoteCommandCapture, RemoteInput};

/// Result of feeding one raw input through an adapter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Captured<A> {
    /// Event to relay, if the input qualified.
    pub event: Option<NormalizedEvent>,
    /// Answer for the platform dispatcher.
    pub ack: A,
}

impl<A> Captured<A> {
    pub fn emit(event: NormalizedEvent, ack: A) -> Self {
        Self {
            event: Some(event),
            ack,
        }
    }

    pub fn ignore(ack: A) -> Self {
        Self { event: None, ack }
    }
}

/// Produces candidate actions from raw platform input while listening.
pub trait InputCapture {
    /// Platform-native input handed in by the host.
    type Raw;
    /// What the platform expects back for each input.
    type Ack;

    fn platform(&self) -> Platform;

    /// Hooks into the platform after the session starts listening.
    fn activate(&mut self);

    /// Unhooks before the session releases its lease.
    fn deactivate(&mut self);

    fn capture<P: ResourceProvider>(
        &mut self,
        session: &SessionController<P>,
        raw: &Self::Raw,
        normalizer: &Normalizer,
    ) -> Captured<Self::Ack>;
}
