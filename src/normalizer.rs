//! Raw action → canonical action mapping.
//!
//! The classification functions are pure and total over the raw inputs of
//! each platform. The two variants treat unknown input differently:
//! - key events with an unrecognized code classify to [`KeyClass::Unrecognized`]
//!   and are dropped,
//! - remote commands and remote-control subtypes always classify, falling
//!   back to [`ActionKind::UnknownRemoteControl`].
//!
//! [`Normalizer`] adds the timestamp and produces the [`NormalizedEvent`].

use crate::clock::{Clock, SystemClock};
use crate::event::{
    ActionKind, CommandPayload, KeyCode, NormalizedEvent, RemoteCommand, RemoteCommandEvent,
    RemoteControlSubtype,
};
use std::sync::Arc;

/// Outcome of classifying a hardware key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    /// Forwarded as a panic action.
    Action(ActionKind),
    /// Detected, never forwarded.
    Power,
    /// Not ours; leave it to the OS.
    Unrecognized,
}

/// Classifies a hardware key code.
pub fn classify_key(code: KeyCode) -> KeyClass {
    match code {
        KeyCode::VolumeUp => KeyClass::Action(ActionKind::VolumeUp),
        KeyCode::VolumeDown => KeyClass::Action(ActionKind::VolumeDown),
        KeyCode::Power => KeyClass::Power,
        KeyCode::Other(_) => KeyClass::Unrecognized,
    }
}

/// Classifies one invocation of a remote command.
///
/// Like/dislike and the playback-rate command stand in for volume up/down on
/// headsets that have no dedicated volume command. A rate of exactly `1.0`
/// (or one that is not a number, or a payload of the wrong shape) carries no
/// direction and becomes `UnknownRemoteControl` rather than being dropped, so
/// every invocation of a registered command yields exactly one event.
pub fn classify_command(event: &RemoteCommandEvent) -> ActionKind {
    match event.command {
        RemoteCommand::Play => ActionKind::Play,
        RemoteCommand::Pause => ActionKind::Pause,
        RemoteCommand::TogglePlayPause => ActionKind::TogglePlayPause,
        RemoteCommand::NextTrack => ActionKind::NextTrack,
        RemoteCommand::PreviousTrack => ActionKind::PreviousTrack,
        RemoteCommand::SkipForward => ActionKind::SkipForward,
        RemoteCommand::SkipBackward => ActionKind::SkipBackward,
        RemoteCommand::Stop => ActionKind::Stop,
        RemoteCommand::Like => ActionKind::VolumeUp,
        RemoteCommand::Dislike => ActionKind::VolumeDown,
        RemoteCommand::ChangeRepeatMode => ActionKind::HeadsetHook,
        RemoteCommand::ChangePlaybackPosition => ActionKind::PlaybackPositionChange,
        RemoteCommand::ChangePlaybackRate => match event.payload {
            CommandPayload::Rate(rate) if rate > 1.0 => ActionKind::VolumeUp,
            CommandPayload::Rate(rate) if rate < 1.0 => ActionKind::VolumeDown,
            _ => ActionKind::UnknownRemoteControl,
        },
    }
}

/// Classifies a legacy remote-control subtype.
pub fn classify_remote_control(subtype: RemoteControlSubtype) -> ActionKind {
    match subtype {
        RemoteControlSubtype::Play => ActionKind::Play,
        RemoteControlSubtype::Pause => ActionKind::Pause,
        RemoteControlSubtype::TogglePlayPause => ActionKind::TogglePlayPause,
        RemoteControlSubtype::NextTrack => ActionKind::NextTrack,
        RemoteControlSubtype::PreviousTrack => ActionKind::PreviousTrack,
        RemoteControlSubtype::Stop => ActionKind::Stop,
        RemoteControlSubtype::BeginSeekingForward | RemoteControlSubtype::EndSeekingForward => {
            ActionKind::SkipForward
        }
        RemoteControlSubtype::BeginSeekingBackward | RemoteControlSubtype::EndSeekingBackward => {
            ActionKind::SkipBackward
        }
        RemoteControlSubtype::Other(_) => ActionKind::UnknownRemoteControl,
    }
}

/// Stamps classified actions with the current time.
#[derive(Clone)]
pub struct Normalizer {
    clock: Arc<dyn Clock>,
}

impl Normalizer {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }

    pub fn event(&self, action: ActionKind) -> NormalizedEvent {
        NormalizedEvent {
            action,
            timestamp: self.clock.now_millis(),
        }
    }

    pub fn normalize_command(&self, event: &RemoteCommandEvent) -> NormalizedEvent {
        self.event(classify_command(event))
    }

    pub fn normalize_remote_control(&self, subtype: RemoteControlSubtype) -> NormalizedEvent {
        self.event(classify_remote_control(subtype))
    }
}

impl Default for Normalizer {
    fn default() -> Self {
        Self::new(Arc::new(SystemClock))
    }
}

impl std::fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Normalizer").finish_non_exhaustive()
    }
}
