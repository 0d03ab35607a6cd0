//! Events and raw input descriptions.
//!
//! The bridge sees two kinds of raw input and reduces both to one canonical
//! [`NormalizedEvent`]:
//! - **Key events** ([`KeyEvent`]): a hardware key code plus a down/up phase,
//!   delivered by the host's key dispatch (volume rocker, power key).
//! - **Remote commands** ([`RemoteCommandEvent`], [`RemoteControlSubtype`]):
//!   media commands from a Bluetooth headset, lock screen or control center,
//!   optionally carrying a position or rate payload.
//!
//! Raw events are ephemeral: they are classified on arrival and never retained.
//!
//! ## Wire shape
//! A [`NormalizedEvent`] serializes to `{"action": "volume_up", "timestamp": 1700000000000}`
//! for both input variants. The timestamp is milliseconds since the Unix epoch.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical action vocabulary shared by both input variants.
///
/// The set is closed. `power` is deliberately absent: the power key is
/// detected but never forwarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    VolumeUp,
    VolumeDown,
    Play,
    Pause,
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    SkipForward,
    SkipBackward,
    Stop,
    HeadsetHook,
    PlaybackPositionChange,
    UnknownRemoteControl,
}

impl ActionKind {
    pub const ALL: [ActionKind; 13] = [
        ActionKind::VolumeUp,
        ActionKind::VolumeDown,
        ActionKind::Play,
        ActionKind::Pause,
        ActionKind::TogglePlayPause,
        ActionKind::NextTrack,
        ActionKind::PreviousTrack,
        ActionKind::SkipForward,
        ActionKind::SkipBackward,
        ActionKind::Stop,
        ActionKind::HeadsetHook,
        ActionKind::PlaybackPositionChange,
        ActionKind::UnknownRemoteControl,
    ];

    /// Wire name, identical to the serde representation.
    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::VolumeUp => "volume_up",
            ActionKind::VolumeDown => "volume_down",
            ActionKind::Play => "play",
            ActionKind::Pause => "pause",
            ActionKind::TogglePlayPause => "toggle_play_pause",
            ActionKind::NextTrack => "next_track",
            ActionKind::PreviousTrack => "previous_track",
            ActionKind::SkipForward => "skip_forward",
            ActionKind::SkipBackward => "skip_backward",
            ActionKind::Stop => "stop",
            ActionKind::HeadsetHook => "headset_hook",
            ActionKind::PlaybackPositionChange => "playback_position_change",
            ActionKind::UnknownRemoteControl => "unknown_remote_control",
        }
    }

    /// True for the two panic triggers.
    pub fn is_volume(self) -> bool {
        matches!(self, ActionKind::VolumeUp | ActionKind::VolumeDown)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical event relayed to the host application.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    pub action: ActionKind,
    /// Milliseconds since the Unix epoch.
    pub timestamp: i64,
}

/// Which adapter produced a raw action.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    /// Hardware key dispatch (volume rocker, power key).
    KeyEvents,
    /// Media remote-command dispatcher (headset, lock screen).
    MediaCommands,
}

/// Hardware key identity as reported by the host.
///
/// Only the keys the bridge cares about are named; everything else arrives as
/// [`KeyCode::Other`] with the platform's raw code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyCode {
    VolumeUp,
    VolumeDown,
    Power,
    Other(i32),
}

impl KeyCode {
    /// Maps a raw Android `KeyEvent` key code.
    pub fn from_android(code: i32) -> Self {
        match code {
            24 => KeyCode::VolumeUp,
            25 => KeyCode::VolumeDown,
            26 => KeyCode::Power,
            other => KeyCode::Other(other),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Up,
}

/// One raw key event from the host's key dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub phase: KeyPhase,
}

impl KeyEvent {
    pub fn down(code: KeyCode) -> Self {
        Self {
            code,
            phase: KeyPhase::Down,
        }
    }

    pub fn up(code: KeyCode) -> Self {
        Self {
            code,
            phase: KeyPhase::Up,
        }
    }
}

/// Named commands of the shared remote-command dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoteCommand {
    Play,
    Pause,
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    SkipForward,
    SkipBackward,
    Stop,
    Like,
    Dislike,
    ChangeRepeatMode,
    ChangePlaybackPosition,
    ChangePlaybackRate,
}

impl RemoteCommand {
    /// Every command the media variant registers a target for.
    pub const ALL: [RemoteCommand; 13] = [
        RemoteCommand::Play,
        RemoteCommand::Pause,
        RemoteCommand::TogglePlayPause,
        RemoteCommand::NextTrack,
        RemoteCommand::PreviousTrack,
        RemoteCommand::SkipForward,
        RemoteCommand::SkipBackward,
        RemoteCommand::Stop,
        RemoteCommand::Like,
        RemoteCommand::Dislike,
        RemoteCommand::ChangeRepeatMode,
        RemoteCommand::ChangePlaybackPosition,
        RemoteCommand::ChangePlaybackRate,
    ];
}

/// Optional payload attached to a remote command.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandPayload {
    None,
    /// Requested playback position in seconds.
    Position(f64),
    /// Requested playback rate (1.0 = normal speed).
    Rate(f32),
}

/// One invocation of a remote command by the dispatcher.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RemoteCommandEvent {
    pub command: RemoteCommand,
    pub payload: CommandPayload,
}

impl RemoteCommandEvent {
    pub fn new(command: RemoteCommand) -> Self {
        Self {
            command,
            payload: CommandPayload::None,
        }
    }

    pub fn playback_rate(rate: f32) -> Self {
        Self {
            command: RemoteCommand::ChangePlaybackRate,
            payload: CommandPayload::Rate(rate),
        }
    }

    pub fn playback_position(seconds: f64) -> Self {
        Self {
            command: RemoteCommand::ChangePlaybackPosition,
            payload: CommandPayload::Position(seconds),
        }
    }
}

/// Legacy remote-control event subtypes delivered to the first responder.
///
/// Values the bridge does not name arrive as [`RemoteControlSubtype::Other`]
/// with the raw subtype number.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemoteControlSubtype {
    Play,
    Pause,
    TogglePlayPause,
    NextTrack,
    PreviousTrack,
    Stop,
    BeginSeekingForward,
    EndSeekingForward,
    BeginSeekingBackward,
    EndSeekingBackward,
    Other(i32),
}
