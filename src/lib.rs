//! SafeWalk bridge: panic-button detection for the host app.
//!
//! While a monitoring session is active the bridge intercepts hardware volume
//! keys (key-event variant) or media remote commands (media-command variant),
//! normalizes them to one [`ActionKind`] vocabulary and relays a timestamped
//! [`NormalizedEvent`] to the host over a method channel. It only detects and
//! relays; what the app does with a panic press is up to the app.

pub mod backends;
pub mod bridge;
pub mod capture;
pub mod channel;
pub mod clock;
pub mod config;
pub mod error;
pub mod event;
pub mod eventbus;
pub mod logger;
pub mod normalizer;
pub mod resource;
pub mod session;
pub mod snapshot;

pub use bridge::*;
pub use capture::{
    Captured, CommandCenter, CommandStatus, InputCapture, KeyDispatch, KeyEventCapture,
    RemoteCommandCapture, RemoteInput,
};
pub use channel::{
    BridgeChannel, InlineExecutor, MainThreadExecutor, MethodCall, MethodResponse,
    MethodTransport, QueuedExecutor,
};
pub use clock::*;
pub use config::BridgeConfig;
pub use error::{BridgeError, Result};
pub use event::*;
pub use eventbus::*;
pub use resource::*;
pub use session::*;
pub use snapshot::*;
