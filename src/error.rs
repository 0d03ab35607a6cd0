//! Error taxonomy for the bridge.
//!
//! None of these errors ever reach the host application as an exception. The
//! [`Bridge`](crate::bridge::Bridge) converts them to a `false` method result or
//! drops them after logging.

use thiserror::Error;

/// Everything that can go wrong inside the bridge.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// The wake lock / audio session could not be obtained.
    #[error("failed to acquire resource lease: {0}")]
    ResourceAcquisition(String),

    /// Releasing the lease failed. The session is cleared anyway.
    #[error("failed to release resource lease: {0}")]
    ResourceRelease(String),

    /// An event was emitted before a host transport was attached.
    #[error("method channel not initialized")]
    ChannelNotInitialized,

    /// The host transport rejected an outbound invocation.
    #[error("transport error: {0}")]
    Transport(String),

    /// Inbound method name outside the supported set.
    #[error("method not implemented: {0}")]
    UnrecognizedCommand(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, BridgeError>;
