//! Diagnostic snapshot of a bridge.
//!
//! [`BridgeSnapshot`] is an owned, serializable view produced by
//! [`Bridge::snapshot`](crate::bridge::Bridge::snapshot). It does not poll
//! anything; it reflects the bridge's state at the moment it was taken.

use crate::event::Platform;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSnapshot {
    pub platform: Platform,
    pub channel: String,
    pub listening: bool,
    /// `false` while listening means the OS let the lease lapse.
    pub lease_held: bool,
    pub channel_initialized: bool,
    /// Events handed to the host transport since the bridge was created.
    /// Events dropped for lack of a transport are not counted.
    pub events_emitted: u64,
}
