//! Partial wake lock lease for the key-event variant.
//!
//! The host supplies a [`PowerService`] (on Android, a thin wrapper over
//! `PowerManager`). Each acquisition creates a fresh partial wake lock tagged
//! with the configured tag and holds it with a timeout, so the OS drops it on
//! its own if the session outlives the maximum hold.

use crate::error::{BridgeError, Result};
use crate::resource::{HostResult, Lease, ResourceProvider};
use std::time::Duration;
use tracing::debug;

/// One OS wake lock object.
pub trait WakeLock {
    fn acquire(&mut self, timeout: Duration) -> HostResult<()>;
    fn is_held(&self) -> bool;
    fn release(&mut self) -> HostResult<()>;
}

/// Factory for wake locks.
pub trait PowerService {
    type WakeLock: WakeLock;

    fn new_partial_wake_lock(&mut self, tag: &str) -> HostResult<Self::WakeLock>;
}

pub struct WakeLockProvider<S: PowerService> {
    service: S,
    tag: String,
}

impl<S: PowerService> WakeLockProvider<S> {
    pub fn new(service: S, tag: impl Into<String>) -> Self {
        Self {
            service,
            tag: tag.into(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }
}

impl<S: PowerService> ResourceProvider for WakeLockProvider<S> {
    type Lease = WakeLockLease<S::WakeLock>;

    fn acquire(&mut self, max_hold: Duration) -> Result<Self::Lease> {
        let mut lock = self
            .service
            .new_partial_wake_lock(&self.tag)
            .map_err(|e| BridgeError::ResourceAcquisition(e.to_string()))?;
        lock.acquire(max_hold)
            .map_err(|e| BridgeError::ResourceAcquisition(e.to_string()))?;
        debug!(tag = %self.tag, "wake lock acquired for panic button monitoring");
        Ok(WakeLockLease { lock })
    }

    fn name(&self) -> &str {
        "wake_lock"
    }
}

pub struct WakeLockLease<W: WakeLock> {
    lock: W,
}

impl<W: WakeLock> Lease for WakeLockLease<W> {
    fn is_held(&self) -> bool {
        self.lock.is_held()
    }

    fn release(mut self) -> Result<()> {
        if !self.lock.is_held() {
            debug!("wake lock already timed out");
            return Ok(());
        }
        self.lock
            .release()
            .map_err(|e| BridgeError::ResourceRelease(e.to_string()))
    }
}
