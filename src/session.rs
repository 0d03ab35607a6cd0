//! Listening state and lease lifecycle.
//!
//! [`SessionController`] is the single owner of the monitoring session. The
//! session is listening exactly when a lease is held, so the two can never
//! disagree. All calls are expected on the host's main thread; the controller
//! has no internal locking.

use crate::resource::{Lease, ResourceProvider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Host activity / view lifecycle transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Lifecycle {
    /// App moved to the background. Monitoring continues.
    Pause,
    /// App returned to the foreground.
    Resume,
    /// Activity or app is going away. The lease is released unconditionally.
    Destroy,
}

/// Point-in-time view of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionStatus {
    pub listening: bool,
    /// `false` while listening means the OS let the lease lapse.
    pub lease_held: bool,
}

pub struct SessionController<P: ResourceProvider> {
    provider: P,
    lease: Option<P::Lease>,
    max_hold: Duration,
}

impl<P: ResourceProvider> SessionController<P> {
    pub fn new(provider: P, max_hold: Duration) -> Self {
        Self {
            provider,
            lease: None,
            max_hold,
        }
    }

    pub fn is_listening(&self) -> bool {
        self.lease.is_some()
    }

    pub fn status(&self) -> SessionStatus {
        SessionStatus {
            listening: self.is_listening(),
            lease_held: self.lease.as_ref().is_some_and(Lease::is_held),
        }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Starts a monitoring session.
    ///
    /// Already listening: returns `true` without touching the lease.
    /// Acquisition failure: logged, returns `false`, stays stopped.
    pub fn start_listening(&mut self) -> bool {
        if self.lease.is_some() {
            debug!(resource = self.provider.name(), "already listening");
            return true;
        }

        match self.provider.acquire(self.max_hold) {
            Ok(lease) => {
                self.lease = Some(lease);
                info!(
                    resource = self.provider.name(),
                    max_hold_secs = self.max_hold.as_secs(),
                    "started listening for button presses"
                );
                true
            }
            Err(e) => {
                error!(resource = self.provider.name(), error = %e, "failed to start listening");
                false
            }
        }
    }

    /// Ends the session. Returns `false` if nothing was listening.
    pub fn stop_listening(&mut self) -> bool {
        match self.lease.take() {
            Some(lease) => {
                release(self.provider.name(), lease);
                info!(resource = self.provider.name(), "stopped listening for button presses");
                true
            }
            None => {
                debug!(resource = self.provider.name(), "stop requested while not listening");
                false
            }
        }
    }

    pub fn on_lifecycle(&mut self, event: Lifecycle) {
        match event {
            Lifecycle::Pause => {
                debug!(listening = self.is_listening(), "host paused, keeping monitoring active");
            }
            Lifecycle::Resume => {
                debug!(listening = self.is_listening(), "host resumed");
            }
            Lifecycle::Destroy => {
                self.teardown();
            }
        }
    }

    /// Releases any held lease regardless of how the session got here.
    /// Returns whether a lease was released.
    pub fn teardown(&mut self) -> bool {
        match self.lease.take() {
            Some(lease) => {
                release(self.provider.name(), lease);
                info!(resource = self.provider.name(), "session torn down, lease released");
                true
            }
            None => false,
        }
    }
}

impl<P: ResourceProvider> Drop for SessionController<P> {
    fn drop(&mut self) {
        self.teardown();
    }
}

/// Best effort: a failed release is logged. Lapsed leases are still handed to
/// [`Lease::release`] so the backend can undo whatever outlived the lapse.
fn release<L: Lease>(resource: &str, lease: L) {
    if !lease.is_held() {
        debug!(resource, "lease lapsed before release");
    }
    match lease.release() {
        Ok(()) => debug!(resource, "lease released"),
        Err(e) => warn!(resource, error = %e, "failed to release lease"),
    }
}
