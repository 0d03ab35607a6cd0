//! The OS-level lease that keeps input flowing while the app is backgrounded.
//!
//! A [`ResourceProvider`] hands out a [`Lease`] (a partial wake lock, an active
//! audio session with remote-control reception, ...). The
//! [`SessionController`](crate::session::SessionController) owns at most one
//! lease at a time; holding one is what "listening" means.
//!
//! Platform implementations live in [`backends`](crate::backends). Host services
//! they drive report failures as [`HostError`]s, which the providers wrap into
//! [`BridgeError`](crate::error::BridgeError) variants.

use crate::error::Result;
use std::time::Duration;

/// Error type returned by host-supplied platform services.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

pub type HostResult<T> = std::result::Result<T, HostError>;

/// A held OS lease.
pub trait Lease {
    /// Whether the OS still considers the lease held. A lease can lapse on its
    /// own once its maximum hold duration runs out.
    fn is_held(&self) -> bool;

    /// Gives the lease back to the OS. Also called on a lapsed lease: the
    /// part that lapsed must be skipped, everything else torn down.
    fn release(self) -> Result<()>;
}

/// Source of leases for one platform.
pub trait ResourceProvider {
    type Lease: Lease;

    /// Acquires a fresh lease. `max_hold` is the upper bound after which the OS
    /// may revoke it; the bridge does not renew it.
    fn acquire(&mut self, max_hold: Duration) -> Result<Self::Lease>;

    /// Short name for logs.
    fn name(&self) -> &str;
}
