use crate::error::{BridgeError, Result};
use crate::resource::{Lease, ResourceProvider};
use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Default)]
struct State {
    held: AtomicBool,
    acquires: AtomicUsize,
    releases: AtomicUsize,
    fail_next_acquire: AtomicBool,
    fail_release: AtomicBool,
    /// `u64::MAX` = never acquired.
    last_max_hold_ms: AtomicU64,
}

/// In-memory lease provider with `is_held` semantics and failure injection.
///
/// Clones share state, so a test can keep one handle while the session owns
/// another.
#[derive(Clone)]
pub struct VirtualResource {
    name: String,
    state: Arc<State>,
}

impl VirtualResource {
    pub fn new(name: &str) -> Self {
        let state = State::default();
        state.last_max_hold_ms.store(u64::MAX, Ordering::SeqCst);
        Self {
            name: name.to_string(),
            state: Arc::new(state),
        }
    }

    pub fn is_held(&self) -> bool {
        self.state.held.load(Ordering::SeqCst)
    }

    pub fn acquire_count(&self) -> usize {
        self.state.acquires.load(Ordering::SeqCst)
    }

    pub fn release_count(&self) -> usize {
        self.state.releases.load(Ordering::SeqCst)
    }

    pub fn last_max_hold(&self) -> Option<Duration> {
        match self.state.last_max_hold_ms.load(Ordering::SeqCst) {
            u64::MAX => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// The next `acquire` fails; later ones succeed again.
    pub fn fail_next_acquire(&self) {
        self.state.fail_next_acquire.store(true, Ordering::SeqCst);
    }

    pub fn set_fail_release(&self, fail: bool) {
        self.state.fail_release.store(fail, Ordering::SeqCst);
    }

    /// Simulates the OS revoking the lease after its maximum hold.
    pub fn expire(&self) {
        self.state.held.store(false, Ordering::SeqCst);
    }

    pub fn reset(&self) {
        self.state.held.store(false, Ordering::SeqCst);
        self.state.acquires.store(0, Ordering::SeqCst);
        self.state.releases.store(0, Ordering::SeqCst);
        self.state.fail_next_acquire.store(false, Ordering::SeqCst);
        self.state.fail_release.store(false, Ordering::SeqCst);
        self.state.last_max_hold_ms.store(u64::MAX, Ordering::SeqCst);
    }
}

impl ResourceProvider for VirtualResource {
    type Lease = VirtualLease;

    fn acquire(&mut self, max_hold: Duration) -> Result<VirtualLease> {
        if self.state.fail_next_acquire.swap(false, Ordering::SeqCst) {
            return Err(BridgeError::ResourceAcquisition(format!(
                "{}: injected failure",
                self.name
            )));
        }
        self.state.acquires.fetch_add(1, Ordering::SeqCst);
        self.state
            .last_max_hold_ms
            .store(max_hold.as_millis() as u64, Ordering::SeqCst);
        self.state.held.store(true, Ordering::SeqCst);
        Ok(VirtualLease {
            state: Arc::clone(&self.state),
        })
    }

    fn name(&self) -> &str {
        &self.name
    }
}

pub struct VirtualLease {
    state: Arc<State>,
}

impl Lease for VirtualLease {
    fn is_held(&self) -> bool {
        self.state.held.load(Ordering::SeqCst)
    }

    fn release(self) -> Result<()> {
        if !self.is_held() {
            return Ok(());
        }
        self.state.releases.fetch_add(1, Ordering::SeqCst);
        if self.state.fail_release.load(Ordering::SeqCst) {
            return Err(BridgeError::ResourceRelease("injected failure".into()));
        }
        self.state.held.store(false, Ordering::SeqCst);
        Ok(())
    }
}
