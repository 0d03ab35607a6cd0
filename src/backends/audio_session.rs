//! Audio session lease for the media-command variant.
//!
//! Remote commands only reach an app that owns an active playback audio
//! session and has asked for remote-control events. Acquiring the lease
//! configures and activates the shared session, starts remote-control
//! reception and makes the root view first responder; releasing undoes all of
//! it in reverse. An interruption can deactivate the session behind our back,
//! in which case only the deactivation is skipped.

use crate::error::{BridgeError, Result};
use crate::resource::{HostResult, Lease, ResourceProvider};
use std::time::Duration;
use tracing::{debug, warn};

/// Handle to the process-wide audio session and remote-control plumbing.
///
/// Implementations are cheap handles onto shared OS state; the provider
/// clones one into every lease it hands out.
pub trait AudioSessionService: Clone {
    fn set_playback_category(&mut self, mix_with_others: bool) -> HostResult<()>;
    fn set_active(&mut self, active: bool) -> HostResult<()>;
    fn is_active(&self) -> bool;
    fn begin_receiving_remote_control_events(&mut self);
    fn end_receiving_remote_control_events(&mut self);
    /// Returns `false` when there is no view to take first responder.
    fn become_first_responder(&mut self) -> bool;
    fn resign_first_responder(&mut self) -> bool;
}

pub struct AudioSessionProvider<S: AudioSessionService> {
    service: S,
    mix_with_others: bool,
}

impl<S: AudioSessionService> AudioSessionProvider<S> {
    pub fn new(service: S, mix_with_others: bool) -> Self {
        Self {
            service,
            mix_with_others,
        }
    }
}

impl<S: AudioSessionService> ResourceProvider for AudioSessionProvider<S> {
    type Lease = AudioSessionLease<S>;

    // An audio session has no hold limit of its own.
    fn acquire(&mut self, _max_hold: Duration) -> Result<Self::Lease> {
        let mut service = self.service.clone();
        service
            .set_playback_category(self.mix_with_others)
            .map_err(|e| BridgeError::ResourceAcquisition(format!("audio session category: {e}")))?;
        service
            .set_active(true)
            .map_err(|e| BridgeError::ResourceAcquisition(format!("audio session activation: {e}")))?;

        service.begin_receiving_remote_control_events();
        if !service.become_first_responder() {
            debug!("no root view to become first responder");
        }
        Ok(AudioSessionLease { service })
    }

    fn name(&self) -> &str {
        "audio_session"
    }
}

pub struct AudioSessionLease<S: AudioSessionService> {
    service: S,
}

impl<S: AudioSessionService> Lease for AudioSessionLease<S> {
    fn is_held(&self) -> bool {
        self.service.is_active()
    }

    fn release(mut self) -> Result<()> {
        self.service.end_receiving_remote_control_events();
        if !self.service.resign_first_responder() {
            debug!("no root view to resign first responder");
        }
        if !self.service.is_active() {
            debug!("audio session already inactive");
            return Ok(());
        }
        self.service.set_active(false).map_err(|e| {
            warn!(error = %e, "failed to deactivate audio session");
            BridgeError::ResourceRelease(e.to_string())
        })
    }
}
