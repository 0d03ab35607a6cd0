//! The assembled panic-button bridge.
//!
//! A [`Bridge`] owns one [`SessionController`], one input adapter and one
//! [`BridgeChannel`]. The host drives it from its main thread:
//! 1. inbound method calls go to [`Bridge::handle_method_call`],
//! 2. raw input goes to [`Bridge::handle_input`] (or the variant helpers
//!    [`Bridge::dispatch_key_event`], [`Bridge::handle_remote_command`],
//!    [`Bridge::remote_control_received`]),
//! 3. lifecycle transitions go to [`Bridge::on_lifecycle`].
//!
//! No error escapes to the host: failed starts answer `false`, events that
//! cannot be delivered are logged and dropped.
//!
//! # Example
//! ```
//! use safewalk_bridge::backends::virtual_resource::VirtualResource;
//! use safewalk_bridge::{BridgeConfig, KeyCode, KeyDispatch, KeyEvent, MethodResponse, VolumeKeyBridge};
//!
//! let mut bridge = VolumeKeyBridge::volume_keys(&BridgeConfig::default(), VirtualResource::new("demo"));
//! assert_eq!(bridge.handle_method_call("startListening"), MethodResponse::Success(true));
//! assert_eq!(bridge.dispatch_key_event(KeyEvent::down(KeyCode::VolumeUp)), KeyDispatch::Consumed);
//! ```

use crate::capture::{
    CommandCenter, CommandStatus, InputCapture, KeyDispatch, KeyEventCapture,
    RemoteCommandCapture, RemoteInput,
};
use crate::channel::{BridgeChannel, MainThreadExecutor, MethodCall, MethodResponse, MethodTransport};
use crate::clock::Clock;
use crate::config::BridgeConfig;
use crate::error::BridgeError;
use crate::event::{KeyEvent, NormalizedEvent, RemoteCommandEvent, RemoteControlSubtype};
use crate::eventbus::ButtonEventBus;
use crate::normalizer::Normalizer;
use crate::resource::ResourceProvider;
use crate::session::{Lifecycle, SessionController};
use crate::snapshot::BridgeSnapshot;
use std::sync::Arc;
use tracing::{debug, error};

pub struct Bridge<P: ResourceProvider, I: InputCapture> {
    session: SessionController<P>,
    capture: I,
    channel: BridgeChannel,
    normalizer: Normalizer,
    events_emitted: u64,
}

/// Hardware volume keys, wake lock lease.
pub type VolumeKeyBridge<P> = Bridge<P, KeyEventCapture>;

/// Media remote commands, audio session lease.
pub type RemoteCommandBridge<P, C> = Bridge<P, RemoteCommandCapture<C>>;

impl<P: ResourceProvider, I: InputCapture> Bridge<P, I> {
    pub fn new(config: &BridgeConfig, provider: P, capture: I) -> Self {
        Self {
            session: SessionController::new(provider, config.lease_max_hold()),
            capture,
            channel: BridgeChannel::new(config.channel_name.clone(), config.event_method.clone()),
            normalizer: Normalizer::default(),
            events_emitted: 0,
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.normalizer = Normalizer::new(clock);
        self
    }

    pub fn with_executor(mut self, executor: Arc<dyn MainThreadExecutor>) -> Self {
        self.channel.set_executor(executor);
        self
    }

    pub fn attach_transport(&mut self, transport: Arc<dyn MethodTransport>) {
        self.channel.attach(transport);
    }

    pub fn listeners(&mut self) -> &mut ButtonEventBus {
        self.channel.bus_mut()
    }

    pub fn is_listening(&self) -> bool {
        self.session.is_listening()
    }

    pub fn session(&self) -> &SessionController<P> {
        &self.session
    }

    pub fn capture(&self) -> &I {
        &self.capture
    }

    /// Answers one inbound call from the host.
    pub fn handle_method_call(&mut self, method: &str) -> MethodResponse {
        debug!(method, "method call received");
        match MethodCall::parse(method) {
            Ok(MethodCall::StartListening) => MethodResponse::Success(self.start_listening()),
            Ok(MethodCall::StopListening) => MethodResponse::Success(self.stop_listening()),
            Err(e) => {
                debug!(error = %e, "answering not implemented");
                MethodResponse::NotImplemented
            }
        }
    }

    /// `true` if listening afterwards, including when it already was.
    pub fn start_listening(&mut self) -> bool {
        if !self.session.start_listening() {
            return false;
        }
        self.capture.activate();
        true
    }

    /// `false` if nothing was listening.
    pub fn stop_listening(&mut self) -> bool {
        if !self.session.is_listening() {
            return self.session.stop_listening();
        }
        self.capture.deactivate();
        self.session.stop_listening()
    }

    pub fn on_lifecycle(&mut self, event: Lifecycle) {
        if event == Lifecycle::Destroy && self.session.is_listening() {
            self.capture.deactivate();
        }
        self.session.on_lifecycle(event);
    }

    /// Feeds one raw input through the adapter and relays the result.
    pub fn handle_input(&mut self, raw: &I::Raw) -> I::Ack {
        let captured = self.capture.capture(&self.session, raw, &self.normalizer);
        if let Some(event) = captured.event {
            self.emit(&event);
        }
        captured.ack
    }

    fn emit(&mut self, event: &NormalizedEvent) {
        match self.channel.send(event) {
            Ok(()) => self.events_emitted += 1,
            Err(BridgeError::ChannelNotInitialized) => {
                error!(action = %event.action, "method channel not initialized, cannot send panic event");
            }
            Err(e) => {
                error!(action = %event.action, error = %e, "failed to send panic event");
            }
        }
    }

    pub fn snapshot(&self) -> BridgeSnapshot {
        let status = self.session.status();
        BridgeSnapshot {
            platform: self.capture.platform(),
            channel: self.channel.name().to_string(),
            listening: status.listening,
            lease_held: status.lease_held,
            channel_initialized: self.channel.is_initialized(),
            events_emitted: self.events_emitted,
        }
    }
}

impl<P: ResourceProvider> Bridge<P, KeyEventCapture> {
    pub fn volume_keys(config: &BridgeConfig, provider: P) -> Self {
        Self::new(config, provider, KeyEventCapture::new())
    }

    /// Call for every key event before the host's default handling.
    /// `Consumed` means the host must not run its default behavior.
    pub fn dispatch_key_event(&mut self, event: KeyEvent) -> KeyDispatch {
        self.handle_input(&event)
    }
}

impl<P: ResourceProvider, C: CommandCenter> Bridge<P, RemoteCommandCapture<C>> {
    pub fn remote_commands(config: &BridgeConfig, provider: P, center: C) -> Self {
        Self::new(config, provider, RemoteCommandCapture::new(center))
    }

    /// Target body for every registered remote command.
    pub fn handle_remote_command(&mut self, event: RemoteCommandEvent) -> CommandStatus {
        self.handle_input(&RemoteInput::Command(event))
    }

    pub fn remote_control_received(&mut self, subtype: RemoteControlSubtype) -> CommandStatus {
        self.handle_input(&RemoteInput::RemoteControl(subtype))
    }
}

impl<P: ResourceProvider, I: InputCapture> Drop for Bridge<P, I> {
    fn drop(&mut self) {
        if self.session.is_listening() {
            self.capture.deactivate();
        }
        // SessionController releases the lease on its own drop.
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::virtual_command_center::VirtualCommandCenter;
    use crate::backends::virtual_resource::VirtualResource;
    use crate::clock::ManualClock;
    use crate::event::{ActionKind, KeyCode, RemoteCommand};
    use crate::resource::HostResult;
    use std::sync::Mutex;

    #[derive(Default)]
    struct Recorder {
        events: Mutex<Vec<serde_json::Value>>,
    }

    impl MethodTransport for Recorder {
        fn invoke_method(&self, _method: &str, arguments: serde_json::Value) -> HostResult<()> {
            self.events.lock().unwrap().push(arguments);
            Ok(())
        }
    }

    fn key_bridge() -> (VolumeKeyBridge<VirtualResource>, VirtualResource, Arc<Recorder>) {
        let resource = VirtualResource::new("wake_lock");
        let recorder = Arc::new(Recorder::default());
        let mut bridge = VolumeKeyBridge::volume_keys(&BridgeConfig::default(), resource.clone())
            .with_clock(Arc::new(ManualClock::new(1_000)));
        bridge.attach_transport(recorder.clone());
        (bridge, resource, recorder)
    }

    #[test]
    fn unknown_method_is_not_implemented() {
        let (mut bridge, resource, _) = key_bridge();
        assert_eq!(bridge.handle_method_call("vibrate"), MethodResponse::NotImplemented);
        assert!(!bridge.is_listening());
        assert_eq!(resource.acquire_count(), 0);
    }

    #[test]
    fn start_is_idempotent_success() {
        let (mut bridge, resource, _) = key_bridge();
        assert_eq!(bridge.handle_method_call("startListening"), MethodResponse::Success(true));
        assert_eq!(bridge.handle_method_call("startListening"), MethodResponse::Success(true));
        assert_eq!(resource.acquire_count(), 1);
    }

    #[test]
    fn failed_start_reports_false() {
        let (mut bridge, resource, _) = key_bridge();
        resource.fail_next_acquire();
        assert_eq!(bridge.handle_method_call("startListening"), MethodResponse::Success(false));
        assert!(!bridge.is_listening());
    }

    #[test]
    fn consumed_key_reaches_transport() {
        let (mut bridge, _, recorder) = key_bridge();
        bridge.start_listening();

        assert_eq!(
            bridge.dispatch_key_event(KeyEvent::down(KeyCode::VolumeUp)),
            KeyDispatch::Consumed
        );
        assert_eq!(
            *recorder.events.lock().unwrap(),
            vec![serde_json::json!({ "action": "volume_up", "timestamp": 1_000 })]
        );
        assert_eq!(bridge.snapshot().events_emitted, 1);
    }

    #[test]
    fn missing_transport_drops_event_but_still_consumes() {
        let mut bridge =
            VolumeKeyBridge::volume_keys(&BridgeConfig::default(), VirtualResource::new("w"));
        bridge.start_listening();
        assert_eq!(
            bridge.dispatch_key_event(KeyEvent::down(KeyCode::VolumeDown)),
            KeyDispatch::Consumed
        );
        let snapshot = bridge.snapshot();
        assert!(!snapshot.channel_initialized);
        assert_eq!(snapshot.events_emitted, 0);
    }

    #[test]
    fn local_listeners_see_events() {
        let (mut bridge, _, _) = key_bridge();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        bridge.listeners().add_listener(
            move |e: &NormalizedEvent| sink.lock().unwrap().push(e.action),
            crate::eventbus::EventFilter::VolumeOnly,
        );

        bridge.start_listening();
        bridge.dispatch_key_event(KeyEvent::down(KeyCode::VolumeDown));
        assert_eq!(*seen.lock().unwrap(), vec![ActionKind::VolumeDown]);
    }

    #[test]
    fn media_stop_unregisters_before_release() {
        let resource = VirtualResource::new("audio_session");
        let center = VirtualCommandCenter::new();
        let mut bridge = RemoteCommandBridge::remote_commands(
            &BridgeConfig::for_media_commands(),
            resource.clone(),
            center.clone(),
        );

        assert!(bridge.start_listening());
        assert_eq!(center.registered().len(), RemoteCommand::ALL.len());

        assert!(bridge.stop_listening());
        assert!(center.registered().is_empty());
        assert!(!resource.is_held());
        assert!(!bridge.stop_listening());
    }

    #[test]
    fn failed_media_start_registers_nothing() {
        let resource = VirtualResource::new("audio_session");
        let center = VirtualCommandCenter::new();
        let mut bridge = RemoteCommandBridge::remote_commands(
            &BridgeConfig::for_media_commands(),
            resource.clone(),
            center.clone(),
        );
        resource.fail_next_acquire();

        assert!(!bridge.start_listening());
        assert!(center.registered().is_empty());
    }

    #[test]
    fn drop_cleans_up_everything() {
        let resource = VirtualResource::new("audio_session");
        let center = VirtualCommandCenter::new();
        {
            let mut bridge = RemoteCommandBridge::remote_commands(
                &BridgeConfig::for_media_commands(),
                resource.clone(),
                center.clone(),
            );
            assert!(bridge.start_listening());
        }
        assert!(center.registered().is_empty());
        assert!(!resource.is_held());
    }
}
