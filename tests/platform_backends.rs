//! Bridges wired to the wake-lock and audio-session backends over fake host
//! services.

use safewalk_bridge::backends::audio_session::{AudioSessionProvider, AudioSessionService};
use safewalk_bridge::backends::virtual_command_center::VirtualCommandCenter;
use safewalk_bridge::backends::wake_lock::{PowerService, WakeLock, WakeLockProvider};
use safewalk_bridge::{
    BridgeConfig, HostResult, KeyCode, KeyDispatch, KeyEvent, Lifecycle, MethodResponse,
    RemoteCommandBridge, VolumeKeyBridge,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Default)]
struct PowerState {
    held: bool,
    tag: Option<String>,
    timeout: Option<Duration>,
}

struct FakeWakeLock(Arc<Mutex<PowerState>>);

impl WakeLock for FakeWakeLock {
    fn acquire(&mut self, timeout: Duration) -> HostResult<()> {
        let mut state = self.0.lock().unwrap();
        state.held = true;
        state.timeout = Some(timeout);
        Ok(())
    }

    fn is_held(&self) -> bool {
        self.0.lock().unwrap().held
    }

    fn release(&mut self) -> HostResult<()> {
        self.0.lock().unwrap().held = false;
        Ok(())
    }
}

struct FakePower(Arc<Mutex<PowerState>>);

impl PowerService for FakePower {
    type WakeLock = FakeWakeLock;

    fn new_partial_wake_lock(&mut self, tag: &str) -> HostResult<FakeWakeLock> {
        self.0.lock().unwrap().tag = Some(tag.to_string());
        Ok(FakeWakeLock(Arc::clone(&self.0)))
    }
}

#[test]
fn wake_lock_follows_session() {
    let config = BridgeConfig::from_toml_str(
        r#"
        lease_tag = "Test::PanicLock"
        lease_max_hold_ms = 120000
        "#,
    )
    .unwrap();
    let power = Arc::new(Mutex::new(PowerState::default()));
    let provider = WakeLockProvider::new(FakePower(Arc::clone(&power)), config.lease_tag.clone());
    let mut bridge = VolumeKeyBridge::volume_keys(&config, provider);

    assert_eq!(bridge.handle_method_call("startListening"), MethodResponse::Success(true));
    {
        let state = power.lock().unwrap();
        assert!(state.held);
        assert_eq!(state.tag.as_deref(), Some("Test::PanicLock"));
        assert_eq!(state.timeout, Some(Duration::from_secs(120)));
    }

    bridge.on_lifecycle(Lifecycle::Pause);
    assert!(power.lock().unwrap().held);
    assert_eq!(
        bridge.dispatch_key_event(KeyEvent::down(KeyCode::VolumeUp)),
        KeyDispatch::Consumed
    );

    bridge.on_lifecycle(Lifecycle::Destroy);
    assert!(!power.lock().unwrap().held);
}

#[derive(Default)]
struct AudioState {
    active: bool,
    receiving: bool,
    refuse_activation: bool,
}

#[derive(Clone, Default)]
struct FakeAudio(Arc<Mutex<AudioState>>);

impl AudioSessionService for FakeAudio {
    fn set_playback_category(&mut self, _mix_with_others: bool) -> HostResult<()> {
        Ok(())
    }

    fn set_active(&mut self, active: bool) -> HostResult<()> {
        let mut state = self.0.lock().unwrap();
        if active && state.refuse_activation {
            return Err("interrupted by a phone call".into());
        }
        state.active = active;
        Ok(())
    }

    fn is_active(&self) -> bool {
        self.0.lock().unwrap().active
    }

    fn begin_receiving_remote_control_events(&mut self) {
        self.0.lock().unwrap().receiving = true;
    }

    fn end_receiving_remote_control_events(&mut self) {
        self.0.lock().unwrap().receiving = false;
    }

    fn become_first_responder(&mut self) -> bool {
        false
    }

    fn resign_first_responder(&mut self) -> bool {
        false
    }
}

#[test]
fn audio_session_follows_session() {
    let config = BridgeConfig::for_media_commands();
    let audio = FakeAudio::default();
    let center = VirtualCommandCenter::new();
    let mut bridge = RemoteCommandBridge::remote_commands(
        &config,
        AudioSessionProvider::new(audio.clone(), config.mix_with_others),
        center.clone(),
    );

    assert!(bridge.start_listening());
    assert!(audio.is_active());
    assert!(audio.0.lock().unwrap().receiving);
    assert!(!center.registered().is_empty());

    assert!(bridge.stop_listening());
    assert!(!audio.is_active());
    assert!(!audio.0.lock().unwrap().receiving);
    assert!(center.registered().is_empty());
}

#[test]
fn interrupted_audio_session_still_stops_remote_control() {
    let config = BridgeConfig::for_media_commands();
    let audio = FakeAudio::default();
    let mut bridge = RemoteCommandBridge::remote_commands(
        &config,
        AudioSessionProvider::new(audio.clone(), config.mix_with_others),
        VirtualCommandCenter::new(),
    );

    assert!(bridge.start_listening());
    // A phone call deactivates the shared session.
    audio.0.lock().unwrap().active = false;
    assert!(!bridge.snapshot().lease_held);

    assert!(bridge.stop_listening());
    assert!(!audio.0.lock().unwrap().receiving);
}

#[test]
fn interrupted_audio_session_is_cleaned_up_on_destroy() {
    let config = BridgeConfig::for_media_commands();
    let audio = FakeAudio::default();
    let mut bridge = RemoteCommandBridge::remote_commands(
        &config,
        AudioSessionProvider::new(audio.clone(), config.mix_with_others),
        VirtualCommandCenter::new(),
    );

    assert!(bridge.start_listening());
    audio.0.lock().unwrap().active = false;
    bridge.on_lifecycle(Lifecycle::Destroy);
    assert!(!audio.0.lock().unwrap().receiving);
    assert!(!bridge.is_listening());
}

#[test]
fn refused_audio_session_can_be_retried() {
    let config = BridgeConfig::for_media_commands();
    let audio = FakeAudio::default();
    audio.0.lock().unwrap().refuse_activation = true;
    let mut bridge = RemoteCommandBridge::remote_commands(
        &config,
        AudioSessionProvider::new(audio.clone(), true),
        VirtualCommandCenter::new(),
    );

    assert_eq!(bridge.handle_method_call("startListening"), MethodResponse::Success(false));
    assert!(!bridge.is_listening());
    assert!(!audio.0.lock().unwrap().receiving);

    audio.0.lock().unwrap().refuse_activation = false;
    assert_eq!(bridge.handle_method_call("startListening"), MethodResponse::Success(true));
    assert!(bridge.is_listening());
}
