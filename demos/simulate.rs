use safewalk_bridge::backends::virtual_command_center::VirtualCommandCenter;
use safewalk_bridge::backends::virtual_resource::VirtualResource;
use safewalk_bridge::logger::LoggingListener;
use safewalk_bridge::{
    BridgeConfig, EventFilter, HostResult, KeyCode, KeyEvent, Lifecycle, MethodTransport,
    RemoteCommandBridge, RemoteCommandEvent, RemoteControlSubtype, VolumeKeyBridge,
};
use std::sync::Arc;

/// Prints what the host app would receive.
struct PrintHost;

impl MethodTransport for PrintHost {
    fn invoke_method(&self, method: &str, arguments: serde_json::Value) -> HostResult<()> {
        println!("host <- {method}({arguments})");
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("safewalk_bridge=debug")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };

    println!("== volume keys ==");
    let mut keys = VolumeKeyBridge::volume_keys(&config, VirtualResource::new("wake_lock"));
    keys.attach_transport(Arc::new(PrintHost));
    keys.listeners().add_listener(LoggingListener::new(), EventFilter::VolumeOnly);

    println!("startListening -> {:?}", keys.handle_method_call("startListening"));
    println!("volume down    -> {:?}", keys.dispatch_key_event(KeyEvent::down(KeyCode::VolumeDown)));
    println!("volume down up -> {:?}", keys.dispatch_key_event(KeyEvent::up(KeyCode::VolumeDown)));
    println!("power          -> {:?}", keys.dispatch_key_event(KeyEvent::down(KeyCode::Power)));
    keys.on_lifecycle(Lifecycle::Pause);
    println!("stopListening  -> {:?}", keys.handle_method_call("stopListening"));
    println!("volume up      -> {:?}", keys.dispatch_key_event(KeyEvent::down(KeyCode::VolumeUp)));
    println!("snapshot       -> {}", serde_json::to_string(&keys.snapshot())?);

    println!("== media commands ==");
    let mut media = RemoteCommandBridge::remote_commands(
        &BridgeConfig::for_media_commands(),
        VirtualResource::new("audio_session"),
        VirtualCommandCenter::new(),
    );
    media.attach_transport(Arc::new(PrintHost));

    println!("startListening -> {:?}", media.handle_method_call("startListening"));
    println!("rate 1.5       -> {:?}", media.handle_remote_command(RemoteCommandEvent::playback_rate(1.5)));
    println!("rate 0.5       -> {:?}", media.handle_remote_command(RemoteCommandEvent::playback_rate(0.5)));
    println!("subtype 99     -> {:?}", media.remote_control_received(RemoteControlSubtype::Other(99)));
    println!("getVolume      -> {:?}", media.handle_method_call("getVolume"));
    media.on_lifecycle(Lifecycle::Destroy);
    println!("snapshot       -> {}", serde_json::to_string(&media.snapshot())?);

    Ok(())
}
