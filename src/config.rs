//! Bridge configuration, loaded from TOML.
//!
//! Every field has a default, so an empty document is a valid configuration:
//!
//! ```toml
//! channel_name = "com.echoless.the_meet_app/volume_buttons"
//! event_method = "onButtonPressed"
//! lease_tag = "SafeModuleButtons::PanicButtonWakeLock"
//! lease_max_hold_ms = 600000
//! mix_with_others = true
//! ```

use crate::error::{BridgeError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const KEY_EVENTS_CHANNEL: &str = "com.echoless.the_meet_app/volume_buttons";
pub const MEDIA_COMMANDS_CHANNEL: &str = "bluetooth_media_buttons";
pub const DEFAULT_EVENT_METHOD: &str = "onButtonPressed";
pub const DEFAULT_LEASE_TAG: &str = "SafeModuleButtons::PanicButtonWakeLock";
/// Ten minutes.
pub const DEFAULT_LEASE_MAX_HOLD_MS: u64 = 10 * 60 * 1000;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Name of the host method channel.
    pub channel_name: String,
    /// Outbound method invoked for every button event.
    pub event_method: String,
    /// Tag attached to the wake lock (key-event variant).
    pub lease_tag: String,
    /// Upper bound the OS may hold the lease for. Not renewed by the bridge.
    pub lease_max_hold_ms: u64,
    /// Let other apps keep playing audio while the session is active
    /// (media-command variant).
    pub mix_with_others: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            channel_name: KEY_EVENTS_CHANNEL.to_string(),
            event_method: DEFAULT_EVENT_METHOD.to_string(),
            lease_tag: DEFAULT_LEASE_TAG.to_string(),
            lease_max_hold_ms: DEFAULT_LEASE_MAX_HOLD_MS,
            mix_with_others: true,
        }
    }
}

impl BridgeConfig {
    /// Defaults for the media-command variant.
    pub fn for_media_commands() -> Self {
        Self {
            channel_name: MEDIA_COMMANDS_CHANNEL.to_string(),
            ..Self::default()
        }
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<()> {
        if self.channel_name.trim().is_empty() {
            return Err(BridgeError::Config("channel_name must not be empty".into()));
        }
        if self.event_method.trim().is_empty() {
            return Err(BridgeError::Config("event_method must not be empty".into()));
        }
        if self.lease_max_hold_ms == 0 {
            return Err(BridgeError::Config(
                "lease_max_hold_ms must be greater than zero".into(),
            ));
        }
        Ok(())
    }

    pub fn lease_max_hold(&self) -> Duration {
        Duration::from_millis(self.lease_max_hold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_is_default() {
        let config = BridgeConfig::from_toml_str("").unwrap();
        assert_eq!(config, BridgeConfig::default());
        assert_eq!(config.lease_max_hold(), Duration::from_secs(600));
    }

    #[test]
    fn partial_override() {
        let config = BridgeConfig::from_toml_str(
            r#"
            channel_name = "bluetooth_media_buttons"
            lease_max_hold_ms = 30000
            "#,
        )
        .unwrap();
        assert_eq!(config.channel_name, MEDIA_COMMANDS_CHANNEL);
        assert_eq!(config.event_method, DEFAULT_EVENT_METHOD);
        assert_eq!(config.lease_max_hold(), Duration::from_secs(30));
    }

    #[test]
    fn rejects_zero_hold() {
        let err = BridgeConfig::from_toml_str("lease_max_hold_ms = 0").unwrap_err();
        assert!(matches!(err, BridgeError::Config(_)));
    }

    #[test]
    fn rejects_malformed_toml() {
        let err = BridgeConfig::from_toml_str("lease_max_hold_ms = \"soon\"").unwrap_err();
        assert!(matches!(err, BridgeError::Toml(_)));
    }

    #[test]
    fn media_defaults() {
        let config = BridgeConfig::for_media_commands();
        assert_eq!(config.channel_name, MEDIA_COMMANDS_CHANNEL);
        assert!(config.mix_with_others);
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = BridgeConfig::load("/nonexistent/safewalk-bridge.toml").unwrap_err();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
