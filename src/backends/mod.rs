//! Platform backends for `safewalk-bridge`.
//!
//! Implementations of [`ResourceProvider`](crate::resource::ResourceProvider)
//! and [`CommandCenter`](crate::capture::CommandCenter) over host-supplied
//! platform services:
//! - [`wake_lock`]: partial wake lock for the key-event variant.
//! - [`audio_session`]: playback audio session plus remote-control reception
//!   for the media-command variant.
//!
//! The `virtual_*` backends keep everything in memory. They back the test
//! suite and let a host exercise the bridge without a device.

pub mod audio_session;
pub mod virtual_command_center;
pub mod virtual_resource;
pub mod wake_lock;
