//! Media remote-command handling.
//!
//! On activation every [`RemoteCommand`] gets a target on the shared
//! [`CommandCenter`] and is enabled; on deactivation the targets are removed
//! and the commands disabled so the OS stops showing controls for a session
//! that is not running.
//!
//! Every handled command reports [`CommandStatus::Success`], otherwise the OS
//! may grey the command out. A command dispatched while not listening (a late
//! delivery after stop) is acknowledged but emits nothing.

use super::{Captured, InputCapture};
use crate::event::{Platform, RemoteCommand, RemoteCommandEvent, RemoteControlSubtype};
use crate::normalizer::Normalizer;
use crate::resource::ResourceProvider;
use crate::session::SessionController;
use tracing::debug;

/// Answer handed back to the command dispatcher.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CommandStatus {
    Success,
}

/// The platform's shared remote-command dispatcher.
pub trait CommandCenter {
    fn add_target(&mut self, command: RemoteCommand);
    fn remove_target(&mut self, command: RemoteCommand);
    fn set_enabled(&mut self, command: RemoteCommand, enabled: bool);
}

/// Raw input reaching the media variant.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RemoteInput {
    /// A command-center target fired.
    Command(RemoteCommandEvent),
    /// A legacy remote-control event reached the first responder.
    RemoteControl(RemoteControlSubtype),
}

impl From<RemoteCommandEvent> for RemoteInput {
    fn from(event: RemoteCommandEvent) -> Self {
        RemoteInput::Command(event)
    }
}

impl From<RemoteControlSubtype> for RemoteInput {
    fn from(subtype: RemoteControlSubtype) -> Self {
        RemoteInput::RemoteControl(subtype)
    }
}

pub struct RemoteCommandCapture<C: CommandCenter> {
    center: C,
    registered: bool,
}

impl<C: CommandCenter> RemoteCommandCapture<C> {
    pub fn new(center: C) -> Self {
        Self {
            center,
            registered: false,
        }
    }

    pub fn center(&self) -> &C {
        &self.center
    }

    pub fn is_registered(&self) -> bool {
        self.registered
    }
}

impl<C: CommandCenter> InputCapture for RemoteCommandCapture<C> {
    type Raw = RemoteInput;
    type Ack = CommandStatus;

    fn platform(&self) -> Platform {
        Platform::MediaCommands
    }

    fn activate(&mut self) {
        if self.registered {
            return;
        }
        for command in RemoteCommand::ALL {
            self.center.add_target(command);
        }
        for command in RemoteCommand::ALL {
            self.center.set_enabled(command, true);
        }
        self.registered = true;
        debug!(commands = RemoteCommand::ALL.len(), "remote command targets registered");
    }

    fn deactivate(&mut self) {
        if !self.registered {
            return;
        }
        for command in RemoteCommand::ALL {
            self.center.remove_target(command);
            self.center.set_enabled(command, false);
        }
        self.registered = false;
        debug!("remote command targets removed");
    }

    fn capture<P: ResourceProvider>(
        &mut self,
        session: &SessionController<P>,
        raw: &RemoteInput,
        normalizer: &Normalizer,
    ) -> Captured<CommandStatus> {
        if !session.is_listening() {
            debug!(input = ?raw, "ignoring remote command, not listening");
            return Captured::ignore(CommandStatus::Success);
        }

        let event = match raw {
            RemoteInput::Command(command) => normalizer.normalize_command(command),
            RemoteInput::RemoteControl(subtype) => {
                if let RemoteControlSubtype::Other(raw_subtype) = subtype {
                    debug!(raw_subtype, "unknown remote control event subtype");
                }
                normalizer.normalize_remote_control(*subtype)
            }
        };
        Captured::emit(event, CommandStatus::Success)
    }
}
