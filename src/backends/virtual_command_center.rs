use crate::capture::CommandCenter;
use crate::event::RemoteCommand;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Default)]
struct Registry {
    targets: HashMap<RemoteCommand, usize>,
    enabled: HashMap<RemoteCommand, bool>,
}

/// Recording stand-in for the platform command dispatcher.
///
/// Clones share the same registry.
#[derive(Clone, Default)]
pub struct VirtualCommandCenter {
    registry: Arc<Mutex<Registry>>,
}

impl VirtualCommandCenter {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.registry.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn has_target(&self, command: RemoteCommand) -> bool {
        self.target_count(command) > 0
    }

    pub fn target_count(&self, command: RemoteCommand) -> usize {
        self.lock().targets.get(&command).copied().unwrap_or(0)
    }

    pub fn is_enabled(&self, command: RemoteCommand) -> bool {
        self.lock().enabled.get(&command).copied().unwrap_or(false)
    }

    /// Commands that currently have at least one target.
    pub fn registered(&self) -> Vec<RemoteCommand> {
        let registry = self.lock();
        RemoteCommand::ALL
            .into_iter()
            .filter(|c| registry.targets.get(c).copied().unwrap_or(0) > 0)
            .collect()
    }
}

impl CommandCenter for VirtualCommandCenter {
    fn add_target(&mut self, command: RemoteCommand) {
        *self.lock().targets.entry(command).or_insert(0) += 1;
    }

    // Removes every target for the command.
    fn remove_target(&mut self, command: RemoteCommand) {
        self.lock().targets.remove(&command);
    }

    fn set_enabled(&mut self, command: RemoteCommand, enabled: bool) {
        self.lock().enabled.insert(command, enabled);
    }
}
