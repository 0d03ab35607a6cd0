//! Duplex method channel to the host application.
//!
//! Inbound, the host calls `startListening` / `stopListening` by name
//! ([`MethodCall`]); anything else is answered with
//! [`MethodResponse::NotImplemented`]. Outbound, every emitted
//! [`NormalizedEvent`] is serialized to `{"action", "timestamp"}` and invoked on
//! the host's [`MethodTransport`] under the configured event method name.
//!
//! The host transport may only be called from the main thread, so each
//! outbound invocation is wrapped in a task and handed to a
//! [`MainThreadExecutor`]. [`InlineExecutor`] runs it on the spot (the caller
//! already is the main thread); [`QueuedExecutor`] parks it until the host
//! pumps [`QueuedExecutor::run_pending`] from its main loop.

use crate::error::{BridgeError, Result};
use crate::event::NormalizedEvent;
use crate::eventbus::ButtonEventBus;
use crate::resource::HostResult;
use serde::Serialize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, error};

pub const START_LISTENING: &str = "startListening";
pub const STOP_LISTENING: &str = "stopListening";

/// Supported inbound calls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MethodCall {
    StartListening,
    StopListening,
}

impl MethodCall {
    pub fn parse(name: &str) -> Result<Self> {
        match name {
            START_LISTENING => Ok(MethodCall::StartListening),
            STOP_LISTENING => Ok(MethodCall::StopListening),
            other => Err(BridgeError::UnrecognizedCommand(other.to_string())),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MethodCall::StartListening => START_LISTENING,
            MethodCall::StopListening => STOP_LISTENING,
        }
    }
}

/// Reply to an inbound call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MethodResponse {
    Success(bool),
    NotImplemented,
}

/// Host side of the channel (e.g. a platform method channel).
pub trait MethodTransport: Send + Sync {
    fn invoke_method(&self, method: &str, arguments: serde_json::Value) -> HostResult<()>;
}

pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Runs tasks on the host's main thread.
pub trait MainThreadExecutor: Send + Sync {
    fn execute(&self, task: Task);
}

/// Runs the task immediately on the calling thread.
#[derive(Clone, Copy, Debug, Default)]
pub struct InlineExecutor;

impl MainThreadExecutor for InlineExecutor {
    fn execute(&self, task: Task) {
        task()
    }
}

/// FIFO of tasks drained by the host's main loop. Clones share the queue.
#[derive(Clone, Default)]
pub struct QueuedExecutor {
    queue: Arc<Mutex<VecDeque<Task>>>,
}

impl QueuedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<Task>> {
        self.queue.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn pending(&self) -> usize {
        self.lock().len()
    }

    /// Runs every queued task in order. Must be called on the main thread.
    /// Tasks queued while draining run in the same pass.
    pub fn run_pending(&self) -> usize {
        let mut ran = 0;
        loop {
            // Lock is released before the task runs.
            let next = self.lock().pop_front();
            match next {
                Some(task) => {
                    task();
                    ran += 1;
                }
                None => return ran,
            }
        }
    }
}

impl MainThreadExecutor for QueuedExecutor {
    fn execute(&self, task: Task) {
        self.lock().push_back(task);
    }
}

pub struct BridgeChannel {
    name: String,
    event_method: String,
    transport: Option<Arc<dyn MethodTransport>>,
    executor: Arc<dyn MainThreadExecutor>,
    bus: ButtonEventBus,
}

impl BridgeChannel {
    pub fn new(name: impl Into<String>, event_method: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            event_method: event_method.into(),
            transport: None,
            executor: Arc::new(InlineExecutor),
            bus: ButtonEventBus::new(),
        }
    }

    pub fn with_executor(mut self, executor: Arc<dyn MainThreadExecutor>) -> Self {
        self.set_executor(executor);
        self
    }

    pub fn set_executor(&mut self, executor: Arc<dyn MainThreadExecutor>) {
        self.executor = executor;
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn event_method(&self) -> &str {
        &self.event_method
    }

    pub fn attach(&mut self, transport: Arc<dyn MethodTransport>) {
        debug!(channel = %self.name, "method channel attached");
        self.transport = Some(transport);
    }

    pub fn detach(&mut self) {
        self.transport = None;
    }

    pub fn is_initialized(&self) -> bool {
        self.transport.is_some()
    }

    pub fn bus_mut(&mut self) -> &mut ButtonEventBus {
        &mut self.bus
    }

    /// Fans the event out to local listeners and schedules the host
    /// invocation on the main thread.
    ///
    /// Fails with [`BridgeError::ChannelNotInitialized`] when no transport is
    /// attached. Transport failures happen later on the main thread and are
    /// only logged.
    pub fn send(&mut self, event: &NormalizedEvent) -> Result<()> {
        self.bus.emit(event);

        let transport = self
            .transport
            .clone()
            .ok_or(BridgeError::ChannelNotInitialized)?;
        let arguments =
            serde_json::to_value(event).map_err(|e| BridgeError::Transport(e.to_string()))?;
        let method = self.event_method.clone();
        let action = event.action;

        self.executor.execute(Box::new(move || {
            match transport.invoke_method(&method, arguments) {
                Ok(()) => debug!(action = %action, "panic event sent to host"),
                Err(e) => error!(action = %action, error = %e, "failed to send panic event to host"),
            }
        }));
        Ok(())
    }
}
