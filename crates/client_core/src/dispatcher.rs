//! Routes decoded service events into view state.

use shared::{
    domain::ScriptPath,
    protocol::{ServiceEvent, ServiceMessage, ServiceStatus},
};
use tracing::{debug, error, info};

use crate::{clients::ClientRegistry, log_buffer::LogBuffer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewUpdate {
    Refresh,
    Unchanged,
}

impl ViewUpdate {
    pub fn needs_refresh(self) -> bool {
        self == Self::Refresh
    }
}

/// Everything the dispatcher is allowed to touch.
#[derive(Debug, Clone, Default)]
pub struct ViewState {
    pub status: Option<ServiceStatus>,
    pub script_list: Vec<ScriptPath>,
    pub logs: LogBuffer,
    pub clients: ClientRegistry,
}

impl ViewState {
    pub fn with_log_capacity(capacity: usize) -> Self {
        Self {
            logs: LogBuffer::new(capacity),
            ..Self::default()
        }
    }
}

pub fn dispatch(view: &mut ViewState, event: ServiceEvent) -> ViewUpdate {
    debug!(method = event.method(), "dispatching service event");
    match event {
        ServiceEvent::State(status) => {
            view.status = Some(status);
            ViewUpdate::Refresh
        }
        ServiceEvent::StdOut(line) => {
            if view.logs.push(line) {
                ViewUpdate::Refresh
            } else {
                ViewUpdate::Unchanged
            }
        }
        ServiceEvent::ScriptList(scripts) => {
            debug!(count = scripts.len(), "script listing replaced");
            view.script_list = scripts;
            ViewUpdate::Refresh
        }
        ServiceEvent::Status(report) => {
            info!(level = %report.level, detail = ?report.detail, "service status");
            if report.is_error() {
                match report.message() {
                    Some(message) => {
                        view.logs.push(message);
                    }
                    None => debug!("error status without detail"),
                }
            }
            ViewUpdate::Refresh
        }
        ServiceEvent::Clients(ids) => {
            view.clients.replace(ids);
            ViewUpdate::Refresh
        }
    }
}

/// Decodes a raw inbound message, logging and dropping anything unrecognised.
pub fn decode(msg: ServiceMessage) -> Option<ServiceEvent> {
    match ServiceEvent::try_from(msg) {
        Ok(event) => Some(event),
        Err(err) => {
            error!(method = err.method(), error = %err, "dropping inbound message");
            None
        }
    }
}

/// Decodes and dispatches a raw message. Undecodable messages leave the view
/// untouched.
pub fn dispatch_message(view: &mut ViewState, msg: ServiceMessage) -> ViewUpdate {
    match decode(msg) {
        Some(event) => dispatch(view, event),
        None => ViewUpdate::Unchanged,
    }
}

#[cfg(test)]
#[path = "tests/dispatcher_tests.rs"]
mod tests;
