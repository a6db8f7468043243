//! Script console controller: owns session, view and forwarding state and
//! applies user actions and service events to them one at a time.

use shared::{
    domain::ScriptPath,
    protocol::{ServiceEvent, ServiceMessage, Subscription},
};
use tracing::{info, warn};

use crate::{
    channel::MessageChannel,
    dispatcher::{decode, dispatch, ViewState, ViewUpdate},
    error::{ClientError, ClientResult},
    forwarder::CommandForwarder,
    log_buffer::DEFAULT_LOG_CAPACITY,
    session::{ScriptSession, SessionAction, SessionChange, SessionStore},
};

pub const DEFAULT_NEW_SCRIPT_TEMPLATE: &str = "# new awesome robot script\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControllerSettings {
    pub log_capacity: usize,
    pub new_script_template: String,
}

impl Default for ControllerSettings {
    fn default() -> Self {
        Self {
            log_capacity: DEFAULT_LOG_CAPACITY,
            new_script_template: DEFAULT_NEW_SCRIPT_TEMPLATE.to_string(),
        }
    }
}

pub struct ScriptController<C> {
    forwarder: CommandForwarder<C>,
    sessions: SessionStore,
    view: ViewState,
    settings: ControllerSettings,
    started: bool,
}

impl<C: MessageChannel> ScriptController<C> {
    pub fn new(channel: C, settings: ControllerSettings) -> Self {
        Self {
            forwarder: CommandForwarder::new(channel),
            sessions: SessionStore::new(),
            view: ViewState::with_log_capacity(settings.log_capacity),
            settings,
            started: false,
        }
    }

    /// Registers every subscription, then primes the script listing.
    pub fn start(&mut self) -> ClientResult<()> {
        if self.started {
            return Ok(());
        }
        for subscription in Subscription::STARTUP {
            self.forwarder.channel().subscribe(subscription)?;
        }
        self.started = true;
        info!("script console subscribed; requesting script list");
        self.forwarder.get_script_list()
    }

    pub fn is_started(&self) -> bool {
        self.started
    }

    fn commands(&self) -> ClientResult<&CommandForwarder<C>> {
        if self.started {
            Ok(&self.forwarder)
        } else {
            Err(ClientError::NotStarted)
        }
    }

    pub fn handle_message(&mut self, msg: ServiceMessage) -> ViewUpdate {
        match decode(msg) {
            Some(event) => self.handle_event(event),
            None => ViewUpdate::Unchanged,
        }
    }

    pub fn handle_event(&mut self, event: ServiceEvent) -> ViewUpdate {
        let snapshot = match &event {
            ServiceEvent::State(status) => Some(status.clone()),
            _ => None,
        };
        let update = dispatch(&mut self.view, event);

        if let Some(status) = snapshot {
            match status.opened_scripts() {
                Ok(Some(opened)) => {
                    let mut unreadable = Vec::with_capacity(opened.rejected.len());
                    for (file, err) in opened.rejected {
                        warn!(%file, error = %err, "skipping unreadable opened script");
                        unreadable.push(file);
                    }
                    for change in self.sessions.reconcile_retaining(opened.scripts, &unreadable) {
                        if let SessionChange::KeptLocal(file) = change {
                            warn!(%file, "service snapshot is behind local edits");
                        }
                    }
                }
                Ok(None) => {}
                Err(err) => warn!(error = %err, "ignoring malformed openedScripts"),
            }
            if let Some(logs) = status.logs() {
                self.view.logs.resync(logs);
            }
        }

        update
    }

    /// Refreshes the listing shown by the open dialog.
    pub fn request_script_list(&self) -> ClientResult<()> {
        self.commands()?.get_script_list()
    }

    /// The session appears once the service confirms it in an `onState`.
    pub fn open_script(&self, file: ScriptPath) -> ClientResult<()> {
        self.commands()?.open_script(file)
    }

    pub fn open_example_script(&self, service_type: &str) -> ClientResult<()> {
        self.commands()?.open_example_script(service_type)
    }

    pub fn add_script(&self, filename: &str) -> ClientResult<()> {
        self.commands()?
            .add_script(filename, self.settings.new_script_template.as_str())
    }

    pub fn select_active(&mut self, file: ScriptPath) -> ClientResult<ViewUpdate> {
        self.sessions.apply(SessionAction::Select(file))?;
        Ok(ViewUpdate::Refresh)
    }

    /// Applies an editor change to the active buffer and mirrors it to the
    /// service's in-memory copy.
    pub fn edit_active(&mut self, code: impl Into<String>) -> ClientResult<ViewUpdate> {
        if !self.started {
            return Err(ClientError::NotStarted);
        }
        let file = self
            .sessions
            .active_key()
            .cloned()
            .ok_or(ClientError::NoActiveSession)?;
        let code = code.into();
        self.sessions.apply(SessionAction::Edit {
            file: file.clone(),
            code: code.clone(),
        })?;
        self.forwarder.update_script(file, code)?;
        Ok(ViewUpdate::Refresh)
    }

    pub fn save_active(&self) -> ClientResult<()> {
        let forwarder = self.commands()?;
        let session = self.active_session()?;
        forwarder.save_script(session.file.clone(), session.code.as_str())
    }

    pub fn exec_active(&self) -> ClientResult<()> {
        let forwarder = self.commands()?;
        let session = self.active_session()?;
        forwarder.exec(session.code.as_str())
    }

    /// Removal happens when the service drops the script from its state.
    pub fn close_script(&self, file: ScriptPath) -> ClientResult<()> {
        self.commands()?.close_script(file)
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.commands()?.clear()
    }

    fn active_session(&self) -> ClientResult<&ScriptSession> {
        self.sessions.active().ok_or(ClientError::NoActiveSession)
    }

    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
