//! Open-script sessions and the active selection.
//!
//! All mutation goes through [`SessionStore::apply`] (local actions) or
//! [`SessionStore::reconcile`] (service snapshots), so the active key always
//! names an existing session and local edits only ever land on it.

use std::collections::BTreeMap;

use shared::domain::{Script, ScriptPath};
use tracing::debug;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptSession {
    pub file: ScriptPath,
    pub code: String,
    /// False while a local edit has not been echoed back by the service.
    pub synced: bool,
}

impl ScriptSession {
    fn confirmed(script: Script) -> Self {
        Self {
            file: script.file,
            code: script.code,
            synced: true,
        }
    }

    pub fn display_name(&self) -> &str {
        self.file.file_name()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionAction {
    /// The service confirmed the script is open, with its current content.
    Opened(Script),
    Select(ScriptPath),
    Edit { file: ScriptPath, code: String },
    /// The service no longer holds the script.
    Closed(ScriptPath),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionChange {
    Inserted(ScriptPath),
    /// Remote content replaced the local buffer.
    Refreshed(ScriptPath),
    /// Local unsynced edits were kept over the remote content.
    KeptLocal(ScriptPath),
    Selected(ScriptPath),
    Edited(ScriptPath),
    Removed(ScriptPath),
    Unchanged,
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: BTreeMap<ScriptPath, ScriptSession>,
    active: Option<ScriptPath>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, action: SessionAction) -> ClientResult<SessionChange> {
        match action {
            SessionAction::Opened(script) => Ok(self.merge_remote(script)),
            SessionAction::Select(file) => {
                if !self.sessions.contains_key(&file) {
                    return Err(ClientError::UnknownSession(file));
                }
                self.active = Some(file.clone());
                Ok(SessionChange::Selected(file))
            }
            SessionAction::Edit { file, code } => {
                match &self.active {
                    None => return Err(ClientError::NoActiveSession),
                    Some(active) if *active != file => {
                        return Err(ClientError::InactiveSession {
                            requested: file,
                            active: Some(active.clone()),
                        });
                    }
                    Some(_) => {}
                }
                let session = self
                    .sessions
                    .get_mut(&file)
                    .ok_or_else(|| ClientError::UnknownSession(file.clone()))?;
                if session.code != code {
                    session.code = code;
                    session.synced = false;
                }
                Ok(SessionChange::Edited(file))
            }
            SessionAction::Closed(file) => {
                if self.sessions.remove(&file).is_none() {
                    return Ok(SessionChange::Unchanged);
                }
                if self.active.as_ref() == Some(&file) {
                    self.active = None;
                }
                Ok(SessionChange::Removed(file))
            }
        }
    }

    /// Brings the store in line with the service's full set of open scripts.
    ///
    /// Sessions missing from `remote` are closed. When nothing is active the
    /// first newly opened script becomes active.
    pub fn reconcile(&mut self, remote: Vec<Script>) -> Vec<SessionChange> {
        self.reconcile_retaining(remote, &[])
    }

    /// Like [`SessionStore::reconcile`], but sessions named in `retain` are
    /// left alone even when absent from `remote`.
    pub fn reconcile_retaining(
        &mut self,
        remote: Vec<Script>,
        retain: &[ScriptPath],
    ) -> Vec<SessionChange> {
        let mut changes = Vec::new();

        let remote_keys: Vec<ScriptPath> = remote.iter().map(|s| s.file.clone()).collect();
        let stale: Vec<ScriptPath> = self
            .sessions
            .keys()
            .filter(|key| !remote_keys.contains(key) && !retain.contains(key))
            .cloned()
            .collect();
        for file in stale {
            changes.push(self.remove(file));
        }

        let mut first_inserted = None;
        for script in remote {
            let change = self.merge_remote(script);
            if let SessionChange::Inserted(file) = &change {
                first_inserted.get_or_insert_with(|| file.clone());
            }
            if change != SessionChange::Unchanged {
                changes.push(change);
            }
        }

        if self.active.is_none() {
            if let Some(file) = first_inserted {
                self.active = Some(file.clone());
                changes.push(SessionChange::Selected(file));
            }
        }

        changes
    }

    fn remove(&mut self, file: ScriptPath) -> SessionChange {
        self.sessions.remove(&file);
        if self.active.as_ref() == Some(&file) {
            self.active = None;
        }
        SessionChange::Removed(file)
    }

    fn merge_remote(&mut self, script: Script) -> SessionChange {
        let Some(session) = self.sessions.get_mut(&script.file) else {
            let file = script.file.clone();
            self.sessions
                .insert(file.clone(), ScriptSession::confirmed(script));
            return SessionChange::Inserted(file);
        };

        if session.code == script.code {
            if session.synced {
                return SessionChange::Unchanged;
            }
            session.synced = true;
            return SessionChange::Refreshed(script.file);
        }

        if !session.synced {
            debug!(file = %script.file, "keeping unsynced local edits over service snapshot");
            return SessionChange::KeptLocal(script.file);
        }

        session.code = script.code;
        SessionChange::Refreshed(script.file)
    }

    pub fn get(&self, file: &ScriptPath) -> Option<&ScriptSession> {
        self.sessions.get(file)
    }

    pub fn active_key(&self) -> Option<&ScriptPath> {
        self.active.as_ref()
    }

    pub fn active(&self) -> Option<&ScriptSession> {
        self.active.as_ref().and_then(|file| self.sessions.get(file))
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScriptSession> {
        self.sessions.values()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
