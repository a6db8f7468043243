use shared::domain::ScriptPath;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("no open session for {0}")]
    UnknownSession(ScriptPath),
    #[error("session {requested} is not the active session{}", active_suffix(.active))]
    InactiveSession {
        requested: ScriptPath,
        active: Option<ScriptPath>,
    },
    #[error("no active session")]
    NoActiveSession,
    #[error("controller not started; subscriptions must be registered before commands")]
    NotStarted,
    #[error("message channel closed: {0}")]
    ChannelClosed(String),
}

fn active_suffix(active: &Option<ScriptPath>) -> String {
    match active {
        Some(path) => format!(" (active: {path})"),
        None => String::new(),
    }
}

pub type ClientResult<T> = Result<T, ClientError>;
