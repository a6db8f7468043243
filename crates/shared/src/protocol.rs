//! Wire messages exchanged with the scripting service.
//!
//! Every frame is `{ "method": <name>, "data": [positional args...] }`. Inbound
//! frames are decoded into [`ServiceEvent`] at the edge so nothing past the
//! decoder ever matches on method strings.

use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    domain::{Script, ScriptPath},
    error::ProtocolError,
};

pub const ON_STATE: &str = "onState";
pub const ON_STD_OUT: &str = "onStdOut";
pub const ON_SCRIPT_LIST: &str = "onScriptList";
pub const ON_STATUS: &str = "onStatus";
pub const ON_CLIENTS: &str = "onClients";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceMessage {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub msg_id: Option<Uuid>,
    pub method: String,
    #[serde(default)]
    pub data: Vec<Value>,
}

impl ServiceMessage {
    pub fn new(method: impl Into<String>, data: Vec<Value>) -> Self {
        Self {
            msg_id: None,
            method: method.into(),
            data,
        }
    }
}

/// Service state snapshot. Kept opaque apart from the couple of keys the
/// console reconciles against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceStatus(pub Map<String, Value>);

impl ServiceStatus {
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    /// Scripts the service currently holds in memory, keyed by name on the wire.
    ///
    /// Entries are decoded one at a time; unreadable ones are returned in
    /// `rejected` rather than failing the whole snapshot.
    pub fn opened_scripts(&self) -> Result<Option<OpenedScripts>, serde_json::Error> {
        let Some(raw) = self.0.get("openedScripts") else {
            return Ok(None);
        };
        if raw.is_null() {
            return Ok(None);
        }

        let mut opened = OpenedScripts::default();
        for (name, entry) in Map::<String, Value>::deserialize(raw)? {
            match Script::deserialize(&entry) {
                Ok(script) => opened.scripts.push(script),
                Err(err) => opened.rejected.push((ScriptPath::new(name), err)),
            }
        }
        Ok(Some(opened))
    }

    /// Service-side log window, oldest entry first.
    pub fn logs(&self) -> Option<Vec<String>> {
        let entries = self.0.get("logs")?.as_array()?;
        Some(
            entries
                .iter()
                .filter_map(|entry| entry.as_str().map(str::to_string))
                .collect(),
        )
    }
}

#[derive(Debug, Default)]
pub struct OpenedScripts {
    pub scripts: Vec<Script>,
    pub rejected: Vec<(ScriptPath, serde_json::Error)>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl StatusReport {
    pub fn error(detail: impl Into<String>) -> Self {
        Self {
            level: "error".to_string(),
            detail: Some(detail.into()),
            key: None,
            name: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == "error"
    }

    /// Text shown to the user: the detail, falling back to the status key.
    pub fn message(&self) -> Option<&str> {
        self.detail.as_deref().or(self.key.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ServiceEvent {
    State(ServiceStatus),
    StdOut(String),
    ScriptList(Vec<ScriptPath>),
    Status(StatusReport),
    Clients(Vec<String>),
}

impl ServiceEvent {
    pub fn method(&self) -> &'static str {
        match self {
            Self::State(_) => ON_STATE,
            Self::StdOut(_) => ON_STD_OUT,
            Self::ScriptList(_) => ON_SCRIPT_LIST,
            Self::Status(_) => ON_STATUS,
            Self::Clients(_) => ON_CLIENTS,
        }
    }
}

fn first_arg<T: DeserializeOwned>(
    method: &'static str,
    data: Vec<Value>,
) -> Result<T, ProtocolError> {
    let value = data
        .into_iter()
        .next()
        .ok_or(ProtocolError::MissingPayload { method })?;
    serde_json::from_value(value).map_err(|source| ProtocolError::MalformedPayload { method, source })
}

/// Client replies arrive as a map keyed by client id; a plain id list is
/// accepted too.
fn client_ids(payload: Value) -> Result<Vec<String>, ProtocolError> {
    match payload {
        Value::Object(clients) => Ok(clients.into_iter().map(|(id, _)| id).collect()),
        other => serde_json::from_value(other).map_err(|source| ProtocolError::MalformedPayload {
            method: ON_CLIENTS,
            source,
        }),
    }
}

impl TryFrom<ServiceMessage> for ServiceEvent {
    type Error = ProtocolError;

    fn try_from(msg: ServiceMessage) -> Result<Self, Self::Error> {
        let ServiceMessage { method, data, .. } = msg;
        match method.as_str() {
            ON_STATE => first_arg(ON_STATE, data).map(Self::State),
            ON_STD_OUT => first_arg(ON_STD_OUT, data).map(Self::StdOut),
            ON_SCRIPT_LIST => first_arg(ON_SCRIPT_LIST, data).map(Self::ScriptList),
            ON_STATUS => first_arg(ON_STATUS, data).map(Self::Status),
            ON_CLIENTS => first_arg::<Value>(ON_CLIENTS, data)
                .and_then(client_ids)
                .map(Self::Clients),
            _ => Err(ProtocolError::UnknownMethod(method)),
        }
    }
}

/// Outbound requests. All are fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServiceCommand {
    GetScriptList,
    OpenScript { file: ScriptPath },
    OpenExampleScript { service_type: String },
    AddScript { filename: String, code: String },
    CloseScript { file: ScriptPath },
    UpdateScript { file: ScriptPath, code: String },
    SaveScript { file: ScriptPath, code: String },
    Exec { code: String },
    Clear,
}

impl ServiceCommand {
    pub fn method(&self) -> &'static str {
        match self {
            Self::GetScriptList => "getScriptList",
            Self::OpenScript { .. } => "openScript",
            Self::OpenExampleScript { .. } => "openExampleScript",
            Self::AddScript { .. } => "addScript",
            Self::CloseScript { .. } => "closeScript",
            Self::UpdateScript { .. } => "updateScript",
            Self::SaveScript { .. } => "saveScript",
            Self::Exec { .. } => "exec",
            Self::Clear => "clear",
        }
    }

    /// Encodes the command with its positional arguments and a fresh message id.
    pub fn into_message(self) -> ServiceMessage {
        let method = self.method();
        let data = match self {
            Self::GetScriptList | Self::Clear => Vec::new(),
            Self::OpenScript { file } | Self::CloseScript { file } => vec![Value::String(file.0)],
            Self::OpenExampleScript { service_type } => vec![Value::String(service_type)],
            Self::AddScript { filename, code } => {
                vec![Value::String(filename), Value::String(code)]
            }
            Self::UpdateScript { file, code } | Self::SaveScript { file, code } => {
                vec![Value::String(file.0), Value::String(code)]
            }
            Self::Exec { code } => vec![Value::String(code)],
        };

        ServiceMessage {
            msg_id: Some(Uuid::new_v4()),
            method: method.to_string(),
            data,
        }
    }
}

/// Registrations the console makes on the channel before issuing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subscription {
    PublishStdOut,
    GetClients,
    GetScriptList,
    /// Deliver every message addressed to this console.
    EventSink,
}

impl Subscription {
    /// Registration order required before the first command goes out.
    pub const STARTUP: [Subscription; 4] = [
        Subscription::PublishStdOut,
        Subscription::GetClients,
        Subscription::GetScriptList,
        Subscription::EventSink,
    ];

    pub fn topic(&self) -> Option<&'static str> {
        match self {
            Self::PublishStdOut => Some("publishStdOut"),
            Self::GetClients => Some("getClients"),
            Self::GetScriptList => Some("getScriptList"),
            Self::EventSink => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
