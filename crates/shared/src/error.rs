use thiserror::Error;

/// Failures turning a raw inbound message into a typed event.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("unhandled method {0}")]
    UnknownMethod(String),
    #[error("{method}: missing payload")]
    MissingPayload { method: &'static str },
    #[error("{method}: malformed payload: {source}")]
    MalformedPayload {
        method: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

impl ProtocolError {
    pub fn method(&self) -> &str {
        match self {
            Self::UnknownMethod(method) => method,
            Self::MissingPayload { method } | Self::MalformedPayload { method, .. } => method,
        }
    }
}
