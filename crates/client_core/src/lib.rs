//! Client-side state for a remote scripting service console: open sessions,
//! inbound event dispatch, outbound command forwarding and the output log.

pub mod channel;
pub mod clients;
pub mod controller;
pub mod dispatcher;
pub mod error;
pub mod forwarder;
pub mod log_buffer;
pub mod session;

pub use channel::{ChannelFrame, MessageChannel, QueueChannel};
pub use controller::{ControllerSettings, ScriptController, DEFAULT_NEW_SCRIPT_TEMPLATE};
pub use dispatcher::{ViewState, ViewUpdate};
pub use error::{ClientError, ClientResult};
pub use log_buffer::{LogBuffer, DEFAULT_LOG_CAPACITY};
pub use session::{ScriptSession, SessionAction, SessionChange, SessionStore};
