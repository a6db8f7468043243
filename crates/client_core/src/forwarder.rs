//! One-way translation of user intents into outbound service commands.

use shared::{domain::ScriptPath, protocol::ServiceCommand};
use tracing::{debug, error};

use crate::{
    channel::MessageChannel,
    error::{ClientError, ClientResult},
};

pub struct CommandForwarder<C> {
    channel: C,
}

impl<C: MessageChannel> CommandForwarder<C> {
    pub fn new(channel: C) -> Self {
        Self { channel }
    }

    pub fn channel(&self) -> &C {
        &self.channel
    }

    pub fn send(&self, cmd: ServiceCommand) -> ClientResult<()> {
        let msg = cmd.into_message();
        debug!(method = %msg.method, msg_id = ?msg.msg_id, "sending service command");
        self.channel.send(msg)
    }

    pub fn get_script_list(&self) -> ClientResult<()> {
        self.send(ServiceCommand::GetScriptList)
    }

    pub fn open_script(&self, file: ScriptPath) -> ClientResult<()> {
        self.send(ServiceCommand::OpenScript { file })
    }

    pub fn open_example_script(&self, service_type: &str) -> ClientResult<()> {
        let service_type = service_type.trim();
        if service_type.is_empty() {
            error!("service type cannot be empty");
            return Err(ClientError::Validation(
                "service type cannot be empty".to_string(),
            ));
        }
        self.send(ServiceCommand::OpenExampleScript {
            service_type: service_type.to_string(),
        })
    }

    /// Rejects blank filenames locally; nothing reaches the channel.
    pub fn add_script(&self, filename: &str, code: impl Into<String>) -> ClientResult<()> {
        let filename = filename.trim();
        if filename.is_empty() {
            error!("filename cannot be empty");
            return Err(ClientError::Validation("filename cannot be empty".to_string()));
        }
        self.send(ServiceCommand::AddScript {
            filename: filename.to_string(),
            code: code.into(),
        })
    }

    pub fn close_script(&self, file: ScriptPath) -> ClientResult<()> {
        self.send(ServiceCommand::CloseScript { file })
    }

    pub fn update_script(&self, file: ScriptPath, code: impl Into<String>) -> ClientResult<()> {
        self.send(ServiceCommand::UpdateScript {
            file,
            code: code.into(),
        })
    }

    pub fn save_script(&self, file: ScriptPath, code: impl Into<String>) -> ClientResult<()> {
        self.send(ServiceCommand::SaveScript {
            file,
            code: code.into(),
        })
    }

    pub fn exec(&self, code: impl Into<String>) -> ClientResult<()> {
        self.send(ServiceCommand::Exec { code: code.into() })
    }

    pub fn clear(&self) -> ClientResult<()> {
        self.send(ServiceCommand::Clear)
    }
}
