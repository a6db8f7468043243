//! Applies console input to the controller and turns failures into status text.

use client_core::{ClientError, MessageChannel, ScriptController, ViewUpdate};
use tracing::warn;

use crate::input::ConsoleInput;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub update: ViewUpdate,
    pub status: Option<String>,
}

impl Outcome {
    fn quiet(update: ViewUpdate) -> Self {
        Self {
            update,
            status: None,
        }
    }

    fn failed(err: ClientError) -> Self {
        warn!(error = %err, "console action rejected");
        Self {
            update: ViewUpdate::Unchanged,
            status: Some(describe_error(&err)),
        }
    }
}

pub fn apply_input<C: MessageChannel>(
    controller: &mut ScriptController<C>,
    input: ConsoleInput,
) -> Outcome {
    let result = match input {
        ConsoleInput::Inbound(msg) => return Outcome::quiet(controller.handle_message(msg)),
        ConsoleInput::Show => return Outcome::quiet(ViewUpdate::Refresh),
        ConsoleInput::Quit => return Outcome::quiet(ViewUpdate::Unchanged),
        ConsoleInput::List => controller.request_script_list().map(|_| ViewUpdate::Unchanged),
        ConsoleInput::Open(file) => controller.open_script(file).map(|_| ViewUpdate::Unchanged),
        ConsoleInput::Example(service_type) => controller
            .open_example_script(&service_type)
            .map(|_| ViewUpdate::Unchanged),
        ConsoleInput::Add(filename) => controller.add_script(&filename).map(|_| ViewUpdate::Unchanged),
        ConsoleInput::Select(file) => controller.select_active(file),
        ConsoleInput::Edit(code) => controller.edit_active(code),
        ConsoleInput::Save => controller.save_active().map(|_| ViewUpdate::Unchanged),
        ConsoleInput::Exec => controller.exec_active().map(|_| ViewUpdate::Unchanged),
        ConsoleInput::Close(file) => {
            match file.or_else(|| controller.sessions().active_key().cloned()) {
                Some(file) => controller.close_script(file).map(|_| ViewUpdate::Unchanged),
                None => Err(ClientError::NoActiveSession),
            }
        }
        ConsoleInput::Clear => controller.clear().map(|_| ViewUpdate::Unchanged),
    };

    match result {
        Ok(update) => Outcome::quiet(update),
        Err(err) => Outcome::failed(err),
    }
}

pub fn describe_error(err: &ClientError) -> String {
    match err {
        ClientError::Validation(message) => format!("Rejected: {message}"),
        ClientError::UnknownSession(file) => {
            format!("{file} is not open; open it first and wait for the service to confirm")
        }
        ClientError::InactiveSession { requested, .. } => {
            format!("{requested} is not the active script; select it before editing")
        }
        ClientError::NoActiveSession => "No active script; select one first".to_string(),
        ClientError::NotStarted => {
            "Console is not subscribed to the service yet; retry shortly".to_string()
        }
        ClientError::ChannelClosed(_) => {
            "Service channel disconnected; restart the console".to_string()
        }
    }
}

#[cfg(test)]
#[path = "tests/orchestration_tests.rs"]
mod tests;
