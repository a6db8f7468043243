//! Line protocol read from stdin: JSON service messages or console commands.

use shared::{domain::ScriptPath, protocol::ServiceMessage};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Inbound(ServiceMessage),
    List,
    Open(ScriptPath),
    Example(String),
    Add(String),
    Select(ScriptPath),
    Edit(String),
    Save,
    Exec,
    /// Closes the named script, or the active one.
    Close(Option<ScriptPath>),
    Clear,
    Show,
    Quit,
}

#[derive(Debug, Error)]
pub enum InputError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{0} requires an argument")]
    MissingArgument(&'static str),
    #[error("invalid inbound message: {0}")]
    InvalidMessage(#[from] serde_json::Error),
}

/// Returns `Ok(None)` for blank lines.
pub fn parse_line(line: &str) -> Result<Option<ConsoleInput>, InputError> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if trimmed.starts_with('{') {
        return Ok(Some(ConsoleInput::Inbound(serde_json::from_str(trimmed)?)));
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest.trim()),
        None => (trimmed, ""),
    };

    let input = match command {
        "list" => ConsoleInput::List,
        "open" => ConsoleInput::Open(required("open", rest)?.into()),
        "example" => ConsoleInput::Example(required("example", rest)?.to_string()),
        // blank names are left for the controller to reject
        "add" => ConsoleInput::Add(rest.to_string()),
        "select" => ConsoleInput::Select(required("select", rest)?.into()),
        "edit" => ConsoleInput::Edit(unescape(rest)),
        "save" => ConsoleInput::Save,
        "exec" => ConsoleInput::Exec,
        "close" => ConsoleInput::Close((!rest.is_empty()).then(|| rest.into())),
        "clear" => ConsoleInput::Clear,
        "show" => ConsoleInput::Show,
        "quit" | "exit" => ConsoleInput::Quit,
        other => return Err(InputError::UnknownCommand(other.to_string())),
    };

    Ok(Some(input))
}

fn required<'a>(command: &'static str, rest: &'a str) -> Result<&'a str, InputError> {
    if rest.is_empty() {
        Err(InputError::MissingArgument(command))
    } else {
        Ok(rest)
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('\\') => out.push('\\'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

#[cfg(test)]
#[path = "tests/input_tests.rs"]
mod tests;
