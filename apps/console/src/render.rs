use std::fmt::Write as _;

use client_core::{MessageChannel, ScriptController};

/// Output lines shown per refresh; the full buffer stays in the controller.
const VISIBLE_LOG_LINES: usize = 20;

pub fn render<C: MessageChannel>(controller: &ScriptController<C>, service_name: &str) -> String {
    let view = controller.view();
    let sessions = controller.sessions();
    let mut out = String::new();

    let title = view
        .status
        .as_ref()
        .and_then(|status| status.name())
        .unwrap_or(service_name);
    let _ = writeln!(out, "== {title} ==");

    let listing: Vec<&str> = view.script_list.iter().map(|path| path.as_str()).collect();
    let _ = writeln!(out, "scripts: {}", listing.join(", "));

    let tabs: Vec<String> = sessions
        .iter()
        .map(|session| {
            let active = sessions.active_key() == Some(&session.file);
            let marker = if session.synced { "" } else { "~" };
            if active {
                format!("[{}{marker}]", session.display_name())
            } else {
                format!("{}{marker}", session.display_name())
            }
        })
        .collect();
    let _ = writeln!(out, "open: {}", tabs.join(" "));

    if !view.clients.is_empty() {
        let clients: Vec<&str> = view.clients.iter().collect();
        let _ = writeln!(out, "clients: {}", clients.join(", "));
    }

    let _ = writeln!(out, "--- output ({}) ---", view.logs.len());
    for line in view.logs.iter().take(VISIBLE_LOG_LINES) {
        let _ = writeln!(out, "{}", line.trim_end_matches('\n'));
    }

    out
}
