use std::{fs, path::Path};

use client_core::{ControllerSettings, DEFAULT_LOG_CAPACITY, DEFAULT_NEW_SCRIPT_TEMPLATE};
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub service_name: String,
    pub log_capacity: usize,
    pub new_script_template: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            service_name: "py4j".into(),
            log_capacity: DEFAULT_LOG_CAPACITY,
            new_script_template: DEFAULT_NEW_SCRIPT_TEMPLATE.into(),
        }
    }
}

impl Settings {
    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            log_capacity: self.log_capacity,
            new_script_template: self.new_script_template.clone(),
        }
    }
}

/// Defaults, then the TOML file at `path` if present, then the environment.
pub fn load_settings(path: &Path) -> Settings {
    load_settings_with(path, |key| std::env::var(key).ok())
}

fn load_settings_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        apply_file(&mut settings, &raw);
    }
    apply_env(&mut settings, lookup);

    settings
}

fn apply_file(settings: &mut Settings, raw: &str) {
    let table = match toml::from_str::<toml::Table>(raw) {
        Ok(table) => table,
        Err(err) => {
            warn!(error = %err, "ignoring unreadable settings file");
            return;
        }
    };

    if let Some(v) = table.get("service_name").and_then(|v| v.as_str()) {
        settings.service_name = v.to_string();
    }
    if let Some(v) = table.get("log_capacity").and_then(|v| v.as_integer()) {
        match usize::try_from(v) {
            Ok(capacity) => settings.log_capacity = capacity,
            Err(_) => warn!(value = v, "log_capacity must be non-negative"),
        }
    }
    if let Some(v) = table.get("new_script_template").and_then(|v| v.as_str()) {
        settings.new_script_template = v.to_string();
    }
}

fn apply_env(settings: &mut Settings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("SCRIPT_CONSOLE_SERVICE") {
        settings.service_name = v;
    }
    if let Some(v) = lookup("APP__SERVICE_NAME") {
        settings.service_name = v;
    }

    if let Some(v) = lookup("APP__LOG_CAPACITY") {
        if let Ok(parsed) = v.parse::<usize>() {
            settings.log_capacity = parsed;
        }
    }

    if let Some(v) = lookup("APP__NEW_SCRIPT_TEMPLATE") {
        settings.new_script_template = v;
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
