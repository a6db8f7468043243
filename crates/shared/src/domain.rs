use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Path of a script relative to the service's script root. Unique key of an
/// open session.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptPath(pub String);

impl ScriptPath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path component, accepting both `/` and `\` separators.
    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or_default()
    }
}

impl fmt::Display for ScriptPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ScriptPath {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ScriptPath {
    fn from(value: String) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Script {
    pub file: ScriptPath,
    /// The service sends `null` for scripts it could not load.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl Script {
    pub fn new(file: impl Into<ScriptPath>, code: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            code: code.into(),
        }
    }
}
