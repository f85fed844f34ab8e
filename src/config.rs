//! Engine options, loadable from JSON.
use serde::{Deserialize, Serialize};

use crate::path_de;

/// Reserved mapping key carrying the type tag unless configured otherwise.
pub const DEFAULT_TAG_KEY: &str = "type";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct Options {
    /// Mapping key holding the optional type tag.
    pub tag_key: String,
    /// Reject enumerated-string fields whose value is outside the declared set.
    /// When off such fields are accepted as plain strings.
    pub enforce_constraints: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid options at `{path}`: {message}")]
pub struct ConfigError {
    pub path: String,
    pub message: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            tag_key: DEFAULT_TAG_KEY.to_string(),
            enforce_constraints: true,
        }
    }
}

impl Options {
    pub fn from_json_str(src: &str) -> Result<Self, ConfigError> {
        path_de::from_str_with_path(src)
            .map_err(|err| ConfigError { path: err.path, message: err.message })
    }
}
