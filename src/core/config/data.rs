use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::core::constants::{DEFAULT_BACKEND_URL, DEFAULT_MODEL, DEFAULT_MODELS};

/// On-disk settings. Every field is optional so a missing key falls back to
/// the built-in default rather than failing to parse.
#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Base URL of the debugging-assistant backend
    pub backend_url: Option<String>,
    /// Model selected when a session starts
    pub default_model: Option<String>,
    /// Models offered by the picker; empty means the backend's stock list
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub models: Vec<String>,
    /// Ring the terminal bell on model switches
    pub sound: Option<bool>,
    /// Allow sending while an earlier reply is still pending
    pub allow_concurrent_turns: Option<bool>,
    /// UI theme name ("dark" or "light")
    pub theme: Option<String>,
}

impl Config {
    pub fn backend_url(&self) -> &str {
        self.backend_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_BACKEND_URL)
    }

    pub fn default_model(&self) -> &str {
        self.default_model
            .as_deref()
            .filter(|model| !model.trim().is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }

    /// Picker entries, always including the default model.
    pub fn model_list(&self) -> Vec<String> {
        let mut models: Vec<String> = if self.models.is_empty() {
            DEFAULT_MODELS.iter().map(|m| m.to_string()).collect()
        } else {
            self.models.clone()
        };
        let default_model = self.default_model();
        if !models.iter().any(|m| m == default_model) {
            models.insert(0, default_model.to_string());
        }
        models
    }

    pub fn sound_enabled(&self) -> bool {
        self.sound.unwrap_or(true)
    }

    pub fn concurrent_turns_allowed(&self) -> bool {
        self.allow_concurrent_turns.unwrap_or(true)
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
