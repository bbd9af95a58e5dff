//! Settings management for CLI set/unset commands.
//!
//! Each config key has a [`SettingHandler`]. Handlers edit an in-memory
//! [`Config`]; the caller loads the file before and saves it after, so the
//! handlers themselves never touch the disk.

pub mod error;
pub mod handlers;
pub mod helpers;
pub mod registry;

pub use error::SettingError;
pub use registry::SettingRegistry;

use crate::core::config::data::Config;

/// Trait for handling a configuration setting.
pub trait SettingHandler: Send + Sync {
    /// Returns the configuration key this handler manages.
    fn key(&self) -> &'static str;

    /// Apply `args` (everything after the key) and return the message to
    /// print on success.
    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError>;

    /// Clear the value so the built-in default applies again.
    fn unset(&self, config: &mut Config) -> String;
}
