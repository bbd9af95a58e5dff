//! Helper functions for settings operations.

use super::error::SettingError;

/// Parse a boolean value from user input.
///
/// Accepts: on/off, true/false, yes/no (case-insensitive).
pub fn parse_bool(input: &str) -> Option<bool> {
    match input.trim().to_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

/// Format a boolean value for display.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        "on"
    } else {
        "off"
    }
}

pub fn success_set(key: &str, value: &str) -> String {
    format!("✅ Set {key} to: {value}")
}

pub fn success_unset(key: &str) -> String {
    format!("✅ Unset {key}")
}

/// Join the arguments after the key, or report what was expected.
pub fn require_value(
    args: &[String],
    hint: &'static str,
    example: &'static str,
) -> Result<String, SettingError> {
    let value = args.join(" ");
    if value.trim().is_empty() {
        return Err(SettingError::MissingArgs { hint, example });
    }
    Ok(value.trim().to_string())
}
