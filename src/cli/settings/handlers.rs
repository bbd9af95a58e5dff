//! Setting handlers, one per config key.

use super::error::SettingError;
use super::helpers::{format_bool, parse_bool, require_value, success_set, success_unset};
use super::SettingHandler;
use crate::core::config::data::Config;
use crate::core::constants::{DEFAULT_BACKEND_URL, DEFAULT_MODEL};
use crate::ui::theme::ThemeName;
use crate::utils::url::{looks_like_http_url, normalize_base_url};

/// Handler for the `backend-url` setting.
pub struct BackendUrlHandler;

impl SettingHandler for BackendUrlHandler {
    fn key(&self) -> &'static str {
        "backend-url"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let url = require_value(
            args,
            "To set the backend URL, specify it:",
            "debugmate set backend-url http://127.0.0.1:8000",
        )?;
        if !looks_like_http_url(&url) {
            return Err(SettingError::InvalidUrl(url));
        }
        let url = normalize_base_url(&url);
        let message = success_set(self.key(), &url);
        config.backend_url = Some(url);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.backend_url = None;
        format!(
            "{} (will use default: {DEFAULT_BACKEND_URL})",
            success_unset(self.key())
        )
    }
}

/// Handler for the `default-model` setting.
pub struct DefaultModelHandler;

impl SettingHandler for DefaultModelHandler {
    fn key(&self) -> &'static str {
        "default-model"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let model = require_value(
            args,
            "To set a default model, specify the model name:",
            "debugmate set default-model llama3.2:1b",
        )?;
        let message = success_set(self.key(), &model);
        config.default_model = Some(model);
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.default_model = None;
        format!("{} (will use default: {DEFAULT_MODEL})", success_unset(self.key()))
    }
}

/// Handler for the `models` setting: the picker's model list.
pub struct ModelsHandler;

impl SettingHandler for ModelsHandler {
    fn key(&self) -> &'static str {
        "models"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let mut models: Vec<String> = Vec::new();
        for model in args
            .iter()
            .flat_map(|arg| arg.split(','))
            .map(str::trim)
            .filter(|model| !model.is_empty())
        {
            if !models.iter().any(|m| m == model) {
                models.push(model.to_string());
            }
        }
        if models.is_empty() {
            return Err(SettingError::MissingArgs {
                hint: "To set the model list, name one or more models:",
                example: "debugmate set models qwen2.5-coder:1.5b llama3.2:1b",
            });
        }
        let message = success_set(self.key(), &models.join(", "));
        config.models = models;
        Ok(message)
    }

    fn unset(&self, config: &mut Config) -> String {
        config.models.clear();
        format!("{} (will use the built-in list)", success_unset(self.key()))
    }
}

/// Handler for the `theme` setting.
pub struct ThemeHandler;

impl SettingHandler for ThemeHandler {
    fn key(&self) -> &'static str {
        "theme"
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let input = require_value(
            args,
            "To set a theme, specify the theme name:",
            "debugmate set theme light",
        )?;
        let theme: ThemeName = input
            .parse()
            .map_err(|_| SettingError::UnknownTheme { input })?;
        config.theme = Some(theme.as_str().to_string());
        Ok(success_set(self.key(), theme.as_str()))
    }

    fn unset(&self, config: &mut Config) -> String {
        config.theme = None;
        format!(
            "{} (will use default: {})",
            success_unset(self.key()),
            ThemeName::default()
        )
    }
}

/// Data-driven handler for boolean (on/off) settings.
pub struct BooleanHandler {
    key: &'static str,
    hint: &'static str,
    example: &'static str,
    default_display: &'static str,
    set_field: fn(&mut Config, Option<bool>),
}

impl SettingHandler for BooleanHandler {
    fn key(&self) -> &'static str {
        self.key
    }

    fn set(&self, args: &[String], config: &mut Config) -> Result<String, SettingError> {
        let input = require_value(args, self.hint, self.example)?;
        let value = parse_bool(&input).ok_or(SettingError::InvalidBoolean(input))?;
        (self.set_field)(config, Some(value));
        Ok(success_set(self.key, format_bool(value)))
    }

    fn unset(&self, config: &mut Config) -> String {
        (self.set_field)(config, None);
        format!(
            "{} (will use default: {})",
            success_unset(self.key),
            self.default_display
        )
    }
}

/// Create a handler for the `sound` setting.
pub fn sound_handler() -> BooleanHandler {
    BooleanHandler {
        key: "sound",
        hint: "To turn the model-switch chime on or off, specify on or off:",
        example: "debugmate set sound off",
        default_display: "on",
        set_field: |c, v| c.sound = v,
    }
}

/// Create a handler for the `concurrent-turns` setting.
pub fn concurrent_turns_handler() -> BooleanHandler {
    BooleanHandler {
        key: "concurrent-turns",
        hint: "To allow or forbid sending while a reply is pending, specify on or off:",
        example: "debugmate set concurrent-turns off",
        default_display: "on",
        set_field: |c, v| c.allow_concurrent_turns = v,
    }
}
