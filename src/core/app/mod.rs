//! Application state for one chat session.
//!
//! [`App`] owns everything a session needs: the backend session
//! ([`SessionContext`]) and the view state ([`UiState`]). Nothing lives in
//! module-level statics, so independent `App` values never share turn state.
//! State changes go through [`apply_action`]; side effects come back out as
//! [`AppCommand`]s for the event loop to run.

use reqwest::Client;

use crate::ui::theme::Theme;
use crate::utils::logging::LoggingState;
use crate::utils::sound::Chime;
use crate::utils::url::normalize_base_url;

pub mod actions;
pub mod session;
pub mod ui_state;

#[cfg(test)]
mod tests;

pub use actions::{
    apply_action, apply_actions, AppAction, AppActionContext, AppActionDispatcher,
    AppActionEnvelope, AppCommand,
};
pub use session::{ModelSelection, PendingTurn, SessionContext};
pub use ui_state::{UiMode, UiState};

/// Startup parameters resolved from config and command-line flags.
pub struct AppInitConfig {
    pub backend_url: String,
    pub model: String,
    pub models: Vec<String>,
    pub log_file: Option<String>,
    pub sound: bool,
    pub allow_concurrent_turns: bool,
    pub theme: Theme,
}

pub struct App {
    pub session: SessionContext,
    pub ui: UiState,
}

impl App {
    pub fn new(mut init: AppInitConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let logging = LoggingState::new(init.log_file.take())?;
        Ok(Self::with_logging(init, logging))
    }

    fn with_logging(init: AppInitConfig, logging: LoggingState) -> Self {
        let mut model_choices = init.models;
        if !model_choices.iter().any(|m| m == &init.model) {
            model_choices.insert(0, init.model.clone());
        }

        let session = SessionContext {
            // No timeout: a slow local model is still a valid answer.
            client: Client::new(),
            backend_url: normalize_base_url(&init.backend_url),
            models: ModelSelection::new(init.model),
            pending: Default::default(),
            next_turn_id: 0,
            logging,
            chime: Chime::new(init.sound),
            allow_concurrent_turns: init.allow_concurrent_turns,
        };

        App {
            session,
            ui: UiState::new(init.theme, model_choices),
        }
    }

    #[cfg(any(test, feature = "bench"))]
    pub fn new_test_app(theme: Theme) -> Self {
        Self::with_logging(
            AppInitConfig {
                backend_url: "http://127.0.0.1:8000".to_string(),
                model: crate::core::constants::DEFAULT_MODEL.to_string(),
                models: crate::core::constants::DEFAULT_MODELS
                    .iter()
                    .map(|m| m.to_string())
                    .collect(),
                log_file: None,
                sound: false,
                allow_concurrent_turns: true,
                theme,
            },
            LoggingState::disabled(),
        )
    }
}
