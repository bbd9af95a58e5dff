//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod backend;
pub mod settings;


use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::backend::{check_health, list_models};
use crate::cli::settings::{SettingError, SettingRegistry};
use crate::core::app::{App, AppInitConfig};
use crate::core::config::data::Config;
use crate::ui::chat_loop::run_chat;
use crate::ui::theme::Theme;
use crate::utils::diagnostics::init_diagnostics;
use crate::utils::url::normalize_base_url;

#[derive(Parser)]
#[command(name = "debugmate")]
#[command(version)]
#[command(about = "A terminal chat client for a local debugging-assistant backend")]
#[command(
    long_about = "debugmate is a full-screen terminal chat client for a local debugging-assistant \
backend. Replies are rendered as markdown, every code block gets a copy button, and the model \
can be switched mid-conversation.\n\n\
Controls:\n\
  Enter             Send the message\n\
  Alt+Enter         Insert a new line (also Shift+Enter, Ctrl+J)\n\
  Ctrl+O            Pick a model\n\
  Ctrl+B            Select a code block to copy\n\
  PageUp/PageDown   Scroll through the conversation\n\
  Ctrl+C            Quit the application\n\n\
Commands:\n\
  /help             Show commands and keys\n\
  /model [name]     Pick or switch the model\n\
  /dump [file]      Export the conversation as HTML\n\
  /log [file]       Enable logging to a file, or toggle pause/resume"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Backend base URL for this session
    #[arg(short = 'u', long = "url", global = true, value_name = "URL")]
    pub url: Option<String>,

    /// Model to start the session with
    #[arg(short = 'm', long, global = true, value_name = "MODEL")]
    pub model: Option<String>,

    /// Enable logging to specified file
    #[arg(short = 'l', long, global = true)]
    pub log: Option<String>,

    /// Write diagnostics to this file instead of the cache directory
    #[arg(long = "debug-log", global = true, value_name = "FILE")]
    pub debug_log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Check that the backend and its model server are up
    Health,
    /// List the models the backend offers
    Models,
    /// Set configuration values, or show them all when no key is given
    Set {
        /// Configuration key to set
        key: Option<String>,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    init_diagnostics(args.debug_log.as_deref());

    let config = match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    };

    tokio::runtime::Runtime::new()?.block_on(async_main(args, config))
}

async fn async_main(args: Args, config: Config) -> Result<(), Box<dyn Error>> {
    let backend_url = resolve_backend_url(&args, &config);

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let init = build_init_config(&config, backend_url, args.model, args.log);
            tracing::info!(backend = %init.backend_url, model = %init.model, "starting chat session");
            let app = App::new(init)?;
            run_chat(app).await
        }
        Commands::Health => check_health(&backend_url).await,
        Commands::Models => {
            let default_model = args
                .model
                .as_deref()
                .unwrap_or_else(|| config.default_model())
                .to_string();
            list_models(&backend_url, &config.model_list(), &default_model).await
        }
        Commands::Set { key: None, .. } => {
            config.print_all();
            Ok(())
        }
        Commands::Set {
            key: Some(key),
            value,
        } => {
            let mut config = config;
            exit_on_setting_error(apply_set(&mut config, &key, &value));
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = config;
            exit_on_setting_error(apply_unset(&mut config, &key));
            Ok(())
        }
    }
}

fn resolve_backend_url(args: &Args, config: &Config) -> String {
    normalize_base_url(args.url.as_deref().unwrap_or_else(|| config.backend_url()))
}

fn build_init_config(
    config: &Config,
    backend_url: String,
    model: Option<String>,
    log_file: Option<String>,
) -> AppInitConfig {
    let model = model
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| config.default_model().to_string());
    AppInitConfig {
        backend_url,
        model,
        models: config.model_list(),
        log_file,
        sound: config.sound_enabled(),
        allow_concurrent_turns: config.concurrent_turns_allowed(),
        theme: Theme::from_config_value(config.theme.as_deref()),
    }
}

fn apply_set(config: &mut Config, key: &str, value: &[String]) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let message = handler.set(value, config)?;
    persist(config)?;
    Ok(message)
}

fn apply_unset(config: &mut Config, key: &str) -> Result<String, SettingError> {
    let registry = SettingRegistry::new();
    let handler = registry
        .get(key)
        .ok_or_else(|| SettingError::UnknownKey(key.to_string()))?;
    let message = handler.unset(config);
    persist(config)?;
    Ok(message)
}

fn persist(config: &Config) -> Result<(), SettingError> {
    config
        .save()
        .map(|path| tracing::info!(path = %path.display(), "config saved"))
        .map_err(|e| SettingError::ConfigError(e.to_string()))
}

fn exit_on_setting_error(result: Result<String, SettingError>) {
    match result {
        Ok(message) => println!("{message}"),
        Err(err) => {
            err.print();
            std::process::exit(err.exit_code());
        }
    }
}
