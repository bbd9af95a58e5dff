//! debugmate is a terminal chat client for a local debugging-assistant backend.
//!
//! The crate is organized around a small set of collaborating layers:
//! - [`core`] owns the transcript, the per-turn request lifecycle, model
//!   selection, the copy binder and configuration.
//! - [`ui`] renders the terminal interface and runs the interactive event loop
//!   that drives user input and display updates.
//! - [`commands`] implements slash-command parsing and execution.
//! - [`api`] defines the JSON payloads exchanged with the backend.
//!
//! The binary (`src/main.rs`) routes through [`crate::cli::main`], which
//! loads configuration and dispatches into [`ui::chat_loop`] for interactive
//! sessions.

pub mod api;
pub mod cli;
pub mod commands;
pub mod core;
pub mod ui;
pub mod utils;
