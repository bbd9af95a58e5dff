//! Main chat event loop and terminal lifecycle.
//!
//! The loop owns the [`App`](crate::core::app::App) and is the only place that
//! runs side effects: backend requests, clipboard writes and the chime.

mod event_loop;
mod keybindings;
mod lifecycle;

pub use event_loop::run_chat;
