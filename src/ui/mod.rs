//! Terminal UI layer for interactive chat sessions.
//!
//! - [`chat_loop`]: the event loop that dispatches input to
//!   [`crate::core::app`] and runs backend turns through
//!   [`crate::core::chat_service`].
//! - [`layout`], [`wrap`] and [`renderer`]: turning the transcript into
//!   terminal lines and drawing frames.
//! - [`markdown`]: reply rendering for the terminal and for HTML export.
//! - [`theme`]: color and style policy.

pub mod chat_loop;
pub mod layout;
pub mod markdown;
pub mod renderer;
pub mod theme;
pub mod wrap;
