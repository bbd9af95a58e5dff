//! Turn lifecycle: send, then success or failure.
//!
//! A send appends the user's text and a typing placeholder, then hands a
//! [`TurnParams`] to the event loop. The outcome comes back as
//! `TurnCompleted` or `TurnFailed` tagged with the same [`TurnId`]; the
//! placeholder that turn created is the only one removed.

use std::time::Instant;

use super::{App, AppCommand};
use crate::api::{ChatReply, ChatRequest};
use crate::core::chat_service::{BackendError, TurnId, TurnParams};
use crate::core::constants::BACKEND_ERROR_TEXT;
use crate::core::message::TranscriptRole;
use crate::core::app::session::PendingTurn;

pub const MODEL_SWITCH_PREFIX: &str = "Switched model to";

pub(super) const BUSY_STATUS: &str = "Still waiting for the previous reply";

pub(super) fn submit_message(app: &mut App, message: String) -> Option<AppCommand> {
    let message = message.trim();
    if message.is_empty() {
        return None;
    }
    if !app.session.allow_concurrent_turns && app.session.has_pending_turns() {
        app.ui.set_status(BUSY_STATUS);
        return None;
    }

    app.ui.transcript.append_user_message(message);
    log_entry(app, TranscriptRole::User, message);
    app.ui.clear_input();
    let placeholder = app.ui.transcript.append_typing_placeholder();

    let model = app.session.models.selected().to_string();
    let prev_model = app.session.models.previous().to_string();
    let turn_id = app.session.allocate_turn_id();
    app.session.pending.insert(
        turn_id,
        PendingTurn {
            placeholder,
            model: model.clone(),
        },
    );

    tracing::debug!(turn = turn_id.0, %model, %prev_model, "turn pending");
    Some(AppCommand::SendTurn(TurnParams {
        client: app.session.client.clone(),
        base_url: app.session.backend_url.clone(),
        turn_id,
        request: ChatRequest {
            message: message.to_string(),
            model,
            prev_model,
        },
    }))
}

pub(super) fn complete_turn(app: &mut App, turn_id: TurnId, reply: ChatReply) -> Option<AppCommand> {
    let Some(pending) = app.session.take_pending(turn_id) else {
        tracing::debug!(turn = turn_id.0, "ignoring reply for unknown turn");
        return None;
    };
    app.ui.transcript.remove_placeholder(pending.placeholder);

    let ChatReply {
        reply,
        system_note,
        model_used,
    } = reply;

    let chime = system_note.map(|note| {
        app.ui
            .transcript
            .append_system_note(note, true, Instant::now());
        AppCommand::PlayChime
    });

    app.session
        .models
        .record_success(model_used.unwrap_or(pending.model));

    log_entry(app, TranscriptRole::Assistant, &reply);
    app.ui.transcript.append_assistant_message(reply);
    app.ui.copy_binder.bind_new(&app.ui.transcript);
    chime
}

pub(super) fn fail_turn(app: &mut App, turn_id: TurnId, error: BackendError) -> Option<AppCommand> {
    let Some(pending) = app.session.take_pending(turn_id) else {
        tracing::debug!(turn = turn_id.0, "ignoring failure for unknown turn");
        return None;
    };
    app.ui.transcript.remove_placeholder(pending.placeholder);
    app.ui.transcript.append_assistant_message(BACKEND_ERROR_TEXT);
    tracing::warn!(turn = turn_id.0, model = %pending.model, "chat turn failed: {error}");
    None
}

/// A changed selection is announced right away. Pending turns keep the model
/// they were sent with.
pub(super) fn select_model(app: &mut App, model: &str) -> Option<AppCommand> {
    let model = model.trim();
    if model.is_empty() || !app.session.models.select(model) {
        return None;
    }
    app.ui.transcript.append_system_note(
        format!("{MODEL_SWITCH_PREFIX} {model}"),
        false,
        Instant::now(),
    );
    tracing::info!(%model, "model selected");
    Some(AppCommand::PlayChime)
}

fn log_entry(app: &mut App, role: TranscriptRole, text: &str) {
    if let Err(err) = app.session.logging.log_entry(role, text) {
        app.ui.set_status(format!("Log error: {err}"));
    }
}
