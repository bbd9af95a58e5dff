mod copy;
mod input;
mod picker;
mod turn;

use tokio::sync::mpsc;

use super::App;
use crate::api::ChatReply;
use crate::core::chat_service::{BackendError, TurnId, TurnParams};
use crate::core::transcript::CodeBlockId;

pub use turn::MODEL_SWITCH_PREFIX;

pub enum AppAction {
    /// Enter pressed in the input: a slash command or a chat message.
    SubmitInput,
    SubmitMessage {
        message: String,
    },
    TurnCompleted {
        turn_id: TurnId,
        reply: ChatReply,
    },
    TurnFailed {
        turn_id: TurnId,
        error: BackendError,
    },
    SelectModel {
        model: String,
    },
    OpenModelPicker,
    PickerMoveUp,
    PickerMoveDown,
    PickerConfirm,
    PickerCancel,
    EnterBlockSelect,
    BlockSelectPrev,
    BlockSelectNext,
    ExitBlockSelect,
    CopySelectedBlock,
    CopyFinished {
        block: CodeBlockId,
        result: Result<(), String>,
    },
    EditInput {
        input: tui_textarea::Input,
    },
    InsertNewline,
    /// Bracketed paste; newlines are kept.
    InsertText {
        text: String,
    },
    ScrollUp {
        lines: u16,
    },
    ScrollDown {
        lines: u16,
    },
    ScrollToBottom,
    SetStatus {
        message: String,
    },
    ClearStatus,
    Quit,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AppActionContext {
    pub term_width: u16,
    pub term_height: u16,
}

pub struct AppActionEnvelope {
    pub action: AppAction,
    pub context: AppActionContext,
}

#[derive(Clone)]
pub struct AppActionDispatcher {
    tx: mpsc::UnboundedSender<AppActionEnvelope>,
}

impl AppActionDispatcher {
    pub fn new(tx: mpsc::UnboundedSender<AppActionEnvelope>) -> Self {
        Self { tx }
    }

    pub fn dispatch_many<I>(&self, actions: I, ctx: AppActionContext)
    where
        I: IntoIterator<Item = AppAction>,
    {
        for action in actions.into_iter() {
            let _ = self.tx.send(AppActionEnvelope {
                action,
                context: ctx,
            });
        }
    }
}

/// Side effects requested by an action, executed by the event loop.
#[derive(Debug)]
pub enum AppCommand {
    SendTurn(TurnParams),
    PlayChime,
    CopyToClipboard { block: CodeBlockId, text: String },
}

pub fn apply_actions(
    app: &mut App,
    envelopes: impl IntoIterator<Item = AppActionEnvelope>,
) -> Vec<AppCommand> {
    let mut commands = Vec::new();
    for envelope in envelopes {
        if let Some(cmd) = apply_action(app, envelope.action, envelope.context) {
            commands.push(cmd);
        }
    }
    commands
}

pub fn apply_action(app: &mut App, action: AppAction, ctx: AppActionContext) -> Option<AppCommand> {
    match action {
        AppAction::SubmitInput => input::submit_input(app, ctx),
        AppAction::SubmitMessage { message } => turn::submit_message(app, message),
        AppAction::TurnCompleted { turn_id, reply } => turn::complete_turn(app, turn_id, reply),
        AppAction::TurnFailed { turn_id, error } => turn::fail_turn(app, turn_id, error),
        AppAction::SelectModel { model } => turn::select_model(app, &model),

        AppAction::OpenModelPicker
        | AppAction::PickerMoveUp
        | AppAction::PickerMoveDown
        | AppAction::PickerConfirm
        | AppAction::PickerCancel => picker::handle_picker_action(app, action),

        AppAction::EnterBlockSelect
        | AppAction::BlockSelectPrev
        | AppAction::BlockSelectNext
        | AppAction::ExitBlockSelect
        | AppAction::CopySelectedBlock
        | AppAction::CopyFinished { .. } => copy::handle_copy_action(app, action),

        AppAction::EditInput { .. }
        | AppAction::InsertNewline
        | AppAction::InsertText { .. }
        | AppAction::ScrollUp { .. }
        | AppAction::ScrollDown { .. }
        | AppAction::ScrollToBottom
        | AppAction::SetStatus { .. }
        | AppAction::ClearStatus
        | AppAction::Quit => input::handle_input_action(app, action),
    }
}
