use super::{picker, turn, App, AppAction, AppActionContext, AppCommand};
use crate::commands::{process_input, CommandResult};

pub(super) fn submit_input(app: &mut App, _ctx: AppActionContext) -> Option<AppCommand> {
    let text = app.ui.input_text();
    if text.trim().is_empty() {
        return None;
    }

    match process_input(app, &text) {
        CommandResult::Continue => {
            app.ui.clear_input();
            None
        }
        CommandResult::ProcessAsMessage(message) => turn::submit_message(app, message),
        CommandResult::OpenModelPicker => {
            app.ui.clear_input();
            picker::open_model_picker(app);
            None
        }
        CommandResult::SelectModel(model) => {
            app.ui.clear_input();
            turn::select_model(app, &model)
        }
    }
}

pub(super) fn handle_input_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    match action {
        AppAction::EditInput { input } => {
            app.ui.apply_textarea_edit(|textarea| {
                textarea.input(input);
            });
        }
        AppAction::InsertNewline => {
            app.ui.apply_textarea_edit(|textarea| textarea.insert_newline());
        }
        AppAction::InsertText { text } => {
            app.ui.apply_textarea_edit(|textarea| {
                textarea.insert_str(text);
            });
        }
        AppAction::ScrollUp { lines } => app.ui.transcript.scroll_up(lines),
        AppAction::ScrollDown { lines } => app.ui.transcript.scroll_down(lines),
        AppAction::ScrollToBottom => app.ui.transcript.scroll_to_bottom(),
        AppAction::SetStatus { message } => app.ui.set_status(message),
        AppAction::ClearStatus => app.ui.clear_status(),
        AppAction::Quit => app.ui.exit_requested = true,
        _ => unreachable!("non-input action routed to input handler"),
    }
    None
}
