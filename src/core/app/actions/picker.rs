use super::{turn, App, AppAction, AppCommand};
use crate::core::app::UiMode;

pub(super) fn open_model_picker(app: &mut App) {
    if app.ui.model_choices.is_empty() {
        app.ui.set_status("No models configured");
        return;
    }
    let selected = app.session.models.selected();
    let index = app
        .ui
        .model_choices
        .iter()
        .position(|model| model == selected)
        .unwrap_or(0);
    app.ui.mode = UiMode::ModelPicker { index };
}

pub(super) fn handle_picker_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    if let AppAction::OpenModelPicker = action {
        open_model_picker(app);
        return None;
    }

    let UiMode::ModelPicker { index } = app.ui.mode else {
        return None;
    };
    let count = app.ui.model_choices.len();

    match action {
        AppAction::PickerMoveUp => {
            let index = if index == 0 { count.saturating_sub(1) } else { index - 1 };
            app.ui.mode = UiMode::ModelPicker { index };
            None
        }
        AppAction::PickerMoveDown => {
            let index = if index + 1 >= count { 0 } else { index + 1 };
            app.ui.mode = UiMode::ModelPicker { index };
            None
        }
        AppAction::PickerConfirm => {
            app.ui.mode = UiMode::Typing;
            let model = app.ui.model_choices.get(index).cloned()?;
            turn::select_model(app, &model)
        }
        AppAction::PickerCancel => {
            app.ui.mode = UiMode::Typing;
            None
        }
        _ => unreachable!("non-picker action routed to picker handler"),
    }
}
