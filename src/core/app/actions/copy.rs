use std::time::Instant;

use super::{App, AppAction, AppCommand};
use crate::core::app::UiMode;

pub(super) fn handle_copy_action(app: &mut App, action: AppAction) -> Option<AppCommand> {
    let count = app.ui.copy_binder.targets().len();

    match action {
        AppAction::EnterBlockSelect => {
            if count == 0 {
                app.ui.set_status("No code blocks to copy");
                return None;
            }
            // Start from the newest block, closest to where the user is reading.
            app.ui.mode = UiMode::BlockSelect { index: count - 1 };
            None
        }
        AppAction::BlockSelectPrev => {
            if let UiMode::BlockSelect { index } = app.ui.mode {
                app.ui.mode = UiMode::BlockSelect {
                    index: index.saturating_sub(1),
                };
            }
            None
        }
        AppAction::BlockSelectNext => {
            if let UiMode::BlockSelect { index } = app.ui.mode {
                app.ui.mode = UiMode::BlockSelect {
                    index: (index + 1).min(count.saturating_sub(1)),
                };
            }
            None
        }
        AppAction::ExitBlockSelect => {
            if matches!(app.ui.mode, UiMode::BlockSelect { .. }) {
                app.ui.mode = UiMode::Typing;
            }
            None
        }
        AppAction::CopySelectedBlock => {
            let block = app.ui.selected_block()?;
            let text = app.ui.copy_binder.press(block, &app.ui.transcript)?;
            Some(AppCommand::CopyToClipboard { block, text })
        }
        AppAction::CopyFinished { block, result } => {
            app.ui.copy_binder.finish(block, result, Instant::now());
            None
        }
        _ => unreachable!("non-copy action routed to copy handler"),
    }
}
