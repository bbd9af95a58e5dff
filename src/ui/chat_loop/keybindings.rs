//! Key-to-action mapping.
//!
//! Resolution depends only on the current [`UiMode`] and the key, so every
//! binding can be tested without a terminal. Keys with no binding fall
//! through to the textarea while typing and are ignored elsewhere.

use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tui_textarea::Input as TAInput;

use crate::core::app::{AppAction, UiMode};

pub fn map_key(mode: UiMode, key: KeyEvent, page: u16) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return Some(AppAction::Quit);
    }
    if let Some(action) = scroll_key(&key, page) {
        return Some(action);
    }

    match mode {
        UiMode::Typing => typing_key(key),
        UiMode::BlockSelect { .. } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppAction::BlockSelectPrev),
            KeyCode::Down | KeyCode::Char('j') => Some(AppAction::BlockSelectNext),
            KeyCode::Enter | KeyCode::Char('c') => Some(AppAction::CopySelectedBlock),
            KeyCode::Esc => Some(AppAction::ExitBlockSelect),
            KeyCode::Char('b') if ctrl => Some(AppAction::ExitBlockSelect),
            _ => None,
        },
        UiMode::ModelPicker { .. } => match key.code {
            KeyCode::Up | KeyCode::Char('k') => Some(AppAction::PickerMoveUp),
            KeyCode::Down | KeyCode::Char('j') => Some(AppAction::PickerMoveDown),
            KeyCode::Enter => Some(AppAction::PickerConfirm),
            KeyCode::Esc => Some(AppAction::PickerCancel),
            _ => None,
        },
    }
}

fn typing_key(key: KeyEvent) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let alt = key.modifiers.contains(KeyModifiers::ALT);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    match key.code {
        KeyCode::Enter if alt || shift => Some(AppAction::InsertNewline),
        KeyCode::Enter => Some(AppAction::SubmitInput),
        KeyCode::Char('j') if ctrl => Some(AppAction::InsertNewline),
        KeyCode::Char('o') if ctrl => Some(AppAction::OpenModelPicker),
        KeyCode::Char('b') if ctrl => Some(AppAction::EnterBlockSelect),
        KeyCode::Esc => Some(AppAction::ClearStatus),
        _ => Some(AppAction::EditInput {
            input: TAInput::from(key),
        }),
    }
}

fn scroll_key(key: &KeyEvent, page: u16) -> Option<AppAction> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);
    let page = page.max(1);

    match key.code {
        KeyCode::PageUp => Some(AppAction::ScrollUp { lines: page }),
        KeyCode::PageDown => Some(AppAction::ScrollDown { lines: page }),
        KeyCode::Up if shift => Some(AppAction::ScrollUp { lines: 1 }),
        KeyCode::Down if shift => Some(AppAction::ScrollDown { lines: 1 }),
        KeyCode::End if ctrl => Some(AppAction::ScrollToBottom),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn with(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn enter_submits_and_modified_enter_inserts_newline() {
        assert!(matches!(
            map_key(UiMode::Typing, key(KeyCode::Enter), 10),
            Some(AppAction::SubmitInput)
        ));
        assert!(matches!(
            map_key(UiMode::Typing, with(KeyCode::Enter, KeyModifiers::ALT), 10),
            Some(AppAction::InsertNewline)
        ));
        assert!(matches!(
            map_key(UiMode::Typing, with(KeyCode::Char('j'), KeyModifiers::CONTROL), 10),
            Some(AppAction::InsertNewline)
        ));
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let ctrl_c = with(KeyCode::Char('c'), KeyModifiers::CONTROL);
        for mode in [
            UiMode::Typing,
            UiMode::BlockSelect { index: 0 },
            UiMode::ModelPicker { index: 0 },
        ] {
            assert!(matches!(map_key(mode, ctrl_c, 10), Some(AppAction::Quit)));
        }
    }

    #[test]
    fn plain_characters_edit_the_input() {
        assert!(matches!(
            map_key(UiMode::Typing, key(KeyCode::Char('c')), 10),
            Some(AppAction::EditInput { .. })
        ));
    }

    #[test]
    fn block_select_keys() {
        let mode = UiMode::BlockSelect { index: 0 };
        assert!(matches!(
            map_key(mode, key(KeyCode::Up), 10),
            Some(AppAction::BlockSelectPrev)
        ));
        assert!(matches!(
            map_key(mode, key(KeyCode::Char('c')), 10),
            Some(AppAction::CopySelectedBlock)
        ));
        assert!(matches!(
            map_key(mode, key(KeyCode::Esc), 10),
            Some(AppAction::ExitBlockSelect)
        ));
        assert!(map_key(mode, key(KeyCode::Char('x')), 10).is_none());
    }

    #[test]
    fn picker_keys() {
        let mode = UiMode::ModelPicker { index: 1 };
        assert!(matches!(
            map_key(mode, key(KeyCode::Down), 10),
            Some(AppAction::PickerMoveDown)
        ));
        assert!(matches!(
            map_key(mode, key(KeyCode::Enter), 10),
            Some(AppAction::PickerConfirm)
        ));
        assert!(matches!(
            map_key(mode, key(KeyCode::Esc), 10),
            Some(AppAction::PickerCancel)
        ));
    }

    #[test]
    fn paging_uses_the_viewport_height() {
        assert!(matches!(
            map_key(UiMode::Typing, key(KeyCode::PageUp), 17),
            Some(AppAction::ScrollUp { lines: 17 })
        ));
        assert!(matches!(
            map_key(UiMode::Typing, key(KeyCode::PageDown), 0),
            Some(AppAction::ScrollDown { lines: 1 })
        ));
        assert!(matches!(
            map_key(UiMode::Typing, with(KeyCode::End, KeyModifiers::CONTROL), 5),
            Some(AppAction::ScrollToBottom)
        ));
    }

    #[test]
    fn shortcuts_open_picker_and_block_select() {
        assert!(matches!(
            map_key(UiMode::Typing, with(KeyCode::Char('o'), KeyModifiers::CONTROL), 10),
            Some(AppAction::OpenModelPicker)
        ));
        assert!(matches!(
            map_key(UiMode::Typing, with(KeyCode::Char('b'), KeyModifiers::CONTROL), 10),
            Some(AppAction::EnterBlockSelect)
        ));
    }
}
