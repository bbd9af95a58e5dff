use std::time::Instant;

use tui_textarea::TextArea;

use crate::core::constants::STATUS_DURATION;
use crate::core::copy_binder::CopyBinder;
use crate::core::transcript::{CodeBlockId, Transcript};
use crate::ui::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiMode {
    #[default]
    Typing,
    /// Stepping through code blocks; `index` points into the binder targets.
    BlockSelect { index: usize },
    ModelPicker { index: usize },
}

pub struct UiState {
    pub transcript: Transcript,
    textarea: TextArea<'static>,
    pub mode: UiMode,
    pub theme: Theme,
    pub copy_binder: CopyBinder,
    pub model_choices: Vec<String>,
    pub status: Option<String>,
    pub status_set_at: Option<Instant>,
    pub exit_requested: bool,
}

impl UiState {
    pub fn new(theme: Theme, model_choices: Vec<String>) -> Self {
        let mut ui = Self {
            transcript: Transcript::new(),
            textarea: TextArea::default(),
            mode: UiMode::Typing,
            theme,
            copy_binder: CopyBinder::new(),
            model_choices,
            status: None,
            status_set_at: None,
            exit_requested: false,
        };
        ui.configure_textarea();
        ui
    }

    pub(crate) fn configure_textarea(&mut self) {
        let textarea_style = self
            .theme
            .input_text_style
            .patch(ratatui::style::Style::default().bg(self.theme.background_color));
        self.textarea.set_style(textarea_style);
        self.textarea
            .set_cursor_style(self.theme.input_cursor_style);
        self.textarea
            .set_cursor_line_style(ratatui::style::Style::default());
    }

    pub fn textarea(&self) -> &TextArea<'static> {
        &self.textarea
    }

    pub fn input_text(&self) -> String {
        self.textarea.lines().join("\n")
    }

    pub fn input_line_count(&self) -> usize {
        self.textarea.lines().len().max(1)
    }

    pub fn set_input_text(&mut self, text: &str) {
        let lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        self.textarea = TextArea::from(lines);
        self.textarea.move_cursor(tui_textarea::CursorMove::Bottom);
        self.textarea.move_cursor(tui_textarea::CursorMove::End);
        self.configure_textarea();
    }

    pub fn clear_input(&mut self) {
        self.textarea = TextArea::default();
        self.configure_textarea();
    }

    pub fn apply_textarea_edit<F>(&mut self, f: F)
    where
        F: FnOnce(&mut TextArea<'static>),
    {
        f(&mut self.textarea);
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
        self.status_set_at = Some(Instant::now());
    }

    pub fn clear_status(&mut self) {
        self.status = None;
        self.status_set_at = None;
    }

    /// Drop a status message once it has been visible long enough.
    pub fn expire_status(&mut self, now: Instant) -> bool {
        match self.status_set_at {
            Some(set_at) if now.saturating_duration_since(set_at) >= STATUS_DURATION => {
                self.clear_status();
                true
            }
            _ => false,
        }
    }

    pub fn selected_block(&self) -> Option<CodeBlockId> {
        match self.mode {
            UiMode::BlockSelect { index } => self.copy_binder.targets().get(index).copied(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_round_trips_multiline_text() {
        let mut ui = UiState::new(Theme::dark_default(), Vec::new());
        ui.set_input_text("line one\nline two");
        assert_eq!(ui.input_text(), "line one\nline two");
        assert_eq!(ui.input_line_count(), 2);
        ui.clear_input();
        assert_eq!(ui.input_text(), "");
        assert_eq!(ui.input_line_count(), 1);
    }

    #[test]
    fn status_expires_after_its_duration() {
        let mut ui = UiState::new(Theme::dark_default(), Vec::new());
        ui.set_status("saved");
        let set_at = ui.status_set_at.unwrap();
        assert!(!ui.expire_status(set_at));
        assert!(ui.expire_status(set_at + STATUS_DURATION));
        assert!(ui.status.is_none());
    }

    #[test]
    fn no_selected_block_outside_block_select() {
        let ui = UiState::new(Theme::dark_default(), Vec::new());
        assert_eq!(ui.selected_block(), None);
    }
}
