use std::io::{self, Write};

use ratatui::crossterm::{execute, style::Print};

/// Audible notification for model switches: the terminal bell.
#[derive(Debug, Clone, Copy)]
pub struct Chime {
    enabled: bool,
}

impl Chime {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn play(&self) {
        if !self.enabled {
            return;
        }
        let mut stdout = io::stdout();
        // A missing bell is not worth surfacing.
        let _ = execute!(stdout, Print('\u{7}'));
        let _ = stdout.flush();
    }
}
