use std::fmt;
use std::str::FromStr;

use ratatui::style::{Color, Modifier, Style};

/// Names accepted by the `theme` config key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Dark,
    Light,
}

impl ThemeName {
    pub const ALL: [ThemeName; 2] = [ThemeName::Dark, ThemeName::Light];

    pub fn as_str(self) -> &'static str {
        match self {
            ThemeName::Dark => "dark",
            ThemeName::Light => "light",
        }
    }
}

impl fmt::Display for ThemeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dark" | "default" => Ok(ThemeName::Dark),
            "light" => Ok(ThemeName::Light),
            other => Err(format!("unknown theme '{other}' (expected dark or light)")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Theme {
    // Overall background color to paint the full frame
    pub background_color: Color,
    // Transcript entries
    pub user_prefix_style: Style,
    pub user_text_style: Style,
    pub assistant_text_style: Style,
    pub system_note_style: Style,
    pub typing_indicator_style: Style,
    pub loader_style: Style,

    // Reply markdown
    pub heading_style: Style,
    pub link_style: Style,
    pub quote_style: Style,
    pub inline_code_style: Style,
    pub code_block_style: Style,
    pub code_header_style: Style,
    pub copy_label_style: Style,
    pub copied_label_style: Style,
    pub copy_failed_label_style: Style,
    pub selection_highlight_style: Style,

    // Chrome
    pub title_style: Style,
    pub status_style: Style,
    pub input_border_style: Style,
    pub input_title_style: Style,

    // Input area
    pub input_text_style: Style,
    pub input_cursor_style: Style,
}

impl Theme {
    pub fn dark_default() -> Self {
        Theme {
            background_color: Color::Black,
            user_prefix_style: Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Cyan),
            assistant_text_style: Style::default().fg(Color::White),
            system_note_style: Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
            typing_indicator_style: Style::default().fg(Color::Gray),
            loader_style: Style::default().fg(Color::Cyan),

            heading_style: Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD),
            link_style: Style::default()
                .fg(Color::LightBlue)
                .add_modifier(Modifier::UNDERLINED),
            quote_style: Style::default().fg(Color::Gray),
            inline_code_style: Style::default().fg(Color::LightGreen),
            code_block_style: Style::default().fg(Color::LightGreen).bg(Color::Rgb(24, 24, 24)),
            code_header_style: Style::default().fg(Color::DarkGray),
            copy_label_style: Style::default().fg(Color::Gray),
            copied_label_style: Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
            copy_failed_label_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            selection_highlight_style: Style::default().bg(Color::Rgb(40, 40, 64)),

            title_style: Style::default().fg(Color::Gray),
            status_style: Style::default().fg(Color::Yellow),
            input_border_style: Style::default().fg(Color::Gray),
            input_title_style: Style::default().fg(Color::Gray),

            input_text_style: Style::default().fg(Color::White),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn light() -> Self {
        Theme {
            background_color: Color::White,
            user_prefix_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
            user_text_style: Style::default().fg(Color::Blue),
            assistant_text_style: Style::default().fg(Color::Black),
            system_note_style: Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
            typing_indicator_style: Style::default().fg(Color::DarkGray),
            loader_style: Style::default().fg(Color::Blue),

            heading_style: Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
            link_style: Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::UNDERLINED),
            quote_style: Style::default().fg(Color::DarkGray),
            inline_code_style: Style::default().fg(Color::Rgb(0, 110, 0)),
            code_block_style: Style::default()
                .fg(Color::Rgb(0, 90, 0))
                .bg(Color::Rgb(238, 238, 238)),
            code_header_style: Style::default().fg(Color::Gray),
            copy_label_style: Style::default().fg(Color::DarkGray),
            copied_label_style: Style::default()
                .fg(Color::Rgb(0, 128, 0))
                .add_modifier(Modifier::BOLD),
            copy_failed_label_style: Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
            selection_highlight_style: Style::default().bg(Color::Rgb(210, 220, 255)),

            title_style: Style::default().fg(Color::DarkGray),
            status_style: Style::default().fg(Color::Rgb(160, 90, 0)),
            input_border_style: Style::default().fg(Color::Black),
            input_title_style: Style::default().fg(Color::DarkGray),

            input_text_style: Style::default().fg(Color::Black),
            input_cursor_style: Style::default().add_modifier(Modifier::REVERSED),
        }
    }

    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark_default(),
            ThemeName::Light => Self::light(),
        }
    }

    /// Lenient lookup for config values; unknown names fall back to dark.
    pub fn from_config_value(value: Option<&str>) -> Self {
        let name = value
            .and_then(|raw| raw.parse::<ThemeName>().ok())
            .unwrap_or_default();
        Self::from_name(name)
    }
}
