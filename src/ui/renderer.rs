use std::time::Instant;

use ratatui::{
    layout::{Constraint, Direction, Layout as Split, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::core::app::{App, UiMode};
use crate::ui::layout::{LayoutContext, LayoutEngine};

const MAX_INPUT_LINES: u16 = 6;

/// What the event loop needs back from a draw to keep scrolling in bounds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderMetrics {
    pub max_scroll: u16,
    pub viewport_height: u16,
}

pub fn ui(f: &mut Frame, app: &App, now: Instant) -> RenderMetrics {
    let area = f.area();
    f.render_widget(
        Block::default().style(Style::default().bg(app.ui.theme.background_color)),
        area,
    );

    let input_height = (app.ui.input_line_count() as u16).clamp(1, MAX_INPUT_LINES);
    let status_height = u16::from(app.ui.status.is_some());
    let chunks = Split::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(status_height),
            Constraint::Length(input_height + 2), // +2 for borders
        ])
        .split(area);

    f.render_widget(Paragraph::new(title_line(app)), chunks[0]);
    let metrics = render_transcript(f, app, chunks[1], now);

    if let Some(status) = &app.ui.status {
        f.render_widget(
            Paragraph::new(Span::styled(status.clone(), app.ui.theme.status_style)),
            chunks[2],
        );
    }

    let input_title = match app.ui.mode {
        UiMode::BlockSelect { .. } => "Select code block (↑/↓ move, Enter or c to copy, Esc to return)",
        UiMode::ModelPicker { .. } => "Pick a model (↑/↓ move, Enter to select, Esc to cancel)",
        UiMode::Typing => {
            "Type your message (Enter to send, Alt+Enter for new line, Ctrl+B copy code, Ctrl+O model, /help)"
        }
    };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_style(app.ui.theme.input_border_style)
        .title(Span::styled(input_title, app.ui.theme.input_title_style));
    let inner = input_block.inner(chunks[3]);
    f.render_widget(input_block, chunks[3]);
    f.render_widget(app.ui.textarea(), inner);

    if let UiMode::ModelPicker { index } = app.ui.mode {
        render_model_picker(f, app, index);
    }

    metrics
}

fn title_line(app: &App) -> Line<'static> {
    let mut title = format!(
        "debugmate v{} - {} ({}) • Logging: {}",
        env!("CARGO_PKG_VERSION"),
        app.session.backend_url,
        app.session.models.selected(),
        app.session.logging.get_status_string()
    );
    let pending = app.session.pending.len();
    if pending > 0 {
        title.push_str(&format!(" • Waiting on {pending}"));
    }
    Line::from(Span::styled(title, app.ui.theme.title_style))
}

fn render_transcript(f: &mut Frame, app: &App, area: Rect, now: Instant) -> RenderMetrics {
    let ctx = LayoutContext {
        theme: &app.ui.theme,
        binder: &app.ui.copy_binder,
        width: usize::from(area.width.max(1)),
        now,
        selected: app.ui.selected_block(),
    };
    let layout = LayoutEngine::layout_transcript(&app.ui.transcript, &ctx);

    let height = usize::from(area.height);
    let total = layout.lines.len();
    let max_scroll = total.saturating_sub(height);
    let offset = usize::from(app.ui.transcript.scroll().offset_from_bottom).min(max_scroll);
    let mut top = max_scroll - offset;

    // Keep the selected block's header on screen while stepping through blocks.
    if let Some(row) = ctx.selected.and_then(|id| layout.row_of(id)) {
        if row < top || row >= top + height {
            top = row.saturating_sub(1).min(max_scroll);
        }
    }

    let paragraph = Paragraph::new(layout.lines).scroll((clamp_u16(top), 0));
    f.render_widget(paragraph, area);

    RenderMetrics {
        max_scroll: clamp_u16(max_scroll),
        viewport_height: area.height,
    }
}

fn render_model_picker(f: &mut Frame, app: &App, selected: usize) {
    let theme = &app.ui.theme;
    let choices = &app.ui.model_choices;
    let area = centered_rect(f.area(), 50, clamp_u16(choices.len()).saturating_add(2));
    f.render_widget(Clear, area);

    let current = app.session.models.selected();
    let items: Vec<ListItem> = choices
        .iter()
        .map(|model| {
            let marker = if model == current { "● " } else { "  " };
            ListItem::new(format!("{marker}{model}"))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.input_border_style)
                .title(Span::styled("Model", theme.input_title_style))
                .style(Style::default().bg(theme.background_color)),
        )
        .style(theme.assistant_text_style)
        .highlight_style(
            theme
                .selection_highlight_style
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("› ");

    let mut state = ListState::default();
    state.select(Some(selected));
    f.render_stateful_widget(list, area, &mut state);
}

fn centered_rect(area: Rect, percent_x: u16, height: u16) -> Rect {
    let width = (u32::from(area.width) * u32::from(percent_x) / 100) as u16;
    let width = width.max(20).min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

fn clamp_u16(value: usize) -> u16 {
    u16::try_from(value).unwrap_or(u16::MAX)
}
