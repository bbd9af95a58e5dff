//! Turns the transcript into wrapped terminal lines.
//!
//! Layout is a pure function of the transcript, the copy-label state, the
//! theme and the width, so it can be tested without a terminal.

use std::time::Instant;

use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use super::theme::Theme;
use super::wrap::{hard_wrap_fixed, wrap_spans};
use crate::core::constants::{COPIED_LABEL, COPY_FAILED_LABEL};
use crate::core::copy_binder::CopyBinder;
use crate::core::transcript::{CodeBlockId, EntryBody, Transcript, TranscriptEntry};
use crate::ui::markdown::{InlineSpan, InlineStyle, RenderedReply, ReplyBlock};

const USER_PREFIX: &str = "You: ";
pub const TYPING_INDICATOR: &str = "◆ • • •";
const LOADER_WIDTH: usize = 24;

/// Result of a layout pass. `code_block_rows` records where each code block's
/// header landed so selection can scroll to it.
#[derive(Clone, Debug, Default)]
pub struct Layout {
    pub lines: Vec<Line<'static>>,
    pub code_block_rows: Vec<(CodeBlockId, usize)>,
}

impl Layout {
    pub fn row_of(&self, id: CodeBlockId) -> Option<usize> {
        self.code_block_rows
            .iter()
            .find(|(block, _)| *block == id)
            .map(|(_, row)| *row)
    }
}

pub struct LayoutContext<'a> {
    pub theme: &'a Theme,
    pub binder: &'a CopyBinder,
    pub width: usize,
    pub now: Instant,
    pub selected: Option<CodeBlockId>,
}

pub struct LayoutEngine;

impl LayoutEngine {
    pub fn layout_transcript(transcript: &Transcript, ctx: &LayoutContext<'_>) -> Layout {
        let mut layout = Layout::default();
        for entry in transcript.entries() {
            layout_entry(&mut layout, entry, ctx);
            layout.lines.push(Line::default());
        }
        layout
    }
}

fn layout_entry(layout: &mut Layout, entry: &TranscriptEntry, ctx: &LayoutContext<'_>) {
    let theme = ctx.theme;
    match &entry.body {
        EntryBody::User { text } => {
            for (index, line) in text.split('\n').enumerate() {
                let mut spans = Vec::with_capacity(2);
                if index == 0 {
                    spans.push(Span::styled(USER_PREFIX, theme.user_prefix_style));
                }
                spans.push(Span::styled(line.to_string(), theme.user_text_style));
                push_wrapped(layout, &spans, ctx.width);
            }
        }
        EntryBody::SystemNote { text, loader } => {
            for line in text.split('\n') {
                push_wrapped(
                    layout,
                    &[Span::styled(line.to_string(), theme.system_note_style)],
                    ctx.width,
                );
            }
            if let Some(progress) = loader.and_then(|loader| loader.progress(ctx.now)) {
                layout.lines.push(loader_line(progress, ctx));
            }
        }
        EntryBody::Assistant { reply, .. } => layout_reply(layout, entry, reply, ctx),
        EntryBody::Typing => {
            layout.lines.push(Line::from(Span::styled(
                TYPING_INDICATOR,
                theme.typing_indicator_style,
            )));
        }
    }
}

fn loader_line(progress: f32, ctx: &LayoutContext<'_>) -> Line<'static> {
    let width = LOADER_WIDTH.min(ctx.width.max(1));
    let filled = ((progress.clamp(0.0, 1.0) * width as f32).round() as usize).min(width);
    Line::from(vec![
        Span::styled("━".repeat(filled), ctx.theme.loader_style),
        Span::styled("─".repeat(width - filled), ctx.theme.code_header_style),
    ])
}

fn layout_reply(
    layout: &mut Layout,
    entry: &TranscriptEntry,
    reply: &RenderedReply,
    ctx: &LayoutContext<'_>,
) {
    let theme = ctx.theme;
    let base = theme.assistant_text_style;
    let mut code_index = 0;
    let mut previous: Option<&ReplyBlock> = None;

    for block in &reply.blocks {
        if let Some(prev) = previous {
            let tight = matches!(
                (prev, block),
                (ReplyBlock::ListItem { .. }, ReplyBlock::ListItem { .. })
                    | (ReplyBlock::Quote(_), ReplyBlock::Quote(_))
            );
            if !tight {
                layout.lines.push(Line::default());
            }
        }
        previous = Some(block);

        match block {
            ReplyBlock::Paragraph(spans) => {
                push_inline(layout, &[], spans, base, theme, ctx.width);
            }
            ReplyBlock::Heading { level, spans } => {
                let marker = format!("{} ", "#".repeat(usize::from(*level)));
                let prefix = [Span::styled(marker, theme.heading_style)];
                push_inline(layout, &prefix, spans, theme.heading_style, theme, ctx.width);
            }
            ReplyBlock::ListItem {
                depth,
                marker,
                spans,
            } => {
                let indent = "  ".repeat(depth.saturating_sub(1));
                let marker = if marker.is_empty() {
                    " ".to_string()
                } else {
                    marker.clone()
                };
                let prefix = [Span::styled(format!("{indent}{marker} "), base)];
                push_inline(layout, &prefix, spans, base, theme, ctx.width);
            }
            ReplyBlock::Quote(spans) => {
                let prefix = [Span::styled("│ ", theme.quote_style)];
                push_inline(layout, &prefix, spans, theme.quote_style, theme, ctx.width);
            }
            ReplyBlock::Code(code) => {
                let id = CodeBlockId {
                    entry: entry.id,
                    index: code_index,
                };
                code_index += 1;
                layout.code_block_rows.push((id, layout.lines.len()));
                let selected = ctx.selected == Some(id);
                layout
                    .lines
                    .push(code_header(code.language.as_deref(), id, selected, ctx));

                let mut code_style = theme.code_block_style;
                if selected {
                    code_style = code_style.patch(theme.selection_highlight_style);
                }
                for source_line in code.code.split('\n') {
                    let display = expand_tabs(source_line);
                    for row in hard_wrap_fixed(&display, ctx.width) {
                        let pad = ctx.width.saturating_sub(UnicodeWidthStr::width(row));
                        layout.lines.push(Line::from(Span::styled(
                            format!("{row}{}", " ".repeat(pad)),
                            code_style,
                        )));
                    }
                }
            }
            ReplyBlock::Rule => {
                layout.lines.push(Line::from(Span::styled(
                    "─".repeat(ctx.width.max(1)),
                    theme.code_header_style,
                )));
            }
        }
    }
}

/// Tabs render as four columns; the stored code keeps them.
fn expand_tabs(line: &str) -> String {
    line.replace('\t', "    ")
}

fn code_header(
    language: Option<&str>,
    id: CodeBlockId,
    selected: bool,
    ctx: &LayoutContext<'_>,
) -> Line<'static> {
    let theme = ctx.theme;
    let label = ctx.binder.label(id, ctx.now);
    let label_style = match label {
        COPIED_LABEL => theme.copied_label_style,
        COPY_FAILED_LABEL => theme.copy_failed_label_style,
        _ => theme.copy_label_style,
    };
    let mut header_style = theme.code_header_style;
    if selected {
        header_style = header_style.patch(theme.selection_highlight_style);
    }

    let title = format!("─ {} ", language.unwrap_or("code"));
    let button = format!(" [{label}]");
    let used = UnicodeWidthStr::width(title.as_str()) + UnicodeWidthStr::width(button.as_str());
    let fill = "─".repeat(ctx.width.saturating_sub(used));

    let mut button_style = label_style;
    if selected {
        button_style = button_style
            .patch(theme.selection_highlight_style)
            .add_modifier(Modifier::BOLD);
    }
    Line::from(vec![
        Span::styled(title, header_style),
        Span::styled(fill, header_style),
        Span::styled(button, button_style),
    ])
}

fn inline_style(style: InlineStyle, base: Style, theme: &Theme) -> Style {
    let mut out = base;
    if style.code {
        out = out.patch(theme.inline_code_style);
    }
    if style.link {
        out = out.patch(theme.link_style);
    }
    if style.bold {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.italic {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.strikethrough {
        out = out.add_modifier(Modifier::CROSSED_OUT);
    }
    out
}

/// Lay out inline spans behind an optional prefix. Hard breaks inside the
/// spans start a new row; continuation rows are indented under the prefix.
fn push_inline(
    layout: &mut Layout,
    prefix: &[Span<'static>],
    spans: &[InlineSpan],
    base: Style,
    theme: &Theme,
    width: usize,
) {
    let prefix_width: usize = prefix
        .iter()
        .map(|span| UnicodeWidthStr::width(span.content.as_ref()))
        .sum();
    let indent = " ".repeat(prefix_width);

    let mut logical: Vec<Vec<Span<'static>>> = vec![Vec::new()];
    for span in spans {
        let style = inline_style(span.style, base, theme);
        for (index, piece) in span.text.split('\n').enumerate() {
            if index > 0 {
                logical.push(Vec::new());
            }
            if !piece.is_empty() {
                if let Some(current) = logical.last_mut() {
                    current.push(Span::styled(piece.to_string(), style));
                }
            }
        }
    }

    let body_width = width.saturating_sub(prefix_width).max(1);
    let mut first = true;
    for line in logical {
        for row in wrap_spans(&line, body_width) {
            let mut spans = Vec::with_capacity(row.len() + prefix.len());
            if first {
                spans.extend(prefix.iter().cloned());
                first = false;
            } else if prefix_width > 0 {
                spans.push(Span::raw(indent.clone()));
            }
            spans.extend(row);
            layout.lines.push(Line::from(spans));
        }
    }
}

fn push_wrapped(layout: &mut Layout, spans: &[Span<'static>], width: usize) {
    for row in wrap_spans(spans, width) {
        layout.lines.push(Line::from(row));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::LOADER_DURATION;

    fn text_of(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn layout_texts(transcript: &Transcript, binder: &CopyBinder, now: Instant) -> Vec<String> {
        let theme = Theme::dark_default();
        let ctx = LayoutContext {
            theme: &theme,
            binder,
            width: 30,
            now,
            selected: None,
        };
        LayoutEngine::layout_transcript(transcript, &ctx)
            .lines
            .iter()
            .map(text_of)
            .collect()
    }

    #[test]
    fn user_messages_are_prefixed_and_literal() {
        let mut transcript = Transcript::new();
        transcript.append_user_message("**not bold**");
        let lines = layout_texts(&transcript, &CopyBinder::new(), Instant::now());
        assert_eq!(lines[0], "You: **not bold**");
    }

    #[test]
    fn typing_placeholder_shows_indicator() {
        let mut transcript = Transcript::new();
        let _handle = transcript.append_typing_placeholder();
        let lines = layout_texts(&transcript, &CopyBinder::new(), Instant::now());
        assert_eq!(lines[0], TYPING_INDICATOR);
    }

    #[test]
    fn code_blocks_show_language_and_copy_label() {
        let mut transcript = Transcript::new();
        transcript.append_assistant_message("Run this:\n\n```python\nprint(1)\n```");
        let mut binder = CopyBinder::new();
        binder.bind_new(&transcript);
        let now = Instant::now();

        let lines = layout_texts(&transcript, &binder, now);
        assert_eq!(lines[0], "Run this:");
        assert!(lines[2].starts_with("─ python "));
        assert!(lines[2].ends_with(" [copy]"));
        assert_eq!(lines[3].trim_end(), "print(1)");

        binder.finish(binder.targets()[0], Ok(()), now);
        let lines = layout_texts(&transcript, &binder, now);
        assert!(lines[2].ends_with(" [copied!]"));
    }

    #[test]
    fn code_tabs_render_as_spaces() {
        let mut transcript = Transcript::new();
        transcript.append_assistant_message("```\n\tx\n```");
        let lines = layout_texts(&transcript, &CopyBinder::new(), Instant::now());
        assert_eq!(lines[1].trim_end(), "    x");
    }

    #[test]
    fn code_rows_are_recorded() {
        let mut transcript = Transcript::new();
        let entry = transcript.append_assistant_message("intro\n\n```\na\n```");
        let theme = Theme::dark_default();
        let binder = CopyBinder::new();
        let ctx = LayoutContext {
            theme: &theme,
            binder: &binder,
            width: 20,
            now: Instant::now(),
            selected: None,
        };
        let layout = LayoutEngine::layout_transcript(&transcript, &ctx);
        assert_eq!(layout.row_of(CodeBlockId { entry, index: 0 }), Some(2));
    }

    #[test]
    fn loader_disappears_after_its_duration() {
        let mut transcript = Transcript::new();
        let start = Instant::now();
        transcript.append_system_note("Switched model", true, start);
        let binder = CopyBinder::new();

        let running = layout_texts(&transcript, &binder, start + LOADER_DURATION / 2);
        assert_eq!(running.len(), 3);
        assert!(running[1].contains('━'));

        let finished = layout_texts(&transcript, &binder, start + LOADER_DURATION);
        assert_eq!(finished.len(), 2);
    }

    #[test]
    fn list_items_indent_by_depth() {
        let mut transcript = Transcript::new();
        transcript.append_assistant_message("- top\n  - nested\n");
        let lines = layout_texts(&transcript, &CopyBinder::new(), Instant::now());
        assert_eq!(lines[0], "• top");
        assert_eq!(lines[1], "  • nested");
    }

    #[test]
    fn system_notes_render_italic() {
        let mut transcript = Transcript::new();
        transcript.append_system_note("note", false, Instant::now());
        let theme = Theme::dark_default();
        let binder = CopyBinder::new();
        let ctx = LayoutContext {
            theme: &theme,
            binder: &binder,
            width: 20,
            now: Instant::now(),
            selected: None,
        };
        let layout = LayoutEngine::layout_transcript(&transcript, &ctx);
        assert!(layout.lines[0].spans[0]
            .style
            .add_modifier
            .contains(Modifier::ITALIC));
    }
}
