use pulldown_cmark::{Event, Parser, Tag, TagEnd};

use super::code::{finish_code_text, language_hint_from_codeblock_kind};
use super::markdown_options;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InlineStyle {
    pub bold: bool,
    pub italic: bool,
    pub code: bool,
    pub strikethrough: bool,
    pub link: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineSpan {
    pub text: String,
    pub style: InlineStyle,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeBlock {
    pub language: Option<String>,
    /// Plain code text exactly as it should land on the clipboard.
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyBlock {
    Paragraph(Vec<InlineSpan>),
    Heading {
        level: u8,
        spans: Vec<InlineSpan>,
    },
    /// One visual line of a list item. Continuation paragraphs of the same
    /// item carry an empty marker.
    ListItem {
        depth: usize,
        marker: String,
        spans: Vec<InlineSpan>,
    },
    Quote(Vec<InlineSpan>),
    Code(CodeBlock),
    Rule,
}

/// Typed rendition of one assistant reply.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedReply {
    pub blocks: Vec<ReplyBlock>,
}

impl RenderedReply {
    pub fn code_blocks(&self) -> impl Iterator<Item = &CodeBlock> {
        self.blocks.iter().filter_map(|block| match block {
            ReplyBlock::Code(code) => Some(code),
            _ => None,
        })
    }

    pub fn code_block(&self, index: usize) -> Option<&CodeBlock> {
        self.code_blocks().nth(index)
    }

    pub fn code_block_count(&self) -> usize {
        self.code_blocks().count()
    }
}

pub fn render_reply(markdown: &str) -> RenderedReply {
    let mut builder = ReplyBuilder::default();
    for event in Parser::new_ext(markdown, markdown_options()) {
        builder.handle(event);
    }
    builder.finish()
}

#[derive(Clone, Copy)]
enum ListKind {
    Unordered,
    Ordered(u64),
}

struct ItemFrame {
    depth: usize,
    marker: String,
    emitted: bool,
}

#[derive(Default)]
struct ReplyBuilder {
    blocks: Vec<ReplyBlock>,
    spans: Vec<InlineSpan>,
    style_stack: Vec<InlineStyle>,
    list_stack: Vec<ListKind>,
    items: Vec<ItemFrame>,
    link_targets: Vec<String>,
    quote_depth: usize,
    heading: Option<u8>,
    code: Option<(Option<String>, String)>,
    table_cell_index: usize,
}

impl ReplyBuilder {
    fn handle(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => {
                if let Some((_, buffer)) = self.code.as_mut() {
                    buffer.push_str(&text);
                } else {
                    self.push_text(&text);
                }
            }
            Event::Code(text) => {
                let style = InlineStyle {
                    code: true,
                    ..self.current_style()
                };
                self.push_styled(&text, style);
            }
            Event::Html(text) => self.push_text(text.trim_end_matches('\n')),
            Event::InlineHtml(text) => self.push_text(&text),
            Event::SoftBreak => self.push_text(" "),
            Event::HardBreak => self.push_text("\n"),
            Event::Rule => {
                self.flush_inline();
                self.blocks.push(ReplyBlock::Rule);
            }
            Event::TaskListMarker(checked) => {
                self.push_text(if checked { "[x] " } else { "[ ] " });
            }
            Event::FootnoteReference(label) => self.push_text(&format!("[^{label}]")),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { level, .. } => {
                self.flush_inline();
                self.heading = Some(level as u8);
            }
            Tag::BlockQuote(_) => {
                self.flush_inline();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(kind) => {
                self.flush_inline();
                self.code = Some((language_hint_from_codeblock_kind(&kind), String::new()));
            }
            Tag::List(start) => {
                self.flush_inline();
                self.list_stack.push(match start {
                    Some(n) => ListKind::Ordered(n),
                    None => ListKind::Unordered,
                });
            }
            Tag::Item => {
                self.flush_inline();
                let marker = match self.list_stack.last_mut() {
                    Some(ListKind::Ordered(n)) => {
                        let current = *n;
                        *n += 1;
                        format!("{current}.")
                    }
                    _ => "•".to_string(),
                };
                self.items.push(ItemFrame {
                    depth: self.list_stack.len().max(1),
                    marker,
                    emitted: false,
                });
            }
            Tag::Emphasis => self.push_style(|s| s.italic = true),
            Tag::Strong => self.push_style(|s| s.bold = true),
            Tag::Strikethrough => self.push_style(|s| s.strikethrough = true),
            Tag::Link { dest_url, .. } | Tag::Image { dest_url, .. } => {
                self.push_style(|s| s.link = true);
                self.link_targets.push(dest_url.to_string());
            }
            Tag::Table(_) => self.flush_inline(),
            Tag::TableHead | Tag::TableRow => self.table_cell_index = 0,
            Tag::TableCell => {
                if self.table_cell_index > 0 {
                    self.push_styled(" │ ", InlineStyle::default());
                }
                self.table_cell_index += 1;
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph | TagEnd::TableHead | TagEnd::TableRow | TagEnd::Table => {
                self.flush_inline()
            }
            TagEnd::Heading(_) => {
                self.flush_inline();
                self.heading = None;
            }
            TagEnd::BlockQuote(_) => {
                self.flush_inline();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => {
                if let Some((language, raw)) = self.code.take() {
                    self.blocks.push(ReplyBlock::Code(CodeBlock {
                        language,
                        code: finish_code_text(&raw),
                    }));
                }
            }
            TagEnd::List(_) => {
                self.flush_inline();
                self.list_stack.pop();
            }
            TagEnd::Item => {
                self.flush_inline();
                self.items.pop();
            }
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.style_stack.pop();
            }
            TagEnd::Link | TagEnd::Image => {
                self.style_stack.pop();
                if let Some(target) = self.link_targets.pop() {
                    let shown = self
                        .spans
                        .last()
                        .is_some_and(|span| span.text.ends_with(target.as_str()));
                    if !target.is_empty() && !shown {
                        self.push_styled(&format!(" ({target})"), self.current_style());
                    }
                }
            }
            _ => {}
        }
    }

    fn current_style(&self) -> InlineStyle {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, apply: impl FnOnce(&mut InlineStyle)) {
        let mut style = self.current_style();
        apply(&mut style);
        self.style_stack.push(style);
    }

    fn push_text(&mut self, text: &str) {
        self.push_styled(text, self.current_style());
    }

    fn push_styled(&mut self, text: &str, style: InlineStyle) {
        if text.is_empty() {
            return;
        }
        if let Some(last) = self.spans.last_mut() {
            if last.style == style {
                last.text.push_str(text);
                return;
            }
        }
        self.spans.push(InlineSpan {
            text: text.to_string(),
            style,
        });
    }

    fn flush_inline(&mut self) {
        if self.spans.iter().all(|span| span.text.trim().is_empty()) {
            self.spans.clear();
            return;
        }
        let spans = std::mem::take(&mut self.spans);

        let block = if let Some(level) = self.heading {
            ReplyBlock::Heading { level, spans }
        } else if let Some(item) = self.items.last_mut() {
            let marker = if item.emitted {
                String::new()
            } else {
                item.marker.clone()
            };
            item.emitted = true;
            ReplyBlock::ListItem {
                depth: item.depth,
                marker,
                spans,
            }
        } else if self.quote_depth > 0 {
            ReplyBlock::Quote(spans)
        } else {
            ReplyBlock::Paragraph(spans)
        };
        self.blocks.push(block);
    }

    fn finish(mut self) -> RenderedReply {
        self.flush_inline();
        if let Some((language, raw)) = self.code.take() {
            self.blocks.push(ReplyBlock::Code(CodeBlock {
                language,
                code: finish_code_text(&raw),
            }));
        }
        RenderedReply {
            blocks: self.blocks,
        }
    }
}
