use ratatui::text::Span;
use unicode_width::UnicodeWidthStr;

fn char_width(ch: char) -> usize {
    UnicodeWidthStr::width(ch.encode_utf8(&mut [0; 4]))
}

/// Split `text` into alternating word and whitespace runs.
fn tokens(text: &str) -> impl Iterator<Item = &str> {
    let mut rest = text;
    std::iter::from_fn(move || {
        let first = rest.chars().next()?;
        let is_space = first.is_whitespace();
        let end = rest
            .char_indices()
            .find(|(_, ch)| ch.is_whitespace() != is_space)
            .map(|(pos, _)| pos)
            .unwrap_or(rest.len());
        let (token, tail) = rest.split_at(end);
        rest = tail;
        Some(token)
    })
}

struct LineBuilder {
    lines: Vec<Vec<Span<'static>>>,
    current: Vec<Span<'static>>,
    width: usize,
}

impl LineBuilder {
    fn push(&mut self, span: Span<'static>, width: usize) {
        if let Some(last) = self.current.last_mut() {
            if last.style == span.style {
                last.content.to_mut().push_str(&span.content);
                self.width += width;
                return;
            }
        }
        self.current.push(span);
        self.width += width;
    }

    fn break_line(&mut self) {
        // Trailing whitespace never starts or ends a wrapped row.
        while let Some(last) = self.current.last_mut() {
            let trimmed = last.content.trim_end().len();
            if trimmed == 0 {
                self.current.pop();
                continue;
            }
            last.content.to_mut().truncate(trimmed);
            break;
        }
        self.lines.push(std::mem::take(&mut self.current));
        self.width = 0;
    }
}

/// Word-wrap styled spans to `max_width` columns. Words wider than a whole
/// row are broken at character boundaries.
pub fn wrap_spans(spans: &[Span<'static>], max_width: usize) -> Vec<Vec<Span<'static>>> {
    let max_width = max_width.max(1);
    let mut builder = LineBuilder {
        lines: Vec::new(),
        current: Vec::new(),
        width: 0,
    };

    for span in spans {
        for token in tokens(&span.content) {
            let token_width = UnicodeWidthStr::width(token);
            let is_space = token.starts_with(char::is_whitespace);

            if is_space {
                if builder.width == 0 {
                    continue;
                }
                if builder.width + token_width > max_width {
                    builder.break_line();
                    continue;
                }
                builder.push(Span::styled(token.to_string(), span.style), token_width);
                continue;
            }

            if builder.width > 0 && builder.width + token_width > max_width {
                builder.break_line();
            }
            if token_width <= max_width {
                builder.push(Span::styled(token.to_string(), span.style), token_width);
                continue;
            }
            for piece in hard_wrap_fixed(token, max_width) {
                if builder.width > 0 {
                    builder.break_line();
                }
                builder.push(
                    Span::styled(piece.to_string(), span.style),
                    UnicodeWidthStr::width(piece),
                );
            }
        }
    }

    if !builder.current.is_empty() || builder.lines.is_empty() {
        builder.break_line();
    }
    builder.lines
}

/// Break `text` into rows of at most `max_width` columns, ignoring word
/// boundaries. Used for code, where whitespace is significant.
pub fn hard_wrap_fixed(text: &str, max_width: usize) -> Vec<&str> {
    let max_width = max_width.max(1);
    let mut rows = Vec::new();
    let mut start = 0;
    let mut used = 0;
    for (pos, ch) in text.char_indices() {
        let width = char_width(ch);
        if used + width > max_width && pos > start {
            rows.push(&text[start..pos]);
            start = pos;
            used = 0;
        }
        used += width;
    }
    if start < text.len() || rows.is_empty() {
        rows.push(&text[start..]);
    }
    rows
}
