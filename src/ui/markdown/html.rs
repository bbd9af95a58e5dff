use pulldown_cmark::{html, Event, Parser, Tag, TagEnd};

use super::markdown_options;
use crate::core::constants::COPY_LABEL;

/// Render reply markdown to HTML, wrapping each code block with a copy button.
///
/// The rewrite happens on the parser's event stream, so code content is still
/// escaped by the HTML writer and converter output never gets pattern-matched.
pub fn render_html(markdown: &str) -> String {
    let open = format!(
        "<div class=\"code-block\"><button class=\"copy-btn\" type=\"button\">{COPY_LABEL}</button>"
    );
    let events = Parser::new_ext(markdown, markdown_options()).flat_map(|event| match event {
        Event::Start(Tag::CodeBlock(kind)) => {
            vec![Event::Html(open.clone().into()), Event::Start(Tag::CodeBlock(kind))]
        }
        Event::End(TagEnd::CodeBlock) => {
            vec![Event::End(TagEnd::CodeBlock), Event::Html("</div>\n".into())]
        }
        other => vec![other],
    });

    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

/// Escape literal text for inclusion in HTML body content.
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    html::push_html(&mut out, std::iter::once(Event::Text(text.into())));
    out
}
