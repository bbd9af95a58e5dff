//! Assistant reply rendering.
//!
//! Replies arrive as markdown. [`render_reply`] turns them into a typed block
//! tree the terminal layout walks directly. Code blocks are first-class nodes
//! so the copy binder can address them. [`render_html`] produces the HTML
//! rendition used by transcript export, with a copy button wrapped around
//! every code block.

mod code;
mod html;
mod render;

#[cfg(test)]
mod tests;

pub use html::{escape_text, render_html};
pub use render::{
    render_reply, CodeBlock, InlineSpan, InlineStyle, RenderedReply, ReplyBlock,
};

use pulldown_cmark::Options;

pub(crate) fn markdown_options() -> Options {
    Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH | Options::ENABLE_TASKLISTS
}
