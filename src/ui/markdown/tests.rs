use super::*;

fn text_of(spans: &[InlineSpan]) -> String {
    spans.iter().map(|span| span.text.as_str()).collect()
}

#[test]
fn fenced_code_block_becomes_a_code_node() {
    let reply = render_reply("Try this:\n\n```python\nprint(1)\n```\n");
    assert_eq!(reply.code_block_count(), 1);
    let block = reply.code_block(0).expect("code block");
    assert_eq!(block.code, "print(1)");
    assert_eq!(block.language.as_deref(), Some("python"));
    assert!(matches!(reply.blocks[0], ReplyBlock::Paragraph(_)));
}

#[test]
fn multiple_code_blocks_keep_their_order() {
    let reply = render_reply("```\nfirst\n```\n\ntext\n\n```rust\nsecond\n```");
    let codes: Vec<&str> = reply.code_blocks().map(|b| b.code.as_str()).collect();
    assert_eq!(codes, vec!["first", "second"]);
    assert_eq!(reply.code_block(0).and_then(|b| b.language.as_deref()), None);
}

#[test]
fn inline_styles_are_tracked() {
    let reply = render_reply("Use **bold**, *italic* and `code`.");
    let ReplyBlock::Paragraph(spans) = &reply.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(text_of(spans), "Use bold, italic and code.");
    assert!(spans.iter().any(|s| s.text == "bold" && s.style.bold));
    assert!(spans.iter().any(|s| s.text == "italic" && s.style.italic));
    assert!(spans.iter().any(|s| s.text == "code" && s.style.code));
}

#[test]
fn lists_get_markers_and_depth() {
    let reply = render_reply("1. one\n2. two\n   - nested\n");
    let items: Vec<(usize, String, String)> = reply
        .blocks
        .iter()
        .filter_map(|block| match block {
            ReplyBlock::ListItem {
                depth,
                marker,
                spans,
            } => Some((*depth, marker.clone(), text_of(spans))),
            _ => None,
        })
        .collect();
    assert_eq!(
        items,
        vec![
            (1, "1.".to_string(), "one".to_string()),
            (1, "2.".to_string(), "two".to_string()),
            (2, "•".to_string(), "nested".to_string()),
        ]
    );
}

#[test]
fn headings_quotes_and_rules() {
    let reply = render_reply("## Fix\n\n> careful\n\n---\n");
    assert!(matches!(&reply.blocks[0], ReplyBlock::Heading { level: 2, spans } if text_of(spans) == "Fix"));
    assert!(matches!(&reply.blocks[1], ReplyBlock::Quote(spans) if text_of(spans) == "careful"));
    assert_eq!(reply.blocks[2], ReplyBlock::Rule);
}

#[test]
fn links_show_their_target() {
    let reply = render_reply("See [docs](https://docs.rs).");
    let ReplyBlock::Paragraph(spans) = &reply.blocks[0] else {
        panic!("expected paragraph");
    };
    assert_eq!(text_of(spans), "See docs (https://docs.rs).");
    assert!(spans.iter().any(|s| s.text == "docs" && s.style.link));
}

#[test]
fn html_wraps_each_code_block_with_one_copy_button() {
    let html = render_html("Run:\n\n```python\nprint(1)\n```\n");
    assert_eq!(html.matches("class=\"copy-btn\"").count(), 1);
    assert!(html.contains(">copy</button>"));
    assert!(html.contains("<code class=\"language-python\">print(1)\n</code>"));
    let wrapper = html.find("class=\"code-block\"").expect("wrapper");
    let code = html.find("print(1)").expect("code");
    assert!(wrapper < code);
    assert!(html.contains("</code></pre>\n</div>"));
}

#[test]
fn html_escapes_code_content() {
    let html = render_html("```\nif a < b && c > d {}\n```");
    assert!(html.contains("if a &lt; b &amp;&amp; c &gt; d {}"));
}

#[test]
fn html_without_code_has_no_copy_buttons() {
    let html = render_html("just *text*");
    assert!(!html.contains("copy-btn"));
    assert!(html.contains("<em>text</em>"));
}

#[test]
fn escape_text_neutralizes_markup() {
    assert_eq!(escape_text("<b>hi</b> & bye"), "&lt;b&gt;hi&lt;/b&gt; &amp; bye");
}
