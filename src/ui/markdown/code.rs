use pulldown_cmark::CodeBlockKind;

pub(super) fn language_hint_from_codeblock_kind(kind: &CodeBlockKind<'_>) -> Option<String> {
    match kind {
        CodeBlockKind::Indented => None,
        CodeBlockKind::Fenced(info) => info
            .split_ascii_whitespace()
            .next()
            .filter(|lang| !lang.is_empty())
            .map(str::to_string),
    }
}

/// Drop the single trailing newline the parser leaves behind. Everything
/// else, tabs included, is kept so a copy yields the exact source.
pub(super) fn finish_code_text(raw: &str) -> String {
    let trimmed = raw.strip_suffix('\n').unwrap_or(raw);
    let trimmed = trimmed.strip_suffix('\r').unwrap_or(trimmed);
    trimmed.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pulldown_cmark::CowStr;

    #[test]
    fn fenced_info_string_keeps_first_word() {
        let kind = CodeBlockKind::Fenced(CowStr::from("python title=x.py"));
        assert_eq!(
            language_hint_from_codeblock_kind(&kind).as_deref(),
            Some("python")
        );
        let bare = CodeBlockKind::Fenced(CowStr::from(""));
        assert_eq!(language_hint_from_codeblock_kind(&bare), None);
        assert_eq!(
            language_hint_from_codeblock_kind(&CodeBlockKind::Indented),
            None
        );
    }

    #[test]
    fn finish_code_text_trims_one_newline_and_keeps_tabs() {
        assert_eq!(finish_code_text("print(1)\n"), "print(1)");
        assert_eq!(finish_code_text("a\n\n"), "a\n");
        assert_eq!(finish_code_text("\tx\n"), "\tx");
    }
}
