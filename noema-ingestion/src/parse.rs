//! Stage 1 — format detection and cleanup, spec.md §4.C9.

use regex::Regex;
use std::sync::LazyLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Html,
    Markdown,
    Plain,
}

/// HTML if the document contains `<`, else markdown if it contains `#`,
/// else plain.
pub fn detect_format(text: &str) -> Format {
    if text.contains('<') {
        Format::Html
    } else if text.contains('#') {
        Format::Markdown
    } else {
        Format::Plain
    }
}

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());
static IMAGE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"!\[([^\]]*)\]\([^)]*\)").unwrap());
static LINK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").unwrap());
static CODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"`([^`]*)`").unwrap());
static HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^#{1,6} (.+)$").unwrap());

fn decode_html_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
}

fn clean_html(text: &str) -> String {
    let stripped = TAG_RE.replace_all(text, "");
    decode_html_entities(&stripped)
}

fn clean_markdown(text: &str) -> String {
    let no_images = IMAGE_RE.replace_all(text, "$1");
    let no_links = LINK_RE.replace_all(&no_images, "$1");
    let no_code = CODE_RE.replace_all(&no_links, "$1");
    HEADING_RE.replace_all(&no_code, "[$1]").into_owned()
}

/// Parse a raw document into the cleaned text used by chunking, section
/// detection, and classification. Markdown headings are rewritten as
/// `[Heading]` markers so that a uniform `[...]`-marker scan can detect
/// sections regardless of source format — HTML documents carry no such
/// markers and simply fall back to `"introduction"` (see `section.rs`).
pub fn parse(text: &str) -> String {
    match detect_format(text) {
        Format::Html => clean_html(text),
        Format::Markdown => clean_markdown(text),
        Format::Plain => text.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_html_by_angle_bracket() {
        assert_eq!(detect_format("<p>hello</p>"), Format::Html);
    }

    #[test]
    fn detects_markdown_by_hash() {
        assert_eq!(detect_format("# Heading\nbody"), Format::Markdown);
    }

    #[test]
    fn falls_back_to_plain() {
        assert_eq!(detect_format("just plain text"), Format::Plain);
    }

    #[test]
    fn strips_html_tags_and_decodes_entities() {
        let cleaned = parse("<p>Rust &amp; Go</p>");
        assert_eq!(cleaned, "Rust & Go");
    }

    #[test]
    fn markdown_keeps_link_text_and_alt_text() {
        let cleaned = parse("See [the paper](https://example.com) and ![diagram](img.png)");
        assert_eq!(cleaned, "See the paper and diagram");
    }

    #[test]
    fn markdown_strips_inline_code_backticks() {
        let cleaned = parse("Call `foo()` to # start");
        assert_eq!(cleaned, "Call foo() to # start");
    }

    #[test]
    fn markdown_converts_headings_to_bracket_markers() {
        let cleaned = parse("# Introduction\nbody text");
        assert_eq!(cleaned, "[Introduction]\nbody text");
    }
}
