//! Stage 3 — section detection, spec.md §4.C9.
//!
//! Scans backward from a chunk's start position for the nearest
//! preceding `[Heading]` marker `parse::parse` leaves in the text (the
//! post-parse equivalent of the raw `^#{1,6} (.+)$` markdown syntax —
//! see `parse.rs`'s doc comment for why detection runs against the
//! already-converted markers rather than the original heading syntax).

use std::sync::LazyLock;

use regex::Regex;

static BRACKET_HEADING_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?m)^\[(.+)\]$").unwrap());

pub const DEFAULT_SECTION: &str = "introduction";

/// The section a chunk starting at `chunk_start` (a byte offset into
/// `full_text`) belongs to.
pub fn detect_section(full_text: &str, chunk_start: usize) -> String {
    let preceding = &full_text[..chunk_start.min(full_text.len())];
    BRACKET_HEADING_RE
        .captures_iter(preceding)
        .last()
        .map(|cap| cap[1].to_string())
        .unwrap_or_else(|| DEFAULT_SECTION.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falls_back_to_introduction_with_no_heading() {
        assert_eq!(detect_section("plain body text here", 10), DEFAULT_SECTION);
    }

    #[test]
    fn finds_the_nearest_preceding_heading() {
        let text = "[Intro]\nfirst part\n[Methods]\nsecond part";
        let methods_start = text.find("second part").unwrap();
        assert_eq!(detect_section(text, methods_start), "Methods");
    }

    #[test]
    fn ignores_headings_that_come_after_the_chunk() {
        let text = "body before\n[Later]\nmore body";
        assert_eq!(detect_section(text, 5), DEFAULT_SECTION);
    }
}
