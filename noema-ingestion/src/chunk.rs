//! Stage 2 — sliding-window chunking, spec.md §4.C9.

/// One window of the document: its start offset — a *byte* offset into
/// the parsed text, so it composes directly with `str` slicing in
/// `section::detect_section` — and its content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub start: usize,
    pub content: String,
}

/// Slide a `size`-character window across `text`, advancing by
/// `size - overlap` each step. The last window may be shorter. A
/// document shorter than `size` yields exactly one chunk covering the
/// whole input; the empty document yields one empty chunk.
pub fn chunk_text(text: &str, size: usize, overlap: usize) -> Vec<Chunk> {
    // Byte offset of every char boundary, plus one past the end, so a
    // char-count window maps back to a byte range without splitting a
    // multi-byte character.
    let mut boundaries: Vec<usize> = text.char_indices().map(|(i, _)| i).collect();
    boundaries.push(text.len());
    let len = boundaries.len() - 1;

    if len <= size {
        return vec![Chunk { start: 0, content: text.to_string() }];
    }

    let stride = size.saturating_sub(overlap).max(1);
    let mut chunks = Vec::new();
    let mut start = 0;
    while start < len {
        let end = (start + size).min(len);
        chunks.push(Chunk { start: boundaries[start], content: text[boundaries[start]..boundaries[end]].to_string() });
        if end == len {
            break;
        }
        start += stride;
    }
    chunks
}
