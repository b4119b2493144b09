//! Sliding-window chunking of extracted document text.
//!
//! Chunks are sized for the embedding model in approximate tokens
//! (4 chars/token for English text) with an overlap between neighbours
//! for context continuity, and cut at natural boundaries where one is
//! close enough.

/// Maximum number of tokens per chunk (approximate).
const MAX_CHUNK_TOKENS: usize = 512;

/// Number of tokens to overlap between chunks.
const OVERLAP_TOKENS: usize = 50;

/// Approximate characters per token.
const CHARS_PER_TOKEN: usize = 4;

const MAX_CHUNK_CHARS: usize = MAX_CHUNK_TOKENS * CHARS_PER_TOKEN;
const OVERLAP_CHARS: usize = OVERLAP_TOKENS * CHARS_PER_TOKEN;

/// Estimate the number of tokens in text.
pub fn estimate_tokens(text: &str) -> usize {
    text.len() / CHARS_PER_TOKEN
}

/// Split text into overlapping, embedding-ready chunks.
pub fn chunk_text(text: &str) -> Vec<String> {
    let text = text.trim();
    if text.is_empty() {
        return Vec::new();
    }
    if text.len() <= MAX_CHUNK_CHARS {
        return vec![text.to_string()];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let window_end = char_floor(text, (start + MAX_CHUNK_CHARS).min(text.len()));
        let end = if window_end < text.len() {
            break_point(&text[start..window_end])
                .map(|offset| start + offset)
                .unwrap_or(window_end)
        } else {
            window_end
        };

        let chunk = text[start..end].trim();
        if !chunk.is_empty() {
            chunks.push(chunk.to_string());
        }

        // Step back by the overlap, unless the chunk was so small that
        // doing so would loop forever.
        let next = char_floor(text, end.saturating_sub(OVERLAP_CHARS));
        start = if next > start { next } else { end };
    }

    chunks
}

/// Largest char boundary at or below `index`.
fn char_floor(text: &str, mut index: usize) -> usize {
    while index > 0 && !text.is_char_boundary(index) {
        index -= 1;
    }
    index
}

/// Find a natural break offset within a window, preferring paragraph,
/// then sentence, then line, then clause, then word boundaries. Breaks
/// in the first third of the window are not worth taking.
fn break_point(window: &str) -> Option<usize> {
    let minimum = window.len() / 3;

    if let Some(pos) = window.rfind("\n\n") {
        if pos > minimum {
            return Some(pos + 2);
        }
    }

    for pattern in &[". ", "! ", "? ", ".\n", "!\n", "?\n"] {
        if let Some(pos) = window.rfind(pattern) {
            if pos > minimum {
                return Some(pos + pattern.len());
            }
        }
    }

    if let Some(pos) = window.rfind('\n') {
        if pos > minimum {
            return Some(pos + 1);
        }
    }

    for pattern in &[", ", "; "] {
        if let Some(pos) = window.rfind(pattern) {
            if pos > window.len() / 2 {
                return Some(pos + pattern.len());
            }
        }
    }

    window.rfind(' ').map(|pos| pos + 1)
}
