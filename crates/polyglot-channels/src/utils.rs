//! Shared utilities for channel implementations.

/// Largest byte index `<= index` that falls on a char boundary.
fn floor_boundary(text: &str, index: usize) -> usize {
    let mut i = index.min(text.len());
    while !text.is_char_boundary(i) {
        i -= 1;
    }
    i
}

/// Split a long message into chunks that respect a platform's length limit.
///
/// `max_len` is in bytes, which never undercounts characters. Boundaries are
/// kept on UTF-8 char boundaries and prefer the last newline in range.
pub fn split_message(text: &str, max_len: usize) -> Vec<&str> {
    if text.len() <= max_len {
        return vec![text];
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    while start < text.len() {
        let mut end = floor_boundary(text, start + max_len);
        if end == start {
            // A single char wider than max_len; emit it whole.
            end = text[start..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| start + i)
                .unwrap_or(text.len());
        }
        let break_at = if end < text.len() {
            text[start..end]
                .rfind('\n')
                .filter(|&i| i > 0)
                .map(|i| start + i + 1)
                .unwrap_or(end)
        } else {
            end
        };
        chunks.push(&text[start..break_at]);
        start = break_at;
    }

    chunks
}
