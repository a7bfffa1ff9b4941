// WHY: standalone normalization logic so every downstream pass sees one canonical form
// Collapsing happens once per message; extraction and scoring never re-trim

/// Normalize a raw message by trimming and collapsing whitespace runs.
/// Every maximal run of whitespace (spaces, tabs, line breaks) becomes a
/// single ASCII space; leading and trailing whitespace is dropped.
pub fn normalize_message(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    normalize_message_into(text, &mut result);
    result
}

/// Normalize into a supplied buffer to avoid allocation.
/// WHY: enables buffer reuse when scanning message batches
pub fn normalize_message_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            // Leading whitespace never flushes; interior runs flush as one space
            pending_space = !buffer.is_empty();
        } else {
            if pending_space {
                buffer.push(' ');
                pending_space = false;
            }
            buffer.push(ch);
        }
    }
}

/// Lowercase a normalized message char-by-char, keeping the output the same
/// length as the input so candidate spans stay valid in both views.
/// Multi-char lowercase expansions are represented by their first char.
pub(crate) fn lowercase_aligned(chars: &[char]) -> Vec<char> {
    chars
        .iter()
        .map(|&ch| ch.to_lowercase().next().unwrap_or(ch))
        .collect()
}
