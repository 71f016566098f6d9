//! Text helper functions

/// Keep the first `count` sentences of `text`.
///
/// A sentence ends with `.`, `!` or `?` followed by whitespace or the end of
/// the text. Text with fewer sentences comes back trimmed but otherwise whole.
pub fn limit_sentence(text: &str, count: usize) -> String {
    if count == 0 {
        return String::new();
    }

    let mut seen = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((_, c)) = chars.next() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }

        // Swallow runs like "?!" or "..."
        while let Some((_, next)) = chars.peek() {
            if matches!(next, '.' | '!' | '?') {
                chars.next();
            } else {
                break;
            }
        }

        let end = chars.peek().map(|(i, _)| *i).unwrap_or(text.len());
        let at_boundary = chars.peek().map(|(_, c)| c.is_whitespace()).unwrap_or(true);
        if at_boundary {
            seen += 1;
            if seen == count {
                return text[..end].trim().to_string();
            }
        }
    }

    text.trim().to_string()
}
