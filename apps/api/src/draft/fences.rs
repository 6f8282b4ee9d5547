//! Markdown fence stripping — models love to wrap JSON in ``` blocks.

/// Removes one layer of leading/trailing triple-backtick fencing.
///
/// Only a fence at the very start of the (trimmed) text counts, and a
/// matching closing fence must exist later; otherwise the input is returned
/// trimmed but unchanged. A bare alphabetic language tag on the fence's
/// first line (```` ```json ````) is dropped. Never fails — malformed
/// fences are treated as "no fence".
pub fn strip_fences(text: &str) -> &str {
    let trimmed = text.trim();
    if !trimmed.starts_with("```") {
        return trimmed;
    }

    let mut parts = trimmed.split("```");
    parts.next(); // empty segment before the leading fence
    let Some(inner) = parts.next() else {
        return trimmed;
    };
    if parts.next().is_none() {
        // No closing fence anywhere — leave the text alone.
        return trimmed;
    }

    let inner = inner.trim();
    match inner.split_once('\n') {
        Some((first_line, rest)) if is_language_tag(first_line.trim()) => rest.trim(),
        _ => inner,
    }
}

fn is_language_tag(token: &str) -> bool {
    !token.is_empty() && token.chars().all(|c| c.is_ascii_alphabetic())
}
