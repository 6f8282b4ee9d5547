//! Line-splitting degrade for the bullets task.
//!
//! When no JSON is recoverable, bullet output is often still usable as plain
//! glyphed lines ("- Led X"). This is a lossy, best-effort degrade and is
//! only attempted for the bullets task; the other kinds surface their raw
//! text instead.

use crate::draft::canonical::{Bullet, BulletSet};

/// True when raw text looks like JSON or a fenced code block, in which case
/// the line fallback must not run (a parse failure there means the payload
/// is broken, not line-oriented).
pub fn looks_like_code(text: &str) -> bool {
    let trimmed = text.trim();
    trimmed.starts_with('{') || trimmed.starts_with("```")
}

/// Degrades bullet-looking text into a pseudo-bullet list: one bullet per
/// non-empty line, with a single leading bullet glyph stripped.
///
/// At least one line must actually carry a glyph — plain prose ("The model
/// refused to answer.") is not a bullet list and returns `None` so the
/// caller falls back to literal display instead.
pub fn lines_to_bullets(text: &str) -> Option<BulletSet> {
    let mut saw_glyph = false;
    let bullets: Vec<Bullet> = text
        .lines()
        .map(|line| {
            let (stripped, glyphed) = strip_glyph(line);
            saw_glyph |= glyphed;
            stripped
        })
        .filter(|line| !line.is_empty())
        .map(Bullet::plain)
        .collect();
    if !saw_glyph || bullets.is_empty() {
        return None;
    }
    Some(BulletSet {
        bullets,
        ats_summary: None,
    })
}

/// Strips one leading `-` or `•` plus surrounding whitespace; reports
/// whether a glyph was present.
fn strip_glyph(line: &str) -> (&str, bool) {
    let line = line.trim();
    match line.strip_prefix('-').or_else(|| line.strip_prefix('•')) {
        Some(rest) => (rest.trim(), true),
        None => (line, false),
    }
}
