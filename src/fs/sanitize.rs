//! Free-text sanitizing for file names.

use std::sync::LazyLock;

use regex::Regex;

/// Returned when sanitizing leaves nothing behind.
pub const FALLBACK_TEXT: &str = "无内容";

/// Characters that are illegal in file names on common filesystems.
const ILLEGAL_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"https?://[A-Za-z0-9_\-._~:/?#\[\]@!$&'()*+,;=.]+").unwrap()
});

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\t\n\x0C\r ]+").unwrap());

// Emoticons, pictographs, transport, flags, misc symbols, dingbats.
static EMOJI: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\x{1F600}-\x{1F64F}\x{1F300}-\x{1F5FF}\x{1F680}-\x{1F6FF}\x{1F1E0}-\x{1F1FF}\x{2600}-\x{26FF}\x{2700}-\x{27BF}]",
    )
    .unwrap()
});

/// Sanitize post text into a file-name-safe fragment of at most `max_runes`
/// code points.
///
/// URLs, line breaks, whitespace runs and emoji are removed first, then
/// illegal and control characters become `_`. The result is trimmed and is
/// never empty for a non-zero budget: [`FALLBACK_TEXT`], cut to the budget,
/// stands in for text with nothing left.
pub fn sanitize_text(text: &str, max_runes: usize) -> String {
    let text = URL_PATTERN.replace_all(text, "");
    let text = text.replace(['\n', '\r', '\t'], " ");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    let text = EMOJI.replace_all(&text, "");

    let cleaned: String = text.chars().map(replace_char).take(max_runes).collect();
    let cleaned = cleaned.trim();

    if cleaned.is_empty() {
        FALLBACK_TEXT.chars().take(max_runes).collect()
    } else {
        cleaned.to_string()
    }
}

/// Replace illegal and control characters with `_`, leaving everything else.
pub fn replace_illegal(name: &str) -> String {
    name.chars().map(replace_char).collect()
}

fn replace_char(c: char) -> char {
    if ILLEGAL_CHARS.contains(&c) || c.is_control() {
        '_'
    } else {
        c
    }
}
