/// Maximum length of a Discord message, in characters.
pub const MAX_MESSAGE_LENGTH: usize = 2000;

/// Cuts `value` to at most `max_chars` characters, ending with an ellipsis
/// when anything was removed.
pub fn truncate(value: &str, max_chars: usize) -> String {
    if value.chars().count() <= max_chars {
        return value.to_string();
    }

    let mut truncated: String = value.chars().take(max_chars.saturating_sub(1)).collect();
    truncated.push('\u{2026}');
    truncated
}

/// Quotes content for a log post so it can't ping anyone or break the layout.
pub fn quote(content: &str) -> String {
    if content.is_empty() {
        return "> *(no text)*".to_string();
    }

    content
        .replace('@', "@\u{200b}")
        .lines()
        .map(|line| format!("> {}", line))
        .collect::<Vec<_>>()
        .join("\n")
}
