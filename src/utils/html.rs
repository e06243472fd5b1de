/// Utility functions for Telegram HTML formatting
///
/// Event cards are sent with HTML parse mode; any user-controlled text
/// (names, descriptions) must be escaped first.

/// Escapes the characters Telegram's HTML parse mode treats specially.
///
/// # Example
/// ```
/// use football_squad_bot::utils::html::escape_html;
///
/// assert_eq!(escape_html("Kick-off <19:00>"), "Kick-off &lt;19:00&gt;");
/// ```
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Truncates long free text for compact list views.
pub fn truncate(text: &str, max_len: usize) -> String {
    if text.chars().count() <= max_len {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_len.saturating_sub(1)).collect();
    format!("{cut}…")
}
