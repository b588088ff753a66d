//! Shared helpers for TUI views

/// Shortens `s` to at most `max_len` characters, ending in "..." when cut
pub fn truncate_str(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        return s.to_string();
    }
    let keep = max_len.saturating_sub(3);
    let mut truncated: String = s.chars().take(keep).collect();
    truncated.push_str(&".".repeat(max_len.min(3)));
    truncated
}
