//! Commit message acquisition rule.

use chrono::NaiveDateTime;

/// Timestamp layout of the default commit message (`YYYY-MM-DD HH:mm`).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Builds the message used when the operator gives none.
pub fn default_commit_message(label: &str, now: NaiveDateTime) -> String {
    format!("{} - {}", label, now.format(TIMESTAMP_FORMAT))
}

/// Removes a single trailing `\n` or `\r\n`, nothing else.
pub fn strip_line_ending(line: &str) -> &str {
    let line = line.strip_suffix('\n').unwrap_or(line);
    line.strip_suffix('\r').unwrap_or(line)
}

/// Picks the commit message from the operator's response.
///
/// Blank responses fall back to [`default_commit_message`]; anything else is
/// kept verbatim, surrounding spaces included.
pub fn resolve_commit_message(response: &str, label: &str, now: NaiveDateTime) -> String {
    let response = strip_line_ending(response);
    if response.trim().is_empty() {
        default_commit_message(label, now)
    } else {
        response.to_string()
    }
}
