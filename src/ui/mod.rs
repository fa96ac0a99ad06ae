//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - This module - Error printing and user input handling

use std::io::{self, BufRead, Write};

pub mod formatter;

pub use formatter::{
    format_boundary_warning, format_error, format_message_prompt, format_not_a_repository,
    format_pending_changes, format_push_failure, format_push_success, format_status,
    format_success, FAILURE_BANNER, SUCCESS_BANNER,
};

/// Print an error message to stderr.
pub fn display_error(message: &str) {
    eprintln!("{}", format_error(message));
}

/// Prompts the user for one line of free text.
///
/// Blocks until a line arrives; there is no timeout. The returned string
/// still carries its line terminator. End of input yields an empty string.
/// Bytes that are not valid UTF-8 are replaced rather than rejected.
///
/// # Arguments
/// * `input` - Where the answer is read from (stdin in the binary)
/// * `out` - Where the prompt is written
/// * `prompt` - Prompt text, printed without a trailing newline
pub fn prompt_line<R: BufRead, W: Write>(
    input: &mut R,
    out: &mut W,
    prompt: &str,
) -> io::Result<String> {
    write!(out, "{}", prompt)?;
    out.flush()?;

    let mut line = Vec::new();
    input.read_until(b'\n', &mut line)?;
    Ok(String::from_utf8_lossy(&line).into_owned())
}
