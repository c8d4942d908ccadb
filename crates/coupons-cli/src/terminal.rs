// Rust guideline compliant 2026-10-18

//! Terminal UI utilities for the Coupons CLI.
//!
//! This module provides color support, terminal width detection,
//! and status-line helpers.

use std::env;
use std::io::{IsTerminal, Write};
use termcolor::{Buffer, Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Determines if colored output should be used.
///
/// Respects the NO_COLOR environment variable and whether stdout is a
/// terminal.
///
/// # Returns
/// `true` if colored output should be used, `false` otherwise
pub fn should_use_color() -> bool {
    if env::var_os("NO_COLOR").is_some() {
        return false;
    }

    std::io::stdout().is_terminal()
}

/// Gets the terminal width in columns.
///
/// # Returns
/// The terminal width, or 80 if it cannot be determined
pub fn get_terminal_width() -> usize {
    term_size::dimensions()
        .map(|(width, _)| width)
        .filter(|width| *width > 0)
        .unwrap_or(80)
}

/// Wraps text to fit within the terminal width.
///
/// # Arguments
/// * `text` - The text to wrap
/// * `indent` - The indentation level (in spaces)
///
/// # Returns
/// The wrapped text
pub fn wrap_text(text: &str, indent: usize) -> String {
    wrap_to_width(text, indent, get_terminal_width())
}

fn wrap_to_width(text: &str, indent: usize, width: usize) -> String {
    let available_width = width.saturating_sub(indent);

    if available_width < 10 {
        return text.to_string();
    }

    let mut result = String::new();
    let indent_str = " ".repeat(indent);

    for (i, line) in text.lines().enumerate() {
        if i > 0 {
            result.push('\n');
            result.push_str(&indent_str);
        }

        if line.chars().count() <= available_width {
            result.push_str(line);
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            if current_line.is_empty() {
                current_line.push_str(word);
            } else if current_line.chars().count() + 1 + word.chars().count() <= available_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push_str(&current_line);
                result.push('\n');
                result.push_str(&indent_str);
                current_line = word.to_string();
            }
        }
        result.push_str(&current_line);
    }

    result
}

/// Wraps text in ANSI color codes.
///
/// # Arguments
/// * `text` - The text to color
/// * `color` - Foreground color
/// * `bold` - Whether to use bold text
///
/// # Returns
/// The colored text, or the text unchanged if the codes cannot be written
pub fn paint(text: &str, color: Color, bold: bool) -> String {
    let mut buffer = Buffer::ansi();
    match write_colored(&mut buffer, text, color, bold) {
        Ok(()) => String::from_utf8_lossy(buffer.as_slice()).into_owned(),
        Err(_) => text.to_string(),
    }
}

fn write_colored(buffer: &mut Buffer, text: &str, color: Color, bold: bool) -> std::io::Result<()> {
    buffer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(bold))?;
    write!(buffer, "{}", text)?;
    buffer.reset()
}

/// Prints a status message with a colored prefix to stderr.
///
/// # Arguments
/// * `prefix` - The prefix text
/// * `prefix_color` - The color for the prefix
/// * `message` - The message text
pub fn print_status(prefix: &str, prefix_color: Color, message: &str) {
    let choice = if env::var_os("NO_COLOR").is_some() {
        ColorChoice::Never
    } else {
        ColorChoice::Auto
    };
    let mut stderr = StandardStream::stderr(choice);
    let _ = stderr.set_color(ColorSpec::new().set_fg(Some(prefix_color)).set_bold(true));
    let _ = write!(stderr, "{}: ", prefix);
    let _ = stderr.reset();
    let _ = writeln!(stderr, "{}", message);
}

/// Prints a warning message.
///
/// # Arguments
/// * `message` - The message to print
pub fn print_warning(message: &str) {
    print_status("⚠", Color::Yellow, message);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_terminal_width_returns_positive() {
        assert!(get_terminal_width() > 0);
    }

    #[test]
    fn test_get_terminal_width_follows_terminal_not_columns() {
        std::env::set_var("COLUMNS", "37");
        let expected = term_size::dimensions()
            .map(|(width, _)| width)
            .filter(|width| *width > 0)
            .unwrap_or(80);
        assert_eq!(get_terminal_width(), expected);
        std::env::remove_var("COLUMNS");
    }

    #[test]
    fn test_wrap_text_short_text() {
        assert_eq!(wrap_to_width("short", 0, 80), "short");
    }

    #[test]
    fn test_wrap_text_breaks_long_lines() {
        let text = "valid on full-price items only, not combinable with other offers";
        let wrapped = wrap_to_width(text, 2, 24);
        assert!(wrapped.lines().count() > 1);
        for line in wrapped.lines().skip(1) {
            assert!(line.starts_with("  "));
        }
    }

    #[test]
    fn test_paint_wraps_in_ansi_codes() {
        let painted = paint("expiring soon", Color::Yellow, true);
        assert!(painted.contains("expiring soon"));
        assert!(painted.starts_with('\u{1b}'));
    }
}
