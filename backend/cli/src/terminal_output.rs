//! Terminal output for command results.

use std::io::Write;

pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const RED: &str = "\x1b[31m";
pub const CYAN: &str = "\x1b[36m";

/// Check if the terminal supports color output.
pub fn supports_color() -> bool {
    std::env::var("NO_COLOR").is_err()
        && (std::env::var("COLORTERM").is_ok()
            || std::env::var("TERM")
                .map(|t| t != "dumb")
                .unwrap_or(false))
}

fn heading(label: &str, color: &str) -> String {
    if supports_color() {
        format!("{BOLD}{color}{label}{RESET}")
    } else {
        label.to_string()
    }
}

/// Feedback goes to stdout so it can be piped.
pub fn print_feedback(text: &str) {
    let mut out = std::io::stdout().lock();
    let _ = writeln!(out, "{}\n", heading("AI Feedback", CYAN));
    let _ = writeln!(out, "{}", text.trim_end());
}

pub fn print_error(message: &str) {
    let mut err = std::io::stderr().lock();
    let _ = writeln!(err, "{} {message}", heading("Error:", RED));
}
