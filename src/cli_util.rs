use std::io::{self, Write};

use crate::{BracketKind, InterpreterError};

const WINDOW_CHARS: usize = 32;

/// Render an interpreter error as a one-line message plus a caret context
/// window into the (whitespace-stripped) program.
pub fn format_error(program: Option<&str>, code: &str, err: &InterpreterError) -> String {
    let message = match err {
        InterpreterError::InvalidCommand { ch, .. } => {
            format!("Invalid command {}", describe_char(*ch))
        }
        InterpreterError::UnbalancedBracket { kind: BracketKind::Open, .. } => {
            "Unbalanced bracket: '[' has no matching ']'".to_string()
        }
        InterpreterError::UnbalancedBracket { kind: BracketKind::Close, .. } => {
            "Unbalanced bracket: ']' has no open loop to repeat".to_string()
        }
        InterpreterError::Io { source, .. } => format!("I/O error: {source}"),
    };
    let message = match program {
        Some(p) => format!("{p}: {message}"),
        None => message,
    };

    let pos = err.ip();
    let mut out = format!("{message} at instruction {pos}\n");
    if let Some((slice, caret)) = context_window(code, pos) {
        out.push_str(&format!("  {slice}\n  {}^\n", " ".repeat(caret)));
    }
    out
}

pub fn print_error(program: Option<&str>, code: &str, err: &InterpreterError) {
    let mut stderr = io::stderr().lock();
    let _ = stderr.write_all(format_error(program, code, err).as_bytes());
    let _ = stderr.flush();
}

// Control characters would garble the caret line; show them escaped.
fn describe_char(ch: char) -> String {
    if ch.is_control() {
        format!("'{}'", ch.escape_default())
    } else {
        format!("'{ch}'")
    }
}

/// A window of up to `WINDOW_CHARS` on each side of `pos`, and the caret
/// column within it. `None` when `pos` is past the end of `code`.
fn context_window(code: &str, pos: usize) -> Option<(String, usize)> {
    let total_chars = code.chars().count();
    if pos >= total_chars {
        return None;
    }

    let start = pos.saturating_sub(WINDOW_CHARS);
    let end = (pos + WINDOW_CHARS + 1).min(total_chars);
    let slice = code
        .chars()
        .skip(start)
        .take(end - start)
        .map(|c| if c.is_control() { '?' } else { c })
        .collect();
    Some((slice, pos - start))
}
