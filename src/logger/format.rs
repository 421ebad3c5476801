//! Log formatting and output with ANSI colors and text wrapping
//!
//! Log lines go to stderr and command output to stdout. On either stream a
//! broken pipe ends the process quietly so piping through `head` works.

use super::levels::LogLevel;
use super::tags::LogTag;
use chrono::Local;
use colored::*;
use std::io::{stderr, stdout, ErrorKind, Write};

/// Log format widths for alignment
const TAG_WIDTH: usize = 10;
const LOG_TYPE_WIDTH: usize = 8;
const BRACKET_SPACE_WIDTH: usize = 3;
const TOTAL_PREFIX_WIDTH: usize = TAG_WIDTH + LOG_TYPE_WIDTH + BRACKET_SPACE_WIDTH * 2;

/// Maximum line length before wrapping
const MAX_LINE_LENGTH: usize = 145;

pub(super) fn format_and_log(tag: &LogTag, level: LogLevel, message: &str) {
    let time = Local::now().format("%H:%M:%S").to_string();
    let prefix = format!("{} ", time).dimmed().to_string();

    let base_line = format!(
        "{}[{}] [{}] ",
        prefix,
        format_tag(tag),
        format_level(level)
    );

    let base_length = strip_ansi_codes(&base_line)
        .len()
        .max(TOTAL_PREFIX_WIDTH + time.len() + 1);
    let available_space = if MAX_LINE_LENGTH > base_length {
        MAX_LINE_LENGTH - base_length
    } else {
        50
    };

    let chunks = wrap_text(message, available_space);
    print_stderr_safe(&format!("{}{}", base_line, chunks[0]));

    if chunks.len() > 1 {
        let continuation = " ".repeat(base_length);
        for chunk in &chunks[1..] {
            print_stderr_safe(&format!("{}{}", continuation, chunk));
        }
    }
}

fn format_tag(tag: &LogTag) -> ColoredString {
    let label = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => label.bright_yellow().bold(),
        LogTag::Config => label.bright_white().bold(),
        LogTag::Cache => label.bright_cyan().bold(),
        LogTag::Request => label.bright_purple().bold(),
        LogTag::Table => label.bright_blue().bold(),
        LogTag::Mock => label.bright_magenta().bold(),
        LogTag::Webserver => label.bright_green().bold(),
        LogTag::Test => label.bright_blue().bold(),
        LogTag::Other(_) => label.white().bold(),
    }
}

fn format_level(level: LogLevel) -> ColoredString {
    let label = format!("{:<width$}", level.as_str(), width = LOG_TYPE_WIDTH);
    match level {
        LogLevel::Error => label.bright_red().bold(),
        LogLevel::Warning => label.bright_yellow().bold(),
        LogLevel::Info => label.white().bold(),
        LogLevel::Debug | LogLevel::Verbose => label.dimmed(),
    }
}

fn print_stderr_safe(message: &str) {
    let mut handle = stderr().lock();
    if let Err(e) = writeln!(handle, "{}", message) {
        if e.kind() == ErrorKind::BrokenPipe {
            std::process::exit(0);
        }
    }
}

/// Print command output to stdout exactly as given, ignoring broken pipes
pub fn print_stdout_safe(message: &str) {
    let mut handle = stdout().lock();
    if write_reports_broken_pipe(&mut handle, message) {
        std::process::exit(0);
    }
}

/// Write and flush; true when the reader has gone away
fn write_reports_broken_pipe<W: Write>(writer: &mut W, message: &str) -> bool {
    match writer
        .write_all(message.as_bytes())
        .and_then(|_| writer.flush())
    {
        Ok(()) => false,
        Err(e) if e.kind() == ErrorKind::BrokenPipe => true,
        Err(e) => {
            let _ = writeln!(stderr(), "Logger stdout error: {}", e);
            false
        }
    }
}

/// Remove ANSI color codes from text
fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::new();
    let mut in_escape = false;

    for ch in text.chars() {
        if ch == '\x1b' {
            in_escape = true;
        } else if in_escape && ch == 'm' {
            in_escape = false;
        } else if !in_escape {
            result.push(ch);
        }
    }
    result
}

/// Wrap text at word boundaries, respecting existing newlines
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();
    let max_width = max_width.max(1);

    for line in text.split('\n') {
        if line.chars().count() <= max_width {
            result.push(line.to_string());
            continue;
        }

        let mut current_line = String::new();
        for word in line.split_whitespace() {
            let word_len = word.chars().count();
            let current_len = current_line.chars().count();

            if word_len > max_width {
                if !current_line.is_empty() {
                    result.push(std::mem::take(&mut current_line));
                }
                let chars: Vec<char> = word.chars().collect();
                for chunk in chars.chunks(max_width) {
                    result.push(chunk.iter().collect());
                }
            } else if current_line.is_empty() {
                current_line = word.to_string();
            } else if current_len + word_len + 1 <= max_width {
                current_line.push(' ');
                current_line.push_str(word);
            } else {
                result.push(std::mem::replace(&mut current_line, word.to_string()));
            }
        }

        if !current_line.is_empty() {
            result.push(current_line);
        }
    }

    if result.is_empty() {
        result.push(String::new());
    }

    result
}
