//! Line-based prompt helpers. Every validated prompt recovers locally by
//! re-prompting; the only error that escapes is [`Eof`], which callers treat
//! as a request to quit.

use crate::services::output::print_error;
use owo_colors::OwoColorize;
use std::fmt::Display;
use std::io::{BufRead, Write};
use std::str::FromStr;
use thiserror::Error;

pub const RATING_MIN: f64 = 1.0;
pub const RATING_MAX: f64 = 10.0;
/// Roundhay Garden Scene. Nothing in the catalog predates film itself.
pub const FIRST_MOVIE_RELEASE: i32 = 1888;

/// The input stream closed mid-prompt. Treated as a clean quit everywhere.
#[derive(Debug, Error)]
#[error("input stream closed")]
pub struct Eof;

/// Upper bound for release-year validation, derived from the system clock.
/// A calendar-exact cutoff buys nothing here.
pub fn current_year() -> i32 {
    use std::time::{SystemTime, UNIX_EPOCH};
    let secs = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    1970 + (secs as f64 / 86_400.0 / 365.2425) as i32
}

/// Prompt once and return the trimmed line, or [`Eof`] when stdin is closed.
pub fn read_line(input: &mut dyn BufRead, prompt: &str) -> anyhow::Result<String> {
    print!("{} ", prompt.magenta());
    std::io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(Eof.into());
    }
    Ok(line.trim().to_string())
}

pub fn read_nonempty(input: &mut dyn BufRead, prompt: &str) -> anyhow::Result<String> {
    loop {
        let line = read_line(input, prompt)?;
        if !line.is_empty() {
            return Ok(line);
        }
        print_error("Input must not be empty.");
    }
}

/// Prompt for a number within `[lo, hi]`, re-prompting until valid. With
/// `allow_empty`, a blank line yields `None` so callers can fall back to a
/// default.
pub fn read_in_range<T>(
    input: &mut dyn BufRead,
    prompt: &str,
    lo: T,
    hi: T,
    allow_empty: bool,
) -> anyhow::Result<Option<T>>
where
    T: FromStr + PartialOrd + Copy + Display,
{
    loop {
        let line = read_line(input, prompt)?;
        if line.is_empty() && allow_empty {
            return Ok(None);
        }
        match line.parse::<T>() {
            Ok(value) if lo <= value && value <= hi => return Ok(Some(value)),
            Ok(_) => print_error(&format!("Enter a value between {} and {}.", lo, hi)),
            Err(_) => print_error("Not a valid number, try again."),
        }
    }
}

/// Prompt until the answer matches one of `options` (case-insensitive).
pub fn read_choice(
    input: &mut dyn BufRead,
    prompt: &str,
    options: &[&str],
) -> anyhow::Result<String> {
    loop {
        let line = read_line(input, prompt)?.to_ascii_lowercase();
        if options.contains(&line.as_str()) {
            return Ok(line);
        }
        print_error(&format!("Enter one of: {}.", options.join(", ")));
    }
}

pub fn confirm(input: &mut dyn BufRead, prompt: &str) -> anyhow::Result<bool> {
    loop {
        match read_line(input, prompt)?.to_ascii_lowercase().as_str() {
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            _ => print_error("Answer y or n."),
        }
    }
}
