//! Extraction helpers shared by the registry formats.

mod contact;
mod nameserver;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

pub use contact::{contact_from_block, ContactLayout};
pub use nameserver::{parse_bracketed_line, NameserverList};

/// Returns the first capture group of `pattern` in `text`, trimmed.
///
/// Empty captures count as no match.
pub fn capture<'a>(pattern: &Regex, text: &'a str) -> Option<&'a str> {
    let value = pattern.captures(text)?.get(1)?.as_str().trim();
    if value.is_empty() {
        None
    } else {
        Some(value)
    }
}

/// Returns the trimmed lines of the block introduced by a line matching
/// `label`.
///
/// A block is the run of non-blank lines after the label line, ended by the
/// first blank line or the end of the text. Returns `None` if no line matches
/// the label or the block is empty.
pub fn labeled_block<'a>(text: &'a str, label: &Regex) -> Option<Vec<&'a str>> {
    let mut lines = text.lines();
    lines.by_ref().find(|line| label.is_match(line.trim()))?;

    let block: Vec<&str> = lines
        .map(str::trim)
        .take_while(|line| !line.is_empty())
        .collect();

    if block.is_empty() {
        None
    } else {
        Some(block)
    }
}

/// Returns the last non-blank line of `text`, trimmed.
pub fn last_line(text: &str) -> Option<&str> {
    text.lines().map(str::trim).rev().find(|line| !line.is_empty())
}

/// Parses a timestamp in any of the layouts registries commonly print.
///
/// Dates without a time are taken as midnight UTC.
pub fn parse_time(value: &str) -> Option<DateTime<Utc>> {
    let cleaned = value
        .trim()
        .replace(" (UTC)", "")
        .replace(" UTC", "Z")
        .replace(" +0000", "Z");

    if let Ok(dt) = DateTime::parse_from_rfc3339(&cleaned) {
        return Some(dt.with_timezone(&Utc));
    }

    const DATE_TIME_FORMATS: [&str; 7] = [
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%d %H:%M:%SZ",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%d %H:%M:%S",
        "%Y.%m.%d %H:%M:%S",
        "%d.%m.%Y %H:%M:%S",
    ];
    for fmt in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(&cleaned, fmt) {
            return Some(dt.and_utc());
        }
    }

    const DATE_FORMATS: [&str; 10] = [
        "%Y-%m-%d",
        "%Y.%m.%d",
        "%Y/%m/%d",
        "%d.%m.%Y",
        "%d/%m/%Y",
        "%d-%b-%Y",
        "%d-%B-%Y",
        "%d %b %Y",
        "%d %B %Y",
        "%b %d %Y",
    ];
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(&cleaned, fmt) {
            return Some(d.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
