use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::markdown;

/// A rendered journal entry for the blog page.
#[derive(Debug, Clone)]
pub struct JournalEntry {
    pub title: String,
    pub date: Option<String>,
    pub html: String,
    pub filename: String,
}

/// Loads every `*.md` file under `dir`, newest first by filename.
/// A missing directory yields an empty list; unreadable files are
/// skipped with a warning.
pub fn load_entries(dir: &Path) -> Vec<JournalEntry> {
    let Ok(read_dir) = fs::read_dir(dir) else {
        debug!(dir = %dir.display(), "journal directory not found");
        return Vec::new();
    };

    let mut paths: Vec<_> = read_dir
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "md"))
        .collect();
    paths.sort();
    paths.reverse();

    let mut entries = Vec::new();
    for path in paths {
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "skipping unreadable journal entry");
                continue;
            }
        };
        let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or_default();
        let filename = path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        let (title, date) = title_and_date(stem);
        entries.push(JournalEntry {
            title,
            date,
            html: markdown::render(&content),
            filename,
        });
    }
    entries
}

/// Splits a file stem into a display title and an optional formatted
/// date taken from a leading `YYYY-MM-DD` prefix. The date prefix is
/// dropped from the title so the page does not show it twice.
fn title_and_date(stem: &str) -> (String, Option<String>) {
    let date = stem
        .get(..10)
        .and_then(|prefix| jiff::civil::Date::strptime("%Y-%m-%d", prefix).ok())
        .and_then(|d| jiff::fmt::strtime::format("%B %d, %Y", d).ok());

    let raw_title = if date.is_some() {
        let rest = stem.get(10..).unwrap_or("").trim_start_matches(['-', '_', ' ']);
        if rest.is_empty() { stem } else { rest }
    } else {
        stem
    };

    (display_title(raw_title), date)
}

/// Turns a hyphenated file stem into a title: separators become spaces
/// and every word is capitalized.
fn display_title(raw: &str) -> String {
    let spaced = raw.replace(['-', '_'], " ");
    let mut out = String::with_capacity(spaced.len());
    let mut at_word_start = true;
    for c in spaced.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}
