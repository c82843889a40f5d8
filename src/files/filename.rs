//! Filename generation and sanitization for exported decks.
//!
//! Export files are named `prep-slides-YYYY-MM-DD.json`, optionally prefixed
//! with a sanitized deck title, e.g. `ship-weekly-prep-slides-2026-10-18.json`.

use chrono::NaiveDate;
use deunicode::deunicode;

/// Fixed part of every export filename.
pub const EXPORT_STEM: &str = "prep-slides";

/// Extension of export files.
pub const EXPORT_EXTENSION: &str = "json";

/// Maximum length of the title prefix.
pub const TITLE_PREFIX_MAX_LENGTH: usize = 40;

/// Windows reserved device names that cannot be used as filenames.
const WINDOWS_RESERVED: &[&str] = &[
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters that are invalid in filenames on common filesystems.
const INVALID_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Maximum filename length for most filesystems.
const MAX_FILENAME_LENGTH: usize = 255;

/// Errors that can occur during filename operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilenameError {
    #[error("Filename too long: {length} characters (max {max})")]
    TooLong { length: usize, max: usize },
}

/// Sanitizes a string for use in filenames.
///
/// Applies the following transformations in order:
/// 1. Unicode → ASCII transliteration
/// 2. Whitespace → hyphens
/// 3. Invalid filesystem characters and other punctuation removed
/// 4. Multiple hyphens collapsed to single
/// 5. Leading/trailing dots and hyphens trimmed
/// 6. Windows reserved names prefixed with `_`
///
/// May return an empty string; callers decide on a fallback.
pub fn sanitize(input: &str) -> String {
    let ascii = deunicode(input);

    let mut result = String::with_capacity(ascii.len());
    let mut last_was_hyphen = false;

    for c in ascii.chars() {
        if c.is_whitespace() || c == '-' {
            if !last_was_hyphen {
                result.push('-');
                last_was_hyphen = true;
            }
        } else if INVALID_CHARS.contains(&c) {
            continue;
        } else if c.is_ascii_alphanumeric() || c == '_' || c == '.' {
            result.push(c);
            last_was_hyphen = false;
        }
        // Remaining punctuation is dropped
    }

    let trimmed = result.trim_matches(|c| c == '.' || c == '-');
    handle_reserved_name(trimmed)
}

/// Checks if a name is a Windows reserved name and prefixes it if so.
///
/// Handles both exact matches (CON) and names with extensions (CON.txt).
fn handle_reserved_name(name: &str) -> String {
    let base_name = match name.find('.') {
        Some(pos) => &name[..pos],
        None => name,
    };

    let upper = base_name.to_uppercase();
    if WINDOWS_RESERVED.iter().any(|reserved| upper == *reserved) {
        format!("_{}", name)
    } else {
        name.to_string()
    }
}

/// Lower-cased, sanitized title prefix, or `None` when nothing usable remains.
pub fn title_prefix(title: &str) -> Option<String> {
    let sanitized = sanitize(title).to_lowercase();
    let truncated: String = sanitized.chars().take(TITLE_PREFIX_MAX_LENGTH).collect();
    let truncated = truncated.trim_end_matches(|c| c == '-' || c == '.');
    if truncated.is_empty() {
        None
    } else {
        Some(truncated.to_string())
    }
}

/// Export filename for `date`, optionally prefixed with a title.
pub fn export_filename(title: Option<&str>, date: NaiveDate) -> String {
    let stamp = format!(
        "{}-{}.{}",
        EXPORT_STEM,
        date.format("%Y-%m-%d"),
        EXPORT_EXTENSION
    );
    match title.and_then(title_prefix) {
        Some(prefix) => format!("{}-{}", prefix, stamp),
        None => stamp,
    }
}

/// Validates that a final filename doesn't exceed filesystem limits.
pub fn validate_length(filename: &str) -> Result<(), FilenameError> {
    if filename.len() > MAX_FILENAME_LENGTH {
        Err(FilenameError::TooLong {
            length: filename.len(),
            max: MAX_FILENAME_LENGTH,
        })
    } else {
        Ok(())
    }
}
