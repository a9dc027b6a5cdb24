//! Installer output inspection.

use regex::Regex;
use std::sync::OnceLock;

/// Whether a line of installer output reports completion.
///
/// Matches the word "completed" anywhere in the line, ignoring case:
///
/// - `Completed successfully` -> true
/// - `Installation COMPLETED.` -> true
/// - `Copying files...` -> false
pub(crate) fn reports_completion(line: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"(?i)completed").expect("Invalid regex pattern"))
        .is_match(line)
}
