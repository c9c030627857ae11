//! Task identifier generation and format checking.

use regex::Regex;
use std::sync::OnceLock;
use uuid::Uuid;

/// Generates a fresh lowercase hyphenated v4 UUID for a new task.
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Checks that an incoming path id looks like a lowercase v4 UUID.
///
/// Uppercase hex is rejected on purpose: generated ids are always lowercase
/// and lookups are exact string matches.
pub fn is_valid(id: &str) -> bool {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| {
        Regex::new(r"^[a-f0-9]{8}-[a-f0-9]{4}-4[a-f0-9]{3}-[89ab][a-f0-9]{3}-[a-f0-9]{12}$")
            .expect("id pattern is valid")
    });
    re.is_match(id)
}
