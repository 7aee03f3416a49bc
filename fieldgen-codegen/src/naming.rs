//! Member name transformations.

use regex::Regex;
use std::sync::OnceLock;

static ABBREVIATION: OnceLock<Regex> = OnceLock::new();
static WORD_SPLIT: OnceLock<Regex> = OnceLock::new();

// An abbreviation ends right before the uppercase letter that starts the next word.
fn abbreviation() -> &'static Regex {
    ABBREVIATION.get_or_init(|| Regex::new(r"(\p{Lu}+)(\p{Lu}\p{Ll})").expect("abbreviation pattern is valid"))
}

fn word_split() -> &'static Regex {
    WORD_SPLIT.get_or_init(|| Regex::new(r"(\p{Ll})(\p{Lu})").expect("word split pattern is valid"))
}

/// Convert a member name to SCREAMING_SNAKE_CASE.
///
/// Abbreviations stay joined: `myAPIKey` becomes `MY_API_KEY`. Names that are
/// already snake case only change case (`order_date` becomes `ORDER_DATE`).
pub fn to_screaming_snake(name: &str) -> String {
    let closed = abbreviation().replace_all(name, "${1}_${2}");
    let split = word_split().replace_all(&closed, "${1}_${2}");
    split.to_uppercase()
}

/// Lower snake form used for per-member operation names (`visit_order_date`).
pub fn to_lower_snake(name: &str) -> String {
    to_screaming_snake(name).to_lowercase()
}
