//! Identifier word splitting and naming-convention classification.

use once_cell::sync::Lazy;
use regex::Regex;

static CAMEL_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:[A-Z][a-z0-9]*)+$").expect("valid regex"));
static SNAKE_CASE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z][a-z0-9]*(?:_[a-z0-9]+)+$").expect("valid regex"));

/// Naming convention of a multi-word identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingStyle {
    CamelCase,
    SnakeCase,
    /// Single lowercase word, PascalCase type names, CONSTANTS
    Neutral,
}

pub fn naming_style(name: &str) -> NamingStyle {
    if CAMEL_CASE.is_match(name) {
        NamingStyle::CamelCase
    } else if SNAKE_CASE.is_match(name) {
        NamingStyle::SnakeCase
    } else {
        NamingStyle::Neutral
    }
}

/// Lowercased words of an identifier: `adjList` -> `["adj", "list"]`,
/// `BFS_queue2` -> `["bfs", "queue"]`.
pub fn name_words(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_alphabetic() {
            flush(&mut current, &mut words);
            continue;
        }
        if c.is_uppercase() && !current.is_empty() {
            let prev_lower = chars[i - 1].is_lowercase();
            let acronym_end = chars[i - 1].is_uppercase()
                && chars.get(i + 1).is_some_and(|next| next.is_lowercase());
            if prev_lower || acronym_end {
                flush(&mut current, &mut words);
            }
        }
        current.extend(c.to_lowercase());
    }
    flush(&mut current, &mut words);
    words
}

fn flush(current: &mut String, words: &mut Vec<String>) {
    if !current.is_empty() {
        words.push(std::mem::take(current));
    }
}

/// `MAX_SIZE`, `LIMIT`
pub fn is_constant_case(name: &str) -> bool {
    name.chars().any(|c| c.is_alphabetic())
        && name
            .chars()
            .all(|c| c.is_uppercase() || c.is_ascii_digit() || c == '_')
}
