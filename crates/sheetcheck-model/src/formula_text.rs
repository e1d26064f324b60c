//! Helpers for comparing formula strings written by different authors.
//!
//! # Invariant
//!
//! The canonical formula text is:
//! - trimmed
//! - **without** a leading `'='`
//!
//! Equivalence is decided on tokens, so whitespace between tokens and the case of
//! identifiers never matter, while the case of string literals does.

use std::sync::OnceLock;

use regex::Regex;

/// Normalize formula text into the canonical representation.
///
/// - Trims leading/trailing whitespace.
/// - Strips a single leading `'='` if present.
///
/// This function is intentionally conservative: it does not attempt to validate
/// formula syntax.
pub fn normalize_formula_text(s: &str) -> String {
    let mut trimmed = s.trim();
    if let Some(rest) = trimmed.strip_prefix('=') {
        trimmed = rest.trim();
    }
    trimmed.to_string()
}

fn token_regex() -> &'static Regex {
    static TOKEN: OnceLock<Regex> = OnceLock::new();
    TOKEN.get_or_init(|| {
        Regex::new(r#""(?:[^"]|"")*"?|'(?:[^']|'')*'?|[\p{L}\p{N}_.]+|\S"#)
            .expect("formula token regex is valid")
    })
}

/// Split formula text into comparison tokens.
///
/// String literals (`"..."`) keep their case; everything else (identifiers, quoted field
/// names, numbers, operators) is lowercased.
pub fn formula_tokens(s: &str) -> Vec<String> {
    let canonical = normalize_formula_text(s);
    token_regex()
        .find_iter(&canonical)
        .map(|m| {
            let token = m.as_str();
            if token.starts_with('"') {
                token.to_string()
            } else {
                token.to_lowercase()
            }
        })
        .collect()
}

/// Returns true when two formulas are the same up to whitespace, identifier case, and a
/// leading `'='`.
pub fn formulas_equivalent(a: &str, b: &str) -> bool {
    formula_tokens(a) == formula_tokens(b)
}

/// Returns true if the cell text holds a formula (starts with `'='` after trimming).
pub fn is_formula_text(s: &str) -> bool {
    s.trim_start().starts_with('=')
}
