//! Slug derivation
//!
//! Shared by explicit category creation and the category normalizer so that
//! name comparisons stay stable across both paths.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Convert a display name to its URL-safe slug.
///
/// Lowercases, strips diacritical marks (NFD decomposition), collapses runs
/// of whitespace into a single hyphen, and drops anything outside
/// `[a-z0-9-]`. Deterministic and total; empty input yields empty output.
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    let stripped: String = lowered.nfd().filter(|c| !is_combining_mark(*c)).collect();

    let mut hyphenated = String::with_capacity(stripped.len());
    let mut in_whitespace = false;
    for ch in stripped.chars() {
        if ch.is_whitespace() {
            if !in_whitespace {
                hyphenated.push('-');
            }
            in_whitespace = true;
        } else {
            hyphenated.push(ch);
            in_whitespace = false;
        }
    }

    hyphenated
        .chars()
        .filter(|c| matches!(c, 'a'..='z' | '0'..='9' | '-'))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_diacritics_and_hyphenates() {
        assert_eq!(slugify("Canastas Navideñas"), "canastas-navidenas");
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(slugify("Ramos   de\tNovia"), "ramos-de-novia");
    }

    #[test]
    fn drops_punctuation() {
        assert_eq!(slugify("Flores & Más!"), "flores--mas");
        assert_eq!(slugify("Arreglo (grande)"), "arreglo-grande");
    }

    #[test]
    fn handles_accented_vowels() {
        assert_eq!(slugify("Orquídeas Exóticas"), "orquideas-exoticas");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(slugify(""), "");
    }
}
