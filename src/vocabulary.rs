//! Word tokenization and per-page common-word suppression
//!
//! A word starts with a letter (accented letters included), continues with
//! letters, ASCII digits or underscores, and is at least two characters long.
//! Text is lowercased before matching.

use crate::extract::CourseBlock;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Frequency at which a word is treated as common on a page
pub const DEFAULT_COMMON_WORD_THRESHOLD: usize = 10;

/// Function words and catalog boilerplate that are never indexed
pub const STOP_WORDS: &[&str] = &[
    "hora", "horas", "duración", "precio", "de", "la", "al", "el", "en", "su", "con",
];

static WORD_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b\p{L}[\p{L}0-9_]+\b").expect("word pattern is a valid regex")
});

/// Splits text into lowercase words, in order of appearance
///
/// # Examples
///
/// ```
/// use catalog_ripple::vocabulary::tokenize;
///
/// assert_eq!(tokenize("Fotografía Digital: nivel 2!"), vec!["fotografía", "digital", "nivel"]);
/// ```
pub fn tokenize(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    WORD_PATTERN
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Computes the words to suppress while indexing one page
///
/// Every card's title and description are pooled together with the titles
/// of its nested blocks (a card's description already spans the nested
/// paragraphs). Any word seen at least `threshold` times across the page is
/// common. The preset [`STOP_WORDS`] are always included. The result belongs
/// to a single page and must not be reused for another one.
pub fn compute_common_words(blocks: &[CourseBlock], threshold: usize) -> HashSet<String> {
    let mut counts: HashMap<String, usize> = HashMap::new();

    for block in blocks {
        let nested_titles = block.nested.iter().flat_map(|nested| tokenize(&nested.title));
        for word in tokenize(&block.title)
            .into_iter()
            .chain(tokenize(&block.description))
            .chain(nested_titles)
        {
            *counts.entry(word).or_insert(0) += 1;
        }
    }

    let mut common: HashSet<String> = counts
        .into_iter()
        .filter(|(_, count)| *count >= threshold)
        .map(|(word, _)| word)
        .collect();

    common.extend(STOP_WORDS.iter().map(|word| word.to_string()));
    common
}

/// Tokenizes `text` and drops every common word
pub fn significant_words(text: &str, common: &HashSet<String>) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|word| !common.contains(word))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn block(title: &str, description: &str) -> CourseBlock {
        CourseBlock {
            title: title.to_string(),
            description: description.to_string(),
            ..CourseBlock::default()
        }
    }

    #[test]
    fn test_tokenize_lowercases() {
        assert_eq!(tokenize("Intro To RUST"), vec!["intro", "to", "rust"]);
    }

    #[test]
    fn test_tokenize_skips_single_characters() {
        assert_eq!(tokenize("a b c de"), vec!["de"]);
    }

    #[test]
    fn test_tokenize_strips_trailing_punctuation() {
        assert_eq!(
            tokenize("Hola! precio: nivel."),
            vec!["hola", "precio", "nivel"]
        );
    }

    #[test]
    fn test_tokenize_accented_letters() {
        assert_eq!(
            tokenize("Composición ÓPTICA año"),
            vec!["composición", "óptica", "año"]
        );
    }

    #[test]
    fn test_tokenize_digits_and_underscore() {
        assert_eq!(tokenize("python3 snake_case"), vec!["python3", "snake_case"]);
    }

    #[test]
    fn test_tokenize_word_must_start_with_letter() {
        assert_eq!(tokenize("40 horas 2x _hidden"), vec!["horas"]);
    }

    #[test]
    fn test_stop_words_always_common() {
        let common = compute_common_words(&[], DEFAULT_COMMON_WORD_THRESHOLD);
        for word in STOP_WORDS {
            assert!(common.contains(*word), "missing stop word {}", word);
        }
        assert_eq!(common.len(), STOP_WORDS.len());
    }

    #[test]
    fn test_frequency_threshold_inclusive() {
        let blocks = vec![
            block("Curso uno", "curso curso"),
            block("Otro curso", "datos datos"),
        ];
        let common = compute_common_words(&blocks, 4);
        assert!(common.contains("curso"));
        assert!(!common.contains("datos"));
        assert!(!common.contains("uno"));
    }

    #[test]
    fn test_counts_span_titles_and_descriptions() {
        let blocks = vec![block("Datos", "datos"), block("Datos", "")];
        let common = compute_common_words(&blocks, 3);
        assert!(common.contains("datos"));
    }

    #[test]
    fn test_blocks_do_not_run_together() {
        let blocks = vec![block("Alpha", "ends here"), block("Beta", "")];
        let common = compute_common_words(&blocks, 1);
        assert!(common.contains("here"));
        assert!(common.contains("beta"));
        assert!(!common.contains("herebeta"));
    }

    #[test]
    fn test_nested_titles_are_counted() {
        let sequence = CourseBlock {
            nested: vec![
                block("Mod Alpha", ""),
                block("Mod Beta", ""),
                block("Mod Gamma", ""),
            ],
            ..block("Track", "")
        };
        let common = compute_common_words(&[sequence], 3);
        assert!(common.contains("mod"));
        assert!(!common.contains("alpha"));
    }

    #[test]
    fn test_significant_words_filters() {
        let common: HashSet<String> = ["de".to_string(), "curso".to_string()].into();
        assert_eq!(
            significant_words("Curso de Fotografía", &common),
            vec!["fotografía"]
        );
    }
}
