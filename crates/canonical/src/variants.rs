//! Spelling-variant expansion for product names.
//!
//! Spanish speakers routinely confuse letters that sound alike (`b`/`v`,
//! `c`/`s`/`z`, `ll`/`y`, ...). At write time the name of a new catalog
//! entry is expanded into every spelling reachable through the lexicon's
//! substitution table, and the variants are stored as extra keywords so a
//! query for `barilla` finds `Varilla`.
//!
//! Growth is multiplicative in the number of substitutable letters, so the
//! expansion is bounded by [`VariantLimits`](crate::VariantLimits).

use std::collections::BTreeSet;

use tracing::debug;

use crate::lexicon::Lexicon;
use crate::normalize::fold;

const EDGE_PUNCTUATION: &[char] = &['.', ',', '!', '?', ';', ':', '(', ')'];

/// Expand every non-stopword of `phrase` into its spelling variants.
///
/// Words are lower-cased and stripped of edge punctuation first. The result
/// always contains each surviving word itself.
///
/// ```rust
/// use canonical::{expand, Lexicon};
///
/// let variants = expand("Varilla de acero", &Lexicon::spanish());
/// assert!(variants.contains("varilla"));
/// assert!(variants.contains("barilla"));
/// assert!(!variants.contains("de"));
/// ```
pub fn expand(phrase: &str, lexicon: &Lexicon) -> BTreeSet<String> {
    let lowered = phrase.to_lowercase();
    let mut out = BTreeSet::new();

    for raw in lowered.split_whitespace() {
        let word = raw.trim_matches(EDGE_PUNCTUATION);
        if word.is_empty() || lexicon.is_stopword(fold(word).trim()) {
            continue;
        }
        out.extend(expand_word(word, lexicon));
    }

    out
}

/// Variants of a single, already cleaned, lower-case word.
pub fn expand_word(word: &str, lexicon: &Lexicon) -> BTreeSet<String> {
    let limits = lexicon.limits();
    let mut variants = BTreeSet::from([word.to_string()]);

    if word.chars().count() > limits.max_word_len {
        debug!(
            word,
            max_word_len = limits.max_word_len,
            "word too long, skipping variant expansion"
        );
        return variants;
    }

    for row in lexicon.substitutions() {
        if !word.contains(row.key.as_str()) {
            continue;
        }

        let mut produced = Vec::new();
        for existing in &variants {
            for alternative in &row.alternatives {
                produced.push(existing.replace(row.key.as_str(), alternative));
            }
        }

        for candidate in produced {
            if variants.len() >= limits.max_variants_per_word {
                debug!(
                    word,
                    max_variants_per_word = limits.max_variants_per_word,
                    "variant expansion capped"
                );
                return variants;
            }
            variants.insert(candidate);
        }
    }

    variants
}
