//! Spanish morphological reduction: singularization and stemming.
//!
//! The two reductions are independent. [`singularize`] is a small suffix rule
//! table used at the name-search call site, while [`Stem`] maps normalized
//! tokens to a root shared by inflected forms, used on both the indexing and
//! the query side.

use std::fmt;

use rust_stemmers::{Algorithm, Stemmer};

use crate::lexicon::Lexicon;

/// Reduce a Spanish plural to its singular form.
///
/// Rules, first match wins:
///
/// 1. the lexicon exception table (`los` → `el`, `crisis` → `crisis`, ...)
/// 2. consonant + `ces` → consonant + `z`
/// 3. trailing `es` is dropped
/// 4. vowel + `s` loses the `s`
///
/// Suffix checks ignore ASCII case so raw, un-normalized queries can be
/// passed; the untouched prefix keeps its case. A rule that would leave
/// nothing behind does not fire.
///
/// ```rust
/// use canonical::{singularize, Lexicon};
///
/// let lexicon = Lexicon::spanish();
/// assert_eq!(singularize("tornillos", &lexicon), "tornillo");
/// assert_eq!(singularize("TORNILLOS", &lexicon), "TORNILLO");
/// assert_eq!(singularize("las", &lexicon), "la");
/// ```
pub fn singularize(word: &str, lexicon: &Lexicon) -> String {
    if let Some(singular) = lexicon.singular_exception(word) {
        return singular.to_string();
    }

    if let Some(prefix) = strip_suffix_ignore_case(word, "ces") {
        if prefix.chars().next_back().is_some_and(is_consonant) {
            return format!("{prefix}z");
        }
    }
    if let Some(prefix) = strip_suffix_ignore_case(word, "es") {
        if !prefix.is_empty() {
            return prefix.to_string();
        }
    }
    if let Some(prefix) = strip_suffix_ignore_case(word, "s") {
        if prefix.chars().next_back().is_some_and(is_vowel) {
            return prefix.to_string();
        }
    }

    word.to_string()
}

fn strip_suffix_ignore_case<'a>(word: &'a str, suffix: &str) -> Option<&'a str> {
    let split = word.len().checked_sub(suffix.len())?;
    // The suffix is ASCII, so a match guarantees `split` is a char boundary.
    let tail = word.as_bytes().get(split..)?;
    if tail.eq_ignore_ascii_case(suffix.as_bytes()) {
        word.get(..split)
    } else {
        None
    }
}

fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

fn is_consonant(c: char) -> bool {
    let accented_vowel = matches!(
        c.to_lowercase().next(),
        Some('á' | 'é' | 'í' | 'ó' | 'ú' | 'ü')
    );
    c.is_alphabetic() && !is_vowel(c) && !accented_vowel
}

/// A word stemmer.
///
/// Implementations must be pure: the same word always maps to the same stem,
/// across threads and process restarts, since stems are persisted with each
/// catalog entry and compared against stems computed at query time.
pub trait Stem: Send + Sync {
    fn stem(&self, word: &str) -> String;
}

/// Snowball Spanish stemmer.
pub struct SnowballStemmer {
    inner: Stemmer,
}

impl SnowballStemmer {
    pub fn spanish() -> Self {
        Self {
            inner: Stemmer::create(Algorithm::Spanish),
        }
    }
}

impl Default for SnowballStemmer {
    fn default() -> Self {
        Self::spanish()
    }
}

impl fmt::Debug for SnowballStemmer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnowballStemmer")
            .field("algorithm", &"spanish")
            .finish()
    }
}

impl Stem for SnowballStemmer {
    fn stem(&self, word: &str) -> String {
        self.inner.stem(word).into_owned()
    }
}
