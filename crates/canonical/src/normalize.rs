//! Text folding and tokenization.
//!
//! Every search-facing string goes through the same fold:
//!
//! 1. Unicode compatibility decomposition (NFKD), so `á` becomes `a` plus a
//!    combining accent and ligatures such as `ﬁ` split into plain letters
//! 2. Combining marks are dropped, leaving the base Latin letter
//! 3. A handful of letters with no decomposition (`ß`, `æ`, `ø`, ...) are
//!    transliterated by table
//! 4. Lower-casing
//! 5. Anything outside `[a-z0-9]` is removed, except whitespace which is kept
//!    as a token separator
//!
//! On top of the fold, [`tokenize`] splits on whitespace and [`normalize`]
//! additionally drops stopwords.
//!
//! ```rust
//! use canonical::{normalize, tokenize, Lexicon};
//!
//! let lexicon = Lexicon::spanish();
//! assert_eq!(tokenize("Tubería de PVC ½\""), vec!["tuberia", "de", "pvc", "12"]);
//! assert_eq!(normalize("Tubería de PVC", &lexicon), vec!["tuberia", "pvc"]);
//! ```

use unicode_categories::UnicodeCategories;
use unicode_normalization::UnicodeNormalization;

use crate::lexicon::Lexicon;

/// Fold text to lower-case, accent-free ASCII letters and digits.
///
/// Whitespace characters of any kind become a single ASCII space each; they
/// are not collapsed, so callers should split with `split_whitespace`.
pub fn fold(text: &str) -> String {
    let mut folded = String::with_capacity(text.len());
    for ch in text.nfkd() {
        // Decomposition leaves accents as separate combining characters.
        if ch.is_mark_nonspacing() {
            continue;
        }
        dispatch_char(ch, &mut folded);
    }
    folded
}

/// Fold and split on whitespace. Stopwords are kept.
pub fn tokenize(text: &str) -> Vec<String> {
    fold(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Fold, split and drop stopwords.
///
/// The result is not deduplicated; callers collect it into a set when they
/// need membership semantics. Input made only of punctuation or stopwords
/// yields an empty vector.
pub fn normalize(text: &str, lexicon: &Lexicon) -> Vec<String> {
    fold(text)
        .split_whitespace()
        .filter(|token| !lexicon.is_stopword(token))
        .map(str::to_string)
        .collect()
}

/// Fold a single raw token, dropping whitespace as well as punctuation.
///
/// `"Ø-12mm"` becomes `"o12mm"`.
pub fn normalize_token(raw: &str) -> String {
    let mut folded = fold(raw);
    folded.retain(|c| c != ' ');
    folded
}

/// Decides whether a decomposed character survives the fold.
fn dispatch_char(ch: char, folded: &mut String) {
    if ch.is_whitespace() {
        folded.push(' ');
        return;
    }
    if let Some(expansion) = transliterate(ch) {
        folded.push_str(expansion);
        return;
    }
    // Lowercasing can expand a character (e.g. U+0130), keep only the ASCII part.
    for lower in ch.to_lowercase() {
        if lower.is_ascii_lowercase() || lower.is_ascii_digit() {
            folded.push(lower);
        }
    }
}

/// Latin letters that NFKD leaves intact.
fn transliterate(ch: char) -> Option<&'static str> {
    match ch {
        'ß' | 'ẞ' => Some("ss"),
        'æ' | 'Æ' => Some("ae"),
        'œ' | 'Œ' => Some("oe"),
        'ø' | 'Ø' => Some("o"),
        'ł' | 'Ł' => Some("l"),
        'đ' | 'Đ' => Some("d"),
        'ı' => Some("i"),
        _ => None,
    }
}
