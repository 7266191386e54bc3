//! Catalog canonical text layer.
//!
//! Everything that turns free Spanish text into comparable tokens lives here,
//! and both the indexing side and the query side call into it so the two
//! always agree on what a token looks like.
//!
//! ## What we do
//!
//! - Accent and diacritic folding (NFKD, combining marks dropped)
//! - Lower-casing and punctuation removal, whitespace tokenization
//! - Stopword filtering against an injected [`Lexicon`]
//! - Singularization by suffix rules and Snowball stemming
//! - Spelling-variant expansion (`b`/`v`, `c`/`s`/`z`, `ll`/`y`, ...)
//!
//! ## Pure function guarantee
//!
//! No I/O, no clock, no locale. The lexicon is immutable after construction
//! and the stemmer is `Send + Sync`, so every function in this crate can be
//! called concurrently from any thread.
//!
//! ## Invariants worth knowing
//!
//! - Normalized tokens contain only `[a-z0-9]` and are never empty
//! - Stopwords are stored folded, so `después` and `despues` are both filtered
//! - Variant expansion always keeps the original word and is capped per word
//!
//! ```rust
//! use canonical::{normalize, singularize, Lexicon, SnowballStemmer, Stem};
//!
//! let lexicon = Lexicon::spanish();
//! let tokens = normalize("Tornillos de ACERO inoxidable", &lexicon);
//! assert_eq!(tokens, vec!["tornillos", "acero", "inoxidable"]);
//!
//! let stemmer = SnowballStemmer::spanish();
//! assert_eq!(stemmer.stem("tornillos"), stemmer.stem(&singularize("tornillos", &lexicon)));
//! ```

mod error;
mod lexicon;
mod morphology;
mod normalize;
mod stopwords;
mod variants;

pub use crate::error::CanonicalError;
pub use crate::lexicon::{spanish_substitutions, Lexicon, Substitution, VariantLimits};
pub use crate::morphology::{singularize, SnowballStemmer, Stem};
pub use crate::normalize::{fold, normalize, normalize_token, tokenize};
pub use crate::stopwords::{SPANISH_SINGULAR_EXCEPTIONS, SPANISH_STOPWORDS};
pub use crate::variants::{expand, expand_word};
