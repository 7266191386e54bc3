//! Built-in Spanish stopword list.
//!
//! Articles, prepositions, pronouns, conjunctions and a short list of
//! discourse adverbs. Entries are written with their accents; the lexicon
//! folds them on load so lookups line up with normalized tokens.

/// Spanish function words excluded from keyword indexing.
pub const SPANISH_STOPWORDS: &[&str] = &[
    "de", "la", "que", "el", "en", "y", "a", "los", "del", "se", "las", "por", "un", "una",
    "para", "con", "no", "su", "al", "lo", "como", "más", "pero", "sus", "o", "este", "ha",
    "si", "porque", "esta", "estos", "estas", "es", "son", "han", "fue", "fueron", "ser",
    "mi", "tu", "nuestro", "vuestro", "suya", "cuyo", "donde", "cuando", "quien", "cual",
    "cuanto", "cada", "todo", "todos", "toda", "todas", "le", "les", "me", "te", "nos", "os",
    "yo", "ella", "nosotros", "vosotros", "ellos", "ellas", "mí", "ti", "él", "ello", "aquí",
    "ahí", "allí", "acá", "allá", "arriba", "abajo", "antes", "después", "durante",
    "mientras", "desde", "hasta", "hacia", "entre", "sobre", "bajo", "sin", "contra",
    "según", "ante", "tras", "mediante", "salvo", "excepto", "incluso", "inclusive",
    "además", "asimismo", "entonces", "luego", "así", "también", "tampoco", "aun", "aún",
    "ya", "solo", "solamente", "casi", "quizá", "quizás", "tal", "vez", "apenas", "mucho",
    "poco", "demasiado", "bastante", "tan", "tanto", "mayor", "menor", "mejor", "peor", "ni",
];

/// Irregular and invariant forms checked before the suffix rules of
/// [`singularize`](crate::singularize).
pub const SPANISH_SINGULAR_EXCEPTIONS: &[(&str, &str)] = &[
    ("los", "el"),
    ("las", "la"),
    ("unos", "uno"),
    ("unas", "una"),
    ("crisis", "crisis"),
    ("torax", "torax"),
];
