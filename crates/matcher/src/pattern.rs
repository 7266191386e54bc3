//! Literal patterns for user-supplied search text.
//!
//! Query text reaches pattern engines (the in-memory evaluator here, a
//! document database's `$regex` in production) only through
//! [`LiteralPattern`], which escapes every metacharacter first. A query like
//! `"3/4\" (PVC)"` therefore matches those characters literally instead of
//! being parsed as a group.
//!
//! In memory the literal is matched as a lowercased substring, so there is
//! no compiled program and no input length at which construction can fail.

use std::fmt;

/// A case-insensitive literal substring matcher.
#[derive(Clone)]
pub struct LiteralPattern {
    literal: String,
    folded: String,
    escaped: String,
}

impl LiteralPattern {
    pub fn new(literal: &str) -> Self {
        Self {
            literal: literal.to_string(),
            folded: literal.to_lowercase(),
            escaped: regex::escape(literal),
        }
    }

    /// The text as the user typed it.
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The escaped form, safe to hand to an external regex engine.
    pub fn escaped(&self) -> &str {
        &self.escaped
    }

    pub fn is_match(&self, haystack: &str) -> bool {
        self.folded.is_empty() || haystack.to_lowercase().contains(&self.folded)
    }

    /// True if any member contains the literal.
    pub fn matches_any<'a, I>(&self, members: I) -> bool
    where
        I: IntoIterator<Item = &'a String>,
    {
        members.into_iter().any(|member| self.is_match(member))
    }
}

impl PartialEq for LiteralPattern {
    fn eq(&self, other: &Self) -> bool {
        self.literal == other.literal
    }
}

impl Eq for LiteralPattern {}

impl fmt::Debug for LiteralPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LiteralPattern").field(&self.literal).finish()
    }
}
