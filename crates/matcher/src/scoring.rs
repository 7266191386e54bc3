//! Match predicate and additive score construction.
//!
//! [`build_match_and_score`] turns a processed query into two trees:
//!
//! - a [`Predicate`] made of up to three groups: the raw query as a substring
//!   of `name`/`code`/`brand`, every exact term inside some `exactSearchTerms`
//!   member, every keyword inside some `searchKeywords` member. Empty groups
//!   are left out; with no groups the predicate accepts everything. By
//!   default an entry must satisfy every group that is present.
//! - a [`ScoreExpression`] of weighted rules. Each rule adds its weight once
//!   when its condition holds; weights are unsigned, so an entry that fires a
//!   superset of another's signals never scores lower.

use index::CatalogEntry;

use crate::pattern::LiteralPattern;
use crate::predicate::{Predicate, SetField, TextField};
use crate::query::PreparedQuery;
use crate::types::{GroupCombinator, MatchConfig, ProcessedQuery, Signal};

/// One additive scoring term.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreRule {
    pub signal: Signal,
    pub weight: u32,
    pub when: Predicate,
}

/// Sum of weighted rules.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScoreExpression {
    pub rules: Vec<ScoreRule>,
}

impl ScoreExpression {
    /// Total score and the signals that fired, in rule order.
    pub fn evaluate(&self, entry: &CatalogEntry) -> (u32, Vec<Signal>) {
        let mut score = 0u32;
        let mut fired = Vec::new();
        for rule in &self.rules {
            if rule.when.evaluate(entry) {
                score = score.saturating_add(rule.weight);
                fired.push(rule.signal);
            }
        }
        (score, fired)
    }
}

/// Output of [`build_match_and_score`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchAndScore {
    pub predicate: Predicate,
    pub score: ScoreExpression,
}

/// Predicate and score for `processed`, with `raw` as the only substring form.
///
/// The keyword signal fires when some query keyword is contained in a
/// `searchKeywords` member, so `"torni"` overlaps `"tornillo"`. The stem
/// signal needs an exact member of `stemmedKeywords`.
pub fn build_match_and_score(
    processed: &ProcessedQuery,
    raw: &str,
    config: &MatchConfig,
) -> MatchAndScore {
    build_with_raw_forms(processed, &[raw], config)
}

/// Like [`build_match_and_score`], but every raw form of `prepared` counts
/// as a substring hit. On name search that admits the singular query.
pub fn build_prepared(prepared: &PreparedQuery, config: &MatchConfig) -> MatchAndScore {
    build_with_raw_forms(&prepared.processed, &prepared.raw_forms(), config)
}

fn build_with_raw_forms(
    processed: &ProcessedQuery,
    raw_forms: &[&str],
    config: &MatchConfig,
) -> MatchAndScore {
    let mut raw_patterns: Vec<LiteralPattern> = Vec::new();
    for form in raw_forms.iter().map(|form| form.trim()) {
        if !form.is_empty() && raw_patterns.iter().all(|p| p.literal() != form) {
            raw_patterns.push(LiteralPattern::new(form));
        }
    }

    let exact_terms: Vec<Predicate> = processed
        .exact_terms
        .iter()
        .map(|term| Predicate::AnyElementContains {
            field: SetField::ExactSearchTerms,
            pattern: LiteralPattern::new(term),
        })
        .collect();
    let keywords: Vec<Predicate> = processed
        .keywords
        .iter()
        .map(|keyword| Predicate::AnyElementContains {
            field: SetField::SearchKeywords,
            pattern: LiteralPattern::new(keyword),
        })
        .collect();

    let raw_contains = |field: TextField| {
        Predicate::any(
            raw_patterns
                .iter()
                .map(|pattern| Predicate::Contains {
                    field,
                    pattern: pattern.clone(),
                })
                .collect(),
        )
    };

    let mut groups = Vec::new();
    if !raw_patterns.is_empty() {
        groups.push(Predicate::any(
            [TextField::Name, TextField::Code, TextField::Brand]
                .into_iter()
                .flat_map(|field| {
                    raw_patterns.iter().map(move |pattern| Predicate::Contains {
                        field,
                        pattern: pattern.clone(),
                    })
                })
                .collect(),
        ));
    }
    if !exact_terms.is_empty() {
        groups.push(Predicate::all(exact_terms.clone()));
    }
    if !keywords.is_empty() {
        groups.push(Predicate::all(keywords.clone()));
    }
    let predicate = match (groups.is_empty(), config.combinator) {
        (true, _) => Predicate::True,
        (false, GroupCombinator::Any) => Predicate::any(groups),
        (false, GroupCombinator::All) => Predicate::all(groups),
    };

    let weights = &config.weights;
    let mut rules = Vec::new();
    let mut push = |signal: Signal, when: Predicate| {
        rules.push(ScoreRule {
            signal,
            weight: weights.weight_of(signal),
            when,
        });
    };
    if !raw_patterns.is_empty() {
        push(Signal::NameSubstring, raw_contains(TextField::Name));
        push(Signal::CodeSubstring, raw_contains(TextField::Code));
        push(Signal::BrandSubstring, raw_contains(TextField::Brand));
    }
    if !exact_terms.is_empty() {
        push(Signal::ExactTerm, Predicate::any(exact_terms));
    }
    if !keywords.is_empty() {
        push(Signal::Keyword, Predicate::any(keywords));
    }
    if !processed.stemmed.is_empty() {
        push(
            Signal::Stem,
            Predicate::Intersects {
                field: SetField::StemmedKeywords,
                values: processed.stemmed.clone(),
            },
        );
    }
    if !raw_patterns.is_empty() {
        push(
            Signal::DescriptionSubstring,
            raw_contains(TextField::Description),
        );
    }
    push(Signal::Featured, Predicate::FeaturedIs(true));

    MatchAndScore {
        predicate,
        score: ScoreExpression { rules },
    }
}
