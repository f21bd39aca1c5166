//! Run mode specifications
//!
//! A specification is an OR (`,`) of ANDs (`.`) of mode names, where a
//! leading `-` negates a name: `author.dev,-publish`. Matching yields the
//! number of terms of the best matching conjunction, so more specific
//! configuration fragments outrank general ones.

use crate::modes::{ModeLookup, split_segments};

/// Separator between alternatives.
pub const OR_SEPARATOR: char = ',';

/// Separator between required terms.
pub const AND_SEPARATOR: char = '.';

/// Prefix negating a term.
pub const NOT_PREFIX: char = '-';

/// Size of the best matching conjunction of `spec`, or 0 if none matches.
///
/// Trailing empty alternatives are ignored.
pub fn best_match_count<M: ModeLookup + ?Sized>(spec: &str, active: &M) -> usize {
    split_segments(spec, OR_SEPARATOR)
        .into_iter()
        .map(|conjunction| conjunction_match_count(conjunction, active))
        .max()
        .unwrap_or(0)
}

/// Number of terms in `conjunction` if every term holds, else 0.
///
/// Trailing empty terms are dropped. An inner empty term names the empty
/// mode, which is normally inactive, so `a..b` fails.
pub fn conjunction_match_count<M: ModeLookup + ?Sized>(conjunction: &str, active: &M) -> usize {
    let mut count = 0;
    for term in split_segments(conjunction, AND_SEPARATOR) {
        let holds = match term.strip_prefix(NOT_PREFIX) {
            Some(negated) => !active.contains_mode(negated),
            None => active.contains_mode(term),
        };
        if !holds {
            return 0;
        }
        count += 1;
    }
    count
}

/// A single term of a conjunction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Term {
    /// The mode must be active.
    Require(String),
    /// The mode must not be active.
    Exclude(String),
}

impl Term {
    fn holds<M: ModeLookup + ?Sized>(&self, active: &M) -> bool {
        match self {
            Term::Require(mode) => active.contains_mode(mode),
            Term::Exclude(mode) => !active.contains_mode(mode),
        }
    }
}

/// A pre-parsed specification for repeated evaluation.
///
/// Gives the same counts as [`best_match_count`] on the source text.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MatchSpec {
    disjuncts: Vec<Vec<Term>>,
}

impl MatchSpec {
    pub fn parse(spec: &str) -> Self {
        let disjuncts = split_segments(spec, OR_SEPARATOR)
            .into_iter()
            .map(|conjunction| {
                split_segments(conjunction, AND_SEPARATOR)
                    .into_iter()
                    .map(|term| match term.strip_prefix(NOT_PREFIX) {
                        Some(negated) => Term::Exclude(negated.to_string()),
                        None => Term::Require(term.to_string()),
                    })
                    .collect()
            })
            .collect();
        Self { disjuncts }
    }

    /// The alternatives, each a list of required terms.
    pub fn disjuncts(&self) -> &[Vec<Term>] {
        &self.disjuncts
    }

    pub fn best_match_count<M: ModeLookup + ?Sized>(&self, active: &M) -> usize {
        self.disjuncts
            .iter()
            .filter(|terms| terms.iter().all(|t| t.holds(active)))
            .map(Vec::len)
            .max()
            .unwrap_or(0)
    }
}

/// Pick the most specific matching specification.
///
/// Returns the index and strength of the candidate with the highest
/// non-zero count; the earliest candidate wins a tie.
pub fn select_best<'s, I, M>(candidates: I, active: &M) -> Option<(usize, usize)>
where
    I: IntoIterator<Item = &'s str>,
    M: ModeLookup + ?Sized,
{
    let mut best: Option<(usize, usize)> = None;
    for (index, spec) in candidates.into_iter().enumerate() {
        let count = best_match_count(spec, active);
        if count > 0 && best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((index, count));
        }
    }
    best
}
