//! ESG score lookup by holding identifier.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::baseline::DEFAULT_ESG_SCORE;
use crate::types::Holding;

/// ESG scores keyed by holding identifier.
///
/// [`aligned`](Self::aligned) turns the book into the positional score
/// sequence the validator expects, substituting a default for identifiers
/// with no entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreBook {
    scores: HashMap<String, f64>,
    #[serde(default = "default_score")]
    default_score: f64,
}

fn default_score() -> f64 {
    DEFAULT_ESG_SCORE
}

impl Default for ScoreBook {
    fn default() -> Self {
        Self::new()
    }
}

impl ScoreBook {
    /// Creates an empty book with the default score of 50.
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: HashMap::new(),
            default_score: DEFAULT_ESG_SCORE,
        }
    }

    /// Sets the score used for identifiers with no entry.
    #[must_use]
    pub fn with_default_score(mut self, score: f64) -> Self {
        self.default_score = score;
        self
    }

    /// The score used for identifiers with no entry.
    #[must_use]
    pub fn default_score(&self) -> f64 {
        self.default_score
    }

    /// Inserts or replaces a score, returning the previous one.
    pub fn insert(&mut self, identifier: impl Into<String>, score: f64) -> Option<f64> {
        self.scores.insert(identifier.into(), score)
    }

    /// Looks up a score without falling back to the default.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<f64> {
        self.scores.get(identifier).copied()
    }

    /// Looks up a score, falling back to the default.
    #[must_use]
    pub fn score_for(&self, identifier: &str) -> f64 {
        self.get(identifier).unwrap_or(self.default_score)
    }

    /// Number of explicit entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True if the book has no explicit entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// One score per holding, in holding order.
    ///
    /// The result always has `holdings.len()` elements.
    #[must_use]
    pub fn aligned(&self, holdings: &[Holding]) -> Vec<f64> {
        self.fill(holdings, &[])
    }

    /// One score per holding, preferring the positional `row_scores` entry
    /// and falling back to the book, then the default.
    ///
    /// Rows are matched by position, so holdings that share an identifier keep
    /// their own scores. `row_scores` may be shorter than `holdings`.
    #[must_use]
    pub fn fill(&self, holdings: &[Holding], row_scores: &[Option<f64>]) -> Vec<f64> {
        holdings
            .iter()
            .enumerate()
            .map(|(row, h)| {
                if let Some(score) = row_scores.get(row).copied().flatten() {
                    return score;
                }
                self.get(&h.identifier).unwrap_or_else(|| {
                    tracing::warn!(
                        identifier = %h.identifier,
                        default = self.default_score,
                        "no ESG score for holding, using default"
                    );
                    self.default_score
                })
            })
            .collect()
    }

    /// Identifiers among `holdings` that have no explicit entry.
    #[must_use]
    pub fn missing<'a>(&self, holdings: &'a [Holding]) -> Vec<&'a str> {
        holdings
            .iter()
            .filter(|h| !self.scores.contains_key(&h.identifier))
            .map(|h| h.identifier.as_str())
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScoreBook {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut book = Self::new();
        book.extend(iter);
        book
    }
}

impl<S: Into<String>> Extend<(S, f64)> for ScoreBook {
    fn extend<I: IntoIterator<Item = (S, f64)>>(&mut self, iter: I) {
        for (identifier, score) in iter {
            self.insert(identifier, score);
        }
    }
}
