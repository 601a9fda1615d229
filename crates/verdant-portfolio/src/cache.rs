//! Time-limited ESG score cache.
//!
//! Callers own the cache and pass it where needed; nothing in this crate
//! holds one globally.

use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::scores::ScoreBook;

/// Default time-to-live for cached scores.
pub const DEFAULT_SCORE_TTL: Duration = Duration::from_secs(3600);

/// Thread-safe ESG score cache with a fixed time-to-live.
///
/// An entry is live while its age is strictly below the TTL.
#[derive(Debug)]
pub struct ScoreCache {
    scores: DashMap<String, CachedScore>,
    ttl: Duration,
}

#[derive(Debug, Clone, Copy)]
struct CachedScore {
    score: f64,
    stored_at: Instant,
}

impl CachedScore {
    fn is_expired(&self, ttl: Duration) -> bool {
        self.stored_at.elapsed() >= ttl
    }
}

impl ScoreCache {
    /// Create a cache whose entries expire after `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            scores: DashMap::new(),
            ttl,
        }
    }

    /// The configured time-to-live.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Store a score, resetting its age.
    pub fn insert(&self, identifier: impl Into<String>, score: f64) {
        self.scores.insert(
            identifier.into(),
            CachedScore {
                score,
                stored_at: Instant::now(),
            },
        );
    }

    /// Get a live score. Expired entries read as absent.
    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<f64> {
        self.scores
            .get(identifier)
            .filter(|c| !c.is_expired(self.ttl))
            .map(|c| c.score)
    }

    /// True if the entry is missing or expired.
    #[must_use]
    pub fn is_stale(&self, identifier: &str) -> bool {
        self.scores
            .get(identifier)
            .map_or(true, |c| c.is_expired(self.ttl))
    }

    /// Remove expired entries, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let before = self.scores.len();
        self.scores.retain(|_, c| !c.is_expired(self.ttl));
        let purged = before.saturating_sub(self.scores.len());
        if purged > 0 {
            tracing::debug!(purged, "purged expired ESG scores");
        }
        purged
    }

    /// Number of stored entries, live or expired.
    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    /// True if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }

    /// Remove all entries.
    pub fn clear(&self) {
        self.scores.clear();
    }

    /// Snapshot of the live entries as a [`ScoreBook`].
    #[must_use]
    pub fn to_score_book(&self) -> ScoreBook {
        self.scores
            .iter()
            .filter(|entry| !entry.value().is_expired(self.ttl))
            .map(|entry| (entry.key().clone(), entry.value().score))
            .collect()
    }
}

impl Default for ScoreCache {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_TTL)
    }
}
