//! Holding and ESG score validation.
//!
//! Everything downstream takes a [`ValidatedPortfolio`], which can only be
//! obtained from [`validate`]. Checks run in a fixed order so that the
//! reported error is deterministic:
//!
//! 1. non-empty holdings
//! 2. positive shares and cost basis per holding
//! 3. one score per holding
//! 4. scores finite and within [0, 100]
//! 5. positive, representable total book value

use crate::baseline::average_esg;
use crate::error::{PortfolioError, PortfolioResult};
use crate::types::{total_book_value, Holding};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

/// Lowest admissible ESG score.
pub const MIN_ESG_SCORE: f64 = 0.0;

/// Highest admissible ESG score.
pub const MAX_ESG_SCORE: f64 = 100.0;

/// Holdings and their ESG scores, checked and paired one-to-one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValidatedPortfolio<'a> {
    holdings: &'a [Holding],
    esg_scores: &'a [f64],
    total_value: Decimal,
}

impl<'a> ValidatedPortfolio<'a> {
    /// The validated holdings.
    #[must_use]
    pub fn holdings(&self) -> &'a [Holding] {
        self.holdings
    }

    /// ESG scores, positionally matched to [`holdings`](Self::holdings).
    #[must_use]
    pub fn esg_scores(&self) -> &'a [f64] {
        self.esg_scores
    }

    /// Total book value (strictly positive).
    #[must_use]
    pub fn total_value(&self) -> Decimal {
        self.total_value
    }

    /// Number of holdings (at least one).
    #[must_use]
    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    /// Always false; kept for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /// Arithmetic mean of the ESG scores.
    #[must_use]
    pub fn average_esg(&self) -> f64 {
        average_esg(self.esg_scores)
    }

    /// Iterates `(holding, score)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&'a Holding, f64)> + 'a {
        self.holdings.iter().zip(self.esg_scores.iter().copied())
    }

    /// Book-value weights `w_i = value_i / total_value`.
    ///
    /// Weights sum to 1 within floating-point tolerance.
    #[must_use]
    pub fn weights(&self) -> Vec<f64> {
        self.holdings
            .iter()
            .map(|h| {
                (h.book_value() / self.total_value)
                    .to_f64()
                    .unwrap_or(0.0)
            })
            .collect()
    }
}

/// Validates holdings and ESG scores before any computation.
///
/// # Errors
///
/// - [`PortfolioError::EmptyPortfolio`] if `holdings` is empty
/// - [`PortfolioError::InvalidHolding`] if any shares or cost basis is not positive
/// - [`PortfolioError::ScoreMismatch`] if the sequences differ in length
/// - [`PortfolioError::InvalidScore`] if a score is non-finite or outside [0, 100]
/// - [`PortfolioError::DegenerateValue`] if total book value is not positive
///   or overflows
pub fn validate<'a>(
    holdings: &'a [Holding],
    esg_scores: &'a [f64],
) -> PortfolioResult<ValidatedPortfolio<'a>> {
    if holdings.is_empty() {
        return Err(PortfolioError::EmptyPortfolio);
    }

    for holding in holdings {
        if holding.shares <= Decimal::ZERO {
            return Err(PortfolioError::invalid_holding(
                &holding.identifier,
                format!("shares must be positive, got {}", holding.shares),
            ));
        }
        if holding.cost_basis <= Decimal::ZERO {
            return Err(PortfolioError::invalid_holding(
                &holding.identifier,
                format!("cost_basis must be positive, got {}", holding.cost_basis),
            ));
        }
    }

    if esg_scores.len() != holdings.len() {
        return Err(PortfolioError::ScoreMismatch {
            holdings: holdings.len(),
            scores: esg_scores.len(),
        });
    }

    if let Some((index, value)) = esg_scores
        .iter()
        .enumerate()
        .find(|(_, s)| !s.is_finite() || !(MIN_ESG_SCORE..=MAX_ESG_SCORE).contains(*s))
    {
        return Err(PortfolioError::InvalidScore {
            index,
            value: value.to_string(),
        });
    }

    let total_value = total_book_value(holdings).ok_or_else(|| PortfolioError::DegenerateValue {
        total: "beyond the representable range".to_string(),
    })?;

    // Positive components can still multiply to zero below Decimal's scale.
    if total_value <= Decimal::ZERO {
        return Err(PortfolioError::DegenerateValue {
            total: total_value.to_string(),
        });
    }

    tracing::debug!(
        holdings = holdings.len(),
        total_value = %total_value,
        "portfolio validated"
    );

    Ok(ValidatedPortfolio {
        holdings,
        esg_scores,
        total_value,
    })
}
