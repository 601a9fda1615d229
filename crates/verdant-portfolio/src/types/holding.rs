//! Holding representation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A single position in a portfolio.
///
/// `shares × cost_basis` is the book value used for weighting. Holdings are
/// created by the caller and never mutated here; positivity is checked by
/// [`validate`](crate::validation::validate), not on construction, so that
/// malformed caller data surfaces as a typed error rather than being
/// unrepresentable.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Holding {
    /// Market identifier (exchange code, ticker, ISIN...).
    pub identifier: String,

    /// Number of shares held.
    pub shares: Decimal,

    /// Average cost per share.
    #[serde(alias = "avg_cost")]
    pub cost_basis: Decimal,
}

impl Holding {
    /// Creates a new holding.
    #[must_use]
    pub fn new(identifier: impl Into<String>, shares: Decimal, cost_basis: Decimal) -> Self {
        Self {
            identifier: identifier.into(),
            shares,
            cost_basis,
        }
    }

    /// Returns the book value (`shares × cost_basis`).
    #[must_use]
    pub fn book_value(&self) -> Decimal {
        self.shares * self.cost_basis
    }

    /// Returns the book value, or `None` if it overflows.
    #[must_use]
    pub fn checked_book_value(&self) -> Option<Decimal> {
        self.shares.checked_mul(self.cost_basis)
    }
}

/// Sums the book values of a slice of holdings, or `None` on overflow.
#[must_use]
pub fn total_book_value(holdings: &[Holding]) -> Option<Decimal> {
    holdings.iter().try_fold(Decimal::ZERO, |acc, h| {
        h.checked_book_value().and_then(|value| acc.checked_add(value))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_book_value() {
        let holding = Holding::new("532540", dec!(10), dec!(3450.50));
        assert_eq!(holding.book_value(), dec!(34505.00));
        assert_eq!(holding.checked_book_value(), Some(dec!(34505.00)));
    }

    #[test]
    fn test_checked_book_value_overflow() {
        let holding = Holding::new("A", Decimal::MAX, dec!(2));
        assert_eq!(holding.checked_book_value(), None);
    }

    #[test]
    fn test_total_book_value() {
        let holdings = vec![
            Holding::new("A", dec!(10), dec!(100)),
            Holding::new("B", dec!(4), dec!(250)),
        ];
        assert_eq!(total_book_value(&holdings), Some(dec!(2000)));
        assert_eq!(total_book_value(&[]), Some(Decimal::ZERO));

        let overflowing = vec![
            Holding::new("A", Decimal::MAX, dec!(1)),
            Holding::new("B", dec!(1), dec!(1)),
        ];
        assert_eq!(total_book_value(&overflowing), None);
    }

    #[test]
    fn test_serde_accepts_avg_cost_alias() {
        let json = r#"{"identifier":"500325","shares":12.0,"avg_cost":2450.0}"#;
        let holding: Holding = serde_json::from_str(json).unwrap();
        assert_eq!(holding.cost_basis, dec!(2450));
        assert_eq!(holding.shares, dec!(12));
    }
}
