//! Discount arithmetic.

use crate::money::{Currency, Money};
use serde::{Deserialize, Serialize};

/// Compute the effective price after an optional percentage discount.
///
/// A discount applies only when present and strictly positive. Values
/// outside `[0, 100]` are used as given; range checks belong to
/// [`ProductInput::validate`](crate::catalog::ProductInput::validate).
///
/// ```
/// use mercurius_catalog::pricing::final_price;
/// assert_eq!(final_price(1000.0, Some(20.0)), 800.0);
/// assert_eq!(final_price(1000.0, None), 1000.0);
/// ```
pub fn final_price(price: f64, discount: Option<f64>) -> f64 {
    match discount {
        Some(percent) if percent > 0.0 => price * (1.0 - percent / 100.0),
        _ => price,
    }
}

/// Price information for display next to a product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBreakdown {
    /// Base price before discount.
    pub original: f64,
    /// Price after discount.
    pub final_price: f64,
    /// Discount percentage, only when one is active.
    pub discount_percent: Option<f64>,
}

impl PriceBreakdown {
    pub fn new(price: f64, discount: Option<f64>) -> Self {
        Self {
            original: price,
            final_price: final_price(price, discount),
            discount_percent: discount.filter(|d| *d > 0.0),
        }
    }

    /// Check if a discount is active.
    pub fn has_discount(&self) -> bool {
        self.discount_percent.is_some()
    }

    /// Amount saved by the discount.
    pub fn savings(&self) -> f64 {
        self.original - self.final_price
    }

    /// Badge text such as "-20%", if discounted.
    pub fn badge(&self) -> Option<String> {
        self.discount_percent.map(|d| format!("-{}%", d))
    }

    pub fn final_money(&self, currency: Currency) -> Money {
        Money::new(self.final_price, currency)
    }

    pub fn original_money(&self, currency: Currency) -> Money {
        Money::new(self.original, currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_price_with_discount() {
        assert_eq!(final_price(1000.0, Some(20.0)), 800.0);
        assert_eq!(final_price(50.0, Some(100.0)), 0.0);
    }

    #[test]
    fn test_zero_or_missing_discount_is_identity() {
        assert_eq!(final_price(123.45, None), 123.45);
        assert_eq!(final_price(123.45, Some(0.0)), 123.45);
        assert_eq!(final_price(123.45, Some(-10.0)), 123.45);
    }

    #[test]
    fn test_out_of_range_discount_is_applied_as_given() {
        assert_eq!(final_price(100.0, Some(150.0)), -50.0);
    }

    #[test]
    fn test_breakdown() {
        let b = PriceBreakdown::new(250.0, Some(10.0));
        assert!(b.has_discount());
        assert!((b.final_price - 225.0).abs() < 1e-9);
        assert!((b.savings() - 25.0).abs() < 1e-9);
        assert_eq!(b.badge().as_deref(), Some("-10%"));
        assert_eq!(b.final_money(Currency::BRL).display(), "R$ 225,00");
    }

    #[test]
    fn test_breakdown_without_discount() {
        let b = PriceBreakdown::new(80.0, Some(0.0));
        assert!(!b.has_discount());
        assert_eq!(b.badge(), None);
        assert_eq!(b.savings(), 0.0);
    }
}
