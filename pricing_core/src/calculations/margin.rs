//! # Margin & Bracket Analysis
//!
//! Evaluates a user-chosen final price against the cost basis and the price
//! matrix.
//!
//! - [`margin_percent`] returns the margin of a selling price over a cost,
//!   with `0` as a "no data yet" sentinel when either side is unset.
//! - [`nearest_bracket`] finds, for one channel, the depreciation horizons
//!   whose per-unit prices sit just below (or at) and just above a target.
//!
//! ## Example
//!
//! ```rust
//! use pricing_core::calculations::margin::margin_percent;
//!
//! assert!((margin_percent(150.0, 100.0) - 33.333).abs() < 1e-3);
//! assert_eq!(margin_percent(0.0, 100.0), 0.0);
//! assert_eq!(margin_percent(150.0, 0.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

use super::price_matrix::DepreciationEntry;

/// An unset amount: zero or NaN.
fn is_unset(value: f64) -> bool {
    value == 0.0 || value.is_nan()
}

/// Margin of `selling_price` over `cost`, in percent of the selling price.
///
/// Returns exactly `0.0` when either argument is unset (zero or NaN). This
/// sentinel is not the same thing as a true 0% margin.
pub fn margin_percent(selling_price: f64, cost: f64) -> f64 {
    if is_unset(selling_price) || is_unset(cost) {
        return 0.0;
    }
    ((selling_price - cost) / selling_price) * 100.0
}

/// A depreciation horizon and the per-unit price it yields for one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BracketPoint {
    pub months: u32,
    pub price_per_unit: f64,
}

/// Horizons surrounding a target price.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceBracket {
    /// Highest-priced horizon at or below the target
    pub lower: Option<BracketPoint>,
    /// Lowest-priced horizon strictly above the target
    pub higher: Option<BracketPoint>,
}

impl PriceBracket {
    pub fn is_empty(&self) -> bool {
        self.lower.is_none() && self.higher.is_none()
    }
}

/// Locate the horizons whose per-unit price for `channel_name` bracket
/// `target_price`.
///
/// Prices equal to the target count as `lower`. An unset target (zero or NaN)
/// yields an empty bracket. Horizons without the channel are ignored, and so
/// are NaN prices, which compare neither below nor above any target.
pub fn nearest_bracket(
    matrix: &[DepreciationEntry],
    channel_name: &str,
    target_price: f64,
) -> PriceBracket {
    if is_unset(target_price) {
        return PriceBracket::default();
    }

    let mut points: Vec<BracketPoint> = matrix
        .iter()
        .filter_map(|entry| {
            entry.channel_price(channel_name).map(|cp| BracketPoint {
                months: entry.months,
                price_per_unit: cp.price_per_unit,
            })
        })
        .collect();
    // Stable: equal prices keep horizon order
    points.sort_by(|a, b| a.price_per_unit.total_cmp(&b.price_per_unit));

    let lower = points
        .iter()
        .filter(|p| p.price_per_unit <= target_price)
        .last()
        .copied();
    let higher = points
        .iter()
        .find(|p| p.price_per_unit > target_price)
        .copied();

    PriceBracket { lower, higher }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::price_matrix::ChannelPrice;

    fn entry(months: u32, prices: &[(&str, f64)]) -> DepreciationEntry {
        DepreciationEntry {
            months,
            depreciation_cost: 0.0,
            total_cost: 0.0,
            channel_prices: prices
                .iter()
                .map(|(name, per_unit)| ChannelPrice {
                    channel_name: name.to_string(),
                    price: *per_unit,
                    price_per_unit: *per_unit,
                    channel_cut: 0.0,
                    seller_earnings: *per_unit,
                })
                .collect(),
        }
    }

    /// Per-unit prices fall as the horizon grows, like a real matrix.
    fn matrix() -> Vec<DepreciationEntry> {
        vec![
            entry(3, &[("Direct", 1.50), ("Shop", 1.80)]),
            entry(6, &[("Direct", 1.20), ("Shop", 1.45)]),
            entry(9, &[("Direct", 1.10), ("Shop", 1.30)]),
            entry(12, &[("Direct", 1.05), ("Shop", 1.25)]),
            entry(24, &[("Direct", 0.95), ("Shop", 1.15)]),
        ]
    }

    fn months(point: Option<BracketPoint>) -> Option<u32> {
        point.map(|p| p.months)
    }

    #[test]
    fn test_margin_formula() {
        let margin = margin_percent(150.0, 100.0);
        assert!((margin - 50.0 / 150.0 * 100.0).abs() < 1e-12);
        assert!((margin_percent(80.0, 100.0) + 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_margin_sentinels() {
        assert_eq!(margin_percent(0.0, 42.0), 0.0);
        assert_eq!(margin_percent(42.0, 0.0), 0.0);
        assert_eq!(margin_percent(0.0, 0.0), 0.0);
        assert_eq!(margin_percent(f64::NAN, 10.0), 0.0);
        assert_eq!(margin_percent(10.0, f64::NAN), 0.0);
        assert_eq!(margin_percent(-0.0, 10.0), 0.0);
    }

    #[test]
    fn test_true_zero_margin() {
        assert_eq!(margin_percent(10.0, 10.0), 0.0);
    }

    #[test]
    fn test_bracket_between_horizons() {
        let bracket = nearest_bracket(&matrix(), "Direct", 1.15);
        assert_eq!(months(bracket.lower), Some(9));
        assert_eq!(months(bracket.higher), Some(6));
        assert_eq!(bracket.lower.map(|p| p.price_per_unit), Some(1.10));
    }

    #[test]
    fn test_bracket_tie_goes_to_lower() {
        let bracket = nearest_bracket(&matrix(), "Direct", 1.20);
        assert_eq!(months(bracket.lower), Some(6));
        assert_eq!(months(bracket.higher), Some(3));
    }

    #[test]
    fn test_bracket_outside_range() {
        let below = nearest_bracket(&matrix(), "Shop", 0.50);
        assert!(below.lower.is_none());
        assert_eq!(months(below.higher), Some(24));

        let above = nearest_bracket(&matrix(), "Shop", 5.00);
        assert_eq!(months(above.lower), Some(3));
        assert!(above.higher.is_none());
    }

    #[test]
    fn test_bracket_unset_target() {
        assert!(nearest_bracket(&matrix(), "Direct", 0.0).is_empty());
        assert!(nearest_bracket(&matrix(), "Direct", f64::NAN).is_empty());
    }

    #[test]
    fn test_bracket_unknown_channel() {
        assert!(nearest_bracket(&matrix(), "Nowhere", 1.0).is_empty());
    }

    #[test]
    fn test_bracket_equal_prices_keep_horizon_order() {
        let flat = vec![
            entry(3, &[("Direct", 1.0)]),
            entry(6, &[("Direct", 1.0)]),
            entry(9, &[("Direct", 2.0)]),
        ];
        let bracket = nearest_bracket(&flat, "Direct", 1.0);
        assert_eq!(months(bracket.lower), Some(6));
        assert_eq!(months(bracket.higher), Some(9));
    }

    #[test]
    fn test_bracket_ignores_nan_prices() {
        let broken = vec![
            entry(3, &[("Direct", f64::NAN)]),
            entry(6, &[("Direct", 2.0)]),
        ];
        let bracket = nearest_bracket(&broken, "Direct", 3.0);
        assert_eq!(months(bracket.lower), Some(6));
        assert!(bracket.higher.is_none());
    }

    #[test]
    fn test_bracket_infinite_price_is_higher() {
        let broken = vec![
            entry(3, &[("Direct", f64::INFINITY)]),
            entry(6, &[("Direct", 2.0)]),
        ];
        let bracket = nearest_bracket(&broken, "Direct", 3.0);
        assert_eq!(months(bracket.higher), Some(3));
    }
}
