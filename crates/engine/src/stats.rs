//! Summary statistics over entry amounts.
//!
//! Everything here is pure: the store fetches the amounts of an analytics
//! window sorted ascending and hands them to [`Summary::from_sorted`].
//! Percentiles use the continuous definition (`PERCENTILE_CONT` in SQL): the
//! p-th percentile sits at position `p * (N - 1)` and falls back to linear
//! interpolation between the two neighbouring values.

use crate::MoneyCents;

/// A percentile expressed as an exact ratio, so `p * (N - 1)` can be
/// computed without rounding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Percentile {
    numerator: u32,
    denominator: u32,
}

impl Percentile {
    pub const MEDIAN: Percentile = Percentile {
        numerator: 1,
        denominator: 2,
    };
    pub const P90: Percentile = Percentile {
        numerator: 9,
        denominator: 10,
    };

    /// Returns `None` unless `0 <= numerator / denominator <= 1`.
    pub fn new(numerator: u32, denominator: u32) -> Option<Self> {
        (denominator > 0 && numerator <= denominator).then_some(Self {
            numerator,
            denominator,
        })
    }
}

/// Continuous percentile of an ascending slice of cents.
///
/// Returns `None` for an empty slice. The result is in cents and may carry a
/// fractional part when it lands between two values.
pub fn percentile_cont(sorted: &[i64], p: Percentile) -> Option<f64> {
    let last = sorted.len().checked_sub(1)? as u128;
    let denominator = u128::from(p.denominator);
    let rank = u128::from(p.numerator) * last;

    let lower = usize::try_from(rank / denominator).ok()?;
    let remainder = rank % denominator;
    let low = *sorted.get(lower)?;
    if remainder == 0 {
        return Some(low as f64);
    }

    let high = *sorted.get(lower + 1)?;
    // low + (high - low) * remainder / denominator, scaled by denominator.
    let scaled = i128::from(low) * denominator as i128
        + (i128::from(high) - i128::from(low)) * remainder as i128;
    Some(scaled as f64 / denominator as f64)
}

/// Aggregates of an analytics window, in major units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Summary {
    pub sum: f64,
    pub average: f64,
    pub count: u64,
    pub median: f64,
    pub percentile90: f64,
}

impl Summary {
    /// Builds the summary of amounts already sorted ascending.
    ///
    /// An empty window yields all zeros.
    pub fn from_sorted(amounts: &[MoneyCents]) -> Self {
        if amounts.is_empty() {
            return Self::default();
        }

        let cents: Vec<i64> = amounts.iter().map(|amount| amount.cents()).collect();
        let total: i128 = cents.iter().map(|&c| i128::from(c)).sum();
        let count = cents.len() as u64;

        Self {
            sum: to_major(total as f64),
            average: to_major(total as f64 / count as f64),
            count,
            median: percentile_cont(&cents, Percentile::MEDIAN).map_or(0.0, to_major),
            percentile90: percentile_cont(&cents, Percentile::P90).map_or(0.0, to_major),
        }
    }
}

fn to_major(cents: f64) -> f64 {
    cents / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn money(values: &[i64]) -> Vec<MoneyCents> {
        values.iter().map(|&v| MoneyCents::new(v)).collect()
    }

    #[test]
    fn percentile_of_empty_slice_is_none() {
        assert_eq!(percentile_cont(&[], Percentile::MEDIAN), None);
    }

    #[test]
    fn percentile_of_single_value_is_that_value() {
        assert_eq!(percentile_cont(&[700], Percentile::MEDIAN), Some(700.0));
        assert_eq!(percentile_cont(&[700], Percentile::P90), Some(700.0));
    }

    #[test]
    fn percentile_hits_exact_rank() {
        // 5 values: median position 0.5 * 4 = 2.
        assert_eq!(
            percentile_cont(&[1, 2, 3, 4, 5], Percentile::MEDIAN),
            Some(3.0)
        );
    }

    #[test]
    fn percentile_interpolates_between_neighbours() {
        assert_eq!(percentile_cont(&[1, 2], Percentile::MEDIAN), Some(1.5));
        // position 0.9 * 3 = 2.7 -> 30 + 0.7 * (40 - 30)
        assert_eq!(percentile_cont(&[10, 20, 30, 40], Percentile::P90), Some(37.0));
    }

    #[test]
    fn percentile_bounds() {
        let values = [3, 8, 21];
        let min = Percentile::new(0, 1).unwrap();
        let max = Percentile::new(1, 1).unwrap();
        assert_eq!(percentile_cont(&values, min), Some(3.0));
        assert_eq!(percentile_cont(&values, max), Some(21.0));
    }

    #[test]
    fn percentile_rejects_ratios_above_one() {
        assert!(Percentile::new(11, 10).is_none());
        assert!(Percentile::new(1, 0).is_none());
    }

    #[test]
    fn summary_of_empty_window_is_zero() {
        let summary = Summary::from_sorted(&[]);
        assert_eq!(summary.sum, 0.0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.median, 0.0);
        assert_eq!(summary.percentile90, 0.0);
    }

    #[test]
    fn summary_of_ten_to_one_hundred() {
        let amounts = money(&[1000, 2000, 3000, 4000, 5000, 6000, 7000, 8000, 9000, 10000]);
        let summary = Summary::from_sorted(&amounts);
        assert_eq!(summary.sum, 550.0);
        assert_eq!(summary.count, 10);
        assert_eq!(summary.average, 55.0);
        assert_eq!(summary.median, 55.0);
        assert_eq!(summary.percentile90, 91.0);
    }

    #[test]
    fn summary_keeps_cent_precision() {
        let amounts = money(&[25_075, 50_000, 100_050, 120_000]);
        let summary = Summary::from_sorted(&amounts);
        assert_eq!(summary.sum, 2951.25);
        assert_eq!(summary.average, 2951.25 / 4.0);
        assert_eq!(summary.count, 4);
        // position 1.5 -> (500.00 + 1000.50) / 2
        assert_eq!(summary.median, 750.25);
    }
}
