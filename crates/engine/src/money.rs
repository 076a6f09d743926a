use std::fmt;

use crate::EngineError;

/// Largest magnitude the `sales.amount` column accepts: ten digits, two of
/// them fractional (`99 999 999.99`).
const MAX_CENTS: i64 = 9_999_999_999;

/// Money amount represented as **integer cents**.
///
/// Entry amounts are fixed-point values with two fractional digits; keeping
/// them as cents avoids floating-point drift in sums and percentiles. Floats
/// only appear at the wire boundary ([`MoneyCents::from_major`] /
/// [`MoneyCents::to_major`]).
///
/// # Examples
///
/// ```rust
/// use engine::MoneyCents;
///
/// let amount = MoneyCents::new(12_34);
/// assert_eq!(amount.cents(), 1234);
/// assert_eq!(amount.to_string(), "12.34");
/// assert_eq!(MoneyCents::from_major(10.5).unwrap().cents(), 1050);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct MoneyCents(i64);

impl MoneyCents {
    pub const ZERO: MoneyCents = MoneyCents(0);

    /// Creates a new amount from integer cents.
    #[must_use]
    pub const fn new(cents: i64) -> Self {
        Self(cents)
    }

    /// Returns the raw value in cents.
    #[must_use]
    pub const fn cents(self) -> i64 {
        self.0
    }

    /// Returns `true` if the amount is positive.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        self.0 > 0
    }

    /// Converts a decimal amount (e.g. `10.5`) into cents.
    ///
    /// Values with more than two fractional digits are rounded to the nearest
    /// cent, half away from zero.
    pub fn from_major(value: f64) -> Result<Self, EngineError> {
        if !value.is_finite() {
            return Err(EngineError::InvalidAmount(
                "amount must be a finite number".to_string(),
            ));
        }
        let cents = (value * 100.0).round();
        if cents.abs() > MAX_CENTS as f64 {
            return Err(EngineError::InvalidAmount("amount too large".to_string()));
        }
        Ok(Self(cents as i64))
    }

    /// Returns the amount as a decimal number.
    #[must_use]
    pub fn to_major(self) -> f64 {
        self.0 as f64 / 100.0
    }
}

impl fmt::Display for MoneyCents {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        let abs = self.0.unsigned_abs();
        let units = abs / 100;
        let cents = abs % 100;
        write!(f, "{sign}{units}.{cents:02}")
    }
}
