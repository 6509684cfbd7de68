//! Discount percentage, clamped where it enters the system.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A discount between 0 and 100 percent inclusive.
///
/// Out-of-range input is clamped on construction, so the totals formula never
/// has to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "Decimal", into = "Decimal")]
pub struct DiscountPercent(Decimal);

impl DiscountPercent {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Clamp `percent` into `[0, 100]`.
    pub fn new(percent: Decimal) -> Self {
        Self(percent.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The discount as a fraction of one.
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }
}

impl From<Decimal> for DiscountPercent {
    fn from(percent: Decimal) -> Self {
        Self::new(percent)
    }
}

impl From<DiscountPercent> for Decimal {
    fn from(percent: DiscountPercent) -> Self {
        percent.0
    }
}

impl fmt::Display for DiscountPercent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
