//! Derived money totals and display rounding.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{PosError, Result};

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// Decimal places for displayed money.
pub const MONEY_DP: u32 = 2;

/// Money totals for a cart. Unrounded unless produced by [`CartTotals::rounded`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub subtotal: Decimal,
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub discount_amount: Decimal,
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub tax: Decimal,
    #[cfg_attr(feature = "typescript", ts(type = "string"))]
    pub total: Decimal,
}

impl CartTotals {
    /// Apply the totals formula to a subtotal.
    ///
    /// `discount_percent` is expected to be clamped already; `tax_rate_percent`
    /// applies to the discounted amount. Percentages are scaled to fractions
    /// before multiplying, so only totals that do not fit a [`Decimal`]
    /// overflow.
    pub fn from_subtotal(
        subtotal: Decimal,
        discount_percent: Decimal,
        tax_rate_percent: Decimal,
    ) -> Result<Self> {
        let discount_amount = subtotal
            .checked_mul(discount_percent / Decimal::ONE_HUNDRED)
            .ok_or(PosError::Overflow)?;
        let taxable = subtotal
            .checked_sub(discount_amount)
            .ok_or(PosError::Overflow)?;
        let tax = taxable
            .checked_mul(tax_rate_percent / Decimal::ONE_HUNDRED)
            .ok_or(PosError::Overflow)?;
        let total = taxable.checked_add(tax).ok_or(PosError::Overflow)?;

        Ok(Self {
            subtotal,
            discount_amount,
            tax,
            total,
        })
    }

    /// Amount the tax applies to.
    pub fn taxable(&self) -> Decimal {
        self.subtotal - self.discount_amount
    }

    /// Every field rounded for display.
    pub fn rounded(&self) -> Self {
        Self {
            subtotal: round_money(self.subtotal),
            discount_amount: round_money(self.discount_amount),
            tax: round_money(self.tax),
            total: round_money(self.total),
        }
    }
}

/// Round to two places, halves away from zero.
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_DP, RoundingStrategy::MidpointAwayFromZero)
}

/// Render a money value with exactly two places, e.g. `"11.91"` or `"12.00"`.
pub fn format_money(value: Decimal) -> String {
    let mut rounded = round_money(value);
    rounded.rescale(MONEY_DP);
    rounded.to_string()
}
