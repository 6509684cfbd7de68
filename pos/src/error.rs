//! Error types for the POS ledger.

use rust_decimal::Decimal;
use thiserror::Error;

/// POS error
#[derive(Debug, Error, PartialEq)]
pub enum PosError {
    /// Checkout attempted with no lines
    #[error("Cannot check out an empty cart")]
    EmptyCart,

    /// Tax rate below zero
    #[error("Invalid tax rate: {0}%")]
    InvalidTaxRate(Decimal),

    /// A money amount does not fit in a `Decimal`
    #[error("Amount out of range")]
    Overflow,

    /// Requested line quantity is above [`MAX_LINE_QUANTITY`]
    ///
    /// [`MAX_LINE_QUANTITY`]: crate::cart::MAX_LINE_QUANTITY
    #[error("Quantity {requested} exceeds the maximum of {max}")]
    QuantityTooLarge { requested: i64, max: u32 },
}

/// Result type for POS operations
pub type Result<T> = std::result::Result<T, PosError>;
