//! Point-of-sale cart ledger.
//!
//! The terminal keeps one [`CartLedger`] per in-progress sale. Lines are owned
//! by the ledger and only change through its operations; money values are
//! derived on demand from the lines, the discount and the tax rate, never
//! stored alongside them.
//!
//! All arithmetic is exact ([`rust_decimal::Decimal`]). Rounding to two places
//! happens only when a value is displayed ([`format_money`],
//! [`CartTotals::rounded`]) or leaves the terminal in a [`CheckoutPayload`].
//! Amounts that do not fit a `Decimal` surface as [`PosError::Overflow`].

pub mod cart;
pub mod checkout;
pub mod error;
pub mod percent;
pub mod totals;

pub use cart::{CartLedger, CartLine, Product, MAX_LINE_QUANTITY};
pub use checkout::{CheckoutLine, CheckoutPayload, Customer, PaymentMethod};
pub use error::{PosError, Result};
pub use percent::DiscountPercent;
pub use totals::{format_money, round_money, CartTotals};
