//! The cart ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::checkout::{CheckoutLine, CheckoutPayload, Customer, PaymentMethod};
use crate::error::{PosError, Result};
use crate::percent::DiscountPercent;
use crate::totals::{round_money, CartTotals};

/// Largest quantity a single line may hold.
pub const MAX_LINE_QUANTITY: u32 = 10_000;

/// A sellable catalogue item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// One product entry in the cart. `quantity` is never zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: String,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// Unit price times quantity, or [`PosError::Overflow`].
    pub fn line_total(&self) -> Result<Decimal> {
        self.unit_price
            .checked_mul(Decimal::from(self.quantity))
            .ok_or(PosError::Overflow)
    }
}

/// An in-progress sale.
///
/// Operations naming a product that is not in the cart are silent no-ops:
/// double clicks on a line that was just removed are routine.
#[derive(Debug, Clone, Default)]
pub struct CartLedger {
    lines: Vec<CartLine>,
    discount: DiscountPercent,
    customer: Option<Customer>,
    payment_method: PaymentMethod,
    default_payment_method: PaymentMethod,
}

impl CartLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cart whose payment method starts at, and resets to, `method`.
    pub fn with_default_payment_method(method: PaymentMethod) -> Self {
        Self {
            payment_method: method,
            default_payment_method: method,
            ..Self::default()
        }
    }

    /// Add one unit of `product`, merging into its existing line.
    ///
    /// A line already at [`MAX_LINE_QUANTITY`] stays there.
    pub fn add_item(&mut self, product: &Product) {
        if let Some(line) = self.line_mut(&product.id) {
            if line.quantity >= MAX_LINE_QUANTITY {
                warn!(product_id = %product.id, "Cart line already at maximum quantity");
                return;
            }
            line.quantity += 1;
            debug!(product_id = %product.id, quantity = line.quantity, "Incremented cart line");
            return;
        }

        self.lines.push(CartLine {
            product_id: product.id.clone(),
            name: product.name.clone(),
            unit_price: product.price,
            quantity: 1,
        });
        debug!(product_id = %product.id, "Added cart line");
    }

    /// Set a line's quantity. Zero or less removes the line.
    ///
    /// Quantities above [`MAX_LINE_QUANTITY`] are rejected and leave the line
    /// unchanged.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) -> Result<()> {
        if quantity <= 0 {
            self.remove_item(product_id);
            return Ok(());
        }

        let quantity = u32::try_from(quantity)
            .ok()
            .filter(|q| *q <= MAX_LINE_QUANTITY)
            .ok_or(PosError::QuantityTooLarge {
                requested: quantity,
                max: MAX_LINE_QUANTITY,
            })?;
        match self.line_mut(product_id) {
            Some(line) => {
                line.quantity = quantity;
                debug!(product_id = %product_id, quantity, "Set cart line quantity");
            }
            None => debug!(product_id = %product_id, "Ignoring quantity change for absent line"),
        }
        Ok(())
    }

    /// Remove a line if present.
    pub fn remove_item(&mut self, product_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        if self.lines.len() != before {
            debug!(product_id = %product_id, "Removed cart line");
        }
    }

    /// Start over: no lines, no discount, no customer, default payment method.
    pub fn clear(&mut self) {
        *self = Self::with_default_payment_method(self.default_payment_method);
    }

    /// Set the discount; out-of-range input is clamped.
    pub fn set_discount(&mut self, percent: Decimal) -> DiscountPercent {
        self.discount = DiscountPercent::new(percent);
        self.discount
    }

    pub fn discount(&self) -> DiscountPercent {
        self.discount
    }

    pub fn select_customer(&mut self, customer: Option<Customer>) {
        self.customer = customer;
    }

    pub fn customer(&self) -> Option<&Customer> {
        self.customer.as_ref()
    }

    pub fn set_payment_method(&mut self, method: PaymentMethod) {
        self.payment_method = method;
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    /// The method a cleared cart returns to.
    pub fn default_payment_method(&self) -> PaymentMethod {
        self.default_payment_method
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.product_id == product_id)
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Sum of unit price times quantity.
    pub fn subtotal(&self) -> Result<Decimal> {
        self.lines.iter().try_fold(Decimal::ZERO, |sum, line| {
            sum.checked_add(line.line_total()?).ok_or(PosError::Overflow)
        })
    }

    /// Totals for an explicit discount and tax rate.
    pub fn compute_totals(
        &self,
        discount: DiscountPercent,
        tax_rate_percent: Decimal,
    ) -> Result<CartTotals> {
        CartTotals::from_subtotal(self.subtotal()?, discount.value(), tax_rate_percent)
    }

    /// Totals using the ledger's own discount.
    pub fn totals(&self, tax_rate_percent: Decimal) -> Result<CartTotals> {
        self.compute_totals(self.discount, tax_rate_percent)
    }

    /// Build the sale payload for the checkout endpoint.
    pub fn checkout_payload(&self, tax_rate_percent: Decimal) -> Result<CheckoutPayload> {
        if self.is_empty() {
            return Err(PosError::EmptyCart);
        }
        if tax_rate_percent < Decimal::ZERO {
            return Err(PosError::InvalidTaxRate(tax_rate_percent));
        }

        let totals = self.totals(tax_rate_percent)?.rounded();
        let cart = self
            .lines
            .iter()
            .map(|line| -> Result<CheckoutLine> {
                Ok(CheckoutLine {
                    product_id: line.product_id.clone(),
                    name: line.name.clone(),
                    unit_price: line.unit_price,
                    quantity: line.quantity,
                    line_total: round_money(line.line_total()?),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let payload = CheckoutPayload {
            sale_reference: uuid::Uuid::new_v4(),
            cart,
            customer: self.customer.clone(),
            subtotal: totals.subtotal,
            discount: totals.discount_amount,
            discount_percent: self.discount.value(),
            tax: totals.tax,
            total: totals.total,
            payment_method: self.payment_method,
        };

        info!(
            sale_reference = %payload.sale_reference,
            lines = payload.cart.len(),
            total = %payload.total,
            payment_method = payload.payment_method.as_str(),
            "Prepared checkout payload"
        );

        Ok(payload)
    }

    fn line_mut(&mut self, product_id: &str) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|line| line.product_id == product_id)
    }
}
