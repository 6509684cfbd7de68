//! Submission flows.

use erp_forms::Form;
use erp_pos::CartLedger;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use tracing::{info, warn};

use crate::client::{CheckoutReceipt, PortalClient};
use crate::config::PosConfig;
use crate::error::{PortalError, Result};

/// Result of a form submission that reached a verdict.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// The backend accepted the values
    Submitted(serde_json::Value),
    /// Client or server validation failed; the map is what the form shows
    Invalid(BTreeMap<String, String>),
}

/// Validate locally, then post the form's visible values.
///
/// Nothing is sent while client validation fails. Server field errors are
/// merged into the form. Any other failure is returned as an error and the
/// form's values are left exactly as they were.
pub async fn submit_form(
    client: &PortalClient,
    endpoint: &str,
    form: &mut Form,
) -> Result<SubmitOutcome> {
    let report = form.validate();
    if !report.is_valid {
        return Ok(SubmitOutcome::Invalid(report.errors));
    }

    form.clear_server_errors();
    match client.submit_form(endpoint, &form.values()).await {
        Ok(body) => {
            info!(endpoint = %endpoint, "Form submitted");
            Ok(SubmitOutcome::Submitted(body))
        }
        Err(PortalError::Validation(errors)) => {
            form.merge_server_errors(errors);
            Ok(SubmitOutcome::Invalid(form.errors()))
        }
        Err(e) => {
            warn!(endpoint = %endpoint, error = %e, "Form submission failed");
            Err(e)
        }
    }
}

/// Post the cart as a sale at the configured tax rate.
pub async fn checkout(
    client: &PortalClient,
    cart: &mut CartLedger,
    config: &PosConfig,
) -> Result<CheckoutReceipt> {
    checkout_at_rate(client, cart, config.tax_rate).await
}

/// Post the cart as a sale and clear it once the backend accepts.
///
/// On failure the cart is unchanged so the cashier can retry.
pub async fn checkout_at_rate(
    client: &PortalClient,
    cart: &mut CartLedger,
    tax_rate_percent: Decimal,
) -> Result<CheckoutReceipt> {
    let payload = cart.checkout_payload(tax_rate_percent)?;
    match client.submit_checkout(&payload).await {
        Ok(receipt) => {
            cart.clear();
            Ok(receipt)
        }
        Err(e) => {
            warn!(
                sale_reference = %payload.sale_reference,
                error = %e,
                "Checkout failed; cart kept"
            );
            Err(e)
        }
    }
}
