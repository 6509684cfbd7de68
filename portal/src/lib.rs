//! ERP portal client.
//!
//! Connects the engines to the backend:
//!
//! - [`PortalClient`]: HTTP access for list endpoints, checkout and form
//!   updates
//! - [`ListFeed`]: a [`ListView`](erp_listing::ListView) kept current by
//!   sequenced fetches, so a slow stale response never overwrites a newer one
//! - [`submit_form`] and [`checkout`]: submission flows that keep user data on
//!   failure
//! - [`PortalConfig`]: YAML configuration for all of the above
//!
//! Nothing here retries. A failed fetch leaves the previous data in place and
//! a failed submission leaves the form or cart untouched; the user retries.

pub mod client;
pub mod config;
pub mod error;
pub mod feed;
pub mod submit;

pub use client::{CheckoutReceipt, PortalClient, CHECKOUT_ENDPOINT};
pub use config::{ApiConfig, FormsConfig, ListingConfig, PortalConfig, PosConfig};
pub use error::{PortalError, Result};
pub use feed::{ListFeed, RefreshOutcome};
pub use submit::{checkout, checkout_at_rate, submit_form, SubmitOutcome};
