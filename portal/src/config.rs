//! Portal configuration.

use erp_forms::{DraftAutosaver, DraftStore};
use erp_listing::{ListView, Page, Record};
use erp_pos::{format_money, CartLedger, PaymentMethod};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

/// Configuration for a portal client session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Backend connection
    pub api: ApiConfig,
    /// Point-of-sale defaults
    pub pos: PosConfig,
    /// Listing defaults
    pub listing: ListingConfig,
    /// Form drafts
    pub forms: FormsConfig,
}

impl PortalConfig {
    /// Load config from YAML. Missing sections and keys take their defaults.
    pub fn from_yaml(yaml: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    /// Serialize to YAML.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}

/// Backend connection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Base URL all endpoints are joined to
    pub base_url: String,
    /// Optional bearer token
    pub api_key: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000/api".to_string(),
            api_key: None,
            timeout_secs: 30,
        }
    }
}

/// Point-of-sale defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PosConfig {
    /// Tax rate in percent applied to the discounted subtotal
    pub tax_rate: Decimal,
    /// ISO currency code for display
    pub currency: String,
    pub default_payment_method: PaymentMethod,
}

impl Default for PosConfig {
    fn default() -> Self {
        Self {
            tax_rate: Decimal::from(8),
            currency: "INR".to_string(),
            default_payment_method: PaymentMethod::Cash,
        }
    }
}

impl PosConfig {
    /// A fresh cart that starts at, and clears back to, the configured
    /// payment method.
    pub fn cart(&self) -> CartLedger {
        CartLedger::with_default_payment_method(self.default_payment_method)
    }

    /// Amount with its currency code, e.g. `INR 11.91`.
    pub fn display_money(&self, amount: Decimal) -> String {
        format!("{} {}", self.currency, format_money(amount))
    }
}

/// Listing defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListingConfig {
    /// Rows per table page
    pub page_size: usize,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

impl ListingConfig {
    /// One page of the view's filtered records at the configured page size.
    pub fn page<'a, R>(&self, view: &'a mut ListView<R>, page: usize) -> Page<&'a R>
    where
        R: Record + 'static,
    {
        view.page(page, self.page_size)
    }
}

/// Form draft settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormsConfig {
    /// Quiet period before a draft is written (milliseconds)
    pub autosave_delay_ms: u64,
    /// Prefix for draft keys
    pub draft_key_prefix: String,
}

impl Default for FormsConfig {
    fn default() -> Self {
        Self {
            autosave_delay_ms: 1500,
            draft_key_prefix: "erp-draft".to_string(),
        }
    }
}

impl FormsConfig {
    pub fn autosave_delay(&self) -> Duration {
        Duration::from_millis(self.autosave_delay_ms)
    }

    /// Draft key for one form instance, e.g. `erp-draft:personal:emp-7`.
    pub fn draft_key(&self, form: &str, record_id: &str) -> String {
        format!("{}:{}:{}", self.draft_key_prefix, form, record_id)
    }

    /// Autosaver for one form instance using the configured key and delay.
    pub fn autosaver(
        &self,
        store: Arc<dyn DraftStore>,
        form: &str,
        record_id: &str,
    ) -> DraftAutosaver {
        DraftAutosaver::new(store, self.draft_key(form, record_id), self.autosave_delay())
    }
}
