//! Form validation for the ERP portal.
//!
//! Forms are declared as a [`FormSchema`]: a list of [`FormField`]s, each with
//! an optional validator and visibility predicate, plus form-level
//! [`CrossFieldRule`]s. The [`FormValidationEngine`] evaluates a schema
//! against a [`FormState`]; hidden fields are inert and never block a
//! submission.
//!
//! [`Form`] is the stateful wrapper a page holds: it applies the conditional
//! reset when a controlling value changes, tracks touched fields and merges
//! backend validation errors into the same error map as client errors.
//!
//! Drafts are best-effort. A [`DraftStore`] keeps one opaque JSON blob per key
//! and [`DraftAutosaver`] debounces writes to it.
//!
//! # Example
//!
//! ```ignore
//! use erp_forms::{presets, Form, FormState};
//!
//! let mut form = Form::new(presets::personal_information(), FormState::new());
//! form.set_value("marital_status", "married")?;
//! form.set_value("spouse_name", "Jane")?;
//! let reset = form.set_value("marital_status", "single")?;
//! assert_eq!(reset, vec!["spouse_name".to_string()]);
//! ```

pub mod autosave;
pub mod draft;
pub mod engine;
pub mod error;
pub mod field;
pub mod form;
pub mod presets;
pub mod rules;
pub mod server_errors;
pub mod state;
pub mod validation;

pub use autosave::DraftAutosaver;
pub use draft::{Draft, DraftStore, FileDraftStore, MemoryDraftStore};
pub use engine::{FormReport, FormSchema, FormValidationEngine};
pub use error::{FormError, Result};
pub use field::{FormField, VisibilityRule};
pub use form::Form;
pub use rules::{digits_only, CrossFieldRule, RuleViolation};
pub use server_errors::ServerErrors;
pub use state::FormState;
pub use validation::{validators, ValidationResult, Validator};
