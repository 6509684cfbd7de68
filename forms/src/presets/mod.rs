//! Schemas for the portal's standard forms.

mod daily_work;
mod emergency;
mod personal;

pub use daily_work::daily_work;
pub use emergency::emergency_contact;
pub use personal::{personal_information, MARITAL_STATUSES};
