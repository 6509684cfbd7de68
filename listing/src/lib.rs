//! List view engine for the ERP portal.
//!
//! Every listing page (issues, tasks, projects, holidays, tenants) follows the
//! same pattern: a full record collection arrives from the backend, the user
//! narrows it with a search box and a handful of dropdowns, and a row of KPI
//! cards summarises the whole collection.
//!
//! - [`ListQueryEngine`]: stable predicate filtering over any [`Record`]
//! - [`aggregate`]: KPI cards computed from [`StatSpec`]s over the full set
//! - [`paginate`]: page slicing for data tables
//! - [`ListView`]: owns a collection plus its [`FilterState`] and memoizes both
//!   derivations
//! - [`RequestSequencer`]: tags list fetches so only the newest response lands
//!
//! # Example
//!
//! ```ignore
//! use erp_listing::{FilterState, Issue, ListQueryEngine};
//!
//! let engine = ListQueryEngine::for_record::<Issue>();
//! let filter = FilterState::default()
//!     .with_search("leak")
//!     .with_filter("status", "open");
//! let visible = engine.filter(&issues, &filter);
//! ```

pub mod engine;
pub mod error;
pub mod filter;
pub mod page;
pub mod record;
pub mod sequence;
pub mod stats;
pub mod view;

pub use engine::{distinct_values, ListQueryEngine};
pub use error::{ListingError, Result};
pub use filter::{FilterState, ALL};
pub use page::{paginate, Page};
pub use record::{
    decode_records, Decoded, Holiday, Issue, JsonRecord, Project, Record, Task, Tenant,
};
pub use sequence::{RequestSequencer, Ticket};
pub use stats::{aggregate, StatCard, StatMeasure, StatSpec, StatValue};
pub use view::ListView;
