//! KPI cards over a full record collection.
//!
//! Stats are always computed against the complete collection, never the
//! filtered view, so headline numbers stay put while the user searches.

use serde::Serialize;
use std::fmt;

#[cfg(feature = "typescript")]
use ts_rs::TS;

/// How a spec turns its match count into a card value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatMeasure {
    /// Number of matching records
    Count,
    /// Matching records as a percentage of all records
    Percent,
    /// Count, with the share of all records as the change ratio
    CountWithShare,
}

type Predicate<R> = Box<dyn Fn(&R) -> bool + Send + Sync>;

/// One KPI definition: a title, a predicate and a measure.
pub struct StatSpec<R> {
    title: String,
    measure: StatMeasure,
    predicate: Predicate<R>,
}

impl<R: 'static> StatSpec<R> {
    /// Create a spec.
    pub fn new(
        title: impl Into<String>,
        measure: StatMeasure,
        predicate: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self {
            title: title.into(),
            measure,
            predicate: Box::new(predicate),
        }
    }

    /// Count records matching `predicate`.
    pub fn count(
        title: impl Into<String>,
        predicate: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(title, StatMeasure::Count, predicate)
    }

    /// Percentage of records matching `predicate`.
    pub fn percent(
        title: impl Into<String>,
        predicate: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(title, StatMeasure::Percent, predicate)
    }

    /// Count of records matching `predicate`, with their share attached.
    pub fn share(
        title: impl Into<String>,
        predicate: impl Fn(&R) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::new(title, StatMeasure::CountWithShare, predicate)
    }

    /// Total number of records.
    pub fn total(title: impl Into<String>) -> Self {
        Self::new(title, StatMeasure::Count, |_| true)
    }

    /// Card title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Which measure this spec reports.
    pub fn measure(&self) -> StatMeasure {
        self.measure
    }
}

impl<R> fmt::Debug for StatSpec<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StatSpec")
            .field("title", &self.title)
            .field("measure", &self.measure)
            .finish_non_exhaustive()
    }
}

/// A card's headline value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum StatValue {
    Count(usize),
    /// 0.0 to 100.0, unrounded
    Percent(f64),
}

impl fmt::Display for StatValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count(n) => write!(f, "{}", n),
            Self::Percent(p) => write!(f, "{}%", p.round() as i64),
        }
    }
}

/// A rendered KPI card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "typescript", derive(TS))]
#[cfg_attr(feature = "typescript", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct StatCard {
    pub title: String,
    pub value: StatValue,
    /// Share of the full collection, 0.0 to 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub change_ratio: Option<f64>,
}

/// Compute every spec's card over `records`, in spec order.
///
/// An empty collection yields `0` counts and `0%` ratios.
pub fn aggregate<R>(records: &[R], specs: &[StatSpec<R>]) -> Vec<StatCard> {
    let total = records.len();

    specs
        .iter()
        .map(|spec| {
            let matched = records.iter().filter(|r| (spec.predicate)(*r)).count();
            let ratio = share_of(matched, total);

            let (value, change_ratio) = match spec.measure {
                StatMeasure::Count => (StatValue::Count(matched), None),
                StatMeasure::Percent => (StatValue::Percent(ratio * 100.0), None),
                StatMeasure::CountWithShare => (StatValue::Count(matched), Some(ratio)),
            };

            StatCard {
                title: spec.title.clone(),
                value,
                change_ratio,
            }
        })
        .collect()
}

fn share_of(matched: usize, total: usize) -> f64 {
    if total == 0 {
        0.0
    } else {
        matched as f64 / total as f64
    }
}
