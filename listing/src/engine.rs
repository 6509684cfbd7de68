//! Stable predicate filtering over record collections.

use std::collections::BTreeSet;

use crate::filter::FilterState;
use crate::record::Record;

/// Filters records against a [`FilterState`].
///
/// A record passes when the search needle is a case-insensitive substring of
/// at least one search field, and every active categorical constraint equals
/// the record's field exactly. A record missing a constrained field fails that
/// constraint; nothing here ever errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueryEngine {
    search_fields: Vec<String>,
}

impl ListQueryEngine {
    /// Create an engine searching the given fields.
    pub fn new<I, S>(search_fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            search_fields: search_fields.into_iter().map(Into::into).collect(),
        }
    }

    /// Create an engine using the record type's default search fields.
    pub fn for_record<R: Record>() -> Self {
        Self::new(R::SEARCH_FIELDS.iter().copied())
    }

    /// Fields the search term is matched against.
    pub fn search_fields(&self) -> &[String] {
        &self.search_fields
    }

    /// Whether a single record passes the filter.
    pub fn matches<R: Record>(&self, record: &R, filter: &FilterState) -> bool {
        self.matches_needle(record, filter.search_needle().as_deref(), filter)
    }

    /// Records passing the filter, in their original order.
    pub fn filter<'a, R: Record>(&self, records: &'a [R], filter: &FilterState) -> Vec<&'a R> {
        let needle = filter.search_needle();
        records
            .iter()
            .filter(|record| self.matches_needle(*record, needle.as_deref(), filter))
            .collect()
    }

    /// Indices of records passing the filter, ascending.
    pub fn filter_indices<R: Record>(&self, records: &[R], filter: &FilterState) -> Vec<usize> {
        let needle = filter.search_needle();
        records
            .iter()
            .enumerate()
            .filter(|(_, record)| self.matches_needle(*record, needle.as_deref(), filter))
            .map(|(index, _)| index)
            .collect()
    }

    fn matches_needle<R: Record>(
        &self,
        record: &R,
        needle: Option<&str>,
        filter: &FilterState,
    ) -> bool {
        if let Some(needle) = needle {
            let hit = self.search_fields.iter().any(|field| {
                record
                    .field(field)
                    .is_some_and(|text| text.to_lowercase().contains(needle))
            });
            if !hit {
                return false;
            }
        }

        filter
            .active_filters()
            .all(|(field, wanted)| record.field(field).is_some_and(|actual| actual == wanted))
    }
}

/// Sorted distinct values a field takes across `records`, for filter dropdowns.
pub fn distinct_values<R: Record>(records: &[R], field: &str) -> Vec<String> {
    records
        .iter()
        .filter_map(|record| record.field(field).map(|value| value.into_owned()))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}
