//! Memoized list view.
//!
//! [`ListView`] is the single owner of one listing's collection and filter
//! state. Derived data is cached against the identity of its inputs: the
//! filtered view against (collection revision, filter state), the KPI cards
//! against the collection revision alone. Changing the filter therefore never
//! recomputes stats, and nothing is recomputed twice for the same inputs.

use tracing::debug;

use crate::engine::ListQueryEngine;
use crate::filter::FilterState;
use crate::page::{paginate, Page};
use crate::record::Record;
use crate::stats::{aggregate, StatCard, StatSpec};

#[derive(Debug, Default)]
struct FilterCache {
    revision: Option<u64>,
    filter: FilterState,
    indices: Vec<usize>,
}

#[derive(Debug, Default)]
struct StatsCache {
    revision: Option<u64>,
    cards: Vec<StatCard>,
}

/// A list page's records, filter and derived views.
#[derive(Debug)]
pub struct ListView<R> {
    engine: ListQueryEngine,
    specs: Vec<StatSpec<R>>,
    records: Vec<R>,
    revision: u64,
    filter: FilterState,
    filtered: FilterCache,
    stats: StatsCache,
}

impl<R: Record + 'static> ListView<R> {
    /// Create an empty view using the record type's default search fields.
    pub fn new(specs: Vec<StatSpec<R>>) -> Self {
        Self::with_engine(ListQueryEngine::for_record::<R>(), specs)
    }

    /// Create an empty view with an explicit engine.
    pub fn with_engine(engine: ListQueryEngine, specs: Vec<StatSpec<R>>) -> Self {
        Self {
            engine,
            specs,
            records: Vec::new(),
            revision: 0,
            filter: FilterState::default(),
            filtered: FilterCache::default(),
            stats: StatsCache::default(),
        }
    }

    /// Seed the view with an initial collection.
    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.replace_records(records);
        self
    }

    /// Replace the full collection. Both caches become stale.
    pub fn replace_records(&mut self, records: Vec<R>) {
        self.revision += 1;
        debug!(revision = self.revision, count = records.len(), "Replacing list records");
        self.records = records;
    }

    /// The full, unfiltered collection.
    pub fn records(&self) -> &[R] {
        &self.records
    }

    /// Bumped on every collection replacement.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter
    }

    /// Replace the filter state.
    pub fn set_filter_state(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    /// Edit the filter state in place.
    pub fn update_filter(&mut self, update: impl FnOnce(&mut FilterState)) {
        update(&mut self.filter);
    }

    /// Records passing the current filter, in collection order.
    pub fn visible(&mut self) -> Vec<&R> {
        self.refresh_filtered();
        let records = &self.records;
        self.filtered.indices.iter().map(|&i| &records[i]).collect()
    }

    /// Number of records passing the current filter.
    pub fn visible_count(&mut self) -> usize {
        self.refresh_filtered();
        self.filtered.indices.len()
    }

    /// One page of the filtered view.
    pub fn page(&mut self, page: usize, page_size: usize) -> Page<&R> {
        let visible = self.visible();
        paginate(&visible, page, page_size)
    }

    /// KPI cards over the full collection.
    pub fn stats(&mut self) -> &[StatCard] {
        if self.stats.revision != Some(self.revision) {
            self.stats.cards = aggregate(&self.records, &self.specs);
            self.stats.revision = Some(self.revision);
        }
        &self.stats.cards
    }

    fn refresh_filtered(&mut self) {
        let fresh =
            self.filtered.revision == Some(self.revision) && self.filtered.filter == self.filter;
        if fresh {
            return;
        }

        self.filtered.indices = self.engine.filter_indices(&self.records, &self.filter);
        self.filtered.revision = Some(self.revision);
        self.filtered.filter = self.filter.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Issue;
    use crate::stats::StatValue;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    fn issue(id: &str, title: &str, status: &str) -> Issue {
        Issue {
            id: id.to_string(),
            title: title.to_string(),
            description: None,
            status: status.to_string(),
            priority: None,
            assignee: None,
            project: None,
            reported_on: None,
        }
    }

    fn counting_view(calls: Arc<AtomicUsize>) -> ListView<Issue> {
        let specs = vec![
            StatSpec::total("Total Issues"),
            StatSpec::count("Open", move |i: &Issue| {
                calls.fetch_add(1, Ordering::SeqCst);
                i.status == "open"
            }),
        ];
        ListView::new(specs).with_records(vec![
            issue("1", "Leak", "open"),
            issue("2", "Leak2", "closed"),
            issue("3", "Crack", "open"),
        ])
    }

    #[test]
    fn test_stats_ignore_filter_changes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut view = counting_view(Arc::clone(&calls));

        let before = view.stats().to_vec();
        view.update_filter(|f| f.set_search("leak"));
        assert_eq!(view.visible_count(), 2);
        view.update_filter(|f| f.set_filter("status", "closed"));
        assert_eq!(view.visible_count(), 1);
        let after = view.stats().to_vec();

        assert_eq!(before, after);
        assert_eq!(after[1].value, StatValue::Count(2));
        // One predicate call per record, once.
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_replacing_records_recomputes() {
        let calls = Arc::new(AtomicUsize::new(0));
        let mut view = counting_view(Arc::clone(&calls));
        view.stats();

        view.replace_records(vec![issue("9", "New", "open")]);
        assert_eq!(view.stats()[0].value, StatValue::Count(1));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
        assert_eq!(view.revision(), 2);
    }

    #[test]
    fn test_visible_follows_filter() {
        let mut view = counting_view(Arc::new(AtomicUsize::new(0)));
        view.set_filter_state(FilterState::new().with_search("leak").with_filter("status", "open"));

        let ids: Vec<_> = view.visible().iter().map(|i| i.id.clone()).collect();
        assert_eq!(ids, vec!["1"]);

        view.update_filter(FilterState::reset);
        assert_eq!(view.visible_count(), 3);
    }

    #[test]
    fn test_paged_view() {
        let mut view = counting_view(Arc::new(AtomicUsize::new(0)));
        let page = view.page(2, 2);
        assert_eq!(page.total_items, 3);
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].id, "3");
    }
}
