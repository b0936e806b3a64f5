use std::sync::Arc;

use cinesync_core::constants::MAX_QUERY_LIMIT;
use cinesync_core::{
    counter_fields, Fields, MovieSnapshot, Order, Predicate, Query, SearchCounter, Settings,
};
use cinesync_storage::RemoteStore;
use serde_json::Value;

use crate::ServiceError;

/// Result of a trending read.
///
/// A failed read still yields a report: `counters` is empty and `failure`
/// says why, so "nothing trending" and "could not read" can be told apart
/// when a caller cares to.
#[derive(Debug, Default)]
pub struct TrendingReport {
    pub counters: Vec<SearchCounter>,
    pub failure: Option<ServiceError>,
    /// Rows that were returned but could not be decoded.
    pub skipped: usize,
}

impl TrendingReport {
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        self.failure.is_some() || self.skipped > 0
    }
}

/// One counter per distinct search term, plus a top-N read.
///
/// Searches are not auth-gated: the counters are a global popularity signal.
pub struct SearchPopularityTracker {
    store: Arc<dyn RemoteStore>,
    collection: String,
    default_limit: usize,
}

impl SearchPopularityTracker {
    #[must_use]
    pub fn new(store: Arc<dyn RemoteStore>, settings: &Settings) -> Self {
        Self {
            store,
            collection: settings.search_collection.clone(),
            default_limit: settings.trending_limit,
        }
    }

    /// Increment the counter for `term`, creating it on first sight.
    ///
    /// `term` is used as given; trimming and case folding are the caller's
    /// job. The read-then-write is not atomic, so concurrent searches for the
    /// same term can under-count.
    pub async fn record_search(
        &self,
        term: &str,
        movie: &MovieSnapshot,
    ) -> Result<SearchCounter, ServiceError> {
        if term.trim().is_empty() {
            return Err(ServiceError::InvalidInput("search term is empty".to_owned()));
        }

        let query = Query::new().filter(Predicate::eq(counter_fields::SEARCH_TERM, term)).limit(1);
        let existing = self.store.query(&self.collection, &query).await?;

        let counter = if let Some(doc) = existing.first() {
            let current = SearchCounter::from_document(doc)?;
            let mut patch = Fields::new();
            patch.insert(counter_fields::COUNT.to_owned(), Value::from(current.count.saturating_add(1)));
            let updated = self.store.update(&self.collection, &doc.id, patch).await?;
            SearchCounter::from_document(&updated)?
        } else {
            let fields = SearchCounter::first_search(term, movie).to_fields()?;
            let created = self.store.create(&self.collection, fields).await?;
            SearchCounter::from_document(&created)?
        };

        tracing::debug!(term, count = counter.count, "search recorded");
        Ok(counter)
    }

    /// Top `limit` counters by count, highest first.
    ///
    /// Never fails: a store error is logged and reported in
    /// [`TrendingReport::failure`] with no counters. A limit of zero reads
    /// nothing.
    pub async fn get_trending(&self, limit: usize) -> TrendingReport {
        if limit == 0 {
            return TrendingReport::default();
        }

        let query = Query::new()
            .order_by(Order::desc(counter_fields::COUNT))
            .limit(limit.min(MAX_QUERY_LIMIT));
        let docs = match self.store.query(&self.collection, &query).await {
            Ok(docs) => docs,
            Err(e) => {
                tracing::warn!(error = %e, "trending read failed, returning empty list");
                return TrendingReport { failure: Some(e.into()), ..TrendingReport::default() };
            },
        };

        let mut report = TrendingReport::default();
        for doc in &docs {
            match SearchCounter::from_document(doc) {
                Ok(counter) => report.counters.push(counter),
                Err(e) => {
                    tracing::warn!(id = %doc.id, error = %e, "skipping malformed search counter");
                    report.skipped = report.skipped.saturating_add(1);
                },
            }
        }
        report
    }

    /// [`get_trending`](Self::get_trending) with the configured default size.
    pub async fn trending(&self) -> TrendingReport {
        self.get_trending(self.default_limit).await
    }
}
