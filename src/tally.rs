use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::BookId;

#[derive(Debug, Default, Clone)]
struct Entry {
    submitted: u32,
    observed: Option<(usize, Instant)>,
}

/// Per-book review counts kept on the client.
///
/// `submitted` counts the reviews this session sent successfully and only
/// ever grows. `observed` is the last comment count read back from the
/// store; it goes stale after `max_age` and should be refreshed from the
/// store rather than trusted.
#[derive(Debug, Clone)]
pub struct ReviewTally {
    entries: HashMap<BookId, Entry>,
    max_age: Duration,
}

impl ReviewTally {
    pub fn new(max_age: Duration) -> ReviewTally {
        ReviewTally {
            entries: HashMap::new(),
            max_age,
        }
    }

    /// Adds a zeroed entry for every id not seen yet. Known ids keep their counts.
    pub fn seed<'a>(&mut self, ids: impl IntoIterator<Item = &'a BookId>) {
        for id in ids {
            self.entries.entry(id.clone()).or_default();
        }
    }

    pub fn record_submitted(&mut self, id: &BookId) -> u32 {
        let entry = self.entries.entry(id.clone()).or_default();
        entry.submitted += 1;
        entry.submitted
    }

    pub fn submitted(&self, id: &BookId) -> u32 {
        self.entries.get(id).map_or(0, |e| e.submitted)
    }

    pub fn contains(&self, id: &BookId) -> bool {
        self.entries.contains_key(id)
    }

    pub fn observe(&mut self, id: &BookId, count: usize) {
        self.observe_at(id, count, Instant::now());
    }

    pub fn observe_at(&mut self, id: &BookId, count: usize, at: Instant) {
        self.entries.entry(id.clone()).or_default().observed = Some((count, at));
    }

    /// Last count read from the store, if it is still fresh.
    pub fn observed(&self, id: &BookId) -> Option<usize> {
        if self.is_stale(id) {
            return None;
        }
        self.entries.get(id).and_then(|e| e.observed.map(|(n, _)| n))
    }

    pub fn is_stale(&self, id: &BookId) -> bool {
        self.is_stale_at(id, Instant::now())
    }

    pub fn is_stale_at(&self, id: &BookId, now: Instant) -> bool {
        match self.entries.get(id).and_then(|e| e.observed) {
            Some((_, at)) => now.saturating_duration_since(at) >= self.max_age,
            None => true,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
