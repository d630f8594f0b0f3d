use std::collections::HashMap;
use std::sync::Arc;

use crate::wire::Report;

enum Slot {
    InFlight,
    Ready(Arc<Report>),
}

/// Outcome of a cache lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLookup {
    /// Snapshot is cached; no request needed.
    Ready(Arc<Report>),
    /// Not cached yet. `fetch_needed` is true for exactly one caller per
    /// key: the one that should start the fetch.
    Pending { fetch_needed: bool },
}

/// Memoizes completed report fetches by report key.
///
/// Reports are historical snapshots and never change, so a populated slot
/// is immutable. Requests for a key already in flight coalesce onto the
/// pending fetch instead of starting another.
#[derive(Default)]
pub struct ReportCache {
    slots: HashMap<String, Slot>,
}

impl ReportCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &str) -> ReportLookup {
        match self.slots.get(key) {
            Some(Slot::Ready(report)) => ReportLookup::Ready(report.clone()),
            Some(Slot::InFlight) => ReportLookup::Pending {
                fetch_needed: false,
            },
            None => {
                self.slots.insert(key.to_string(), Slot::InFlight);
                ReportLookup::Pending { fetch_needed: true }
            }
        }
    }

    /// Populates the slot for `key`. A duplicate completion keeps the
    /// first value; reports never change once written.
    pub fn complete(&mut self, key: &str, report: Report) -> Arc<Report> {
        match self.slots.get(key) {
            Some(Slot::Ready(existing)) => existing.clone(),
            _ => {
                let report = Arc::new(report);
                self.slots
                    .insert(key.to_string(), Slot::Ready(report.clone()));
                report
            }
        }
    }

    /// Clears an in-flight slot after a failed fetch so that only a fresh
    /// user-initiated request retries. Populated slots are untouched.
    pub fn fail(&mut self, key: &str) {
        if let Some(Slot::InFlight) = self.slots.get(key) {
            self.slots.remove(key);
        }
    }

    pub fn is_ready(&self, key: &str) -> bool {
        matches!(self.slots.get(key), Some(Slot::Ready(_)))
    }
}

/// The server's listing of available report keys, replaced wholesale on
/// every refresh just like the seed-url list on a job view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportCatalog {
    keys: Vec<String>,
}

impl ReportCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, keys: Vec<String>) {
        self.keys = keys;
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}
