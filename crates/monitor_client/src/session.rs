use std::collections::BTreeMap;
use std::sync::Arc;

use monitor_core::{project, ErrorEntry, JobId, JobStore, Notification};
use monitor_logging::{monitor_debug, monitor_error, monitor_warn};

use crate::api::ApiError;
use crate::channel::ChannelAdapter;
use crate::commands::CrawlCommand;
use crate::decode::decode_event;
use crate::reports::{ReportCache, ReportCatalog, ReportLookup};
use crate::wire::{ErrorDetail, Report};

/// One monitoring session: the job store, the report cache and the command
/// channel, owned together so no state lives in ambient globals.
///
/// Everything here must be driven from the single loop that drains the
/// push channel; see [`ChannelAdapter`] for the delivery contract.
pub struct Session {
    store: JobStore,
    cache: ReportCache,
    catalog: ReportCatalog,
    commands: ChannelAdapter,
}

impl Session {
    pub fn new(commands: ChannelAdapter) -> Self {
        Self {
            store: JobStore::new(),
            cache: ReportCache::new(),
            catalog: ReportCatalog::new(),
            commands,
        }
    }

    pub fn store(&self) -> &JobStore {
        &self.store
    }

    pub fn catalog(&self) -> &ReportCatalog {
        &self.catalog
    }

    /// Decodes and reconciles one push payload. Malformed payloads are
    /// logged and dropped without touching any job view.
    pub fn handle_payload(&mut self, payload: &str) -> Vec<Notification> {
        match decode_event(payload) {
            Ok(event) => {
                monitor_debug!("applying event for job {}", event.job_id());
                let changes = self.store.apply(event);
                project(&changes)
            }
            Err(err) => {
                monitor_warn!("dropping push payload: {err}");
                Vec::new()
            }
        }
    }

    /// Encodes and ships a crawl command, best effort.
    pub fn send(&mut self, command: &CrawlCommand) {
        match command.encode() {
            Ok(payload) => self.commands.send(&payload),
            Err(err) => monitor_error!("command not sent: {err}"),
        }
    }

    /// User picked a report. `Pending { fetch_needed: true }` means the
    /// caller must start exactly one fetch for this key.
    pub fn select_report(&mut self, key: &str) -> ReportLookup {
        self.cache.get(key)
    }

    /// Feeds a finished report fetch back in. Failures leave the slot
    /// unpopulated so a later selection can retry.
    pub fn report_loaded(
        &mut self,
        key: &str,
        result: Result<Report, ApiError>,
    ) -> Option<Arc<Report>> {
        match result {
            Ok(report) => Some(self.cache.complete(key, report)),
            Err(err) => {
                monitor_warn!("report {key} fetch failed: {err}");
                self.cache.fail(key);
                None
            }
        }
    }

    /// Replaces the report-key listing after a refresh.
    pub fn reports_listed(&mut self, result: Result<Vec<String>, ApiError>) {
        match result {
            Ok(keys) => self.catalog.replace(keys),
            Err(err) => monitor_warn!("report listing failed: {err}"),
        }
    }

    /// Merges a per-job error listing fetched when the job first appeared.
    /// A listing for a job that stopped in the meantime is dropped.
    pub fn seed_job_errors(
        &mut self,
        id: JobId,
        result: Result<BTreeMap<String, ErrorDetail>, ApiError>,
    ) -> Vec<Notification> {
        let listing = match result {
            Ok(listing) => listing,
            Err(err) => {
                monitor_warn!("error listing for job {id} failed: {err}");
                return Vec::new();
            }
        };
        let entries = listing
            .into_iter()
            .map(|(url, detail)| ErrorEntry {
                url,
                http_status: detail.http_status,
                error_text: detail.error,
                parent_url: detail.parent_url,
            })
            .collect();
        project(&self.store.seed_errors(id, entries))
    }
}
