use std::collections::BTreeMap;
use std::collections::VecDeque;

use crate::changes::{ChangeSet, FieldMask};
use crate::event::{JobEvent, JobId, LifecycleEvent, LinkEvent, ProgressState};

/// Hard cap on the per-job recent-activity list, newest first.
pub const RECENT_ACTIVITY_CAP: usize = 10;

/// A single visited-link notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityEntry {
    pub url: String,
    pub is_error: bool,
}

/// One failed fetch, kept for the lifetime of the job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorEntry {
    pub url: String,
    pub http_status: u16,
    pub error_text: String,
    pub parent_url: String,
}

/// Live view of one running (or paused) crawl job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobView {
    pub id: JobId,
    pub progress_state: ProgressState,
    pub total_links: u64,
    pub total_errors: u64,
    /// Newest first, capped at [`RECENT_ACTIVITY_CAP`].
    pub recent_activity: VecDeque<ActivityEntry>,
    /// Append-only, unbounded. May be seeded from a server error listing.
    pub error_log: Vec<ErrorEntry>,
    pub seed_urls: Vec<String>,
}

impl JobView {
    fn new(id: JobId, progress_state: ProgressState) -> Self {
        Self {
            id,
            progress_state,
            total_links: 0,
            total_errors: 0,
            recent_activity: VecDeque::with_capacity(RECENT_ACTIVITY_CAP),
            error_log: Vec::new(),
            seed_urls: Vec::new(),
        }
    }

    fn push_activity(&mut self, entry: ActivityEntry) {
        self.recent_activity.push_front(entry);
        self.recent_activity.truncate(RECENT_ACTIVITY_CAP);
    }
}

/// The reconciliation engine: maps job ids to live views and merges each
/// decoded push event according to the rules below.
///
/// A view exists iff at least one event for its id has been applied and no
/// Stopped lifecycle event has arrived since. All mutation must come from
/// the single loop that drains the push channel; the store itself holds no
/// locks.
#[derive(Debug, Clone, Default)]
pub struct JobStore {
    jobs: BTreeMap<JobId, JobView>,
}

impl JobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: JobId) -> Option<&JobView> {
        self.jobs.get(&id)
    }

    pub fn contains(&self, id: JobId) -> bool {
        self.jobs.contains_key(&id)
    }

    /// Views in ascending id order.
    pub fn jobs(&self) -> impl Iterator<Item = &JobView> {
        self.jobs.values()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Merges one event into the store and reports what changed.
    pub fn apply(&mut self, event: JobEvent) -> ChangeSet {
        match event {
            JobEvent::Lifecycle(event) => self.apply_lifecycle(event),
            JobEvent::Link(event) => self.apply_link(event),
        }
    }

    fn apply_lifecycle(&mut self, event: LifecycleEvent) -> ChangeSet {
        let mut changes = ChangeSet::default();

        if event.progress_state == ProgressState::Stopped {
            // The job is now part of history: drop the whole view and let
            // the report layer pick it up. Idempotent if already gone.
            if self.jobs.remove(&event.id).is_some() {
                changes.removed = Some(event.id);
                changes.reports_stale = true;
            }
            return changes;
        }

        let view = self.jobs.entry(event.id).or_insert_with(|| {
            changes.created = Some(event.id);
            JobView::new(event.id, event.progress_state)
        });

        let mut fields = FieldMask::default();
        if view.progress_state != event.progress_state || changes.created.is_some() {
            view.progress_state = event.progress_state;
            fields.progress_state = true;
        }
        view.total_links = event.total_links;
        view.total_errors = event.total_errors;
        fields.counters = true;
        // The seed list is replaced wholesale, never merged; an empty list
        // on the wire means "unchanged".
        if !event.seed_urls.is_empty() {
            view.seed_urls = event.seed_urls;
            fields.seed_urls = true;
        }

        changes.updated = Some((event.id, fields));
        changes
    }

    fn apply_link(&mut self, event: LinkEvent) -> ChangeSet {
        let mut changes = ChangeSet::default();

        // A link outcome for an unknown or already-removed job is an
        // accepted race: the Stopped lifecycle event is authoritative and
        // the straggler is dropped without so much as a log line.
        let Some(view) = self.jobs.get_mut(&event.id) else {
            return changes;
        };

        view.total_links = event.total_links;
        view.total_errors = event.total_errors;
        let mut fields = FieldMask {
            counters: true,
            activity: true,
            ..FieldMask::default()
        };

        view.push_activity(ActivityEntry {
            url: event.url.clone(),
            is_error: !event.ok,
        });

        if !event.ok {
            view.error_log.push(ErrorEntry {
                url: event.url,
                http_status: event.http_status,
                error_text: event.error_text,
                parent_url: event.parent_url,
            });
            fields.error_log = true;
            changes.error_appended = Some(event.id);
        }

        changes.updated = Some((event.id, fields));
        changes
    }

    /// Merges a late-arriving per-job error listing into the view's error
    /// log. Entries for a job that no longer exists are dropped.
    pub fn seed_errors(&mut self, id: JobId, entries: Vec<ErrorEntry>) -> ChangeSet {
        let mut changes = ChangeSet::default();
        if entries.is_empty() {
            return changes;
        }
        let Some(view) = self.jobs.get_mut(&id) else {
            return changes;
        };
        view.error_log.extend(entries);
        changes.error_appended = Some(id);
        changes.updated = Some((
            id,
            FieldMask {
                error_log: true,
                ..FieldMask::default()
            },
        ));
        changes
    }
}
