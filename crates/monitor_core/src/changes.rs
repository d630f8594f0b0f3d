use crate::JobId;

/// Which parts of a job view an update touched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldMask {
    pub progress_state: bool,
    pub counters: bool,
    pub seed_urls: bool,
    pub activity: bool,
    pub error_log: bool,
}

impl FieldMask {
    pub fn is_empty(&self) -> bool {
        !(self.progress_state
            || self.counters
            || self.seed_urls
            || self.activity
            || self.error_log)
    }
}

/// Effects of a single `JobStore::apply` call. At most one creation, one
/// update, one error append and one removal can result from one event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangeSet {
    pub created: Option<JobId>,
    pub updated: Option<(JobId, FieldMask)>,
    pub error_appended: Option<JobId>,
    pub removed: Option<JobId>,
    /// A job transitioned to Stopped, so the historical report listing
    /// has grown and should be refreshed.
    pub reports_stale: bool,
}

impl ChangeSet {
    pub fn is_empty(&self) -> bool {
        self.created.is_none()
            && self.updated.is_none()
            && self.error_appended.is_none()
            && self.removed.is_none()
            && !self.reports_stale
    }
}

/// One discrete change for the presentation layer to apply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notification {
    JobCreated { id: JobId },
    JobUpdated { id: JobId, fields: FieldMask },
    ErrorAppended { id: JobId },
    JobRemoved { id: JobId },
    /// The set of completed historical reports changed.
    ReportsStale,
}

/// Pure projection of a change set into ordered notifications.
///
/// Creation precedes the update that filled the new view in; a removal and
/// the reports refresh it implies always come last.
pub fn project(changes: &ChangeSet) -> Vec<Notification> {
    let mut notifications = Vec::new();
    if let Some(id) = changes.created {
        notifications.push(Notification::JobCreated { id });
    }
    if let Some((id, fields)) = changes.updated {
        notifications.push(Notification::JobUpdated { id, fields });
    }
    if let Some(id) = changes.error_appended {
        notifications.push(Notification::ErrorAppended { id });
    }
    if let Some(id) = changes.removed {
        notifications.push(Notification::JobRemoved { id });
    }
    if changes.reports_stale {
        notifications.push(Notification::ReportsStale);
    }
    notifications
}
