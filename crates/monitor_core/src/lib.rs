//! Monitor core: pure event reconciliation for crawl jobs.
mod changes;
mod event;
mod store;

pub use changes::{project, ChangeSet, FieldMask, Notification};
pub use event::{JobEvent, JobId, LifecycleEvent, LinkEvent, ProgressState};
pub use store::{ActivityEntry, ErrorEntry, JobStore, JobView, RECENT_ACTIVITY_CAP};
