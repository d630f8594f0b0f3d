/// Server-assigned crawl job identifier. Always positive.
pub type JobId = u64;

/// Lifecycle phase of a crawl job, as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressState {
    Stopped = 1,
    InProgress = 2,
    Paused = 3,
}

impl ProgressState {
    /// Maps the wire integer to a state. Any other value is malformed.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(ProgressState::Stopped),
            2 => Some(ProgressState::InProgress),
            3 => Some(ProgressState::Paused),
            _ => None,
        }
    }

    /// Human-readable label, matching the server's terminology.
    pub fn label(self) -> &'static str {
        match self {
            ProgressState::Stopped => "Stopped",
            ProgressState::InProgress => "In progress",
            ProgressState::Paused => "Paused",
        }
    }
}

/// One decoded push event. A non-empty link URL is the sole discriminator:
/// payloads without one are lifecycle/counter refreshes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobEvent {
    Lifecycle(LifecycleEvent),
    Link(LinkEvent),
}

impl JobEvent {
    pub fn job_id(&self) -> JobId {
        match self {
            JobEvent::Lifecycle(event) => event.id,
            JobEvent::Link(event) => event.id,
        }
    }
}

/// Job state change or counter refresh. `seed_urls` is empty unless the
/// server included the seed list in this payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifecycleEvent {
    pub id: JobId,
    pub progress_state: ProgressState,
    pub total_links: u64,
    pub total_errors: u64,
    pub seed_urls: Vec<String>,
}

/// Outcome of one visited link. `http_status`, `error_text` and
/// `parent_url` are only meaningful when `ok` is false.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkEvent {
    pub id: JobId,
    pub url: String,
    pub ok: bool,
    pub http_status: u16,
    pub error_text: String,
    pub parent_url: String,
    pub total_links: u64,
    pub total_errors: u64,
}
