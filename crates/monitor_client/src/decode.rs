use monitor_core::{JobEvent, JobId, LifecycleEvent, LinkEvent, ProgressState};

use crate::wire::PushMessage;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("malformed payload: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("payload carries no job id")]
    MissingId,
    #[error("unknown progress state {0}")]
    UnknownProgressState(i64),
}

/// Parses one push payload into a typed event.
///
/// A non-empty `URL` selects the link variant; anything else is a
/// lifecycle/counter refresh and must carry a valid `ProgressState`.
/// Failures leave no trace in any store; the caller logs and drops.
pub fn decode_event(payload: &str) -> Result<JobEvent, DecodeError> {
    let raw: PushMessage = serde_json::from_str(payload)?;
    if raw.id <= 0 {
        return Err(DecodeError::MissingId);
    }
    let id = raw.id as JobId;

    if raw.url.is_empty() {
        let progress_state = ProgressState::from_code(raw.progress_state)
            .ok_or(DecodeError::UnknownProgressState(raw.progress_state))?;
        return Ok(JobEvent::Lifecycle(LifecycleEvent {
            id,
            progress_state,
            total_links: raw.total_links,
            total_errors: raw.total_errors,
            seed_urls: raw.urls,
        }));
    }

    Ok(JobEvent::Link(LinkEvent {
        id,
        url: raw.url,
        ok: raw.state == 1,
        http_status: raw.http_status,
        error_text: raw.error,
        parent_url: raw.parent_url,
        total_links: raw.total_links,
        total_errors: raw.total_errors,
    }))
}
