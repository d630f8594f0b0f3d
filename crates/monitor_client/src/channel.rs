use std::sync::mpsc;

use monitor_logging::monitor_warn;
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    #[error("channel closed")]
    Closed,
    #[error("transport failure: {0}")]
    Transport(String),
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
}

/// Identity of one push endpoint: base address, path segment and session
/// token, joined as `{base}/{path}/{token}`.
#[derive(Debug, Clone)]
pub struct Endpoint {
    base: String,
    path: String,
    token: String,
}

impl Endpoint {
    pub fn new(
        base: impl Into<String>,
        path: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        Self {
            base: base.into(),
            path: path.into(),
            token: token.into(),
        }
    }

    /// Full channel URL, validated.
    pub fn url(&self) -> Result<Url, ChannelError> {
        let joined = format!(
            "{}/{}/{}",
            self.base.trim_end_matches('/'),
            self.path.trim_matches('/'),
            self.token
        );
        Url::parse(&joined).map_err(|err| ChannelError::InvalidEndpoint(err.to_string()))
    }
}

/// Outbound half of an already-open, best-effort text channel. Connection
/// lifecycle, reconnects and backoff are the transport's problem, not ours.
pub trait Transport: Send {
    fn send(&mut self, payload: &str) -> Result<(), ChannelError>;
}

/// Wraps one push channel: text payloads out, text payloads in.
///
/// Inbound payloads must be drained by exactly one loop; that single
/// consumer is what gives the store its in-order, non-overlapping delivery
/// guarantee. If the transport closes, `recv` returns `None` and no
/// further events arrive for this session.
pub struct ChannelAdapter {
    outbound: Box<dyn Transport>,
    inbound: mpsc::Receiver<String>,
}

impl ChannelAdapter {
    pub fn new(outbound: Box<dyn Transport>, inbound: mpsc::Receiver<String>) -> Self {
        Self { outbound, inbound }
    }

    /// Fire-and-forget send. Transport failures are logged and swallowed;
    /// there is no buffering and no retry.
    pub fn send(&mut self, payload: &str) {
        if let Err(err) = self.outbound.send(payload) {
            monitor_warn!("channel send failed, payload dropped: {err}");
        }
    }

    /// Next inbound payload if one is waiting, in arrival order.
    pub fn try_recv(&self) -> Option<String> {
        self.inbound.try_recv().ok()
    }
}

/// Transport that drops everything, for sessions without a command channel.
pub struct NullTransport;

impl Transport for NullTransport {
    fn send(&mut self, _payload: &str) -> Result<(), ChannelError> {
        Err(ChannelError::Closed)
    }
}
