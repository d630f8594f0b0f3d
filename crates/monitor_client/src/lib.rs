//! Monitor client: wire decoding, push-channel plumbing and the HTTP API
//! surface for the crawl server.
mod api;
mod channel;
mod commands;
mod decode;
mod reports;
mod session;
mod wire;
mod worker;

pub use api::{ApiClient, ApiError, ApiSettings, AuthorizedClient, ReportFetcher};
pub use channel::{ChannelAdapter, ChannelError, Endpoint, NullTransport, Transport};
pub use commands::CrawlCommand;
pub use decode::{decode_event, DecodeError};
pub use reports::{ReportCache, ReportCatalog, ReportLookup};
pub use session::Session;
pub use wire::{CommandPayload, ErrorDetail, PushMessage, Report};
pub use worker::{ApiCommand, ApiEvent, ApiWorker};
