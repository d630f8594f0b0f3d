use std::collections::BTreeMap;
use std::sync::{mpsc, Arc};
use std::thread;

use monitor_core::JobId;

use crate::api::{ApiError, ReportFetcher};
use crate::wire::{ErrorDetail, Report};

/// One-shot fetch request for the background worker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCommand {
    ListReports,
    FetchReport { key: String },
    FetchJobErrors { id: JobId },
}

/// Completion of a background fetch, delivered to the session loop.
#[derive(Debug)]
pub enum ApiEvent {
    ReportsListed {
        result: Result<Vec<String>, ApiError>,
    },
    ReportFetched {
        key: String,
        result: Result<Report, ApiError>,
    },
    JobErrorsFetched {
        id: JobId,
        result: Result<BTreeMap<String, ErrorDetail>, ApiError>,
    },
}

/// Runs report and error-listing fetches on a dedicated thread with its
/// own tokio runtime. Fetches may overlap each other but their results
/// are consumed by the one session loop, which keeps all store mutation
/// single-threaded.
pub struct ApiWorker {
    cmd_tx: mpsc::Sender<ApiCommand>,
    event_rx: mpsc::Receiver<ApiEvent>,
}

impl ApiWorker {
    pub fn new(fetcher: Arc<dyn ReportFetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel::<ApiCommand>();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    monitor_logging::monitor_error!("api worker runtime failed: {err}");
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let _ = event_tx.send(run_command(fetcher.as_ref(), command).await);
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    /// Queues a fetch; dropped silently if the worker thread has exited.
    pub fn submit(&self, command: ApiCommand) {
        let _ = self.cmd_tx.send(command);
    }

    pub fn try_recv(&self) -> Option<ApiEvent> {
        self.event_rx.try_recv().ok()
    }
}

async fn run_command(fetcher: &dyn ReportFetcher, command: ApiCommand) -> ApiEvent {
    match command {
        ApiCommand::ListReports => ApiEvent::ReportsListed {
            result: fetcher.list_reports().await,
        },
        ApiCommand::FetchReport { key } => {
            let result = fetcher.fetch_report(&key).await;
            ApiEvent::ReportFetched { key, result }
        }
        ApiCommand::FetchJobErrors { id } => {
            let result = fetcher.fetch_job_errors(id).await;
            ApiEvent::JobErrorsFetched { id, result }
        }
    }
}
