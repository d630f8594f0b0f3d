use std::collections::BTreeMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};
use std::time::{Duration, Instant};

use monitor_client::{
    ApiCommand, ApiError, ApiEvent, ApiWorker, ErrorDetail, Report, ReportFetcher,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(monitor_logging::initialize_for_tests);
}

struct FakeFetcher {
    report_calls: AtomicUsize,
}

impl FakeFetcher {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            report_calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait::async_trait]
impl ReportFetcher for FakeFetcher {
    async fn list_reports(&self) -> Result<Vec<String>, ApiError> {
        Ok(vec!["2024-05-01 10:00:00".to_string()])
    }

    async fn fetch_report(&self, key: &str) -> Result<Report, ApiError> {
        self.report_calls.fetch_add(1, Ordering::SeqCst);
        if key == "missing" {
            return Err(ApiError::Status(404));
        }
        Ok(serde_json::from_value(serde_json::json!({
            "TotalLinks": 3,
            "Errors": {},
            "URLs": ["http://a"],
        }))
        .unwrap())
    }

    async fn fetch_job_errors(
        &self,
        _id: u64,
    ) -> Result<BTreeMap<String, ErrorDetail>, ApiError> {
        Ok(BTreeMap::new())
    }
}

fn wait_for_event(worker: &ApiWorker) -> ApiEvent {
    let deadline = Instant::now() + Duration::from_secs(5);
    loop {
        if let Some(event) = worker.try_recv() {
            return event;
        }
        assert!(Instant::now() < deadline, "worker produced no event");
        std::thread::sleep(Duration::from_millis(10));
    }
}

#[test]
fn listing_and_report_fetches_complete_off_thread() {
    init_logging();
    let fetcher = FakeFetcher::new();
    let worker = ApiWorker::new(fetcher.clone());

    worker.submit(ApiCommand::ListReports);
    match wait_for_event(&worker) {
        ApiEvent::ReportsListed { result } => {
            assert_eq!(result.unwrap(), vec!["2024-05-01 10:00:00"]);
        }
        other => panic!("unexpected event {other:?}"),
    }

    worker.submit(ApiCommand::FetchReport {
        key: "2024-05-01 10:00:00".to_string(),
    });
    match wait_for_event(&worker) {
        ApiEvent::ReportFetched { key, result } => {
            assert_eq!(key, "2024-05-01 10:00:00");
            assert_eq!(result.unwrap().total_links, 3);
        }
        other => panic!("unexpected event {other:?}"),
    }

    assert_eq!(fetcher.report_calls.load(Ordering::SeqCst), 1);
}

#[test]
fn fetch_failures_come_back_as_events_not_panics() {
    init_logging();
    let worker = ApiWorker::new(FakeFetcher::new());

    worker.submit(ApiCommand::FetchReport {
        key: "missing".to_string(),
    });
    match wait_for_event(&worker) {
        ApiEvent::ReportFetched { result, .. } => {
            assert!(matches!(result, Err(ApiError::Status(404))));
        }
        other => panic!("unexpected event {other:?}"),
    }
}
