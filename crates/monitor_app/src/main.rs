//! Terminal monitor for the link-crawl service.
//!
//! The push channel is handed to us already open: pipe the server's
//! `/messages/{token}` stream into stdin, one JSON payload per line, e.g.
//!
//! ```text
//! websocat "ws://crawl-host/messages/$MONITOR_TOKEN" | monitor_app
//! ```
//!
//! Configuration comes from the environment: `MONITOR_SERVER` (required),
//! then either `MONITOR_TOKEN` or `MONITOR_LOGIN`/`MONITOR_PASSWORD` for a
//! fresh sign-in.

use std::io::BufRead;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use monitor_client::{
    ApiClient, ApiCommand, ApiEvent, ApiSettings, ApiWorker, AuthorizedClient, ChannelAdapter,
    NullTransport, Session,
};
use monitor_core::Notification;
use monitor_logging::{monitor_info, monitor_warn, LogDestination};

fn main() -> Result<()> {
    monitor_logging::initialize(LogDestination::Terminal);

    let server = std::env::var("MONITOR_SERVER")
        .context("MONITOR_SERVER is not set; point it at the crawl server")?;
    let api = ApiClient::new(&server, ApiSettings::default())?;
    let token = acquire_token(&api)?;
    let worker = ApiWorker::new(AuthorizedClient::new(api, token));

    // Bridge stdin into the payload channel; EOF means the push channel
    // closed and no further events will arrive for this session.
    let (payload_tx, payload_rx) = mpsc::channel::<String>();
    let channel_closed = Arc::new(AtomicBool::new(false));
    let closed_flag = channel_closed.clone();
    thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if !line.trim().is_empty() && payload_tx.send(line).is_err() {
                break;
            }
        }
        closed_flag.store(true, Ordering::SeqCst);
    });

    let messages = ChannelAdapter::new(Box::new(NullTransport), payload_rx);
    // No interactive command surface yet, so the command channel stays
    // closed; sends would be logged and dropped.
    let (_cmd_tx, cmd_rx) = mpsc::channel();
    let mut session = Session::new(ChannelAdapter::new(Box::new(NullTransport), cmd_rx));

    worker.submit(ApiCommand::ListReports);
    run_loop(&mut session, &worker, &messages, &channel_closed);

    monitor_info!("push channel closed, exiting");
    Ok(())
}

/// Reuses a stored token when the server still accepts it, otherwise signs
/// in with the configured credentials.
fn acquire_token(api: &ApiClient) -> Result<String> {
    let runtime = tokio::runtime::Runtime::new()?;

    if let Ok(token) = std::env::var("MONITOR_TOKEN") {
        if runtime.block_on(api.test_token(&token))? {
            return Ok(token);
        }
        monitor_warn!("stored token rejected, falling back to sign-in");
    }

    let (Ok(login), Ok(password)) = (
        std::env::var("MONITOR_LOGIN"),
        std::env::var("MONITOR_PASSWORD"),
    ) else {
        bail!("no valid MONITOR_TOKEN and no MONITOR_LOGIN/MONITOR_PASSWORD");
    };
    let token = runtime.block_on(api.sign_in(&login, &password))?;
    Ok(token)
}

fn run_loop(
    session: &mut Session,
    worker: &ApiWorker,
    messages: &ChannelAdapter,
    channel_closed: &AtomicBool,
) {
    loop {
        let mut idle = true;

        while let Some(payload) = messages.try_recv() {
            idle = false;
            for notification in session.handle_payload(&payload) {
                handle_notification(session, worker, notification);
            }
        }

        while let Some(event) = worker.try_recv() {
            idle = false;
            handle_api_event(session, worker, event);
        }

        if channel_closed.load(Ordering::SeqCst) {
            break;
        }
        if idle {
            thread::sleep(Duration::from_millis(50));
        }
    }
}

fn handle_notification(session: &mut Session, worker: &ApiWorker, notification: Notification) {
    match notification {
        Notification::JobCreated { id } => {
            monitor_info!("job {id}: started");
            // Seed the error log with failures recorded before we joined.
            worker.submit(ApiCommand::FetchJobErrors { id });
        }
        Notification::JobUpdated { id, .. } => {
            if let Some(view) = session.store().get(id) {
                monitor_info!(
                    "job {id}: {} | {} links, {} errors",
                    view.progress_state.label(),
                    view.total_links,
                    view.total_errors,
                );
            }
        }
        Notification::ErrorAppended { id } => {
            if let Some(entry) = session.store().get(id).and_then(|v| v.error_log.last()) {
                monitor_warn!(
                    "job {id}: {} -> {} {} (from {})",
                    entry.url,
                    entry.http_status,
                    entry.error_text,
                    entry.parent_url,
                );
            }
        }
        Notification::JobRemoved { id } => {
            monitor_info!("job {id}: stopped and archived");
        }
        Notification::ReportsStale => {
            worker.submit(ApiCommand::ListReports);
        }
    }
}

fn handle_api_event(session: &mut Session, worker: &ApiWorker, event: ApiEvent) {
    match event {
        ApiEvent::ReportsListed { result } => {
            session.reports_listed(result);
            let keys = session.catalog().keys();
            monitor_info!("{} completed reports available", keys.len());
            // Show the newest report's summary; repeated listings are free
            // once the cache is populated.
            if let Some(key) = keys.last().cloned() {
                if let monitor_client::ReportLookup::Pending { fetch_needed: true } =
                    session.select_report(&key)
                {
                    worker.submit(ApiCommand::FetchReport { key });
                }
            }
        }
        ApiEvent::ReportFetched { key, result } => {
            if let Some(report) = session.report_loaded(&key, result) {
                monitor_info!(
                    "report {key}: {} links, {} errors",
                    report.total_links,
                    report.errors.len(),
                );
            }
        }
        ApiEvent::JobErrorsFetched { id, result } => {
            for notification in session.seed_job_errors(id, result) {
                handle_notification(session, worker, notification);
            }
        }
    }
}
