use monitor_client::{Report, ReportCache, ReportCatalog, ReportLookup};

fn snapshot(total_links: u64) -> Report {
    serde_json::from_value(serde_json::json!({
        "TotalLinks": total_links,
        "Errors": {},
        "URLs": ["http://a"],
    }))
    .unwrap()
}

#[test]
fn first_lookup_gets_the_single_fetch_ticket() {
    let mut cache = ReportCache::new();

    assert_eq!(
        cache.get("2024-05-01 10:00:00"),
        ReportLookup::Pending { fetch_needed: true }
    );
    // Every lookup until completion coalesces onto the pending fetch.
    assert_eq!(
        cache.get("2024-05-01 10:00:00"),
        ReportLookup::Pending {
            fetch_needed: false
        }
    );
    assert_eq!(
        cache.get("2024-05-01 10:00:00"),
        ReportLookup::Pending {
            fetch_needed: false
        }
    );
}

#[test]
fn completion_makes_the_key_synchronously_ready() {
    let mut cache = ReportCache::new();
    let key = "2024-05-01 10:00:00";
    cache.get(key);

    let stored = cache.complete(key, snapshot(12));
    assert_eq!(stored.total_links, 12);

    match cache.get(key) {
        ReportLookup::Ready(report) => assert_eq!(report.total_links, 12),
        other => panic!("expected ready lookup, got {other:?}"),
    }
}

#[test]
fn populated_slot_is_immutable() {
    let mut cache = ReportCache::new();
    let key = "2024-05-01 10:00:00";
    cache.get(key);
    cache.complete(key, snapshot(12));

    // A duplicate completion for the same key keeps the first snapshot.
    let stored = cache.complete(key, snapshot(99));
    assert_eq!(stored.total_links, 12);
    assert!(cache.is_ready(key));
}

#[test]
fn failed_fetch_frees_the_slot_for_a_fresh_request() {
    let mut cache = ReportCache::new();
    let key = "2024-05-01 10:00:00";

    assert_eq!(cache.get(key), ReportLookup::Pending { fetch_needed: true });
    cache.fail(key);

    // The next user-initiated selection gets a new ticket.
    assert_eq!(cache.get(key), ReportLookup::Pending { fetch_needed: true });
}

#[test]
fn catalog_is_replaced_wholesale() {
    let mut catalog = ReportCatalog::new();
    assert!(catalog.is_empty());

    catalog.replace(vec!["a".into(), "b".into()]);
    assert_eq!(catalog.keys(), ["a", "b"]);

    catalog.replace(vec!["c".into()]);
    assert_eq!(catalog.keys(), ["c"]);
}
