//! Contract tests for the orchestrator: persist decides the outcome,
//! everything after it is best-effort.

mod common;

use common::{MemoryStore, MockDnssec};
use kaede::config::EngineConfig;
use kaede::manager::RecordManager;
use kaede::model::{Record, RecordType, ZoneKind, ZoneRef};

fn forward_and_reverse_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.add_zone(ZoneRef {
        id: 1,
        name: "example.com".to_string(),
        kind: ZoneKind::Native,
    });
    store.add_zone(ZoneRef {
        id: 2,
        name: "2.0.192.in-addr.arpa".to_string(),
        kind: ZoneKind::Native,
    });
    store
}

fn manager(
    store: &MemoryStore,
    dnssec: &MockDnssec,
    dnssec_enabled: bool,
) -> RecordManager<MemoryStore, MockDnssec> {
    RecordManager::new(
        store.clone(),
        dnssec.clone(),
        EngineConfig::new(dnssec_enabled, true, 86400),
    )
}

#[tokio::test]
async fn create_record_persists_and_syncs() {
    common::init_tracing();
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, false);

    let ok = manager
        .create_record(
            1,
            "www",
            RecordType::A,
            "192.0.2.1",
            "",
            "",
            "web box",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(ok);

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "www.example.com");
    assert_eq!(records[0].ttl, 86400); // blank ttl fell back to the default
    assert_eq!(records[0].prio, 0);

    // forward + PTR comment
    assert_eq!(store.comments().len(), 2);
    // dnssec disabled: no rectify
    assert!(dnssec.rectified_zones().is_empty());
}

#[tokio::test]
async fn create_record_at_the_apex() {
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, false);

    let ok = manager
        .create_record(
            1,
            "@",
            RecordType::Txt,
            "v=spf1 -all",
            "3600",
            "",
            "",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(ok);

    let records = store.records();
    assert_eq!(records[0].name, "example.com");
    assert_eq!(records[0].ttl, 3600);
}

#[tokio::test]
async fn invalid_input_persists_nothing() {
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, true);

    let ok = manager
        .create_record(
            1,
            "www",
            RecordType::A,
            "not-an-address",
            "",
            "",
            "web box",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(!ok);

    assert!(store.records().is_empty());
    assert!(store.comments().is_empty());
    assert!(dnssec.rectified_zones().is_empty());
}

#[tokio::test]
async fn store_failure_means_false_and_no_comments() {
    common::init_tracing();
    let store = forward_and_reverse_store();
    store.fail_inserts();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, true);

    let ok = manager
        .create_record(
            1,
            "www",
            RecordType::A,
            "192.0.2.1",
            "",
            "",
            "web box",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(!ok);

    assert!(store.comments().is_empty());
    assert!(dnssec.rectified_zones().is_empty());
}

#[tokio::test]
async fn secondary_zones_are_read_only() {
    let store = MemoryStore::new();
    store.add_zone(ZoneRef {
        id: 9,
        name: "replica.example.net".to_string(),
        kind: ZoneKind::Secondary,
    });
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, false);

    let ok = manager
        .create_record(
            9,
            "www",
            RecordType::A,
            "192.0.2.1",
            "",
            "",
            "",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(!ok);
    assert!(store.records().is_empty());
}

#[tokio::test]
async fn unknown_zone_is_refused() {
    let store = MemoryStore::new();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, false);

    let ok = manager
        .create_record(
            42,
            "www",
            RecordType::A,
            "192.0.2.1",
            "",
            "",
            "",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(!ok);
}

#[tokio::test]
async fn rectify_runs_when_dnssec_is_enabled() {
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, true);

    let ok = manager
        .create_record(
            1,
            "www",
            RecordType::A,
            "192.0.2.1",
            "",
            "",
            "",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(ok);
    assert_eq!(dnssec.rectified_zones(), vec!["example.com".to_string()]);
}

#[tokio::test]
async fn rectify_failure_does_not_mask_the_write() {
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    dnssec.fail_rectify();
    let manager = manager(&store, &dnssec, true);

    let ok = manager
        .create_record(
            1,
            "www",
            RecordType::A,
            "192.0.2.1",
            "",
            "",
            "",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(ok);
    assert_eq!(store.records().len(), 1);
}

#[tokio::test]
async fn edit_record_rewrites_row_and_paired_comment() {
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, false);

    assert!(
        manager
            .create_record(
                1,
                "www",
                RecordType::A,
                "192.0.2.1",
                "",
                "",
                "web box",
                "alice",
                "198.51.100.7",
            )
            .await
    );
    let before = store.records()[0].clone();

    let ok = manager
        .edit_record(
            &before,
            "web",
            "192.0.2.7",
            "300",
            "",
            "moved",
            "bob",
            "198.51.100.7",
        )
        .await;
    assert!(ok);

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "web.example.com");
    assert_eq!(records[0].content, "192.0.2.7");
    assert_eq!(records[0].ttl, 300);

    let comments = store.comments();
    assert_eq!(comments.len(), 2);
    let reverse = comments.iter().find(|c| c.rtype == RecordType::Ptr).unwrap();
    assert_eq!(reverse.name, "7.2.0.192.in-addr.arpa");
    assert_eq!(reverse.text, "moved");
}

#[tokio::test]
async fn edit_with_invalid_content_leaves_the_row_alone() {
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, false);

    assert!(
        manager
            .create_record(
                1,
                "www",
                RecordType::A,
                "192.0.2.1",
                "",
                "",
                "",
                "alice",
                "198.51.100.7",
            )
            .await
    );
    let before = store.records()[0].clone();

    let ok = manager
        .edit_record(
            &before,
            "www",
            "bogus",
            "",
            "",
            "",
            "alice",
            "198.51.100.7",
        )
        .await;
    assert!(!ok);
    assert_eq!(store.records()[0].content, "192.0.2.1");
}

#[tokio::test]
async fn delete_record_removes_row_and_comments() {
    let store = forward_and_reverse_store();
    let dnssec = MockDnssec::new();
    let manager = manager(&store, &dnssec, false);

    assert!(
        manager
            .create_record(
                1,
                "www",
                RecordType::A,
                "192.0.2.1",
                "",
                "",
                "web box",
                "alice",
                "198.51.100.7",
            )
            .await
    );
    let record: Record = store.records()[0].clone();

    let ok = manager.delete_record(&record, "alice", "198.51.100.7").await;
    assert!(ok);

    assert!(store.records().is_empty());
    // the forward comment is gone; the PTR side keeps its annotation
    assert!(store
        .comments()
        .iter()
        .all(|c| c.rtype != RecordType::A));
}
