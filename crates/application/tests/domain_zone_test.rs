mod helpers;

use helpers::{name, MockZoneSource};
use std::sync::Arc;
use zonewire_application::services::DomainZone;
use zonewire_domain::{
    DomainError, DomainRecord, ExactMatcher, ParseError, ParseOptions, RecordClass, RecordField,
    RecordType, Selector,
};

const EXAMPLE: &str = "$ORIGIN example.com.\n$TTL 3600\nwww A 192.0.2.1\nwww A 192.0.2.2\n";

fn a_selectors() -> (Selector<RecordClass>, Selector<RecordType>) {
    (Selector::Only(RecordClass::IN), Selector::Only(RecordType::A))
}

async fn load(source: &MockZoneSource, location: &str) -> DomainZone {
    DomainZone::load(source, location, ParseOptions::default())
        .await
        .unwrap()
}

#[tokio::test]
async fn test_loaded_zone_answers_in_file_order() {
    let source = MockZoneSource::new().with_document("example.zone", EXAMPLE);
    let zone = load(&source, "example.zone").await;

    assert_eq!(zone.origin(), &name("example.com."));
    assert_eq!(zone.location(), Some("example.zone"));

    let (class, record_type) = a_selectors();
    let records = zone.match_records(&name("www.example.com."), &class, &record_type);
    assert_eq!(records.len(), 2);
    assert!(records.iter().all(|r| r.ttl() == 3600));
    assert_eq!(
        records.iter().map(|r| r.fields()[0].to_string()).collect::<Vec<_>>(),
        vec!["192.0.2.1", "192.0.2.2"]
    );
    assert_eq!(
        zone.first_match(&name("www.example.com."), &class, &record_type)
            .unwrap()
            .fields()[0]
            .to_string(),
        "192.0.2.1"
    );
}

#[tokio::test]
async fn test_load_reports_unavailable_source() {
    let source = MockZoneSource::new();
    let err = DomainZone::load(&source, "missing.zone", ParseOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::ZoneSourceUnavailable { .. }));
}

#[tokio::test]
async fn test_failed_reload_keeps_previous_records() {
    let source = MockZoneSource::new().with_document("example.zone", EXAMPLE);
    let zone = load(&source, "example.zone").await;

    source.set_document("example.zone", "$ORIGIN example.com.\nwww A 192.0.2.9\n");
    let err = zone.reload(&source).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Parse(ParseError::MissingOrigin { line: 2, .. })
    ));
    assert_eq!(zone.record_count(), 2);

    source.remove_document("example.zone");
    assert!(zone.reload(&source).await.is_err());
    assert_eq!(zone.record_count(), 2);
}

#[tokio::test]
async fn test_staged_reload_publishes_only_on_commit() {
    let source = MockZoneSource::new().with_document("example.zone", EXAMPLE);
    let zone = load(&source, "example.zone").await;

    source.set_document(
        "example.zone",
        "$ORIGIN example.com.\n$TTL 60\nmail A 198.51.100.8\n",
    );
    let staged = zone.stage_reload(&source).await.unwrap();
    assert_eq!(staged.record_count(), 1);
    assert_eq!(zone.record_count(), 2);
    drop(staged);
    assert_eq!(zone.record_count(), 2);
    assert!(zone.name_exists(&name("www.example.com.")));
    assert!(!zone.name_exists(&name("mail.example.com.")));

    let staged = zone.stage_reload(&source).await.unwrap();
    assert_eq!(staged.commit(), 1);
    assert!(zone.name_exists(&name("mail.example.com.")));
    assert!(!zone.name_exists(&name("www.example.com.")));
}

#[tokio::test]
async fn test_successful_reload_replaces_records() {
    let source = MockZoneSource::new().with_document("example.zone", EXAMPLE);
    let zone = load(&source, "example.zone").await;
    let before = zone.snapshot();

    source.set_document(
        "example.zone",
        "$TTL 60\nwww A 198.51.100.7\nmail A 198.51.100.8\nftp A 198.51.100.9\n",
    );
    assert_eq!(zone.reload(&source).await.unwrap(), 3);

    // The origin learned at load time is kept for documents without $ORIGIN.
    let (class, record_type) = a_selectors();
    let records = zone.match_records(&name("www.example.com."), &class, &record_type);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].ttl(), 60);

    // Snapshots taken before the reload are untouched.
    assert_eq!(before.len(), 2);
}

#[tokio::test]
async fn test_reload_rejects_records_outside_origin() {
    let source = MockZoneSource::new().with_document("example.zone", EXAMPLE);
    let zone = load(&source, "example.zone").await;

    source.set_document("example.zone", "$TTL 60\nwww.example.org. A 192.0.2.1\n");
    assert!(zone.reload(&source).await.is_err());
    assert_eq!(zone.record_count(), 2);
}

#[tokio::test]
async fn test_zone_without_source_cannot_reload() {
    let zone = DomainZone::new(name("lan."), Some(60));
    let source = MockZoneSource::new();
    assert!(matches!(
        zone.reload(&source).await,
        Err(DomainError::ZoneNotFound(_))
    ));
}

#[tokio::test]
async fn test_insert_is_idempotent_and_additive() {
    let zone = DomainZone::parse(EXAMPLE, ParseOptions::default()).unwrap();
    let existing = DomainRecord::new(
        name("www.example.com."),
        3600,
        RecordClass::IN,
        RecordType::A,
        vec![RecordField::Ipv4("192.0.2.1".parse().unwrap())],
    )
    .unwrap();

    assert!(!zone.insert(existing).await.unwrap());
    assert_eq!(zone.record_count(), 2);

    let third = DomainRecord::new(
        name("www.example.com."),
        3600,
        RecordClass::IN,
        RecordType::A,
        vec![RecordField::Ipv4("192.0.2.3".parse().unwrap())],
    )
    .unwrap();
    assert!(zone.insert(third).await.unwrap());
    assert_eq!(zone.record_count(), 3);

    let foreign = DomainRecord::new(
        name("www.example.org."),
        3600,
        RecordClass::IN,
        RecordType::A,
        vec![RecordField::Ipv4("192.0.2.3".parse().unwrap())],
    )
    .unwrap();
    assert!(zone.insert(foreign).await.is_err());
}

#[tokio::test]
async fn test_every_inserted_record_matches_itself() {
    let zone = DomainZone::parse(
        "$ORIGIN example.com.\n$TTL 300\n\
         @ SOA ns1 admin 1 1h 10m 1w 5m\n\
         @ NS ns1\n\
         ns1 A 192.0.2.53\n\
         @ MX 10 mail\n\
         mail AAAA 2001:db8::25\n\
         _sip._tcp SRV 10 60 5060 sip\n\
         txt TXT \"a\" \"b\"\n\
         *.dyn A 192.0.2.99\n",
        ParseOptions::default(),
    )
    .unwrap();

    for record in zone.snapshot().records() {
        let found = zone.match_records(
            record.name(),
            &Selector::Only(record.class().clone()),
            &Selector::Only(record.record_type().clone()),
        );
        assert!(
            found.iter().any(|r| Arc::ptr_eq(r, record)),
            "{} did not match itself",
            record
        );
    }
}

#[tokio::test]
async fn test_exact_matcher_can_replace_default() {
    let zone = DomainZone::parse(
        "$ORIGIN example.com.\n$TTL 60\n* A 192.0.2.1\n",
        ParseOptions::default(),
    )
    .unwrap()
    .with_matcher(Arc::new(ExactMatcher));

    let (class, record_type) = a_selectors();
    assert!(zone
        .match_records(&name("any.example.com."), &class, &record_type)
        .is_empty());
}

#[tokio::test]
async fn test_replace_from_str_keeps_records_on_error() {
    let zone = DomainZone::parse(EXAMPLE, ParseOptions::default()).unwrap();
    assert!(zone.replace_from_str("$BOGUS\n").await.is_err());
    assert_eq!(zone.record_count(), 2);
    assert_eq!(zone.replace_from_str("$TTL 5\nwww A 192.0.2.5\n").await.unwrap(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_readers_never_see_a_mix_of_snapshots() {
    let first: String = (1..=5)
        .map(|i| format!("www A 192.0.2.{}\n", i))
        .collect::<String>();
    let second: String = (1..=3)
        .map(|i| format!("www A 198.51.100.{}\n", i))
        .collect::<String>();
    let first = format!("$ORIGIN example.com.\n$TTL 60\n{}", first);
    let second = format!("$ORIGIN example.com.\n$TTL 60\n{}", second);

    let zone = Arc::new(DomainZone::parse(&first, ParseOptions::default()).unwrap());

    let mut readers = Vec::new();
    for _ in 0..4 {
        let zone = Arc::clone(&zone);
        readers.push(tokio::spawn(async move {
            let (class, record_type) = a_selectors();
            for _ in 0..2_000 {
                let records = zone.match_records(&name("www.example.com."), &class, &record_type);
                let rendered: Vec<String> =
                    records.iter().map(|r| r.fields()[0].to_string()).collect();
                let all_first = rendered.iter().all(|ip| ip.starts_with("192.0.2."));
                let all_second = rendered.iter().all(|ip| ip.starts_with("198.51.100."));
                assert!(
                    (all_first && rendered.len() == 5) || (all_second && rendered.len() == 3),
                    "mixed snapshot: {:?}",
                    rendered
                );
                tokio::task::yield_now().await;
            }
        }));
    }

    let writer = {
        let zone = Arc::clone(&zone);
        tokio::spawn(async move {
            for i in 0..200 {
                let text = if i % 2 == 0 { &second } else { &first };
                zone.replace_from_str(text).await.unwrap();
                tokio::task::yield_now().await;
            }
        })
    };

    for reader in readers {
        reader.await.unwrap();
    }
    writer.await.unwrap();
}
