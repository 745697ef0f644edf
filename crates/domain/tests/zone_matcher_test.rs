use zonewire_domain::{
    ExactMatcher, ParseOptions, RecordClass, RecordMatcher, RecordType, Selector, WildcardMatcher,
    ZoneParser, ZoneSnapshot,
};

mod helpers;
use helpers::{name, RecordBuilder};

const ZONE: &str = "\
$ORIGIN example.com.
$TTL 300
@        IN SOA ns1 hostmaster 1 1h 15m 1w 1d
www      IN A    192.0.2.1
www      IN A    192.0.2.2
www      IN AAAA 2001:db8::1
*.apps   IN A    192.0.2.50
*        IN TXT  \"catch-all\"
a.b      IN A    192.0.2.60
host     CH TXT  \"chaos\"
";

fn snapshot() -> ZoneSnapshot {
    let parsed = ZoneParser::new(ParseOptions::default())
        .parse(ZONE)
        .unwrap();
    ZoneSnapshot::from_parsed(parsed)
}

fn only<T>(value: T) -> Selector<T> {
    Selector::Only(value)
}

#[test]
fn test_all_matching_records_in_insertion_order() {
    let zone = snapshot();
    let found = WildcardMatcher.match_records(
        &zone,
        &name("www.example.com."),
        &only(RecordClass::IN),
        &only(RecordType::A),
    );
    let rendered: Vec<String> = found.iter().map(|r| r.fields()[0].to_string()).collect();
    assert_eq!(rendered, vec!["192.0.2.1", "192.0.2.2"]);
}

#[test]
fn test_lookup_ignores_case() {
    let zone = snapshot();
    let found = ExactMatcher.match_records(
        &zone,
        &name("WWW.Example.COM."),
        &only(RecordClass::IN),
        &only(RecordType::AAAA),
    );
    assert_eq!(found.len(), 1);
}

#[test]
fn test_any_selectors_match_every_type_and_class() {
    let zone = snapshot();
    let found =
        ExactMatcher.match_records(&zone, &name("www.example.com."), &Selector::Any, &Selector::Any);
    assert_eq!(found.len(), 3);

    let chaos = ExactMatcher.match_records(
        &zone,
        &name("host.example.com."),
        &Selector::Any,
        &only(RecordType::TXT),
    );
    assert_eq!(chaos.len(), 1);
    assert_eq!(chaos[0].class(), &RecordClass::CH);
}

#[test]
fn test_class_mismatch_returns_nothing() {
    let zone = snapshot();
    let found = ExactMatcher.match_records(
        &zone,
        &name("host.example.com."),
        &only(RecordClass::IN),
        &only(RecordType::TXT),
    );
    assert!(found.is_empty());
}

#[test]
fn test_wildcard_answers_missing_names() {
    let zone = snapshot();
    let found = WildcardMatcher.match_records(
        &zone,
        &name("billing.apps.example.com."),
        &only(RecordClass::IN),
        &only(RecordType::A),
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), &name("*.apps.example.com."));
    assert!(WildcardMatcher.name_exists(&zone, &name("billing.apps.example.com.")));
}

#[test]
fn test_exact_matcher_never_uses_wildcards() {
    let zone = snapshot();
    let found = ExactMatcher.match_records(
        &zone,
        &name("billing.apps.example.com."),
        &Selector::Any,
        &Selector::Any,
    );
    assert!(found.is_empty());
    assert!(!ExactMatcher.name_exists(&zone, &name("billing.apps.example.com.")));
}

#[test]
fn test_existing_name_blocks_wildcard_even_without_matching_type() {
    let zone = snapshot();
    let found = WildcardMatcher.match_records(
        &zone,
        &name("www.example.com."),
        &only(RecordClass::IN),
        &only(RecordType::TXT),
    );
    assert!(found.is_empty());
    assert!(WildcardMatcher.name_exists(&zone, &name("www.example.com.")));
}

#[test]
fn test_empty_non_terminal_blocks_apex_wildcard() {
    let zone = snapshot();
    // b.example.com has no records of its own but owns a.b.example.com.
    assert!(zone.node_exists(&name("b.example.com.")));
    let below = WildcardMatcher.match_records(
        &zone,
        &name("x.b.example.com."),
        &Selector::Any,
        &Selector::Any,
    );
    assert!(below.is_empty());
    assert!(!WildcardMatcher.name_exists(&zone, &name("x.b.example.com.")));

    let at_ent =
        WildcardMatcher.match_records(&zone, &name("b.example.com."), &Selector::Any, &Selector::Any);
    assert!(at_ent.is_empty());
}

#[test]
fn test_existing_intermediate_node_blocks_apex_wildcard() {
    let zone = snapshot();
    let found = WildcardMatcher.match_records(
        &zone,
        &name("x.www.example.com."),
        &Selector::Any,
        &Selector::Any,
    );
    assert!(found.is_empty());
    assert_eq!(
        WildcardMatcher::wildcard_owner(&zone, &name("x.www.example.com.")),
        None
    );
    assert!(!WildcardMatcher.name_exists(&zone, &name("x.www.example.com.")));
}

#[test]
fn test_apex_wildcard_answers_unrelated_name() {
    let zone = snapshot();
    let found = WildcardMatcher.match_records(
        &zone,
        &name("nothing.example.com."),
        &only(RecordClass::IN),
        &only(RecordType::TXT),
    );
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].name(), &name("*.example.com."));
}

#[test]
fn test_names_outside_zone_match_nothing() {
    let zone = snapshot();
    let found = WildcardMatcher.match_records(
        &zone,
        &name("www.example.net."),
        &Selector::Any,
        &Selector::Any,
    );
    assert!(found.is_empty());
}

#[test]
fn test_snapshot_insert_ignores_duplicates_and_rejects_foreign_names() {
    let mut zone = ZoneSnapshot::empty(name("example.com."), Some(300));
    let record = RecordBuilder::a("www.example.com.", "192.0.2.1").build();

    assert!(zone.insert(record.clone()).unwrap());
    assert!(!zone.insert(record.clone()).unwrap());
    // A different ttl is still the same record.
    assert!(!zone
        .insert(RecordBuilder::a("www.example.com.", "192.0.2.1").ttl(60).build())
        .unwrap());
    assert_eq!(zone.len(), 1);

    let foreign = RecordBuilder::a("www.example.org.", "192.0.2.1").build();
    assert!(zone.insert(foreign).is_err());
}

#[test]
fn test_from_parsed_keeps_duplicates_out() {
    let parsed = ZoneParser::new(ParseOptions::default())
        .parse("$ORIGIN example.com.\n$TTL 60\nwww A 192.0.2.1\nwww A 192.0.2.1\n")
        .unwrap();
    assert_eq!(parsed.records.len(), 2);
    assert_eq!(ZoneSnapshot::from_parsed(parsed).len(), 1);
}
