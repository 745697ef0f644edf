mod helpers;

use helpers::{name, text_of, TextEncoder};
use std::sync::Arc;
use zonewire_application::services::{DomainServer, DomainZone};
use zonewire_application::use_cases::AnswerQueryUseCase;
use zonewire_domain::{
    DomainQuery, EncodingError, ParseOptions, RecordClass, RecordType, Selector,
};

const ZONE: &str = "\
$ORIGIN example.com.
$TTL 300
foo A 192.0.2.1
* A 192.0.2.100
caa CAA 0 issue ca.example
caa A 192.0.2.7
";

fn use_case() -> AnswerQueryUseCase {
    let server = Arc::new(DomainServer::new(Vec::new()));
    server
        .replace_zones(vec![Arc::new(
            DomainZone::parse(ZONE, ParseOptions::default()).unwrap(),
        )])
        .unwrap();
    AnswerQueryUseCase::new(server, Arc::new(TextEncoder))
}

fn query(fqdn: &str, record_type: Selector<RecordType>) -> DomainQuery {
    DomainQuery::new(name(fqdn), Selector::Only(RecordClass::IN), record_type)
}

#[test]
fn test_exact_record_suppresses_wildcard() {
    let answer = use_case().execute(&query("foo.example.com.", Selector::Only(RecordType::A)));
    assert_eq!(answer.records.len(), 1);
    assert_eq!(text_of(&answer.records[0]), "foo.example.com. 300 IN A 192.0.2.1");
}

#[test]
fn test_wildcard_answer_carries_query_name() {
    let answer = use_case().execute(&query("bar.example.com.", Selector::Only(RecordType::A)));
    assert_eq!(answer.matched_origin, Some(name("example.com.")));
    assert!(answer.name_exists);
    assert_eq!(answer.records.len(), 1);
    assert_eq!(
        text_of(&answer.records[0]),
        "bar.example.com. 300 IN A 192.0.2.100"
    );
}

#[test]
fn test_unencodable_records_are_skipped_not_fatal() {
    let answer = use_case().execute(&query("caa.example.com.", Selector::Any));

    assert_eq!(answer.records.len(), 1);
    assert_eq!(text_of(&answer.records[0]), "caa.example.com. 300 IN A 192.0.2.7");
    assert_eq!(answer.skipped.len(), 1);
    assert_eq!(answer.skipped[0].record.record_type().as_str(), "CAA");
    assert!(matches!(
        answer.skipped[0].error,
        EncodingError::UnsupportedRecordType(_)
    ));
}

#[test]
fn test_not_authoritative_outside_zones() {
    let answer = use_case().execute(&query("www.example.net.", Selector::Any));
    assert!(!answer.is_authoritative());
    assert!(answer.is_empty());
    assert!(answer.skipped.is_empty());
}

#[test]
fn test_nodata_is_flagged_as_existing_name() {
    let answer = use_case().execute(&query("foo.example.com.", Selector::Only(RecordType::MX)));
    assert!(answer.is_authoritative());
    assert!(answer.is_empty());
    assert!(answer.name_exists);
}
