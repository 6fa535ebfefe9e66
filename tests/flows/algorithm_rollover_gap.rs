//! "Algorithm rollover gap" (spec §8): the DNSKEY RRset advertises two
//! algorithms, but an RRset in the zone is only covered by an RRSIG for
//! one of them — the other algorithm has nothing proving the zone
//! signs under it, per RFC 6840 §5.11's full-coverage requirement.

#[path = "../common/fixtures.rs"]
mod fixtures;

use dnssec_analysis_domain::{AnalysisConfig, AnalysisType, ErrorKind, Name, NameAnalysis, Query, RDType};
use dnssec_analysis_engine::populate_status;
use dnssec_analysis_oracle::{AlgorithmOracle, RingOracle};
use std::collections::HashSet;
use std::rc::Rc;

#[test]
fn rrset_missing_coverage_for_one_of_two_zone_algorithms_is_flagged() {
    let zone = Name::new("example.com");
    let mut na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);

    let mut dnskey_query = Query::new(zone.clone(), RDType::Dnskey);
    let mut dnskey_info = dnssec_analysis_domain::RRsetInfo::new(fixtures::dnskey_rrset(
        &zone,
        &[(257, 8, vec![1u8; 32]), (257, 13, vec![2u8; 32])],
    ));
    // The DNSKEY RRset itself is co-signed by both algorithms; only the
    // A RRset below has the rollover gap.
    dnskey_info.rrsigs.push(fixtures::rrsig(&zone, &zone, RDType::Dnskey, 8, 1));
    dnskey_info.rrsigs.push(fixtures::rrsig(&zone, &zone, RDType::Dnskey, 13, 2));
    dnskey_query.answer_info.push(dnskey_info);
    na.insert_query(dnskey_query);

    let mut a_query = Query::new(zone.clone(), RDType::A);
    let mut a_info = fixtures::a_rrset_info(&zone);
    a_info.rrsigs.push(fixtures::rrsig(&zone, &zone, RDType::A, 8, 1));
    a_query.answer_info.push(a_info);
    na.insert_query(a_query);

    let na = Rc::new(na);
    let cfg = AnalysisConfig::default();
    let algos = AlgorithmOracle::new(None, None);
    let crypto = RingOracle;
    let mut trace = HashSet::new();

    populate_status(&na, dnssec_analysis_domain::TraversalLevel::Delegation, &mut trace, &cfg, &algos, &crypto);

    let errors = na.status.key_errors.borrow();
    assert!(errors
        .iter()
        .any(|e| matches!(e.kind, ErrorKind::MissingRrsigForAlgDnskey { algorithm: 13 })));
    assert!(!errors
        .iter()
        .any(|e| matches!(e.kind, ErrorKind::MissingRrsigForAlgDnskey { algorithm: 8 })));
}
