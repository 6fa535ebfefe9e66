//! "Unsigned zone with stray RRSIG" (spec §8): an A RRset carries an
//! RRSIG even though the zone publishes no DNSKEY and the parent has
//! no DS for it.

#[path = "../common/fixtures.rs"]
mod fixtures;

use dnssec_analysis_domain::{AnalysisConfig, AnalysisType, DelegationStatus, Name, NameAnalysis, RDType, ValidationStatus};
use dnssec_analysis_engine::populate_status;
use dnssec_analysis_oracle::{AlgorithmOracle, RingOracle};
use std::collections::HashSet;
use std::rc::Rc;

#[test]
fn stray_rrsig_over_unsigned_zone_is_indeterminate_and_insecure() {
    let parent_zone = Name::new("com");
    let child_zone = Name::new("example.com");

    let mut parent = NameAnalysis::new(parent_zone.clone(), AnalysisType::Authoritative);
    parent.insert_query(fixtures::empty_ds_query(&child_zone));
    parent.insert_query(fixtures::ns_query(&parent_zone, &child_zone));
    let parent = Rc::new(parent);

    let mut child = NameAnalysis::new(child_zone.clone(), AnalysisType::Authoritative);
    fixtures::link_parent(&mut child, &parent);

    let mut a_query = dnssec_analysis_domain::Query::new(child_zone.clone(), RDType::A);
    let mut rrset_info = fixtures::a_rrset_info(&child_zone);
    rrset_info.rrsigs.push(fixtures::rrsig(&child_zone, &child_zone, RDType::A, 8, 1234));
    a_query.answer_info.push(rrset_info);
    child.insert_query(a_query);
    let child = Rc::new(child);

    let cfg = AnalysisConfig::default();
    let algos = AlgorithmOracle::new(None, None);
    let crypto = RingOracle;
    let mut trace = HashSet::new();

    populate_status(
        &child,
        dnssec_analysis_domain::TraversalLevel::Delegation,
        &mut trace,
        &cfg,
        &algos,
        &crypto,
    );

    assert_eq!(*child.status.delegation_status.borrow(), Some(DelegationStatus::Insecure));

    let rrsig_statuses = child.status.rrsig_status.borrow();
    assert_eq!(rrsig_statuses.len(), 1);
    for status in rrsig_statuses.values() {
        assert_eq!(status.status, ValidationStatus::Indeterminate);
    }

    let no_missing_rrsig = child
        .status
        .key_errors
        .borrow()
        .iter()
        .all(|e| !matches!(e.kind, dnssec_analysis_domain::ErrorKind::MissingRrsig));
    assert!(no_missing_rrsig);
}
