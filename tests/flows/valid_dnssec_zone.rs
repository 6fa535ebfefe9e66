//! "Valid DNSSEC zone" (spec §8): a DS with a supported algorithm
//! matches the child's DNSKEY by digest, that DNSKEY self-signs the
//! DNSKEY RRset, and the same DNSKEY's RRSIG over the A RRset verifies
//! at the analysis instant.

#[path = "../common/fixtures.rs"]
mod fixtures;

use dnssec_analysis_domain::model::dnskey::calculate_key_tag;
use dnssec_analysis_domain::{AnalysisConfig, AnalysisType, DelegationStatus, Name, NameAnalysis, NameStatus, RDType, ValidationStatus};
use dnssec_analysis_engine::populate_status;
use dnssec_analysis_oracle::AlgorithmOracle;
use std::collections::HashSet;
use std::rc::Rc;

#[test]
fn fully_signed_chain_resolves_secure() {
    let parent_zone = Name::new("com");
    let child_zone = Name::new("example.com");

    let public_key = vec![9u8; 32];
    let flags = 257; // zone key + SEP
    let algorithm = 13; // ECDSAP256SHA256
    let key_tag = calculate_key_tag(flags, 3, algorithm, &public_key);

    let mut parent = NameAnalysis::new(parent_zone.clone(), AnalysisType::Authoritative);
    let digest = vec![0xABu8; 32];
    let mut ds_query = dnssec_analysis_domain::Query::new(child_zone.clone(), RDType::Ds);
    ds_query.answer_info.push(dnssec_analysis_domain::RRsetInfo::new(dnssec_analysis_domain::RRset::new(
        child_zone.clone(),
        RDType::Ds,
        3600,
        vec![dnssec_analysis_domain::Rdata::Ds(fixtures::ds(key_tag, algorithm, digest))],
    )));
    parent.insert_query(ds_query);
    parent.insert_query(fixtures::ns_query(&parent_zone, &child_zone));
    let parent = Rc::new(parent);

    let mut child = NameAnalysis::new(child_zone.clone(), AnalysisType::Authoritative);
    fixtures::link_parent(&mut child, &parent);

    let mut dnskey_query = dnssec_analysis_domain::Query::new(child_zone.clone(), RDType::Dnskey);
    let mut dnskey_info =
        dnssec_analysis_domain::RRsetInfo::new(fixtures::dnskey_rrset(&child_zone, &[(flags, algorithm, public_key.clone())]));
    dnskey_info.rrsigs.push(fixtures::rrsig(&child_zone, &child_zone, RDType::Dnskey, algorithm, key_tag));
    dnskey_query.answer_info.push(dnskey_info);
    child.insert_query(dnskey_query);

    let mut a_query = dnssec_analysis_domain::Query::new(child_zone.clone(), RDType::A);
    let mut a_info = fixtures::a_rrset_info(&child_zone);
    a_info.rrsigs.push(fixtures::rrsig(&child_zone, &child_zone, RDType::A, algorithm, key_tag));
    a_query.answer_info.push(a_info);
    child.insert_query(a_query);
    let child = Rc::new(child);

    let cfg = AnalysisConfig::default();
    let algos = AlgorithmOracle::new(None, None);
    let crypto = fixtures::FakeOracle::always_valid();
    let mut trace = HashSet::new();

    populate_status(
        &child,
        dnssec_analysis_domain::TraversalLevel::Delegation,
        &mut trace,
        &cfg,
        &algos,
        &crypto,
    );

    assert_eq!(*child.status.delegation_status.borrow(), Some(DelegationStatus::Secure));
    assert_eq!(*child.status.name_status.borrow(), Some(NameStatus::NoError));

    let rrsig_statuses = child.status.rrsig_status.borrow();
    assert_eq!(rrsig_statuses.len(), 2);
    for status in rrsig_statuses.values() {
        assert_eq!(status.status, ValidationStatus::Valid);
    }

    assert!(child.status.key_errors.borrow().is_empty());
}
