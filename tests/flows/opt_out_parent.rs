//! "Opt-out parent" (spec §8): the parent answers a DS query with
//! NODATA backed by a valid NSEC3 opt-out range. `delegation_status`
//! stays INSECURE — there genuinely is no DS record — but graph
//! coloring (C8) must not treat the unvalidated opt-out proof as
//! `Bogus`: RFC 5155 §7.1 makes an opt-out range incapable of proving
//! DS non-existence by design, so the colorer reports it as a secure
//! non-existence instead of poisoning the zone.

#[path = "../common/fixtures.rs"]
mod fixtures;

use dnssec_analysis_domain::{AnalysisConfig, AnalysisType, DelegationStatus, Name, NameAnalysis, NodeColor, Query, RDType, RrsetStatus};
use dnssec_analysis_engine::{color_negative_proof, populate_status};
use dnssec_analysis_oracle::{AlgorithmOracle, RingOracle};
use std::collections::HashSet;
use std::rc::Rc;

#[test]
fn opt_out_ds_nodata_stays_insecure_but_colors_as_secure_nonexistence() {
    let parent_zone = Name::new("com");
    let child_zone = Name::new("example.com");

    let mut parent = NameAnalysis::new(parent_zone.clone(), AnalysisType::Authoritative);
    let mut ds_query = Query::new(child_zone.clone(), RDType::Ds);
    ds_query.nodata_info.push(fixtures::nodata_info_with_opt_out_nsec3(&child_zone, 1));
    parent.insert_query(ds_query);
    parent.insert_query(fixtures::ns_query(&parent_zone, &child_zone));
    let parent = Rc::new(parent);

    let mut child = NameAnalysis::new(child_zone.clone(), AnalysisType::Authoritative);
    fixtures::link_parent(&mut child, &parent);
    let child = Rc::new(child);

    let cfg = AnalysisConfig::default();
    let algos = AlgorithmOracle::new(None, None);
    let crypto = RingOracle;
    let mut trace = HashSet::new();

    populate_status(&child, dnssec_analysis_domain::TraversalLevel::Delegation, &mut trace, &cfg, &algos, &crypto);

    assert_eq!(*child.status.delegation_status.borrow(), Some(DelegationStatus::Insecure));

    let mut parent_trace = HashSet::new();
    populate_status(&parent, dnssec_analysis_domain::TraversalLevel::Delegation, &mut parent_trace, &cfg, &algos, &crypto);

    let nodata_status = parent.status.nodata_status.borrow();
    let proof = &nodata_status.get(&RDType::Ds).expect("ds nodata proof recorded")[0];
    assert!(proof.use_nsec3);
    assert!(proof.opt_out);

    assert_eq!(color_negative_proof(NodeColor::Secure, proof), RrsetStatus::NonExistent);
}
