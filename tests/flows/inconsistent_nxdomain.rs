//! "Inconsistent NXDOMAIN" (spec §8): the same server answers NXDOMAIN
//! for one type under a name and NOERROR with an actual RRset for
//! another type under that same name — a contradiction a single
//! authoritative server must never produce.

#[path = "../common/fixtures.rs"]
mod fixtures;

use dnssec_analysis_domain::{AnalysisConfig, AnalysisType, ErrorKind, Name, NameAnalysis, Query, RDType};
use dnssec_analysis_engine::populate_status;
use dnssec_analysis_oracle::{AlgorithmOracle, RingOracle};
use std::collections::HashSet;
use std::rc::Rc;

#[test]
fn same_name_nxdomain_and_noerror_is_flagged() {
    let zone = Name::new("foo.example");
    let mut na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);

    let mut aaaa_query = Query::new(zone.clone(), RDType::Aaaa);
    aaaa_query.nxdomain_info.push(fixtures::nxdomain_info(&zone, RDType::Aaaa, 7));
    na.insert_query(aaaa_query);

    let mut a_query = Query::new(zone.clone(), RDType::A);
    a_query.answer_info.push(fixtures::a_rrset_info(&zone));
    na.insert_query(a_query);

    let na = Rc::new(na);
    let cfg = AnalysisConfig::default();
    let algos = AlgorithmOracle::new(None, None);
    let crypto = RingOracle;
    let mut trace = HashSet::new();

    populate_status(&na, dnssec_analysis_domain::TraversalLevel::Delegation, &mut trace, &cfg, &algos, &crypto);

    let errors = na.status.key_errors.borrow();
    let found = errors.iter().find(|e| matches!(e.kind, ErrorKind::InconsistentNxdomain));
    let found = found.expect("expected an InconsistentNxdomain error");
    assert!(found.witnesses.iter().any(|w| w.server == fixtures::ip(7)));
}
