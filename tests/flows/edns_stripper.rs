//! "EDNS stripper" (spec §8): the initial query used EDNS, the
//! effective on-the-wire request still did, but the response carried
//! no OPT record at all — a middlebox or resolver silently dropped it.

#[path = "../common/fixtures.rs"]
mod fixtures;

use dnssec_analysis_domain::{AnalysisConfig, AnalysisType, ErrorKind, Name, NameAnalysis, RDType};
use dnssec_analysis_engine::populate_status;
use dnssec_analysis_oracle::{AlgorithmOracle, RingOracle};
use std::collections::HashSet;
use std::rc::Rc;

#[test]
fn response_with_no_opt_record_is_edns_ignored() {
    let zone = Name::new("example.com");
    let mut na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);

    let mut a_query = dnssec_analysis_domain::Query::new(zone.clone(), RDType::A);
    a_query.answer_info.push(fixtures::a_rrset_info(&zone));

    let mut response = fixtures::clean_response(1, 1);
    let edns = fixtures::edns(0, 4096);
    response.query_edns = Some(edns);
    response.effective_edns = Some(edns);
    response.response_edns = None;
    a_query.queries.push(fixtures::query_instance_with(response));
    na.insert_query(a_query);

    let na = Rc::new(na);
    let cfg = AnalysisConfig::default();
    let algos = AlgorithmOracle::new(None, None);
    let crypto = RingOracle;
    let mut trace = HashSet::new();

    populate_status(&na, dnssec_analysis_domain::TraversalLevel::Delegation, &mut trace, &cfg, &algos, &crypto);

    let errors = na.status.key_errors.borrow();
    assert!(errors.iter().any(|e| matches!(e.kind, ErrorKind::EdnsIgnored)));
}
