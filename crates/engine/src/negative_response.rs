use crate::dnskey_index::DnskeyIndex;
use crate::rrsig_validator::validate_rrsig_against_index;
use dnssec_analysis_domain::{
    best_of, EdnsParams, ErrorInfo, ErrorKind, Name, NegativeProofStatus, NegativeResponseInfo, Query, RDType, Response,
    Severity, ValidationStatus, ValidationStatused, WitnessSet,
};
use dnssec_analysis_oracle::{AlgorithmOracle, CryptoOracle};

/// C5: validates the signatures backing one negative-response artifact
/// (NODATA or NXDOMAIN) and raises the per-witness structural errors
/// §4.5 calls for: every covering RRset (the SOA and each NSEC/NSEC3
/// RRset) must itself carry a valid RRSIG for the proof to count, and
/// every witness that answered NODATA/NXDOMAIN must actually have
/// carried a usable SOA and NSEC/NSEC3 proof, or be flagged for the one
/// it's missing.
pub fn validate_negative_response(
    neg: &NegativeResponseInfo,
    query: &Query,
    is_nxdomain: bool,
    zone: &Name,
    analysis_end: i64,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
    dnskeys: &DnskeyIndex,
) -> (Vec<NegativeProofStatus>, Vec<ErrorInfo>) {
    let mut errors = Vec::new();
    let witness_responses = query.witness_responses();

    // Step 2: every SOA's owner must actually be the zone apex, and
    // (except for a DNSKEY query, where validating the SOA's own RRSIG
    // would fold the bootstrapping key set back on itself) its RRSIG
    // must validate.
    let mut soa_witnesses = WitnessSet::new();
    let mut soa_statuses = Vec::new();
    for soa in &neg.soa_rrsets {
        if soa.rrset.owner != *zone {
            errors.push(ErrorInfo::new(
                soa_owner_mismatch_kind(is_nxdomain),
                Severity::Error,
                soa.witnesses.clone(),
            ));
        }
        soa_witnesses.extend(soa.witnesses.iter().copied());
        let status = if query.rdtype == RDType::Dnskey {
            ValidationStatus::Valid
        } else {
            best_covering_status(&soa.rrsig_statuses(zone, analysis_end, algos, crypto, dnskeys))
        };
        soa_statuses.push(status);
    }
    let soa_status = worst(&soa_statuses);

    // Step 3: witnesses that answered but carried no SOA at all. A
    // NODATA response that is actually an upward referral gets its own
    // kind rather than being treated as a missing SOA.
    for witness in neg.witnesses.difference(&soa_witnesses) {
        let is_upward_referral = witness_responses.get(witness).is_some_and(|r| r.is_upward_referral);
        if !is_nxdomain && is_upward_referral {
            errors.push(ErrorInfo::new(
                ErrorKind::UpwardReferral,
                Severity::Warning,
                std::iter::once(*witness).collect(),
            ));
        } else {
            errors.push(ErrorInfo::new(
                missing_soa_kind(is_nxdomain),
                Severity::Error,
                std::iter::once(*witness).collect(),
            ));
        }
    }

    // Step 4: witnesses missing an NSEC/NSEC3 proof altogether, gated on
    // the witness having actually requested (and the server having
    // shown itself capable of returning) DNSSEC records — a resolver
    // that never set the DO bit has no grounds to expect one.
    let mut nsec_witnesses = WitnessSet::new();
    for set in &neg.nsec_sets {
        for rrset_info in &set.covering {
            nsec_witnesses.extend(rrset_info.witnesses.iter().copied());
        }
    }
    for witness in neg.witnesses.difference(&nsec_witnesses) {
        if witness_responses.get(witness).is_some_and(dnssec_requested_and_capable) {
            errors.push(ErrorInfo::new(
                missing_nsec_kind(is_nxdomain),
                Severity::Error,
                std::iter::once(*witness).collect(),
            ));
        }
    }

    let statuses = neg
        .nsec_sets
        .iter()
        .map(|set| {
            let covering_statuses: Vec<ValidationStatus> = set
                .covering
                .iter()
                .map(|rrset_info| best_covering_status(&rrset_info.rrsig_statuses(zone, analysis_end, algos, crypto, dnskeys)))
                .collect();
            let mut all = covering_statuses;
            all.push(soa_status);
            NegativeProofStatus {
                use_nsec3: set.use_nsec3,
                opt_out: set.opt_out,
                rdtype: neg.rdtype,
                status: worst(&all),
            }
        })
        .collect();

    (statuses, errors)
}

/// §4.7 step 5's wildcard-expansion counterpart to
/// `validate_negative_response`: every witness that received a
/// wildcard-expanded answer must carry its own NSEC/NSEC3 proof that no
/// closer, more specific name exists.
pub fn validate_wildcard_proofs(
    rrset_info: &dnssec_analysis_domain::RRsetInfo,
    query: &Query,
    zone: &Name,
    analysis_end: i64,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
    dnskeys: &DnskeyIndex,
) -> (Vec<NegativeProofStatus>, Vec<ErrorInfo>) {
    let mut statuses = Vec::new();
    let mut errors = Vec::new();
    let witness_responses = query.witness_responses();

    for witness_bundle in rrset_info.wildcard_info.values() {
        let mut proof_witnesses = WitnessSet::new();
        for set in &witness_bundle.proofs {
            for rrset in &set.covering {
                proof_witnesses.extend(rrset.witnesses.iter().copied());
            }
            let covering_statuses: Vec<ValidationStatus> = set
                .covering
                .iter()
                .map(|ri| best_covering_status(&ri.rrsig_statuses(zone, analysis_end, algos, crypto, dnskeys)))
                .collect();
            statuses.push(NegativeProofStatus {
                use_nsec3: set.use_nsec3,
                opt_out: set.opt_out,
                rdtype: rrset_info.rrset.rdtype,
                status: worst(&covering_statuses),
            });
        }

        for witness in witness_bundle.witnesses.difference(&proof_witnesses) {
            if witness_responses.get(witness).is_some_and(dnssec_requested_and_capable) {
                errors.push(ErrorInfo::new(
                    ErrorKind::MissingNsecForWildcard,
                    Severity::Error,
                    std::iter::once(*witness).collect(),
                ));
            }
        }
    }

    (statuses, errors)
}

fn soa_owner_mismatch_kind(is_nxdomain: bool) -> ErrorKind {
    if is_nxdomain {
        ErrorKind::SoaOwnerNotZoneForNxdomain
    } else {
        ErrorKind::SoaOwnerNotZoneForNodata
    }
}

fn missing_soa_kind(is_nxdomain: bool) -> ErrorKind {
    if is_nxdomain {
        ErrorKind::MissingSoaForNxdomain
    } else {
        ErrorKind::MissingSoaForNodata
    }
}

fn missing_nsec_kind(is_nxdomain: bool) -> ErrorKind {
    if is_nxdomain {
        ErrorKind::MissingNsecForNxdomain
    } else {
        ErrorKind::MissingNsecForNodata
    }
}

/// Whether a witness both asked for DNSSEC records (DO bit set on the
/// query) and got back a response that shows the server is at least
/// EDNS-capable — the precondition for expecting an NSEC/NSEC3 proof to
/// have been possible at all.
fn dnssec_requested_and_capable(response: &Response) -> bool {
    let requested = response.query_edns.is_some_and(|e| e.flags & EdnsParams::DO_BIT != 0);
    requested && response.response_edns.is_some()
}

fn best_covering_status(candidates: &[ValidationStatus]) -> ValidationStatus {
    #[derive(Clone, Copy)]
    struct Wrapped(ValidationStatus);
    impl ValidationStatused for Wrapped {
        fn validation_status(&self) -> ValidationStatus {
            self.0
        }
    }
    best_of(candidates.iter().map(|s| Wrapped(*s)))
        .map(|w| w.0)
        .unwrap_or(ValidationStatus::Indeterminate)
}

/// The weakest (highest-rank) status in a set: every component of a
/// negative proof must be valid for the proof as a whole to be valid,
/// so one bad signature sinks the lot.
fn worst(statuses: &[ValidationStatus]) -> ValidationStatus {
    statuses
        .iter()
        .copied()
        .max_by_key(|s| s.rank())
        .unwrap_or(ValidationStatus::Indeterminate)
}

/// A small helper trait so `validate_negative_response` can ask an
/// `RRsetInfo` for the per-RRSIG validation statuses without the
/// caller re-deriving the DNSKEY lookup each time.
trait RrsigStatuses {
    fn rrsig_statuses(
        &self,
        zone: &Name,
        analysis_end: i64,
        algos: &AlgorithmOracle,
        crypto: &dyn CryptoOracle,
        dnskeys: &DnskeyIndex,
    ) -> Vec<ValidationStatus>;
}

impl RrsigStatuses for dnssec_analysis_domain::RRsetInfo {
    fn rrsig_statuses(
        &self,
        zone: &Name,
        analysis_end: i64,
        algos: &AlgorithmOracle,
        crypto: &dyn CryptoOracle,
        dnskeys: &DnskeyIndex,
    ) -> Vec<ValidationStatus> {
        self.rrsigs
            .iter()
            .map(|rrsig| {
                let candidates = dnskeys.lookup_applicable(rrsig.key_tag, rrsig.algorithm);
                validate_rrsig_against_index(&self.rrset, rrsig, candidates, zone, analysis_end, algos, crypto).status
            })
            .collect()
    }
}

/// Second pass (Design Note: explicit pass instead of nested
/// coroutine-shaped control flow) over every query for the same owner
/// name: flags `InconsistentNxdomain` when one response reports
/// NXDOMAIN for a name while another reports NOERROR for it.
pub fn check_nxdomain_consistency<'a>(queries: impl Iterator<Item = &'a Query>) -> Vec<ErrorInfo> {
    use std::collections::HashMap;

    let mut by_name: HashMap<&Name, (bool, bool, WitnessSet)> = HashMap::new();
    for query in queries {
        let entry = by_name.entry(&query.qname).or_insert((false, false, WitnessSet::new()));
        if !query.nxdomain_info.is_empty() {
            entry.0 = true;
            for info in &query.nxdomain_info {
                entry.2.extend(info.witnesses.iter().copied());
            }
        }
        if !query.answer_info.is_empty() || !query.nodata_info.is_empty() {
            entry.1 = true;
            for info in &query.nodata_info {
                entry.2.extend(info.witnesses.iter().copied());
            }
        }
    }

    by_name
        .into_iter()
        .filter(|(_, (saw_nxdomain, saw_noerror, _))| *saw_nxdomain && *saw_noerror)
        .map(|(_, (_, _, witnesses))| ErrorInfo::new(ErrorKind::InconsistentNxdomain, dnssec_analysis_domain::Severity::Error, witnesses))
        .collect()
}

/// Whether `rdtype` was asked for directly and came back with no
/// records at all while the zone apex exists — the precondition for a
/// NODATA proof rather than an NXDOMAIN one (§4.5 step 1).
pub fn is_nodata_candidate(query: &Query) -> bool {
    query.answer_info.is_empty() && !query.nodata_info.is_empty() && query.rdtype != RDType::Other(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dnssec_analysis_domain::{
        AnalysisType, NameAnalysis, NsecSetInfo, QueryInstance, RRset, RRsetInfo, Rcode, Rdata, ResponseId, ResponsiveCause,
        Witness,
    };
    use dnssec_analysis_oracle::RingOracle;
    use std::net::IpAddr;

    fn ip(last: u8) -> IpAddr {
        IpAddr::from([198, 51, 100, last])
    }

    fn do_response(server: u8, id: u32) -> Response {
        let params = EdnsParams {
            version: 0,
            max_udp_payload: 4096,
            flags: EdnsParams::DO_BIT,
        };
        Response {
            id: ResponseId(id),
            server: ip(server),
            client: ip(1),
            rcode: Rcode::NoError,
            authoritative: true,
            recursion_desired: false,
            recursion_available: false,
            is_upward_referral: false,
            query_edns: Some(params),
            response_edns: Some(params),
            effective_edns: Some(params),
            responsive_cause: ResponsiveCause::None,
            other_edns_query_succeeded: false,
        }
    }

    fn query_with_response(qname: &Name, rdtype: RDType, response: Response) -> Query {
        let mut query = Query::new(qname.clone(), rdtype);
        let mut instance = QueryInstance::default();
        instance.responses.insert((response.server, response.client), vec![response]);
        query.queries.push(instance);
        query
    }

    #[test]
    fn worst_picks_highest_rank() {
        let statuses = [ValidationStatus::Valid, ValidationStatus::Expired, ValidationStatus::Valid];
        assert_eq!(worst(&statuses), ValidationStatus::Expired);
    }

    #[test]
    fn worst_of_empty_is_indeterminate() {
        assert_eq!(worst(&[]), ValidationStatus::Indeterminate);
    }

    #[test]
    fn inconsistent_nxdomain_detected_across_queries() {
        let name = Name::new("www.example.com");
        let mut nx_query = Query::new(name.clone(), RDType::A);
        nx_query
            .nxdomain_info
            .push(dnssec_analysis_domain::NegativeResponseInfo::new(name.clone(), RDType::A));
        let mut noerror_query = Query::new(name.clone(), RDType::Aaaa);
        noerror_query
            .answer_info
            .push(dnssec_analysis_domain::RRsetInfo::new(dnssec_analysis_domain::RRset::new(
                name.clone(),
                RDType::Aaaa,
                300,
                vec![],
            )));

        let queries = vec![nx_query, noerror_query];
        let errors = check_nxdomain_consistency(queries.iter());
        assert_eq!(errors.len(), 1);
        assert!(matches!(errors[0].kind, ErrorKind::InconsistentNxdomain));
    }

    #[test]
    fn nodata_with_no_soa_at_all_raises_missing_soa() {
        let zone = Name::new("example.com");
        let na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);
        let index = DnskeyIndex::build(&na);
        let algos = AlgorithmOracle::new(None, None);

        let response = do_response(1, 1);
        let witness = Witness::new(response.server, response.client, response.id);
        let query = query_with_response(&zone, RDType::Ds, response);

        let mut neg = dnssec_analysis_domain::NegativeResponseInfo::new(zone.clone(), RDType::Ds);
        neg.witnesses.insert(witness);

        let (_statuses, errors) = validate_negative_response(&neg, &query, false, &zone, 0, &algos, &RingOracle, &index);
        assert!(errors.iter().any(|e| matches!(e.kind, ErrorKind::MissingSoaForNodata)));
    }

    #[test]
    fn nodata_upward_referral_is_not_missing_soa() {
        let zone = Name::new("example.com");
        let na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);
        let index = DnskeyIndex::build(&na);
        let algos = AlgorithmOracle::new(None, None);

        let mut response = do_response(1, 1);
        response.is_upward_referral = true;
        let witness = Witness::new(response.server, response.client, response.id);
        let query = query_with_response(&zone, RDType::Ds, response);

        let mut neg = dnssec_analysis_domain::NegativeResponseInfo::new(zone.clone(), RDType::Ds);
        neg.witnesses.insert(witness);

        let (_statuses, errors) = validate_negative_response(&neg, &query, false, &zone, 0, &algos, &RingOracle, &index);
        assert!(errors.iter().any(|e| matches!(e.kind, ErrorKind::UpwardReferral)));
        assert!(!errors.iter().any(|e| matches!(e.kind, ErrorKind::MissingSoaForNodata)));
    }

    #[test]
    fn soa_owner_mismatch_is_flagged() {
        let zone = Name::new("example.com");
        let na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);
        let index = DnskeyIndex::build(&na);
        let algos = AlgorithmOracle::new(None, None);

        let response = do_response(1, 1);
        let witness = Witness::new(response.server, response.client, response.id);
        let query = query_with_response(&zone, RDType::A, response);

        let mut neg = dnssec_analysis_domain::NegativeResponseInfo::new(zone.clone(), RDType::A);
        neg.witnesses.insert(witness);
        let mut soa = RRsetInfo::new(RRset::new(Name::new("other.com"), RDType::Soa, 3600, vec![]));
        soa.witnesses.insert(witness);
        neg.soa_rrsets.push(soa);

        let (_statuses, errors) = validate_negative_response(&neg, &query, false, &zone, 0, &algos, &RingOracle, &index);
        assert!(errors.iter().any(|e| matches!(e.kind, ErrorKind::SoaOwnerNotZoneForNodata)));
    }

    #[test]
    fn do_requested_nodata_missing_nsec_is_flagged() {
        let zone = Name::new("example.com");
        let na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);
        let index = DnskeyIndex::build(&na);
        let algos = AlgorithmOracle::new(None, None);

        let response = do_response(1, 1);
        let witness = Witness::new(response.server, response.client, response.id);
        let query = query_with_response(&zone, RDType::A, response);

        let mut neg = dnssec_analysis_domain::NegativeResponseInfo::new(zone.clone(), RDType::A);
        neg.witnesses.insert(witness);
        let mut soa = RRsetInfo::new(RRset::new(zone.clone(), RDType::Soa, 3600, vec![]));
        soa.witnesses.insert(witness);
        neg.soa_rrsets.push(soa);

        let (_statuses, errors) = validate_negative_response(&neg, &query, false, &zone, 0, &algos, &RingOracle, &index);
        assert!(errors.iter().any(|e| matches!(e.kind, ErrorKind::MissingNsecForNodata)));
    }

    #[test]
    fn no_do_bit_suppresses_missing_nsec() {
        let zone = Name::new("example.com");
        let na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);
        let index = DnskeyIndex::build(&na);
        let algos = AlgorithmOracle::new(None, None);

        let mut response = do_response(1, 1);
        response.query_edns = None;
        response.response_edns = None;
        let witness = Witness::new(response.server, response.client, response.id);
        let query = query_with_response(&zone, RDType::A, response);

        let mut neg = dnssec_analysis_domain::NegativeResponseInfo::new(zone.clone(), RDType::A);
        neg.witnesses.insert(witness);
        let mut soa = RRsetInfo::new(RRset::new(zone.clone(), RDType::Soa, 3600, vec![]));
        soa.witnesses.insert(witness);
        neg.soa_rrsets.push(soa);

        let (_statuses, errors) = validate_negative_response(&neg, &query, false, &zone, 0, &algos, &RingOracle, &index);
        assert!(!errors.iter().any(|e| matches!(e.kind, ErrorKind::MissingNsecForNodata)));
    }

    #[test]
    fn opt_out_proof_status_carries_rdtype() {
        let zone = Name::new("example.com");
        let na = NameAnalysis::new(zone.clone(), AnalysisType::Authoritative);
        let index = DnskeyIndex::build(&na);
        let algos = AlgorithmOracle::new(None, None);

        let response = do_response(1, 1);
        let witness = Witness::new(response.server, response.client, response.id);
        let query = query_with_response(&zone, RDType::Ds, response);

        let mut neg = dnssec_analysis_domain::NegativeResponseInfo::new(zone.clone(), RDType::Ds);
        neg.witnesses.insert(witness);
        let mut covering = RRsetInfo::new(RRset::new(
            zone.clone(),
            RDType::Nsec3,
            3600,
            vec![Rdata::Nsec3(dnssec_analysis_domain::Nsec3Data {
                hash_algorithm: 1,
                opt_out: true,
                iterations: 0,
                salt: vec![],
                next_hashed_owner: vec![0xFF; 20],
                types_present: vec![],
            })],
        ));
        covering.witnesses.insert(witness);
        neg.nsec_sets.push(NsecSetInfo::nsec3(vec![covering], 0, vec![], 1, true));

        let (statuses, _errors) = validate_negative_response(&neg, &query, false, &zone, 0, &algos, &RingOracle, &index);
        assert_eq!(statuses[0].rdtype, RDType::Ds);
        assert!(statuses[0].opt_out);
    }
}
