use crate::colorer;
use crate::delegation::{self, DelegationContext};
use crate::dnskey_eval;
use crate::dnskey_index::{self, DnskeyIndex};
use crate::negative_response;
use crate::response_classifier;
use crate::rrsig_validator::{check_algorithm_coverage, validate_rrsig_against_index};
use dnssec_analysis_domain::{
    AnalysisConfig, DelegationStatus, DsStatus, ErrorInfo, ErrorKind, Name, NameStatus, RDType, ResponsiveCause,
    RrsigStatusKey, Severity, TraversalLevel, ValidationStatus, WitnessSet,
};
use dnssec_analysis_oracle::{AlgorithmOracle, CryptoOracle};
use std::collections::HashSet;
use std::rc::Rc;

/// C7: the memoized, cycle-safe traversal that populates every status
/// map on one `NameAnalysis` and recurses into its dependencies to the
/// requested depth (§4.7's 12-step pseudocode). `trace` breaks cycles
/// within a single call stack (CNAME/NS/signer loops, §3 invariant);
/// `StatusStore::mark_populated` makes repeat calls at an
/// already-satisfied level a no-op (§5 re-entry semantics).
pub fn populate_status(
    na: &Rc<dnssec_analysis_domain::NameAnalysis>,
    level: TraversalLevel,
    trace: &mut HashSet<Name>,
    cfg: &AnalysisConfig,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) {
    if na.status.is_populated_at(level) {
        return;
    }
    if !trace.insert(na.name.clone()) {
        tracing::debug!(name = %na.name, "cycle detected, skipping re-entry");
        return;
    }

    let analysis_end = cfg.resolved_analysis_end();

    // Step 1-2: build the DNSKEY index and validate every same-name RRSIG.
    let dnskey_index = DnskeyIndex::build(na);
    let zone_is_signed = !dnskey_index.is_empty();
    let zone_algorithms: Vec<u8> = dnskey_index.all_keys().map(|k| k.algorithm).collect();

    for query in na.queries.values() {
        for rrset_info in &query.answer_info {
            if zone_is_signed {
                let missing = check_algorithm_coverage(rrset_info, &zone_algorithms);
                na.status.key_errors.borrow_mut().extend(missing);
            }

            // The zone's own DNSKEY RRset is special-cased: a
            // self-signature must come from a key actually published in
            // *this* answer, not merely one observed for the same owner
            // name in some other collected answer (e.g. a stale keyset
            // still sitting in the flattened index after a rollover).
            let is_apex_dnskey_answer = rrset_info.rrset.rdtype == RDType::Dnskey && rrset_info.rrset.owner == na.name;
            let apex_candidates = is_apex_dnskey_answer.then(|| dnskey_index::dnskey_metas_in_answer(&na.name, rrset_info));

            for rrsig in &rrset_info.rrsigs {
                let status = if let Some(candidates) = &apex_candidates {
                    validate_rrsig_against_index(
                        &rrset_info.rrset,
                        rrsig,
                        candidates.iter().filter(|k| k.algorithm == rrsig.algorithm && k.matches_key_tag(rrsig.key_tag)),
                        &na.name,
                        analysis_end,
                        algos,
                        crypto,
                    )
                } else {
                    let candidates = dnskey_index.lookup_applicable(rrsig.key_tag, rrsig.algorithm);
                    validate_rrsig_against_index(&rrset_info.rrset, rrsig, candidates, &na.name, analysis_end, algos, crypto)
                };
                let key = RrsigStatusKey {
                    owner: rrset_info.rrset.owner.clone(),
                    rdtype: rrset_info.rrset.rdtype,
                    rrsig_key_tag: rrsig.key_tag,
                    signer: rrsig.signer_name.clone(),
                };
                na.status.rrsig_status.borrow_mut().insert(key, status);
            }
        }

        // Step 3: classify every collected response's transport/EDNS facts.
        for instance in &query.queries {
            for response in instance.all_responses() {
                let errors = response_classifier::classify(response, zone_is_signed);
                na.status.key_errors.borrow_mut().extend(errors);
            }
        }
    }

    // Step 4: name existence status.
    let name_status = resolve_name_status(na);
    *na.status.name_status.borrow_mut() = Some(name_status);

    // Step 5: negative-response proofs (NODATA/NXDOMAIN), keyed by
    // rdtype, plus wildcard-expansion denial proofs.
    for query in na.queries.values() {
        for neg in &query.nodata_info {
            let (statuses, errors) =
                negative_response::validate_negative_response(neg, query, false, &na.name, analysis_end, algos, crypto, &dnskey_index);
            na.status.key_errors.borrow_mut().extend(errors);
            na.status.nodata_status.borrow_mut().insert(query.rdtype, statuses);
        }
        for neg in &query.nxdomain_info {
            let (statuses, errors) =
                negative_response::validate_negative_response(neg, query, true, &na.name, analysis_end, algos, crypto, &dnskey_index);
            na.status.key_errors.borrow_mut().extend(errors);
            na.status.nxdomain_status.borrow_mut().insert(query.rdtype, statuses);
        }
        for rrset_info in &query.answer_info {
            if rrset_info.wildcard_info.is_empty() {
                continue;
            }
            let (statuses, errors) =
                negative_response::validate_wildcard_proofs(rrset_info, query, &na.name, analysis_end, algos, crypto, &dnskey_index);
            na.status.key_errors.borrow_mut().extend(errors);
            na.status.wildcard_status.borrow_mut().insert(rrset_info.rrset.owner.clone(), statuses);
        }
    }

    // Step 6: cross-check NXDOMAIN against sibling NOERROR answers.
    let inconsistencies = negative_response::check_nxdomain_consistency(na.queries.values());
    na.status.key_errors.borrow_mut().extend(inconsistencies);

    // Step 7: store the DNSKEY index snapshot for the serializer.
    *na.status.dnskey_index.borrow_mut() = Some(dnskey_index.snapshot());

    // Step 8-9: delegation evaluation, only meaningful below the root.
    if let Some(parent) = na.parent_rc() {
        evaluate_delegation_from_parent(na, &parent, &dnskey_index, analysis_end, algos, crypto);
    }

    // Step 12: evaluate the zone's own DNSKEY RRset for revocation,
    // apex, server-coverage, and trust-anchor problems.
    let key_errors = dnskey_eval::evaluate_dnskey_records(na, &dnskey_index, cfg);
    na.status.key_errors.borrow_mut().extend(key_errors);

    na.status.mark_populated(level);
    trace.remove(&na.name);

    if level >= TraversalLevel::SecureDelegation {
        recurse_into_lineage(na, level, trace, cfg, algos, crypto);
    }
    if level >= TraversalLevel::NsTarget {
        recurse_into_dependents(na, level, trace, cfg, algos, crypto);
    }
}

fn resolve_name_status(na: &dnssec_analysis_domain::NameAnalysis) -> NameStatus {
    let mut saw_nxdomain = false;
    let mut saw_answer = false;
    for query in na.queries.values() {
        if !query.nxdomain_info.is_empty() {
            saw_nxdomain = true;
        }
        if !query.answer_info.is_empty() || !query.nodata_info.is_empty() {
            saw_answer = true;
        }
    }
    match (saw_nxdomain, saw_answer) {
        (true, false) => NameStatus::NxDomain,
        (_, true) => NameStatus::NoError,
        (false, false) => NameStatus::Indeterminate,
    }
}

/// Whether the zone has at least one collected response that answered
/// authoritatively without error. A zone with *no* collected responses
/// at all (nothing was ever gathered for it, e.g. a fixture that only
/// populates its parent) counts as responsive by default; only an
/// observed, exclusively-bad response set degrades a delegation to
/// LAME.
fn zone_is_responsive(na: &dnssec_analysis_domain::NameAnalysis) -> bool {
    let mut saw_any_response = false;
    let mut saw_good_response = false;
    for query in na.queries.values() {
        for instance in &query.queries {
            for response in instance.all_responses() {
                saw_any_response = true;
                if response.authoritative && matches!(response.responsive_cause, ResponsiveCause::None) {
                    saw_good_response = true;
                }
            }
        }
    }
    !saw_any_response || saw_good_response
}

fn evaluate_delegation_from_parent(
    na: &dnssec_analysis_domain::NameAnalysis,
    parent: &dnssec_analysis_domain::NameAnalysis,
    child_dnskeys: &DnskeyIndex,
    analysis_end: i64,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) {
    let ds_query = parent.query(&na.name, RDType::Ds);

    // A parent that answers NXDOMAIN to the DS/DLV query has no NS
    // entry for the child at all; the delegation can't be evaluated
    // further.
    if ds_query.is_some_and(|q| !q.nxdomain_info.is_empty()) {
        *na.status.delegation_status.borrow_mut() = Some(DelegationStatus::Incomplete);
        na.status
            .key_errors
            .borrow_mut()
            .push(ErrorInfo::new(ErrorKind::NoNsInParent, Severity::Error, WitnessSet::new()));
        return;
    }

    let ds_rrsets: Vec<_> = ds_query.map(|q| q.answer_info.clone()).unwrap_or_default();
    let ds_statuses: Vec<DsStatus> = delegation::validate_ds_records(&ds_rrsets, &na.name, child_dnskeys, algos, crypto);

    let sep_self_signature_valid = na.status.rrsig_status.borrow().iter().any(|(key, status)| {
        key.rdtype == RDType::Dnskey
            && status.status == ValidationStatus::Valid
            && status
                .dnskey_key_tag
                .is_some_and(|tag| child_dnskeys.lookup(tag).is_some_and(|k| k.is_sep_flagged()))
    });

    let parent_has_ns_for_child = parent.query(&na.name, RDType::Ns).is_some();
    let parent_dnskeys = DnskeyIndex::build(parent);
    let parent_zone_signed = !parent_dnskeys.is_empty();

    let ds_denial_proof_valid = ds_query.is_some_and(|q| {
        q.nodata_info.iter().any(|neg| {
            let (statuses, _errors) =
                negative_response::validate_negative_response(neg, q, false, &parent.name, analysis_end, algos, crypto, &parent_dnskeys);
            statuses.iter().any(|s| s.status == ValidationStatus::Valid || colorer::is_opt_out_secure(s))
        })
    });

    let ctx = DelegationContext {
        sep_self_signature_valid,
        parent_has_ns_for_child,
        parent_unresponsive: false,
        zone_responsive: zone_is_responsive(na),
        parent_zone_signed,
        ds_denial_proof_valid,
    };

    let delegation_status = delegation::resolve_delegation_status(&ds_statuses, &ctx);
    *na.status.delegation_status.borrow_mut() = Some(delegation_status);
    for status in ds_statuses {
        na.status.ds_status.borrow_mut().insert(status.algorithm, status);
    }
}

/// §4.7 step 5: the chain of trust runs through the parent (and, when
/// present, the DLV parent) just as much as it does through CNAME/MX/NS
/// dependents, so both must be walked for their own status to be
/// populated.
fn recurse_into_lineage(
    na: &Rc<dnssec_analysis_domain::NameAnalysis>,
    level: TraversalLevel,
    trace: &mut HashSet<Name>,
    cfg: &AnalysisConfig,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) {
    for weak in na.parent.iter().chain(na.dlv_parent.iter()) {
        if let Some(dep) = weak.upgrade() {
            populate_status(&dep, level, trace, cfg, algos, crypto);
        }
    }
}

fn recurse_into_dependents(
    na: &Rc<dnssec_analysis_domain::NameAnalysis>,
    level: TraversalLevel,
    trace: &mut HashSet<Name>,
    cfg: &AnalysisConfig,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) {
    let dependents = na
        .cname_targets
        .values()
        .chain(na.mx_targets.values())
        .chain(na.ns_dependencies.values())
        .chain(na.external_signers.values());

    for weak in dependents {
        if let Some(dep) = weak.upgrade() {
            populate_status(&dep, level, trace, cfg, algos, crypto);
        }
    }
}
