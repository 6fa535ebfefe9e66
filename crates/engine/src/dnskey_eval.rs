use crate::dnskey_index::DnskeyIndex;
use dnssec_analysis_domain::{
    AnalysisConfig, ErrorInfo, ErrorKind, NameAnalysis, RDType, Severity, ValidationStatus, WitnessSet,
};
use std::collections::BTreeSet;

/// §4.7 step 12: evaluates the zone's own DNSKEY RRset for the four
/// key-level problems a self-signed keyset can have, none of which a
/// per-RRSIG validation pass on its own surfaces: a revoked key that
/// never re-proves itself, a key observed somewhere other than the
/// zone apex, a key some authoritative servers never served, and a
/// configured trust anchor the zone no longer signs with.
pub fn evaluate_dnskey_records(na: &NameAnalysis, index: &DnskeyIndex, cfg: &AnalysisConfig) -> Vec<ErrorInfo> {
    let mut errors = Vec::new();
    if index.is_empty() {
        return errors;
    }

    // RFC 5011 key tags that actually produced a validated
    // self-signature over this zone's own DNSKEY RRset, derived from
    // the RRSIG validation the walker already ran rather than from the
    // SEP flag, which is advisory and not required to be accurate.
    let self_signing_tags: BTreeSet<u16> = na
        .status
        .rrsig_status
        .borrow()
        .iter()
        .filter(|(key, status)| key.owner == na.name && key.rdtype == RDType::Dnskey && status.status == ValidationStatus::Valid)
        .filter_map(|(_, status)| status.dnskey_key_tag)
        .collect();

    let Some(query) = na.query(&na.name, RDType::Dnskey) else {
        return errors;
    };

    let mut all_witnesses = WitnessSet::new();
    for rrset_info in &query.answer_info {
        all_witnesses.extend(rrset_info.witnesses.iter().copied());
        if rrset_info.rrset.owner != na.name {
            errors.push(ErrorInfo::new(
                ErrorKind::DnskeyNotAtZoneApex,
                Severity::Error,
                rrset_info.witnesses.clone(),
            ));
        }
    }

    for key in index.all_keys() {
        if key.is_revoked() && !self_signing_tags.contains(&key.key_tag) {
            errors.push(ErrorInfo::new(ErrorKind::RevokedNotSigning, Severity::Error, key.servers_clients.clone()));
        }

        let missing_from: WitnessSet = all_witnesses.difference(&key.servers_clients).copied().collect();
        if !missing_from.is_empty() {
            errors.push(ErrorInfo::new(ErrorKind::DnskeyMissingFromServers, Severity::Warning, missing_from));
        }
    }

    for anchor in &cfg.trust_anchors {
        if anchor.zone != na.name.to_string() {
            continue;
        }
        if index.lookup(anchor.key_tag).is_some() && !self_signing_tags.contains(&anchor.key_tag) {
            errors.push(ErrorInfo::new(ErrorKind::TrustAnchorNotSigning, Severity::Error, WitnessSet::new()));
        }
    }

    errors
}
