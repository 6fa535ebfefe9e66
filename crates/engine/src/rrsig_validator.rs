use crate::wire::rrsig_signed_bytes;
use dnssec_analysis_domain::{
    DnskeyMeta, ErrorInfo, ErrorKind, Name, RrsigStatus, Severity, TemporalValidity, ValidationStatus, RRSIG, RRset,
    RRsetInfo,
};
use dnssec_analysis_oracle::{AlgorithmOracle, CryptoOracle, CryptoVerdict};

/// C3: validates one `(rrset, rrsig, candidate dnskey)` triple against
/// the ordered decision list — applicability, algorithm support,
/// temporal validity, signer/labels sanity, then cryptographic
/// verification through the oracle. Each step returns as soon as a
/// verdict is reached; later steps never run once an earlier one has
/// decided the outcome.
pub fn validate_rrsig(
    rrset: &RRset,
    rrsig: &RRSIG,
    dnskey: &DnskeyMeta,
    zone: &Name,
    analysis_end: i64,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) -> RrsigStatus {
    let dnskey_key_tag = Some(dnskey.key_tag);

    if rrsig.type_covered != rrset.rdtype {
        return RrsigStatus {
            dnskey_key_tag,
            status: ValidationStatus::Indeterminate,
        };
    }

    if !algos.supports_dnssec_algorithm(rrsig.algorithm) || dnskey.algorithm != rrsig.algorithm {
        return RrsigStatus {
            dnskey_key_tag,
            status: ValidationStatus::AlgUnsupported,
        };
    }

    if !dnskey.matches_key_tag(rrsig.key_tag) {
        return RrsigStatus {
            dnskey_key_tag,
            status: ValidationStatus::KeyUnavailable,
        };
    }

    // The signer must be the zone apex or an ancestor of the signed
    // owner name; a signer below the owner (or unrelated to it) can
    // never be a legitimate signature.
    if &rrsig.signer_name != zone || !rrset.owner.is_subdomain_of(&rrsig.signer_name) {
        return RrsigStatus {
            dnskey_key_tag,
            status: ValidationStatus::InvalidSignature,
        };
    }

    // RFC 4034 §3.1.3: labels must not exceed the owner's own label
    // count (a larger value would only be valid as a wildcard
    // expansion, which the caller resolves before reaching here).
    if rrsig.labels as usize > rrset.owner.label_count() {
        return RrsigStatus {
            dnskey_key_tag,
            status: ValidationStatus::InvalidSignature,
        };
    }

    match rrsig.is_temporally_valid(analysis_end) {
        TemporalValidity::Expired => {
            return RrsigStatus {
                dnskey_key_tag,
                status: ValidationStatus::Expired,
            }
        }
        TemporalValidity::Premature => {
            return RrsigStatus {
                dnskey_key_tag,
                status: ValidationStatus::Premature,
            }
        }
        TemporalValidity::Valid => {}
    }

    let signed_bytes = rrsig_signed_bytes(rrset, rrsig);
    let status = match crypto.verify(&signed_bytes, &rrsig.signature, rrsig.algorithm, &dnskey.public_key) {
        CryptoVerdict::Valid => ValidationStatus::Valid,
        CryptoVerdict::Invalid => ValidationStatus::InvalidSignature,
        CryptoVerdict::Unsupported => ValidationStatus::AlgUnsupported,
    };

    RrsigStatus { dnskey_key_tag, status }
}

/// Validates `rrsig` against every DNSKEY the index considers
/// applicable (matching key tag/algorithm), keeping the best verdict
/// per C3's "prefer valid, else invalid, else indeterminate" rule.
pub fn validate_rrsig_against_index<'a>(
    rrset: &RRset,
    rrsig: &RRSIG,
    candidates: impl Iterator<Item = &'a DnskeyMeta>,
    zone: &Name,
    analysis_end: i64,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) -> RrsigStatus {
    let candidates: Vec<RrsigStatus> = candidates
        .map(|dnskey| validate_rrsig(rrset, rrsig, dnskey, zone, analysis_end, algos, crypto))
        .collect();

    // No candidate DNSKEY at all (e.g. an unsigned zone) is the
    // "else indeterminate" tail of C3's preference rule, not a
    // judgment that the signature is invalid or unsupported.
    dnssec_analysis_domain::best_of(candidates).unwrap_or(RrsigStatus {
        dnskey_key_tag: None,
        status: ValidationStatus::Indeterminate,
    })
}

/// §4.3 neighbor check, exercised by the "algorithm rollover gap"
/// scenario (§8): a zone advertising DNSKEYs for several algorithms
/// should carry an RRSIG for each of them over every RRset it signs.
/// Flags one `MissingRrsigForAlgDnskey` per algorithm with no covering
/// RRSIG, attributed to every witness that observed the RRset.
pub fn check_algorithm_coverage(rrset_info: &RRsetInfo, zone_algorithms: &[u8]) -> Vec<ErrorInfo> {
    let covered: std::collections::BTreeSet<u8> = rrset_info.rrsigs.iter().map(|r| r.algorithm).collect();
    zone_algorithms
        .iter()
        .filter(|alg| !covered.contains(alg))
        .map(|alg| {
            ErrorInfo::new(
                ErrorKind::MissingRrsigForAlgDnskey { algorithm: *alg },
                Severity::Error,
                rrset_info.witnesses.clone(),
            )
        })
        .collect()
}
