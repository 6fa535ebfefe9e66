use crate::dnskey_index::DnskeyIndex;
use crate::wire::dnskey_digest_bytes;
use dnssec_analysis_domain::{
    best_of, DelegationStatus, DsData, DsStatus, ErrorInfo, ErrorKind, Name, RRsetInfo, Severity, ValidationStatus,
    WitnessSet,
};
use dnssec_analysis_oracle::{AlgorithmOracle, CryptoOracle};
use std::collections::BTreeMap;
use std::net::IpAddr;

/// C6: validates every DS rdata observed at the parent against the
/// child zone's DNSKEY index, recomputing the digest through the
/// crypto oracle rather than trusting the collector.
pub fn validate_ds_records(
    ds_rrsets: &[RRsetInfo],
    child_zone: &Name,
    child_dnskeys: &DnskeyIndex,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) -> Vec<DsStatus> {
    let mut statuses = Vec::new();
    for rrset_info in ds_rrsets {
        for rdata in &rrset_info.rrset.rdatas {
            let dnssec_analysis_domain::Rdata::Ds(ds) = rdata else {
                continue;
            };
            statuses.push(validate_one_ds(ds, child_zone, child_dnskeys, algos, crypto));
        }
    }
    statuses
}

fn validate_one_ds(
    ds: &DsData,
    child_zone: &Name,
    child_dnskeys: &DnskeyIndex,
    algos: &AlgorithmOracle,
    crypto: &dyn CryptoOracle,
) -> DsStatus {
    if !algos.supports_dnssec_algorithm(ds.algorithm) {
        return DsStatus {
            ds_key_tag: ds.key_tag,
            algorithm: ds.algorithm,
            dnskey_key_tag: None,
            digest_algorithm_unsupported: false,
            status: ValidationStatus::AlgUnsupported,
        };
    }
    if !algos.supports_digest_algorithm(ds.digest_type) {
        return DsStatus {
            ds_key_tag: ds.key_tag,
            algorithm: ds.algorithm,
            dnskey_key_tag: None,
            digest_algorithm_unsupported: true,
            status: ValidationStatus::AlgUnsupported,
        };
    }

    let candidates: Vec<DsStatus> = child_dnskeys
        .lookup_applicable(ds.key_tag, ds.algorithm)
        .map(|dnskey| {
            let digest_input = dnskey_digest_bytes(child_zone, dnskey.flags, dnskey.protocol, dnskey.algorithm, &dnskey.public_key);
            let status = match crypto.digest(ds.digest_type, &digest_input) {
                Some(computed) if computed == ds.digest => ValidationStatus::Valid,
                Some(_) => ValidationStatus::InvalidDigest,
                None => ValidationStatus::AlgUnsupported,
            };
            DsStatus {
                ds_key_tag: ds.key_tag,
                algorithm: ds.algorithm,
                dnskey_key_tag: Some(dnskey.key_tag),
                digest_algorithm_unsupported: false,
                status,
            }
        })
        .collect();

    best_of(candidates).unwrap_or(DsStatus {
        ds_key_tag: ds.key_tag,
        algorithm: ds.algorithm,
        dnskey_key_tag: None,
        digest_algorithm_unsupported: false,
        status: ValidationStatus::KeyUnavailable,
    })
}

/// The facts `resolve_delegation_status` needs beyond the DS validation
/// results themselves, gathered in one place because they come from
/// several different corners of the walker (the parent's own DNSKEY
/// index, the child zone's collected responses, the DS-denial proof).
/// A named struct reads better here than a run of positional bools.
#[derive(Debug, Clone, Copy, Default)]
pub struct DelegationContext {
    /// Whether at least one DS-validated key also carries a valid
    /// self-signature over the child's own DNSKEY RRset (C3, run by the
    /// walker before calling in here).
    pub sep_self_signature_valid: bool,
    pub parent_has_ns_for_child: bool,
    /// The parent itself never answered (transport failure, "whole
    /// chain dark to us"), as distinct from `zone_responsive` below.
    pub parent_unresponsive: bool,
    /// Whether the child zone has at least one collected response that
    /// answered authoritatively without error. A zone with *no*
    /// collected responses at all (nothing to judge) counts as
    /// responsive by default; only an observed, exclusively-bad set of
    /// responses degrades the delegation to LAME.
    pub zone_responsive: bool,
    /// Whether the parent zone itself is signed (has a non-empty DNSKEY
    /// RRset) — gates whether "no DS observed" means INSECURE or BOGUS.
    pub parent_zone_signed: bool,
    /// Whether the parent's NODATA response to the DS query carries a
    /// validated (or opt-out-secure) denial-of-existence proof.
    pub ds_denial_proof_valid: bool,
}

/// §4.6's five-way resolved delegation status. `ds_statuses` is the
/// output of `validate_ds_records`; everything else needed to resolve
/// it is carried on `ctx`.
pub fn resolve_delegation_status(ds_statuses: &[DsStatus], ctx: &DelegationContext) -> DelegationStatus {
    if ctx.parent_unresponsive {
        return DelegationStatus::Incomplete;
    }
    if !ctx.parent_has_ns_for_child {
        return DelegationStatus::Incomplete;
    }
    if !ctx.zone_responsive {
        return DelegationStatus::Lame;
    }
    if ds_statuses.is_empty() {
        // No DS record observed at all. If the parent itself isn't
        // signed there is nothing to have proven, so the chain just
        // ends here, unsecured. If the parent *is* signed, the absence
        // needs its own authenticated denial (NSEC/NSEC3 over the DS
        // query) or the delegation is an unproven gap, not a clean one.
        return if !ctx.parent_zone_signed || ctx.ds_denial_proof_valid {
            DelegationStatus::Insecure
        } else {
            DelegationStatus::Bogus
        };
    }

    // A DS RRset with no record in a supported algorithm is "whole
    // chain dark to us", not evidence of tampering: the validator
    // simply can't evaluate any of them, so this reads as INSECURE
    // rather than BOGUS, same as no DS at all.
    let any_supported_alg = ds_statuses.iter().any(|s| s.status != ValidationStatus::AlgUnsupported);
    if !any_supported_alg {
        return DelegationStatus::Insecure;
    }

    let any_valid = ds_statuses.iter().any(|s| s.status == ValidationStatus::Valid);
    if any_valid && ctx.sep_self_signature_valid {
        DelegationStatus::Secure
    } else {
        DelegationStatus::Bogus
    }
}

/// Per-nameserver facts the NS-name sanity checks need: resolved vs.
/// glue addresses, whether resolution failed outright, and whether the
/// server answered authoritatively over each transport. Supplied by
/// the collector; the engine only compares them.
#[derive(Debug, Clone, Default)]
pub struct NsServerFacts {
    pub resolved_addresses: std::collections::BTreeSet<IpAddr>,
    pub glue_addresses: std::collections::BTreeSet<IpAddr>,
    pub resolution_failed: bool,
    pub responsive_udp: bool,
    pub responsive_tcp: bool,
    pub authoritative: bool,
}

/// NS-name sanity checks (§4.6): every NS name delegated by the parent
/// should also be served by the child, and vice versa, and every name
/// that is supposed to be authoritative for the zone should actually
/// resolve, have matching glue, and answer authoritatively.
pub fn check_ns_names(parent_ns: &[Name], child_ns: &[Name], facts: &BTreeMap<Name, NsServerFacts>) -> Vec<ErrorInfo> {
    let mut errors = Vec::new();
    for name in parent_ns {
        if !child_ns.contains(name) {
            errors.push(ErrorInfo::new(
                ErrorKind::NsNameNotInChild { name: name.to_string() },
                Severity::Warning,
                WitnessSet::new(),
            ));
        }
    }
    for name in child_ns {
        if !parent_ns.contains(name) {
            errors.push(ErrorInfo::new(
                ErrorKind::NsNameNotInParent { name: name.to_string() },
                Severity::Warning,
                WitnessSet::new(),
            ));
        }
    }

    let mut any_ipv4 = false;
    let mut any_ipv6 = false;

    for name in parent_ns.iter().chain(child_ns) {
        let Some(server_facts) = facts.get(name) else {
            continue;
        };

        if server_facts.resolution_failed {
            errors.push(error(ErrorKind::ErrorResolvingNsName { name: name.to_string() }));
            continue;
        }

        if server_facts.resolved_addresses.is_empty() && server_facts.glue_addresses.is_empty() {
            errors.push(error(ErrorKind::NoAddressForNsName { name: name.to_string() }));
            continue;
        }

        if !server_facts.glue_addresses.is_empty() && server_facts.glue_addresses != server_facts.resolved_addresses {
            if server_facts.resolved_addresses.is_empty() {
                errors.push(error(ErrorKind::MissingGlueForNsName { name: name.to_string() }));
            } else {
                errors.push(error(ErrorKind::GlueMismatchError { name: name.to_string() }));
            }
        }

        if !server_facts.responsive_udp {
            errors.push(error(ErrorKind::ServerUnresponsiveUdp));
        }
        if !server_facts.responsive_tcp {
            errors.push(error(ErrorKind::ServerUnresponsiveTcp));
        }
        if !server_facts.authoritative {
            errors.push(error(ErrorKind::ServerNotAuthoritative));
        }

        any_ipv4 |= server_facts.resolved_addresses.iter().any(IpAddr::is_ipv4);
        any_ipv6 |= server_facts.resolved_addresses.iter().any(IpAddr::is_ipv6);
    }

    if !facts.is_empty() {
        if !any_ipv4 {
            errors.push(error(ErrorKind::NoNsAddressesForIpv4));
        }
        if !any_ipv6 {
            errors.push(error(ErrorKind::NoNsAddressesForIpv6));
        }
    }

    errors
}

fn error(kind: ErrorKind) -> ErrorInfo {
    ErrorInfo::new(kind, Severity::Warning, WitnessSet::new())
}
