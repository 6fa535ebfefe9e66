use dnssec_analysis_domain::{Name, NegativeProofStatus, NodeColor, RDType, RrsetStatus, ValidationStatus};

/// C8's one external collaborator: the trust-chain graph (built and
/// rendered elsewhere, §1's explicit Non-goal) pinned down to only the
/// shape the colorer needs — a node's resolved color, and which of a
/// zone's DNSKEYs anchor secure delegations into it.
pub trait TrustGraph {
    fn node_color(&self, name: &Name) -> NodeColor;
    fn secure_dnskey_tags(&self, name: &Name) -> &std::collections::HashSet<u16>;
}

/// Rule 1: an RRset's final status follows its zone's trust-graph color
/// for every color except `Secure`, where the RRset's own cryptographic
/// status additionally has to be `Valid` — a secure zone with a stray,
/// improperly signed RRset is still `Bogus`, not `Secure`.
pub fn color_rrset(zone_color: NodeColor, best_rrsig_status: ValidationStatus) -> RrsetStatus {
    match zone_color {
        NodeColor::Insecure => RrsetStatus::Insecure,
        NodeColor::Bogus => RrsetStatus::Bogus,
        NodeColor::Secure => match best_rrsig_status {
            ValidationStatus::Valid => RrsetStatus::Secure,
            _ => RrsetStatus::Bogus,
        },
    }
}

/// Rule 2: a negative (NXDOMAIN/NODATA/wildcard) proof colors the same
/// way, but a secure zone's successfully-proven absence resolves to
/// `NonExistent` rather than `Secure` — there is no RRset to be secure
/// about, only a proof that one doesn't exist.
pub fn color_negative_proof(zone_color: NodeColor, proof: &NegativeProofStatus) -> RrsetStatus {
    match zone_color {
        NodeColor::Insecure => RrsetStatus::Insecure,
        NodeColor::Bogus => RrsetStatus::Bogus,
        NodeColor::Secure => {
            if proof.status == ValidationStatus::Valid || is_opt_out_secure(proof) {
                RrsetStatus::NonExistent
            } else {
                RrsetStatus::Bogus
            }
        }
    }
}

/// Rule 3: an NSEC3 opt-out range can't cryptographically prove the
/// absence of a specific name's DS record, by design (RFC 5155 §7.1) —
/// that is itself the secure outcome, not a validation failure.
pub fn is_opt_out_secure(proof: &NegativeProofStatus) -> bool {
    proof.use_nsec3 && proof.opt_out && proof.status != ValidationStatus::Valid
}

/// Rule 4: at least one SOA covering a negative response must validate
/// for the negative proof to count as secure at all, independent of
/// the NSEC/NSEC3 coverage itself.
pub fn gate_secure_soa(soa_statuses: &[ValidationStatus]) -> bool {
    soa_statuses.iter().any(|s| *s == ValidationStatus::Valid)
}

/// Rule 5: a validated denial of a DS record at an otherwise-INSECURE
/// delegation upgrades it to SECURE — the proof that no DS exists is
/// itself an authenticated fact, so "insecure because no DS" and
/// "secure because we proved no DS" collapse to the same node color.
/// Only a DS-typed proof qualifies; any other rdtype leaves the color
/// untouched.
pub fn color_ds_negative_response(zone_color: NodeColor, proof: &NegativeProofStatus) -> NodeColor {
    if proof.rdtype != RDType::Ds {
        return zone_color;
    }
    let denial_is_secure = proof.status == ValidationStatus::Valid || is_opt_out_secure(proof);
    match zone_color {
        NodeColor::Insecure if denial_is_secure => NodeColor::Secure,
        other => other,
    }
}

/// Rule 6: a DNSKEY negative response observed at a SECURE node is a
/// contradiction — a zone can't both self-sign its DNSKEY RRset and
/// have no DNSKEY RRset — so it downgrades the zone to BOGUS. Callers
/// apply the result to the zone's SOA RRsetInfos as well, since the SOA
/// can't outrank the zone it lives in.
pub fn color_dnskey_negative_response(zone_color: NodeColor, proof: &NegativeProofStatus) -> NodeColor {
    if proof.rdtype != RDType::Dnskey {
        return zone_color;
    }
    match zone_color {
        NodeColor::Secure => NodeColor::Bogus,
        other => other,
    }
}

/// Rule 7: a node's color is the worst color among every path that
/// could secure it — `Bogus` beats `Insecure` beats `Secure` — so one
/// broken signing path poisons an otherwise-secure delegation.
pub fn aggregate_node_color(candidates: impl IntoIterator<Item = NodeColor>) -> NodeColor {
    candidates
        .into_iter()
        .max_by_key(|c| match c {
            NodeColor::Secure => 0,
            NodeColor::Insecure => 1,
            NodeColor::Bogus => 2,
        })
        .unwrap_or(NodeColor::Insecure)
}
