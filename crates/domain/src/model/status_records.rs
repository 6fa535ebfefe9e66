//! Status records (§3 "computed outputs"): `RRSIGStatus`, `DSStatus`,
//! `NSEC[3]Status{Wildcard,NXDOMAIN,NoAnswer}`, `CNAMEFromDNAMEStatus`.
//! Kept in the domain crate (rather than the engine) because §3 lists
//! them as part of the data model the NA owns; the engine crate only
//! supplies the algorithms that populate and consume them.

use crate::model::dnskey::DnskeyMeta;
use crate::name::Name;
use crate::record_type::RDType;
use crate::status::{ValidationStatus, ValidationStatused};

/// Key identifying one signature-verification attempt: which RRset
/// (owner + type), which RRSIG (by key tag + signer), validated
/// against which candidate DNSKEY.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RrsigStatusKey {
    pub owner: Name,
    pub rdtype: RDType,
    pub rrsig_key_tag: u16,
    pub signer: Name,
}

/// RRSIGStatus (§3/§4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RrsigStatus {
    pub dnskey_key_tag: Option<u16>,
    pub status: ValidationStatus,
}

impl ValidationStatused for RrsigStatus {
    fn validation_status(&self) -> ValidationStatus {
        self.status
    }
}

/// DSStatus (§3/§4.6): one DS rdata checked against the candidate
/// DNSKEYs of the matching key tag/algorithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsStatus {
    pub ds_key_tag: u16,
    pub algorithm: u8,
    pub dnskey_key_tag: Option<u16>,
    pub digest_algorithm_unsupported: bool,
    pub status: ValidationStatus,
}

impl ValidationStatused for DsStatus {
    fn validation_status(&self) -> ValidationStatus {
        self.status
    }
}

/// Shared payload for NSEC[3]Status{Wildcard,NXDOMAIN,NoAnswer} (§3):
/// unified behind `use_nsec3`/`opt_out`, consistent with
/// `NsecSetInfo`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NegativeProofStatus {
    pub use_nsec3: bool,
    pub opt_out: bool,
    /// Which query type this proof backs (DS, DNSKEY, ...) — lets a
    /// caller dispatch the §4.8 DS/DNSKEY-specific coloring rules
    /// without re-deriving it from context.
    pub rdtype: RDType,
    pub status: ValidationStatus,
}

impl ValidationStatused for NegativeProofStatus {
    fn validation_status(&self) -> ValidationStatus {
        self.status
    }
}

/// CNAMEFromDNAMEStatus (§3): validity of the DNAME's own RRSIG that
/// backs a synthesized CNAME.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CnameFromDnameStatus {
    pub dname_rrsig_status: ValidationStatus,
}

impl ValidationStatused for CnameFromDnameStatus {
    fn validation_status(&self) -> ValidationStatus {
        self.dname_rrsig_status
    }
}

/// C2's output: the deduplicated, role-classified view of a zone's
/// DNSKEY RRset, stored on the NA once computed (§4.7 step 7/10).
#[derive(Debug, Clone, Default)]
pub struct DnskeyIndexSnapshot {
    pub all_keys: Vec<DnskeyMeta>,
    pub ksks: Vec<u16>,
    pub zsks: Vec<u16>,
    pub published_keys: Vec<u16>,
    pub revoked_keys: Vec<u16>,
    pub potential_trusted_keys: Vec<u16>,
}
