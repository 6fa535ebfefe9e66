//! Error taxonomy (§7). Almost all of these are *data* attached to the
//! artifact that produced them — the traversal never unwinds on a
//! protocol or DNSSEC-semantic problem, it just records one more
//! `ErrorInfo`/`WarningInfo`. `EngineError` is reserved for the single
//! programmer-reachable failure the spec calls out: an unclassified,
//! non-empty responsive-cause, which signals a missed case in the
//! response classifier rather than a fact about the DNS data.

use crate::witness::{Witness, WitnessSet};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("unclassified responsive cause observed at witness {0:?}")]
    UnclassifiedResponsiveCause(Witness),

    #[error("re-entry at a stricter traversal level than an already-populated status")]
    LevelRegression,
}

/// Whether an `ErrorInfo`/`WarningInfo` should surface under a given
/// log-level filter in the serializer (§4.9, §6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// §7 taxonomy. One variant per named error/warning kind; each carries
/// exactly the fields the spec lists for it plus its witness set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail")]
pub enum ErrorKind {
    // --- Transport ---
    NetworkError,
    Timeout { attempts: u32 },
    FormError,
    UnknownResponseError,
    InvalidRcode { rcode: u8 },

    // --- EDNS ---
    EdnsIgnored,
    UnsupportedEdnsVersion { version: u8 },
    PmtuExceeded,
    ResponseErrorWithEdns,
    ResponseErrorWithEdnsFlag { flag_bit: u8 },

    // --- Authority ---
    NotAuthoritative,
    RecursionNotAvailable,
    UpwardReferral,

    // --- DNSSEC proof ---
    MissingRrsig,
    MissingRrsigForAlgDnskey { algorithm: u8 },
    MissingRrsigForAlgDs { algorithm: u8 },
    MissingRrsigForAlgDlv { algorithm: u8 },
    UnableToRetrieveDnssecRecords,

    // --- Negative proof ---
    MissingNsecForNxdomain,
    MissingNsecForNodata,
    MissingNsecForWildcard,
    SoaOwnerNotZoneForNxdomain,
    SoaOwnerNotZoneForNodata,
    MissingSoaForNxdomain,
    MissingSoaForNodata,
    InconsistentNxdomain,

    // --- Delegation ---
    NoSep,
    MissingSepForAlg { algorithm: u8 },
    NsNameNotInParent { name: String },
    NsNameNotInChild { name: String },
    GlueMismatchError { name: String },
    MissingGlueForNsName { name: String },
    NoAddressForNsName { name: String },
    ErrorResolvingNsName { name: String },
    NoNsAddressesForIpv4,
    NoNsAddressesForIpv6,
    NoNsInParent,
    ServerUnresponsiveUdp,
    ServerUnresponsiveTcp,
    ServerInvalidResponse,
    ServerNotAuthoritative,

    // --- Key ---
    RevokedNotSigning,
    DnskeyNotAtZoneApex,
    DnskeyMissingFromServers,
    TrustAnchorNotSigning,

    /// Design Note: the source's "#XXX is there another future reason"
    /// branches, made an explicit, fail-closed sentinel instead of a
    /// guess.
    Unclassified,
}

impl ErrorKind {
    /// §4.4 severity routing: `InvalidResponseError`-subclass kinds are
    /// always warnings; everything else escalates to an error only when
    /// the owning zone is signed (an unsigned zone has no reasonable
    /// expectation of getting any of this right).
    pub fn default_severity(&self, zone_is_signed: bool) -> Severity {
        use ErrorKind::*;
        let is_invalid_response_subclass = matches!(
            self,
            UnknownResponseError
                | InvalidRcode { .. }
                | EdnsIgnored
                | UnsupportedEdnsVersion { .. }
                | PmtuExceeded
                | ResponseErrorWithEdns
                | ResponseErrorWithEdnsFlag { .. }
                | ServerInvalidResponse
        );
        if is_invalid_response_subclass {
            return Severity::Warning;
        }
        if zone_is_signed {
            Severity::Error
        } else {
            Severity::Warning
        }
    }
}

/// One error or warning attached to an artifact, plus the witnesses
/// that motivated it (Testable Property 6: witness locality).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorInfo {
    pub kind: ErrorKind,
    pub severity: Severity,
    pub witnesses: WitnessSet,
    /// `true` for a condition observed inconsistently across witnesses
    /// (§4.4: "intermittent iff another EDNS query to the same server
    /// succeeded").
    pub intermittent: bool,
}

impl ErrorInfo {
    pub fn new(kind: ErrorKind, severity: Severity, witnesses: WitnessSet) -> Self {
        Self {
            kind,
            severity,
            witnesses,
            intermittent: false,
        }
    }

    pub fn intermittent(mut self, intermittent: bool) -> Self {
        self.intermittent = intermittent;
        self
    }
}
