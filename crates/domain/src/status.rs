//! Status and validation-outcome enums (§3 "Status records", §6 constants).
//!
//! The Design Notes call for replacing the source's ad-hoc per-status
//! interfaces with "a tagged variant with a common `validation_status`
//! accessor and a per-variant payload" — that accessor is the
//! `ValidationStatused` trait below; each concrete status type
//! (`RrsigStatus`, `DsStatus`, `NsecProofStatus`, ...) implements it.

use serde::Serialize;
use std::fmt;

/// Fine-grained cryptographic/temporal verdict for one signature or
/// digest check (§3 "Status records").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ValidationStatus {
    Valid,
    InvalidSignature,
    InvalidDigest,
    Expired,
    Premature,
    AlgUnsupported,
    KeyUnavailable,
    Indeterminate,
}

impl ValidationStatus {
    /// Ranking used by C3's "prefer a valid [candidate]; else an
    /// invalid one; else indeterminate" rule, and mirrored by the
    /// negative-response prover's "keep only the VALID ones" pass.
    pub fn rank(self) -> u8 {
        match self {
            ValidationStatus::Valid => 0,
            ValidationStatus::InvalidSignature
            | ValidationStatus::InvalidDigest
            | ValidationStatus::Expired
            | ValidationStatus::Premature => 1,
            ValidationStatus::AlgUnsupported | ValidationStatus::KeyUnavailable => 2,
            ValidationStatus::Indeterminate => 3,
        }
    }

    pub fn is_valid(self) -> bool {
        matches!(self, ValidationStatus::Valid)
    }
}

impl fmt::Display for ValidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ValidationStatus::Valid => "VALID",
            ValidationStatus::InvalidSignature => "INVALID_SIG",
            ValidationStatus::InvalidDigest => "INVALID_DIGEST",
            ValidationStatus::Expired => "EXPIRED",
            ValidationStatus::Premature => "PREMATURE",
            ValidationStatus::AlgUnsupported => "ALG_UNSUPPORTED",
            ValidationStatus::KeyUnavailable => "KEY_UNAVAILABLE",
            ValidationStatus::Indeterminate => "INDETERMINATE",
        };
        write!(f, "{s}")
    }
}

/// Common accessor for every per-artifact status payload (Design Note:
/// "dynamic polymorphism" reshape).
pub trait ValidationStatused {
    fn validation_status(&self) -> ValidationStatus;
}

/// Pick the best of several candidate verdicts: valid beats invalid
/// beats indeterminate. Used wherever multiple DNSKEYs/algorithms are
/// tried against the same RRSIG/DS (Design Note: explicit early-return
/// helper replacing the "exit inner loop on first match" idiom).
pub fn best_of<T, I>(candidates: I) -> Option<T>
where
    T: ValidationStatused,
    I: IntoIterator<Item = T>,
{
    let mut best: Option<T> = None;
    for candidate in candidates {
        let better = match &best {
            None => true,
            Some(b) => candidate.validation_status().rank() < b.validation_status().rank(),
        };
        if better {
            best = Some(candidate);
        }
        if let Some(b) = &best {
            if b.validation_status().is_valid() {
                break;
            }
        }
    }
    best
}

/// Existence status of the analyzed name itself (§6 constants).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NameStatus {
    NoError,
    NxDomain,
    Indeterminate,
}

impl NameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            NameStatus::NoError => "NOERROR",
            NameStatus::NxDomain => "NXDOMAIN",
            NameStatus::Indeterminate => "INDETERMINATE",
        }
    }
}

impl fmt::Display for NameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// §6 constants: the resolved status of one delegation (C6 output).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DelegationStatus {
    Secure,
    Insecure,
    Bogus,
    Incomplete,
    Lame,
}

impl DelegationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DelegationStatus::Secure => "SECURE",
            DelegationStatus::Insecure => "INSECURE",
            DelegationStatus::Bogus => "BOGUS",
            DelegationStatus::Incomplete => "INCOMPLETE",
            DelegationStatus::Lame => "LAME",
        }
    }
}

impl fmt::Display for DelegationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// §6 constants: the final, trust-graph-colored status of an RRset (C8
/// output) or of a negative-response artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RrsetStatus {
    Secure,
    Insecure,
    Bogus,
    NonExistent,
}

impl RrsetStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RrsetStatus::Secure => "SECURE",
            RrsetStatus::Insecure => "INSECURE",
            RrsetStatus::Bogus => "BOGUS",
            RrsetStatus::NonExistent => "NON_EXISTENT",
        }
    }
}

impl fmt::Display for RrsetStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Node color supplied by the external trust-chain graph that C8
/// consumes (§4.8); intentionally a 3-way color, distinct from
/// `RrsetStatus`'s 4-way output (which adds `NonExistent`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NodeColor {
    Secure,
    Insecure,
    Bogus,
}

impl From<NodeColor> for RrsetStatus {
    fn from(c: NodeColor) -> Self {
        match c {
            NodeColor::Secure => RrsetStatus::Secure,
            NodeColor::Insecure => RrsetStatus::Insecure,
            NodeColor::Bogus => RrsetStatus::Bogus,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy)]
    struct Candidate(ValidationStatus);
    impl ValidationStatused for Candidate {
        fn validation_status(&self) -> ValidationStatus {
            self.0
        }
    }

    #[test]
    fn best_of_prefers_valid_over_invalid_over_indeterminate() {
        let candidates = vec![
            Candidate(ValidationStatus::Indeterminate),
            Candidate(ValidationStatus::InvalidSignature),
            Candidate(ValidationStatus::Valid),
            Candidate(ValidationStatus::InvalidSignature),
        ];
        let best = best_of(candidates).unwrap();
        assert_eq!(best.0, ValidationStatus::Valid);
    }

    #[test]
    fn best_of_prefers_invalid_over_indeterminate_when_no_valid_present() {
        let candidates = vec![
            Candidate(ValidationStatus::Indeterminate),
            Candidate(ValidationStatus::InvalidSignature),
        ];
        let best = best_of(candidates).unwrap();
        assert_eq!(best.0, ValidationStatus::InvalidSignature);
    }
}
