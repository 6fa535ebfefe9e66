use crate::name::Name;
use crate::record_type::RDType;

/// An RRSIG record (§3). Timestamps are Unix seconds, matching the
/// wire's 32-bit inception/expiration fields widened to `i64` so the
/// analysis end instant (which may be supplied as "now" at collection
/// time, potentially beyond `u32`'s 2106 wraparound) compares cleanly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRSIG {
    pub type_covered: RDType,
    pub algorithm: u8,
    pub labels: u8,
    pub original_ttl: u32,
    pub signature_expiration: i64,
    pub signature_inception: i64,
    pub key_tag: u16,
    pub signer_name: Name,
    pub signature: Vec<u8>,
}

impl RRSIG {
    pub fn is_temporally_valid(&self, analysis_end: i64) -> TemporalValidity {
        if analysis_end < self.signature_inception {
            TemporalValidity::Premature
        } else if analysis_end > self.signature_expiration {
            TemporalValidity::Expired
        } else {
            TemporalValidity::Valid
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemporalValidity {
    Valid,
    Expired,
    Premature,
}
