use crate::errors::ErrorInfo;
use crate::name::Name;
use crate::witness::WitnessSet;

pub const ZONE_KEY_FLAG: u16 = 0x0100;
pub const REVOKE_FLAG: u16 = 0x0080;
pub const SEP_FLAG: u16 = 0x0001;

/// RFC 4034 Appendix B key tag algorithm, computed over the wire-format
/// rdata (flags + protocol + algorithm + public key).
pub fn calculate_key_tag(flags: u16, protocol: u8, algorithm: u8, public_key: &[u8]) -> u16 {
    let mut wire = Vec::with_capacity(4 + public_key.len());
    wire.extend_from_slice(&flags.to_be_bytes());
    wire.push(protocol);
    wire.push(algorithm);
    wire.extend_from_slice(public_key);

    let mut accumulator: u32 = 0;
    for chunk in wire.chunks(2) {
        if chunk.len() == 2 {
            accumulator += u32::from(u16::from_be_bytes([chunk[0], chunk[1]]));
        } else {
            accumulator += u32::from(chunk[0]) << 8;
        }
    }
    accumulator += accumulator >> 16;
    (accumulator & 0xFFFF) as u16
}

/// DNSKEYMeta (§3): one deduplicated DNSKEY rdata observed for a zone,
/// with both the as-observed key tag and the tag it would carry with
/// the REVOKE bit cleared (RFC 5011 revocation changes the tag, so
/// RRSIG key-tag matching must consider both).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnskeyMeta {
    pub owner: Name,
    pub flags: u16,
    pub protocol: u8,
    pub algorithm: u8,
    pub public_key: Vec<u8>,
    pub ttl: u32,
    pub key_tag: u16,
    pub key_tag_no_revoke: u16,
    pub servers_clients: WitnessSet,
    pub errors: Vec<ErrorInfo>,
}

impl DnskeyMeta {
    pub fn new(owner: Name, flags: u16, protocol: u8, algorithm: u8, public_key: Vec<u8>, ttl: u32) -> Self {
        let key_tag = calculate_key_tag(flags, protocol, algorithm, &public_key);
        let key_tag_no_revoke = if flags & REVOKE_FLAG != 0 {
            calculate_key_tag(flags & !REVOKE_FLAG, protocol, algorithm, &public_key)
        } else {
            key_tag
        };
        Self {
            owner,
            flags,
            protocol,
            algorithm,
            public_key,
            ttl,
            key_tag,
            key_tag_no_revoke,
            servers_clients: WitnessSet::new(),
            errors: Vec::new(),
        }
    }

    pub fn is_zone_key(&self) -> bool {
        self.flags & ZONE_KEY_FLAG != 0
    }

    pub fn is_revoked(&self) -> bool {
        self.flags & REVOKE_FLAG != 0
    }

    /// Secure Entry Point flag. A DNSKEY with this bit set is a
    /// candidate KSK; whether it actually *is* a SEP additionally
    /// requires a matching, validly self-signing DS (C6).
    pub fn is_sep_flagged(&self) -> bool {
        self.flags & SEP_FLAG != 0
    }

    /// Matches a key tag against either the observed or
    /// revoke-adjusted tag, per C3's applicability rule.
    pub fn matches_key_tag(&self, tag: u16) -> bool {
        tag == self.key_tag || tag == self.key_tag_no_revoke
    }
}
