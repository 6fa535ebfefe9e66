use std::fmt;

/// DNS resource record type, restricted to the types the analysis engine
/// reasons about directly. Unrecognized wire values round-trip through
/// `Other`, matching the teacher's `RecordType` enum's `Display`/`FromStr`
/// pattern but widened to the IANA numbers DNSSEC analysis touches
/// (RFC 4034, 5155, 7344).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RDType {
    A,
    Ns,
    Cname,
    Soa,
    Mx,
    Txt,
    Aaaa,
    Srv,
    Dname,
    Ds,
    Rrsig,
    Nsec,
    Dnskey,
    Nsec3,
    Nsec3Param,
    Dlv,
    Other(u16),
}

impl RDType {
    pub fn to_u16(self) -> u16 {
        match self {
            RDType::A => 1,
            RDType::Ns => 2,
            RDType::Cname => 5,
            RDType::Soa => 6,
            RDType::Mx => 15,
            RDType::Txt => 16,
            RDType::Aaaa => 28,
            RDType::Srv => 33,
            RDType::Dname => 39,
            RDType::Ds => 43,
            RDType::Rrsig => 46,
            RDType::Nsec => 47,
            RDType::Dnskey => 48,
            RDType::Nsec3 => 50,
            RDType::Nsec3Param => 51,
            RDType::Dlv => 32769,
            RDType::Other(v) => v,
        }
    }

    pub fn from_u16(v: u16) -> Self {
        match v {
            1 => RDType::A,
            2 => RDType::Ns,
            5 => RDType::Cname,
            6 => RDType::Soa,
            15 => RDType::Mx,
            16 => RDType::Txt,
            28 => RDType::Aaaa,
            33 => RDType::Srv,
            39 => RDType::Dname,
            43 => RDType::Ds,
            46 => RDType::Rrsig,
            47 => RDType::Nsec,
            48 => RDType::Dnskey,
            50 => RDType::Nsec3,
            51 => RDType::Nsec3Param,
            32769 => RDType::Dlv,
            other => RDType::Other(other),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RDType::A => "A",
            RDType::Ns => "NS",
            RDType::Cname => "CNAME",
            RDType::Soa => "SOA",
            RDType::Mx => "MX",
            RDType::Txt => "TXT",
            RDType::Aaaa => "AAAA",
            RDType::Srv => "SRV",
            RDType::Dname => "DNAME",
            RDType::Ds => "DS",
            RDType::Rrsig => "RRSIG",
            RDType::Nsec => "NSEC",
            RDType::Dnskey => "DNSKEY",
            RDType::Nsec3 => "NSEC3",
            RDType::Nsec3Param => "NSEC3PARAM",
            RDType::Dlv => "DLV",
            RDType::Other(_) => "TYPE",
        }
    }

    /// True for the DS/DLV delegation-signer family (C6 treats them
    /// interchangeably modulo which zone answers them).
    pub fn is_ds_like(&self) -> bool {
        matches!(self, RDType::Ds | RDType::Dlv)
    }
}

impl fmt::Display for RDType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RDType::Other(v) => write!(f, "TYPE{v}"),
            other => write!(f, "{}", other.as_str()),
        }
    }
}

impl serde::Serialize for RDType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}
