use crate::name::Name;
use crate::record_type::RDType;
use std::net::{Ipv4Addr, Ipv6Addr};

/// One parsed rdata value. Only the types the analysis engine needs to
/// reason about structurally get a dedicated variant; everything else
/// round-trips as opaque bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rdata {
    A(Ipv4Addr),
    Aaaa(Ipv6Addr),
    Ns(Name),
    Cname(Name),
    Dname(Name),
    Mx { preference: u16, exchange: Name },
    Soa(SoaData),
    Ds(DsData),
    Dnskey {
        flags: u16,
        protocol: u8,
        algorithm: u8,
        public_key: Vec<u8>,
    },
    Nsec(NsecData),
    Nsec3(Nsec3Data),
    Nsec3Param(Nsec3ParamData),
    Raw(Vec<u8>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SoaData {
    pub mname: Name,
    pub rname: Name,
    pub serial: u32,
    pub refresh: u32,
    pub retry: u32,
    pub expire: u32,
    pub minimum: u32,
}

/// DS / DLV rdata (RFC 4034 §5).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DsData {
    pub key_tag: u16,
    pub algorithm: u8,
    pub digest_type: u8,
    pub digest: Vec<u8>,
}

/// NSEC rdata (RFC 4034 §4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NsecData {
    pub next_domain_name: Name,
    pub types_present: Vec<RDType>,
}

/// NSEC3 rdata (RFC 5155 §3), opt-out carried as a plain bool rather
/// than the raw flags byte since it is the only flag bit defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec3Data {
    pub hash_algorithm: u8,
    pub opt_out: bool,
    pub iterations: u16,
    pub salt: Vec<u8>,
    pub next_hashed_owner: Vec<u8>,
    pub types_present: Vec<RDType>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Nsec3ParamData {
    pub hash_algorithm: u8,
    pub iterations: u16,
    pub salt: Vec<u8>,
}

/// An RRset as observed: name/class/type/ttl plus the rdata list,
/// exactly as §3 defines it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RRset {
    pub owner: Name,
    pub class: u16,
    pub rdtype: RDType,
    pub ttl: u32,
    pub rdatas: Vec<Rdata>,
}

impl RRset {
    pub fn new(owner: Name, rdtype: RDType, ttl: u32, rdatas: Vec<Rdata>) -> Self {
        Self {
            owner,
            class: 1, // IN
            rdtype,
            ttl,
            rdatas,
        }
    }
}
