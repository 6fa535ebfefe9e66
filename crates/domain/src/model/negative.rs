use crate::model::rrset_info::RRsetInfo;
use crate::name::Name;
use crate::record_type::RDType;
use crate::witness::WitnessSet;

/// NSECSetInfo (§3): a bundle proving absence, unified over NSEC and
/// NSEC3 behind one `use_nsec3` flag rather than two parallel types
/// (Design Note's "dynamic polymorphism" reshape applied to the
/// source's separate NSEC/NSEC3 status classes).
#[derive(Debug, Clone)]
pub struct NsecSetInfo {
    pub use_nsec3: bool,
    /// The covering NSEC/NSEC3 RRsets (with their own RRSIGs) that make
    /// up this proof.
    pub covering: Vec<RRsetInfo>,
    pub closest_encloser: Option<Name>,
    pub next_closer: Option<Name>,
    /// NSEC3-only parameters; `None` when `use_nsec3` is false.
    pub iterations: Option<u16>,
    pub salt: Option<Vec<u8>>,
    pub hash_algorithm: Option<u8>,
    pub opt_out: bool,
}

impl NsecSetInfo {
    pub fn nsec(covering: Vec<RRsetInfo>) -> Self {
        Self {
            use_nsec3: false,
            covering,
            closest_encloser: None,
            next_closer: None,
            iterations: None,
            salt: None,
            hash_algorithm: None,
            opt_out: false,
        }
    }

    pub fn nsec3(
        covering: Vec<RRsetInfo>,
        iterations: u16,
        salt: Vec<u8>,
        hash_algorithm: u8,
        opt_out: bool,
    ) -> Self {
        Self {
            use_nsec3: true,
            covering,
            closest_encloser: None,
            next_closer: None,
            iterations: Some(iterations),
            salt: Some(salt),
            hash_algorithm: Some(hash_algorithm),
            opt_out,
        }
    }
}

/// NegativeResponseInfo (§3): owner/rdtype, SOA witnesses, and the NSEC
/// proof sets that back a NODATA or NXDOMAIN response.
#[derive(Debug, Clone)]
pub struct NegativeResponseInfo {
    pub owner: Name,
    pub rdtype: RDType,
    pub soa_rrsets: Vec<RRsetInfo>,
    pub nsec_sets: Vec<NsecSetInfo>,
    pub witnesses: WitnessSet,
}

impl NegativeResponseInfo {
    pub fn new(owner: Name, rdtype: RDType) -> Self {
        Self {
            owner,
            rdtype,
            soa_rrsets: Vec::new(),
            nsec_sets: Vec::new(),
            witnesses: WitnessSet::new(),
        }
    }
}
