use crate::model::negative::NsecSetInfo;
use crate::model::rdata::RRset;
use crate::model::rrsig::RRSIG;
use crate::name::Name;
use crate::witness::WitnessSet;
use std::collections::BTreeMap;

/// Witness bundle backing one wildcard expansion (§3: `wildcard_info`).
#[derive(Debug, Clone)]
pub struct WildcardWitness {
    pub source_name: Name,
    pub proofs: Vec<NsecSetInfo>,
    pub witnesses: WitnessSet,
}

/// RRsetInfo (§3): one positive RRset as observed, with its RRSIGs and
/// witness set, plus the DNAME/wildcard back-links.
#[derive(Debug, Clone)]
pub struct RRsetInfo {
    pub rrset: RRset,
    pub rrsigs: Vec<RRSIG>,
    pub witnesses: WitnessSet,
    /// Set when this RRset is the CNAME synthesized from a DNAME;
    /// points at the DNAME RRsetInfo that produced it.
    pub dname_info: Option<Box<RRsetInfo>>,
    /// Chain of CNAMEs produced by walking through `dname_info`,
    /// oldest first.
    pub cname_info_from_dname: Vec<RRsetInfo>,
    /// wildcard-source-name → witness bundle, keyed as §3 specifies.
    pub wildcard_info: BTreeMap<Name, WildcardWitness>,
}

impl RRsetInfo {
    pub fn new(rrset: RRset) -> Self {
        Self {
            rrset,
            rrsigs: Vec::new(),
            witnesses: WitnessSet::new(),
            dname_info: None,
            cname_info_from_dname: Vec::new(),
            wildcard_info: BTreeMap::new(),
        }
    }

    pub fn is_wildcard_expansion(&self) -> bool {
        !self.wildcard_info.is_empty()
    }
}
