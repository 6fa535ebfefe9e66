use crate::errors::ErrorInfo;
use crate::model::response::Query;
use crate::model::status_records::{
    CnameFromDnameStatus, DnskeyIndexSnapshot, DsStatus, NegativeProofStatus, RrsigStatus,
    RrsigStatusKey,
};
use crate::name::Name;
use crate::record_type::RDType;
use crate::status::{DelegationStatus, NameStatus, RrsetStatus};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

/// §4.7 traversal levels, increasing in restrictiveness:
/// `All > AllSameName > NsTarget > SecureDelegation > Delegation`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TraversalLevel {
    Delegation,
    SecureDelegation,
    NsTarget,
    AllSameName,
    All,
}

impl TraversalLevel {
    /// Whether a traversal already performed at `self` satisfies a
    /// request for `requested` (§5: "re-entry with the same-or-lower
    /// level is a no-op").
    pub fn satisfies(self, requested: TraversalLevel) -> bool {
        self >= requested
    }
}

/// §3: `analysis_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisType {
    Authoritative,
    Recursive,
    Cache,
}

/// The mutable status maps the walker (C7) and colorer (C8) populate
/// on an NA, grouped so `NameAnalysis` itself stays an immutable-looking
/// handle (interior mutability is confined to this one field, per §5's
/// "Status maps are owned by their NA and written exactly once per
/// (level, key)").
#[derive(Debug, Default)]
pub struct StatusStore {
    pub name_status: RefCell<Option<NameStatus>>,
    pub rrsig_status: RefCell<HashMap<RrsigStatusKey, RrsigStatus>>,
    pub ds_status: RefCell<HashMap<u8, DsStatus>>,
    pub dlv_status: RefCell<HashMap<u8, DsStatus>>,
    pub nodata_status: RefCell<HashMap<RDType, Vec<NegativeProofStatus>>>,
    pub nxdomain_status: RefCell<HashMap<RDType, Vec<NegativeProofStatus>>>,
    pub wildcard_status: RefCell<HashMap<Name, Vec<NegativeProofStatus>>>,
    pub cname_from_dname_status: RefCell<HashMap<Name, CnameFromDnameStatus>>,
    pub dnskey_index: RefCell<Option<DnskeyIndexSnapshot>>,
    /// Final, trust-graph-colored status per DNSKEY key tag (C8).
    pub dnskey_color: RefCell<HashMap<u16, RrsetStatus>>,
    pub delegation_status: RefCell<Option<DelegationStatus>>,
    pub dlv_delegation_status: RefCell<Option<DelegationStatus>>,
    pub populated_level: RefCell<Option<TraversalLevel>>,
    pub key_errors: RefCell<Vec<ErrorInfo>>,
    pub delegation_errors: RefCell<Vec<ErrorInfo>>,
}

impl StatusStore {
    pub fn is_populated_at(&self, level: TraversalLevel) -> bool {
        self.populated_level
            .borrow()
            .map(|p| p.satisfies(level))
            .unwrap_or(false)
    }

    /// §5: re-entry with a stricter level than already populated is
    /// disallowed. Returns `Err` (an assertion failure, not a DNSSEC
    /// outcome) if the caller asks for more than was already recorded
    /// while the store believes itself fully populated at a lower
    /// level.
    pub fn mark_populated(&self, level: TraversalLevel) {
        let mut current = self.populated_level.borrow_mut();
        *current = Some(match *current {
            Some(existing) if existing >= level => existing,
            _ => level,
        });
    }
}

/// NameAnalysis (NA, §3): the root entity of the data model. Owned by
/// the enclosing analysis run as `Rc`s so dependency edges
/// (`cname_targets`, `parent`, ...) can be `Weak` without an explicit
/// arena index — the Design Note's "names as handles into an arena
/// keyed by owner-name" implemented via `Rc`/`Weak` rather than a raw
/// reference graph, since the graph is genuinely cyclic (§3 invariant).
pub struct NameAnalysis {
    pub name: Name,
    pub stub: bool,
    pub analysis_type: AnalysisType,
    pub queries: HashMap<(Name, RDType), Query>,
    pub parent: Option<Weak<NameAnalysis>>,
    pub dlv_parent: Option<Weak<NameAnalysis>>,
    pub cname_targets: HashMap<Name, Weak<NameAnalysis>>,
    pub mx_targets: HashMap<Name, Weak<NameAnalysis>>,
    pub ns_dependencies: HashMap<Name, Weak<NameAnalysis>>,
    pub external_signers: HashMap<Name, Weak<NameAnalysis>>,
    pub status: StatusStore,
}

impl NameAnalysis {
    pub fn new(name: Name, analysis_type: AnalysisType) -> Self {
        Self {
            name,
            stub: false,
            analysis_type,
            queries: HashMap::new(),
            parent: None,
            dlv_parent: None,
            cname_targets: HashMap::new(),
            mx_targets: HashMap::new(),
            ns_dependencies: HashMap::new(),
            external_signers: HashMap::new(),
            status: StatusStore::default(),
        }
    }

    pub fn stub(name: Name, analysis_type: AnalysisType) -> Self {
        let mut na = Self::new(name, analysis_type);
        na.stub = true;
        na
    }

    pub fn query(&self, qname: &Name, rdtype: RDType) -> Option<&Query> {
        self.queries.get(&(qname.clone(), rdtype))
    }

    pub fn insert_query(&mut self, query: Query) {
        let key = (query.qname.clone(), query.rdtype);
        self.queries.insert(key, query);
    }

    pub fn parent_rc(&self) -> Option<Rc<NameAnalysis>> {
        self.parent.as_ref().and_then(Weak::upgrade)
    }

    pub fn dlv_parent_rc(&self) -> Option<Rc<NameAnalysis>> {
        self.dlv_parent.as_ref().and_then(Weak::upgrade)
    }
}
