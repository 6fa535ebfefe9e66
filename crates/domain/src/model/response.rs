use crate::name::Name;
use crate::record_type::RDType;
use crate::witness::{ResponseId, Witness};
use std::collections::{BTreeMap, HashMap};
use std::net::IpAddr;

/// DNS response codes relevant to classification (§4.4, §7).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rcode {
    NoError,
    FormErr,
    ServFail,
    NxDomain,
    NotImp,
    Refused,
    Other(u8),
}

impl Rcode {
    pub fn from_u8(v: u8) -> Self {
        match v {
            0 => Rcode::NoError,
            1 => Rcode::FormErr,
            2 => Rcode::ServFail,
            3 => Rcode::NxDomain,
            4 => Rcode::NotImp,
            5 => Rcode::Refused,
            other => Rcode::Other(other),
        }
    }

    pub fn to_u8(self) -> u8 {
        match self {
            Rcode::NoError => 0,
            Rcode::FormErr => 1,
            Rcode::ServFail => 2,
            Rcode::NxDomain => 3,
            Rcode::NotImp => 4,
            Rcode::Refused => 5,
            Rcode::Other(v) => v,
        }
    }
}

/// EDNS parameters observed at one of the three points the response
/// classifier (C4) compares: initial request, response message, and
/// "effective" request (what the resolver actually sent on the wire
/// after any retry/fallback).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EdnsParams {
    pub version: u8,
    pub max_udp_payload: u16,
    /// Raw 16-bit extended-flags field (DO bit = 0x8000, any other bits
    /// the query might set).
    pub flags: u16,
}

impl EdnsParams {
    pub const DO_BIT: u16 = 0x8000;
}

/// Cause attributed to a query that used EDNS but whose effective
/// request ended up not using it (§4.4 decision table). Carries the
/// `responsive_cause_index` concept as an explicit enum instead of a
/// magic index into a side list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsiveCause {
    /// No EDNS-related error should be reported (probable non-EDNS
    /// issue elsewhere).
    None,
    NetworkError,
    FormError,
    Timeout { attempt_index: u32 },
    Other,
    Rcode(Rcode),
}

/// One collected response (§3 "Response", referenced by witnesses).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub id: ResponseId,
    pub server: IpAddr,
    pub client: IpAddr,
    pub rcode: Rcode,
    pub authoritative: bool,
    pub recursion_desired: bool,
    pub recursion_available: bool,
    pub is_upward_referral: bool,
    /// EDNS as used by the *initial* request.
    pub query_edns: Option<EdnsParams>,
    /// EDNS as indicated by the *response* (`None` means the response
    /// itself carried no OPT record).
    pub response_edns: Option<EdnsParams>,
    /// EDNS as used by the *effective* request actually sent on the
    /// wire (may differ from `query_edns` after an EDNS-stripping
    /// retry).
    pub effective_edns: Option<EdnsParams>,
    pub responsive_cause: ResponsiveCause,
    /// Whether this exact (server, client) pair succeeded with EDNS on
    /// some other query — drives the `intermittent` flag on
    /// NetworkError/FormError.
    pub other_edns_query_succeeded: bool,
}

impl Response {
    pub fn witness(&self) -> Witness {
        Witness::new(self.server, self.client, self.id)
    }
}

/// One `(qname, rdtype)` query parameter instance: the responses
/// collected for it, keyed by `(server, client)` then ordered by
/// response id (§3: "`responses[server][client] → Response`" widened
/// to carry every retry rather than just the last one).
#[derive(Debug, Clone, Default)]
pub struct QueryInstance {
    pub responses: BTreeMap<(IpAddr, IpAddr), Vec<Response>>,
}

impl QueryInstance {
    pub fn all_responses(&self) -> impl Iterator<Item = &Response> {
        self.responses.values().flatten()
    }
}

/// A `(qname, rdtype)` multi-query aggregate (§3 "Query"). The
/// `answer_info`/`nodata_info`/`nxdomain_info`/`error_info` sets are
/// populated by the external collector; the engine only reads them.
#[derive(Debug, Clone)]
pub struct Query {
    pub qname: Name,
    pub rdtype: RDType,
    pub answer_info: Vec<crate::model::rrset_info::RRsetInfo>,
    pub nodata_info: Vec<crate::model::negative::NegativeResponseInfo>,
    pub nxdomain_info: Vec<crate::model::negative::NegativeResponseInfo>,
    pub error_info: Vec<crate::errors::ErrorInfo>,
    pub queries: Vec<QueryInstance>,
}

impl Query {
    pub fn new(qname: Name, rdtype: RDType) -> Self {
        Self {
            qname,
            rdtype,
            answer_info: Vec::new(),
            nodata_info: Vec::new(),
            nxdomain_info: Vec::new(),
            error_info: Vec::new(),
            queries: Vec::new(),
        }
    }

    /// Every collected response for this query, keyed by its witness —
    /// lets a caller look up the transport/EDNS facts behind one
    /// witness without re-walking `queries` itself.
    pub fn witness_responses(&self) -> HashMap<Witness, Response> {
        self.queries
            .iter()
            .flat_map(|instance| instance.all_responses())
            .map(|response| (response.witness(), response.clone()))
            .collect()
    }
}
