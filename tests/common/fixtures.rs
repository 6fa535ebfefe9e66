//! Synthetic `NameAnalysis` graph builders shared by the flow tests,
//! grounded in the teacher's `tests/common/fixtures.rs` builder-struct
//! style. No network, no tokio runtime: every fixture is constructed
//! in-memory, exactly as an external collector would have left it.

use dnssec_analysis_domain::{
    AnalysisType, DsData, EdnsParams, Name, NameAnalysis, NegativeResponseInfo, NsecSetInfo, Query, QueryInstance,
    RDType, RRSIG, RRset, RRsetInfo, Rcode, Rdata, Response, ResponseId, ResponsiveCause,
};
use dnssec_analysis_oracle::CryptoVerdict;
use std::net::IpAddr;
use std::rc::Rc;

pub fn ip(last: u8) -> IpAddr {
    IpAddr::from([198, 51, 100, last])
}

/// A response carrying no EDNS facts and no transport trouble: the
/// baseline every scenario starts from and customizes.
pub fn clean_response(server: u8, id: u32) -> Response {
    Response {
        id: ResponseId(id),
        server: ip(server),
        client: ip(1),
        rcode: Rcode::NoError,
        authoritative: true,
        recursion_desired: false,
        recursion_available: false,
        is_upward_referral: false,
        query_edns: None,
        response_edns: None,
        effective_edns: None,
        responsive_cause: ResponsiveCause::None,
        other_edns_query_succeeded: false,
    }
}

pub fn query_instance_with(response: Response) -> QueryInstance {
    let mut instance = QueryInstance::default();
    instance.responses.insert((response.server, response.client), vec![response]);
    instance
}

/// A test double standing in for a real DNSSEC crypto backend (ring,
/// OpenSSL, ...): the oracle traits exist precisely so tests don't need
/// one, mirroring the `AlwaysValid`/`FixedDigest` doubles already used
/// by the engine's own inline unit tests.
pub struct FakeOracle {
    pub verdict: CryptoVerdict,
    pub digest: Vec<u8>,
}

impl FakeOracle {
    pub fn always_valid() -> Self {
        Self { verdict: CryptoVerdict::Valid, digest: vec![0xAB; 32] }
    }
}

impl dnssec_analysis_oracle::CryptoOracle for FakeOracle {
    fn verify(&self, _signed_bytes: &[u8], _signature: &[u8], _algorithm: u8, _public_key: &[u8]) -> CryptoVerdict {
        self.verdict
    }

    fn digest(&self, _digest_type: u8, _input: &[u8]) -> Option<Vec<u8>> {
        Some(self.digest.clone())
    }
}

pub fn a_rrset_info(owner: &Name) -> RRsetInfo {
    RRsetInfo::new(RRset::new(owner.clone(), RDType::A, 300, vec![Rdata::A(std::net::Ipv4Addr::new(93, 184, 216, 34))]))
}

pub fn dnskey_rrset(owner: &Name, keys: &[(u16, u8, Vec<u8>)]) -> RRset {
    let rdatas = keys
        .iter()
        .map(|(flags, algorithm, key)| Rdata::Dnskey {
            flags: *flags,
            protocol: 3,
            algorithm: *algorithm,
            public_key: key.clone(),
        })
        .collect();
    RRset::new(owner.clone(), RDType::Dnskey, 3600, rdatas)
}

pub fn rrsig(owner: &Name, zone: &Name, rdtype: RDType, algorithm: u8, key_tag: u16) -> RRSIG {
    RRSIG {
        type_covered: rdtype,
        algorithm,
        labels: owner.label_count() as u8,
        original_ttl: 300,
        signature_expiration: 2_000_000_000,
        signature_inception: 1_000_000_000,
        key_tag,
        signer_name: zone.clone(),
        signature: vec![0u8; 64],
    }
}

pub fn ds(key_tag: u16, algorithm: u8, digest: Vec<u8>) -> DsData {
    DsData { key_tag, algorithm, digest_type: 2, digest }
}

/// Links `child` as a delegated subdomain of `parent`, wiring the
/// `Weak` back-reference `NameAnalysis::parent` expects before either
/// is shared further.
pub fn link_parent(child: &mut NameAnalysis, parent: &Rc<NameAnalysis>) {
    child.parent = Some(Rc::downgrade(parent));
}

pub fn ns_query(parent_zone: &Name, child: &Name) -> Query {
    let mut query = Query::new(child.clone(), RDType::Ns);
    let rrset = RRset::new(child.clone(), RDType::Ns, 3600, vec![Rdata::Ns(Name::new(format!("ns1.{}", parent_zone)))]);
    query.answer_info.push(RRsetInfo::new(rrset));
    query
}

pub fn empty_ds_query(child: &Name) -> Query {
    Query::new(child.clone(), RDType::Ds)
}

pub fn edns(version: u8, payload: u16) -> EdnsParams {
    EdnsParams { version, max_udp_payload: payload, flags: 0 }
}

pub fn nxdomain_info(owner: &Name, rdtype: RDType, witness_server: u8) -> NegativeResponseInfo {
    let mut info = NegativeResponseInfo::new(owner.clone(), rdtype);
    info.witnesses.insert(dnssec_analysis_domain::Witness::new(ip(witness_server), ip(1), ResponseId(1)));
    info
}

pub fn nodata_info_with_opt_out_nsec3(owner: &Name, witness_server: u8) -> NegativeResponseInfo {
    let mut info = NegativeResponseInfo::new(owner.clone(), RDType::Ds);
    info.witnesses.insert(dnssec_analysis_domain::Witness::new(ip(witness_server), ip(1), ResponseId(1)));
    let covering = RRsetInfo::new(RRset::new(
        owner.clone(),
        RDType::Nsec3,
        3600,
        vec![Rdata::Nsec3(dnssec_analysis_domain::Nsec3Data {
            hash_algorithm: 1,
            opt_out: true,
            iterations: 0,
            salt: vec![],
            next_hashed_owner: vec![0xFF; 20],
            types_present: vec![],
        })],
    ));
    info.nsec_sets.push(NsecSetInfo::nsec3(vec![covering], 0, vec![], 1, true));
    info
}
