pub mod analysis;
pub mod dnskey;
pub mod negative;
pub mod rdata;
pub mod response;
pub mod rrset_info;
pub mod rrsig;
pub mod status_records;

pub use analysis::{AnalysisType, NameAnalysis, StatusStore, TraversalLevel};
pub use dnskey::DnskeyMeta;
pub use negative::NegativeResponseInfo;
pub use negative::NsecSetInfo;
pub use rdata::{DsData, Nsec3Data, Nsec3ParamData, NsecData, Rdata, RRset, SoaData};
pub use response::{EdnsParams, Query, QueryInstance, Rcode, Response, ResponsiveCause};
pub use rrset_info::{RRsetInfo, WildcardWitness};
pub use rrsig::{TemporalValidity, RRSIG};
pub use status_records::{
    CnameFromDnameStatus, DnskeyIndexSnapshot, DsStatus, NegativeProofStatus, RrsigStatus,
    RrsigStatusKey,
};
