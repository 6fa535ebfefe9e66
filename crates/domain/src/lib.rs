//! Data model and configuration for the offline DNSSEC analysis engine.
//!
//! This crate owns the facts: names, record types, witnesses, the
//! `NameAnalysis` graph and its status stores, the error taxonomy, and
//! configuration. It performs no queries and runs no cryptography; the
//! oracle and engine crates build on top of it.

pub mod config;
pub mod errors;
pub mod model;
pub mod name;
pub mod record_type;
pub mod status;
pub mod witness;

pub use config::{init_logging, AnalysisConfig, LoggingConfig, SerializationConfig, TrustAnchorConfig};
pub use errors::{EngineError, ErrorInfo, ErrorKind, Severity};
pub use model::{
    AnalysisType, CnameFromDnameStatus, DnskeyIndexSnapshot, DnskeyMeta, DsData, DsStatus,
    EdnsParams, NameAnalysis, NegativeProofStatus, NegativeResponseInfo, Nsec3Data,
    Nsec3ParamData, NsecData, NsecSetInfo, Query, QueryInstance, Rcode, Rdata, Response,
    ResponsiveCause, RRset, RRsetInfo, RrsigStatus, RrsigStatusKey, SoaData, StatusStore,
    TemporalValidity, TraversalLevel, WildcardWitness, RRSIG,
};
pub use name::Name;
pub use record_type::RDType;
pub use status::{
    best_of, DelegationStatus, NameStatus, NodeColor, RrsetStatus, ValidationStatus,
    ValidationStatused,
};
pub use witness::{ResponseId, Witness, WitnessSet};
