//! The offline DNSSEC analysis engine: the algorithms (C2-C9) that read
//! a populated `NameAnalysis` graph, validate its cryptographic and
//! structural claims, and serialize the result. Owns no network I/O
//! and no data model of its own beyond what the domain crate defines.

pub mod colorer;
pub mod delegation;
pub mod dnskey_eval;
pub mod dnskey_index;
pub mod negative_response;
pub mod response_classifier;
pub mod rrsig_validator;
pub mod serializer;
pub mod walker;
pub mod wire;

pub use colorer::{
    aggregate_node_color, color_ds_negative_response, color_dnskey_negative_response, color_negative_proof,
    color_rrset, gate_secure_soa, is_opt_out_secure, TrustGraph,
};
pub use delegation::{check_ns_names, resolve_delegation_status, validate_ds_records, DelegationContext, NsServerFacts};
pub use dnskey_eval::evaluate_dnskey_records;
pub use dnskey_index::{dnskey_metas_in_answer, DnskeyIndex};
pub use negative_response::{check_nxdomain_consistency, is_nodata_candidate, validate_negative_response, validate_wildcard_proofs};
pub use response_classifier::classify;
pub use rrsig_validator::{check_algorithm_coverage, validate_rrsig, validate_rrsig_against_index};
pub use serializer::{serialize_status, SerializedError, SerializedName, SerializedQuery, SerializedRrsigStatus};
pub use walker::populate_status;
