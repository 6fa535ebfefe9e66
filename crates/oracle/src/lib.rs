//! Cryptographic and trust-anchor services the analysis engine consumes
//! through narrow traits, so the engine itself never depends on a
//! concrete crypto backend.

pub mod algorithm;
pub mod crypto;
pub mod trust_anchor;

pub use algorithm::{
    effective_algorithms, AlgorithmOracle, RUNTIME_SUPPORTED_DIGEST_ALGORITHMS,
    RUNTIME_SUPPORTED_DNSSEC_ALGORITHMS,
};
pub use crypto::{CryptoOracle, CryptoVerdict, RingOracle};
pub use trust_anchor::{TrustAnchor, TrustAnchorStore};
