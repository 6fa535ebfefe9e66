use std::collections::BTreeSet;

/// C1: resolves which DNSSEC signing algorithms and DS digest algorithms
/// the engine will actually accept for one analysis run. A configured
/// allow-list narrows the runtime-supported set; absent one, the
/// runtime set is used as-is. Pure and infallible — there is no
/// "misconfigured" outcome, only a possibly-empty intersection.
#[derive(Debug, Clone)]
pub struct AlgorithmOracle {
    dnssec_algorithms: BTreeSet<u8>,
    digest_algorithms: BTreeSet<u8>,
}

/// Algorithms the `RingOracle` crypto backend actually implements.
pub const RUNTIME_SUPPORTED_DNSSEC_ALGORITHMS: [u8; 5] = [8, 10, 13, 14, 15];
pub const RUNTIME_SUPPORTED_DIGEST_ALGORITHMS: [u8; 3] = [1, 2, 4];

impl AlgorithmOracle {
    pub fn new(
        configured_dnssec: Option<&BTreeSet<u8>>,
        configured_digest: Option<&BTreeSet<u8>>,
    ) -> Self {
        let runtime_dnssec: BTreeSet<u8> = RUNTIME_SUPPORTED_DNSSEC_ALGORITHMS.into_iter().collect();
        let runtime_digest: BTreeSet<u8> = RUNTIME_SUPPORTED_DIGEST_ALGORITHMS.into_iter().collect();
        Self {
            dnssec_algorithms: effective_algorithms(configured_dnssec, &runtime_dnssec),
            digest_algorithms: effective_algorithms(configured_digest, &runtime_digest),
        }
    }

    pub fn supports_dnssec_algorithm(&self, algorithm: u8) -> bool {
        self.dnssec_algorithms.contains(&algorithm)
    }

    pub fn supports_digest_algorithm(&self, algorithm: u8) -> bool {
        self.digest_algorithms.contains(&algorithm)
    }

    pub fn dnssec_algorithms(&self) -> &BTreeSet<u8> {
        &self.dnssec_algorithms
    }

    pub fn digest_algorithms(&self) -> &BTreeSet<u8> {
        &self.digest_algorithms
    }
}

/// `configured` narrows `runtime_supported` to their intersection;
/// `None` accepts everything the runtime supports.
#[must_use]
pub fn effective_algorithms(configured: Option<&BTreeSet<u8>>, runtime_supported: &BTreeSet<u8>) -> BTreeSet<u8> {
    match configured {
        None => runtime_supported.clone(),
        Some(allowed) => runtime_supported.intersection(allowed).copied().collect(),
    }
}
