use std::collections::BTreeSet;
use std::net::IpAddr;

/// Identity of a single collected response, unique within one `Query`.
/// Needed because a single (server, client) pair can be observed
/// answering the same query more than once (retries, repeated probes).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ResponseId(pub u32);

/// A `(server, client, response)` triple observing a specific protocol
/// fact, per the glossary. `Ord` is derived so `WitnessSet` (a
/// `BTreeSet`) iterates deterministically without a separate sort pass,
/// satisfying the Ordering Guarantees in the concurrency model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Witness {
    pub server: IpAddr,
    pub client: IpAddr,
    pub response: ResponseId,
}

impl Witness {
    pub fn new(server: IpAddr, client: IpAddr, response: ResponseId) -> Self {
        Self {
            server,
            client,
            response,
        }
    }
}

pub type WitnessSet = BTreeSet<Witness>;
