use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Trust anchor, as configured rather than as discovered (§6: "a
/// configured set of trust anchors").
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TrustAnchorConfig {
    pub zone: String,
    pub key_tag: u16,
    pub algorithm: u8,
    /// Base64-encoded DNSKEY public key.
    pub public_key_base64: String,
}

/// Engine-wide configuration threaded explicitly through the traversal
/// (Design Note: "the supported-algorithm module-level sets must become
/// an explicit oracle ... no hidden state"). Shaped like the teacher's
/// per-concern config structs (`ServerConfig`, `LoggingConfig`, ...),
/// one struct per concern, `Default` + `serde`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AnalysisConfig {
    /// `None` means "accept whatever the runtime oracle supports";
    /// `Some` restricts to the intersection (C1's contract).
    #[serde(default)]
    pub supported_dnssec_algorithms: Option<BTreeSet<u8>>,
    #[serde(default)]
    pub supported_digest_algorithms: Option<BTreeSet<u8>>,
    #[serde(default)]
    pub trust_anchors: Vec<TrustAnchorConfig>,
    /// The instant ("now") the analysis is evaluated at, as Unix
    /// seconds. `None` means "use the wall clock" — library callers in
    /// tests always supply an explicit value so verdicts are
    /// reproducible.
    #[serde(default)]
    pub analysis_end: Option<i64>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            supported_dnssec_algorithms: None,
            supported_digest_algorithms: None,
            trust_anchors: Vec::new(),
            analysis_end: None,
        }
    }
}

impl AnalysisConfig {
    /// `analysis_end` if the caller pinned one, otherwise the current
    /// wall-clock instant. Tests always pin a value so RRSIG temporal
    /// validity checks stay reproducible; a host binary analyzing a
    /// live query graph leaves this `None` and gets "now".
    pub fn resolved_analysis_end(&self) -> i64 {
        self.analysis_end.unwrap_or_else(|| chrono::Utc::now().timestamp())
    }
}
