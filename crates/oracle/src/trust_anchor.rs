use base64::{engine::general_purpose::STANDARD, Engine};
use dnssec_analysis_domain::{DnskeyMeta, Name, TrustAnchorConfig};

/// A trusted DNSKEY for a zone, configured rather than discovered —
/// the root of trust a chain-of-trust evaluation bottoms out at.
#[derive(Debug, Clone)]
pub struct TrustAnchor {
    pub zone: Name,
    pub key_tag: u16,
    pub algorithm: u8,
    pub public_key: Vec<u8>,
}

impl TrustAnchor {
    /// Whether an observed DNSKEY matches this anchor: same zone, key
    /// tag, algorithm and public key bytes. Key-tag comparison accounts
    /// for the REVOKE bit via `DnskeyMeta::matches_key_tag`.
    pub fn matches(&self, zone: &Name, dnskey: &DnskeyMeta) -> bool {
        zone == &self.zone
            && dnskey.algorithm == self.algorithm
            && dnskey.matches_key_tag(self.key_tag)
            && dnskey.public_key == self.public_key
    }
}

/// The configured set of trust anchors for an analysis run (§6:
/// "a configured set of trust anchors"). Ships with the root KSK-2017
/// as the teacher's `TrustAnchorStore::default_root_anchors` does;
/// callers running analyses rooted below an organizational trust
/// anchor supply their own set via `AnalysisConfig::trust_anchors`.
#[derive(Debug, Clone)]
pub struct TrustAnchorStore {
    anchors: Vec<TrustAnchor>,
}

impl TrustAnchorStore {
    pub fn new() -> Self {
        Self {
            anchors: vec![root_ksk_2017()],
        }
    }

    pub fn empty() -> Self {
        Self { anchors: Vec::new() }
    }

    /// Builds a store from engine configuration, decoding each
    /// anchor's base64 public key. Malformed entries are dropped with
    /// a logged warning rather than failing the whole analysis —
    /// trust-anchor config is external input, not a programmer error.
    pub fn from_config(entries: &[TrustAnchorConfig]) -> Self {
        let mut anchors = Vec::with_capacity(entries.len());
        for entry in entries {
            match STANDARD.decode(&entry.public_key_base64) {
                Ok(public_key) => anchors.push(TrustAnchor {
                    zone: Name::new(&entry.zone),
                    key_tag: entry.key_tag,
                    algorithm: entry.algorithm,
                    public_key,
                }),
                Err(error) => {
                    tracing::warn!(zone = %entry.zone, %error, "dropping trust anchor with invalid base64 key");
                }
            }
        }
        Self { anchors }
    }

    pub fn add_anchor(&mut self, anchor: TrustAnchor) {
        self.anchors.push(anchor);
    }

    pub fn is_trusted(&self, zone: &Name, dnskey: &DnskeyMeta) -> bool {
        self.anchors.iter().any(|a| a.matches(zone, dnskey))
    }

    pub fn anchors_for(&self, zone: &Name) -> impl Iterator<Item = &TrustAnchor> {
        self.anchors.iter().filter(move |a| &a.zone == zone)
    }

    pub fn all(&self) -> &[TrustAnchor] {
        &self.anchors
    }
}

impl Default for TrustAnchorStore {
    fn default() -> Self {
        Self::new()
    }
}

/// Root KSK-2017 (key tag 20326, RSA/SHA-256), current at the time of
/// writing. Source: <https://www.iana.org/dnssec/files>.
fn root_ksk_2017() -> TrustAnchor {
    let public_key_b64 = concat!(
        "AwEAAaz/tAm8yTn4Mfeh5eyI96WSVexTBAvkMgJzkKTOiW1vkIbzxeF3",
        "+/4RgWOq7HrxRixHlFlExOLAJr5emLvN7SWXgnLh4+B5xQlNVz8Og8kv",
        "ArMtNROxVQuCaSnIDdD5LKyWbRd2n9WGe2R8PzgCmr3EgVLrjyBxWezF",
        "0jLHwVN8efS3rCj/EWgvIWgb9tarpVUDK/b58Da+sqqls3eNbuv7pr+e",
        "oZG+SrDK6nWeL3c6H5Apxz7LjVc1uTIdsIXxuOLYA4/ilBmSVIzuDWfd",
        "RUfhHdY6+cn8HFRm+2hM8AnXGXws9555KrUB5qihylGa8subX2Nn6UwN",
        "R1AkUTV74bU="
    );
    let public_key = STANDARD
        .decode(public_key_b64)
        .expect("hardcoded root KSK-2017 key is valid base64");
    TrustAnchor {
        zone: Name::root(),
        key_tag: 20326,
        algorithm: 8,
        public_key,
    }
}
