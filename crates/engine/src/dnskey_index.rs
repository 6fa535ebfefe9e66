use dnssec_analysis_domain::{DnskeyIndexSnapshot, DnskeyMeta, Name, NameAnalysis, RDType, Rdata, RRsetInfo};
use rustc_hash::FxHashMap;

/// C2: the deduplicated, role-classified view of a zone's DNSKEY RRset.
///
/// Dedup is by rdata equality (flags/protocol/algorithm/public key), the
/// same "keyed entry, build once" shape as the teacher's `DnssecCache`
/// minus a TTL — this index is built once per zone, not time-limited.
#[derive(Debug, Clone, Default)]
pub struct DnskeyIndex {
    by_key_tag: FxHashMap<u16, DnskeyMeta>,
}

impl DnskeyIndex {
    /// Builds the index from the DNSKEY RRset(s) observed at `na`'s own
    /// name. Multiple RRsetInfo entries (retries, multiple servers) are
    /// merged; identical rdata observed more than once keeps the first
    /// metadata but accumulates witnesses.
    pub fn build(na: &NameAnalysis) -> Self {
        let mut by_key_tag: FxHashMap<u16, DnskeyMeta> = FxHashMap::default();

        let Some(query) = na.query(&na.name, RDType::Dnskey) else {
            return Self { by_key_tag };
        };

        for rrset_info in &query.answer_info {
            for meta in dnskey_metas_in_answer(&na.name, rrset_info) {
                by_key_tag
                    .entry(meta.key_tag)
                    .and_modify(|existing| {
                        existing.servers_clients.extend(meta.servers_clients.iter().copied());
                    })
                    .or_insert(meta);
            }
        }

        Self { by_key_tag }
    }

    pub fn is_empty(&self) -> bool {
        self.by_key_tag.is_empty()
    }

    pub fn lookup(&self, key_tag: u16) -> Option<&DnskeyMeta> {
        self.by_key_tag.get(&key_tag)
    }

    /// All keys matching a key tag, considering the REVOKE-adjusted tag
    /// as C3's applicability rule requires.
    pub fn lookup_applicable(&self, key_tag: u16, algorithm: u8) -> impl Iterator<Item = &DnskeyMeta> {
        self.by_key_tag
            .values()
            .filter(move |k| k.algorithm == algorithm && k.matches_key_tag(key_tag))
    }

    pub fn all_keys(&self) -> impl Iterator<Item = &DnskeyMeta> {
        self.by_key_tag.values()
    }

    pub fn ksks(&self) -> impl Iterator<Item = &DnskeyMeta> {
        self.by_key_tag.values().filter(|k| k.is_sep_flagged())
    }

    pub fn zsks(&self) -> impl Iterator<Item = &DnskeyMeta> {
        self.by_key_tag.values().filter(|k| !k.is_sep_flagged())
    }

    pub fn revoked(&self) -> impl Iterator<Item = &DnskeyMeta> {
        self.by_key_tag.values().filter(|k| k.is_revoked())
    }

    /// A key is a "potential trusted key" candidate (§4.6/§4.7) if it is
    /// a published, non-revoked zone key — the SEP flag narrows further
    /// but isn't required by RFC 4035 to be set correctly.
    pub fn potential_trusted_keys(&self) -> impl Iterator<Item = &DnskeyMeta> {
        self.by_key_tag
            .values()
            .filter(|k| k.is_zone_key() && !k.is_revoked())
    }

    pub fn snapshot(&self) -> DnskeyIndexSnapshot {
        DnskeyIndexSnapshot {
            all_keys: self.all_keys().cloned().collect(),
            ksks: self.ksks().map(|k| k.key_tag).collect(),
            zsks: self.zsks().map(|k| k.key_tag).collect(),
            published_keys: self.all_keys().map(|k| k.key_tag).collect(),
            revoked_keys: self.revoked().map(|k| k.key_tag).collect(),
            potential_trusted_keys: self.potential_trusted_keys().map(|k| k.key_tag).collect(),
        }
    }
}

/// The candidate DNSKEYs carried by one specific answer, as opposed to
/// the zone-wide flattened index: used for the zone-apex DNSKEY
/// self-signature check (C3 step 2), where a valid signature has to
/// come from a key actually present in *that* DNSKEY RRset, not merely
/// one observed in some other answer for the same owner name (e.g. a
/// stale keyset from a prior rollover still sitting in the index).
pub fn dnskey_metas_in_answer(owner: &Name, rrset_info: &RRsetInfo) -> Vec<DnskeyMeta> {
    rrset_info
        .rrset
        .rdatas
        .iter()
        .filter_map(|rdata| {
            let Rdata::Dnskey {
                flags,
                protocol,
                algorithm,
                public_key,
            } = rdata
            else {
                return None;
            };
            let mut meta = DnskeyMeta::new(owner.clone(), *flags, *protocol, *algorithm, public_key.clone(), rrset_info.rrset.ttl);
            meta.servers_clients.extend(rrset_info.witnesses.iter().copied());
            Some(meta)
        })
        .collect()
}
