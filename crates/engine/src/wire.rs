//! Canonical wire-format encoding (RFC 4034 §6, RFC 4035 §5.3): the
//! bytes the crypto oracle is actually asked to verify a signature
//! over. Kept separate from the validator so it can be unit-tested
//! against known-good RRset shapes independently of any crypto backend.

use dnssec_analysis_domain::{Name, RDType, Rdata, RRSIG, RRset};

/// DNS name to wire format: length-prefixed labels, root label
/// terminator. `Name` is already lowercase-canonicalized.
pub fn name_to_wire(name: &Name) -> Vec<u8> {
    let mut wire = Vec::new();
    if name.is_root() {
        wire.push(0);
        return wire;
    }
    for label in name.as_str().trim_end_matches('.').split('.') {
        wire.push(label.len() as u8);
        wire.extend_from_slice(label.as_bytes());
    }
    wire.push(0);
    wire
}

fn rdata_to_wire(rdata: &Rdata) -> Vec<u8> {
    match rdata {
        Rdata::A(addr) => addr.octets().to_vec(),
        Rdata::Aaaa(addr) => addr.octets().to_vec(),
        Rdata::Ns(name) | Rdata::Cname(name) | Rdata::Dname(name) => name_to_wire(name),
        Rdata::Mx { preference, exchange } => {
            let mut w = preference.to_be_bytes().to_vec();
            w.extend(name_to_wire(exchange));
            w
        }
        Rdata::Soa(soa) => {
            let mut w = name_to_wire(&soa.mname);
            w.extend(name_to_wire(&soa.rname));
            w.extend_from_slice(&soa.serial.to_be_bytes());
            w.extend_from_slice(&soa.refresh.to_be_bytes());
            w.extend_from_slice(&soa.retry.to_be_bytes());
            w.extend_from_slice(&soa.expire.to_be_bytes());
            w.extend_from_slice(&soa.minimum.to_be_bytes());
            w
        }
        Rdata::Ds(ds) => {
            let mut w = ds.key_tag.to_be_bytes().to_vec();
            w.push(ds.algorithm);
            w.push(ds.digest_type);
            w.extend_from_slice(&ds.digest);
            w
        }
        Rdata::Dnskey {
            flags,
            protocol,
            algorithm,
            public_key,
        } => {
            let mut w = flags.to_be_bytes().to_vec();
            w.push(*protocol);
            w.push(*algorithm);
            w.extend_from_slice(public_key);
            w
        }
        Rdata::Nsec(nsec) => {
            let mut w = name_to_wire(&nsec.next_domain_name);
            w.extend(encode_type_bitmap(&nsec.types_present));
            w
        }
        Rdata::Nsec3(n3) => {
            let mut w = vec![n3.hash_algorithm, if n3.opt_out { 1 } else { 0 }];
            w.extend_from_slice(&n3.iterations.to_be_bytes());
            w.push(n3.salt.len() as u8);
            w.extend_from_slice(&n3.salt);
            w.push(n3.next_hashed_owner.len() as u8);
            w.extend_from_slice(&n3.next_hashed_owner);
            w.extend(encode_type_bitmap(&n3.types_present));
            w
        }
        Rdata::Nsec3Param(p) => {
            let mut w = vec![p.hash_algorithm, 0];
            w.extend_from_slice(&p.iterations.to_be_bytes());
            w.push(p.salt.len() as u8);
            w.extend_from_slice(&p.salt);
            w
        }
        Rdata::Raw(bytes) => bytes.clone(),
    }
}

/// RFC 4034 §4.1.2 type bitmap, single window (covers type numbers up
/// to 255; every type this engine reasons about fits in window 0).
fn encode_type_bitmap(types: &[RDType]) -> Vec<u8> {
    let mut window = [0u8; 32];
    let mut highest = 0usize;
    for ty in types {
        let n = ty.to_u16();
        if n > 255 {
            continue;
        }
        let byte = (n / 8) as usize;
        window[byte] |= 0x80 >> (n % 8);
        highest = highest.max(byte + 1);
    }
    if highest == 0 {
        return Vec::new();
    }
    let mut out = vec![0u8, highest as u8];
    out.extend_from_slice(&window[..highest]);
    out
}

/// Builds the bytes a `CryptoOracle::verify` call is asked to check:
/// the RRSIG RDATA (signature field excluded) followed by the RRset's
/// member RRs in canonical form and canonical order (RFC 4034 §3.1.8.1
/// / §6.3).
pub fn rrsig_signed_bytes(rrset: &RRset, rrsig: &RRSIG) -> Vec<u8> {
    let mut data = Vec::new();
    data.extend_from_slice(&rrsig.type_covered.to_u16().to_be_bytes());
    data.push(rrsig.algorithm);
    data.push(rrsig.labels);
    data.extend_from_slice(&rrsig.original_ttl.to_be_bytes());
    data.extend_from_slice(&(rrsig.signature_expiration as u32).to_be_bytes());
    data.extend_from_slice(&(rrsig.signature_inception as u32).to_be_bytes());
    data.extend_from_slice(&rrsig.key_tag.to_be_bytes());
    data.extend(name_to_wire(&rrsig.signer_name));

    let owner_wire = name_to_wire(&rrset.owner);
    let mut rdata_wires: Vec<Vec<u8>> = rrset.rdatas.iter().map(rdata_to_wire).collect();
    rdata_wires.sort();

    for rdata_wire in rdata_wires {
        data.extend_from_slice(&owner_wire);
        data.extend_from_slice(&rrset.rdtype.to_u16().to_be_bytes());
        data.extend_from_slice(&rrset.class.to_be_bytes());
        data.extend_from_slice(&rrsig.original_ttl.to_be_bytes());
        data.extend_from_slice(&(rdata_wire.len() as u16).to_be_bytes());
        data.extend_from_slice(&rdata_wire);
    }

    data
}

/// DNSKEY-owner wire bytes a DS digest is computed over (RFC 4034 §5.1.4).
pub fn dnskey_digest_bytes(owner: &Name, flags: u16, protocol: u8, algorithm: u8, public_key: &[u8]) -> Vec<u8> {
    let mut data = name_to_wire(owner);
    data.extend_from_slice(&flags.to_be_bytes());
    data.push(protocol);
    data.push(algorithm);
    data.extend_from_slice(public_key);
    data
}
