use ring::signature;
use sha1::Sha1;
use sha2::{Digest, Sha256, Sha384, Sha512};

/// Outcome of a single cryptographic check (§6). Distinct from
/// `ValidationStatus` in the domain crate: the oracle only knows
/// "did the bytes verify", not the protocol-level reasons (expired,
/// no applicable key, ...) the engine layers on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CryptoVerdict {
    Valid,
    Invalid,
    Unsupported,
}

/// The engine's only door to cryptography (§6 External Interfaces):
/// every RRSIG/DS check goes through this trait so the engine itself
/// stays free of a concrete crypto backend and is trivially testable
/// against a fake oracle.
pub trait CryptoOracle: Send + Sync {
    /// Verify `signature` over `canonical_bytes` under `public_key`,
    /// per the DNSSEC algorithm number (RFC 8624 §3.1).
    fn verify(&self, canonical_bytes: &[u8], signature: &[u8], algorithm: u8, public_key: &[u8]) -> CryptoVerdict;

    /// Digest `data` under the DS digest-type algorithm number (RFC
    /// 4509/6605 style numbering), or `None` if unsupported.
    fn digest(&self, algorithm: u8, data: &[u8]) -> Option<Vec<u8>>;
}

/// Default `CryptoOracle`, backed by `ring` and RustCrypto's `sha1`/
/// `sha2`. Ports the teacher's `SignatureVerifier` algorithm coverage
/// (RSA/SHA-256 alg 8, ECDSA P-256/SHA-256 alg 13, Ed25519 alg 15) and
/// extends it with algorithm 10 (RSA/SHA-512) and algorithm 14 (ECDSA
/// P-384/SHA-384), and the SHA-1/SHA-256/SHA-384 DS digest types.
#[derive(Debug, Default, Clone, Copy)]
pub struct RingOracle;

impl CryptoOracle for RingOracle {
    fn verify(&self, canonical_bytes: &[u8], sig: &[u8], algorithm: u8, public_key: &[u8]) -> CryptoVerdict {
        match algorithm {
            8 => verify_rsa(canonical_bytes, sig, public_key, &signature::RSA_PKCS1_2048_8192_SHA256),
            10 => verify_rsa(canonical_bytes, sig, public_key, &signature::RSA_PKCS1_2048_8192_SHA512),
            13 => verify_ecdsa(canonical_bytes, sig, public_key, 64, &signature::ECDSA_P256_SHA256_FIXED),
            14 => verify_ecdsa(canonical_bytes, sig, public_key, 96, &signature::ECDSA_P384_SHA384_FIXED),
            15 => verify_eddsa(canonical_bytes, sig, public_key),
            _ => {
                tracing::debug!(algorithm, "unsupported DNSSEC algorithm in crypto oracle");
                CryptoVerdict::Unsupported
            }
        }
    }

    fn digest(&self, algorithm: u8, data: &[u8]) -> Option<Vec<u8>> {
        match algorithm {
            1 => Some(Sha1::digest(data).to_vec()),
            2 => Some(Sha256::digest(data).to_vec()),
            4 => Some(Sha384::digest(data).to_vec()),
            _ => {
                tracing::debug!(algorithm, "unsupported DS digest algorithm in crypto oracle");
                None
            }
        }
    }
}

/// Parses an RSA public key in DNSKEY wire format: a 1-byte (or, for
/// exponents over 255 bytes, 3-byte) exponent-length prefix followed by
/// the exponent then the modulus (RFC 3110 §2).
fn parse_rsa_key(key_data: &[u8]) -> Option<(Vec<u8>, Vec<u8>)> {
    if key_data.is_empty() {
        return None;
    }
    let first_byte = key_data[0];
    let (exp_len, exp_start) = if first_byte == 0 {
        if key_data.len() < 3 {
            return None;
        }
        let exp_len = u16::from_be_bytes([key_data[1], key_data[2]]) as usize;
        (exp_len, 3)
    } else {
        (first_byte as usize, 1)
    };
    let exp_end = exp_start + exp_len;
    if exp_end > key_data.len() {
        return None;
    }
    let exponent = key_data[exp_start..exp_end].to_vec();
    let modulus = key_data[exp_end..].to_vec();
    if modulus.is_empty() {
        return None;
    }
    Some((exponent, modulus))
}

fn verify_rsa(
    data: &[u8],
    sig: &[u8],
    public_key: &[u8],
    parameters: &'static dyn signature::VerificationAlgorithm,
) -> CryptoVerdict {
    let Some((exponent, modulus)) = parse_rsa_key(public_key) else {
        return CryptoVerdict::Invalid;
    };
    let key = signature::RsaPublicKeyComponents { n: &modulus, e: &exponent };
    match key.verify(parameters, data, sig) {
        Ok(()) => CryptoVerdict::Valid,
        Err(_) => CryptoVerdict::Invalid,
    }
}

fn verify_ecdsa(
    data: &[u8],
    sig: &[u8],
    public_key: &[u8],
    expected_key_len: usize,
    parameters: &'static dyn signature::VerificationAlgorithm,
) -> CryptoVerdict {
    if public_key.len() != expected_key_len {
        return CryptoVerdict::Invalid;
    }
    // ring expects an uncompressed SEC1 point (0x04 || X || Y); DNSKEY
    // wire format carries only X || Y.
    let mut uncompressed = Vec::with_capacity(1 + public_key.len());
    uncompressed.push(0x04);
    uncompressed.extend_from_slice(public_key);
    let key = signature::UnparsedPublicKey::new(parameters, &uncompressed);
    match key.verify(data, sig) {
        Ok(()) => CryptoVerdict::Valid,
        Err(_) => CryptoVerdict::Invalid,
    }
}

fn verify_eddsa(data: &[u8], sig: &[u8], public_key: &[u8]) -> CryptoVerdict {
    if public_key.len() != 32 || sig.len() != 64 {
        return CryptoVerdict::Invalid;
    }
    let key = signature::UnparsedPublicKey::new(&signature::ED25519, public_key);
    match key.verify(data, sig) {
        Ok(()) => CryptoVerdict::Valid,
        Err(_) => CryptoVerdict::Invalid,
    }
}
