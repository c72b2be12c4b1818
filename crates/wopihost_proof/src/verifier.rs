//! Proof signature verification.

use crate::error::{ProofError, ProofResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use rsa::{BigUint, Pkcs1v15Sign, RsaPublicKey};
use sha2::{Digest, Sha256};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// .NET ticks at the Unix epoch (ticks are 100ns intervals since
/// 0001-01-01T00:00:00Z).
pub const TICKS_AT_UNIX_EPOCH: i64 = 621_355_968_000_000_000;

/// .NET ticks per second.
pub const TICKS_PER_SECOND: i64 = 10_000_000;

/// Default freshness window for proof timestamps.
const DEFAULT_MAX_AGE: Duration = Duration::from_secs(20 * 60);

/// Returns the current time in .NET ticks.
#[must_use]
pub fn now_ticks() -> i64 {
    let since_epoch = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    TICKS_AT_UNIX_EPOCH
        + since_epoch.as_secs() as i64 * TICKS_PER_SECOND
        + i64::from(since_epoch.subsec_nanos()) / 100
}

/// Builds the byte sequence a WOPI client signs for one request.
///
/// Layout, each part prefixed by its 4-byte big-endian length:
/// access token UTF-8 bytes, then the uppercased request URL UTF-8
/// bytes, then the timestamp as an 8-byte big-endian integer.
#[must_use]
pub fn expected_proof_bytes(url: &str, access_token: &str, timestamp: i64) -> Vec<u8> {
    let token_bytes = access_token.as_bytes();
    let url_upper = url.to_uppercase();
    let url_bytes = url_upper.as_bytes();

    let mut expected = Vec::with_capacity(token_bytes.len() + url_bytes.len() + 20);
    expected.extend_from_slice(&(token_bytes.len() as u32).to_be_bytes());
    expected.extend_from_slice(token_bytes);
    expected.extend_from_slice(&(url_bytes.len() as u32).to_be_bytes());
    expected.extend_from_slice(url_bytes);
    expected.extend_from_slice(&8u32.to_be_bytes());
    expected.extend_from_slice(&timestamp.to_be_bytes());
    expected
}

/// Decodes an RSA public key from the discovery document's
/// base64-encoded big-endian modulus and exponent attributes.
///
/// # Errors
///
/// Returns [`ProofError::InvalidKey`] when the attributes do not decode
/// to a usable key.
pub fn public_key_from_base64(modulus: &str, exponent: &str) -> ProofResult<RsaPublicKey> {
    let n = BASE64
        .decode(modulus.trim())
        .map_err(|e| ProofError::InvalidKey(format!("modulus: {e}")))?;
    let e = BASE64
        .decode(exponent.trim())
        .map_err(|e| ProofError::InvalidKey(format!("exponent: {e}")))?;
    RsaPublicKey::new(BigUint::from_bytes_be(&n), BigUint::from_bytes_be(&e))
        .map_err(|e| ProofError::InvalidKey(e.to_string()))
}

/// Verifies that inbound requests were signed by the registered WOPI
/// client.
///
/// Holds the client's current public key and, when published, the
/// previous one. Verification follows the protocol's rotation fallback:
/// the proof header against the current key, then the old-proof header
/// against the current key, then the proof header against the previous
/// key. Either side of the conversation may be mid-rotation, so any
/// success is accepted.
pub struct ProofKeyVerifier {
    current: RsaPublicKey,
    previous: Option<RsaPublicKey>,
    max_age: Duration,
}

impl ProofKeyVerifier {
    /// Creates a verifier with the protocol's 20-minute freshness
    /// window.
    #[must_use]
    pub fn new(current: RsaPublicKey, previous: Option<RsaPublicKey>) -> Self {
        Self {
            current,
            previous,
            max_age: DEFAULT_MAX_AGE,
        }
    }

    /// Creates a verifier from base64 key attributes as published in
    /// the discovery document.
    ///
    /// # Errors
    ///
    /// Returns [`ProofError::InvalidKey`] when the attributes do not
    /// decode.
    pub fn from_base64(
        modulus: &str,
        exponent: &str,
        old: Option<(&str, &str)>,
    ) -> ProofResult<Self> {
        let current = public_key_from_base64(modulus, exponent)?;
        let previous = match old {
            Some((old_modulus, old_exponent)) => {
                Some(public_key_from_base64(old_modulus, old_exponent)?)
            }
            None => None,
        };
        Ok(Self::new(current, previous))
    }

    /// Sets the timestamp freshness window.
    #[must_use]
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    /// Verifies a request's proof headers.
    ///
    /// An absent or blank proof header is treated as valid; the
    /// protocol allows unsigned legacy clients. A present proof with a
    /// missing, unparsable, or stale timestamp is invalid. Undecodable
    /// headers fail verification rather than erroring.
    #[must_use]
    pub fn verify(
        &self,
        proof: Option<&str>,
        old_proof: Option<&str>,
        url: &str,
        access_token: &str,
        timestamp: Option<&str>,
    ) -> bool {
        let proof = match proof {
            Some(p) if !p.trim().is_empty() => p,
            _ => return true,
        };

        let ticks = match timestamp.and_then(|t| t.trim().parse::<i64>().ok()) {
            Some(t) => t,
            None => return false,
        };
        if !self.timestamp_fresh(ticks) {
            return false;
        }

        let expected = expected_proof_bytes(url, access_token, ticks);

        let mut verified = verify_signature(&self.current, proof, &expected);
        if !verified {
            if let Some(old_proof) = old_proof.filter(|p| !p.trim().is_empty()) {
                verified = verify_signature(&self.current, old_proof, &expected);
                if !verified {
                    if let Some(previous) = &self.previous {
                        verified = verify_signature(previous, proof, &expected);
                    }
                }
            }
        }
        verified
    }

    /// A timestamp is fresh when it is no older than the configured
    /// window. Future-dated timestamps are accepted.
    fn timestamp_fresh(&self, ticks: i64) -> bool {
        let max_age_ticks = self.max_age.as_secs() as i64 * TICKS_PER_SECOND;
        now_ticks().saturating_sub(ticks) <= max_age_ticks
    }
}

/// Verifies one base64 signature against one key.
fn verify_signature(key: &RsaPublicKey, signature_b64: &str, expected: &[u8]) -> bool {
    let signature = match BASE64.decode(signature_b64.trim()) {
        Ok(s) => s,
        Err(_) => return false,
    };
    let digest = Sha256::digest(expected);
    key.verify(Pkcs1v15Sign::new::<Sha256>(), &digest, &signature)
        .is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rsa::RsaPrivateKey;

    fn generate_key() -> RsaPrivateKey {
        let mut rng = rand::thread_rng();
        RsaPrivateKey::new(&mut rng, 2048).unwrap()
    }

    fn sign(key: &RsaPrivateKey, expected: &[u8]) -> String {
        let digest = Sha256::digest(expected);
        let signature = key.sign(Pkcs1v15Sign::new::<Sha256>(), &digest).unwrap();
        BASE64.encode(signature)
    }

    const URL: &str = "http://localhost:8080/wopi/files/abc?access_token=tok";
    const TOKEN: &str = "tok";

    #[test]
    fn expected_bytes_layout() {
        let bytes = expected_proof_bytes("http://h/f", "tk", 42);
        // 4 + 2 (token) + 4 + 10 (uppercased url) + 4 + 8 (timestamp)
        assert_eq!(bytes.len(), 32);
        assert_eq!(&bytes[..4], &2u32.to_be_bytes());
        assert_eq!(&bytes[4..6], b"tk");
        assert_eq!(&bytes[6..10], &10u32.to_be_bytes());
        assert_eq!(&bytes[10..20], b"HTTP://H/F");
        assert_eq!(&bytes[20..24], &8u32.to_be_bytes());
        assert_eq!(&bytes[24..], &42i64.to_be_bytes());
    }

    #[test]
    fn blank_proof_is_assumed_valid() {
        let key = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);
        assert!(verifier.verify(None, None, URL, TOKEN, None));
        assert!(verifier.verify(Some("  "), None, URL, TOKEN, None));
    }

    #[test]
    fn current_key_signature_verifies() {
        let key = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);

        let ticks = now_ticks();
        let proof = sign(&key, &expected_proof_bytes(URL, TOKEN, ticks));
        assert!(verifier.verify(
            Some(&proof),
            None,
            URL,
            TOKEN,
            Some(&ticks.to_string())
        ));
    }

    #[test]
    fn wrong_key_signature_fails() {
        let key = generate_key();
        let other = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);

        let ticks = now_ticks();
        let proof = sign(&other, &expected_proof_bytes(URL, TOKEN, ticks));
        assert!(!verifier.verify(
            Some(&proof),
            None,
            URL,
            TOKEN,
            Some(&ticks.to_string())
        ));
    }

    #[test]
    fn expired_timestamp_fails_even_with_valid_signature() {
        let key = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);

        let stale = now_ticks() - 21 * 60 * TICKS_PER_SECOND;
        let proof = sign(&key, &expected_proof_bytes(URL, TOKEN, stale));
        assert!(!verifier.verify(
            Some(&proof),
            None,
            URL,
            TOKEN,
            Some(&stale.to_string())
        ));
    }

    #[test]
    fn future_timestamp_is_accepted() {
        let key = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);

        let future = now_ticks() + 60 * TICKS_PER_SECOND;
        let proof = sign(&key, &expected_proof_bytes(URL, TOKEN, future));
        assert!(verifier.verify(
            Some(&proof),
            None,
            URL,
            TOKEN,
            Some(&future.to_string())
        ));
    }

    #[test]
    fn missing_or_garbled_timestamp_fails() {
        let key = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);

        let ticks = now_ticks();
        let proof = sign(&key, &expected_proof_bytes(URL, TOKEN, ticks));
        assert!(!verifier.verify(Some(&proof), None, URL, TOKEN, None));
        assert!(!verifier.verify(Some(&proof), None, URL, TOKEN, Some("soon")));
    }

    #[test]
    fn old_proof_against_current_key_verifies() {
        // Host rotated its token; client still sends the old proof in
        // X-WOPI-ProofOld, signed with the key we now hold as current.
        let key = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);

        let ticks = now_ticks();
        let old_proof = sign(&key, &expected_proof_bytes(URL, TOKEN, ticks));
        assert!(verifier.verify(
            Some("bm90LWEtc2lnbmF0dXJl"),
            Some(&old_proof),
            URL,
            TOKEN,
            Some(&ticks.to_string())
        ));
    }

    #[test]
    fn previous_key_fallback_verifies() {
        // Client is mid-rotation: the proof is signed with the key the
        // discovery document now publishes as the old key.
        let previous = generate_key();
        let current = generate_key();
        let verifier =
            ProofKeyVerifier::new(current.to_public_key(), Some(previous.to_public_key()));

        let ticks = now_ticks();
        let expected = expected_proof_bytes(URL, TOKEN, ticks);
        let proof = sign(&previous, &expected);
        let old_proof = sign(&previous, &expected);
        assert!(verifier.verify(
            Some(&proof),
            Some(&old_proof),
            URL,
            TOKEN,
            Some(&ticks.to_string())
        ));
    }

    #[test]
    fn undecodable_proof_header_fails_without_panicking() {
        let key = generate_key();
        let verifier = ProofKeyVerifier::new(key.to_public_key(), None);
        let ticks = now_ticks();
        assert!(!verifier.verify(
            Some("%%% not base64 %%%"),
            None,
            URL,
            TOKEN,
            Some(&ticks.to_string())
        ));
    }

    #[test]
    fn key_roundtrip_through_base64_attributes() {
        let key = generate_key();
        let public = key.to_public_key();
        use rsa::traits::PublicKeyParts;
        let modulus = BASE64.encode(public.n().to_bytes_be());
        let exponent = BASE64.encode(public.e().to_bytes_be());

        let verifier = ProofKeyVerifier::from_base64(&modulus, &exponent, None).unwrap();
        let ticks = now_ticks();
        let proof = sign(&key, &expected_proof_bytes(URL, TOKEN, ticks));
        assert!(verifier.verify(
            Some(&proof),
            None,
            URL,
            TOKEN,
            Some(&ticks.to_string())
        ));
    }

    #[test]
    fn invalid_key_material_errors() {
        assert!(public_key_from_base64("*** nope ***", "AQAB").is_err());
    }
}
