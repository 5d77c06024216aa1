//! The pluggable signing seam.
//!
//! The orchestrator decides who signs what and when; this trait decides how.
//! [`ContentSigner`] is the demo/test implementation: a tagged content digest
//! that anyone can reproduce, honest about being a placeholder.
//! [`Ed25519Signer`] is the real thing for deployments that need authentic
//! provenance; same content bytes, actual asymmetric signature.

use ed25519_dalek::{Signer as DalekSigner, SigningKey, Verifier, VerifyingKey};
use vusd_types::HexDigest;

use crate::digest::tagged_digest;

/// Produces the signature hash attached to a lifecycle transition.
pub trait Signer {
    /// Sign `content` under the domain-separation `tag`.
    fn sign(&self, tag: &str, content: &[u8]) -> HexDigest;

    /// Identity recorded as the signer (wallet address or operator id).
    fn signer_id(&self) -> &str;
}

/// Placeholder signer: deterministic tagged Blake2b digest of the content.
///
/// Not a proof of authenticity — any party holding the content can produce
/// the same hash.
pub struct ContentSigner {
    identity: String,
}

impl ContentSigner {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
        }
    }
}

impl Signer for ContentSigner {
    fn sign(&self, tag: &str, content: &[u8]) -> HexDigest {
        tagged_digest(tag, content)
    }

    fn signer_id(&self) -> &str {
        &self.identity
    }
}

/// Real Ed25519 signer over the same tagged content bytes.
pub struct Ed25519Signer {
    key: SigningKey,
    identity: String,
}

impl Ed25519Signer {
    pub fn from_seed(seed: &[u8; 32], identity: impl Into<String>) -> Self {
        Self {
            key: SigningKey::from_bytes(seed),
            identity: identity.into(),
        }
    }

    pub fn verifying_key(&self) -> VerifyingKey {
        self.key.verifying_key()
    }

    /// Verify a signature produced by [`Signer::sign`] against the same
    /// tag and content.
    pub fn verify(key: &VerifyingKey, tag: &str, content: &[u8], sig: &HexDigest) -> bool {
        let Some(hex_part) = sig.as_str().strip_prefix("0x") else {
            return false;
        };
        let Ok(bytes) = hex::decode(hex_part) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(bytes.as_slice()) else {
            return false;
        };
        let dalek_sig = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        let message = signing_message(tag, content);
        key.verify(&message, &dalek_sig).is_ok()
    }
}

/// Tag + content framing shared by signing and verification.
fn signing_message(tag: &str, content: &[u8]) -> Vec<u8> {
    let mut message = Vec::with_capacity(8 + tag.len() + content.len());
    message.extend_from_slice(&(tag.len() as u64).to_le_bytes());
    message.extend_from_slice(tag.as_bytes());
    message.extend_from_slice(content);
    message
}

impl Signer for Ed25519Signer {
    fn sign(&self, tag: &str, content: &[u8]) -> HexDigest {
        let sig = self.key.sign(&signing_message(tag, content));
        HexDigest::new(format!("0x{}", hex::encode(sig.to_bytes())))
    }

    fn signer_id(&self) -> &str {
        &self.identity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_signer_deterministic() {
        let signer = ContentSigner::new("operator-1");
        let s1 = signer.sign("TAG_v5", b"lock data");
        let s2 = signer.sign("TAG_v5", b"lock data");
        assert_eq!(s1, s2);
        assert!(s1.is_wellformed());
    }

    #[test]
    fn content_signer_separates_tags() {
        let signer = ContentSigner::new("operator-1");
        assert_ne!(signer.sign("TAG_A", b"data"), signer.sign("TAG_B", b"data"));
    }

    #[test]
    fn ed25519_sign_and_verify() {
        let signer = Ed25519Signer::from_seed(&[7u8; 32], "0xminter");
        let sig = signer.sign("THIRD_SIGNATURE", b"mint content");
        assert!(sig.is_wellformed());
        assert!(Ed25519Signer::verify(
            &signer.verifying_key(),
            "THIRD_SIGNATURE",
            b"mint content",
            &sig
        ));
    }

    #[test]
    fn ed25519_wrong_content_fails() {
        let signer = Ed25519Signer::from_seed(&[7u8; 32], "0xminter");
        let sig = signer.sign("THIRD_SIGNATURE", b"mint content");
        assert!(!Ed25519Signer::verify(
            &signer.verifying_key(),
            "THIRD_SIGNATURE",
            b"other content",
            &sig
        ));
    }

    #[test]
    fn ed25519_wrong_tag_fails() {
        let signer = Ed25519Signer::from_seed(&[7u8; 32], "0xminter");
        let sig = signer.sign("THIRD_SIGNATURE", b"mint content");
        assert!(!Ed25519Signer::verify(
            &signer.verifying_key(),
            "SECOND_SIGNATURE",
            b"mint content",
            &sig
        ));
    }

    #[test]
    fn malformed_signature_rejected() {
        let signer = Ed25519Signer::from_seed(&[7u8; 32], "0xminter");
        assert!(!Ed25519Signer::verify(
            &signer.verifying_key(),
            "TAG",
            b"content",
            &HexDigest::new("not-hex")
        ));
    }
}
