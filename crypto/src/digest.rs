//! Blake2b tagged content digests.
//!
//! Every digest is domain-separated by a tag string (`XML_HASH`,
//! `DCB_TREASURY_DAES_FIRST_SIGNATURE_v5`, ...) so the same content hashed
//! for two purposes never collides. Digests are deterministic over
//! (tag, content); the time-varying part of a signature comes from the
//! timestamp included in the signed content itself.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use vusd_types::HexDigest;

type Blake2b256 = Blake2b<U32>;

/// Compute a 256-bit tagged digest of one content slice.
pub fn tagged_digest(tag: &str, content: &[u8]) -> HexDigest {
    tagged_digest_multi(tag, &[content])
}

/// Compute a 256-bit tagged digest over multiple content slices
/// (avoids concatenation allocation). Each part is length-prefixed so
/// `["ab", "c"]` and `["a", "bc"]` hash differently.
pub fn tagged_digest_multi(tag: &str, parts: &[&[u8]]) -> HexDigest {
    let mut hasher = Blake2b256::new();
    hasher.update((tag.len() as u64).to_le_bytes());
    hasher.update(tag.as_bytes());
    for part in parts {
        hasher.update((part.len() as u64).to_le_bytes());
        hasher.update(part);
    }
    let result = hasher.finalize();
    HexDigest::new(format!("0x{}", hex::encode(result)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_deterministic() {
        let d1 = tagged_digest("XML_HASH", b"payload");
        let d2 = tagged_digest("XML_HASH", b"payload");
        assert_eq!(d1, d2);
    }

    #[test]
    fn tag_separates_domains() {
        let d1 = tagged_digest("XML_HASH", b"same content");
        let d2 = tagged_digest("FIRST_SIGNATURE", b"same content");
        assert_ne!(d1, d2);
    }

    #[test]
    fn parts_are_length_prefixed() {
        let d1 = tagged_digest_multi("t", &[b"ab", b"c"]);
        let d2 = tagged_digest_multi("t", &[b"a", b"bc"]);
        assert_ne!(d1, d2);
    }

    #[test]
    fn digest_has_chain_hash_shape() {
        let d = tagged_digest("t", b"x");
        assert!(d.is_wellformed());
        assert_eq!(d.as_str().len(), 66);
    }
}
