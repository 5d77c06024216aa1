//! Hex digest type for content hashes and simulated chain references.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A `0x`-prefixed hex digest string.
///
/// Content digests and simulated chain hashes are 32 bytes (64 hex chars),
/// matching the visual shape of a real chain hash; Ed25519 signatures are
/// 64 bytes (128 hex chars). The content digests produced by this system are
/// correlation hashes, not cryptographic proofs; see `vusd-crypto` for the
/// distinction.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HexDigest(String);

impl HexDigest {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the string has the expected `0x` + 64-or-128 hex shape.
    pub fn is_wellformed(&self) -> bool {
        (self.0.len() == 66 || self.0.len() == 130)
            && self.0.starts_with("0x")
            && self.0[2..].chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl fmt::Display for HexDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
