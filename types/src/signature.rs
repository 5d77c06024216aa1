//! Signature records attached to lifecycle transitions.

use crate::{HexDigest, Timestamp};
use serde::{Deserialize, Serialize};

/// One party's signature over a lifecycle transition.
///
/// The provenance chain attaches up to three of these: the injector's first
/// signature, the accepting operator's second, and the minter's third.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignatureRecord {
    /// Content digest the signer committed to.
    pub hash: HexDigest,
    /// Signer identity (wallet address or operator id).
    pub signer: String,
    pub timestamp: Timestamp,
    /// Simulated chain transaction carrying this signature, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<HexDigest>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_hash_omitted_when_none() {
        let sig = SignatureRecord {
            hash: HexDigest::new(format!("0x{}", "00".repeat(32))),
            signer: "operator-1".into(),
            timestamp: Timestamp::new(1),
            tx_hash: None,
        };
        let json = serde_json::to_string(&sig).unwrap();
        assert!(!json.contains("tx_hash"));
    }
}
