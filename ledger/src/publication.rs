//! Mint-explorer publication: an append-only provenance record proving a
//! transition occurred, aggregating up to three signatures.

use serde::{Deserialize, Serialize};
use vusd_types::{
    InjectionId, LockId, PublicationCode, PublicationStatus, PublicationType, RecordId,
    ReserveId, SignatureRecord, Timestamp, UsdAmount,
};

/// The signature chain carried by a publication. A `VUSD_MINTED` publication
/// carries all three; a `LOCK_RESERVE` publication carries two.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicationSignatures {
    pub first: SignatureRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second: Option<SignatureRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third: Option<SignatureRecord>,
}

impl PublicationSignatures {
    pub fn count(&self) -> usize {
        1 + usize::from(self.second.is_some()) + usize::from(self.third.is_some())
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PublicationChain {
    pub network: String,
    pub chain_id: u64,
    pub tx_hash: vusd_types::HexDigest,
    pub block_number: u64,
    pub contract_address: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Actors {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minter: Option<String>,
    pub beneficiary: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankRef {
    pub id: String,
    pub name: String,
}

/// An explorer entry. Never mutated or deleted after creation.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Publication {
    pub id: RecordId,
    pub publication_code: PublicationCode,
    pub timestamp: Timestamp,
    #[serde(rename = "type")]
    pub publication_type: PublicationType,
    pub amount: UsdAmount,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub injection_id: Option<InjectionId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_id: Option<LockId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_reserve_id: Option<ReserveId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint_id: Option<RecordId>,
    pub signatures: PublicationSignatures,
    pub blockchain: PublicationChain,
    pub actors: Actors,
    pub bank: BankRef,
    pub status: PublicationStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use vusd_types::HexDigest;

    fn sig(n: u8) -> SignatureRecord {
        SignatureRecord {
            hash: HexDigest::new(format!("0x{:064x}", n)),
            signer: format!("signer-{n}"),
            timestamp: Timestamp::new(0),
            tx_hash: None,
        }
    }

    #[test]
    fn signature_count() {
        let two = PublicationSignatures {
            first: sig(1),
            second: Some(sig(2)),
            third: None,
        };
        assert_eq!(two.count(), 2);
        let three = PublicationSignatures {
            first: sig(1),
            second: Some(sig(2)),
            third: Some(sig(3)),
        };
        assert_eq!(three.count(), 3);
    }
}
