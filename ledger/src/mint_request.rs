//! Mint-with-code request: an authorized, not-yet-executed instruction to
//! convert locked USD into VUSD.

use serde::{Deserialize, Serialize};
use vusd_types::{
    AuthorizationCode, HexDigest, LockId, MintStatus, PublicationCode, RecordId, ReserveId,
    Timestamp, UsdAmount,
};

/// Result attached exactly once, atomically with the `Completed` status.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintResult {
    pub tx_hash: HexDigest,
    pub block_number: u64,
    pub vusd_amount: UsdAmount,
    pub publication_code: PublicationCode,
    pub timestamp: Timestamp,
}

/// A queued mint request.
///
/// Created directly in `ReadyToMint` — the proof hash is auto-carried from
/// the lock transaction, so there is no intermediate waiting state. Looked up
/// by `authorization_code`, which is unique among `ReadyToMint` requests.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MintRequest {
    pub id: RecordId,
    pub timestamp: Timestamp,
    pub authorization_code: AuthorizationCode,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lock_reserve_id: Option<ReserveId>,
    pub lock_id: LockId,
    pub amount_usd: UsdAmount,
    pub beneficiary: String,
    pub bank_name: String,
    /// Lock transaction reference satisfying the proof requirement.
    pub lock_hash: HexDigest,
    pub first_signature: HexDigest,
    pub second_signature: HexDigest,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_signature: Option<HexDigest>,
    pub status: MintStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mint_result: Option<MintResult>,
}

impl MintRequest {
    pub fn is_ready(&self) -> bool {
        self.status == MintStatus::ReadyToMint
    }
}
