//! Pending lock record: a claim against an injection that a second party
//! must accept before value moves further.

use serde::{Deserialize, Serialize};
use vusd_types::{
    AuthorizationCode, InjectionId, LockId, LockStatus, RecordId, SignatureRecord, Timestamp,
    UsdAmount,
};

/// The bank standing behind the lock's first signature.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankInfo {
    pub id: String,
    pub name: String,
    pub signer: String,
}

/// ISO correlation carried over from the injection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LockIsoData {
    pub message_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uetr: Option<String>,
}

/// Where the locked funds came from, for cross-service notification.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceInfo {
    pub account_id: String,
    pub account_name: String,
    pub platform: String,
}

/// A pending lock derived from an injection.
///
/// Once accepted, `original_amount == locked_amount + available_amount` and
/// the second signature is attached. `authorization_code` is globally unique
/// and is the lookup key for mint operations.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PendingLock {
    pub id: RecordId,
    pub lock_id: LockId,
    pub timestamp: Timestamp,
    pub injection_id: InjectionId,
    pub original_amount: UsdAmount,
    pub available_amount: UsdAmount,
    pub locked_amount: UsdAmount,
    pub currency: String,
    pub beneficiary: String,
    pub bank: BankInfo,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iso_data: Option<LockIsoData>,
    pub authorization_code: AuthorizationCode,
    pub first_signature: SignatureRecord,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_signature: Option<SignatureRecord>,
    pub status: LockStatus,
    pub source_info: SourceInfo,
}

impl PendingLock {
    /// Whether the split amounts are internally consistent.
    pub fn conserves_amounts(&self) -> bool {
        self.locked_amount.checked_add(self.available_amount) == Some(self.original_amount)
    }
}
