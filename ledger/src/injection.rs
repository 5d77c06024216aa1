//! Injection record: a unit of external USD value entering the system.

use serde::{Deserialize, Serialize};
use vusd_types::{
    HexDigest, InjectionId, InjectionStatus, RecordId, SignatureRecord, Timestamp, UsdAmount,
};

/// The custody/banking account the injected value came from.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SourceAccount {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub currency: String,
    pub balance: UsdAmount,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Custody,
    Banking,
    Blockchain,
}

/// ISO 20022 message metadata carried with the injection.
///
/// `xml_hash` is the tagged digest of the raw payload, computed at
/// injection time.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IsoData {
    pub message_type: String,
    pub message_id: String,
    pub end_to_end_id: String,
    pub instruction_id: String,
    pub sender_bic: String,
    pub receiver_bic: String,
    pub sender_iban: String,
    pub receiver_iban: String,
    pub remittance_info: String,
    pub xml_hash: HexDigest,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Beneficiary {
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Simulated chain reference stamped on the record.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BlockchainRef {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tx_hash: Option<HexDigest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    pub contract_address: String,
    pub chain_id: u64,
    pub network: String,
}

/// A USD injection. Created directly in `Tokenized` status with its first
/// signature attached; never mutated afterwards by the core.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Injection {
    pub id: RecordId,
    pub injection_id: InjectionId,
    pub timestamp: Timestamp,
    pub source_account: SourceAccount,
    pub amount: UsdAmount,
    pub currency: String,
    pub iso_data: IsoData,
    pub beneficiary: Beneficiary,
    pub blockchain: BlockchainRef,
    pub status: InjectionStatus,
    /// Present once status has left `Pending`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_signature: Option<SignatureRecord>,
}
