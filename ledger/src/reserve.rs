//! Lock reserve record: the accepted portion of a lock, held and tracked
//! for partial consumption by mint executions.

use serde::{Deserialize, Serialize};
use vusd_types::{
    AuthorizationCode, HexDigest, LockId, RecordId, ReserveId, ReserveStatus, Timestamp,
    UsdAmount,
};

use crate::LedgerError;

/// Chain reference for the reserve-creation transaction.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ReserveChainRef {
    pub tx_hash: HexDigest,
    pub block_number: u64,
}

/// A carved-out reserve. `amount == consumed_amount + remaining_amount` at
/// all times; `status` is derived from the counters, never set directly.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LockReserve {
    pub id: RecordId,
    pub reserve_id: ReserveId,
    pub lock_id: LockId,
    pub timestamp: Timestamp,
    pub amount: UsdAmount,
    pub currency: String,
    pub beneficiary: String,
    pub authorization_code: AuthorizationCode,
    pub first_signature: HexDigest,
    pub second_signature: HexDigest,
    pub status: ReserveStatus,
    pub consumed_amount: UsdAmount,
    pub remaining_amount: UsdAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blockchain: Option<ReserveChainRef>,
}

impl LockReserve {
    /// Consume part of the reserve, advancing the counters and re-deriving
    /// the status. Fails without mutation when `amount` exceeds what
    /// remains — the counters never cross their bounds.
    pub fn consume(&mut self, amount: UsdAmount) -> Result<(), LedgerError> {
        let remaining = self
            .remaining_amount
            .checked_sub(amount)
            .ok_or(LedgerError::OverConsumption {
                requested: amount.cents(),
                remaining: self.remaining_amount.cents(),
            })?;
        // checked_add cannot fail here: consumed + remaining == amount held.
        self.consumed_amount = self.consumed_amount + amount;
        self.remaining_amount = remaining;
        self.status = Self::derive_status(self.consumed_amount, self.remaining_amount);
        Ok(())
    }

    /// `FullyConsumed` iff nothing remains; `PartiallyConsumed` once anything
    /// was consumed; `Reserved` otherwise.
    pub fn derive_status(consumed: UsdAmount, remaining: UsdAmount) -> ReserveStatus {
        if remaining.is_zero() {
            ReserveStatus::FullyConsumed
        } else if !consumed.is_zero() {
            ReserveStatus::PartiallyConsumed
        } else {
            ReserveStatus::Reserved
        }
    }

    /// Whether the consumption counters are internally consistent.
    pub fn conserves_amounts(&self) -> bool {
        self.consumed_amount.checked_add(self.remaining_amount) == Some(self.amount)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reserve(cents: u64) -> LockReserve {
        LockReserve {
            id: RecordId::new("r1"),
            reserve_id: ReserveId::new("RSV-1"),
            lock_id: LockId::new("LOCK-1"),
            timestamp: Timestamp::new(0),
            amount: UsdAmount::from_cents(cents),
            currency: "USD".into(),
            beneficiary: "0xabc".into(),
            authorization_code: AuthorizationCode::new("AUTH-1"),
            first_signature: HexDigest::new("0x01"),
            second_signature: HexDigest::new("0x02"),
            status: ReserveStatus::Reserved,
            consumed_amount: UsdAmount::ZERO,
            remaining_amount: UsdAmount::from_cents(cents),
            blockchain: None,
        }
    }

    #[test]
    fn partial_consumption() {
        let mut r = reserve(1000);
        r.consume(UsdAmount::from_cents(400)).unwrap();
        assert_eq!(r.consumed_amount, UsdAmount::from_cents(400));
        assert_eq!(r.remaining_amount, UsdAmount::from_cents(600));
        assert_eq!(r.status, ReserveStatus::PartiallyConsumed);
        assert!(r.conserves_amounts());
    }

    #[test]
    fn full_consumption() {
        let mut r = reserve(1000);
        r.consume(UsdAmount::from_cents(1000)).unwrap();
        assert_eq!(r.status, ReserveStatus::FullyConsumed);
        assert!(r.remaining_amount.is_zero());
    }

    #[test]
    fn over_consumption_fails_without_mutation() {
        let mut r = reserve(1000);
        let err = r.consume(UsdAmount::from_cents(1001)).unwrap_err();
        assert!(matches!(
            err,
            LedgerError::OverConsumption {
                requested: 1001,
                remaining: 1000
            }
        ));
        assert_eq!(r.consumed_amount, UsdAmount::ZERO);
        assert_eq!(r.remaining_amount, UsdAmount::from_cents(1000));
        assert_eq!(r.status, ReserveStatus::Reserved);
    }

    #[test]
    fn zero_reserve_is_fully_consumed_shape() {
        // A zero-amount reserve starts with nothing remaining.
        assert_eq!(
            LockReserve::derive_status(UsdAmount::ZERO, UsdAmount::ZERO),
            ReserveStatus::FullyConsumed
        );
    }

    #[test]
    fn consume_in_steps() {
        let mut r = reserve(1000);
        r.consume(UsdAmount::from_cents(300)).unwrap();
        r.consume(UsdAmount::from_cents(700)).unwrap();
        assert_eq!(r.status, ReserveStatus::FullyConsumed);
        assert!(r.conserves_amounts());
    }
}
