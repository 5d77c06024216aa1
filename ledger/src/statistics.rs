//! Derived statistics rollups.
//!
//! Pure function of the current ledger state; recomputed on demand rather
//! than incrementally maintained.

use serde::{Deserialize, Serialize};
use vusd_types::{InjectionStatus, LockStatus, MintStatus, UsdAmount};

use crate::LedgerState;

/// Rollups seen from the injecting (source bank) side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DcbStats {
    pub total_injected: UsdAmount,
    pub total_tokenized: UsdAmount,
    pub pending_locks: usize,
    pub active_locks: usize,
    pub total_minted: UsdAmount,
}

/// Rollups seen from the minting side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintingStats {
    pub pending_locks: usize,
    pub accepted_locks: usize,
    pub lock_reserves: usize,
    pub mint_queue: usize,
    pub total_minted: usize,
    pub total_volume: UsdAmount,
}

/// Combined view across both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombinedStats {
    pub total_usd_locked: UsdAmount,
    pub total_vusd_minted: UsdAmount,
    pub total_transactions: usize,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreasuryStatistics {
    pub dcb: DcbStats,
    pub minting: MintingStats,
    pub combined: CombinedStats,
}

impl TreasuryStatistics {
    /// Compute the full rollup from the current ledger state.
    pub fn compute(state: &LedgerState) -> Self {
        let sum = |amounts: &mut dyn Iterator<Item = UsdAmount>| {
            amounts.fold(UsdAmount::ZERO, |acc, a| acc + a)
        };

        let injections = state.injections_ref();
        let locks = state.pending_locks_ref();
        let reserves = state.lock_reserves_ref();
        let queue = state.mint_queue_ref();

        let completed_volume = sum(&mut queue
            .iter()
            .filter(|r| r.status == MintStatus::Completed)
            .map(|r| r.amount_usd));
        let pending_locks = locks.iter().filter(|l| l.status == LockStatus::Pending).count();
        let accepted_locks = locks
            .iter()
            .filter(|l| l.status == LockStatus::Accepted)
            .count();

        Self {
            dcb: DcbStats {
                total_injected: sum(&mut injections.iter().map(|i| i.amount)),
                total_tokenized: sum(&mut injections
                    .iter()
                    .filter(|i| i.status != InjectionStatus::Pending)
                    .map(|i| i.amount)),
                pending_locks,
                active_locks: accepted_locks,
                total_minted: completed_volume,
            },
            minting: MintingStats {
                pending_locks,
                accepted_locks,
                lock_reserves: reserves.len(),
                mint_queue: queue.iter().filter(|r| r.is_ready()).count(),
                total_minted: queue
                    .iter()
                    .filter(|r| r.status == MintStatus::Completed)
                    .count(),
                total_volume: completed_volume,
            },
            combined: CombinedStats {
                total_usd_locked: sum(&mut reserves.iter().map(|r| r.amount)),
                total_vusd_minted: completed_volume,
                total_transactions: state.mint_explorer_ref().len(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{LockReserve, MintRequest};
    use vusd_types::{
        AuthorizationCode, HexDigest, LockId, RecordId, ReserveId, ReserveStatus, Timestamp,
    };

    fn reserve(cents: u64, n: &str) -> LockReserve {
        LockReserve {
            id: RecordId::new(n),
            reserve_id: ReserveId::new(format!("RSV-{n}")),
            lock_id: LockId::new("LOCK-1"),
            timestamp: Timestamp::new(0),
            amount: UsdAmount::from_cents(cents),
            currency: "USD".into(),
            beneficiary: "0xabc".into(),
            authorization_code: AuthorizationCode::new(format!("AUTH-{n}")),
            first_signature: HexDigest::new("0x01"),
            second_signature: HexDigest::new("0x02"),
            status: ReserveStatus::Reserved,
            consumed_amount: UsdAmount::ZERO,
            remaining_amount: UsdAmount::from_cents(cents),
            blockchain: None,
        }
    }

    fn request(cents: u64, n: &str, status: MintStatus) -> MintRequest {
        MintRequest {
            id: RecordId::new(n),
            timestamp: Timestamp::new(0),
            authorization_code: AuthorizationCode::new(format!("AUTH-{n}")),
            lock_reserve_id: None,
            lock_id: LockId::new("LOCK-1"),
            amount_usd: UsdAmount::from_cents(cents),
            beneficiary: "0xabc".into(),
            bank_name: "Bank".into(),
            lock_hash: HexDigest::new("0x03"),
            first_signature: HexDigest::new("0x01"),
            second_signature: HexDigest::new("0x02"),
            third_signature: None,
            status,
            mint_result: None,
        }
    }

    #[test]
    fn empty_state_is_all_zero() {
        let stats = TreasuryStatistics::compute(&LedgerState::default());
        assert_eq!(stats.combined.total_usd_locked, UsdAmount::ZERO);
        assert_eq!(stats.combined.total_transactions, 0);
        assert_eq!(stats.dcb.total_injected, UsdAmount::ZERO);
    }

    #[test]
    fn locked_total_sums_all_reserves() {
        let mut state = LedgerState::default();
        state.push_reserve(reserve(400_000, "a"));
        state.push_reserve(reserve(100_000, "b"));
        let stats = TreasuryStatistics::compute(&state);
        assert_eq!(
            stats.combined.total_usd_locked,
            UsdAmount::from_cents(500_000)
        );
        assert_eq!(stats.minting.lock_reserves, 2);
    }

    #[test]
    fn minted_total_counts_only_completed() {
        let mut state = LedgerState::default();
        state.push_mint_request(request(600_000, "a", MintStatus::Completed));
        state.push_mint_request(request(100_000, "b", MintStatus::ReadyToMint));
        state.push_mint_request(request(50_000, "c", MintStatus::Cancelled));
        let stats = TreasuryStatistics::compute(&state);
        assert_eq!(
            stats.combined.total_vusd_minted,
            UsdAmount::from_cents(600_000)
        );
        assert_eq!(stats.minting.total_minted, 1);
        assert_eq!(stats.minting.mint_queue, 1);
    }
}
