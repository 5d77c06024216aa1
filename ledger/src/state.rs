//! The in-memory ledger collections and their write-through persistence.

use vusd_store::{get_json, keys, put_json, ObjectStore, StoreError};
use vusd_types::{AuthorizationCode, LockId, ReserveId};

use crate::{Injection, LockReserve, MintRequest, PendingLock, Publication};

/// The five record collections, reconstructed from the store at startup.
///
/// All lookups are linear scans by field predicate — fine at demo scale, and
/// a scaling limit rather than a correctness one. Getters hand out clones so
/// callers can never mutate ledger state from outside.
#[derive(Default)]
pub struct LedgerState {
    injections: Vec<Injection>,
    pending_locks: Vec<PendingLock>,
    lock_reserves: Vec<LockReserve>,
    mint_queue: Vec<MintRequest>,
    mint_explorer: Vec<Publication>,
}

impl LedgerState {
    /// Load every collection from the store. Absent keys load as empty.
    pub fn load(store: &dyn ObjectStore) -> Result<Self, StoreError> {
        Ok(Self {
            injections: get_json(store, keys::USD_INJECTIONS)?.unwrap_or_default(),
            pending_locks: get_json(store, keys::PENDING_LOCKS)?.unwrap_or_default(),
            lock_reserves: get_json(store, keys::LOCK_RESERVES)?.unwrap_or_default(),
            mint_queue: get_json(store, keys::MINT_QUEUE)?.unwrap_or_default(),
            mint_explorer: get_json(store, keys::MINT_EXPLORER)?.unwrap_or_default(),
        })
    }

    /// Write every collection back, whole. Called once per mutating
    /// orchestrator operation, after all in-memory mutations are computed —
    /// that single write point is what makes each transition atomic from the
    /// caller's view.
    pub fn save(&self, store: &dyn ObjectStore) -> Result<(), StoreError> {
        put_json(store, keys::USD_INJECTIONS, &self.injections)?;
        put_json(store, keys::PENDING_LOCKS, &self.pending_locks)?;
        put_json(store, keys::LOCK_RESERVES, &self.lock_reserves)?;
        put_json(store, keys::MINT_QUEUE, &self.mint_queue)?;
        put_json(store, keys::MINT_EXPLORER, &self.mint_explorer)?;
        Ok(())
    }

    // Defensive copies.

    pub fn injections(&self) -> Vec<Injection> {
        self.injections.clone()
    }

    pub fn pending_locks(&self) -> Vec<PendingLock> {
        self.pending_locks.clone()
    }

    pub fn lock_reserves(&self) -> Vec<LockReserve> {
        self.lock_reserves.clone()
    }

    pub fn mint_queue(&self) -> Vec<MintRequest> {
        self.mint_queue.clone()
    }

    pub fn mint_explorer(&self) -> Vec<Publication> {
        self.mint_explorer.clone()
    }

    // Internal views for the statistics rollup.

    pub(crate) fn injections_ref(&self) -> &[Injection] {
        &self.injections
    }

    pub(crate) fn pending_locks_ref(&self) -> &[PendingLock] {
        &self.pending_locks
    }

    pub(crate) fn lock_reserves_ref(&self) -> &[LockReserve] {
        &self.lock_reserves
    }

    pub(crate) fn mint_queue_ref(&self) -> &[MintRequest] {
        &self.mint_queue
    }

    pub(crate) fn mint_explorer_ref(&self) -> &[Publication] {
        &self.mint_explorer
    }

    // Mutations used by the orchestrator.

    pub fn push_injection(&mut self, injection: Injection) {
        self.injections.push(injection);
    }

    pub fn push_lock(&mut self, lock: PendingLock) {
        self.pending_locks.push(lock);
    }

    pub fn push_reserve(&mut self, reserve: LockReserve) {
        self.lock_reserves.push(reserve);
    }

    pub fn push_mint_request(&mut self, request: MintRequest) {
        self.mint_queue.push(request);
    }

    pub fn push_publication(&mut self, publication: Publication) {
        self.mint_explorer.push(publication);
    }

    pub fn find_lock(&self, lock_id: &LockId) -> Option<&PendingLock> {
        self.pending_locks.iter().find(|l| &l.lock_id == lock_id)
    }

    pub fn find_lock_mut(&mut self, lock_id: &LockId) -> Option<&mut PendingLock> {
        self.pending_locks
            .iter_mut()
            .find(|l| &l.lock_id == lock_id)
    }

    /// The ready request matching `code`, if any. Completed and cancelled
    /// requests are invisible to this lookup.
    pub fn find_ready_request_mut(
        &mut self,
        code: &AuthorizationCode,
    ) -> Option<&mut MintRequest> {
        self.mint_queue
            .iter_mut()
            .find(|r| &r.authorization_code == code && r.is_ready())
    }

    pub fn find_reserve_mut(&mut self, reserve_id: &ReserveId) -> Option<&mut LockReserve> {
        self.lock_reserves
            .iter_mut()
            .find(|r| &r.reserve_id == reserve_id)
    }
}
