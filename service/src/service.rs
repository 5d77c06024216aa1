//! The lifecycle orchestrator.
//!
//! Drives the full custody pipeline: USD injection derives a pending lock;
//! acceptance splits the lock into a reserve and an onward mint request;
//! mint execution consumes the request, advances the reserve, and publishes
//! the three-signature provenance record.
//!
//! Every mutating operation computes all in-memory effects first and then
//! persists the collections in one write-through pass; events fire only
//! after the write succeeds, so a storage failure leaves no observable
//! half-transition.

use serde_json::json;

use vusd_crypto::{
    new_authorization_code, new_injection_id, new_lock_id, new_publication_code, new_record_id,
    new_reserve_id, tagged_digest, ChainRef, ContentSigner, Signer,
};
use vusd_ledger::{
    Actors, BankInfo, BankRef, Beneficiary, BlockchainRef, Injection, IsoData, LedgerState,
    LockIsoData, LockReserve, MintRequest, MintResult, NotificationEvent, PendingLock,
    Publication, PublicationChain, PublicationSignatures, SourceAccount, SourceInfo,
    TreasuryStatistics,
};
use vusd_ledger::reserve::ReserveChainRef;
use vusd_store::{check_schema, keys, put_json, ObjectStore};
use vusd_types::{
    AuthorizationCode, HexDigest, InjectionStatus, LockId, LockStatus, MintStatus,
    PublicationStatus, PublicationType, RecordId, SignatureRecord, Timestamp, UsdAmount,
};

use crate::events::{EventBus, SubscriptionId, Topic, TreasuryEvent};
use crate::notify::Mailbox;
use crate::{TreasuryConfig, TreasuryError};

/// Domain-separation tags, versioned with the platform protocol.
const XML_HASH_TAG: &str = "XML_HASH";
const FIRST_SIGNATURE_TAG: &str = "DCB_TREASURY_DAES_FIRST_SIGNATURE_v5";
const SECOND_SIGNATURE_TAG: &str = "TREASURY_MINTING_SECOND_SIGNATURE_v5";
const THIRD_SIGNATURE_TAG: &str = "VUSD_MINTING_THIRD_SIGNATURE_BACKED_v5";

/// ISO 20022 message metadata supplied with an injection.
#[derive(Clone, Debug)]
pub struct IsoParams {
    pub message_type: String,
    pub message_id: String,
    pub end_to_end_id: String,
    pub instruction_id: String,
    pub sender_bic: String,
    pub receiver_bic: String,
    pub sender_iban: String,
    pub receiver_iban: String,
    pub remittance_info: String,
    /// Raw payload for hashing; falls back to the message id when absent.
    pub xml_content: Option<String>,
}

/// Input to [`TreasuryService::inject_usd`].
#[derive(Clone, Debug)]
pub struct InjectParams {
    pub source_account: SourceAccount,
    pub amount: UsdAmount,
    pub beneficiary: String,
    pub iso: IsoParams,
}

/// Everything a successful acceptance derived.
#[derive(Clone, Debug)]
pub struct AcceptOutcome {
    pub lock: PendingLock,
    pub reserve: LockReserve,
    pub mint_request: Option<MintRequest>,
}

/// Result of a successful mint execution.
#[derive(Clone, Debug)]
pub struct ExecutedMint {
    pub authorization_code: AuthorizationCode,
    pub third_signature: HexDigest,
    pub result: MintResult,
}

/// The treasury lifecycle orchestrator.
///
/// Owns the store, the in-memory ledger collections, and the event bus.
/// Mutating operations take `&mut self` — one active writer per instance,
/// enforced by the borrow checker.
pub struct TreasuryService {
    store: Box<dyn ObjectStore>,
    config: TreasuryConfig,
    signer: Box<dyn Signer + Send + Sync>,
    state: LedgerState,
    bus: EventBus,
}

impl TreasuryService {
    /// Open a service over `store` with the placeholder content signer.
    pub fn open(store: Box<dyn ObjectStore>, config: TreasuryConfig) -> Result<Self, TreasuryError> {
        let signer = Box::new(ContentSigner::new(config.bank.signer.clone()));
        Self::with_signer(store, config, signer)
    }

    /// Open a service with an explicit signer implementation.
    pub fn with_signer(
        store: Box<dyn ObjectStore>,
        config: TreasuryConfig,
        signer: Box<dyn Signer + Send + Sync>,
    ) -> Result<Self, TreasuryError> {
        check_schema(store.as_ref())?;
        let state = LedgerState::load(store.as_ref())?;
        Ok(Self {
            store,
            config,
            signer,
            state,
            bus: EventBus::new(),
        })
    }

    // ------------------------------------------------------------------
    // Event subscriptions
    // ------------------------------------------------------------------

    pub fn on(
        &mut self,
        topic: Topic,
        listener: impl Fn(&TreasuryEvent) + Send + Sync + 'static,
    ) -> SubscriptionId {
        self.bus.on(topic, listener)
    }

    pub fn off(&mut self, topic: Topic, id: SubscriptionId) -> bool {
        self.bus.off(topic, id)
    }

    // ------------------------------------------------------------------
    // Step 1+2: USD injection and the derived pending lock
    // ------------------------------------------------------------------

    /// Inject USD value. Creates the injection (directly `tokenized`, first
    /// signature attached) and synchronously derives exactly one pending
    /// lock covering the full amount.
    pub fn inject_usd(&mut self, params: InjectParams) -> Result<Injection, TreasuryError> {
        if params.amount.is_zero() {
            return Err(TreasuryError::Validation {
                reason: "injection amount must be positive".into(),
            });
        }
        if params.beneficiary.is_empty() {
            return Err(TreasuryError::Validation {
                reason: "beneficiary is required".into(),
            });
        }
        if params.iso.message_id.is_empty() {
            return Err(TreasuryError::Validation {
                reason: "ISO message id is required".into(),
            });
        }

        let injection_id = new_injection_id();
        let timestamp = Timestamp::now();

        let payload = params
            .iso
            .xml_content
            .clone()
            .unwrap_or_else(|| params.iso.message_id.clone());
        let xml_hash = tagged_digest(XML_HASH_TAG, payload.as_bytes());

        let first_hash = self.signer.sign(
            FIRST_SIGNATURE_TAG,
            format!(
                "{}_{}_{}_{}",
                injection_id,
                params.amount.cents(),
                params.beneficiary,
                timestamp.as_millis()
            )
            .as_bytes(),
        );
        let chain = ChainRef::simulate(self.config.network.base_block);
        let first_signature = SignatureRecord {
            hash: first_hash,
            signer: self.config.bank.signer.clone(),
            timestamp,
            tx_hash: Some(chain.tx_hash.clone()),
        };

        let injection = Injection {
            id: new_record_id(),
            injection_id: injection_id.clone(),
            timestamp,
            source_account: params.source_account.clone(),
            amount: params.amount,
            currency: "USD".into(),
            iso_data: IsoData {
                message_type: params.iso.message_type,
                message_id: params.iso.message_id.clone(),
                end_to_end_id: params.iso.end_to_end_id.clone(),
                instruction_id: params.iso.instruction_id,
                sender_bic: params.iso.sender_bic,
                receiver_bic: params.iso.receiver_bic,
                sender_iban: params.iso.sender_iban,
                receiver_iban: params.iso.receiver_iban,
                remittance_info: params.iso.remittance_info,
                xml_hash,
            },
            beneficiary: Beneficiary {
                address: params.beneficiary.clone(),
                name: None,
            },
            blockchain: BlockchainRef {
                tx_hash: Some(chain.tx_hash),
                block_number: Some(chain.block_number),
                contract_address: self.config.contracts.usd_tokenized.clone(),
                chain_id: self.config.network.chain_id,
                network: self.config.network.name.clone(),
            },
            status: InjectionStatus::Tokenized,
            first_signature: Some(first_signature.clone()),
        };

        let lock = PendingLock {
            id: new_record_id(),
            lock_id: new_lock_id(),
            timestamp,
            injection_id,
            original_amount: params.amount,
            available_amount: params.amount,
            locked_amount: UsdAmount::ZERO,
            currency: "USD".into(),
            beneficiary: params.beneficiary,
            bank: BankInfo {
                id: self.config.bank.id.clone(),
                name: self.config.bank.name.clone(),
                signer: self.config.bank.signer.clone(),
            },
            iso_data: Some(LockIsoData {
                message_id: params.iso.message_id,
                uetr: Some(params.iso.end_to_end_id),
            }),
            authorization_code: new_authorization_code(),
            first_signature,
            second_signature: None,
            status: LockStatus::Pending,
            source_info: SourceInfo {
                account_id: params.source_account.id,
                account_name: params.source_account.name,
                platform: "dcb_treasury".into(),
            },
        };

        self.state.push_injection(injection.clone());
        self.state.push_lock(lock.clone());
        self.commit(vec![
            TreasuryEvent::Injected {
                injection: injection.clone(),
            },
            TreasuryEvent::PendingLockCreated { lock: lock.clone() },
        ])?;

        tracing::info!(
            injection_id = %injection.injection_id,
            lock_id = %lock.lock_id,
            amount = %injection.amount,
            "USD injected, pending lock created"
        );
        Ok(injection)
    }

    // ------------------------------------------------------------------
    // Step 3-5: lock acceptance, reserve carve-out, mint request
    // ------------------------------------------------------------------

    /// Accept a pending lock, splitting its value.
    ///
    /// Always carves out exactly one reserve of `accepted_amount` (zero
    /// included); the remainder, when positive, becomes a ready-to-mint
    /// request. Conservation holds unconditionally:
    /// `reserve.amount + mint_request.amount == lock.original_amount`.
    pub fn accept_lock(
        &mut self,
        lock_id: &LockId,
        accepted_amount: UsdAmount,
        operator: &str,
    ) -> Result<AcceptOutcome, TreasuryError> {
        let timestamp = Timestamp::now();

        let Some(lock) = self.state.find_lock(lock_id) else {
            return Err(TreasuryError::NotFound {
                what: format!("lock {lock_id}"),
            });
        };
        if lock.status != LockStatus::Pending {
            return Err(TreasuryError::Validation {
                reason: format!("lock {lock_id} is not pending"),
            });
        }
        if accepted_amount > lock.original_amount {
            return Err(TreasuryError::Validation {
                reason: format!(
                    "accepted amount {accepted_amount} exceeds lock amount {}",
                    lock.original_amount
                ),
            });
        }

        let original_amount = lock.original_amount;
        let remainder = original_amount - accepted_amount;
        let beneficiary = lock.beneficiary.clone();
        let authorization_code = lock.authorization_code.clone();
        let first_signature = lock.first_signature.clone();
        let bank_name = lock.bank.name.clone();

        let second_hash = self.signer.sign(
            SECOND_SIGNATURE_TAG,
            format!(
                "{}_{}_{}_{}",
                lock_id,
                accepted_amount.cents(),
                operator,
                timestamp.as_millis()
            )
            .as_bytes(),
        );
        let lock_chain = ChainRef::simulate(self.config.network.base_block);
        let second_signature = SignatureRecord {
            hash: second_hash.clone(),
            signer: operator.to_string(),
            timestamp,
            tx_hash: Some(lock_chain.tx_hash.clone()),
        };

        let lock = self
            .state
            .find_lock_mut(lock_id)
            .expect("lock existence checked above");
        lock.second_signature = Some(second_signature);
        lock.status = LockStatus::Accepted;
        lock.locked_amount = accepted_amount;
        lock.available_amount = remainder;
        let lock = lock.clone();

        let reserve_chain = ChainRef::simulate(self.config.network.base_block);
        let reserve = LockReserve {
            id: new_record_id(),
            reserve_id: new_reserve_id(),
            lock_id: lock_id.clone(),
            timestamp,
            amount: accepted_amount,
            currency: "USD".into(),
            beneficiary: beneficiary.clone(),
            authorization_code: authorization_code.clone(),
            first_signature: first_signature.hash.clone(),
            second_signature: second_hash.clone(),
            status: LockReserve::derive_status(UsdAmount::ZERO, accepted_amount),
            consumed_amount: UsdAmount::ZERO,
            remaining_amount: accepted_amount,
            blockchain: Some(ReserveChainRef {
                tx_hash: reserve_chain.tx_hash.clone(),
                block_number: reserve_chain.block_number,
            }),
        };
        self.state.push_reserve(reserve.clone());

        let mint_request = if remainder > UsdAmount::ZERO {
            let request = MintRequest {
                id: new_record_id(),
                timestamp,
                authorization_code: authorization_code.clone(),
                lock_reserve_id: Some(reserve.reserve_id.clone()),
                lock_id: lock_id.clone(),
                amount_usd: remainder,
                beneficiary: beneficiary.clone(),
                bank_name,
                lock_hash: lock_chain.tx_hash.clone(),
                first_signature: first_signature.hash.clone(),
                second_signature: second_hash.clone(),
                third_signature: None,
                status: MintStatus::ReadyToMint,
                mint_result: None,
            };
            self.state.push_mint_request(request.clone());
            Some(request)
        } else {
            None
        };

        let publication = self.build_publication(PublicationParams {
            publication_type: PublicationType::LockReserve,
            amount: accepted_amount,
            currency: "USD".into(),
            lock_id: Some(lock_id.clone()),
            lock_reserve_id: Some(reserve.reserve_id.clone()),
            mint_id: None,
            injection_id: None,
            signatures: PublicationSignatures {
                first: SignatureRecord {
                    hash: first_signature.hash.clone(),
                    signer: self.config.bank.signer.clone(),
                    timestamp,
                    tx_hash: None,
                },
                second: Some(SignatureRecord {
                    hash: second_hash.clone(),
                    signer: self.config.contracts.vusd_minting.clone(),
                    timestamp,
                    tx_hash: None,
                }),
                third: None,
            },
            beneficiary: beneficiary.clone(),
            chain: reserve_chain,
            publication_code: None,
            timestamp,
        });
        self.state.push_publication(publication.clone());

        Mailbox::push(
            self.store.as_ref(),
            NotificationEvent::LockAccepted,
            json!({
                "lock_id": lock_id.as_str(),
                "accepted_amount_cents": accepted_amount.cents(),
                "lock_reserve_id": reserve.reserve_id.as_str(),
                "second_signature": second_hash.as_str(),
                "timestamp": timestamp.as_millis(),
            }),
        )?;

        let mut events = vec![
            TreasuryEvent::LockReserveCreated {
                reserve: reserve.clone(),
            },
            TreasuryEvent::PublicationCreated { publication },
        ];
        if let Some(request) = &mint_request {
            events.push(TreasuryEvent::MintRequestCreated {
                request: request.clone(),
            });
        }
        events.push(TreasuryEvent::Accepted {
            lock: lock.clone(),
            reserve: reserve.clone(),
            mint_request: mint_request.clone(),
        });
        self.commit(events)?;

        tracing::info!(
            lock_id = %lock_id,
            reserved = %accepted_amount,
            for_mint = %remainder,
            operator,
            "lock accepted"
        );
        Ok(AcceptOutcome {
            lock,
            reserve,
            mint_request,
        })
    }

    /// Reject a pending lock. Terminal; no derived records.
    pub fn reject_lock(
        &mut self,
        lock_id: &LockId,
        operator: &str,
        reason: Option<&str>,
    ) -> Result<PendingLock, TreasuryError> {
        let Some(lock) = self.state.find_lock_mut(lock_id) else {
            return Err(TreasuryError::NotFound {
                what: format!("lock {lock_id}"),
            });
        };
        if lock.status != LockStatus::Pending {
            return Err(TreasuryError::Validation {
                reason: format!("lock {lock_id} is not pending"),
            });
        }
        lock.status = LockStatus::Rejected;
        let lock = lock.clone();

        Mailbox::push(
            self.store.as_ref(),
            NotificationEvent::LockRejected,
            json!({
                "lock_id": lock_id.as_str(),
                "operator": operator,
                "reason": reason,
                "timestamp": Timestamp::now().as_millis(),
            }),
        )?;
        self.commit(vec![TreasuryEvent::LockRejected { lock: lock.clone() }])?;

        tracing::info!(lock_id = %lock_id, operator, "lock rejected");
        Ok(lock)
    }

    // ------------------------------------------------------------------
    // Step 6: mint execution
    // ------------------------------------------------------------------

    /// Execute a ready mint request.
    ///
    /// Not idempotent: once completed, the request is invisible to the
    /// ready-scoped lookup and a repeat call fails with `NotFound`.
    /// When the request references a reserve, an amount exceeding the
    /// reserve's remaining value fails with `Conflict` before any mutation.
    pub fn execute_mint(
        &mut self,
        authorization_code: &AuthorizationCode,
        minter_wallet: &str,
    ) -> Result<ExecutedMint, TreasuryError> {
        let timestamp = Timestamp::now();

        let Some(request) = self.state.find_ready_request_mut(authorization_code) else {
            return Err(TreasuryError::NotFound {
                what: format!("ready mint request for {authorization_code}"),
            });
        };
        let amount = request.amount_usd;
        let reserve_id = request.lock_reserve_id.clone();

        // Over-consumption guard, before any mutation.
        if let Some(reserve_id) = &reserve_id {
            if let Some(reserve) = self.state.find_reserve_mut(reserve_id) {
                if amount > reserve.remaining_amount {
                    return Err(TreasuryError::Conflict {
                        reason: format!(
                            "mint amount {amount} exceeds remaining reserve {}",
                            reserve.remaining_amount
                        ),
                    });
                }
            }
        }

        let third_hash = self.signer.sign(
            THIRD_SIGNATURE_TAG,
            format!(
                "{}_{}_{}_{}",
                authorization_code,
                amount.cents(),
                minter_wallet,
                timestamp.as_millis()
            )
            .as_bytes(),
        );
        let chain = ChainRef::simulate(self.config.network.base_block);
        let publication_code = new_publication_code();

        let result = MintResult {
            tx_hash: chain.tx_hash.clone(),
            block_number: chain.block_number,
            vusd_amount: amount,
            publication_code: publication_code.clone(),
            timestamp,
        };

        let request = self
            .state
            .find_ready_request_mut(authorization_code)
            .expect("request existence checked above");
        request.third_signature = Some(third_hash.clone());
        request.status = MintStatus::Completed;
        request.mint_result = Some(result.clone());
        let request = request.clone();

        if let Some(reserve_id) = &reserve_id {
            if let Some(reserve) = self.state.find_reserve_mut(reserve_id) {
                reserve.consume(amount)?;
            }
        }

        let publication = self.build_publication(PublicationParams {
            publication_type: PublicationType::VusdMinted,
            amount,
            currency: "VUSD".into(),
            lock_id: Some(request.lock_id.clone()),
            lock_reserve_id: reserve_id,
            mint_id: Some(request.id.clone()),
            injection_id: None,
            signatures: PublicationSignatures {
                first: SignatureRecord {
                    hash: request.first_signature.clone(),
                    signer: self.config.bank.signer.clone(),
                    timestamp,
                    tx_hash: None,
                },
                second: Some(SignatureRecord {
                    hash: request.second_signature.clone(),
                    signer: self.config.contracts.vusd_minting.clone(),
                    timestamp,
                    tx_hash: None,
                }),
                third: Some(SignatureRecord {
                    hash: third_hash.clone(),
                    signer: minter_wallet.to_string(),
                    timestamp,
                    tx_hash: None,
                }),
            },
            beneficiary: request.beneficiary.clone(),
            chain,
            publication_code: Some(publication_code),
            timestamp,
        });
        self.state.push_publication(publication.clone());

        Mailbox::push(
            self.store.as_ref(),
            NotificationEvent::VusdMinted,
            json!({
                "authorization_code": authorization_code.as_str(),
                "lock_id": request.lock_id.as_str(),
                "amount_cents": amount.cents(),
                "tx_hash": result.tx_hash.as_str(),
                "block_number": result.block_number,
                "publication_code": result.publication_code.as_str(),
                "third_signature": third_hash.as_str(),
                "minter": minter_wallet,
                "timestamp": timestamp.as_millis(),
            }),
        )?;

        self.commit(vec![
            TreasuryEvent::MintCompleted {
                request: request.clone(),
            },
            TreasuryEvent::PublicationCreated { publication },
        ])?;

        tracing::info!(
            authorization_code = %authorization_code,
            amount = %amount,
            publication = %result.publication_code,
            "VUSD minted"
        );
        Ok(ExecutedMint {
            authorization_code: authorization_code.clone(),
            third_signature: third_hash,
            result,
        })
    }

    /// Cancel a ready mint request. The linked reserve is untouched —
    /// nothing was consumed yet.
    pub fn cancel_mint_request(
        &mut self,
        authorization_code: &AuthorizationCode,
        operator: &str,
    ) -> Result<MintRequest, TreasuryError> {
        let Some(request) = self.state.find_ready_request_mut(authorization_code) else {
            return Err(TreasuryError::NotFound {
                what: format!("ready mint request for {authorization_code}"),
            });
        };
        request.status = MintStatus::Cancelled;
        let request = request.clone();
        self.commit(vec![TreasuryEvent::MintRequestCancelled {
            request: request.clone(),
        }])?;

        tracing::info!(
            authorization_code = %authorization_code,
            operator,
            "mint request cancelled"
        );
        Ok(request)
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    pub fn injections(&self) -> Vec<Injection> {
        self.state.injections()
    }

    pub fn pending_locks(&self) -> Vec<PendingLock> {
        self.state.pending_locks()
    }

    pub fn lock_reserves(&self) -> Vec<LockReserve> {
        self.state.lock_reserves()
    }

    pub fn mint_queue(&self) -> Vec<MintRequest> {
        self.state.mint_queue()
    }

    pub fn mint_explorer(&self) -> Vec<Publication> {
        self.state.mint_explorer()
    }

    /// Statistics, recomputed from current state on every call.
    pub fn statistics(&self) -> TreasuryStatistics {
        TreasuryStatistics::compute(&self.state)
    }

    pub fn pending_notifications(&self) -> Result<Vec<vusd_ledger::Notification>, TreasuryError> {
        Ok(Mailbox::pending(self.store.as_ref())?)
    }

    pub fn mark_notification_read(&self, id: &RecordId) -> Result<bool, TreasuryError> {
        Ok(Mailbox::mark_read(self.store.as_ref(), id)?)
    }

    /// Reload every collection from the store and re-announce statistics.
    pub fn refresh(&mut self) -> Result<(), TreasuryError> {
        self.state = LedgerState::load(self.store.as_ref())?;
        let statistics = self.persist_statistics()?;
        self.bus.emit(&TreasuryEvent::DataRefreshed { statistics });
        Ok(())
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Write-through persistence followed by event fan-out. Nothing is
    /// emitted when the write fails.
    fn commit(&mut self, events: Vec<TreasuryEvent>) -> Result<(), TreasuryError> {
        self.state.save(self.store.as_ref())?;
        let statistics = self.persist_statistics()?;
        for event in &events {
            self.bus.emit(event);
        }
        self.bus
            .emit(&TreasuryEvent::StatisticsUpdated { statistics });
        Ok(())
    }

    fn persist_statistics(&self) -> Result<TreasuryStatistics, TreasuryError> {
        let statistics = TreasuryStatistics::compute(&self.state);
        put_json(self.store.as_ref(), keys::STATISTICS, &statistics)?;
        Ok(statistics)
    }

    fn build_publication(&self, params: PublicationParams) -> Publication {
        Publication {
            id: new_record_id(),
            publication_code: params
                .publication_code
                .unwrap_or_else(new_publication_code),
            timestamp: params.timestamp,
            publication_type: params.publication_type,
            amount: params.amount,
            currency: params.currency,
            injection_id: params.injection_id,
            lock_id: params.lock_id,
            lock_reserve_id: params.lock_reserve_id,
            mint_id: params.mint_id,
            signatures: params.signatures,
            blockchain: PublicationChain {
                network: self.config.network.name.clone(),
                chain_id: self.config.network.chain_id,
                tx_hash: params.chain.tx_hash,
                block_number: params.chain.block_number,
                contract_address: self.config.contracts.vusd.clone(),
            },
            actors: Actors {
                injector: None,
                locker: None,
                minter: None,
                beneficiary: params.beneficiary,
            },
            bank: BankRef {
                id: self.config.bank.id.clone(),
                name: self.config.bank.name.clone(),
            },
            status: PublicationStatus::Published,
        }
    }
}

struct PublicationParams {
    publication_type: PublicationType,
    amount: UsdAmount,
    currency: String,
    lock_id: Option<LockId>,
    lock_reserve_id: Option<vusd_types::ReserveId>,
    mint_id: Option<RecordId>,
    injection_id: Option<vusd_types::InjectionId>,
    signatures: PublicationSignatures,
    beneficiary: String,
    chain: ChainRef,
    publication_code: Option<vusd_types::PublicationCode>,
    timestamp: Timestamp,
}
