//! Identifier generation, tagged content digests, and signing for the VUSD
//! treasury pipeline.
//!
//! The digests produced here are domain-separated Blake2b correlation hashes,
//! NOT cryptographic proofs of authenticity — anyone holding the same content
//! can reproduce them. The [`Signer`] trait is the seam where a deployment
//! swaps the placeholder for real asymmetric signing.

pub mod chain;
pub mod digest;
pub mod ids;
pub mod signer;

pub use chain::{simulated_block_number, simulated_tx_hash, ChainRef};
pub use digest::{tagged_digest, tagged_digest_multi};
pub use ids::{
    new_authorization_code, new_injection_id, new_lock_id, new_publication_code, new_record_id,
    new_reserve_id,
};
pub use signer::{ContentSigner, Ed25519Signer, Signer};
