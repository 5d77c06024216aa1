//! Simulated blockchain references.
//!
//! The core never talks to a real chain; transitions are stamped with a
//! random 32-byte transaction hash and a plausible block number so records
//! keep the shape downstream explorers expect.

use vusd_types::HexDigest;

/// A simulated on-chain reference for one transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChainRef {
    pub tx_hash: HexDigest,
    pub block_number: u64,
}

impl ChainRef {
    /// Synthesize a fresh reference above the given base block height.
    pub fn simulate(base_block: u64) -> Self {
        Self {
            tx_hash: simulated_tx_hash(),
            block_number: simulated_block_number(base_block),
        }
    }
}

/// A random `0x` + 64-hex transaction hash.
pub fn simulated_tx_hash() -> HexDigest {
    let bytes: [u8; 32] = rand::random();
    HexDigest::new(format!("0x{}", hex::encode(bytes)))
}

/// A plausible block number in `[base, base + 1_000_000)`.
pub fn simulated_block_number(base: u64) -> u64 {
    base + rand::random::<u64>() % 1_000_000
}
