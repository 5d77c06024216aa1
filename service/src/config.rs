//! Service configuration with TOML file support.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::TreasuryError;

/// Configuration for a [`TreasuryService`](crate::TreasuryService).
///
/// Can be loaded from a TOML file via [`TreasuryConfig::from_toml_file`] or
/// built programmatically (e.g. for tests). Defaults mirror the LemonChain
/// deployment the demo pipeline simulates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TreasuryConfig {
    #[serde(default)]
    pub bank: BankConfig,
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub contracts: ContractAddresses,
}

/// Identity of the injecting bank, recorded on every lock.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BankConfig {
    #[serde(default = "default_bank_id")]
    pub id: String,
    #[serde(default = "default_bank_name")]
    pub name: String,
    /// Wallet address the bank's first signature is attributed to.
    #[serde(default = "default_bank_signer")]
    pub signer: String,
}

/// The simulated chain the records reference.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_network_name")]
    pub name: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    /// Base height for simulated block numbers.
    #[serde(default = "default_base_block")]
    pub base_block: u64,
}

/// Contract addresses stamped onto records and publications.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContractAddresses {
    #[serde(default = "default_usd_tokenized")]
    pub usd_tokenized: String,
    #[serde(default = "default_vusd")]
    pub vusd: String,
    #[serde(default = "default_vusd_minting")]
    pub vusd_minting: String,
    #[serde(default = "default_custody_vault")]
    pub custody_vault: String,
}

impl TreasuryConfig {
    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: &Path) -> Result<Self, TreasuryError> {
        let raw = std::fs::read_to_string(path).map_err(|e| TreasuryError::Validation {
            reason: format!("cannot read config {}: {e}", path.display()),
        })?;
        toml::from_str(&raw).map_err(|e| TreasuryError::Validation {
            reason: format!("invalid config {}: {e}", path.display()),
        })
    }
}

impl Default for TreasuryConfig {
    fn default() -> Self {
        Self {
            bank: BankConfig::default(),
            network: NetworkConfig::default(),
            contracts: ContractAddresses::default(),
        }
    }
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            id: default_bank_id(),
            name: default_bank_name(),
            signer: default_bank_signer(),
        }
    }
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            name: default_network_name(),
            chain_id: default_chain_id(),
            base_block: default_base_block(),
        }
    }
}

impl Default for ContractAddresses {
    fn default() -> Self {
        Self {
            usd_tokenized: default_usd_tokenized(),
            vusd: default_vusd(),
            vusd_minting: default_vusd_minting(),
            custody_vault: default_custody_vault(),
        }
    }
}

fn default_bank_id() -> String {
    "DCB-001".into()
}

fn default_bank_name() -> String {
    "Digital Commercial Bank Ltd.".into()
}

fn default_bank_signer() -> String {
    "0x772923E3f1C22A1b5Cb11722bD7B0E77BEDE8559".into()
}

fn default_network_name() -> String {
    "LemonChain Mainnet".into()
}

fn default_chain_id() -> u64 {
    1006
}

fn default_base_block() -> u64 {
    1_400_000
}

fn default_usd_tokenized() -> String {
    "0xa5288fD531D1e6dF8C1311aF9Fea473AcD380FdB".into()
}

fn default_vusd() -> String {
    "0x0bF07709c94D32c9F000c51D4Ee0BCFfEeb1011b".into()
}

fn default_vusd_minting() -> String {
    "0xaccA35529b2FC2041dFb124F83f52120E24377B2".into()
}

fn default_custody_vault() -> String {
    "0xe6f7AF72E87E58191Db058763aFB53292a72a25E".into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_lemonchain() {
        let cfg = TreasuryConfig::default();
        assert_eq!(cfg.network.chain_id, 1006);
        assert_eq!(cfg.bank.id, "DCB-001");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let cfg: TreasuryConfig = toml::from_str(
            r#"
            [bank]
            id = "TEST-9"
            "#,
        )
        .unwrap();
        assert_eq!(cfg.bank.id, "TEST-9");
        assert_eq!(cfg.bank.name, "Digital Commercial Bank Ltd.");
        assert_eq!(cfg.network.chain_id, 1006);
    }
}
