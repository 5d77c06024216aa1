//! VUSD treasury CLI — drives the minting lifecycle against a local
//! LMDB-backed ledger.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use vusd_ledger::{AccountType, SourceAccount};
use vusd_service::{InjectParams, IsoParams, TreasuryConfig, TreasuryService};
use vusd_store_lmdb::LmdbStore;
use vusd_types::{AuthorizationCode, LockId, RecordId, UsdAmount};

#[derive(Parser)]
#[command(name = "vusd-cli", about = "VUSD treasury minting pipeline")]
struct Cli {
    /// Data directory for ledger storage.
    #[arg(long, default_value = "./vusd_data", env = "VUSD_DATA_DIR")]
    data_dir: PathBuf,

    /// Path to a TOML configuration file (bank, network, contracts).
    /// Defaults apply when omitted.
    #[arg(long, env = "VUSD_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, default_value = "info", env = "VUSD_LOG_LEVEL")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Inject USD value, deriving a pending lock.
    Inject {
        /// Amount in USD, e.g. "10000" or "10000.50".
        #[arg(long)]
        amount: String,

        /// Beneficiary wallet address.
        #[arg(long)]
        beneficiary: String,

        /// Source custody account id.
        #[arg(long, default_value = "CUST-001")]
        account_id: String,

        /// Source custody account display name.
        #[arg(long, default_value = "Treasury Custody")]
        account_name: String,

        /// ISO 20022 message id.
        #[arg(long)]
        message_id: String,

        /// ISO 20022 message type.
        #[arg(long, default_value = "pacs.008.001.08")]
        message_type: String,

        /// End-to-end id (UETR).
        #[arg(long, default_value = "")]
        end_to_end_id: String,

        /// Path to the raw ISO payload to hash.
        #[arg(long)]
        xml_file: Option<PathBuf>,
    },

    /// Accept a pending lock, splitting it into a reserve and a mint request.
    Accept {
        #[arg(long)]
        lock_id: String,

        /// Amount to reserve, in USD.
        #[arg(long)]
        amount: String,

        #[arg(long, env = "VUSD_OPERATOR")]
        operator: String,
    },

    /// Reject a pending lock.
    Reject {
        #[arg(long)]
        lock_id: String,

        #[arg(long, env = "VUSD_OPERATOR")]
        operator: String,

        #[arg(long)]
        reason: Option<String>,
    },

    /// Execute a ready mint request by authorization code.
    Mint {
        #[arg(long)]
        code: String,

        /// Minter wallet address for the third signature.
        #[arg(long)]
        minter: String,
    },

    /// Cancel a ready mint request.
    Cancel {
        #[arg(long)]
        code: String,

        #[arg(long, env = "VUSD_OPERATOR")]
        operator: String,
    },

    /// Print statistics rollups.
    Stats,

    /// List a ledger collection.
    List {
        #[command(subcommand)]
        collection: Collection,
    },

    /// Print the mint explorer publications.
    Explorer,

    /// Show pending notifications, or mark one as read.
    Notifications {
        /// Mark the notification with this id as read.
        #[arg(long)]
        mark_read: Option<String>,
    },
}

#[derive(clap::Subcommand)]
enum Collection {
    /// USD injections.
    Injections,
    /// Pending locks.
    Locks,
    /// Lock reserves.
    Reserves,
    /// Mint request queue.
    Queue,
}

/// Parse "1234" or "1234.56" into cents. At most two decimal places.
fn parse_amount(s: &str) -> anyhow::Result<UsdAmount> {
    let (dollars, cents) = match s.split_once('.') {
        Some((d, c)) => {
            anyhow::ensure!(
                !c.is_empty() && c.len() <= 2 && c.chars().all(|ch| ch.is_ascii_digit()),
                "invalid amount '{s}': at most two decimal places"
            );
            let frac: u64 = c.parse()?;
            (d, if c.len() == 1 { frac * 10 } else { frac })
        }
        None => (s, 0),
    };
    let dollars: u64 = dollars
        .parse()
        .with_context(|| format!("invalid amount '{s}'"))?;
    Ok(UsdAmount::from_cents(dollars * 100 + cents))
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level)),
        )
        .init();

    let config = match &cli.config {
        Some(path) => {
            let cfg = TreasuryConfig::from_toml_file(path)?;
            tracing::info!("Loaded config from {}", path.display());
            cfg
        }
        None => TreasuryConfig::default(),
    };

    let store = LmdbStore::open(&cli.data_dir)
        .with_context(|| format!("opening ledger store at {}", cli.data_dir.display()))?;
    let mut svc = TreasuryService::open(Box::new(store), config)?;

    match cli.command {
        Command::Inject {
            amount,
            beneficiary,
            account_id,
            account_name,
            message_id,
            message_type,
            end_to_end_id,
            xml_file,
        } => {
            let amount = parse_amount(&amount)?;
            let xml_content = match xml_file {
                Some(path) => Some(
                    std::fs::read_to_string(&path)
                        .with_context(|| format!("reading {}", path.display()))?,
                ),
                None => None,
            };
            let injection = svc.inject_usd(InjectParams {
                source_account: SourceAccount {
                    id: account_id,
                    name: account_name,
                    account_type: AccountType::Custody,
                    currency: "USD".into(),
                    balance: amount,
                },
                amount,
                beneficiary,
                iso: IsoParams {
                    message_type,
                    message_id,
                    end_to_end_id: end_to_end_id.clone(),
                    instruction_id: String::new(),
                    sender_bic: String::new(),
                    receiver_bic: String::new(),
                    sender_iban: String::new(),
                    receiver_iban: String::new(),
                    remittance_info: String::new(),
                    xml_content,
                },
            })?;
            print_json(&injection)?;
        }

        Command::Accept {
            lock_id,
            amount,
            operator,
        } => {
            let outcome = svc.accept_lock(
                &LockId::new(lock_id),
                parse_amount(&amount)?,
                &operator,
            )?;
            print_json(&outcome.lock)?;
            print_json(&outcome.reserve)?;
            if let Some(request) = &outcome.mint_request {
                print_json(request)?;
            }
        }

        Command::Reject {
            lock_id,
            operator,
            reason,
        } => {
            let lock = svc.reject_lock(&LockId::new(lock_id), &operator, reason.as_deref())?;
            print_json(&lock)?;
        }

        Command::Mint { code, minter } => {
            let minted = svc.execute_mint(&AuthorizationCode::new(code), &minter)?;
            print_json(&minted.result)?;
        }

        Command::Cancel { code, operator } => {
            let request = svc.cancel_mint_request(&AuthorizationCode::new(code), &operator)?;
            print_json(&request)?;
        }

        Command::Stats => print_json(&svc.statistics())?,

        Command::List { collection } => match collection {
            Collection::Injections => print_json(&svc.injections())?,
            Collection::Locks => print_json(&svc.pending_locks())?,
            Collection::Reserves => print_json(&svc.lock_reserves())?,
            Collection::Queue => print_json(&svc.mint_queue())?,
        },

        Command::Explorer => print_json(&svc.mint_explorer())?,

        Command::Notifications { mark_read } => match mark_read {
            Some(id) => {
                let found = svc.mark_notification_read(&RecordId::new(id))?;
                if !found {
                    anyhow::bail!("no notification with that id");
                }
                println!("marked read");
            }
            None => print_json(&svc.pending_notifications()?)?,
        },
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whole_dollars() {
        assert_eq!(parse_amount("10000").unwrap(), UsdAmount::from_cents(1_000_000));
    }

    #[test]
    fn parses_fractional_amounts() {
        assert_eq!(parse_amount("12.34").unwrap(), UsdAmount::from_cents(1_234));
        assert_eq!(parse_amount("12.3").unwrap(), UsdAmount::from_cents(1_230));
    }

    #[test]
    fn rejects_malformed_amounts() {
        assert!(parse_amount("12.345").is_err());
        assert!(parse_amount("12.").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("-5").is_err());
    }
}
