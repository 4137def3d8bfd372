use crate::adapters::cdp::DEFAULT_BASE_URL;
use crate::config::{secs, validate_provider};
use crate::domain::model::{Commitment, Network, SOL_ASSET_ID};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::Parser;
use std::time::Duration;

#[derive(Debug, Clone, Parser)]
#[command(name = "cdp-stake")]
#[command(about = "Stake SOL through the staking platform API and broadcast it to a Solana RPC node")]
pub struct CliConfig {
    /// Path to the platform API key JSON file
    #[arg(long, env = "CDP_API_KEY_PATH")]
    pub api_key_path: String,

    /// Path to a file holding the base58 encoded 64-byte Solana keypair
    #[arg(long, env = "SOLANA_PRIVATE_KEY_PATH")]
    pub private_key_path: String,

    /// Solana address whose funds are staked
    #[arg(long, env = "SOLANA_ADDRESS")]
    pub address: String,

    #[arg(long, default_value = "solana-devnet")]
    pub network: Network,

    #[arg(long, default_value = SOL_ASSET_ID)]
    pub asset: String,

    /// Amount to stake, in whole units
    #[arg(long, default_value = crate::config::DEFAULT_AMOUNT)]
    pub amount: String,

    #[arg(long, default_value = crate::config::DEFAULT_MODE)]
    pub mode: String,

    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub api_base_url: String,

    /// RPC endpoint; defaults to the public node of the selected network
    #[arg(long)]
    pub rpc_url: Option<String>,

    #[arg(long, default_value_t = crate::adapters::solana::rpc::DEFAULT_MAX_RETRIES)]
    pub max_retries: u32,

    #[arg(long)]
    pub skip_preflight: bool,

    #[arg(long, default_value = "processed")]
    pub preflight_commitment: Commitment,

    #[arg(long, default_value_t = crate::config::DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    #[arg(long, default_value_t = crate::config::DEFAULT_POLL_INTERVAL_SECS)]
    pub poll_interval_secs: u64,

    #[arg(long, default_value_t = crate::config::DEFAULT_POLL_TIMEOUT_SECS)]
    pub poll_timeout_secs: u64,

    /// Build and sign, but do not broadcast
    #[arg(long)]
    pub dry_run: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub log_json: bool,
}

impl ConfigProvider for CliConfig {
    fn api_key_path(&self) -> &str {
        &self.api_key_path
    }

    fn private_key_path(&self) -> &str {
        &self.private_key_path
    }

    fn address(&self) -> &str {
        &self.address
    }

    fn network(&self) -> Network {
        self.network
    }

    fn asset_id(&self) -> &str {
        &self.asset
    }

    fn amount(&self) -> &str {
        &self.amount
    }

    fn stake_mode(&self) -> &str {
        &self.mode
    }

    fn platform_base_url(&self) -> &str {
        &self.api_base_url
    }

    fn request_timeout(&self) -> Duration {
        secs(self.timeout_secs)
    }

    fn poll_interval(&self) -> Duration {
        secs(self.poll_interval_secs)
    }

    fn poll_timeout(&self) -> Duration {
        secs(self.poll_timeout_secs)
    }

    fn rpc_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .unwrap_or_else(|| self.network.default_rpc_url())
    }

    fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn skip_preflight(&self) -> bool {
        self.skip_preflight
    }

    fn preflight_commitment(&self) -> Commitment {
        self.preflight_commitment
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}
