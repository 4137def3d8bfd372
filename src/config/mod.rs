#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::CliConfig;

use crate::adapters::cdp::{ApiKey, CdpClient};
use crate::adapters::keyfile;
use crate::adapters::solana::{SendTransactionOptions, SolanaRpcClient};
use crate::core::stake::{StakeEngine, StakeRequest};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_path, validate_positive_amount, validate_range, validate_solana_address,
    validate_url,
};
use std::time::Duration;

pub const DEFAULT_AMOUNT: &str = "0.1";
pub const DEFAULT_MODE: &str = "default";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 2;
pub const DEFAULT_POLL_TIMEOUT_SECS: u64 = 60;
pub const MAX_RPC_RETRIES: u32 = 100;

/// 所有設定來源共用的驗證規則
pub fn validate_provider<C: ConfigProvider + ?Sized>(config: &C) -> Result<()> {
    validate_path("api_key_path", config.api_key_path())?;
    validate_path("private_key_path", config.private_key_path())?;
    validate_solana_address("address", config.address())?;
    crate::utils::validation::validate_non_empty_string("asset_id", config.asset_id())?;
    // 小數位數以平台回傳為準，這裡只檢查格式
    validate_positive_amount("amount", config.amount(), crate::domain::model::SOL_DECIMALS)?;
    validate_url("platform.base_url", config.platform_base_url())?;
    validate_url("rpc.url", config.rpc_url())?;
    validate_range("rpc.max_retries", config.max_retries(), 0, MAX_RPC_RETRIES)?;
    validate_range(
        "platform.poll_interval_seconds",
        config.poll_interval().as_secs(),
        1,
        u64::MAX,
    )?;
    validate_range(
        "platform.timeout_seconds",
        config.request_timeout().as_secs(),
        1,
        u64::MAX,
    )?;
    Ok(())
}

/// 讀取憑證並組出質押引擎
pub fn build_engine<C: ConfigProvider + ?Sized>(
    config: &C,
) -> Result<StakeEngine<CdpClient, SolanaRpcClient>> {
    let api_key = ApiKey::from_json_file(config.api_key_path())?;
    tracing::info!("🔑 Loaded API key {} ({})", api_key.name(), api_key.algorithm());

    let signer = keyfile::read_private_key(config.private_key_path())?;
    tracing::info!("🔑 Loaded signing key for {}", keyfile::address_of(&signer));

    let platform = CdpClient::new(api_key, config.platform_base_url(), config.request_timeout())?;
    let broadcaster = SolanaRpcClient::new(
        config.rpc_url(),
        SendTransactionOptions {
            skip_preflight: config.skip_preflight(),
            preflight_commitment: config.preflight_commitment(),
            max_retries: config.max_retries(),
        },
        config.request_timeout(),
    )?;

    Ok(StakeEngine::new(
        platform,
        broadcaster,
        signer,
        StakeRequest::from_config(config),
    ))
}

pub(crate) fn secs(value: u64) -> Duration {
    Duration::from_secs(value)
}
