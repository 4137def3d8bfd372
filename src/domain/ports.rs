use crate::domain::model::{Amount, Asset, Balance, Commitment, Network, StakingOperation};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 質押平台：負責查詢餘額與建立未簽名的質押交易
#[async_trait]
pub trait StakingPlatform: Send + Sync {
    async fn get_asset(&self, network: Network, asset_id: &str) -> Result<Asset>;

    /// 餘額以 `asset` 的小數位數解讀
    async fn get_stakeable_balance(
        &self,
        network: Network,
        asset: &Asset,
        address: &str,
        mode: &str,
    ) -> Result<Balance>;

    async fn build_stake_operation(
        &self,
        network: Network,
        asset_id: &str,
        address: &str,
        amount: Amount,
        mode: &str,
    ) -> Result<StakingOperation>;

    async fn fetch_staking_operation(
        &self,
        network: Network,
        address: &str,
        operation_id: &str,
    ) -> Result<StakingOperation>;
}

/// 將已簽名交易送上鏈，回傳交易簽章
#[async_trait]
pub trait TransactionBroadcaster: Send + Sync {
    async fn send_transaction(&self, signed_tx: &[u8]) -> Result<String>;
}

pub trait ConfigProvider: Send + Sync {
    fn api_key_path(&self) -> &str;
    fn private_key_path(&self) -> &str;
    fn address(&self) -> &str;
    fn network(&self) -> Network;
    fn asset_id(&self) -> &str;
    fn amount(&self) -> &str;
    fn stake_mode(&self) -> &str;
    fn platform_base_url(&self) -> &str;
    fn request_timeout(&self) -> Duration;
    fn poll_interval(&self) -> Duration;
    fn poll_timeout(&self) -> Duration;
    fn rpc_url(&self) -> &str;
    fn max_retries(&self) -> u32;
    fn skip_preflight(&self) -> bool;
    fn preflight_commitment(&self) -> Commitment;
    fn dry_run(&self) -> bool;
}
