use crate::adapters::keyfile::address_of;
use crate::core::transaction::SolanaTransaction;
use crate::domain::model::{Amount, BroadcastResult, Network, StakeReport, StakingOperation};
use crate::domain::ports::{ConfigProvider, StakingPlatform, TransactionBroadcaster};
use crate::utils::error::{Result, StakeError};
use ed25519_dalek::SigningKey;
use std::time::Duration;
use tokio::time::Instant;

/// 一次質押所需的參數
#[derive(Debug, Clone)]
pub struct StakeRequest {
    pub network: Network,
    pub address: String,
    pub asset_id: String,
    pub amount: String,
    pub mode: String,
    pub dry_run: bool,
    pub poll_interval: Duration,
    pub poll_timeout: Duration,
}

impl StakeRequest {
    pub fn from_config<C: ConfigProvider + ?Sized>(config: &C) -> Self {
        Self {
            network: config.network(),
            address: config.address().trim().to_string(),
            asset_id: config.asset_id().to_string(),
            amount: config.amount().to_string(),
            mode: config.stake_mode().to_string(),
            dry_run: config.dry_run(),
            poll_interval: config.poll_interval(),
            poll_timeout: config.poll_timeout(),
        }
    }
}

/// 依序執行：查詢餘額 → 建立質押操作 → 本地簽名 → 廣播
pub struct StakeEngine<P: StakingPlatform, B: TransactionBroadcaster> {
    platform: P,
    broadcaster: B,
    signer: SigningKey,
    request: StakeRequest,
}

impl<P: StakingPlatform, B: TransactionBroadcaster> StakeEngine<P, B> {
    pub fn new(platform: P, broadcaster: B, signer: SigningKey, request: StakeRequest) -> Self {
        Self {
            platform,
            broadcaster,
            signer,
            request,
        }
    }

    pub async fn run(&self) -> Result<StakeReport> {
        let req = &self.request;
        tracing::info!(
            "🚀 Staking {} {} from {} on {}",
            req.amount,
            req.asset_id,
            req.address,
            req.network
        );

        let signer_address = address_of(&self.signer);
        if signer_address != req.address {
            tracing::warn!(
                "⚠️ Private key belongs to {}, not {}; signing will fail unless it is a required signer",
                signer_address,
                req.address
            );
        }

        // 1. 可質押餘額 (以資產的小數位數解讀)
        let asset = self.platform.get_asset(req.network, &req.asset_id).await?;
        let balance = self
            .platform
            .get_stakeable_balance(req.network, &asset, &req.address, &req.mode)
            .await?;
        println!("stakeable balance: {}", balance.amount);

        // 2. 建立質押操作
        let amount = Amount::parse_decimal(&req.amount, asset.decimals)?;
        if amount.is_zero() {
            return Err(StakeError::ValidationError {
                message: "stake amount must be greater than zero".to_string(),
            });
        }
        if amount.decimals() != balance.amount.decimals() {
            return Err(StakeError::ValidationError {
                message: format!(
                    "stakeable balance uses {} decimals but asset '{}' has {}",
                    balance.amount.decimals(),
                    asset.asset_id,
                    asset.decimals
                ),
            });
        }
        if amount > balance.amount {
            return Err(StakeError::ValidationError {
                message: format!(
                    "stake amount {} exceeds stakeable balance {}",
                    amount, balance.amount
                ),
            });
        }

        let operation = self
            .platform
            .build_stake_operation(req.network, &req.asset_id, &req.address, amount, &req.mode)
            .await?;
        let operation = self.wait_for_transactions(operation).await?;

        println!("staking operation: {}", operation.id);
        for tx in &operation.transactions {
            println!("unsigned staking transaction: {}", tx.unsigned_payload);
        }

        // 3. 簽名
        let mut signed = Vec::with_capacity(operation.transactions.len());
        for tx in &operation.transactions {
            let solana_tx = match tx.platform_signed_payload() {
                Some(payload) => {
                    tracing::debug!("Transaction already signed by the platform");
                    SolanaTransaction::from_base58(payload)?
                }
                None => {
                    let mut solana_tx = SolanaTransaction::from_base58(&tx.unsigned_payload)?;
                    solana_tx.sign(&self.signer)?;
                    solana_tx
                }
            };
            if !solana_tx.is_fully_signed() {
                tracing::warn!("⚠️ Transaction still has empty signature slots");
            }
            let encoded = solana_tx.to_base58()?;
            println!("signed transaction: {}", encoded);
            signed.push((encoded, solana_tx));
        }

        // 4. 廣播
        let mut broadcasts = Vec::new();
        if req.dry_run {
            tracing::info!("🔍 DRY RUN - {} transaction(s) not broadcast", signed.len());
        } else {
            for (_, solana_tx) in &signed {
                let signature = self
                    .broadcaster
                    .send_transaction(&solana_tx.to_bytes()?)
                    .await?;
                let link = req.network.explorer_link(&signature);
                println!("broadcasted transaction hash: {}", signature);
                println!("transaction link: {}", link);
                broadcasts.push(BroadcastResult { signature, link });
            }
        }

        Ok(StakeReport {
            network: req.network,
            address: req.address.clone(),
            stakeable_balance: balance.amount.to_string(),
            staked_amount: amount.to_string(),
            operation_id: operation.id,
            signed_transactions: signed.into_iter().map(|(encoded, _)| encoded).collect(),
            broadcasts,
        })
    }

    /// 平台可能以非同步方式產生交易，需輪詢直到交易出現
    async fn wait_for_transactions(&self, operation: StakingOperation) -> Result<StakingOperation> {
        let req = &self.request;
        let deadline = Instant::now() + req.poll_timeout;
        let mut operation = operation;

        while operation.transactions.is_empty() {
            if operation.is_terminal() {
                return Err(StakeError::TransactionError {
                    message: format!(
                        "staking operation {} ended with status '{}' and no transactions",
                        operation.id, operation.status
                    ),
                });
            }
            if Instant::now() >= deadline {
                return Err(StakeError::TimeoutError {
                    message: format!(
                        "staking operation {} had no transactions after {:?}",
                        operation.id, req.poll_timeout
                    ),
                });
            }

            tracing::debug!(
                "⏳ Staking operation {} is '{}', polling again in {:?}",
                operation.id,
                operation.status,
                req.poll_interval
            );
            tokio::time::sleep(req.poll_interval).await;
            operation = self
                .platform
                .fetch_staking_operation(req.network, &req.address, &operation.id)
                .await?;
        }

        Ok(operation)
    }
}
