use crate::domain::model::{Amount, Asset, Balance};
use crate::utils::error::{Result, StakeError};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Serialize)]
pub struct StakingContextRequest<'a> {
    pub network_id: &'a str,
    pub asset_id: &'a str,
    pub address_id: &'a str,
    pub options: HashMap<&'a str, String>,
}

#[derive(Debug, Serialize)]
pub struct BuildStakingOperationRequest<'a> {
    pub network_id: &'a str,
    pub asset_id: &'a str,
    pub address_id: &'a str,
    pub action: &'a str,
    pub options: HashMap<&'a str, String>,
}

#[derive(Debug, Deserialize)]
pub struct AssetModel {
    pub network_id: String,
    pub asset_id: String,
    #[serde(default)]
    pub decimals: Option<u32>,
}

impl TryFrom<AssetModel> for Asset {
    type Error = StakeError;

    fn try_from(model: AssetModel) -> Result<Self> {
        let decimals = model.decimals.ok_or_else(|| StakeError::ValidationError {
            message: format!(
                "platform did not report decimals for asset '{}' on {}",
                model.asset_id, model.network_id
            ),
        })?;
        Ok(Asset {
            network_id: model.network_id,
            asset_id: model.asset_id,
            decimals,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BalanceModel {
    pub amount: String,
    pub asset: AssetModel,
}

impl BalanceModel {
    /// 以 `asset` 的小數位數解讀最小單位數量
    pub fn into_balance(self, asset: &Asset) -> Result<Balance> {
        if !self.asset.asset_id.eq_ignore_ascii_case(&asset.asset_id) {
            return Err(StakeError::ValidationError {
                message: format!(
                    "balance is reported in '{}', expected '{}'",
                    self.asset.asset_id, asset.asset_id
                ),
            });
        }
        if let Some(decimals) = self.asset.decimals {
            if decimals != asset.decimals {
                return Err(StakeError::ValidationError {
                    message: format!(
                        "balance uses {} decimals but asset '{}' has {}",
                        decimals, asset.asset_id, asset.decimals
                    ),
                });
            }
        }

        let amount = Amount::parse_atomic(&self.amount, asset.decimals).map_err(|e| {
            StakeError::ValidationError {
                message: format!("platform returned invalid balance '{}': {}", self.amount, e),
            }
        })?;
        Ok(Balance {
            amount,
            asset: asset.clone(),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct StakingContextDetails {
    pub stakeable_balance: BalanceModel,
    #[serde(default)]
    pub unstakeable_balance: Option<BalanceModel>,
    #[serde(default)]
    pub claimable_balance: Option<BalanceModel>,
}

#[derive(Debug, Deserialize)]
pub struct StakingContextResponse {
    pub context: StakingContextDetails,
}

/// 平台錯誤回應格式
#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub correlation_id: Option<String>,
}
