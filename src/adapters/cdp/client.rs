use crate::adapters::cdp::auth::ApiKey;
use crate::adapters::cdp::types::{
    ApiErrorBody, AssetModel, BuildStakingOperationRequest, StakingContextRequest,
    StakingContextResponse,
};
use crate::domain::model::{Amount, Asset, Balance, Network, StakingOperation};
use crate::domain::ports::StakingPlatform;
use crate::utils::error::{Result, StakeError};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://api.cdp.coinbase.com/platform";

const STAKE_ACTION: &str = "stake";

/// 質押平台 REST API 客戶端
pub struct CdpClient {
    client: Client,
    api_key: ApiKey,
    base_url: String,
    timeout: Duration,
}

impl CdpClient {
    pub fn new(api_key: ApiKey, base_url: &str, timeout: Duration) -> Result<Self> {
        crate::utils::validation::validate_url("platform.base_url", base_url)?;
        Ok(Self {
            client: Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    fn correlation_context() -> String {
        format!(
            "sdk_version={},sdk_language=rust,source=cdp-stake",
            env!("CARGO_PKG_VERSION")
        )
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let full_url = format!("{}{}", self.base_url, path);
        let url = Url::parse(&full_url).map_err(|e| StakeError::InvalidConfigValueError {
            field: "platform.base_url".to_string(),
            value: full_url.clone(),
            reason: e.to_string(),
        })?;

        let host = match (url.host_str(), url.port()) {
            (Some(host), Some(port)) => format!("{}:{}", host, port),
            (Some(host), None) => host.to_string(),
            (None, _) => {
                return Err(StakeError::InvalidConfigValueError {
                    field: "platform.base_url".to_string(),
                    value: full_url,
                    reason: "URL has no host".to_string(),
                })
            }
        };
        let token = self.api_key.build_jwt(method.as_str(), &host, url.path())?;

        tracing::debug!("📡 {} {}", method, url);

        let mut request = self
            .client
            .request(method, url)
            .bearer_auth(token)
            .header("Correlation-Context", Self::correlation_context())
            .header("Accept", "application/json")
            .timeout(self.timeout);

        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        tracing::debug!("📡 Platform response status: {}", status);

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let parsed: Option<ApiErrorBody> = serde_json::from_str(&text).ok();
            let (code, message) = match parsed {
                Some(body) => {
                    if let Some(correlation_id) = &body.correlation_id {
                        tracing::debug!("Platform correlation id: {}", correlation_id);
                    }
                    (
                        body.code.unwrap_or_else(|| "unknown".to_string()),
                        body.message.unwrap_or_else(|| text.clone()),
                    )
                }
                None => ("unknown".to_string(), text),
            };
            return Err(StakeError::PlatformError {
                status: status.as_u16(),
                code,
                message,
            });
        }

        let bytes = response.bytes().await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

#[async_trait]
impl StakingPlatform for CdpClient {
    async fn get_asset(&self, network: Network, asset_id: &str) -> Result<Asset> {
        let path = format!("/v1/networks/{}/assets/{}", network.network_id(), asset_id);
        let model: AssetModel = self.send::<(), _>(Method::GET, &path, None).await?;
        Asset::try_from(model)
    }

    async fn get_stakeable_balance(
        &self,
        network: Network,
        asset: &Asset,
        address: &str,
        mode: &str,
    ) -> Result<Balance> {
        let request = StakingContextRequest {
            network_id: network.network_id(),
            asset_id: &asset.asset_id,
            address_id: address,
            options: HashMap::from([("mode", mode.to_string())]),
        };

        let response: StakingContextResponse = self
            .send(Method::POST, "/v1/stake/context", Some(&request))
            .await?;

        let context = response.context;
        if let Some(unstakeable) = &context.unstakeable_balance {
            tracing::debug!("Unstakeable balance (atomic): {}", unstakeable.amount);
        }
        if let Some(claimable) = &context.claimable_balance {
            tracing::debug!("Claimable balance (atomic): {}", claimable.amount);
        }
        context.stakeable_balance.into_balance(asset)
    }

    async fn build_stake_operation(
        &self,
        network: Network,
        asset_id: &str,
        address: &str,
        amount: Amount,
        mode: &str,
    ) -> Result<StakingOperation> {
        let request = BuildStakingOperationRequest {
            network_id: network.network_id(),
            asset_id,
            address_id: address,
            action: STAKE_ACTION,
            options: HashMap::from([
                ("amount", amount.atomic().to_string()),
                ("mode", mode.to_string()),
            ]),
        };

        self.send(Method::POST, "/v1/stake/build", Some(&request))
            .await
    }

    async fn fetch_staking_operation(
        &self,
        network: Network,
        address: &str,
        operation_id: &str,
    ) -> Result<StakingOperation> {
        let path = format!(
            "/v1/networks/{}/addresses/{}/staking_operations/{}",
            network.network_id(),
            address,
            operation_id
        );
        self.send::<(), _>(Method::GET, &path, None).await
    }
}
