use crate::domain::model::Commitment;
use crate::domain::ports::TransactionBroadcaster;
use crate::utils::error::{Result, StakeError};
use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

pub const DEFAULT_MAX_RETRIES: u32 = 5;

/// A JSON-RPC 2.0 request.
#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub id: u64,
    pub method: &'static str,
    pub params: serde_json::Value,
}

impl JsonRpcRequest {
    pub fn new(id: u64, method: &'static str, params: serde_json::Value) -> Self {
        Self {
            jsonrpc: "2.0",
            id,
            method,
            params,
        }
    }
}

/// A JSON-RPC 2.0 response.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse<T> {
    pub result: Option<T>,
    #[serde(default)]
    pub error: Option<JsonRpcError>,
}

/// A JSON-RPC 2.0 error object.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcError {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

/// `sendTransaction` 的選項
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTransactionOptions {
    pub skip_preflight: bool,
    pub preflight_commitment: Commitment,
    pub max_retries: u32,
}

impl Default for SendTransactionOptions {
    fn default() -> Self {
        Self {
            skip_preflight: false,
            preflight_commitment: Commitment::Processed,
            max_retries: DEFAULT_MAX_RETRIES,
        }
    }
}

/// Solana JSON-RPC 客戶端，只負責廣播交易
pub struct SolanaRpcClient {
    client: Client,
    url: String,
    options: SendTransactionOptions,
    timeout: Duration,
    next_id: AtomicU64,
}

impl SolanaRpcClient {
    pub fn new(url: &str, options: SendTransactionOptions, timeout: Duration) -> Result<Self> {
        crate::utils::validation::validate_url("rpc.url", url)?;
        Ok(Self {
            client: Client::new(),
            url: url.to_string(),
            options,
            timeout,
            next_id: AtomicU64::new(1),
        })
    }

    async fn call<T: serde::de::DeserializeOwned>(
        &self,
        method: &'static str,
        params: serde_json::Value,
    ) -> Result<T> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let request = JsonRpcRequest::new(id, method, params);
        tracing::debug!("📡 RPC {} -> {}", method, self.url);

        let response = self
            .client
            .post(&self.url)
            .timeout(self.timeout)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let body: JsonRpcResponse<T> = response.json().await?;

        if let Some(error) = body.error {
            if let Some(data) = &error.data {
                // 預檢失敗時 data 內含模擬的程式日誌
                tracing::debug!("RPC error data: {}", data);
            }
            return Err(StakeError::RpcError {
                code: error.code,
                message: error.message,
            });
        }

        body.result.ok_or_else(|| StakeError::RpcError {
            code: 0,
            message: format!("{} returned neither result nor error", method),
        })
    }
}

#[async_trait]
impl TransactionBroadcaster for SolanaRpcClient {
    async fn send_transaction(&self, signed_tx: &[u8]) -> Result<String> {
        let params = serde_json::json!([
            STANDARD.encode(signed_tx),
            {
                "encoding": "base64",
                "skipPreflight": self.options.skip_preflight,
                "preflightCommitment": self.options.preflight_commitment,
                "maxRetries": self.options.max_retries,
            }
        ]);

        let signature: String = self.call("sendTransaction", params).await?;

        let decoded = bs58::decode(&signature).into_vec().map_err(|e| {
            StakeError::RpcError {
                code: 0,
                message: format!("node returned an invalid signature '{}': {}", signature, e),
            }
        })?;
        if decoded.len() != 64 {
            return Err(StakeError::RpcError {
                code: 0,
                message: format!(
                    "node returned a {}-byte signature, expected 64",
                    decoded.len()
                ),
            });
        }

        Ok(signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_match_devnet_example() {
        let options = SendTransactionOptions::default();
        let json = serde_json::to_value(options).unwrap();
        assert_eq!(json["skipPreflight"], false);
        assert_eq!(json["preflightCommitment"], "processed");
        assert_eq!(json["maxRetries"], 5);
    }

    #[test]
    fn test_request_envelope() {
        let request = JsonRpcRequest::new(7, "sendTransaction", serde_json::json!(["abc"]));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["jsonrpc"], "2.0");
        assert_eq!(json["id"], 7);
        assert_eq!(json["method"], "sendTransaction");
    }

    #[test]
    fn test_error_response_parses() {
        let body: JsonRpcResponse<String> = serde_json::from_str(
            r#"{"jsonrpc":"2.0","id":1,"error":{"code":-32002,"message":"Transaction simulation failed"}}"#,
        )
        .unwrap();
        assert!(body.result.is_none());
        assert_eq!(body.error.unwrap().code, -32002);
    }

    #[test]
    fn test_result_type_needs_no_default() {
        // NonZeroU64 沒有 Default 實作
        let body: JsonRpcResponse<std::num::NonZeroU64> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1,"result":42}"#).unwrap();
        assert_eq!(body.result.map(|v| v.get()), Some(42));
        assert!(body.error.is_none());

        let body: JsonRpcResponse<std::num::NonZeroU64> =
            serde_json::from_str(r#"{"jsonrpc":"2.0","id":1}"#).unwrap();
        assert!(body.result.is_none());
    }

    #[test]
    fn test_rejects_non_http_url() {
        assert!(SolanaRpcClient::new(
            "ws://api.devnet.solana.com",
            SendTransactionOptions::default(),
            Duration::from_secs(5)
        )
        .is_err());
    }
}
