use crate::utils::error::StakeError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const SOL_ASSET_ID: &str = "sol";
pub const SOL_DECIMALS: u32 = 9;
/// u128 最多可安全表示 10^38
const MAX_DECIMALS: u32 = 38;

/// 平台支援的 Solana 網路
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Network {
    #[serde(rename = "solana-devnet", alias = "devnet")]
    SolanaDevnet,
    #[serde(rename = "solana-mainnet", alias = "mainnet", alias = "mainnet-beta")]
    SolanaMainnet,
}

impl Network {
    pub fn network_id(&self) -> &'static str {
        match self {
            Network::SolanaDevnet => "solana-devnet",
            Network::SolanaMainnet => "solana-mainnet",
        }
    }

    pub fn default_rpc_url(&self) -> &'static str {
        match self {
            Network::SolanaDevnet => "https://api.devnet.solana.com",
            Network::SolanaMainnet => "https://api.mainnet-beta.solana.com",
        }
    }

    pub fn explorer_link(&self, signature: &str) -> String {
        match self {
            Network::SolanaDevnet => {
                format!("https://explorer.solana.com/tx/{}?cluster=devnet", signature)
            }
            Network::SolanaMainnet => format!("https://explorer.solana.com/tx/{}", signature),
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.network_id())
    }
}

impl FromStr for Network {
    type Err = StakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "solana-devnet" | "devnet" => Ok(Network::SolanaDevnet),
            "solana-mainnet" | "mainnet" | "mainnet-beta" => Ok(Network::SolanaMainnet),
            other => Err(StakeError::InvalidConfigValueError {
                field: "network".to_string(),
                value: other.to_string(),
                reason: "Supported networks: solana-devnet, solana-mainnet".to_string(),
            }),
        }
    }
}

/// 預檢 (preflight) 模擬時使用的確認等級
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Commitment {
    #[default]
    Processed,
    Confirmed,
    Finalized,
}

impl Commitment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Commitment::Processed => "processed",
            Commitment::Confirmed => "confirmed",
            Commitment::Finalized => "finalized",
        }
    }
}

impl fmt::Display for Commitment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Commitment {
    type Err = StakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "processed" => Ok(Commitment::Processed),
            "confirmed" => Ok(Commitment::Confirmed),
            "finalized" => Ok(Commitment::Finalized),
            other => Err(StakeError::InvalidConfigValueError {
                field: "preflight_commitment".to_string(),
                value: other.to_string(),
                reason: "Expected one of: processed, confirmed, finalized".to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub network_id: String,
    pub asset_id: String,
    pub decimals: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountParseError {
    #[error("amount is empty")]
    Empty,
    #[error("amount contains invalid character '{0}'")]
    InvalidCharacter(char),
    #[error("amount has more than one decimal point")]
    MultipleDecimalPoints,
    #[error("amount has {found} fractional digits but the asset only supports {allowed}")]
    TooPrecise { found: usize, allowed: u32 },
    #[error("amount is too large")]
    Overflow,
    #[error("unsupported number of decimals: {0}")]
    UnsupportedDecimals(u32),
}

impl From<AmountParseError> for StakeError {
    fn from(e: AmountParseError) -> Self {
        StakeError::ValidationError {
            message: e.to_string(),
        }
    }
}

/// 定點數量：以最小單位 (atomic units) 保存，避免浮點誤差
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Amount {
    atomic: u128,
    decimals: u32,
}

impl Amount {
    pub fn from_atomic(atomic: u128, decimals: u32) -> Self {
        Self { atomic, decimals }
    }

    /// 解析平台回傳的最小單位字串，例如 "1500000000"
    pub fn parse_atomic(text: &str, decimals: u32) -> Result<Self, AmountParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(AmountParseError::Empty);
        }
        if let Some(c) = text.chars().find(|c| !c.is_ascii_digit()) {
            return Err(AmountParseError::InvalidCharacter(c));
        }
        let atomic = text.parse::<u128>().map_err(|_| AmountParseError::Overflow)?;
        Ok(Self { atomic, decimals })
    }

    /// 解析整數單位的十進位字串，例如 "0.1" SOL
    pub fn parse_decimal(text: &str, decimals: u32) -> Result<Self, AmountParseError> {
        if decimals > MAX_DECIMALS {
            return Err(AmountParseError::UnsupportedDecimals(decimals));
        }

        let text = text.trim();
        if text.is_empty() || text == "." {
            return Err(AmountParseError::Empty);
        }

        let mut parts = text.splitn(2, '.');
        let whole = parts.next().unwrap_or_default();
        let fraction = parts.next().unwrap_or_default();
        if fraction.contains('.') {
            return Err(AmountParseError::MultipleDecimalPoints);
        }
        if let Some(c) = whole.chars().chain(fraction.chars()).find(|c| !c.is_ascii_digit()) {
            return Err(AmountParseError::InvalidCharacter(c));
        }

        // 多出來的小數位數只允許是 0
        let significant = fraction.trim_end_matches('0');
        if significant.len() > decimals as usize {
            return Err(AmountParseError::TooPrecise {
                found: significant.len(),
                allowed: decimals,
            });
        }

        let scale = 10u128.pow(decimals);
        let whole_value = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| AmountParseError::Overflow)?
        };
        let fraction_value = if significant.is_empty() {
            0
        } else {
            let padding = 10u128.pow(decimals - significant.len() as u32);
            significant
                .parse::<u128>()
                .map_err(|_| AmountParseError::Overflow)?
                * padding
        };

        let atomic = whole_value
            .checked_mul(scale)
            .and_then(|v| v.checked_add(fraction_value))
            .ok_or(AmountParseError::Overflow)?;

        Ok(Self { atomic, decimals })
    }

    pub fn atomic(&self) -> u128 {
        self.atomic
    }

    pub fn decimals(&self) -> u32 {
        self.decimals
    }

    pub fn is_zero(&self) -> bool {
        self.atomic == 0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.decimals == 0 {
            return write!(f, "{}", self.atomic);
        }
        let scale = 10u128.pow(self.decimals);
        let whole = self.atomic / scale;
        let fraction = self.atomic % scale;
        if fraction == 0 {
            return write!(f, "{}", whole);
        }
        let digits = format!("{:0width$}", fraction, width = self.decimals as usize);
        write!(f, "{}.{}", whole, digits.trim_end_matches('0'))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Balance {
    pub amount: Amount,
    pub asset: Asset,
}

/// 單筆待簽名的鏈上交易
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingTransaction {
    pub network_id: String,
    #[serde(default)]
    pub from_address_id: String,
    pub unsigned_payload: String,
    #[serde(default)]
    pub signed_payload: Option<String>,
    #[serde(default)]
    pub transaction_hash: Option<String>,
    #[serde(default)]
    pub transaction_link: Option<String>,
    pub status: String,
}

impl StakingTransaction {
    /// 平台已代為簽好的交易 (空字串視為未簽名)
    pub fn platform_signed_payload(&self) -> Option<&str> {
        self.signed_payload
            .as_deref()
            .map(str::trim)
            .filter(|payload| !payload.is_empty())
    }
}

/// 平台建立的質押操作，可包含多筆交易
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StakingOperation {
    pub id: String,
    pub network_id: String,
    pub address_id: String,
    pub status: String,
    #[serde(default)]
    pub transactions: Vec<StakingTransaction>,
}

impl StakingOperation {
    pub fn is_terminal(&self) -> bool {
        matches!(self.status.as_str(), "complete" | "failed")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastResult {
    pub signature: String,
    pub link: String,
}

/// 一次執行的結果摘要
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StakeReport {
    pub network: Network,
    pub address: String,
    pub stakeable_balance: String,
    pub staked_amount: String,
    pub operation_id: String,
    pub signed_transactions: Vec<String>,
    pub broadcasts: Vec<BroadcastResult>,
}
