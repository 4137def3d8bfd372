use crate::adapters::cdp::DEFAULT_BASE_URL;
use crate::adapters::solana::rpc::DEFAULT_MAX_RETRIES;
use crate::config::{
    secs, validate_provider, DEFAULT_AMOUNT, DEFAULT_MODE, DEFAULT_POLL_INTERVAL_SECS,
    DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_TIMEOUT_SECS,
};
use crate::domain::model::{Commitment, Network, SOL_ASSET_ID};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{Result, StakeError};
use crate::utils::validation::Validate;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub credentials: CredentialsConfig,
    pub stake: StakeConfig,
    pub platform: Option<PlatformConfig>,
    pub rpc: Option<RpcConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialsConfig {
    pub api_key_path: String,
    pub private_key_path: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StakeConfig {
    pub address: String,
    pub network: Option<Network>,
    pub asset: Option<String>,
    pub amount: Option<String>,
    pub mode: Option<String>,
    pub dry_run: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlatformConfig {
    pub base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub poll_interval_seconds: Option<u64>,
    pub poll_timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcConfig {
    pub url: Option<String>,
    pub max_retries: Option<u32>,
    pub skip_preflight: Option<bool>,
    pub preflight_commitment: Option<Commitment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| StakeError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SOLANA_ADDRESS})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").map_err(|e| {
            StakeError::ConfigValidationError {
                field: "environment".to_string(),
                message: e.to_string(),
            }
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| {
                tracing::warn!("Environment variable {} is not set", var_name);
                format!("${{{}}}", var_name)
            })
        });

        Ok(result.to_string())
    }

    pub fn verbose(&self) -> bool {
        self.logging
            .as_ref()
            .and_then(|l| l.verbose)
            .unwrap_or(false)
    }

    pub fn log_json(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }

    fn platform_value<T>(&self, f: impl Fn(&PlatformConfig) -> Option<T>) -> Option<T> {
        self.platform.as_ref().and_then(f)
    }

    fn rpc_value<T>(&self, f: impl Fn(&RpcConfig) -> Option<T>) -> Option<T> {
        self.rpc.as_ref().and_then(f)
    }
}

impl ConfigProvider for TomlConfig {
    fn api_key_path(&self) -> &str {
        &self.credentials.api_key_path
    }

    fn private_key_path(&self) -> &str {
        &self.credentials.private_key_path
    }

    fn address(&self) -> &str {
        &self.stake.address
    }

    fn network(&self) -> Network {
        self.stake.network.unwrap_or(Network::SolanaDevnet)
    }

    fn asset_id(&self) -> &str {
        self.stake.asset.as_deref().unwrap_or(SOL_ASSET_ID)
    }

    fn amount(&self) -> &str {
        self.stake.amount.as_deref().unwrap_or(DEFAULT_AMOUNT)
    }

    fn stake_mode(&self) -> &str {
        self.stake.mode.as_deref().unwrap_or(DEFAULT_MODE)
    }

    fn platform_base_url(&self) -> &str {
        self.platform
            .as_ref()
            .and_then(|p| p.base_url.as_deref())
            .unwrap_or(DEFAULT_BASE_URL)
    }

    fn request_timeout(&self) -> Duration {
        secs(
            self.platform_value(|p| p.timeout_seconds)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
        )
    }

    fn poll_interval(&self) -> Duration {
        secs(
            self.platform_value(|p| p.poll_interval_seconds)
                .unwrap_or(DEFAULT_POLL_INTERVAL_SECS),
        )
    }

    fn poll_timeout(&self) -> Duration {
        secs(
            self.platform_value(|p| p.poll_timeout_seconds)
                .unwrap_or(DEFAULT_POLL_TIMEOUT_SECS),
        )
    }

    fn rpc_url(&self) -> &str {
        self.rpc
            .as_ref()
            .and_then(|r| r.url.as_deref())
            .unwrap_or_else(|| self.network().default_rpc_url())
    }

    fn max_retries(&self) -> u32 {
        self.rpc_value(|r| r.max_retries)
            .unwrap_or(DEFAULT_MAX_RETRIES)
    }

    fn skip_preflight(&self) -> bool {
        self.rpc_value(|r| r.skip_preflight).unwrap_or(false)
    }

    fn preflight_commitment(&self) -> Commitment {
        self.rpc_value(|r| r.preflight_commitment)
            .unwrap_or_default()
    }

    fn dry_run(&self) -> bool {
        self.stake.dry_run.unwrap_or(false)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_provider(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn address() -> String {
        bs58::encode([6u8; 32]).into_string()
    }

    #[test]
    fn test_parse_minimal_toml_config() {
        let toml_content = format!(
            r#"
[credentials]
api_key_path = "/keys/cdp_api_key.json"
private_key_path = "/keys/solana.txt"

[stake]
address = "{}"
"#,
            address()
        );

        let config = TomlConfig::from_toml_str(&toml_content).unwrap();

        assert_eq!(config.network(), Network::SolanaDevnet);
        assert_eq!(config.amount(), "0.1");
        assert_eq!(config.platform_base_url(), DEFAULT_BASE_URL);
        assert_eq!(config.rpc_url(), "https://api.devnet.solana.com");
        assert_eq!(config.max_retries(), 5);
        assert_eq!(config.preflight_commitment(), Commitment::Processed);
        assert!(!config.dry_run());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_full_toml_config() {
        let toml_content = format!(
            r#"
[credentials]
api_key_path = "/keys/cdp_api_key.json"
private_key_path = "/keys/solana.txt"

[stake]
address = "{}"
network = "solana-mainnet"
amount = "1.25"
dry_run = true

[platform]
base_url = "http://localhost:9000/platform"
timeout_seconds = 10
poll_interval_seconds = 1
poll_timeout_seconds = 5

[rpc]
url = "http://localhost:8899"
max_retries = 0
skip_preflight = true
preflight_commitment = "confirmed"

[logging]
verbose = true
json = true
"#,
            address()
        );

        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        assert_eq!(config.network(), Network::SolanaMainnet);
        assert_eq!(config.amount(), "1.25");
        assert_eq!(config.rpc_url(), "http://localhost:8899");
        assert_eq!(config.max_retries(), 0);
        assert!(config.skip_preflight());
        assert_eq!(config.preflight_commitment(), Commitment::Confirmed);
        assert_eq!(config.poll_timeout(), Duration::from_secs(5));
        assert!(config.dry_run());
        assert!(config.verbose());
        assert!(config.log_json());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        let address = address();
        std::env::set_var("CDP_STAKE_TEST_ADDRESS", &address);

        let toml_content = r#"
[credentials]
api_key_path = "/keys/cdp_api_key.json"
private_key_path = "/keys/solana.txt"

[stake]
address = "${CDP_STAKE_TEST_ADDRESS}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.address(), address);

        std::env::remove_var("CDP_STAKE_TEST_ADDRESS");
    }

    #[test]
    fn test_unset_env_var_fails_validation() {
        let toml_content = r#"
[credentials]
api_key_path = "/keys/cdp_api_key.json"
private_key_path = "/keys/solana.txt"

[stake]
address = "${CDP_STAKE_TEST_UNSET_VARIABLE}"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.address(), "${CDP_STAKE_TEST_UNSET_VARIABLE}");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_network_short_names_match_cli() {
        for (name, expected) in [
            ("devnet", Network::SolanaDevnet),
            ("mainnet", Network::SolanaMainnet),
            ("mainnet-beta", Network::SolanaMainnet),
        ] {
            let toml_content = format!(
                r#"
[credentials]
api_key_path = "a.json"
private_key_path = "k.txt"

[stake]
address = "{}"
network = "{}"
"#,
                address(),
                name
            );
            let config = TomlConfig::from_toml_str(&toml_content).unwrap();
            assert_eq!(config.network(), expected, "network = {}", name);
            assert_eq!(config.network(), name.parse::<Network>().unwrap());
        }
    }

    #[test]
    fn test_unknown_network_is_parse_error() {
        let toml_content = format!(
            r#"
[credentials]
api_key_path = "a.json"
private_key_path = "k.txt"

[stake]
address = "{}"
network = "ethereum-mainnet"
"#,
            address()
        );
        assert!(matches!(
            TomlConfig::from_toml_str(&toml_content),
            Err(StakeError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = format!(
            r#"
[credentials]
api_key_path = "a.json"
private_key_path = "k.txt"

[stake]
address = "{}"
amount = "0.5"
"#,
            address()
        );

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.amount(), "0.5");
    }
}
