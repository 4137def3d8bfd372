pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use adapters::cdp::{ApiKey, CdpClient};
pub use adapters::solana::SolanaRpcClient;
pub use core::{stake::StakeEngine, transaction::SolanaTransaction};
pub use utils::error::{Result, StakeError};
