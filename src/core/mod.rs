pub mod stake;
pub mod transaction;

pub use crate::domain::model::{Amount, Balance, Network, StakeReport, StakingOperation};
pub use crate::domain::ports::{ConfigProvider, StakingPlatform, TransactionBroadcaster};
pub use crate::utils::error::Result;
