pub mod rpc;

pub use rpc::{SendTransactionOptions, SolanaRpcClient};
