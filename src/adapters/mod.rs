// Adapters layer: concrete implementations for external systems (platform API, RPC node, key files).

pub mod cdp;
pub mod keyfile;
pub mod solana;
