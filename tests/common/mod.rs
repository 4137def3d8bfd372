#![allow(dead_code)]

use cdp_stake::CliConfig;
use clap::Parser;
use ed25519_dalek::SigningKey;
use p256::pkcs8::LineEnding;
use solana_hash::Hash;
use solana_message::compiled_instruction::CompiledInstruction;
use solana_message::{legacy, MessageHeader, VersionedMessage};
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;
use std::path::{Path, PathBuf};

pub const KEY_NAME: &str = "organizations/test-org/apiKeys/test-key";

pub fn signing_key() -> SigningKey {
    SigningKey::from_bytes(&[21u8; 32])
}

pub fn address_of(key: &SigningKey) -> String {
    bs58::encode(key.verifying_key().as_bytes()).into_string()
}

/// 寫入 EC (ES256) 格式的 API 金鑰檔
pub fn write_api_key(dir: &Path) -> PathBuf {
    let secret = p256::SecretKey::random(&mut rand::rngs::OsRng);
    let pem = secret.to_sec1_pem(LineEnding::LF).unwrap();
    let json = serde_json::json!({ "name": KEY_NAME, "privateKey": pem.as_str() });
    let path = dir.join("cdp_api_key.json");
    std::fs::write(&path, json.to_string()).unwrap();
    path
}

pub fn write_private_key(dir: &Path, key: &SigningKey) -> PathBuf {
    let path = dir.join("solana_private_key.txt");
    std::fs::write(
        &path,
        format!("{}\n", bs58::encode(key.to_keypair_bytes()).into_string()),
    )
    .unwrap();
    path
}

/// 以 `payer` 為唯一簽名者的未簽名 legacy 交易 (base58)
pub fn unsigned_payload(payer: &SigningKey) -> String {
    let message = legacy::Message {
        header: MessageHeader {
            num_required_signatures: 1,
            num_readonly_signed_accounts: 0,
            num_readonly_unsigned_accounts: 1,
        },
        account_keys: vec![
            Pubkey::new_from_array(payer.verifying_key().to_bytes()),
            Pubkey::new_from_array([0u8; 32]), // system program
        ],
        recent_blockhash: Hash::new_from_array([9u8; 32]),
        instructions: vec![CompiledInstruction {
            program_id_index: 1,
            accounts: vec![0],
            data: vec![2, 0, 0, 0],
        }],
    };
    let tx = VersionedTransaction {
        signatures: vec![Signature::default()],
        message: VersionedMessage::Legacy(message),
    };
    bs58::encode(bincode::serialize(&tx).unwrap()).into_string()
}

pub fn cli_config(
    api_key_path: &Path,
    private_key_path: &Path,
    address: &str,
    base_url: &str,
    rpc_url: &str,
    extra: &[&str],
) -> CliConfig {
    let mut args = vec![
        "cdp-stake".to_string(),
        "--api-key-path".to_string(),
        api_key_path.display().to_string(),
        "--private-key-path".to_string(),
        private_key_path.display().to_string(),
        "--address".to_string(),
        address.to_string(),
        "--api-base-url".to_string(),
        base_url.to_string(),
        "--rpc-url".to_string(),
        rpc_url.to_string(),
        "--poll-interval-secs".to_string(),
        "1".to_string(),
        "--poll-timeout-secs".to_string(),
        "5".to_string(),
    ];
    args.extend(extra.iter().map(|s| s.to_string()));
    CliConfig::try_parse_from(args).unwrap()
}

pub fn asset_body() -> serde_json::Value {
    serde_json::json!({ "network_id": "solana-devnet", "asset_id": "sol", "decimals": 9 })
}

pub fn context_body(stakeable_atomic: &str) -> serde_json::Value {
    context_body_with_asset(stakeable_atomic, asset_body())
}

/// 可指定餘額所附的資產描述 (例如缺少 decimals)
pub fn context_body_with_asset(stakeable_atomic: &str, asset: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "context": {
            "stakeable_balance": { "amount": stakeable_atomic, "asset": asset },
            "unstakeable_balance": { "amount": "0", "asset": asset_body() },
            "claimable_balance": { "amount": "0", "asset": asset_body() }
        }
    })
}

pub fn operation_body(address: &str, payloads: &[String]) -> serde_json::Value {
    let transactions: Vec<serde_json::Value> = payloads
        .iter()
        .map(|payload| {
            serde_json::json!({
                "network_id": "solana-devnet",
                "from_address_id": address,
                "unsigned_payload": payload,
                "status": "pending"
            })
        })
        .collect();

    serde_json::json!({
        "id": "stake-op-1",
        "network_id": "solana-devnet",
        "address_id": address,
        "status": if payloads.is_empty() { "initialized" } else { "pending" },
        "transactions": transactions
    })
}
