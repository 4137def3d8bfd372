//! 平台回傳的 Solana 交易：解碼、找到簽名者位置並填入本地簽章。
//!
//! 解碼與序列化交給 `solana-transaction` (bincode)，簽章則由本地的
//! ed25519 金鑰對 message 的序列化位元組產生。

use crate::utils::error::{Result, StakeError};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use ed25519_dalek::{Signer, SigningKey};
use solana_message::{MessageHeader, VersionedMessage};
use solana_pubkey::Pubkey;
use solana_signature::Signature;
use solana_transaction::versioned::VersionedTransaction;

fn cast_error(message: impl Into<String>) -> StakeError {
    StakeError::TransactionError {
        message: message.into(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageVersion {
    Legacy,
    V0,
}

#[derive(Debug, Clone)]
pub struct SolanaTransaction {
    inner: VersionedTransaction,
}

impl SolanaTransaction {
    pub fn from_base58(encoded: &str) -> Result<Self> {
        let bytes = bs58::decode(encoded.trim())
            .into_vec()
            .map_err(|e| cast_error(format!("payload is not valid base58: {}", e)))?;
        Self::from_bytes(&bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let inner: VersionedTransaction = bincode::deserialize(bytes)
            .map_err(|e| cast_error(format!("payload is not a Solana transaction: {}", e)))?;
        let tx = Self { inner };

        if tx.to_bytes()?.len() != bytes.len() {
            return Err(cast_error("payload has trailing bytes after the message"));
        }

        let header = tx.header();
        let key_count = tx.account_keys().len();
        if header.num_required_signatures == 0 {
            return Err(cast_error("message requires no signatures"));
        }
        if header.num_required_signatures as usize > key_count {
            return Err(cast_error(format!(
                "message requires {} signatures but only lists {} accounts",
                header.num_required_signatures, key_count
            )));
        }
        if header.num_readonly_signed_accounts >= header.num_required_signatures {
            return Err(cast_error("fee payer cannot be read-only"));
        }

        let signature_count = tx.inner.signatures.len();
        if signature_count != 0 && signature_count != header.num_required_signatures as usize {
            return Err(cast_error(format!(
                "transaction carries {} signatures but the message requires {}",
                signature_count, header.num_required_signatures
            )));
        }

        Ok(tx)
    }

    pub fn version(&self) -> MessageVersion {
        match self.inner.message {
            VersionedMessage::Legacy(_) => MessageVersion::Legacy,
            VersionedMessage::V0(_) => MessageVersion::V0,
        }
    }

    pub fn header(&self) -> &MessageHeader {
        self.inner.message.header()
    }

    /// 簽章的對象：message 的序列化位元組
    pub fn message_bytes(&self) -> Vec<u8> {
        self.inner.message.serialize()
    }

    pub fn account_keys(&self) -> &[Pubkey] {
        self.inner.message.static_account_keys()
    }

    /// 需要簽名的帳戶 (account keys 的前 N 個)
    pub fn signers(&self) -> &[Pubkey] {
        &self.account_keys()[..self.required_signatures()]
    }

    fn required_signatures(&self) -> usize {
        self.header().num_required_signatures as usize
    }

    /// 以金鑰簽署 message，並把簽章寫入對應簽名者的位置
    pub fn sign(&mut self, key: &SigningKey) -> Result<()> {
        let pubkey = Pubkey::new_from_array(key.verifying_key().to_bytes());
        let index = self
            .signers()
            .iter()
            .position(|signer| *signer == pubkey)
            .ok_or_else(|| {
                cast_error(format!(
                    "key {} is not a required signer of this transaction",
                    pubkey
                ))
            })?;

        if self.inner.signatures.is_empty() {
            self.inner.signatures = vec![Signature::default(); self.required_signatures()];
        }

        let signature = key.sign(&self.message_bytes());
        self.inner.signatures[index] = Signature::from(signature.to_bytes());
        Ok(())
    }

    /// 所有簽名位置都已填入
    pub fn is_fully_signed(&self) -> bool {
        self.inner.signatures.len() == self.required_signatures()
            && self
                .inner
                .signatures
                .iter()
                .all(|s| *s != Signature::default())
    }

    /// 交易 ID：第一個簽章的 base58
    pub fn signature(&self) -> Option<String> {
        self.inner
            .signatures
            .first()
            .filter(|s| **s != Signature::default())
            .map(|s| s.to_string())
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        bincode::serialize(&self.inner)
            .map_err(|e| cast_error(format!("cannot encode transaction: {}", e)))
    }

    pub fn to_base58(&self) -> Result<String> {
        Ok(bs58::encode(self.to_bytes()?).into_string())
    }

    pub fn to_base64(&self) -> Result<String> {
        Ok(STANDARD.encode(self.to_bytes()?))
    }
}

/// 測試用：組出一個最小的未簽名交易
#[cfg(test)]
pub(crate) fn build_unsigned_transaction(
    signers: &[Pubkey],
    others: &[Pubkey],
    versioned: bool,
    include_empty_signatures: bool,
) -> Vec<u8> {
    use solana_hash::Hash;
    use solana_message::compiled_instruction::CompiledInstruction;
    use solana_message::{legacy, v0};

    let header = MessageHeader {
        num_required_signatures: signers.len() as u8,
        num_readonly_signed_accounts: 0,
        num_readonly_unsigned_accounts: 1,
    };
    let account_keys: Vec<Pubkey> = signers.iter().chain(others).copied().collect();
    let recent_blockhash = Hash::new_from_array([5u8; 32]);
    let instructions = vec![CompiledInstruction {
        program_id_index: signers.len() as u8,
        accounts: vec![0],
        data: vec![2, 0, 0, 0],
    }];

    let message = if versioned {
        VersionedMessage::V0(v0::Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
            address_table_lookups: Vec::new(),
        })
    } else {
        VersionedMessage::Legacy(legacy::Message {
            header,
            account_keys,
            recent_blockhash,
            instructions,
        })
    };

    let signatures = if include_empty_signatures {
        vec![Signature::default(); signers.len()]
    } else {
        Vec::new()
    };

    bincode::serialize(&VersionedTransaction {
        signatures,
        message,
    })
    .unwrap()
}

#[cfg(test)]
pub(crate) fn pubkey_of(key: &SigningKey) -> Pubkey {
    Pubkey::new_from_array(key.verifying_key().to_bytes())
}
