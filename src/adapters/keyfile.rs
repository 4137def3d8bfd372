use crate::utils::error::{Result, StakeError};
use ed25519_dalek::{SigningKey, KEYPAIR_LENGTH};
use std::path::Path;

/// 從檔案讀取 base58 編碼的 64 位元組 ed25519 金鑰對 (seed + 公鑰)
///
/// 金鑰以明文存放在磁碟上，只適合開發網路或測試用途。
pub fn read_private_key<P: AsRef<Path>>(path: P) -> Result<SigningKey> {
    let path = path.as_ref();
    tracing::debug!("Reading private key from {}", path.display());

    let data = std::fs::read_to_string(path)?;
    decode_private_key(&data)
}

pub fn decode_private_key(encoded: &str) -> Result<SigningKey> {
    let bytes = bs58::decode(encoded.trim())
        .into_vec()
        .map_err(|e| StakeError::InvalidKeyError {
            message: format!("private key is not valid base58: {}", e),
        })?;

    let keypair: [u8; KEYPAIR_LENGTH] =
        bytes
            .as_slice()
            .try_into()
            .map_err(|_| StakeError::InvalidKeyLengthError {
                expected: KEYPAIR_LENGTH,
                actual: bytes.len(),
            })?;

    SigningKey::from_keypair_bytes(&keypair).map_err(|_| StakeError::InvalidKeyError {
        message: "public key half does not match the secret seed".to_string(),
    })
}

/// 金鑰對應的 base58 地址
pub fn address_of(key: &SigningKey) -> String {
    bs58::encode(key.verifying_key().as_bytes()).into_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn sample_key() -> SigningKey {
        SigningKey::from_bytes(&[9u8; 32])
    }

    #[test]
    fn test_reads_key_with_trailing_newline() {
        let key = sample_key();
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{}", bs58::encode(key.to_keypair_bytes()).into_string()).unwrap();

        let loaded = read_private_key(file.path()).unwrap();
        assert_eq!(loaded.to_bytes(), key.to_bytes());
        assert_eq!(address_of(&loaded), address_of(&key));
    }

    #[test]
    fn test_rejects_wrong_length() {
        let encoded = bs58::encode([1u8; 32]).into_string();
        match decode_private_key(&encoded) {
            Err(StakeError::InvalidKeyLengthError { expected, actual }) => {
                assert_eq!(expected, 64);
                assert_eq!(actual, 32);
            }
            other => panic!("unexpected result: {:?}", other.map(|k| k.to_bytes())),
        }
    }

    #[test]
    fn test_rejects_invalid_base58() {
        let result = decode_private_key("not-base58-0OIl");
        assert!(matches!(result, Err(StakeError::InvalidKeyError { .. })));
    }

    #[test]
    fn test_rejects_mismatched_public_key() {
        let mut bytes = sample_key().to_keypair_bytes();
        bytes[40] ^= 0xff;
        let encoded = bs58::encode(bytes).into_string();
        assert!(matches!(
            decode_private_key(&encoded),
            Err(StakeError::InvalidKeyError { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = read_private_key("/definitely/not/here/key.txt");
        assert!(matches!(result, Err(StakeError::IoError(_))));
    }
}
