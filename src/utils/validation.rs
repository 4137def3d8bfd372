use crate::domain::model::Amount;
use crate::utils::error::{Result, StakeError};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" if url.host().is_some() => Ok(()),
            "http" | "https" => Err(StakeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: "URL has no host".to_string(),
            }),
            scheme => Err(StakeError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.trim().is_empty() {
        return Err(StakeError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    if path.contains('\0') {
        return Err(StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Solana 地址：base58 編碼的 32 位元組公鑰
pub fn validate_solana_address(field_name: &str, address: &str) -> Result<()> {
    if address.trim().is_empty() {
        return Err(StakeError::MissingConfigError {
            field: field_name.to_string(),
        });
    }

    let decoded = bs58::decode(address.trim()).into_vec().map_err(|e| {
        StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: format!("Not valid base58: {}", e),
        }
    })?;

    if decoded.len() != 32 {
        return Err(StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: address.to_string(),
            reason: format!("Expected a 32-byte public key, got {} bytes", decoded.len()),
        });
    }

    Ok(())
}

/// 質押數量必須是正的十進位數字
pub fn validate_positive_amount(field_name: &str, amount: &str, decimals: u32) -> Result<()> {
    let parsed = Amount::parse_decimal(amount, decimals).map_err(|e| {
        StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: amount.to_string(),
            reason: e.to_string(),
        }
    })?;

    if parsed.is_zero() {
        return Err(StakeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: amount.to_string(),
            reason: "Amount must be greater than zero".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_url() {
        assert!(validate_url("rpc.url", "https://api.devnet.solana.com").is_ok());
        assert!(validate_url("rpc.url", "http://127.0.0.1:8899").is_ok());
        assert!(validate_url("rpc.url", "").is_err());
        assert!(validate_url("rpc.url", "invalid-url").is_err());
        assert!(validate_url("rpc.url", "ftp://example.com").is_err());
    }

    #[test]
    fn test_validate_path() {
        assert!(validate_path("api_key_path", "/tmp/cdp_api_key.json").is_ok());
        assert!(matches!(
            validate_path("api_key_path", "  "),
            Err(StakeError::MissingConfigError { .. })
        ));
        assert!(validate_path("api_key_path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_range() {
        assert!(validate_range("max_retries", 5u32, 0, 100).is_ok());
        assert!(validate_range("max_retries", 101u32, 0, 100).is_err());
    }

    #[test]
    fn test_validate_solana_address() {
        let address = bs58::encode([7u8; 32]).into_string();
        assert!(validate_solana_address("address", &address).is_ok());
        assert!(validate_solana_address("address", "0OIl").is_err());
        let short = bs58::encode([7u8; 20]).into_string();
        assert!(validate_solana_address("address", &short).is_err());
        assert!(matches!(
            validate_solana_address("address", ""),
            Err(StakeError::MissingConfigError { .. })
        ));
    }

    #[test]
    fn test_validate_positive_amount() {
        assert!(validate_positive_amount("amount", "0.1", 9).is_ok());
        assert!(validate_positive_amount("amount", "0", 9).is_err());
        assert!(validate_positive_amount("amount", "-1", 9).is_err());
        assert!(validate_positive_amount("amount", "abc", 9).is_err());
    }
}
