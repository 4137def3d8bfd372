use thiserror::Error;

#[derive(Error, Debug)]
pub enum StakeError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error in '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Credential error: {message}")]
    CredentialError { message: String },

    #[error("Invalid private key: {message}")]
    InvalidKeyError { message: String },

    #[error("invalid private key length: expected {expected} bytes, got {actual} bytes")]
    InvalidKeyLengthError { expected: usize, actual: usize },

    #[error("Transaction error: {message}")]
    TransactionError { message: String },

    #[error("Platform API error (HTTP {status}, {code}): {message}")]
    PlatformError {
        status: u16,
        code: String,
        message: String,
    },

    #[error("RPC error {code}: {message}")]
    RpcError { code: i64, message: String },

    #[error("Timed out: {message}")]
    TimeoutError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Configuration,
    Credentials,
    Network,
    Remote,
    Data,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Medium,
    High,
    Critical,
}

impl StakeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            StakeError::ConfigValidationError { .. }
            | StakeError::MissingConfigError { .. }
            | StakeError::InvalidConfigValueError { .. }
            | StakeError::ValidationError { .. } => ErrorCategory::Configuration,
            StakeError::CredentialError { .. }
            | StakeError::InvalidKeyError { .. }
            | StakeError::InvalidKeyLengthError { .. } => ErrorCategory::Credentials,
            StakeError::ApiError(_) | StakeError::TimeoutError { .. } => ErrorCategory::Network,
            StakeError::PlatformError { .. } | StakeError::RpcError { .. } => {
                ErrorCategory::Remote
            }
            StakeError::SerializationError(_) | StakeError::TransactionError { .. } => {
                ErrorCategory::Data
            }
            StakeError::IoError(_) => ErrorCategory::System,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self.category() {
            // 網路與遠端錯誤通常可以重試
            ErrorCategory::Network | ErrorCategory::Remote => ErrorSeverity::Medium,
            ErrorCategory::Configuration | ErrorCategory::Credentials | ErrorCategory::Data => {
                ErrorSeverity::High
            }
            ErrorCategory::System => ErrorSeverity::Critical,
        }
    }

    /// 是否值得在稍後重新執行
    pub fn is_retryable(&self) -> bool {
        match self {
            StakeError::ApiError(e) => e.is_timeout() || e.is_connect(),
            StakeError::TimeoutError { .. } => true,
            StakeError::PlatformError { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    pub fn recovery_suggestion(&self) -> String {
        match self {
            StakeError::ApiError(_) => {
                "Check network connectivity and the platform / RPC endpoint URLs".to_string()
            }
            StakeError::IoError(_) => {
                "Check that the file exists and is readable by the current user".to_string()
            }
            StakeError::SerializationError(_) => {
                "The remote service returned an unexpected payload; retry with --verbose"
                    .to_string()
            }
            StakeError::ConfigValidationError { field, .. }
            | StakeError::InvalidConfigValueError { field, .. } => {
                format!("Fix the value of '{}' and run again", field)
            }
            StakeError::MissingConfigError { field } => {
                format!("Provide '{}' via command line flag, environment or config file", field)
            }
            StakeError::CredentialError { .. } => {
                "Make sure CDP_API_KEY_PATH points to the JSON key file downloaded from the platform"
                    .to_string()
            }
            StakeError::InvalidKeyError { .. } | StakeError::InvalidKeyLengthError { .. } => {
                "SOLANA_PRIVATE_KEY_PATH must contain a base58 encoded 64-byte ed25519 keypair"
                    .to_string()
            }
            StakeError::TransactionError { .. } => {
                "Check that the address matches the private key and the network is correct"
                    .to_string()
            }
            StakeError::PlatformError { status, .. } if *status == 401 => {
                "The API key was rejected; check that it is valid and not expired".to_string()
            }
            StakeError::PlatformError { .. } => {
                "Check the address, amount and network, then retry".to_string()
            }
            StakeError::RpcError { .. } => {
                "The RPC node rejected the transaction; check the balance and retry".to_string()
            }
            StakeError::TimeoutError { .. } => {
                "Increase the poll timeout or retry later".to_string()
            }
            StakeError::ValidationError { .. } => "Review the input values".to_string(),
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Configuration => format!("Configuration problem: {}", self),
            ErrorCategory::Credentials => format!("Credential problem: {}", self),
            ErrorCategory::Network => format!("Network problem: {}", self),
            ErrorCategory::Remote => format!("Remote service refused the request: {}", self),
            ErrorCategory::Data => format!("Unexpected data: {}", self),
            ErrorCategory::System => format!("System error: {}", self),
        }
    }

    /// 對應嚴重程度的程序退出碼
    pub fn exit_code(&self) -> i32 {
        match self.severity() {
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, StakeError>;
