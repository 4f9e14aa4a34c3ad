use thiserror::Error;

// Errors raised by the pricing side of the SDK
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    #[error("Currency mismatch in price ledger: expected {expected}, found {found}")]
    CurrencyMismatch { expected: String, found: String },
}

// Errors raised by the transport behind the SDK
#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Connection error: {0}")]
    Connection(String),
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("Invalid client id: {0}")]
    InvalidClientId(u32),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Config parse error: {0}")]
    Parse(String),
}

// Top level error type for SDK operations
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("XML parse error: {0}")]
    XmlParse(String),

    #[error("XML encode error: {0}")]
    Encode(String),

    #[error("Sirena error {code}: {message}")]
    Remote { code: i32, message: String },

    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    #[error("Request timeout after {0}ms")]
    Timeout(u64),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}
