use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Rate lookup failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Rate table could not be read: {0}")]
    RateTable(#[from] csv::Error),
    #[error("Rate reported for token [{token}] is not a valid decimal: {source}")]
    InvalidRate {
        token: String,
        source: rust_decimal::Error
    },
    #[error("Converted amount overflowed for token [{token}]")]
    Overflow {
        token: String
    }
}
