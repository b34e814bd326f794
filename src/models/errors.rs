use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("Invalid timestamp [{value}] on line [{line}]")]
    InvalidTimestamp {
        line: u64,
        value: String
    },
    #[error("Invalid amount [{value}] for token [{token}]")]
    InvalidAmount {
        token: String,
        value: String
    }
}

impl RecordError {
    pub fn invalid_timestamp(line: u64, value: &str) -> Self {
        Self::InvalidTimestamp { line, value: value.to_string() }
    }

    pub fn invalid_amount(token: Option<&str>, value: &str) -> Self {
        Self::InvalidAmount {
            token: token.unwrap_or_default().to_string(),
            value: value.to_string()
        }
    }
}
