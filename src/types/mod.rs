use rust_decimal::Decimal;

/// Seconds since the Unix epoch.
pub type Timestamp = i64;

/// Token or fiat quantity.
pub type Amount = Decimal;

/// Fiat units per one token.
pub type Rate = Decimal;
