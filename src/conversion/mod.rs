mod crypto_compare;
mod errors;
mod static_rates;

use tracing::warn;

use crate::types::{Amount, Rate};

pub use crypto_compare::{CryptoCompareRates, DEFAULT_ENDPOINT};
pub use errors::ConversionError;
pub use static_rates::StaticRates;

pub const FIAT_SYMBOL: &str = "USD";

/// Where fiat exchange rates come from.
pub trait RateSource {
    /// USD per one unit of `token`, or `None` when the source has no rate for it.
    async fn usd_rate(&self, token: &str) -> Result<Option<Rate>, ConversionError>;
}

/// Converts `amount` of `token` into USD.
///
/// A token without a known rate passes through unchanged. Lookup failures are returned as-is.
pub async fn convert<R: RateSource>(source: &R, amount: Amount, token: &str) -> Result<Amount, ConversionError> {
    let Some(rate) = source.usd_rate(token).await? else {
        warn!("No {FIAT_SYMBOL} rate known for token [{token}], keeping amount unchanged");
        return Ok(amount)
    };

    amount.checked_mul(rate)
        .ok_or_else(|| ConversionError::Overflow { token: token.to_string() })
}
