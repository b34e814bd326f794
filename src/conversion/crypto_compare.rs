use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::debug;

use crate::conversion::errors::ConversionError;
use crate::conversion::{RateSource, FIAT_SYMBOL};
use crate::types::Rate;

pub const DEFAULT_ENDPOINT: &str = "https://min-api.cryptocompare.com/data/price";

/// Live USD rates from a CryptoCompare style price endpoint.
pub struct CryptoCompareRates {
    client: Client,
    endpoint: String
}

/// Body of `GET {endpoint}?fsym=BTC&tsyms=USD`.
///
/// Unknown symbols come back as an error object without a `USD` field.
#[derive(Debug, Deserialize)]
pub(crate) struct PriceResponse {
    #[serde(rename = "USD")]
    pub usd: Option<f64>
}

impl PriceResponse {
    pub(crate) fn into_rate(self, token: &str) -> Result<Option<Rate>, ConversionError> {
        self.usd
            .map(Decimal::try_from)
            .transpose()
            .map_err(|source| ConversionError::InvalidRate { token: token.to_string(), source })
    }
}

impl CryptoCompareRates {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.into()
        }
    }
}

impl RateSource for CryptoCompareRates {
    async fn usd_rate(&self, token: &str) -> Result<Option<Rate>, ConversionError> {
        debug!("Requesting {FIAT_SYMBOL} rate for [{token}] from {}", self.endpoint);

        let response: PriceResponse = self.client
            .get(&self.endpoint)
            .query(&[("fsym", token), ("tsyms", FIAT_SYMBOL)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        response.into_rate(token)
    }
}
