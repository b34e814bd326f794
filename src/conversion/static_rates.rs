use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Deserialize;

use crate::conversion::errors::ConversionError;
use crate::conversion::RateSource;
use crate::types::Rate;

/// Fixed USD rates, typically loaded from a `token,usd` CSV table.
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    rates: HashMap<String, Rate>
}

#[derive(Debug, Deserialize)]
struct RateRow {
    token: String,
    usd: Rate
}

impl StaticRates {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConversionError> {
        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .from_path(path)?;

        Self::from_csv(reader)
    }

    pub fn token_count(&self) -> usize {
        self.rates.len()
    }

    fn from_csv<R: Read>(mut reader: csv::Reader<R>) -> Result<Self, ConversionError> {
        let mut rates = HashMap::new();

        for row in reader.deserialize::<RateRow>() {
            let row = row?;
            rates.insert(row.token, row.usd);
        }

        Ok(Self { rates })
    }
}

impl FromIterator<(String, Rate)> for StaticRates {
    fn from_iter<T: IntoIterator<Item = (String, Rate)>>(iter: T) -> Self {
        Self {
            rates: iter.into_iter().collect()
        }
    }
}

impl RateSource for StaticRates {
    async fn usd_rate(&self, token: &str) -> Result<Option<Rate>, ConversionError> {
        Ok(self.rates.get(token).copied())
    }
}
