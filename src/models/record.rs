use chrono::{DateTime, Local, NaiveDate, TimeZone};

use crate::models::errors::RecordError;
use crate::models::{ColumnIndex, Field};
use crate::types::Timestamp;

/// One decoded ledger row.
///
/// Values are kept as the raw text found in the line. Numeric interpretation
/// happens when a policy compares timestamps or when the amount is converted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionRecord {
    /// Seconds since the Unix epoch, still as text.
    pub timestamp: Option<String>,
    pub transaction_type: Option<String>,
    /// Token symbol, e.g. `BTC`.
    pub token: Option<String>,
    /// Amount in token units, still as text.
    pub amount: Option<String>
}

impl TransactionRecord {
    /// Decodes the positions `index` knows about. Only those values are
    /// read as text, lossily, so stray bytes in other columns are ignored.
    pub fn decode<I, S>(values: I, index: &ColumnIndex) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut record = Self::default();

        for (position, value) in values.into_iter().enumerate() {
            let Some(field) = index.field_at(position) else {
                continue
            };

            let value = Some(String::from_utf8_lossy(value.as_ref()).into_owned());

            match field {
                Field::Timestamp => record.timestamp = value,
                Field::TransactionType => record.transaction_type = value,
                Field::Token => record.token = value,
                Field::Amount => record.amount = value
            }
        }

        record
    }

    pub fn has_token(&self, token: &str) -> bool {
        self.token.as_deref() == Some(token)
    }

    /// Parses the timestamp as whole seconds.
    ///
    /// `Ok(None)` when the record carries no timestamp at all.
    pub fn parsed_timestamp(&self, line: u64) -> Result<Option<Timestamp>, RecordError> {
        let Some(raw) = self.timestamp.as_deref() else {
            return Ok(None)
        };

        raw.trim()
            .parse::<Timestamp>()
            .map(Some)
            .map_err(|_| RecordError::invalid_timestamp(line, raw))
    }

    /// The local calendar day the timestamp falls on.
    pub fn local_date(&self, line: u64) -> Result<Option<NaiveDate>, RecordError> {
        let Some(seconds) = self.parsed_timestamp(line)? else {
            return Ok(None)
        };

        let moment: DateTime<Local> = Local.timestamp_opt(seconds, 0)
            .earliest()
            .ok_or_else(|| RecordError::invalid_timestamp(line, &seconds.to_string()))?;

        Ok(Some(moment.date_naive()))
    }
}
