mod errors;
mod filter_date;
#[cfg(test)]
mod tests;

use chrono::NaiveDate;

use crate::models::{RecordError, TransactionRecord};
use crate::types::Timestamp;

pub use errors::FilterError;
pub use filter_date::parse_filter_date;

/// Decides whether an incoming record replaces the current best match.
///
/// Chosen once before the scan from which filters were supplied. The two
/// undated variants only accept records at or above the watermark, so equal
/// timestamps replace the held record. The dated variants skip the watermark
/// and keep the last matching line in file order, even when an earlier line
/// carried a later timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionPolicy {
    NoFilter,
    ByToken {
        token: String
    },
    ByDate {
        date: NaiveDate
    },
    ByTokenAndDate {
        token: String,
        date: NaiveDate
    }
}

impl SelectionPolicy {
    pub fn new(token: Option<String>, date: Option<NaiveDate>) -> Self {
        match (token, date) {
            (None, None) => Self::NoFilter,
            (Some(token), None) => Self::ByToken { token },
            (None, Some(date)) => Self::ByDate { date },
            (Some(token), Some(date)) => Self::ByTokenAndDate { token, date }
        }
    }

    /// Builds the policy from raw command-line filters.
    ///
    /// # Errors
    /// Returns `FilterError::InvalidDate` when a date is given but cannot be parsed.
    /// Empty values count as not supplied.
    pub fn from_filters(token: Option<&str>, date: Option<&str>) -> Result<Self, FilterError> {
        let token = token.filter(|token| !token.is_empty());
        let date = date.filter(|date| !date.trim().is_empty())
            .map(parse_filter_date)
            .transpose()?;

        Ok(Self::new(token.map(str::to_string), date))
    }

    pub fn is_date_filtered(&self) -> bool {
        matches!(self, Self::ByDate { .. } | Self::ByTokenAndDate { .. })
    }

    /// Returns the new watermark when `candidate` supersedes the accumulator,
    /// `None` when it is rejected.
    ///
    /// # Errors
    /// Fails when the candidate's timestamp has to be read and is not a whole number of seconds.
    pub fn select(&self, watermark: Timestamp, candidate: &TransactionRecord, line: u64) -> Result<Option<Timestamp>, RecordError> {
        match self {
            Self::NoFilter => Self::at_or_above(watermark, candidate, line),
            Self::ByToken { token } => {
                if !candidate.has_token(token) {
                    return Ok(None)
                }

                Self::at_or_above(watermark, candidate, line)
            }
            Self::ByDate { date } => Self::on_day(*date, candidate, line),
            Self::ByTokenAndDate { token, date } => {
                if !candidate.has_token(token) {
                    return Ok(None)
                }

                Self::on_day(*date, candidate, line)
            }
        }
    }

    fn at_or_above(watermark: Timestamp, candidate: &TransactionRecord, line: u64) -> Result<Option<Timestamp>, RecordError> {
        let timestamp = candidate.parsed_timestamp(line)?;
        Ok(timestamp.filter(|timestamp| *timestamp >= watermark))
    }

    fn on_day(date: NaiveDate, candidate: &TransactionRecord, line: u64) -> Result<Option<Timestamp>, RecordError> {
        if candidate.local_date(line)? != Some(date) {
            return Ok(None)
        }

        candidate.parsed_timestamp(line)
    }
}
