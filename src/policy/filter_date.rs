use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::policy::errors::FilterError;

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];
const DATE_TIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// Parses the `--date` filter into a calendar day.
///
/// Plain dates and local date-times without an offset are taken as-is; an
/// RFC 3339 date-time contributes the local calendar day it falls on.
pub fn parse_filter_date(input: &str) -> Result<NaiveDate, FilterError> {
    let input = input.trim();

    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(input, format) {
            return Ok(date)
        }
    }

    for format in DATE_TIME_FORMATS {
        if let Ok(moment) = NaiveDateTime::parse_from_str(input, format) {
            return Ok(moment.date())
        }
    }

    DateTime::parse_from_rfc3339(input)
        .map(|moment| moment.with_timezone(&Local).date_naive())
        .map_err(|_| FilterError::InvalidDate(input.to_string()))
}
