use super::{parse_filter_date, FilterError, SelectionPolicy};
use crate::models::{ColumnIndex, RecordError, TransactionRecord, DELIMITER};
use anyhow::Result;
use chrono::{Local, NaiveDate, TimeZone};

fn decode(header: &str, line: &str) -> TransactionRecord {
    let index = ColumnIndex::from_header(header.split(DELIMITER));
    TransactionRecord::decode(line.split(DELIMITER), &index)
}

fn record(timestamp: i64, token: &str) -> TransactionRecord {
    decode("timestamp,transaction_type,token,amount", &format!("{timestamp},DEPOSIT,{token},1"))
}

fn local_noon(year: i32, month: u32, day: u32) -> i64 {
    Local.with_ymd_and_hms(year, month, day, 12, 0, 0).single().expect("unambiguous local time").timestamp()
}

fn june_15() -> NaiveDate {
    NaiveDate::from_ymd_opt(2023, 6, 15).expect("valid date")
}

#[test]
fn test_policy_is_chosen_from_supplied_filters() -> Result<()> {
    assert_eq!(SelectionPolicy::from_filters(None, None)?, SelectionPolicy::NoFilter);
    assert_eq!(SelectionPolicy::from_filters(Some("BTC"), None)?, SelectionPolicy::ByToken { token: "BTC".to_string() });
    assert_eq!(SelectionPolicy::from_filters(None, Some("2023-06-15"))?, SelectionPolicy::ByDate { date: june_15() });
    assert_eq!(
        SelectionPolicy::from_filters(Some("ETH"), Some("2023/06/15"))?,
        SelectionPolicy::ByTokenAndDate { token: "ETH".to_string(), date: june_15() }
    );

    Ok(())
}

#[test]
fn test_invalid_date_filter_is_rejected() {
    assert!(matches!(
        SelectionPolicy::from_filters(None, Some("not-a-date")),
        Err(FilterError::InvalidDate(value)) if value == "not-a-date"
    ));
    assert!(SelectionPolicy::from_filters(Some("BTC"), Some("2023-02-30")).is_err());
}

#[test]
fn test_filter_date_accepts_rfc3339_date_time() -> Result<()> {
    let moment = Local.with_ymd_and_hms(2023, 6, 15, 8, 0, 0).single().expect("unambiguous local time");

    assert_eq!(parse_filter_date(&moment.to_rfc3339())?, june_15());
    assert_eq!(parse_filter_date(" 2023-06-15 ")?, june_15());

    Ok(())
}

#[test]
fn test_filter_date_accepts_local_date_time_without_offset() -> Result<()> {
    assert_eq!(parse_filter_date("2023-06-15T10:00:00")?, june_15());
    assert_eq!(parse_filter_date("2023-06-15 23:59:59.5")?, june_15());
    assert!(parse_filter_date("2023-06-15T25:00:00").is_err());

    Ok(())
}

#[test]
fn test_empty_filters_count_as_absent() -> Result<()> {
    assert_eq!(SelectionPolicy::from_filters(Some(""), None)?, SelectionPolicy::NoFilter);
    assert_eq!(SelectionPolicy::from_filters(Some(""), Some("2023-06-15"))?, SelectionPolicy::ByDate { date: june_15() });
    assert_eq!(SelectionPolicy::from_filters(Some("BTC"), Some(""))?, SelectionPolicy::ByToken { token: "BTC".to_string() });

    Ok(())
}

#[test]
fn test_no_filter_accepts_at_or_above_watermark() -> Result<()> {
    let policy = SelectionPolicy::NoFilter;

    assert_eq!(policy.select(0, &record(10, "BTC"), 2)?, Some(10));
    assert_eq!(policy.select(10, &record(10, "ETH"), 3)?, Some(10));
    assert_eq!(policy.select(10, &record(9, "ETH"), 4)?, None);

    Ok(())
}

#[test]
fn test_by_token_requires_token_and_watermark() -> Result<()> {
    let policy = SelectionPolicy::ByToken { token: "BTC".to_string() };

    assert_eq!(policy.select(0, &record(1, "BTC"), 2)?, Some(1));
    assert_eq!(policy.select(1, &record(2, "ETH"), 3)?, None);
    assert_eq!(policy.select(5, &record(3, "BTC"), 4)?, None);
    assert_eq!(policy.select(1, &record(3, "BTC"), 4)?, Some(3));

    Ok(())
}

#[test]
fn test_by_token_never_matches_records_without_token() -> Result<()> {
    let candidate = decode("timestamp,amount", "100,1");
    let policy = SelectionPolicy::ByToken { token: "BTC".to_string() };

    assert_eq!(policy.select(0, &candidate, 2)?, None);

    Ok(())
}

#[test]
fn test_by_date_ignores_watermark() -> Result<()> {
    let policy = SelectionPolicy::ByDate { date: june_15() };
    let morning = local_noon(2023, 6, 15) - 3 * 3600;

    assert_eq!(policy.select(i64::MAX, &record(morning, "BTC"), 2)?, Some(morning));
    assert_eq!(policy.select(0, &record(local_noon(2023, 6, 14), "BTC"), 3)?, None);
    assert_eq!(policy.select(0, &record(local_noon(2023, 6, 16), "BTC"), 4)?, None);

    Ok(())
}

#[test]
fn test_by_token_and_date_requires_both() -> Result<()> {
    let policy = SelectionPolicy::ByTokenAndDate { token: "ETH".to_string(), date: june_15() };
    let noon = local_noon(2023, 6, 15);

    assert_eq!(policy.select(0, &record(noon, "ETH"), 2)?, Some(noon));
    assert_eq!(policy.select(0, &record(noon, "BTC"), 3)?, None);
    assert_eq!(policy.select(0, &record(local_noon(2023, 6, 14), "ETH"), 4)?, None);

    Ok(())
}

#[test]
fn test_malformed_timestamp_fails_visibly() {
    let candidate = decode("timestamp,transaction_type,token,amount", "soon,DEPOSIT,BTC,1");

    for policy in [SelectionPolicy::NoFilter, SelectionPolicy::ByDate { date: june_15() }] {
        assert!(matches!(
            policy.select(0, &candidate, 9),
            Err(RecordError::InvalidTimestamp { line: 9, .. })
        ));
    }
}

#[test]
fn test_only_dated_policies_report_date_filtering() {
    assert!(!SelectionPolicy::NoFilter.is_date_filtered());
    assert!(!SelectionPolicy::ByToken { token: "BTC".to_string() }.is_date_filtered());
    assert!(SelectionPolicy::ByDate { date: june_15() }.is_date_filtered());
    assert!(SelectionPolicy::ByTokenAndDate { token: "BTC".to_string(), date: june_15() }.is_date_filtered());
}
