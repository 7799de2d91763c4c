//! Provider response shapes and their normalization into candles.

use chrono::{NaiveDate, NaiveDateTime};
use market_core::{Candle, UpstreamError};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};

/// Field names of an Alpha Vantage style keyed series entry.
pub const KEYED_OPEN: &str = "1. open";
pub const KEYED_HIGH: &str = "2. high";
pub const KEYED_LOW: &str = "3. low";
pub const KEYED_CLOSE: &str = "4. close";

/// One row of a tabular OHLC series.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub date: String,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Decoded provider payload, before normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum RawProviderPayload {
    /// Array of arrays: `[open_time_ms, "open", "high", "low", "close", ...]`.
    Klines(Vec<Vec<Value>>),
    /// Entries keyed by ISO date, each a map of `"1. open"`..`"4. close"` strings.
    /// `BTreeMap` keeps the keys in lexicographic order.
    KeyedSeries(BTreeMap<String, HashMap<String, String>>),
    /// Rows with named Open/High/Low/Close columns.
    Table(Vec<TableRow>),
}

impl RawProviderPayload {
    /// Normalize into candles in the provider's key order.
    ///
    /// Ordering by time and truncation are left to the caller.
    pub fn into_candles(self, provider: &str) -> Result<Vec<Candle>, UpstreamError> {
        let candles = match self {
            RawProviderPayload::Klines(rows) => rows
                .iter()
                .enumerate()
                .map(|(i, row)| kline_to_candle(provider, i, row))
                .collect::<Result<Vec<_>, _>>()?,
            RawProviderPayload::KeyedSeries(entries) => entries
                .iter()
                .map(|(date, fields)| keyed_to_candle(provider, date, fields))
                .collect::<Result<Vec<_>, _>>()?,
            RawProviderPayload::Table(rows) => rows
                .iter()
                .map(|row| -> Result<Candle, UpstreamError> {
                    Ok(Candle::new(
                        parse_timestamp(provider, &row.date)?,
                        row.open,
                        row.high,
                        row.low,
                        row.close,
                    ))
                })
                .collect::<Result<Vec<_>, _>>()?,
        };

        if candles.is_empty() {
            return Err(UpstreamError::EmptyPayload {
                provider: provider.to_string(),
            });
        }
        Ok(candles)
    }
}

fn kline_to_candle(provider: &str, index: usize, row: &[Value]) -> Result<Candle, UpstreamError> {
    if row.len() < 5 {
        return Err(UpstreamError::malformed(
            provider,
            format!("kline {} has {} fields, expected at least 5", index, row.len()),
        ));
    }
    let timestamp = row[0].as_i64().ok_or_else(|| {
        UpstreamError::malformed(provider, format!("kline {} has a non-integer open time", index))
    })?;
    let field = |pos: usize| {
        json_number(&row[pos]).ok_or_else(|| {
            UpstreamError::malformed(
                provider,
                format!("kline {} field {} is not numeric: {}", index, pos, row[pos]),
            )
        })
    };

    Ok(Candle::new(timestamp, field(1)?, field(2)?, field(3)?, field(4)?))
}

fn keyed_to_candle(
    provider: &str,
    date: &str,
    fields: &HashMap<String, String>,
) -> Result<Candle, UpstreamError> {
    let field = |key: &str| -> Result<f64, UpstreamError> {
        let raw = fields
            .get(key)
            .ok_or_else(|| UpstreamError::missing_key(provider, &format!("{}.{}", date, key)))?;
        raw.trim().parse::<f64>().map_err(|_| {
            UpstreamError::malformed(provider, format!("{} {} is not numeric: {:?}", date, key, raw))
        })
    };

    Ok(Candle::new(
        parse_timestamp(provider, date)?,
        field(KEYED_OPEN)?,
        field(KEYED_HIGH)?,
        field(KEYED_LOW)?,
        field(KEYED_CLOSE)?,
    ))
}

/// Prices arrive as decimal strings; plain JSON numbers are accepted too.
fn json_number(value: &Value) -> Option<f64> {
    match value {
        Value::String(s) => s.trim().parse().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Parse a provider date or datetime into Unix milliseconds (UTC).
pub(crate) fn parse_timestamp(provider: &str, raw: &str) -> Result<i64, UpstreamError> {
    let raw = raw.trim();
    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }
    for format in ["%Y-%m-%d", "%Y/%m/%d", "%Y%m%d"] {
        if let Ok(d) = NaiveDate::parse_from_str(raw, format) {
            if let Some(dt) = d.and_hms_opt(0, 0, 0) {
                return Ok(dt.and_utc().timestamp_millis());
            }
        }
    }

    Err(UpstreamError::malformed(
        provider,
        format!("could not parse date: {:?}", raw),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn keyed(open: &str, high: &str, low: &str, close: &str) -> HashMap<String, String> {
        HashMap::from([
            (KEYED_OPEN.to_string(), open.to_string()),
            (KEYED_HIGH.to_string(), high.to_string()),
            (KEYED_LOW.to_string(), low.to_string()),
            (KEYED_CLOSE.to_string(), close.to_string()),
        ])
    }

    #[test]
    fn test_klines_use_fixed_indices() {
        let rows = vec![vec![
            json!(1_700_000_000_000i64),
            json!("100.5"),
            json!("110.0"),
            json!("95.25"),
            json!("105.0"),
            json!("1234.5"),
        ]];
        let candles = RawProviderPayload::Klines(rows).into_candles("binance").unwrap();

        assert_eq!(
            candles,
            vec![Candle::new(1_700_000_000_000, 100.5, 110.0, 95.25, 105.0)]
        );
    }

    #[test]
    fn test_klines_reject_short_rows_and_bad_numbers() {
        let short = RawProviderPayload::Klines(vec![vec![json!(1), json!("1")]]);
        assert!(matches!(
            short.into_candles("binance"),
            Err(UpstreamError::Malformed { .. })
        ));

        let bad = RawProviderPayload::Klines(vec![vec![
            json!(1),
            json!("abc"),
            json!("1"),
            json!("1"),
            json!("1"),
        ]]);
        assert!(matches!(
            bad.into_candles("binance"),
            Err(UpstreamError::Malformed { .. })
        ));
    }

    #[test]
    fn test_keyed_series_is_lexicographic() {
        let mut entries = BTreeMap::new();
        entries.insert("2024-01-03".to_string(), keyed("3", "3", "3", "3"));
        entries.insert("2024-01-01".to_string(), keyed("1", "1", "1", "1"));
        entries.insert("2024-01-02".to_string(), keyed("2", "2", "2", "2"));

        let candles = RawProviderPayload::KeyedSeries(entries)
            .into_candles("alphavantage")
            .unwrap();
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        assert_eq!(closes, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_keyed_series_missing_field() {
        let mut fields = keyed("1", "1", "1", "1");
        fields.remove(KEYED_CLOSE);
        let entries = BTreeMap::from([("2024-01-01".to_string(), fields)]);

        match RawProviderPayload::KeyedSeries(entries).into_candles("alphavantage") {
            Err(UpstreamError::MissingKey { key, .. }) => assert_eq!(key, "2024-01-01.4. close"),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_payloads() {
        assert!(matches!(
            RawProviderPayload::Table(vec![]).into_candles("stooq"),
            Err(UpstreamError::EmptyPayload { .. })
        ));
        assert!(matches!(
            RawProviderPayload::KeyedSeries(BTreeMap::new()).into_candles("alphavantage"),
            Err(UpstreamError::EmptyPayload { .. })
        ));
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(
            parse_timestamp("p", "1970-01-02").unwrap(),
            86_400_000
        );
        assert_eq!(
            parse_timestamp("p", "1970-01-01 00:01:00").unwrap(),
            60_000
        );
        assert!(parse_timestamp("p", "yesterday").is_err());
    }
}
