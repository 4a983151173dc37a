// OHLCV candle loading from delimited text files.
use crate::error::EngineError;
use csv::{ReaderBuilder, StringRecord, Trim};
use shared::models::{Candle, Timestamp};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Number and timestamp parsing for candle exports.
pub mod format {
    use chrono::{DateTime, NaiveDate, NaiveDateTime};

    /// Parses `s` as f64. With `decimal_comma`, '.' is a thousands
    /// separator and ',' the decimal mark ("1.234,56").
    pub fn parse_number(s: &str, decimal_comma: bool) -> Result<f64, String> {
        let trimmed = s.trim();
        let parsed = if decimal_comma {
            trimmed.replace('.', "").replace(',', ".").parse::<f64>()
        } else {
            trimmed.parse::<f64>()
        };
        parsed.map_err(|e| format!("Failed to parse number '{}': {}", s, e))
    }

    /// Epoch milliseconds, RFC 3339, "YYYY-MM-DD HH:MM:SS" or "YYYY-MM-DD" (UTC).
    pub fn parse_timestamp_millis(s: &str) -> Result<i64, String> {
        let trimmed = s.trim();
        if let Ok(millis) = trimmed.parse::<i64>() {
            return Ok(millis);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
            return Ok(dt.timestamp_millis());
        }
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S") {
            return Ok(naive.and_utc().timestamp_millis());
        }
        if let Some(naive) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(naive.and_utc().timestamp_millis());
        }
        Err(format!("Unrecognised timestamp '{}'", s))
    }

}

#[derive(Debug, Clone, Copy)]
pub struct CsvFormat {
    pub delimiter: u8,
    pub decimal_comma: bool,
}

impl Default for CsvFormat {
    fn default() -> Self {
        CsvFormat { delimiter: b',', decimal_comma: false }
    }
}

pub struct CandleCsvLoader;

impl CandleCsvLoader {
    // Header (any order, case-insensitive): timestamp,open,high,low,close[,volume]
    pub fn load_candles_from_csv(path: &Path, csv_format: CsvFormat) -> Result<Vec<Candle>, EngineError> {
        let file = File::open(path)?;
        let candles = Self::read_candles(BufReader::new(file), csv_format)?;
        tracing::info!(path = %path.display(), candles = candles.len(), "Loaded candles from CSV");
        Ok(candles)
    }

    /// Returns candles ordered by timestamp, keeping the first row of any duplicated timestamp.
    pub fn read_candles<R: Read>(reader: R, csv_format: CsvFormat) -> Result<Vec<Candle>, EngineError> {
        let mut rdr = ReaderBuilder::new()
            .delimiter(csv_format.delimiter)
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        let mut rows: Vec<(i64, Candle)> = Vec::new();

        for (idx, result) in rdr.records().enumerate() {
            let record = result?;
            let line = idx + 2;

            let ts_raw = Self::required_field(&record, &headers, "timestamp", line)?;
            let millis = format::parse_timestamp_millis(ts_raw)
                .map_err(|e| EngineError::CsvDataFormatError(format!("Error parsing 'timestamp' at line {}: {}", line, e)))?;

            let number = |name: &str| -> Result<f64, EngineError> {
                let raw = Self::required_field(&record, &headers, name, line)?;
                format::parse_number(raw, csv_format.decimal_comma).map_err(|e| {
                    EngineError::CsvDataFormatError(format!("Error parsing '{}' at line {}: {}", name, line, e))
                })
            };

            let open = number("open")?;
            let high = number("high")?;
            let low = number("low")?;
            let close = number("close")?;
            let volume = match Self::get_field(&record, &headers, "volume") {
                Some(_) => number("volume")?,
                None => 0.0,
            };

            rows.push((
                millis,
                Candle { timestamp: Timestamp::Millis(millis), open, high, low, close, volume },
            ));
        }

        // Stable sort keeps the earliest row first among equal timestamps.
        rows.sort_by_key(|(millis, _)| *millis);
        let before = rows.len();
        rows.dedup_by_key(|(millis, _)| *millis);
        if rows.len() < before {
            tracing::warn!(dropped = before - rows.len(), "Dropped rows with duplicate timestamps");
        }

        Ok(rows.into_iter().map(|(_, candle)| candle).collect())
    }

    fn get_field<'a>(record: &'a StringRecord, headers: &StringRecord, name: &str) -> Option<&'a str> {
        headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
            .and_then(|pos| record.get(pos))
            .filter(|value| !value.is_empty())
    }

    fn required_field<'a>(
        record: &'a StringRecord,
        headers: &StringRecord,
        name: &str,
        line: usize,
    ) -> Result<&'a str, EngineError> {
        Self::get_field(record, headers, name).ok_or_else(|| {
            EngineError::CsvDataFormatError(format!("Missing '{}' field in CSV record at line {}", name, line))
        })
    }
}
