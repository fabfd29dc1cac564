use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{types::Type, Error, Result, Row};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fixed-width UTC text, so lexical order is chronological order.
pub fn timestamp(value: &DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub fn decimal(value: &Decimal) -> String {
    value.to_string()
}

pub fn get_timestamp(row: &Row, idx: usize) -> Result<DateTime<Utc>> {
    let text: String = row.get(idx)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|it| it.with_timezone(&Utc))
        .map_err(|e| Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

pub fn get_decimal(row: &Row, idx: usize) -> Result<Decimal> {
    let text: String = row.get(idx)?;
    Decimal::from_str(&text)
        .map_err(|e| Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}
