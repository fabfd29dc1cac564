use super::sql::{decimal, get_decimal, get_timestamp, timestamp};
use crate::model::{CurrencyCode, Rate};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Result, Row};
use rust_decimal::Decimal;

pub fn upsert(
    conn: &Connection,
    code: &CurrencyCode,
    rate: &Decimal,
    updated_at: &DateTime<Utc>,
) -> Result<usize> {
    let query = r#"
        INSERT INTO exchange_rate (currency_code, rate_to_base, updated_at)
        VALUES (?1, ?2, ?3)
        ON CONFLICT (currency_code)
        DO UPDATE SET rate_to_base = excluded.rate_to_base, updated_at = excluded.updated_at
    "#;
    conn.execute(query, params![code, decimal(rate), timestamp(updated_at)])
}

pub fn select_by_code(conn: &Connection, code: &CurrencyCode) -> Result<Option<Rate>> {
    conn.query_row(
        "SELECT currency_code, rate_to_base, updated_at FROM exchange_rate WHERE currency_code = ?",
        params![code],
        map_row,
    )
    .optional()
}

pub fn select_all(conn: &Connection) -> Result<Vec<Rate>> {
    let mut stmt =
        conn.prepare("SELECT currency_code, rate_to_base, updated_at FROM exchange_rate")?;
    let rows = stmt.query_map([], map_row)?;
    rows.collect()
}

fn map_row(row: &Row) -> Result<Rate> {
    Ok(Rate {
        currency_code: row.get(0)?,
        rate_to_base: get_decimal(row, 1)?,
        updated_at: get_timestamp(row, 2)?,
    })
}
