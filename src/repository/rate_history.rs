use super::sql::{decimal, get_decimal, get_timestamp, timestamp};
use crate::model::{CurrencyCode, HistoryEntry};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Result};
use rust_decimal::Decimal;

pub const HISTORY_LIMIT: usize = 100;

pub fn insert(
    conn: &Connection,
    code: &CurrencyCode,
    rate: &Decimal,
    recorded_at: &DateTime<Utc>,
) -> Result<usize> {
    let query = "INSERT INTO rate_history (currency_code, rate, recorded_at) VALUES (?, ?, ?)";
    conn.execute(query, params![code, decimal(rate), timestamp(recorded_at)])
}

/// Newest first, both bounds inclusive.
pub fn select_by_code(
    conn: &Connection,
    code: &CurrencyCode,
    start: Option<&DateTime<Utc>>,
    end: Option<&DateTime<Utc>>,
) -> Result<Vec<HistoryEntry>> {
    let mut stmt = conn.prepare(
        r#"
        SELECT currency_code, rate, recorded_at
        FROM rate_history
        WHERE currency_code = ?1
            AND (?2 IS NULL OR recorded_at >= ?2)
            AND (?3 IS NULL OR recorded_at <= ?3)
        ORDER BY recorded_at DESC, id DESC
        LIMIT ?4
        "#,
    )?;
    let start = start.map(timestamp);
    let end = end.map(timestamp);
    let rows = stmt.query_map(params![code, start, end, HISTORY_LIMIT as i64], |row| {
        Ok(HistoryEntry {
            currency_code: row.get(0)?,
            rate: get_decimal(row, 1)?,
            recorded_at: get_timestamp(row, 2)?,
        })
    })?;
    rows.collect()
}

#[cfg(test)]
mod test {
    use super::HISTORY_LIMIT;
    use crate::{model::CurrencyCode, test::setup_db};
    use chrono::{Duration, TimeZone, Utc};
    use rusqlite::Result;
    use rust_decimal::Decimal;

    #[test]
    fn select_by_code_filters_and_orders() -> Result<()> {
        let (_dir, conn) = setup_db();
        let eur = CurrencyCode::new("EUR").unwrap();
        let jpy = CurrencyCode::new("JPY").unwrap();
        let t0 = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap();
        for day in 0..5 {
            let at = t0 + Duration::days(day);
            super::insert(&conn, &eur, &Decimal::new(90 + day, 2), &at)?;
            super::insert(&conn, &jpy, &Decimal::new(150, 0), &at)?;
        }

        let all = super::select_by_code(&conn, &eur, None, None)?;
        assert_eq!(5, all.len());
        assert!(all.iter().all(|it| it.currency_code == eur));
        assert!(all.windows(2).all(|w| w[0].recorded_at > w[1].recorded_at));

        let t1 = t0 + Duration::days(1);
        let t3 = t0 + Duration::days(3);
        let window = super::select_by_code(&conn, &eur, Some(&t1), Some(&t3))?;
        let dates: Vec<_> = window.iter().map(|it| it.recorded_at).collect();
        assert_eq!(vec![t3, t0 + Duration::days(2), t1], dates);

        let tail = super::select_by_code(&conn, &eur, Some(&t3), None)?;
        assert_eq!(2, tail.len());
        Ok(())
    }

    #[test]
    fn select_by_code_is_capped() -> Result<()> {
        let (_dir, conn) = setup_db();
        let eur = CurrencyCode::new("EUR").unwrap();
        let t0 = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        for i in 0..(HISTORY_LIMIT as i64 + 20) {
            super::insert(&conn, &eur, &Decimal::ONE, &(t0 + Duration::hours(i)))?;
        }
        let rows = super::select_by_code(&conn, &eur, None, None)?;
        assert_eq!(HISTORY_LIMIT, rows.len());
        assert_eq!(t0 + Duration::hours(HISTORY_LIMIT as i64 + 19), rows[0].recorded_at);
        Ok(())
    }
}
