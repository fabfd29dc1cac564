use crate::{
    model::{CurrencyCode, Error, HistoryEntry, Rate, Result},
    repository::RateStore,
};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;

/// Fractional digits of a rate as presented to callers.
pub const DISPLAY_SCALE: u32 = 6;

pub fn display(rate: Decimal) -> Decimal {
    rate.round_dp(DISPLAY_SCALE)
}

pub fn latest(store: &RateStore) -> Result<Vec<Rate>> {
    store.list_rates()
}

pub fn rate(store: &RateStore, code: &CurrencyCode) -> Result<Rate> {
    store.get_rate(code)
}

pub fn history(
    store: &RateStore,
    code: &CurrencyCode,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Vec<HistoryEntry>> {
    store.query_history(code, start, end)
}

pub struct Health {
    pub connected: bool,
    pub checked_at: DateTime<Utc>,
}

pub fn health(store: &RateStore) -> Health {
    Health {
        connected: store.ping(),
        checked_at: Utc::now(),
    }
}

/// RFC 3339, or a bare `YYYY-MM-DD` meaning midnight UTC. Empty means unbounded.
pub fn parse_time_bound(name: &str, value: Option<&str>) -> Result<Option<DateTime<Utc>>> {
    let value = match value.map(str::trim) {
        None | Some("") => return Ok(None),
        Some(value) => value,
    };

    if let Ok(at) = DateTime::parse_from_rfc3339(value) {
        return Ok(Some(at.with_timezone(&Utc)));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|it| Some(it.and_utc()))
        .ok_or_else(|| {
            Error::InvalidInput(format!(
                "{} must be an RFC 3339 timestamp or a YYYY-MM-DD date",
                name
            ))
        })
}
