use super::CurrencyCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

#[derive(Clone, Debug, PartialEq)]
pub struct HistoryEntry {
    pub currency_code: CurrencyCode,
    pub rate: Decimal,
    pub recorded_at: DateTime<Utc>,
}
