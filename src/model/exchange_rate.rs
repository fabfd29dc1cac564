use super::CurrencyCode;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Current rate of one currency, expressed against the base currency.
#[derive(Clone, Debug, PartialEq)]
pub struct Rate {
    pub currency_code: CurrencyCode,
    pub rate_to_base: Decimal,
    pub updated_at: DateTime<Utc>,
}
