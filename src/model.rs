mod api_error;
pub use api_error::ApiError;
mod api_result;
pub use api_result::ApiResult;
mod currency_code;
pub use currency_code::CurrencyCode;
mod error;
pub use error::{Error, Result};
mod exchange_rate;
pub use exchange_rate::Rate;
mod history_entry;
pub use history_entry::HistoryEntry;
mod rate_snapshot;
pub use rate_snapshot::RateSnapshot;
