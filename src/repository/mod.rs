pub mod exchange_rate;
pub mod rate_history;
pub use rate_history::HISTORY_LIMIT;
mod rate_store;
pub use rate_store::RateStore;
mod sql;
