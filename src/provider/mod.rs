mod provider;
pub use provider::Provider;
mod quotes_api;
pub use quotes_api::QuotesApi;
