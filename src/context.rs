use crate::{model::CurrencyCode, repository::RateStore};

/// Handed to every handler through rocket's managed state and to the sync
/// task at construction.
#[derive(Clone)]
pub struct AppContext {
    pub store: RateStore,
    pub base: CurrencyCode,
}
