use crate::{
    model::{CurrencyCode, RateSnapshot, Result},
    provider::Provider,
    repository::{exchange_rate, rate_history, RateStore},
};
use chrono::Utc;
use rust_decimal::{prelude::FromPrimitive, Decimal};
use std::{future::Future, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

/// Fractional digits kept on ingest.
const RATE_SCALE: u32 = 8;

pub struct Synchronizer {
    provider: Box<dyn Provider>,
    store: RateStore,
    base: CurrencyCode,
}

impl Synchronizer {
    pub fn new(provider: Box<dyn Provider>, store: RateStore, base: CurrencyCode) -> Synchronizer {
        Synchronizer {
            provider,
            store,
            base,
        }
    }

    /// One sync cycle: fetch, parse, then upsert every rate and append its
    /// history row in a single transaction. Returns the number of applied rates.
    pub async fn sync(&self) -> Result<usize> {
        let snapshot = self.provider.fetch().await?;
        let rates = parse_quotes(&self.base, &snapshot);
        let skipped = snapshot.quotes.len() - rates.len();
        if rates.is_empty() {
            warn!(skipped, "Snapshot has no usable quotes");
        }

        let recorded_at = Utc::now();
        self.store
            .run(move |store| {
                store.transaction(|tx| {
                    for (code, rate) in &rates {
                        exchange_rate::upsert(tx, code, rate, &recorded_at)?;
                        rate_history::insert(tx, code, rate, &recorded_at)?;
                    }
                    Ok(rates.len())
                })
            })
            .await
    }

    /// Like `sync`, but failures are logged and swallowed.
    pub async fn run_cycle(&self) {
        info!(provider = %self.provider.name(), "Syncing...");
        match self.sync().await {
            Ok(count) => info!(provider = %self.provider.name(), count, "Sync finished"),
            Err(e) => error!(provider = %self.provider.name(), %e, "Sync failed, keeping previous rates"),
        }
    }

    /// Runs a cycle right away and then once per `period` until `shutdown`
    /// resolves. An in-flight cycle always runs to completion.
    pub async fn schedule<S>(&self, period: Duration, shutdown: S)
    where
        S: Future<Output = ()>,
    {
        info!(
            provider = %self.provider.name(),
            secs_between_syncs = period.as_secs(),
            "Scheduling sync..."
        );
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    info!(provider = %self.provider.name(), "Sync schedule cancelled");
                    break;
                }
                _ = ticker.tick() => self.run_cycle().await,
            }
        }
    }
}

/// Strips the base prefix from every pair symbol and keeps the pairs that
/// leave a valid code with a positive rate.
pub fn parse_quotes(base: &CurrencyCode, snapshot: &RateSnapshot) -> Vec<(CurrencyCode, Decimal)> {
    snapshot
        .quotes
        .iter()
        .filter_map(|(pair, quote)| {
            let code = pair.strip_prefix(base.as_str()).unwrap_or(pair.as_str());
            let code = match CurrencyCode::new(code) {
                Ok(code) => code,
                Err(_) => {
                    debug!(%pair, "Skipping pair with invalid code");
                    return None;
                }
            };
            match Decimal::from_f64(*quote).map(|it| it.round_dp(RATE_SCALE)) {
                Some(rate) if rate > Decimal::ZERO => Some((code, rate)),
                _ => {
                    debug!(%pair, quote, "Skipping pair with unusable rate");
                    None
                }
            }
        })
        .collect()
}
