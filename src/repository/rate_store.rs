use super::{exchange_rate, rate_history};
use crate::model::{CurrencyCode, Error, HistoryEntry, Rate, Result};
use chrono::{DateTime, Utc};
use r2d2::{Pool, PooledConnection};
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Transaction;
use rust_decimal::Decimal;
use tracing::warn;

/// Current rates plus the append-only history, behind a bounded pool.
#[derive(Clone)]
pub struct RateStore {
    pool: Pool<SqliteConnectionManager>,
}

impl RateStore {
    pub fn new(pool: Pool<SqliteConnectionManager>) -> RateStore {
        RateStore { pool }
    }

    /// Fails with `Timeout` once the pool's connection timeout elapses.
    pub fn conn(&self) -> Result<PooledConnection<SqliteConnectionManager>> {
        Ok(self.pool.get()?)
    }

    /// Runs `f` inside one transaction. Any error rolls everything back.
    pub fn transaction<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Transaction) -> Result<T>,
    {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;
        let res = f(&tx)?;
        tx.commit()?;
        Ok(res)
    }

    /// Runs a blocking store call off the async executor.
    pub async fn run<T, F>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&RateStore) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let store = self.clone();
        tokio::task::spawn_blocking(move || f(&store))
            .await
            .map_err(|e| Error::Internal(e.to_string()))?
    }

    /// Auto-commits on its own connection. Sync cycles go through `transaction`.
    pub fn upsert_rate(
        &self,
        code: &CurrencyCode,
        rate: &Decimal,
        updated_at: &DateTime<Utc>,
    ) -> Result<()> {
        exchange_rate::upsert(&*self.conn()?, code, rate, updated_at)?;
        Ok(())
    }

    /// Auto-commits on its own connection. Sync cycles go through `transaction`.
    pub fn append_history(
        &self,
        code: &CurrencyCode,
        rate: &Decimal,
        recorded_at: &DateTime<Utc>,
    ) -> Result<()> {
        rate_history::insert(&*self.conn()?, code, rate, recorded_at)?;
        Ok(())
    }

    pub fn get_rate(&self, code: &CurrencyCode) -> Result<Rate> {
        exchange_rate::select_by_code(&*self.conn()?, code)?
            .ok_or_else(|| Error::NotFound(code.clone()))
    }

    pub fn list_rates(&self) -> Result<Vec<Rate>> {
        Ok(exchange_rate::select_all(&*self.conn()?)?)
    }

    pub fn query_history(
        &self,
        code: &CurrencyCode,
        start: Option<DateTime<Utc>>,
        end: Option<DateTime<Utc>>,
    ) -> Result<Vec<HistoryEntry>> {
        Ok(rate_history::select_by_code(
            &*self.conn()?,
            code,
            start.as_ref(),
            end.as_ref(),
        )?)
    }

    pub fn ping(&self) -> bool {
        let res = self
            .conn()
            .and_then(|conn| Ok(conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))?));

        match res {
            Ok(_) => true,
            Err(e) => {
                warn!(%e, "Store ping failed");
                false
            }
        }
    }
}
