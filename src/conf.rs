use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::Deserialize;
use std::{env, include_bytes, time::Duration};

#[derive(Clone, Debug, Deserialize)]
pub struct Conf {
    pub database_url: String,
    pub data_url: String,
    pub base_currency: String,
    pub sync_interval_secs: u64,
    pub fetch_timeout_secs: u64,
    pub pool: PoolConf,
}

#[derive(Clone, Debug, Deserialize)]
pub struct PoolConf {
    pub max_size: u32,
    pub timeout_secs: u64,
}

impl Conf {
    pub fn new() -> anyhow::Result<Conf> {
        Conf::from_figment(Conf::figment())
    }

    /// Embedded defaults, then an optional TOML file, then `RATES_*` and the
    /// raw `DATABASE_URL` / `DATA_URL` variables.
    pub fn figment() -> Figment {
        let default_conf = include_bytes!("../rates.conf");
        let default_conf = String::from_utf8_lossy(default_conf);

        let custom_conf_path = env::var("RATES_CONF").unwrap_or_else(|_| "rates.toml".into());

        Figment::new()
            .merge(Toml::string(&default_conf))
            .merge(Toml::file(custom_conf_path))
            .merge(Env::prefixed("RATES_").split("__"))
            .merge(Env::raw().only(&["DATABASE_URL", "DATA_URL"]))
    }

    pub fn from_figment(figment: Figment) -> anyhow::Result<Conf> {
        let conf: Conf = figment.extract()?;
        if conf.sync_interval_secs == 0 {
            anyhow::bail!("sync_interval_secs must be positive");
        }
        Ok(conf)
    }

    pub fn sync_interval(&self) -> Duration {
        Duration::from_secs(self.sync_interval_secs)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

impl PoolConf {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
