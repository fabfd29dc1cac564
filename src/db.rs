use crate::{
    conf::{Conf, PoolConf},
    migrations::{latest_version, Migration, MIGRATIONS},
};
use anyhow::{bail, Result};
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::Connection;
use std::fs::remove_file;
use tracing::{error, info, warn};

#[derive(Debug)]
pub enum DbVersion {
    Specific(i16),
    Latest,
}

pub fn cli(conf: &Conf, args: &[String]) -> Result<()> {
    let first_arg = match args.first() {
        Some(arg) => arg,
        None => {
            error!("No args provided");
            bail!("usage: db <drop|migrate [version]>");
        }
    };

    match first_arg.as_str() {
        "drop" => drop(conf),
        "migrate" => {
            let version = match args.get(1) {
                Some(version) => DbVersion::Specific(version.parse::<i16>()?),
                None => DbVersion::Latest,
            };
            let pool = pool(&conf.database_url, &conf.pool)?;
            migrate(&mut *pool.get()?, version)
        }
        _ => {
            error!(?args, "Unknown argument");
            bail!("unknown db command: {}", first_arg);
        }
    }
}

fn drop(conf: &Conf) -> Result<()> {
    warn!("Dropping database...");
    let db_url = &conf.database_url;
    info!(%db_url);
    remove_file(db_url)?;
    warn!("Database has been dropped");
    Ok(())
}

pub fn migrate_to_latest(conn: &mut Connection) -> Result<()> {
    migrate(conn, DbVersion::Latest)
}

pub fn migrate(conn: &mut Connection, target_version: DbVersion) -> Result<()> {
    let current_version = schema_version(conn)?;
    info!(?current_version, ?target_version, "Migrating db schema");

    let target_version = match target_version {
        DbVersion::Latest => latest_version(),
        DbVersion::Specific(v) if v < 0 || v > latest_version() => {
            bail!("unknown schema version {}", v)
        }
        DbVersion::Specific(v) => v,
    };

    if current_version == target_version {
        info!("Schema is up to date");
    } else if current_version < target_version {
        info!("Schema is outdated, updating...");
        let migrations: Vec<&Migration> = MIGRATIONS
            .iter()
            .filter(|it| it.version > current_version && it.version <= target_version)
            .collect();
        warn!(count = migrations.len(), "Found pending migrations");
        for migr in migrations {
            info!(%migr.version, sql = migr.up.trim(), "Updating schema");
            conn.execute_batch(migr.up)?;
            conn.execute_batch(&format!("PRAGMA user_version={}", migr.version))?;
        }
    } else {
        info!("Downgrading the schema...");
        let migrations: Vec<&Migration> = MIGRATIONS
            .iter()
            .filter(|it| it.version > target_version && it.version <= current_version)
            .collect();
        warn!(count = migrations.len(), "Found pending migrations");
        for migr in migrations.iter().rev() {
            info!(
                from = migr.version,
                to = migr.version - 1,
                sql = migr.down.trim(),
                "Downgrading schema"
            );
            conn.execute_batch(migr.down)?;
            conn.execute_batch(&format!("PRAGMA user_version={}", migr.version - 1))?;
        }
    }

    Ok(())
}

/// Both pool checkout and SQLite lock waits are bounded by `conf.timeout_secs`.
pub fn pool(db_url: &str, conf: &PoolConf) -> Result<Pool<SqliteConnectionManager>> {
    let busy_timeout = conf.timeout();
    let manager = SqliteConnectionManager::file(db_url)
        .with_init(move |conn| conn.busy_timeout(busy_timeout));
    Ok(Pool::builder()
        .max_size(conf.max_size)
        .connection_timeout(conf.timeout())
        .build(manager)?)
}

fn schema_version(conn: &Connection) -> rusqlite::Result<i16> {
    conn.query_row("SELECT user_version FROM pragma_user_version", [], |row| {
        row.get(0)
    })
}

#[cfg(test)]
mod test {
    use super::{migrate, pool, schema_version, DbVersion};
    use crate::{conf::PoolConf, migrations::latest_version};
    use anyhow::Result;
    use rusqlite::Connection;
    use tempfile::TempDir;

    #[test]
    fn pool_busy_timeout_follows_conf() -> Result<()> {
        let dir = TempDir::new()?;
        let db_url = dir.path().join("rates.db");
        let conf = PoolConf {
            max_size: 1,
            timeout_secs: 2,
        };
        let pool = pool(db_url.to_str().unwrap(), &conf)?;
        let conn = pool.get()?;
        let busy_timeout: i64 = conn.pragma_query_value(None, "busy_timeout", |row| row.get(0))?;
        assert_eq!(2000, busy_timeout);
        Ok(())
    }

    #[test]
    fn migrate_up_and_down() -> Result<()> {
        let mut conn = Connection::open_in_memory()?;
        assert_eq!(0, schema_version(&conn)?);
        migrate(&mut conn, DbVersion::Latest)?;
        assert_eq!(latest_version(), schema_version(&conn)?);
        assert_eq!(0, count(&conn, "exchange_rate")?);
        assert_eq!(0, count(&conn, "rate_history")?);

        migrate(&mut conn, DbVersion::Specific(0))?;
        assert_eq!(0, schema_version(&conn)?);
        assert!(count(&conn, "exchange_rate").is_err());
        Ok(())
    }

    fn count(conn: &Connection, table: &str) -> rusqlite::Result<i64> {
        conn.query_row(&format!("SELECT count(*) FROM {}", table), [], |row| {
            row.get(0)
        })
    }

    #[test]
    fn migrate_to_unknown_version() -> Result<()> {
        let mut conn = Connection::open_in_memory()?;
        assert!(migrate(&mut conn, DbVersion::Specific(latest_version() + 1)).is_err());
        Ok(())
    }
}
