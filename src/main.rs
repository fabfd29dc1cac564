use anyhow::{bail, Result};
use rates::{
    conf::Conf,
    context::AppContext,
    db::{self, migrate_to_latest},
    model::CurrencyCode,
    prepare,
    provider::QuotesApi,
    repository::RateStore,
    service::Synchronizer,
};
use rocket::fairing::AdHoc;
use std::{env, process::exit};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args: Vec<String> = env::args().skip(1).collect();

    if let Err(e) = run(&args).await {
        error!(%e, "Fatal error");
        exit(1);
    }
}

async fn run(args: &[String]) -> Result<()> {
    let conf = Conf::new()?;

    match args.first().map(String::as_str) {
        None | Some("serve") => serve(conf).await,
        Some("db") => db::cli(&conf, &args[1..]),
        Some("sync") => match args.get(1).map(String::as_str) {
            Some("now") => {
                let (sync, _) = synchronizer(&conf)?;
                let count = sync.sync().await?;
                info!(count, "Synced");
                Ok(())
            }
            _ => {
                error!(?args, "Invalid arguments");
                bail!("usage: sync now");
            }
        },
        Some(_) => {
            error!(?args, "Unknown argument");
            bail!("usage: [serve | db <drop|migrate [version]> | sync now]");
        }
    }
}

async fn serve(conf: Conf) -> Result<()> {
    let (sync, ctx) = synchronizer(&conf)?;
    let period = conf.sync_interval();

    let rocket = prepare(rocket::build(), ctx).attach(AdHoc::on_liftoff(
        "Rate sync",
        move |rocket| {
            Box::pin(async move {
                let shutdown = rocket.shutdown();
                tokio::spawn(async move { sync.schedule(period, shutdown).await });
            })
        },
    ));

    if let Err(e) = rocket.launch().await {
        bail!("server failed: {}", e);
    }
    Ok(())
}

/// Opens and migrates the store, then wires the provider to it.
fn synchronizer(conf: &Conf) -> Result<(Synchronizer, AppContext)> {
    let pool = db::pool(&conf.database_url, &conf.pool)?;
    migrate_to_latest(&mut *pool.get()?)?;

    let ctx = AppContext {
        store: RateStore::new(pool),
        base: CurrencyCode::new(&conf.base_currency)?,
    };
    let provider = QuotesApi::new(&conf.data_url, conf.fetch_timeout())?;
    let sync = Synchronizer::new(Box::new(provider), ctx.store.clone(), ctx.base.clone());
    Ok((sync, ctx))
}
