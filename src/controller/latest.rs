use crate::{
    context::AppContext,
    model::{ApiResult, CurrencyCode, Rate},
    service::rates,
};
use chrono::{DateTime, Utc};
use rocket::{get, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Serialize, Deserialize)]
pub struct LatestOutput {
    pub base: CurrencyCode,
    pub rates: BTreeMap<CurrencyCode, LatestRate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LatestRate {
    pub rate: Decimal,
    pub updated_at: DateTime<Utc>,
}

impl From<Rate> for LatestRate {
    fn from(rate: Rate) -> LatestRate {
        LatestRate {
            rate: rates::display(rate.rate_to_base),
            updated_at: rate.updated_at,
        }
    }
}

#[get("/latest")]
pub async fn get(ctx: &State<AppContext>) -> ApiResult<LatestOutput> {
    let base = ctx.base.clone();
    let res = ctx.store.run(rates::latest).await;
    ApiResult::new(res.map(|list| LatestOutput {
        base,
        rates: list
            .into_iter()
            .map(|rate| (rate.currency_code.clone(), rate.into()))
            .collect(),
    }))
}
