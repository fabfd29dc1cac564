use crate::{
    context::AppContext,
    model::{ApiError, ApiResult, CurrencyCode},
    service::rates,
};
use chrono::{DateTime, Utc};
use rocket::{get, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, PartialEq, Serialize, Deserialize)]
pub struct RateOutput {
    pub code: CurrencyCode,
    pub rate: Decimal,
    pub base: CurrencyCode,
    pub updated_at: DateTime<Utc>,
}

#[get("/rates/<code>")]
pub async fn get(code: &str, ctx: &State<AppContext>) -> ApiResult<RateOutput> {
    let code = match CurrencyCode::normalize(code) {
        Ok(code) => code,
        Err(e) => return ApiError::from(e).into(),
    };

    let base = ctx.base.clone();
    let res = ctx.store.run(move |store| rates::rate(store, &code)).await;
    ApiResult::new(res.map(|rate| RateOutput {
        code: rate.currency_code,
        rate: rates::display(rate.rate_to_base),
        base,
        updated_at: rate.updated_at,
    }))
}
