use crate::{
    context::AppContext,
    model::{ApiError, ApiResult, CurrencyCode, Error, HistoryEntry},
    service::rates,
};
use chrono::{DateTime, SecondsFormat, Utc};
use rocket::{get, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize)]
pub struct HistoryOutput {
    pub code: CurrencyCode,
    pub rate: Decimal,
    pub date: String,
}

impl From<HistoryEntry> for HistoryOutput {
    fn from(entry: HistoryEntry) -> HistoryOutput {
        HistoryOutput {
            code: entry.currency_code,
            rate: rates::display(entry.rate),
            date: entry.recorded_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        }
    }
}

#[get("/history?<code>&<start>&<end>")]
pub async fn get(
    code: Option<&str>,
    start: Option<&str>,
    end: Option<&str>,
    ctx: &State<AppContext>,
) -> ApiResult<Vec<HistoryOutput>> {
    let (code, start, end) = match parse_input(code, start, end) {
        Ok(input) => input,
        Err(e) => return ApiError::from(e).into(),
    };

    let res = ctx
        .store
        .run(move |store| rates::history(store, &code, start, end))
        .await;
    ApiResult::new(res.map(|entries| entries.into_iter().map(HistoryOutput::from).collect()))
}

type Window = (CurrencyCode, Option<DateTime<Utc>>, Option<DateTime<Utc>>);

fn parse_input(code: Option<&str>, start: Option<&str>, end: Option<&str>) -> Result<Window, Error> {
    let code = match code {
        Some(code) => CurrencyCode::normalize(code)?,
        None => return Err(Error::InvalidInput("code is required".into())),
    };
    let start = rates::parse_time_bound("start", start)?;
    let end = rates::parse_time_bound("end", end)?;
    Ok((code, start, end))
}
