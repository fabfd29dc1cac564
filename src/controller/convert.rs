use crate::{
    context::AppContext,
    model::{ApiError, ApiResult, CurrencyCode, Error},
    service::conversion::{self, Conversion},
};
use rocket::{get, State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Serialize, Deserialize)]
pub struct ConvertOutput {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Decimal,
    pub result: Decimal,
}

impl From<Conversion> for ConvertOutput {
    fn from(c: Conversion) -> ConvertOutput {
        ConvertOutput {
            from: c.from,
            to: c.to,
            amount: c.amount,
            result: c.result,
        }
    }
}

#[get("/convert?<from>&<to>&<amount>")]
pub async fn get(
    from: Option<&str>,
    to: Option<&str>,
    amount: Option<&str>,
    ctx: &State<AppContext>,
) -> ApiResult<ConvertOutput> {
    let input = parse_input(from, to, amount);
    let (from, to, amount) = match input {
        Ok(input) => input,
        Err(e) => return ApiError::from(e).into(),
    };

    let res = ctx
        .store
        .run(move |store| conversion::convert(store, from, to, amount))
        .await;
    ApiResult::new(res.map(ConvertOutput::from))
}

fn parse_input(
    from: Option<&str>,
    to: Option<&str>,
    amount: Option<&str>,
) -> Result<(CurrencyCode, CurrencyCode, Option<Decimal>), Error> {
    let from = CurrencyCode::normalize(from.unwrap_or_default())?;
    let to = CurrencyCode::normalize(to.unwrap_or_default())?;
    let amount = match amount.map(str::trim) {
        None | Some("") => None,
        Some(amount) => Some(
            Decimal::from_str(amount)
                .map_err(|_| Error::InvalidInput(format!("invalid amount {:?}", amount)))?,
        ),
    };
    Ok((from, to, amount))
}
