use crate::{
    model::{CurrencyCode, Error, Result},
    repository::RateStore,
};
use rust_decimal::Decimal;

/// Fractional digits of a conversion result.
pub const RESULT_SCALE: u32 = 4;

#[derive(Debug, PartialEq)]
pub struct Conversion {
    pub from: CurrencyCode,
    pub to: CurrencyCode,
    pub amount: Decimal,
    pub result: Decimal,
}

/// Absent and zero amounts both mean one unit.
pub fn effective_amount(amount: Option<Decimal>) -> Decimal {
    match amount {
        Some(amount) if !amount.is_zero() => amount,
        _ => Decimal::ONE,
    }
}

/// `amount * rate_to / rate_from` in exact decimal arithmetic, rounded to
/// `RESULT_SCALE`.
pub fn cross(amount: Decimal, rate_from: Decimal, rate_to: Decimal) -> Result<Decimal> {
    if rate_from == rate_to {
        return Ok(amount);
    }
    amount
        .checked_mul(rate_to)
        .and_then(|it| it.checked_div(rate_from))
        .map(|it| it.round_dp(RESULT_SCALE))
        .ok_or_else(|| Error::InvalidInput(format!("amount {} is out of range", amount)))
}

pub fn convert(
    store: &RateStore,
    from: CurrencyCode,
    to: CurrencyCode,
    amount: Option<Decimal>,
) -> Result<Conversion> {
    let amount = effective_amount(amount);
    let rate_from = store.get_rate(&from)?.rate_to_base;
    let rate_to = store.get_rate(&to)?.rate_to_base;
    let result = cross(amount, rate_from, rate_to)?;
    Ok(Conversion {
        from,
        to,
        amount,
        result,
    })
}

#[cfg(test)]
mod test {
    use super::{convert, cross, effective_amount};
    use crate::{
        model::{CurrencyCode, Error},
        test::setup_store,
    };
    use anyhow::Result;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn effective_amount_defaults_to_one() {
        assert_eq!(Decimal::ONE, effective_amount(None));
        assert_eq!(Decimal::ONE, effective_amount(Some(Decimal::ZERO)));
        assert_eq!(dec("-2.5"), effective_amount(Some(dec("-2.5"))));
    }

    #[test]
    fn cross_rates() -> Result<()> {
        // 100 EUR -> JPY with USDEUR 0.9 and USDJPY 150
        assert_eq!(dec("16666.6667"), cross(dec("100"), dec("0.9"), dec("150"))?);
        assert_eq!(dec("-10"), cross(dec("-9"), dec("0.9"), dec("1"))?);
        Ok(())
    }

    #[test]
    fn cross_same_rate_is_identity() -> Result<()> {
        let amount = dec("123.456789123");
        assert_eq!(amount, cross(amount, dec("0.91234567"), dec("0.91234567"))?);
        Ok(())
    }

    #[test]
    fn cross_overflow() {
        let res = cross(Decimal::MAX, dec("0.001"), dec("1000"));
        assert!(matches!(res, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn convert_round_trip() -> Result<()> {
        let (_dir, store) = setup_store();
        let (eur, jpy) = (CurrencyCode::new("EUR")?, CurrencyCode::new("JPY")?);
        let now = Utc::now();
        store.upsert_rate(&eur, &dec("0.91234567"), &now)?;
        store.upsert_rate(&jpy, &dec("151.12345678"), &now)?;

        for amount in ["1", "42.42", "1000000", "0.5"] {
            let amount = dec(amount);
            let there = convert(&store, eur.clone(), jpy.clone(), Some(amount))?;
            let back = convert(&store, jpy.clone(), eur.clone(), Some(there.result))?;
            assert!((back.result - amount).abs() <= dec("0.0001"), "{} vs {}", amount, back.result);
        }
        Ok(())
    }

    #[test]
    fn convert_same_currency() -> Result<()> {
        let (_dir, store) = setup_store();
        let eur = CurrencyCode::new("EUR")?;
        store.upsert_rate(&eur, &dec("0.91234567"), &Utc::now())?;
        let res = convert(&store, eur.clone(), eur.clone(), Some(dec("10.123456")))?;
        assert_eq!(dec("10.123456"), res.result);
        Ok(())
    }

    #[test]
    fn convert_unknown_currency() -> Result<()> {
        let (_dir, store) = setup_store();
        let eur = CurrencyCode::new("EUR")?;
        store.upsert_rate(&eur, &dec("0.9"), &Utc::now())?;
        let res = convert(&store, eur.clone(), CurrencyCode::new("XYZ")?, None);
        assert!(matches!(res, Err(Error::NotFound(code)) if code.as_str() == "XYZ"));
        let res = convert(&store, CurrencyCode::new("XYZ")?, eur, None);
        assert!(matches!(res, Err(Error::NotFound(_))));
        Ok(())
    }
}
