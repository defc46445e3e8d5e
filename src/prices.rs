//! Prices

use rust_decimal::{
    Decimal,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{Currency, EUR, GBP, PHP, USD},
};

use crate::validation::ValidationError;

/// Converts a caller-supplied amount in major units into money.
///
/// The amount is rounded to the currency's minor unit.
///
/// # Errors
///
/// - [`ValidationError::NonPositivePrice`]: the amount is zero or negative, or rounds to zero.
/// - [`ValidationError::InvalidPrice`]: the amount is NaN, infinite or too large.
pub fn price_from_f64(
    amount: f64,
    currency: &'static Currency,
) -> Result<Money<'static, Currency>, ValidationError> {
    if amount <= 0.0 {
        return Err(ValidationError::NonPositivePrice);
    }

    let amount = Decimal::from_f64(amount).ok_or(ValidationError::InvalidPrice)?;
    let minor_units = to_minor_units(amount, currency).ok_or(ValidationError::InvalidPrice)?;

    if minor_units <= 0 {
        return Err(ValidationError::NonPositivePrice);
    }

    Ok(Money::from_minor(minor_units, currency))
}

/// Converts an amount in major units to minor units of `currency`, rounding to the nearest unit.
pub fn to_minor_units(amount: Decimal, currency: &Currency) -> Option<i64> {
    amount
        .checked_div(Decimal::new(1, currency.exponent))
        .and_then(|value| value.round_dp(0).to_i64())
}

/// Looks up one of the supported currencies by ISO code.
pub fn currency_from_code(code: &str) -> Option<&'static Currency> {
    match code {
        "PHP" => Some(PHP),
        "GBP" => Some(GBP),
        "USD" => Some(USD),
        "EUR" => Some(EUR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn price_from_f64_rounds_to_minor_units() -> TestResult {
        let price = price_from_f64(10.0, PHP)?;

        assert_eq!(price, Money::from_minor(1000, PHP));
        assert_eq!(price_from_f64(2.999, PHP)?, Money::from_minor(300, PHP));

        Ok(())
    }

    #[test]
    fn price_from_f64_rejects_non_positive() {
        assert_eq!(
            price_from_f64(0.0, PHP),
            Err(ValidationError::NonPositivePrice)
        );
        assert_eq!(
            price_from_f64(-1.5, PHP),
            Err(ValidationError::NonPositivePrice)
        );
        assert_eq!(
            price_from_f64(0.001, PHP),
            Err(ValidationError::NonPositivePrice)
        );
    }

    #[test]
    fn price_from_f64_rejects_non_finite() {
        assert_eq!(
            price_from_f64(f64::NAN, PHP),
            Err(ValidationError::InvalidPrice)
        );
        assert_eq!(
            price_from_f64(f64::INFINITY, PHP),
            Err(ValidationError::InvalidPrice)
        );
        assert_eq!(
            price_from_f64(f64::NEG_INFINITY, PHP),
            Err(ValidationError::NonPositivePrice)
        );
    }

    #[test]
    fn to_minor_units_uses_currency_exponent() {
        assert_eq!(to_minor_units(Decimal::new(1234, 2), PHP), Some(1234));
        assert_eq!(to_minor_units(Decimal::new(5, 0), GBP), Some(500));
    }

    #[test]
    fn currency_from_code_knows_supported_codes() {
        assert_eq!(currency_from_code("PHP"), Some(PHP));
        assert_eq!(currency_from_code("USD"), Some(USD));
        assert_eq!(currency_from_code("ABC"), None);
    }
}
