//! Fixed-point money helpers.
//! Every stored amount carries exactly two decimal places.

use bigdecimal::BigDecimal;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;
use std::cmp::Ordering;

/// Decimal places kept for every balance, stake, odds and ledger amount.
pub const MONEY_SCALE: i64 = 2;

/// Builds an amount from a count of hundredths, e.g. `from_cents(9250)` is `92.50`.
pub fn from_cents(cents: i64) -> BigDecimal {
    BigDecimal::new(cents.into(), MONEY_SCALE)
}

/// Balance credited to every new account.
pub fn starting_balance() -> BigDecimal {
    from_cents(10_000)
}

/// Share of the potential win paid out on an early cashout.
pub fn cashout_rate() -> BigDecimal {
    from_cents(75)
}

pub fn zero() -> BigDecimal {
    from_cents(0)
}

/// True when the value has no digits beyond the second decimal place.
pub fn has_cent_precision(value: &BigDecimal) -> bool {
    value.with_scale(MONEY_SCALE) == *value
}

/// Rounds half-to-even to two decimal places.
///
/// `69.375` becomes `69.38`, `0.125` becomes `0.12`. The result always has
/// scale 2 so it prints as e.g. `92.50`.
pub fn round_money(value: &BigDecimal) -> BigDecimal {
    let negative = *value < zero();
    let scaled = value.abs() * BigDecimal::from(100);
    let whole = scaled.with_scale(0);
    let twice_fraction = (scaled - whole.clone()) * BigDecimal::from(2);

    let round_up = match twice_fraction.cmp(&BigDecimal::from(1)) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => is_odd(&whole),
    };
    let whole = if round_up {
        whole + BigDecimal::from(1)
    } else {
        whole
    };

    let (digits, _) = whole.with_scale(0).as_bigint_and_exponent();
    let rounded = BigDecimal::new(digits, MONEY_SCALE);
    if negative {
        -rounded
    } else {
        rounded
    }
}

fn is_odd(whole: &BigDecimal) -> bool {
    let half = (whole.clone() / BigDecimal::from(2)).with_scale(0);
    half * BigDecimal::from(2) != *whole
}

/// `serialize_with` target: writes the amount as a JSON number with two
/// decimals, e.g. `92.50`, without passing through a float.
pub fn serialize_amount<S>(value: &BigDecimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let raw = RawValue::from_string(round_money(value).to_string())
        .map_err(serde::ser::Error::custom)?;
    raw.serialize(serializer)
}

pub fn serialize_optional_amount<S>(
    value: &Option<BigDecimal>,
    serializer: S,
) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(amount) => serialize_amount(amount, serializer),
        None => serializer.serialize_none(),
    }
}
