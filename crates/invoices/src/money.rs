//! Monetary amounts: parsed in major units, stored in minor units (cents).

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Why a raw amount string was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is required")]
    Empty,

    #[error("expected a number, received '{0}'")]
    NotANumber(String),

    #[error("amount must not be negative")]
    Negative,

    #[error("amount is too large")]
    TooLarge,
}

/// A validated, non-negative amount whose cent count fits in an `i64`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Amount {
    major: Decimal,
    cents: i64,
}

impl Amount {
    /// Coerce a form value into an amount.
    ///
    /// Accepts plain (`15.50`) and scientific (`1.55e1`) notation and nothing
    /// else: no digit separators, no `NaN`/`inf`.  Sub-cent digits are
    /// rounded half-up.
    pub fn parse(raw: &str) -> Result<Self, AmountError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AmountError::Empty);
        }
        if !is_numeric_literal(trimmed) {
            return Err(AmountError::NotANumber(raw.to_owned()));
        }

        let (negative, body) = match trimmed.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
        };
        let literal = canonical(body);
        let major = Decimal::from_str(&literal)
            .or_else(|_| Decimal::from_scientific(&literal))
            // Well-formed but outside what a Decimal can hold.
            .map_err(|_| if negative { AmountError::Negative } else { AmountError::TooLarge })?;

        if negative && !major.is_zero() {
            return Err(AmountError::Negative);
        }

        let cents = to_cents(major).ok_or(AmountError::TooLarge)?;
        Ok(Self { major, cents })
    }

    /// The amount as entered, in major units.
    pub fn major(&self) -> Decimal {
        self.major
    }

    /// The amount in minor units, as persisted.
    pub fn cents(&self) -> i64 {
        self.cents
    }
}

impl FromStr for Amount {
    type Err = AmountError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// `[+-]digits[.digits][(e|E)[+-]digits]`, with digits on at least one side
/// of the point.
fn is_numeric_literal(s: &str) -> bool {
    fn digits(s: &str) -> usize {
        s.bytes().take_while(u8::is_ascii_digit).count()
    }

    let s = s.strip_prefix(['+', '-']).unwrap_or(s);
    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (s, None),
    };

    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    let mantissa_ok = digits(int) == int.len()
        && digits(frac) == frac.len()
        && !(int.is_empty() && frac.is_empty());

    let exponent_ok = exponent.map_or(true, |e| {
        let e = e.strip_prefix(['+', '-']).unwrap_or(e);
        !e.is_empty() && digits(e) == e.len()
    });

    mantissa_ok && exponent_ok
}

/// Rewrite an unsigned literal accepted by [`is_numeric_literal`] into the
/// shape `rust_decimal` parses: `.5` → `0.5`, `5.` → `5`, `E` → `e`.
fn canonical(body: &str) -> String {
    let (mantissa, exponent) = match body.split_once(['e', 'E']) {
        Some((m, e)) => (m, Some(e)),
        None => (body, None),
    };
    let mantissa = mantissa.strip_suffix('.').unwrap_or(mantissa);
    let mut out = String::with_capacity(body.len() + 1);
    if mantissa.starts_with('.') {
        out.push('0');
    }
    out.push_str(mantissa);
    if let Some(exponent) = exponent {
        out.push('e');
        out.push_str(exponent);
    }
    out
}

/// Scale major units to cents, rounding half-up to a whole cent.
pub fn to_cents(major: Decimal) -> Option<i64> {
    major
        .checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Convert a stored cent count back to major units.
pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
