//! Coercion of loosely-typed numeric input into cents and fractions.
//!
//! Nothing here fails: unparseable, non-finite, or missing input becomes
//! zero, negative amounts become zero, and oversized amounts are clamped to
//! [`MAX_CENTS`].

use std::str::FromStr;

use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use super::types::{Cents, MAX_CENTS};

/// A numeric field as it arrives from an upstream record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Int(i64),
    Float(f64),
    Text(String),
}

impl From<i64> for RawAmount {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawAmount {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

/// Round to whole cents using half-up (commercial rounding, away from zero).
///
/// Values outside the `i64` range saturate.
pub fn round_half_up(value: Decimal) -> Cents {
    let rounded = value.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    rounded.to_i64().unwrap_or(if rounded.is_sign_negative() {
        Cents::MIN
    } else {
        Cents::MAX
    })
}

/// Normalize a raw amount into cents within `[0, MAX_CENTS]`.
///
/// ```
/// use wertfluss::{normalize_cents, RawAmount};
///
/// assert_eq!(normalize_cents(Some(&RawAmount::from("1234.5"))), 1235);
/// assert_eq!(normalize_cents(Some(&RawAmount::from(f64::NAN))), 0);
/// assert_eq!(normalize_cents(Some(&RawAmount::from("abc"))), 0);
/// assert_eq!(normalize_cents(None), 0);
/// ```
pub fn normalize_cents(raw: Option<&RawAmount>) -> Cents {
    let cents = match raw {
        None => 0,
        Some(RawAmount::Int(value)) => *value,
        Some(RawAmount::Float(value)) => float_to_cents(*value),
        Some(RawAmount::Text(text)) => match parse_decimal(text) {
            Some(value) => round_half_up(value),
            None => text.trim().parse::<f64>().map(float_to_cents).unwrap_or(0),
        },
    };
    cents.clamp(0, MAX_CENTS)
}

/// Normalize a raw count (e.g. labor minutes) into a non-negative `u32`.
pub fn normalize_count(raw: Option<&RawAmount>) -> u32 {
    u32::try_from(normalize_cents(raw)).unwrap_or(u32::MAX)
}

/// Normalize a raw fraction (rate, percentage, divisor).
///
/// Missing input yields `default`; unparseable or non-finite input yields
/// zero. The value is not range-checked.
pub fn normalize_fraction(raw: Option<&RawAmount>, default: Decimal) -> Decimal {
    match raw {
        None => default,
        Some(RawAmount::Int(value)) => Decimal::from(*value),
        Some(RawAmount::Float(value)) => Decimal::from_f64(*value).unwrap_or(Decimal::ZERO),
        Some(RawAmount::Text(text)) => parse_decimal(text).unwrap_or(Decimal::ZERO),
    }
}

/// Normalize a raw rate into `[0, 1]`, `default` when missing.
///
/// ```
/// use wertfluss::{normalize_rate, RawAmount};
/// use rust_decimal::Decimal;
///
/// assert_eq!(normalize_rate(Some(&RawAmount::from("7e27")), Decimal::ZERO), Decimal::ONE);
/// assert_eq!(normalize_rate(Some(&RawAmount::from(-3_i64)), Decimal::ONE), Decimal::ZERO);
/// ```
pub fn normalize_rate(raw: Option<&RawAmount>, default: Decimal) -> Decimal {
    normalize_fraction(raw, default).clamp(Decimal::ZERO, Decimal::ONE)
}

fn float_to_cents(value: f64) -> Cents {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    if value >= MAX_CENTS as f64 {
        return MAX_CENTS;
    }
    Decimal::from_f64(value).map(round_half_up).unwrap_or(0)
}

fn parse_decimal(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .ok()
}
