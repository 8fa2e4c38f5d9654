//! Numeric condition operators let you construct Condition elements that restrict access based on
//! comparing a key to an integer or decimal value.
//!
//! Both the request value and the condition values arrive as strings. Anything `rust_decimal` can
//! hold is compared exactly as a [`Decimal`], so `10`, `10.0` and `1e1` all compare equal. Values
//! beyond its range or precision fall back to `f64`. Nothing here fails hard: a value that doesn't
//! parse simply can't satisfy the condition.
use super::util::{any_match, none_match};
use log::debug;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::cmp::Ordering;
use std::str::FromStr;

#[derive(Debug, Copy, Clone)]
enum Number {
    Exact(Decimal),
    Float(f64),
}

impl Number {
    fn to_f64(self) -> Option<f64> {
        match self {
            Number::Exact(d) => d.to_f64(),
            Number::Float(f) => Some(f),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Number) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

impl PartialOrd for Number {
    fn partial_cmp(&self, other: &Number) -> Option<Ordering> {
        match (self, other) {
            (Number::Exact(a), Number::Exact(b)) => Some(a.cmp(b)),
            _ => self.to_f64()?.partial_cmp(&other.to_f64()?),
        }
    }
}

// Optional sign, digits with an optional fraction, optional exponent. Rejects what the number
// parsers would otherwise let through: `_` separators, `inf`, `NaN`, whitespace.
fn is_number(s: &str) -> bool {
    fn digits(b: &[u8]) -> usize {
        b.iter().take_while(|c| c.is_ascii_digit()).count()
    }

    let b = s.as_bytes();
    let mut i = match b.first() {
        Some(b'+') | Some(b'-') => 1,
        _ => 0,
    };

    let int = digits(&b[i..]);
    i += int;
    let mut frac = 0;
    if b.get(i) == Some(&b'.') {
        i += 1;
        frac = digits(&b[i..]);
        i += frac;
    }
    if int + frac == 0 {
        return false;
    }

    if let Some(b'e') | Some(b'E') = b.get(i) {
        i += 1;
        if let Some(b'+') | Some(b'-') = b.get(i) {
            i += 1;
        }
        let exp = digits(&b[i..]);
        if exp == 0 {
            return false;
        }
        i += exp;
    }
    i == b.len()
}

// Parse an integer, fixed point or scientific notation number
fn parse(s: &str) -> Option<Number> {
    if !is_number(s) {
        return None;
    }

    let exact = if s.contains(|c: char| c == 'e' || c == 'E') {
        Decimal::from_scientific(s)
    } else {
        Decimal::from_str(s)
    };

    match exact {
        Ok(d) => Some(Number::Exact(d)),
        // out of Decimal's range, huge magnitudes become +/-inf which still order correctly
        Err(_) => s.parse::<f64>().ok().map(Number::Float),
    }
}

fn parse_actual(actual: Option<&str>) -> Option<Number> {
    let actual = actual?;
    let n = parse(actual);
    if n.is_none() {
        debug!("request value '{}' is not numeric", actual);
    }
    n
}

fn parse_values(values: &[String]) -> Vec<Option<Number>> {
    values
        .iter()
        .map(|v| {
            let n = parse(v);
            if n.is_none() {
                debug!("condition value '{}' is not numeric", v);
            }
            n
        })
        .collect()
}

/// True if the request value stands in one of the `accepted` orderings relative to at least one
/// of the condition values, e.g. `&[Ordering::Greater, Ordering::Equal]` for `>=`. Condition
/// values that don't parse never match.
pub(crate) fn compare(values: &[String], actual: Option<&str>, accepted: &[Ordering]) -> bool {
    let actual = match parse_actual(actual) {
        Some(n) => n,
        None => return false,
    };

    any_match(&parse_values(values), &actual, |v, a| match v.and_then(|v| a.partial_cmp(&v)) {
        Some(ord) => accepted.contains(&ord),
        None => false,
    })
}

/// Negated matching. True if the request value equals none of the condition values. A single
/// malformed condition value fails the whole condition.
pub(crate) fn not_equals(values: &[String], actual: Option<&str>) -> bool {
    let actual = match parse_actual(actual) {
        Some(n) => n,
        None => return false,
    };

    let parsed = parse_values(values);
    if parsed.iter().any(Option::is_none) {
        return false;
    }

    none_match(&parsed, &actual, |v, a| *v == Some(*a))
}
