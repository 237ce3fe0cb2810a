//! Metric kinds and their value formats.

use std::fmt;
use std::str::FromStr;

use crate::error::IngestError;

/// The two recognized metric kinds.
///
/// Gauges replace their value on every update, counters accumulate deltas.
/// A gauge and a counter may share a name; they are separate entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    Gauge,
    Counter,
}

impl MetricKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MetricKind::Gauge => "gauge",
            MetricKind::Counter => "counter",
        }
    }

    /// Parse a gauge value: decimal (scientific notation included) or
    /// hexadecimal (`0x1.8p3`) float literal.
    ///
    /// Finite literals outside the `f64` range are rejected rather than
    /// saturated; `inf`/`infinity` spelled out are accepted.
    pub fn parse_gauge(raw: &str) -> std::result::Result<f64, IngestError> {
        let invalid = || IngestError::InvalidValue {
            kind: MetricKind::Gauge.as_str(),
            value: raw.to_string(),
        };

        let value = match parse_hex_float(raw) {
            Some(parsed) => parsed.ok_or_else(invalid)?,
            None => raw.parse::<f64>().map_err(|_| invalid())?,
        };

        if value.is_infinite() && !is_infinity_literal(raw) {
            return Err(invalid());
        }
        Ok(value)
    }

    /// Parse a counter delta: base-10 signed 64-bit integer, no fraction.
    pub fn parse_counter(raw: &str) -> std::result::Result<i64, IngestError> {
        raw.parse::<i64>().map_err(|_| IngestError::InvalidValue {
            kind: MetricKind::Counter.as_str(),
            value: raw.to_string(),
        })
    }
}

fn strip_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn is_infinity_literal(raw: &str) -> bool {
    let (_, body) = strip_sign(raw);
    body.eq_ignore_ascii_case("inf") || body.eq_ignore_ascii_case("infinity")
}

/// Hexadecimal float: `[+-]0x<hex digits>[.<hex digits>]p[+-]<decimal exponent>`.
///
/// Returns `None` when `raw` has no `0x` prefix (not a hex literal at all),
/// `Some(None)` when it has one but is malformed or overflows.
fn parse_hex_float(raw: &str) -> Option<Option<f64>> {
    let (negative, body) = strip_sign(raw);
    let body = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))?;

    Some(hex_float_body(body).map(|v| if negative { -v } else { v }))
}

fn hex_float_body(body: &str) -> Option<f64> {
    let (digits, exp) = body.split_once(['p', 'P'])?;
    let exp_digits = exp.strip_prefix(['+', '-']).unwrap_or(exp);
    if exp_digits.is_empty() || !exp_digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Exponents beyond i64 saturate; the result is 0 or an overflow either way.
    let exp: i64 = exp.parse().unwrap_or(if exp.starts_with('-') {
        i64::MIN / 2
    } else {
        i64::MAX / 2
    });

    let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }

    // Up to 16 significant hex digits fit in a u64. Dropped digits only
    // matter for rounding, so fold them into a sticky low bit.
    let mut mantissa: u64 = 0;
    let mut significant = 0usize;
    let mut scale: i64 = 0;
    let mut sticky = false;
    let digit_iter = int_part
        .chars()
        .map(|c| (c, false))
        .chain(frac_part.chars().map(|c| (c, true)));
    for (c, fractional) in digit_iter {
        let d = c.to_digit(16)? as u64;
        if significant < 16 {
            if mantissa != 0 || d != 0 {
                significant += 1;
            }
            mantissa = (mantissa << 4) | d;
            if fractional {
                scale -= 4;
            }
        } else {
            sticky |= d != 0;
            if !fractional {
                scale += 4;
            }
        }
    }
    if sticky {
        mantissa |= 1;
    }

    let value = ldexp(mantissa as f64, exp.saturating_add(scale));
    value.is_finite().then_some(value)
}

/// `x * 2^e` without intermediate overflow of the power term.
fn ldexp(mut x: f64, mut e: i64) -> f64 {
    const STEP: i64 = 1000;
    while e > STEP && x.is_finite() && x != 0.0 {
        x *= 2f64.powi(STEP as i32);
        e -= STEP;
    }
    while e < -STEP && x != 0.0 {
        x *= 2f64.powi(-(STEP as i32));
        e += STEP;
    }
    if x == 0.0 || x.is_infinite() {
        return x;
    }
    x * 2f64.powi(e as i32)
}

impl FromStr for MetricKind {
    type Err = IngestError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "gauge" => Ok(MetricKind::Gauge),
            "counter" => Ok(MetricKind::Counter),
            other => Err(IngestError::UnsupportedKind(other.to_string())),
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
