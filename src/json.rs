//! JSON text in the form JavaScript's `JSON.stringify` produces.
//!
//! serde_json and JavaScript only disagree on numbers. serde_json keeps a
//! trailing `.0` on integral floats, while JavaScript holds every number as
//! an f64 and prints it with `Number.prototype.toString`. Tool results and
//! request bodies go through [`stringify`] so clients see the same text the
//! backend's own JavaScript clients would.

use std::fmt;
use std::io;

use serde::Serialize;
use serde_json::ser::{self, Serializer};
use serde_json::{Number, Value};

/// Integers up to this magnitude survive a round trip through f64.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Formats a finite f64 the way `Number.prototype.toString` does.
///
/// Decimal notation is used while the decimal exponent lies in `-6..=20`,
/// exponent notation (`1e+21`, `1.5e-7`) outside it.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss
)] // digit counts and exponents of an f64 are tiny
pub fn number_to_js(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    // `{:e}` gives the shortest round-trip digits, e.g. "1.23456e2"
    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };

    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let k = digits.len() as i32;
    let n = exponent + 1;

    let magnitude = if (k..=21).contains(&n) {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if (1..=21).contains(&n) {
        let (whole, fraction) = digits.split_at(n as usize);
        format!("{whole}.{fraction}")
    } else if (-5..=0).contains(&n) {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let e = n - 1;
        let sign = if e < 0 { '-' } else { '+' };
        let (first, rest) = digits.split_at(1);
        if rest.is_empty() {
            format!("{first}e{sign}{}", e.abs())
        } else {
            format!("{first}.{rest}e{sign}{}", e.abs())
        }
    };

    if value.is_sign_negative() {
        format!("-{magnitude}")
    } else {
        magnitude
    }
}

#[allow(clippy::cast_precision_loss)] // JavaScript reads the integer as an f64
fn i64_to_js(value: i64) -> String {
    if value.unsigned_abs() <= MAX_EXACT_INTEGER {
        value.to_string()
    } else {
        number_to_js(value as f64)
    }
}

#[allow(clippy::cast_precision_loss)] // JavaScript reads the integer as an f64
fn u64_to_js(value: u64) -> String {
    if value <= MAX_EXACT_INTEGER {
        value.to_string()
    } else {
        number_to_js(value as f64)
    }
}

/// Formats a JSON number the way JavaScript prints it.
#[must_use]
pub fn number_string(number: &Number) -> String {
    if let Some(i) = number.as_i64() {
        i64_to_js(i)
    } else if let Some(u) = number.as_u64() {
        u64_to_js(u)
    } else {
        number.as_f64().map_or_else(|| number.to_string(), number_to_js)
    }
}

/// Compact output with JavaScript number formatting.
struct JsFormatter;

impl ser::Formatter for JsFormatter {
    fn write_i64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: i64) -> io::Result<()> {
        writer.write_all(i64_to_js(value).as_bytes())
    }

    fn write_u64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: u64) -> io::Result<()> {
        writer.write_all(u64_to_js(value).as_bytes())
    }

    fn write_f64<W: ?Sized + io::Write>(&mut self, writer: &mut W, value: f64) -> io::Result<()> {
        writer.write_all(number_to_js(value).as_bytes())
    }
}

/// Displays a [`Value`] as `JSON.stringify` would.
pub struct Stringify<'a>(pub &'a Value);

impl fmt::Display for Stringify<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut buf = Vec::new();
        let mut serializer = Serializer::with_formatter(&mut buf, JsFormatter);
        self.0.serialize(&mut serializer).map_err(|_| fmt::Error)?;
        f.write_str(std::str::from_utf8(&buf).map_err(|_| fmt::Error)?)
    }
}

/// Serialises a value as compact JSON with JavaScript number formatting.
#[must_use]
pub fn stringify(value: &Value) -> String {
    Stringify(value).to_string()
}
