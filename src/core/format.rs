//! Value to display string conversion.
//!
//! Defaults: numbers get thousands separators and at most
//! [`DECIMAL_PRECISION`] decimals, dates print as `YYYY-MM-DD`.  Callers can
//! inject their own [`Formatter`] per axis; there is no global state.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use num_format::{Locale, ToFormattedString};

use crate::core::{constants::DECIMAL_PRECISION, value::Value};

/// `1234567.891` -> `1,234,567.89`, `1500` -> `1,500`, `0.5` -> `0.5`.
#[must_use]
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return n.to_string();
    }
    let scale = 10u128.pow(DECIMAL_PRECISION as u32);
    let scaled = (n.abs() * scale as f64).round();
    // Past u128 the digits are float noise anyway.
    if scaled >= u128::MAX as f64 {
        return format!("{n:e}");
    }
    let scaled = scaled as u128;
    let (int, frac) = (scaled / scale, scaled % scale);

    let mut s = String::new();
    if n < 0.0 && scaled != 0 {
        s.push('-');
    }
    s.push_str(&int.to_formatted_string(&Locale::en));
    if frac != 0 {
        let digits = format!("{frac:0width$}", width = DECIMAL_PRECISION);
        s.push('.');
        s.push_str(digits.trim_end_matches('0'));
    }
    s
}

#[inline]
#[must_use]
pub fn format_date(d: &DateTime<Utc>) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// Built-in rendering of any cell.
#[must_use]
pub fn format_value(v: &Value) -> String {
    match v {
        Value::Str(s) => s.clone(),
        Value::Num(n) => format_number(*n),
        Value::Date(d) => format_date(d),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
    }
}

/// Injected `value -> string` function.
#[derive(Clone)]
pub struct Formatter(Arc<dyn Fn(&Value) -> String + Send + Sync>);

impl Formatter {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    #[inline]
    #[must_use]
    pub fn apply(&self, v: &Value) -> String {
        (self.0)(v)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(format_value)
    }
}

impl fmt::Debug for Formatter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Formatter(..)")
    }
}
