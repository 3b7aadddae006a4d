//! Loosely typed cells and the records that hold them.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

/// One cell of an input row.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Str(String),
    Num(f64),
    Date(DateTime<Utc>),
    Bool(bool),
    Null,
}

impl Value {
    /// Numeric view used by the scale math.  Dates become milliseconds since
    /// the epoch; everything else (including non-finite numbers) is `None`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(n) if n.is_finite() => Some(*n),
            Self::Date(d) => Some(d.timestamp_millis() as f64),
            _ => None,
        }
    }

    /// Rebuild a date from a millisecond timestamp.  Out-of-range input
    /// yields `Null` rather than a bogus date.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn date_from_millis(ms: f64) -> Self {
        if !ms.is_finite() {
            return Self::Null;
        }
        DateTime::<Utc>::from_timestamp_millis(ms.round() as i64).map_or(Self::Null, Self::Date)
    }

    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Num(_) => "number",
            Self::Date(_) => "date",
            Self::Bool(_) => "boolean",
            Self::Null => "null",
        }
    }
}

// --- conversions ---
impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Str(s.to_owned())
    }
}
impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}
impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Num(n)
    }
}
impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Num(f64::from(n))
    }
}
impl From<i64> for Value {
    #[allow(clippy::cast_precision_loss)]
    fn from(n: i64) -> Self {
        Self::Num(n as f64)
    }
}
impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}
impl From<DateTime<Utc>> for Value {
    fn from(d: DateTime<Utc>) -> Self {
        Self::Date(d)
    }
}
impl From<NaiveDate> for Value {
    /// Midnight UTC on the given day.
    fn from(d: NaiveDate) -> Self {
        Self::Date(d.and_time(NaiveTime::MIN).and_utc())
    }
}
impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Declared type of a dot/line key axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyKind {
    Number,
    Date,
}

impl KeyKind {
    /// Kind of a cell, if it can serve as a key at all.
    #[must_use]
    pub fn of(v: &Value) -> Option<Self> {
        match v {
            Value::Num(_) => Some(Self::Number),
            Value::Date(_) => Some(Self::Date),
            _ => None,
        }
    }

    /// Turn a scale-space key back into the kind of value the caller gave us.
    #[must_use]
    pub fn to_value(self, key: f64) -> Value {
        match self {
            Self::Number => Value::Num(key),
            Self::Date => Value::date_from_millis(key),
        }
    }
}

/// One input row: field name to cell.  Never mutated by the renderer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Record(HashMap<String, Value>);

impl Record {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fluent insert, handy for literals in tests and demos.
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    #[inline]
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    #[inline]
    #[must_use]
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_round_trip_through_millis() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let v = Value::from(day);
        let ms = v.as_f64().unwrap();
        assert_eq!(KeyKind::Date.to_value(ms), v);
    }

    #[test]
    fn non_finite_numbers_have_no_numeric_view() {
        assert_eq!(Value::Num(f64::NAN).as_f64(), None);
        assert_eq!(Value::Num(f64::INFINITY).as_f64(), None);
        assert_eq!(Value::from("12").as_f64(), None);
        assert_eq!(Value::Null.as_f64(), None);
    }

    #[test]
    fn record_builder_and_option_conversion() {
        let r = Record::new().with("a", 1).with("b", None::<f64>);
        assert_eq!(r.get("a"), Some(&Value::Num(1.0)));
        assert!(r.get("b").unwrap().is_null());
        assert!(!r.contains("c"));
    }
}
