//! Records to strongly typed series, validated in a single pass.
//!
//! Everything downstream of this module works on plain `f64` pairs; field
//! lookups and type checks happen here once per call.

use crate::core::{
    error::{ConfigError, GraphError},
    value::{KeyKind, Record, Value},
};

/// One `(key, value)` sample.  Date keys are milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub key: f64,
    pub value: f64,
}

impl Point {
    #[inline]
    #[must_use]
    pub const fn new(key: f64, value: f64) -> Self {
        Self { key, value }
    }
}

pub type Series = Vec<Point>;

/// Fail fast if the data is empty or the first record lacks any `fields`.
pub fn require_fields(records: &[Record], fields: &[&str]) -> Result<(), GraphError> {
    let first = records.first().ok_or(GraphError::EmptyData)?;
    for field in fields {
        if !first.contains(field) {
            return Err(ConfigError::MissingField((*field).to_owned()).into());
        }
    }
    Ok(())
}

#[inline]
fn cell<'a>(record: &'a Record, field: &str) -> &'a Value {
    const NULL: &Value = &Value::Null;
    record.get(field).unwrap_or(NULL)
}

/// A finite number, or `InvalidData`.
pub fn number(record: &Record, row: usize, field: &str) -> Result<f64, GraphError> {
    match cell(record, field) {
        Value::Num(n) if n.is_finite() => Ok(*n),
        Value::Num(n) => Err(GraphError::invalid(row, field, format!("non-finite number {n}"))),
        other => Err(GraphError::invalid(
            row,
            field,
            format!("expected a number, got {}", other.type_name()),
        )),
    }
}

/// Settle the key axis type: the declared kind wins, otherwise the first
/// record decides.  Either way every row is later checked against it.
pub fn resolve_key_kind(
    records: &[Record],
    field: &str,
    declared: Option<KeyKind>,
) -> Result<KeyKind, GraphError> {
    if let Some(kind) = declared {
        return Ok(kind);
    }
    let first = records.first().ok_or(GraphError::EmptyData)?;
    let v = cell(first, field);
    KeyKind::of(v).ok_or_else(|| {
        GraphError::invalid(
            0,
            field,
            format!("expected a number or date, got {}", v.type_name()),
        )
    })
}

/// A key of exactly `kind`.  Mixed date/number columns are rejected, not coerced.
pub fn key(record: &Record, row: usize, field: &str, kind: KeyKind) -> Result<f64, GraphError> {
    let v = cell(record, field);
    match (KeyKind::of(v), v.as_f64()) {
        (Some(k), Some(x)) if k == kind => Ok(x),
        (Some(k), None) if k == kind => {
            Err(GraphError::invalid(row, field, "non-finite number".to_owned()))
        }
        _ => Err(GraphError::invalid(
            row,
            field,
            format!(
                "expected a {}, got {}",
                match kind {
                    KeyKind::Number => "number",
                    KeyKind::Date => "date",
                },
                v.type_name()
            ),
        )),
    }
}

/// Extract `(x, y)` from every record, in input order.
pub fn extract(records: &[Record], x: &str, y: &str, kind: KeyKind) -> Result<Series, GraphError> {
    records
        .iter()
        .enumerate()
        .map(|(row, r)| Ok(Point::new(key(r, row, x, kind)?, number(r, row, y)?)))
        .collect()
}
