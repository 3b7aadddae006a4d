//! Memory-efficient CSV loader producing [`Record`]s.
//!
//! The first non-comment line is the header.  Cells are typed on the way in:
//! number (via `lexical-core`), then `YYYY-MM-DD` date, then boolean; empty
//! cells become `Null` and anything else stays a string.

use std::{
    fmt::{self, Display},
    io::Read,
};

use chrono::NaiveDate;
use csv::{ByteRecord, Position, ReaderBuilder, Trim};

use crate::core::value::{Record, Value};

// --- Error Handling ---
#[derive(Debug)]
pub struct ParseCsvError {
    pub line: usize,
    pub kind: ParseErrorKind,
}

#[derive(Debug)]
pub enum ParseErrorKind {
    Io(std::io::Error),
    MissingHeader,
    BadColumnCount { expected: usize, got: usize },
    BadUtf8,
    Malformed(String),
}

impl Display for ParseCsvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ParseErrorKind::Io(e) => write!(f, "I/O error on line {}: {}", self.line, e),
            ParseErrorKind::MissingHeader => f.write_str("CSV input has no header line"),
            ParseErrorKind::BadColumnCount { expected, got } => {
                write!(f, "line {}: expected {expected} columns, got {got}", self.line)
            }
            ParseErrorKind::BadUtf8 => write!(f, "line {}: invalid UTF-8", self.line),
            ParseErrorKind::Malformed(why) => write!(f, "line {}: {why}", self.line),
        }
    }
}
impl std::error::Error for ParseCsvError {}

// --- Helpers ---
#[inline]
fn trim(mut b: &[u8]) -> &[u8] {
    while !b.is_empty() && b[0].is_ascii_whitespace() {
        b = &b[1..];
    }
    while !b.is_empty() && b[b.len() - 1].is_ascii_whitespace() {
        b = &b[..b.len() - 1];
    }
    b
}

/// Replace U+2212 MINUS SIGN with ASCII `-` in place.
#[inline]
pub fn normalize_unicode_minus(buf: &mut Vec<u8>) {
    let (mut r, mut w) = (0, 0);
    while r < buf.len() {
        if r + 2 < buf.len() && buf[r] == 0xE2 && buf[r + 1] == 0x88 && buf[r + 2] == 0x92 {
            buf[w] = b'-';
            r += 3;
            w += 1;
        } else {
            if r != w {
                buf[w] = buf[r];
            }
            r += 1;
            w += 1;
        }
    }
    buf.truncate(w);
}

/// Type one raw cell.
#[must_use]
pub fn parse_cell(bytes: &[u8]) -> Value {
    let bytes = trim(bytes);
    if bytes.is_empty() {
        return Value::Null;
    }
    if let Ok(n) = lexical_core::parse::<f64>(bytes) {
        // NaN / inf are kept so validation can reject them with a row number.
        return Value::Num(n);
    }
    let text = String::from_utf8_lossy(bytes);
    if let Ok(d) = NaiveDate::parse_from_str(&text, "%Y-%m-%d") {
        return Value::from(d);
    }
    match text.as_ref() {
        "true" => Value::Bool(true),
        "false" => Value::Bool(false),
        _ => Value::Str(text.into_owned()),
    }
}

fn line_of(pos: Option<&Position>) -> usize {
    pos.map_or(0, |p| usize::try_from(p.line()).unwrap_or(usize::MAX))
}

impl From<csv::Error> for ParseCsvError {
    fn from(e: csv::Error) -> Self {
        let line = line_of(e.position());
        let kind = match e.into_kind() {
            csv::ErrorKind::Io(e) => ParseErrorKind::Io(e),
            csv::ErrorKind::UnequalLengths {
                expected_len, len, ..
            } => ParseErrorKind::BadColumnCount {
                expected: usize::try_from(expected_len).unwrap_or(usize::MAX),
                got: usize::try_from(len).unwrap_or(usize::MAX),
            },
            csv::ErrorKind::Utf8 { .. } => ParseErrorKind::BadUtf8,
            other => ParseErrorKind::Malformed(format!("{other:?}")),
        };
        Self { line, kind }
    }
}

// --- Fast CSV ingest ---
const BUF_CAP: usize = 1 << 20; // 1 MiB

/// Quoted cells may hold delimiters, quotes and newlines; `#` lines are
/// skipped.
pub fn read_csv_fast<R: Read>(src: R) -> Result<Vec<Record>, ParseCsvError> {
    let mut rdr = ReaderBuilder::new()
        .buffer_capacity(BUF_CAP)
        .comment(Some(b'#'))
        .trim(Trim::All)
        .from_reader(src);

    let header = rdr
        .byte_headers()?
        .iter()
        .map(|c| std::str::from_utf8(c).map(str::to_owned))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ParseCsvError {
            line: 1,
            kind: ParseErrorKind::BadUtf8,
        })?;
    if header.iter().all(String::is_empty) {
        return Err(ParseCsvError {
            line: 0,
            kind: ParseErrorKind::MissingHeader,
        });
    }

    let mut data = Vec::<Record>::new();
    let mut cell = Vec::<u8>::with_capacity(64);
    let mut row = ByteRecord::new();
    while rdr.read_byte_record(&mut row)? {
        data.push(
            header
                .iter()
                .zip(row.iter())
                .map(|(name, c)| {
                    cell.clear();
                    cell.extend_from_slice(c);
                    normalize_unicode_minus(&mut cell);
                    (name.clone(), parse_cell(&cell))
                })
                .collect(),
        );
    }
    Ok(data)
}

pub fn read_csv_from_path(path: &str) -> Result<Vec<Record>, ParseCsvError> {
    if path == "-" {
        read_csv_fast(std::io::stdin())
    } else {
        use std::fs::File;
        read_csv_fast(File::open(path).map_err(|e| ParseCsvError {
            line: 0,
            kind: ParseErrorKind::Io(e),
        })?)
    }
}
