//! Remote chart service boundary.
//!
//! The transport lives outside this crate: implement [`ChartService`] over
//! whatever HTTP client the application already uses.  What is pinned down
//! here is key resolution, payload shape and status handling.

use std::{env, io};

use csv::Writer;

use crate::core::{
    error::ServiceError,
    format::format_value,
    value::{Record, Value},
};

/// Default environment variable holding the API key.
pub const DEFAULT_KEY_VAR: &str = "DATAWRAPPER_KEY";

/// A non-empty API key read from the environment.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn from_env(var: &str) -> Result<Self, ServiceError> {
        match env::var(var) {
            Ok(k) if !k.trim().is_empty() => Ok(Self(k)),
            _ => Err(ServiceError::Auth {
                var: var.to_owned(),
            }),
        }
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ApiKey(***)")
    }
}

/// Body of a data or annotation update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Csv(String),
    Json(String),
}

impl Payload {
    /// CSV with the given column order.  Cells use the default formatting,
    /// minus thousands separators; quoting is left to the writer.
    pub fn csv_from_records(records: &[Record], columns: &[&str]) -> Result<Self, ServiceError> {
        let mut wtr = Writer::from_writer(Vec::new());
        wtr.write_record(columns)?;
        for r in records {
            wtr.write_record(columns.iter().map(|c| match r.get(c) {
                Some(Value::Num(n)) => n.to_string(),
                Some(v) => format_value(v),
                None => String::new(),
            }))?;
        }
        let bytes = wtr.into_inner().map_err(csv::IntoInnerError::into_error)?;
        let text = String::from_utf8(bytes)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        Ok(Self::Csv(text))
    }

    #[must_use]
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Csv(_) => "text/csv",
            Self::Json(_) => "application/json",
        }
    }
}

/// Raw response, handed back only when the caller asks for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: String,
}

/// Map non-2xx responses to [`ServiceError::Remote`].
pub fn check_status(resp: Response) -> Result<Response, ServiceError> {
    if (200..300).contains(&resp.status) {
        Ok(resp)
    } else {
        Err(ServiceError::Remote {
            status: resp.status,
            body: resp.body,
        })
    }
}

/// Operations against a hosted chart.  Implementations must not retry.
pub trait ChartService {
    fn update_data(
        &self,
        chart_id: &str,
        payload: &Payload,
        return_response: bool,
    ) -> Result<Option<Response>, ServiceError>;

    fn update_annotations(
        &self,
        chart_id: &str,
        payload: &Payload,
        return_response: bool,
    ) -> Result<Option<Response>, ServiceError>;

    fn update_notes(
        &self,
        chart_id: &str,
        notes: &str,
        return_response: bool,
    ) -> Result<Option<Response>, ServiceError>;

    fn publish(&self, chart_id: &str, return_response: bool)
    -> Result<Option<Response>, ServiceError>;
}
