//! Public-facing crate root – re-exports.
//!
//! Bar, dot and line charts rendered as plain text:
//!
//! ```
//! use ascii_charts::{BarConfig, Record, bar_chart};
//!
//! let rows = vec![
//!     Record::new().with("r", "A").with("v", 10),
//!     Record::new().with("r", "B").with("v", 5),
//! ];
//! let cfg = BarConfig::builder().width(10).build()?;
//! let text = bar_chart(&rows, "r", "v", &cfg)?;
//! assert!(text.starts_with("A │██████████ 10"));
//! # Ok::<(), ascii_charts::GraphError>(())
//! ```

pub mod cli;
pub mod core;
pub mod render;
pub mod service;

pub use crate::core::{
    bounds::{Axis, Domain},
    config::{BarConfig, BarConfigBuilder, PlotConfig, PlotConfigBuilder},
    data::{read_csv_fast, read_csv_from_path},
    error::{ConfigError, GraphError, ServiceError},
    format::{Formatter, format_number, format_value},
    series::{Point, Series},
    value::{KeyKind, Record, Value},
};

pub use render::{
    bar_chart, dot_chart, downsample, line_chart, log_bar_chart, log_dot_chart, log_line_chart,
    write_bar_chart, write_dot_chart, write_line_chart,
};
