//! Aggregates the “business logic” layer.

pub mod bounds;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod format;
pub mod series;
pub mod value;

// re-export frequently-used items for convenience
pub use bounds::{Axis, Domain};
pub use config::{BarConfig, BarConfigBuilder, PlotConfig, PlotConfigBuilder};
pub use constants::{
    DEFAULT_BAR_WIDTH, DEFAULT_PER_ROW, DEFAULT_PLOT_HEIGHT, DEFAULT_PLOT_WIDTH, LABEL_GUTTER,
    MIN_PLOT_HEIGHT, MIN_PLOT_WIDTH,
};
pub use error::{ConfigError, GraphError, ServiceError};
pub use format::{Formatter, format_date, format_number, format_value};
pub use series::{Point, Series};
pub use value::{KeyKind, Record, Value};
