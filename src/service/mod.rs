//! Interfaces to the collaborators that sit outside the text renderer.

pub mod export;
pub mod remote;

pub use export::{ExportOptions, ImageExporter, ImageFormat, SvgPassthrough};
pub use remote::{ApiKey, ChartService, DEFAULT_KEY_VAR, Payload, Response, check_status};
