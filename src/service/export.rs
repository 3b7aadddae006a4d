//! Image export boundary.
//!
//! Rasterizing SVG/HTML needs a headless renderer, which is plugged in
//! through [`ImageExporter`].  Raw SVG needs nothing and is written as-is.

use std::{fs, path::Path};

use crate::core::error::ServiceError;

/// Output format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Svg,
}

impl ImageFormat {
    pub fn from_path(path: &Path) -> Result<Self, ServiceError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            _ => Err(ServiceError::UnsupportedFormat(ext)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ExportOptions {
    /// Extra CSS applied before rendering.
    pub style: Option<String>,
    pub dark: bool,
}

/// Renders chart markup to a file.
pub trait ImageExporter {
    fn export(&self, markup: &str, path: &Path, opts: &ExportOptions) -> Result<(), ServiceError>;
}

/// Writes SVG markup straight to disk; raster formats are refused.
#[derive(Debug, Clone, Copy, Default)]
pub struct SvgPassthrough;

impl ImageExporter for SvgPassthrough {
    fn export(&self, markup: &str, path: &Path, opts: &ExportOptions) -> Result<(), ServiceError> {
        match ImageFormat::from_path(path)? {
            ImageFormat::Svg => {
                let body = match &opts.style {
                    Some(css) => inject_style(markup, css),
                    None => markup.to_owned(),
                };
                fs::write(path, body)?;
                Ok(())
            }
            other => Err(ServiceError::UnsupportedFormat(format!(
                "{other:?} needs a headless renderer"
            ))),
        }
    }
}

/// Insert a `<style>` element right after the opening `<svg ...>` tag.
fn inject_style(markup: &str, css: &str) -> String {
    let Some(open) = markup.find("<svg") else {
        return markup.to_owned();
    };
    let Some(close) = markup[open..].find('>') else {
        return markup.to_owned();
    };
    let at = open + close + 1;
    format!("{}<style>{css}</style>{}", &markup[..at], &markup[at..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_picks_format() {
        assert_eq!(ImageFormat::from_path(Path::new("a.PNG")).unwrap(), ImageFormat::Png);
        assert_eq!(ImageFormat::from_path(Path::new("a.jpg")).unwrap(), ImageFormat::Jpeg);
        assert_eq!(ImageFormat::from_path(Path::new("a.svg")).unwrap(), ImageFormat::Svg);
        assert!(ImageFormat::from_path(Path::new("a.gif")).is_err());
        assert!(ImageFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn style_lands_inside_svg() {
        let out = inject_style("<svg width=\"1\"><g/></svg>", "g{fill:red}");
        assert_eq!(out, "<svg width=\"1\"><style>g{fill:red}</style><g/></svg>");
    }

    #[test]
    fn svg_is_written_raster_is_refused() {
        let dir = std::env::temp_dir();
        let svg = dir.join("ascii_charts_export_test.svg");
        SvgPassthrough
            .export("<svg/>", &svg, &ExportOptions::default())
            .unwrap();
        assert_eq!(fs::read_to_string(&svg).unwrap(), "<svg/>");
        let _ = fs::remove_file(&svg);

        let png = dir.join("ascii_charts_export_test.png");
        assert!(matches!(
            SvgPassthrough.export("<svg/>", &png, &ExportOptions::default()),
            Err(ServiceError::UnsupportedFormat(_))
        ));
    }
}
